//! # 부스 관리자 로그인 핸들러
//!
//! ## 엔드포인트
//! - `POST /admin/booth-login` `{ className, password }`
//!   → `{ token, adminId, className, isSuperAdmin, boothId }`

use axum::{extract::State, Json};

use crate::{
    db,
    error::AppError,
    models::{BoothLoginRequest, BoothLoginResponse},
    routes::{ApiJson, AppState},
    services::sessions,
};

/// 로그인에 성공하면 12시간짜리 세션 토큰을 발급합니다.
///
/// 반 관리자의 담당 부스(`boothId`)는 같은 class_name을 가진 부스로 결정됩니다.
/// 통합관리자는 담당 부스가 없으므로 `boothId`가 null 입니다.
pub async fn booth_login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<BoothLoginRequest>,
) -> Result<Json<BoothLoginResponse>, AppError> {
    // 공백 검사에만 trim을 쓰고, 조회는 입력값 그대로 정확히 비교합니다.
    let (Some(class_name), Some(password)) = (
        req.class_name.as_deref().filter(|name| !name.trim().is_empty()),
        req.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::BadRequest("MISSING_CREDENTIALS"));
    };

    let Some(admin) = db::find_admin_by_credentials(&state.pool, class_name, password).await?
    else {
        tracing::info!(class_name, "Booth admin login failed");
        return Err(AppError::Unauthorized("INVALID_CREDENTIALS"));
    };

    let is_super_admin = admin.class_name == state.superadmin_class_name;
    let booth_id = if is_super_admin {
        None
    } else {
        db::find_booth_by_class_name(&state.pool, &admin.class_name)
            .await?
            .map(|booth| booth.id)
    };

    let session = sessions::issue(
        state.sessions.as_ref(),
        admin.id,
        &admin.class_name,
        is_super_admin,
        booth_id,
    );

    tracing::info!(
        admin_id = admin.id,
        class_name = %admin.class_name,
        is_super_admin,
        booth_id = ?booth_id,
        "Booth admin logged in"
    );

    Ok(Json(BoothLoginResponse {
        token: session.token,
        admin_id: session.admin_id,
        class_name: session.class_name,
        is_super_admin: session.is_super_admin,
        booth_id: session.default_booth_id,
    }))
}
