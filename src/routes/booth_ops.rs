//! # 통합관리자 전용 핸들러
//!
//! ## 엔드포인트
//! - `GET  /admin/booth-ops/dashboard` → 전체 부스 이용 현황
//! - `POST /admin/booth-ops/reset` → 이용/취소 기록 전체 삭제
//! - `PUT  /admin/booth-ops/booth-admins/{className}/password` → 반 관리자 PIN 변경
//!
//! 모든 핸들러가 `SuperAdmin` 추출자를 받으므로 반 관리자 토큰은 403입니다.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    db,
    error::AppError,
    middleware::auth::SuperAdmin,
    models::{Dashboard, SetPasswordRequest},
    routes::{ApiJson, AppState},
    services::sessions,
};

/// `GET /admin/booth-ops/dashboard`
pub async fn booth_ops_dashboard(
    SuperAdmin(_): SuperAdmin,
    State(state): State<AppState>,
) -> Result<Json<Dashboard>, AppError> {
    let dashboard = db::dashboard(&state.pool).await?;
    Ok(Json(dashboard))
}

/// `POST /admin/booth-ops/reset`
///
/// 명단과 부스, 관리자 계정은 그대로 두고 이용 기록만 지웁니다.
pub async fn reset_booth_usage(
    SuperAdmin(session): SuperAdmin,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let (usages, voids) = db::reset_all_usage(&state.pool).await?;

    tracing::warn!(
        admin_id = session.admin_id,
        usages_deleted = usages,
        voids_deleted = voids,
        "All booth usage reset"
    );

    Ok(Json(json!({ "success": true })))
}

/// `PUT /admin/booth-ops/booth-admins/{className}/password`
///
/// 변경 즉시 그 반으로 발급된 세션을 모두 지워 재로그인을 강제합니다.
/// 통합관리자 자신의 비밀번호는 이 경로로 바꿀 수 없습니다.
pub async fn set_booth_admin_password(
    SuperAdmin(session): SuperAdmin,
    State(state): State<AppState>,
    Path(class_name): Path<String>,
    ApiJson(req): ApiJson<SetPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    if class_name == state.superadmin_class_name {
        return Err(AppError::BadRequest("CANNOT_CHANGE_SUPERADMIN"));
    }

    let password = req
        .password
        .filter(|p| !p.trim().is_empty())
        .ok_or(AppError::BadRequest("MISSING_PASSWORD"))?;

    // 부스가 없는 반의 관리자 계정은 만들지 않습니다.
    if db::find_booth_by_class_name(&state.pool, &class_name)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound);
    }

    db::upsert_admin_password(&state.pool, &class_name, &password).await?;
    let invalidated = sessions::invalidate_class(state.sessions.as_ref(), &class_name);

    tracing::info!(
        by_admin_id = session.admin_id,
        class_name = %class_name,
        sessions_invalidated = invalidated,
        "Booth admin password changed"
    );

    Ok(Json(json!({ "success": true })))
}
