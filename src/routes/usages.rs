//! # 부스 체크인 핸들러
//!
//! ## 엔드포인트
//! - `GET  /booths/{id}/usages/summary` → 부스 이용 요약
//! - `POST /booths/{id}/use` `{ studentId }` → 체크인
//! - `POST /booths/{id}/use/{usageId}/void` `{ reason? }` → 체크인 취소
//!
//! 반 관리자는 자기 반 부스만, 통합관리자는 모든 부스를 다룰 수 있습니다.
//! 권한 확인은 기록을 건드리기 전에 합니다.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::{
    db,
    error::AppError,
    middleware::auth::AdminAuth,
    models::{Booth, BoothSummary, CheckInOutcome, CheckInRequest, CheckInResponse, VoidRequest},
    routes::{parse_path_id, ApiJson, AppState},
    services::{
        sessions::AdminSession,
        timestamps::{parse_db_timestamp, within_void_window},
    },
};

/// 부스가 있고 세션이 그 부스를 다룰 수 있는지 확인합니다.
async fn authorized_booth(
    state: &AppState,
    session: &AdminSession,
    booth_id: i64,
) -> Result<Booth, AppError> {
    let booth = db::get_booth(&state.pool, booth_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if !session.can_access(booth.id) {
        tracing::warn!(
            admin_id = session.admin_id,
            class_name = %session.class_name,
            booth_id,
            "Booth access denied"
        );
        return Err(AppError::Forbidden);
    }

    Ok(booth)
}

/// `GET /booths/{id}/usages/summary`
pub async fn booth_usage_summary(
    AdminAuth(session): AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BoothSummary>, AppError> {
    let booth_id = parse_path_id(&id, "INVALID_BOOTH")?;
    authorized_booth(&state, &session, booth_id).await?;

    let summary = db::booth_summary(&state.pool, booth_id).await?;
    Ok(Json(summary))
}

/// `POST /booths/{id}/use`
///
/// 한도(3회)에 도달한 학생은 `OVER_LIMIT`으로 거부되고 기록이 남지 않습니다.
pub async fn use_booth(
    AdminAuth(session): AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<CheckInRequest>,
) -> Result<Json<CheckInResponse>, AppError> {
    let booth_id = parse_path_id(&id, "INVALID_BOOTH")?;
    authorized_booth(&state, &session, booth_id).await?;

    let student_id = req
        .student_id
        .ok_or(AppError::BadRequest("MISSING_STUDENT"))?;
    let student = db::get_student(&state.pool, student_id)
        .await?
        .ok_or(AppError::NotFound)?;

    match db::check_in(&state.pool, booth_id, student.id, session.admin_id).await? {
        CheckInOutcome::Recorded {
            total_used,
            remaining,
            entry,
        } => {
            tracing::info!(
                booth_id,
                student_id = student.id,
                admin_id = session.admin_id,
                usage_id = entry.id,
                total_used,
                remaining,
                "Booth check-in recorded"
            );
            Ok(Json(CheckInResponse {
                success: true,
                total_used,
                remaining,
                recent_entry: entry,
            }))
        }
        CheckInOutcome::OverLimit { total_used } => {
            tracing::info!(
                booth_id,
                student_id = student.id,
                admin_id = session.admin_id,
                total_used,
                "Booth check-in refused: usage limit reached"
            );
            Err(AppError::OverLimit { total_used })
        }
    }
}

/// `POST /booths/{id}/use/{usageId}/void`
///
/// 체크인 후 2분 안에만 취소할 수 있습니다. 본문은 생략해도 됩니다.
pub async fn void_booth_usage(
    AdminAuth(session): AdminAuth,
    State(state): State<AppState>,
    Path((id, usage_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let booth_id = parse_path_id(&id, "INVALID_REQUEST")?;
    let usage_id = parse_path_id(&usage_id, "INVALID_REQUEST")?;

    let req: VoidRequest = if body.iter().all(u8::is_ascii_whitespace) {
        VoidRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            tracing::debug!(reason = %e, "rejected void body");
            AppError::BadRequest("INVALID_BODY")
        })?
    };

    authorized_booth(&state, &session, booth_id).await?;

    let usage = db::get_usage(&state.pool, usage_id)
        .await?
        .filter(|usage| usage.booth_id == booth_id)
        .ok_or(AppError::NotFound)?;

    let used_at =
        parse_db_timestamp(&usage.used_at).ok_or(AppError::BadRequest("INVALID_USAGE"))?;
    if !within_void_window(used_at, Utc::now()) {
        return Err(AppError::BadRequest("VOID_WINDOW_EXPIRED"));
    }

    let reason = req.reason.unwrap_or_default();
    if !db::void_usage(&state.pool, usage.id, session.admin_id, reason.trim()).await? {
        return Err(AppError::BadRequest("VOID_FAILED"));
    }

    tracing::info!(
        booth_id,
        usage_id = usage.id,
        student_id = usage.student_id,
        admin_id = session.admin_id,
        reason = %reason.trim(),
        "Booth check-in voided"
    );

    Ok(Json(json!({ "success": true })))
}
