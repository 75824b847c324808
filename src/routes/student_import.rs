//! # 명단 CSV 가져오기 핸들러
//!
//! ## 엔드포인트
//! - `GET  /admin/students/template` → `{ filename, csv }`
//! - `GET  /admin/students/stats` → `{ totalStudents }`
//! - `POST /admin/students/import` `{ csvText, mode, resetBoothUsage }` → 가져오기 보고서
//!
//! 파싱은 `services::roster_csv`, DB 반영은 `db::roster_import`가 담당합니다.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    db,
    error::AppError,
    models::{ImportMode, ImportReport, ImportRequest, ImportTemplate, ParsedStats},
    routes::{ApiJson, AppState},
    services::roster_csv::{self, MAX_REPORTED_ERRORS, TEMPLATE_CSV, TEMPLATE_FILENAME},
};

/// `GET /admin/students/template`
pub async fn student_import_template() -> Json<ImportTemplate> {
    Json(ImportTemplate {
        filename: TEMPLATE_FILENAME,
        csv: TEMPLATE_CSV,
    })
}

/// `GET /admin/students/stats`
pub async fn student_stats(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let total_students = db::count_students(&state.pool).await?;
    Ok(Json(json!({ "totalStudents": total_students })))
}

/// `POST /admin/students/import`
///
/// `mode`를 생략하면 replace 입니다. 유효한 행이 하나라도 있으면 반영하고
/// 건너뛴 행은 보고서의 `errors`에 줄 번호와 함께 담습니다.
pub async fn import_students(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ImportRequest>,
) -> Result<Json<ImportReport>, AppError> {
    let csv_text = req
        .csv_text
        .filter(|text| !text.trim().is_empty())
        .ok_or(AppError::BadRequest("MISSING_CSV"))?;

    let mode = match req.mode.as_deref() {
        None => ImportMode::Replace,
        Some(raw) => ImportMode::parse(raw).ok_or(AppError::BadRequest("INVALID_MODE"))?,
    };

    let parsed = roster_csv::parse_roster(&csv_text).map_err(|e| {
        tracing::info!(code = e.code(), "Student import rejected: {}", e);
        AppError::from(e)
    })?;

    let counts =
        db::reconcile_roster(&state.pool, &parsed.rows, mode, req.reset_booth_usage).await?;

    tracing::info!(
        mode = ?mode,
        reset_booth_usage = req.reset_booth_usage,
        inserted = counts.inserted,
        updated = counts.updated,
        deleted = counts.deleted,
        skipped = parsed.errors.len(),
        total_students = counts.total_students,
        "Student roster imported"
    );

    let error_count = parsed.errors.len();
    let mut errors = parsed.errors;
    errors.truncate(MAX_REPORTED_ERRORS);

    Ok(Json(ImportReport {
        success: true,
        mode,
        inserted: counts.inserted,
        updated: counts.updated,
        deleted: counts.deleted,
        total_students: counts.total_students,
        parsed: ParsedStats {
            rows: parsed.rows.len(),
            errors: error_count,
        },
        errors,
    }))
}
