//! # 에러 처리 모듈
//!
//! 부스 운영 API에서 발생할 수 있는 모든 에러를 `AppError` 하나로 모읍니다.
//! 핸들러가 `Result<T, AppError>`를 반환하면 Axum이 `IntoResponse`를 호출해
//! `{ "error": "CODE", ...추가정보 }` 형태의 JSON 응답으로 바꿉니다.
//!
//! 에러 분류:
//! - 검증 실패 (`MISSING_*`, `INVALID_*`) → 400
//! - 업무 규칙 위반 (`OVER_LIMIT`, `VOID_WINDOW_EXPIRED`) → 400, `HAS_USAGE_DATA` → 409
//! - 권한 없음 (`FORBIDDEN`) → 403
//! - 대상 없음 (`NOT_FOUND`) → 404
//! - 로그인 실패 (`INVALID_CREDENTIALS`) → 401
//! - 토큰 인증 실패(401)는 `middleware::auth::AuthError`가 담당합니다.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::MAX_USAGE_PER_BOOTH;
use crate::services::roster_csv::ImportError;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 부스/학생/이용 기록이 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 잘못된 요청 (HTTP 400). 필드는 클라이언트에 그대로 전달되는 에러 코드입니다.
    #[error("Bad request: {0}")]
    BadRequest(&'static str),

    /// 로그인 실패 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(&'static str),

    /// 다른 부스에 대한 접근, 통합관리자 전용 기능 호출 (HTTP 403)
    #[error("Forbidden")]
    Forbidden,

    /// 학생의 부스 이용 한도 도달 (HTTP 400)
    #[error("Usage limit reached: {total_used} used")]
    OverLimit { total_used: i64 },

    /// 이용 기록이 있는 상태에서 명단 교체 시도 (HTTP 409)
    #[error("Roster replace blocked: {usage_count} usage rows exist")]
    HasUsageData { usage_count: i64 },

    /// CSV 자체를 받아들일 수 없음 (HTTP 400)
    #[error(transparent)]
    Import(#[from] ImportError),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// `#[from]` 덕분에 sqlx 함수 결과에 `?`를 쓰면 자동으로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// 응답 본문의 `error` 필드에 들어가는 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::BadRequest(code) => *code,
            AppError::Unauthorized(code) => *code,
            AppError::Forbidden => "FORBIDDEN",
            AppError::OverLimit { .. } => "OVER_LIMIT",
            AppError::HasUsageData { .. } => "HAS_USAGE_DATA",
            AppError::Import(e) => e.code(),
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
        }
    }
}

/// `ApiJson` 추출자가 본문 파싱에 실패하면 이 변환을 거칩니다.
/// 누락된 Content-Type, 잘못된 JSON, 알 수 없는 필드 모두 `INVALID_BODY`입니다.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "rejected request body");
        AppError::BadRequest("INVALID_BODY")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();

        // (상태 코드, 응답 JSON) 튜플을 만듭니다.
        // 내부 에러는 로그에만 자세히 남기고 클라이언트에는 코드만 보냅니다.
        let (status, body): (StatusCode, Value) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, json!({ "error": code })),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, json!({ "error": code })),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, json!({ "error": code })),
            AppError::Forbidden => (StatusCode::FORBIDDEN, json!({ "error": code })),
            AppError::OverLimit { total_used } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": code,
                    "totalUsed": total_used,
                    "remaining": (MAX_USAGE_PER_BOOTH - total_used).max(0),
                }),
            ),
            AppError::HasUsageData { usage_count } => (
                StatusCode::CONFLICT,
                json!({ "error": code, "usageCount": usage_count }),
            ),
            AppError::Import(ref e) => (StatusCode::BAD_REQUEST, e.to_body()),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": code }))
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": code }))
            }
        };

        (status, Json(body)).into_response()
    }
}
