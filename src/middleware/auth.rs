//! # 관리자 인증 추출자
//!
//! 핸들러 인자에 `AdminAuth`를 넣으면 로그인한 관리자만 호출할 수 있고,
//! `SuperAdmin`을 넣으면 통합관리자만 호출할 수 있습니다.
//!
//! 토큰은 `x-admin-token` 헤더에서 찾고, 없으면 `?token=` 쿼리에서 찾습니다.
//! (엑셀 다운로드처럼 헤더를 붙일 수 없는 링크용)

use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::routes::AppState;
use crate::services::sessions::{self, AdminSession, SessionLookupError};

/// 토큰 헤더 이름
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// 로그인한 부스 관리자 (반 관리자 또는 통합관리자)
#[derive(Debug, Clone)]
pub struct AdminAuth(pub AdminSession);

/// 통합관리자
#[derive(Debug, Clone)]
pub struct SuperAdmin(pub AdminSession);

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// 헤더 우선, 없으면 쿼리 파라미터
fn token_from_parts(parts: &Parts) -> Option<String> {
    let header = parts
        .headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if let Some(token) = header {
        return Some(token.to_string());
    }

    Query::<TokenQuery>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(query)| query.token)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts).ok_or(AuthError::MissingToken)?;

        let session = sessions::authenticate(state.sessions.as_ref(), &token, Utc::now())
            .map_err(|e| match e {
                SessionLookupError::Unknown => AuthError::InvalidToken,
                SessionLookupError::Expired => {
                    tracing::debug!("Rejected expired admin token");
                    AuthError::ExpiredToken
                }
            })?;

        Ok(AdminAuth(session))
    }
}

impl FromRequestParts<AppState> for SuperAdmin {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AdminAuth(session) = AdminAuth::from_request_parts(parts, state).await?;
        if !session.is_super_admin {
            tracing::warn!(class_name = %session.class_name, "Super admin route refused");
            return Err(AuthError::NotSuperAdmin);
        }
        Ok(SuperAdmin(session))
    }
}

/// 인증 실패. 토큰 문제는 401, 권한 부족은 403.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("admin token is required")]
    MissingToken,
    #[error("unknown admin token")]
    InvalidToken,
    #[error("admin token has expired")]
    ExpiredToken,
    #[error("super admin only")]
    NotSuperAdmin,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken => "UNAUTHORIZED",
            AuthError::ExpiredToken => "EXPIRED",
            AuthError::NotSuperAdmin => "FORBIDDEN",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::NotSuperAdmin => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        };

        (status, Json(json!({ "error": self.code() }))).into_response()
    }
}
