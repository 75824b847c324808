//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `booth_login`: 부스 관리자 로그인
//! - `booth_ops`: 통합관리자 전용 (대시보드, 초기화, 비밀번호 변경)
//! - `booths`: 부스 목록
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `student_import`: 명단 CSV 템플릿/통계/가져오기
//! - `students`: 명단 검색
//! - `usages`: 체크인, 취소, 부스 요약

pub mod booth_login;
pub mod booth_ops;
pub mod booths;
pub mod health;
pub mod student_import;
pub mod students;
pub mod usages;

pub use booth_login::*;
pub use booth_ops::*;
pub use booths::*;
pub use health::*;
pub use student_import::*;
pub use students::*;
pub use usages::*;

use std::sync::Arc;

use axum::extract::FromRequest;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::services::sessions::SessionStore;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool과 Arc 모두 clone해도 같은 대상을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// 관리자 세션 저장소
    pub sessions: Arc<dyn SessionStore>,
    /// 이 class_name으로 로그인한 관리자는 통합관리자입니다.
    pub superadmin_class_name: String,
}

/// JSON 요청 본문 추출자.
///
/// `axum::Json`과 같지만 실패 시 `{ "error": "INVALID_BODY" }`로 응답합니다.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// 경로의 숫자 id를 파싱합니다. 실패하면 주어진 에러 코드로 400.
pub(crate) fn parse_path_id(raw: &str, code: &'static str) -> Result<i64, AppError> {
    raw.trim().parse().map_err(|_| AppError::BadRequest(code))
}
