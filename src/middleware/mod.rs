//! # 요청 전처리 모듈
//!
//! - `auth`: 관리자 토큰 추출자 (`AdminAuth`, `SuperAdmin`)

pub mod auth;
