//! # boothops
//!
//! 학교 축제 부스 체크인 서버.
//!
//! - 학생 한 명은 한 부스를 최대 3번 이용할 수 있습니다.
//! - 부스 관리자는 체크인 후 2분 안에 기록을 취소할 수 있고, 취소는 별도 테이블에 남습니다.
//! - 학생 명단은 CSV로 교체하거나 병합합니다.
//!
//! `main.rs`는 설정을 읽어 [`app::build_app`]을 띄우기만 합니다.
//! 통합 테스트(tests/)도 같은 라우터를 사용합니다.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
