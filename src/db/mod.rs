//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `students`: 학생 명단 조회
//! - `roster_import`: CSV 명단 교체/병합 트랜잭션
//! - `booths`: 부스 조회
//! - `booth_admins`: 부스 관리자 로그인과 비밀번호 변경
//! - `usages`: 체크인 기록, 취소, 초기화
//! - `usage_stats`: 부스 요약과 대시보드 집계
//! - `seed`: 시작 시 기본 데이터

pub mod booth_admins;
pub mod booths;
pub mod roster_import;
pub mod seed;
pub mod students;
pub mod usage_stats;
pub mod usages;

// 하위 모듈의 모든 공개 함수를 재공개(re-export)하여
// `crate::db::list_students`처럼 바로 접근할 수 있게 합니다.
pub use booth_admins::*;
pub use booths::*;
pub use roster_import::*;
pub use students::*;
pub use usage_stats::*;
pub use usages::*;
