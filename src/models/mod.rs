//! # 데이터 모델 모듈
//!
//! 부스 운영(Booth Ops)에서 사용하는 데이터 구조체들을 정의합니다.
//! - `student`: 학생 명단
//! - `booth`: 부스와 부스 관리자(PIN)
//! - `usage`: 체크인 기록, 되돌리기(void) 요청, 집계 응답
//! - `import`: CSV 명단 가져오기 요청/결과

pub mod booth;
pub mod import;
pub mod student;
pub mod usage;

pub use booth::*;
pub use import::*;
pub use student::*;
pub use usage::*;
