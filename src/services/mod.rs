//! # 서비스 모듈
//!
//! DB와 HTTP에 의존하지 않는 도메인 로직입니다.
//! - `roster_csv`: 학생 명단 CSV 파싱
//! - `sessions`: 관리자 세션 저장소와 토큰 발급/검증
//! - `timestamps`: DB 시각 문자열 해석과 되돌리기 가능 시간 판정

pub mod roster_csv;
pub mod sessions;
pub mod timestamps;
