//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `HOST` / `PORT`: 서버 바인딩 주소와 포트
//! - `BASE_PATH`: 리버스 프록시 하위 경로. API가 `/api`와 `{BASE_PATH}/api` 두 곳에 열립니다.
//! - `FRONTEND_DIST`: 빌드된 프론트엔드 디렉토리
//! - `SUPERADMIN_CLASS_NAME` / `SUPERADMIN_PASSWORD`: 통합관리자 계정
//! - `DEFAULT_BOOTH_PIN`: 시드 시 반 관리자에게 주는 초기 PIN
//! - `SEED_MODE`: 시작 시 기본 데이터 시드 방식 (`if-empty` | `fresh` | `off`)

use std::env;

/// 시작 시 기본 데이터를 어떻게 채울지
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// 비어 있는 테이블만 채웁니다. 관리자 계정은 없는 것만 추가합니다.
    IfEmpty,
    /// 부스/관리자/명단/이용 기록을 모두 지우고 다시 채웁니다.
    Fresh,
    Off,
}

impl SeedMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "if-empty" | "if_empty" | "" => Some(Self::IfEmpty),
            "fresh" => Some(Self::Fresh),
            "off" | "none" => Some(Self::Off),
            _ => None,
        }
    }
}

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 경로 (예: "sqlite:data/boothops.db?mode=rwc")
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// 앞에 `/`가 붙고 끝의 `/`는 제거된 형태 (예: "/ys-fest"). 빈 문자열이면 비활성.
    pub base_path: String,
    pub frontend_dist: String,
    pub superadmin_class_name: String,
    pub superadmin_password: String,
    pub default_booth_pin: String,
    pub seed_mode: SeedMode,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`이 없거나 `SEED_MODE` 값을 알 수 없으면 에러입니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> anyhow::Result<Self> {
        let seed_mode = env::var("SEED_MODE").unwrap_or_default();
        let seed_mode = SeedMode::parse(&seed_mode)
            .ok_or_else(|| anyhow::anyhow!("Unknown SEED_MODE: {seed_mode}"))?;

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            // 파싱 실패 시 기본값
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            base_path: normalize_base_path(
                &env::var("BASE_PATH").unwrap_or_else(|_| "/ys-fest".to_string()),
            ),
            frontend_dist: env::var("FRONTEND_DIST")
                .unwrap_or_else(|_| "../client/dist".to_string()),
            superadmin_class_name: env::var("SUPERADMIN_CLASS_NAME")
                .unwrap_or_else(|_| "통합관리자".to_string()),
            superadmin_password: env::var("SUPERADMIN_PASSWORD")
                .unwrap_or_else(|_| "dudtkswnd1!".to_string()),
            default_booth_pin: env::var("DEFAULT_BOOTH_PIN")
                .unwrap_or_else(|_| "0000".to_string()),
            seed_mode,
        })
    }
}

/// "ys-fest/" → "/ys-fest", "/" → ""
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
