//! # boothops 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. 기본 데이터 시드
//! 6. 라우터 조립 후 HTTP 서버 시작

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use boothops::{
    app,
    config::Config,
    db::seed::{run_seed, SeedAccounts},
    routes::AppState,
    services::sessions::MemorySessionStore,
};
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // RUST_LOG가 없으면 boothops, tower_http, axum 모듈을 debug 레벨로
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boothops=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting boothops server on {}:{}", config.host, config.port);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    let accounts = SeedAccounts {
        superadmin_class_name: &config.superadmin_class_name,
        superadmin_password: &config.superadmin_password,
        default_booth_pin: &config.default_booth_pin,
    };
    run_seed(&pool, config.seed_mode, &accounts).await?;

    // 세션은 메모리에만 있으므로 재시작하면 모든 관리자가 다시 로그인합니다.
    let state = AppState {
        pool: pool.clone(),
        sessions: Arc::new(MemorySessionStore::new()),
        superadmin_class_name: config.superadmin_class_name.clone(),
    };

    let app = app::build_app(
        state,
        &config.base_path,
        Some(Path::new(&config.frontend_dist)),
    );

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
