#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use boothops::{
    app::build_app,
    config::SeedMode,
    db::seed::{run_seed, SeedAccounts},
    routes::AppState,
    services::sessions::MemorySessionStore,
};
use serde_json::Value;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const SUPERADMIN: &str = "통합관리자";
pub const SUPERADMIN_PASSWORD: &str = "dudtkswnd1!";
pub const BOOTH_PIN: &str = "0000";

#[derive(Clone)]
pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
    pub sessions: Arc<MemorySessionStore>,
    /// 파일 DB를 쓰는 경우 테스트가 끝날 때까지 디렉토리를 유지합니다.
    _dir: Option<Arc<TempDir>>,
}

/// 메모리 DB에 마이그레이션과 기본 시드(부스 7개, 학생 143명)를 적용한 앱
pub async fn spawn_app() -> TestApp {
    // 메모리 DB는 연결마다 따로 생기므로 연결 하나를 끝까지 유지합니다.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");

    build_test_app(pool, None).await
}

/// 임시 파일 DB에 여러 연결을 여는 앱. 동시 요청이 실제로 SQLite에서 경합합니다.
pub async fn spawn_file_app(max_connections: u32) -> TestApp {
    let dir = tempfile::tempdir().expect("temp dir");
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("boothops.db"))
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .expect("file sqlite");

    build_test_app(pool, Some(Arc::new(dir))).await
}

async fn build_test_app(pool: SqlitePool, dir: Option<Arc<TempDir>>) -> TestApp {
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    run_seed(
        &pool,
        SeedMode::Fresh,
        &SeedAccounts {
            superadmin_class_name: SUPERADMIN,
            superadmin_password: SUPERADMIN_PASSWORD,
            default_booth_pin: BOOTH_PIN,
        },
    )
    .await
    .expect("seed");

    let sessions = Arc::new(MemorySessionStore::new());
    let state = AppState {
        pool: pool.clone(),
        sessions: sessions.clone(),
        superadmin_class_name: SUPERADMIN.to_string(),
    };

    TestApp {
        app: build_app(state, "/ys-fest", None),
        pool,
        sessions,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-admin-token", token);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    /// 로그인 후 토큰을 반환합니다. 실패하면 테스트를 중단합니다.
    pub async fn login(&self, class_name: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/api/admin/booth-login",
                None,
                serde_json::json!({ "className": class_name, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn super_token(&self) -> String {
        self.login(SUPERADMIN, SUPERADMIN_PASSWORD).await
    }

    pub async fn usage_count(&self, booth_id: i64, student_id: i64) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM booth_usages WHERE booth_id = ? AND student_id = ?")
            .bind(booth_id)
            .bind(student_id)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    /// 이용 기록의 used_at을 SQLite 수식으로 덮어씁니다. (예: "'now', '-3 minutes'")
    pub async fn backdate_usage(&self, usage_id: i64, modifier: &str) {
        let sql = format!(
            "UPDATE booth_usages SET used_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now', '{modifier}') WHERE id = ?"
        );
        sqlx::query(&sql)
            .bind(usage_id)
            .execute(&self.pool)
            .await
            .unwrap();
    }
}
