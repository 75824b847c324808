//! # 라우터 조립
//!
//! API 라우트는 `/api`와 `{BASE_PATH}/api` 두 곳에 똑같이 연결됩니다.
//! (학교 서버에서는 `/ys-fest` 하위 경로로 프록시되기 때문입니다.)
//!
//! 빌드된 프론트엔드 디렉토리가 있으면 API가 아닌 경로는 SPA로 넘깁니다.

use std::path::Path;

use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::routes::{self, AppState};

/// 상태가 주입되기 전의 API 라우트
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(routes::health_check))
        .route("/booths", get(routes::list_booths))
        // 관리자 로그인
        .route("/admin/booth-login", post(routes::booth_login))
        // 통합관리자
        .route("/admin/booth-ops/dashboard", get(routes::booth_ops_dashboard))
        .route("/admin/booth-ops/reset", post(routes::reset_booth_usage))
        .route(
            "/admin/booth-ops/booth-admins/{class_name}/password",
            put(routes::set_booth_admin_password),
        )
        // 명단
        .route("/students", get(routes::list_students))
        .route("/admin/students/template", get(routes::student_import_template))
        .route("/admin/students/stats", get(routes::student_stats))
        .route("/admin/students/import", post(routes::import_students))
        // 체크인
        .route("/booths/{id}/usages/summary", get(routes::booth_usage_summary))
        .route("/booths/{id}/use", post(routes::use_booth))
        .route(
            "/booths/{id}/use/{usage_id}/void",
            post(routes::void_booth_usage),
        )
        .fallback(api_not_found)
}

/// 전체 앱을 만듭니다.
///
/// `base_path`는 `Config`에서 정규화된 값(`"/ys-fest"` 또는 `""`)을 받습니다.
pub fn build_app(state: AppState, base_path: &str, frontend_dist: Option<&Path>) -> Router {
    let api = api_routes().with_state(state);

    let mut app = Router::new().nest("/api", api.clone());
    if !base_path.is_empty() {
        app = app.nest(&format!("{base_path}/api"), api);
    }

    // 개발 편의를 위해 모든 출처를 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = match frontend_dist.filter(|dir| dir.exists()) {
        Some(dist) => {
            tracing::info!("Serving frontend static files from {}", dist.display());

            // 찾을 수 없는 경로는 200과 함께 index.html로 돌려보냅니다 (SPA 라우팅)
            let serve_dir =
                ServeDir::new(dist).fallback(ServeFile::new(dist.join("index.html")));

            let app = if base_path.is_empty() {
                app
            } else {
                app.nest_service(base_path, serve_dir.clone())
            };
            app.fallback_service(serve_dir)
        }
        None => {
            tracing::warn!("Frontend dist directory not found, serving API only");
            app.fallback(api_not_found)
        }
    };

    app.layer(cors).layer(TraceLayer::new_for_http())
}

/// 알 수 없는 경로
async fn api_not_found(uri: Uri) -> impl IntoResponse {
    tracing::debug!(%uri, "No route");
    (StatusCode::NOT_FOUND, Json(json!({ "error": "NOT_FOUND" })))
}
