mod common;

use axum::http::StatusCode;
use boothops::services::sessions::{AdminSession, SessionStore};
use chrono::{Duration, Utc};
use common::{spawn_app, BOOTH_PIN, SUPERADMIN, SUPERADMIN_PASSWORD};
use serde_json::json;

#[tokio::test]
async fn class_admin_login_resolves_booth() {
    let t = spawn_app().await;

    let (status, body) = t
        .post(
            "/api/admin/booth-login",
            None,
            json!({ "className": "1-1", "password": BOOTH_PIN }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["className"], "1-1");
    assert_eq!(body["boothId"], 1);
    assert_eq!(body["isSuperAdmin"], false);
    assert_eq!(body["token"].as_str().unwrap().len(), 48);
    assert!(body["adminId"].is_i64());
}

#[tokio::test]
async fn super_admin_login_has_no_booth() {
    let t = spawn_app().await;

    let (status, body) = t
        .post(
            "/api/admin/booth-login",
            None,
            json!({ "className": SUPERADMIN, "password": SUPERADMIN_PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isSuperAdmin"], true);
    assert!(body["boothId"].is_null());
}

#[tokio::test]
async fn login_failures() {
    let t = spawn_app().await;

    let (status, body) = t
        .post(
            "/api/admin/booth-login",
            None,
            json!({ "className": "1-1", "password": "9999" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "INVALID_CREDENTIALS");

    // 반 이름은 앞뒤 공백까지 정확히 일치해야 합니다.
    let (status, body) = t
        .post(
            "/api/admin/booth-login",
            None,
            json!({ "className": " 1-1 ", "password": BOOTH_PIN }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "INVALID_CREDENTIALS");

    let (status, body) = t
        .post(
            "/api/admin/booth-login",
            None,
            json!({ "className": "   ", "password": BOOTH_PIN }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MISSING_CREDENTIALS");

    let (status, body) = t
        .post("/api/admin/booth-login", None, json!({ "className": "1-1" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MISSING_CREDENTIALS");

    let (status, body) = t
        .post(
            "/api/admin/booth-login",
            None,
            json!({ "className": "1-1", "password": BOOTH_PIN, "role": "root" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_BODY");
}

#[tokio::test]
async fn login_works_under_both_prefixes() {
    let t = spawn_app().await;

    for prefix in ["/api", "/ys-fest/api"] {
        let (status, body) = t
            .post(
                &format!("{prefix}/admin/booth-login"),
                None,
                json!({ "className": "2-1", "password": BOOTH_PIN }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{prefix}");
        assert_eq!(body["boothId"], 3);
    }
}

#[tokio::test]
async fn token_checks() {
    let t = spawn_app().await;

    let (status, body) = t.get("/api/students", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");

    let (status, body) = t.get("/api/students", Some("not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");

    // 쿼리 파라미터로도 토큰을 받습니다.
    let token = t.login("1-1", BOOTH_PIN).await;
    let (status, body) = t
        .get(&format!("/api/students?grade=1&class_no=1&token={token}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 21);
}

#[tokio::test]
async fn expired_session_is_rejected_and_removed() {
    let t = spawn_app().await;

    let now = Utc::now();
    t.sessions.put(AdminSession {
        token: "stale".to_string(),
        admin_id: 1,
        class_name: "1-1".to_string(),
        is_super_admin: false,
        default_booth_id: Some(1),
        created_at: now - Duration::hours(13),
        expires_at: now - Duration::hours(1),
    });

    let (status, body) = t.get("/api/students", Some("stale")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "EXPIRED");

    let (_, body) = t.get("/api/students", Some("stale")).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert!(t.sessions.is_empty());
}

#[tokio::test]
async fn class_admin_cannot_use_super_admin_routes() {
    let t = spawn_app().await;
    let token = t.login("1-1", BOOTH_PIN).await;

    let (status, body) = t.get("/api/admin/booth-ops/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");

    let (status, _) = t
        .post("/api/admin/booth-ops/reset", Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = t.get("/api/admin/booth-ops/dashboard", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn password_change_forces_relogin() {
    let t = spawn_app().await;
    let super_token = t.super_token().await;
    let old_token = t.login("1-2", BOOTH_PIN).await;
    let other_token = t.login("1-1", BOOTH_PIN).await;

    let (status, body) = t
        .put(
            "/api/admin/booth-ops/booth-admins/1-2/password",
            Some(&super_token),
            json!({ "password": "4321" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = t.get("/api/students", Some(&old_token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // 다른 반 세션은 그대로
    let (status, _) = t.get("/api/students", Some(&other_token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = t
        .post(
            "/api/admin/booth-login",
            None,
            json!({ "className": "1-2", "password": BOOTH_PIN }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    t.login("1-2", "4321").await;
}

#[tokio::test]
async fn password_change_validation() {
    let t = spawn_app().await;
    let super_token = t.super_token().await;

    let (status, body) = t
        .put(
            "/ys-fest/api/admin/booth-ops/booth-admins/%ED%86%B5%ED%95%A9%EA%B4%80%EB%A6%AC%EC%9E%90/password",
            Some(&super_token),
            json!({ "password": "1234" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "CANNOT_CHANGE_SUPERADMIN");

    let (status, body) = t
        .put(
            "/api/admin/booth-ops/booth-admins/1-1/password",
            Some(&super_token),
            json!({ "password": "  " }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MISSING_PASSWORD");

    let (status, body) = t
        .put(
            "/api/admin/booth-ops/booth-admins/9-9/password",
            Some(&super_token),
            json!({ "password": "1234" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    // 통합관리자 자신은 여전히 로그인 가능
    t.super_token().await;
}

#[tokio::test]
async fn public_routes_and_unknown_paths() {
    let t = spawn_app().await;

    let (status, body) = t.get("/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = t.get("/ys-fest/api/booths", None).await;
    assert_eq!(status, StatusCode::OK);
    let booths = body.as_array().unwrap();
    assert_eq!(booths.len(), 7);
    assert_eq!(booths[0]["class_name"], "1-1");
    assert_eq!(booths[0]["name"], "방탈출");

    let (status, body) = t.get("/api/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}
