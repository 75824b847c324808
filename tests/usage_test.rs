mod common;

use axum::http::{Method, StatusCode};
use common::{spawn_app, spawn_file_app, BOOTH_PIN};
use serde_json::json;

#[tokio::test]
async fn check_in_counts_down_to_limit() {
    let t = spawn_app().await;
    let token = t.login("1-1", BOOTH_PIN).await;

    for expected_remaining in [2, 1, 0] {
        let (status, body) = t
            .post("/api/booths/1/use", Some(&token), json!({ "studentId": 5 }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["remaining"], expected_remaining);
        assert_eq!(body["totalUsed"], 3 - expected_remaining);
    }

    let (status, body) = t
        .post("/api/booths/1/use", Some(&token), json!({ "studentId": 5 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "OVER_LIMIT");
    assert_eq!(body["totalUsed"], 3);
    assert_eq!(body["remaining"], 0);

    assert_eq!(t.usage_count(1, 5).await, 3);
}

#[tokio::test]
async fn limit_is_per_booth() {
    let t = spawn_app().await;
    let super_token = t.super_token().await;

    for _ in 0..3 {
        let (status, _) = t
            .post("/api/booths/1/use", Some(&super_token), json!({ "studentId": 7 }))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = t
        .post("/api/booths/2/use", Some(&super_token), json!({ "studentId": 7 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["remaining"], 2);
}

#[tokio::test]
async fn recent_entry_joins_student_and_admin() {
    let t = spawn_app().await;
    let token = t.login("1-1", BOOTH_PIN).await;

    let (_, student) = t.get("/api/students?grade=2&class_no=1", Some(&token)).await;
    let student = &student.as_array().unwrap()[0];

    let (status, body) = t
        .post(
            "/api/booths/1/use",
            Some(&token),
            json!({ "studentId": student["id"] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let entry = &body["recentEntry"];
    assert_eq!(entry["booth_id"], 1);
    assert_eq!(entry["student_id"], student["id"]);
    assert_eq!(entry["student_name"], student["name"]);
    assert_eq!(entry["grade"], 2);
    assert_eq!(entry["class_no"], 1);
    assert_eq!(entry["student_no"], 1);
    assert_eq!(entry["admin_class"], "1-1");
    assert!(entry["used_at"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn check_in_validation() {
    let t = spawn_app().await;
    let token = t.login("1-1", BOOTH_PIN).await;

    let (status, body) = t.post("/api/booths/1/use", Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MISSING_STUDENT");

    let (status, body) = t
        .post("/api/booths/1/use", Some(&token), json!({ "studentId": 99999 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    let (status, body) = t
        .post("/api/booths/abc/use", Some(&token), json!({ "studentId": 1 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_BOOTH");

    let (status, body) = t
        .post("/api/booths/999/use", Some(&token), json!({ "studentId": 1 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    let (status, body) = t
        .post("/api/booths/1/use", Some(&token), json!({ "studentId": "1" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_BODY");
}

#[tokio::test]
async fn class_admin_is_scoped_to_own_booth() {
    let t = spawn_app().await;
    let token = t.login("1-1", BOOTH_PIN).await;

    let (status, body) = t
        .post("/api/booths/2/use", Some(&token), json!({ "studentId": 1 }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");
    assert_eq!(t.usage_count(2, 1).await, 0);

    let (status, _) = t.get("/api/booths/2/usages/summary", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = t.get("/api/booths/1/usages/summary", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn void_within_window_restores_capacity() {
    let t = spawn_app().await;
    let token = t.login("1-1", BOOTH_PIN).await;

    let mut last_id = 0;
    for _ in 0..3 {
        let (_, body) = t
            .post("/api/booths/1/use", Some(&token), json!({ "studentId": 9 }))
            .await;
        last_id = body["recentEntry"]["id"].as_i64().unwrap();
    }

    let (status, body) = t
        .post(
            &format!("/api/booths/1/use/{last_id}/void"),
            Some(&token),
            json!({ "reason": "잘못 찍음" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(t.usage_count(1, 9).await, 2);

    let (reason, by_admin): (String, i64) = sqlx::query_as(
        "SELECT void_reason, void_by_admin_id FROM booth_usages_void WHERE booth_usage_id = ?",
    )
    .bind(last_id)
    .fetch_one(&t.pool)
    .await
    .unwrap();
    assert_eq!(reason, "잘못 찍음");
    assert!(by_admin > 0);

    let (status, body) = t
        .post("/api/booths/1/use", Some(&token), json!({ "studentId": 9 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["remaining"], 0);

    // 이미 취소된 기록은 다시 취소할 수 없습니다.
    let (status, _) = t
        .post(&format!("/api/booths/1/use/{last_id}/void"), Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn void_body_is_optional() {
    let t = spawn_app().await;
    let token = t.login("1-1", BOOTH_PIN).await;

    let (_, body) = t
        .post("/api/booths/1/use", Some(&token), json!({ "studentId": 2 }))
        .await;
    let usage_id = body["recentEntry"]["id"].as_i64().unwrap();

    let (status, _) = t
        .request(
            Method::POST,
            &format!("/api/booths/1/use/{usage_id}/void"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let reason: String =
        sqlx::query_scalar("SELECT void_reason FROM booth_usages_void WHERE booth_usage_id = ?")
            .bind(usage_id)
            .fetch_one(&t.pool)
            .await
            .unwrap();
    assert_eq!(reason, "");
}

#[tokio::test]
async fn void_after_window_leaves_usage_intact() {
    let t = spawn_app().await;
    let token = t.login("1-1", BOOTH_PIN).await;

    let (_, body) = t
        .post("/api/booths/1/use", Some(&token), json!({ "studentId": 3 }))
        .await;
    let usage_id = body["recentEntry"]["id"].as_i64().unwrap();
    t.backdate_usage(usage_id, "-3 minutes").await;

    let (status, body) = t
        .post(&format!("/api/booths/1/use/{usage_id}/void"), Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VOID_WINDOW_EXPIRED");
    assert_eq!(t.usage_count(1, 3).await, 1);

    let voids: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM booth_usages_void")
        .fetch_one(&t.pool)
        .await
        .unwrap();
    assert_eq!(voids, 0);
}

#[tokio::test]
async fn naive_timestamps_are_read_as_utc() {
    let t = spawn_app().await;
    let token = t.login("1-1", BOOTH_PIN).await;

    let (_, body) = t
        .post("/api/booths/1/use", Some(&token), json!({ "studentId": 4 }))
        .await;
    let usage_id = body["recentEntry"]["id"].as_i64().unwrap();

    // 시간대 표기가 없는 UTC 문자열 (30초 전)
    sqlx::query(
        "UPDATE booth_usages SET used_at = strftime('%Y-%m-%d %H:%M:%S', 'now', '-30 seconds') WHERE id = ?",
    )
    .bind(usage_id)
    .execute(&t.pool)
    .await
    .unwrap();

    let (status, _) = t
        .post(&format!("/api/booths/1/use/{usage_id}/void"), Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn void_validation() {
    let t = spawn_app().await;
    let token = t.login("1-1", BOOTH_PIN).await;
    let super_token = t.super_token().await;

    let (_, body) = t
        .post("/api/booths/1/use", Some(&token), json!({ "studentId": 1 }))
        .await;
    let usage_id = body["recentEntry"]["id"].as_i64().unwrap();

    let (status, body) = t
        .post("/api/booths/1/use/x/void", Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_REQUEST");

    // 다른 부스 경로로는 찾을 수 없습니다.
    let (status, _) = t
        .post(
            &format!("/api/booths/2/use/{usage_id}/void"),
            Some(&super_token),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 반 관리자는 다른 부스 기록을 취소할 수 없습니다.
    let (_, body) = t
        .post("/api/booths/2/use", Some(&super_token), json!({ "studentId": 1 }))
        .await;
    let other_usage = body["recentEntry"]["id"].as_i64().unwrap();
    let (status, _) = t
        .post(
            &format!("/api/booths/2/use/{other_usage}/void"),
            Some(&token),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    sqlx::query("UPDATE booth_usages SET used_at = 'yesterday-ish' WHERE id = ?")
        .bind(usage_id)
        .execute(&t.pool)
        .await
        .unwrap();
    let (status, body) = t
        .post(&format!("/api/booths/1/use/{usage_id}/void"), Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_USAGE");
}

#[tokio::test]
async fn concurrent_check_ins_never_exceed_limit() {
    let t = spawn_app().await;
    let token = t.login("1-1", BOOTH_PIN).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let t = t.clone();
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            t.post("/api/booths/1/use", Some(&token), json!({ "studentId": 11 }))
                .await
                .0
        }));
    }

    let mut ok = 0;
    for handle in handles {
        if handle.await.unwrap() == StatusCode::OK {
            ok += 1;
        }
    }
    assert_eq!(ok, 3);
    assert_eq!(t.usage_count(1, 11).await, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_connections_never_exceed_limit() {
    let t = spawn_file_app(8).await;
    let token = t.login("1-1", BOOTH_PIN).await;

    let mut handles = Vec::new();
    for _ in 0..24 {
        let t = t.clone();
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            let (status, body) = t
                .post("/api/booths/1/use", Some(&token), json!({ "studentId": 11 }))
                .await;
            (status, body)
        }));
    }

    let mut ok = 0;
    let mut over_limit = 0;
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        match status {
            StatusCode::OK => ok += 1,
            StatusCode::BAD_REQUEST => {
                assert_eq!(body["error"], "OVER_LIMIT");
                assert_eq!(body["totalUsed"], 3);
                over_limit += 1;
            }
            other => panic!("unexpected status {other}: {body}"),
        }
    }
    assert_eq!(ok, 3);
    assert_eq!(over_limit, 21);
    assert_eq!(t.usage_count(1, 11).await, 3);
}
