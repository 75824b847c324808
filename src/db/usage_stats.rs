//! # 이용 현황 집계 쿼리
//!
//! 부스별 요약과 통합관리자 대시보드를 만듭니다.
//! 여러 SELECT가 같은 시점의 데이터를 보도록 하나의 읽기 트랜잭션 안에서 실행합니다.

use std::collections::BTreeMap;

use crate::error::AppError;
use crate::models::{
    BoothStats, BoothSummary, ClassUsage, Dashboard, TopStudent, UsageEntry, MAX_USAGE_PER_BOOTH,
};
use sqlx::SqlitePool;

use super::usages::USAGE_ENTRY_SELECT;

/// 부스 요약의 최근 내역 개수
pub const SUMMARY_RECENT_LIMIT: i64 = 20;
/// 대시보드의 최근 내역 개수
pub const DASHBOARD_RECENT_LIMIT: i64 = 50;
/// 대시보드 상위 학생 수
pub const TOP_STUDENTS_LIMIT: i64 = 20;
/// 부스 요약의 상위 학급 수
pub const TOP_CLASSES_LIMIT: i64 = 3;

/// 한 부스의 이용 요약을 만듭니다.
///
/// `remaining_buckets`는 명단의 모든 학생을 남은 횟수(0..=최대)별로 센 것이라
/// 값의 합이 항상 `total_students`와 같습니다.
pub async fn booth_summary(pool: &SqlitePool, booth_id: i64) -> Result<BoothSummary, AppError> {
    let mut tx = pool.begin().await?;

    let (total_usage, unique_students): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(DISTINCT student_id) FROM booth_usages WHERE booth_id = ?",
    )
    .bind(booth_id)
    .fetch_one(&mut *tx)
    .await?;

    let top_classes = sqlx::query_as::<_, ClassUsage>(
        r#"
        SELECT s.grade, s.class_no, COUNT(*) AS count
        FROM booth_usages u
        JOIN students s ON s.id = u.student_id
        WHERE u.booth_id = ?
        GROUP BY s.grade, s.class_no
        ORDER BY count DESC, s.grade, s.class_no
        LIMIT ?
        "#,
    )
    .bind(booth_id)
    .bind(TOP_CLASSES_LIMIT)
    .fetch_all(&mut *tx)
    .await?;

    let per_student: Vec<(i64, i64)> = sqlx::query_as(
        r#"
        SELECT student_id, COUNT(*)
        FROM booth_usages
        WHERE booth_id = ?
        GROUP BY student_id
        "#,
    )
    .bind(booth_id)
    .fetch_all(&mut *tx)
    .await?;

    // 이용하지 않은 학생도 COALESCE로 0회가 되어 "최대 남음" 칸에 들어갑니다.
    let buckets: Vec<(i64, i64)> = sqlx::query_as(
        r#"
        SELECT MAX(0, ? - COALESCE(c.used, 0)) AS remaining, COUNT(*)
        FROM students s
        LEFT JOIN (
            SELECT student_id, COUNT(*) AS used
            FROM booth_usages
            WHERE booth_id = ?
            GROUP BY student_id
        ) c ON c.student_id = s.id
        GROUP BY remaining
        "#,
    )
    .bind(MAX_USAGE_PER_BOOTH)
    .bind(booth_id)
    .fetch_all(&mut *tx)
    .await?;

    let sql = format!("{USAGE_ENTRY_SELECT} WHERE u.booth_id = ? ORDER BY u.used_at DESC, u.id DESC LIMIT ?");
    let recent = sqlx::query_as::<_, UsageEntry>(&sql)
        .bind(booth_id)
        .bind(SUMMARY_RECENT_LIMIT)
        .fetch_all(&mut *tx)
        .await?;

    tx.commit().await?;

    let mut remaining_buckets: BTreeMap<i64, i64> =
        (0..=MAX_USAGE_PER_BOOTH).map(|r| (r, 0)).collect();
    for (remaining, students) in buckets {
        *remaining_buckets.entry(remaining).or_insert(0) += students;
    }
    let total_students = remaining_buckets.values().sum();

    Ok(BoothSummary {
        booth_id,
        total_usage,
        unique_students,
        top_classes,
        per_student_counts: per_student.into_iter().collect(),
        remaining_buckets,
        recent,
        total_students,
        max_usage: MAX_USAGE_PER_BOOTH,
    })
}

/// 통합관리자 대시보드
pub async fn dashboard(pool: &SqlitePool) -> Result<Dashboard, AppError> {
    let mut tx = pool.begin().await?;

    let total_students: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
        .fetch_one(&mut *tx)
        .await?;

    let (total_usage, unique_students): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COUNT(DISTINCT student_id) FROM booth_usages")
            .fetch_one(&mut *tx)
            .await?;

    // 기록이 없는 부스도 0으로 나오도록 booths 기준 LEFT JOIN
    let booths = sqlx::query_as::<_, BoothStats>(
        r#"
        SELECT b.id, b.class_name, b.name,
               COUNT(u.id) AS total_usage,
               COUNT(DISTINCT u.student_id) AS unique_students,
               MAX(u.used_at) AS last_used_at
        FROM booths b
        LEFT JOIN booth_usages u ON u.booth_id = b.id
        GROUP BY b.id, b.class_name, b.name
        ORDER BY b.id
        "#,
    )
    .fetch_all(&mut *tx)
    .await?;

    let sql = format!("{USAGE_ENTRY_SELECT} ORDER BY u.used_at DESC, u.id DESC LIMIT ?");
    let recent = sqlx::query_as::<_, UsageEntry>(&sql)
        .bind(DASHBOARD_RECENT_LIMIT)
        .fetch_all(&mut *tx)
        .await?;

    let top_students = sqlx::query_as::<_, TopStudent>(
        r#"
        SELECT u.student_id, s.name, s.grade, s.class_no, s.student_no, COUNT(*) AS count
        FROM booth_usages u
        LEFT JOIN students s ON s.id = u.student_id
        GROUP BY u.student_id
        ORDER BY count DESC, u.student_id
        LIMIT ?
        "#,
    )
    .bind(TOP_STUDENTS_LIMIT)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Dashboard {
        total_students,
        total_usage,
        unique_students,
        booths,
        recent,
        top_students,
    })
}
