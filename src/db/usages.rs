//! # 부스 이용(체크인) 기록 쿼리
//!
//! ## 한도 검사
//! 한 학생은 한 부스를 최대 [`MAX_USAGE_PER_BOOTH`]번 이용할 수 있습니다.
//! "개수 확인 → INSERT"를 두 문장으로 나누면 같은 학생이 동시에 체크인될 때
//! 한도를 넘길 수 있으므로, 개수 조건을 INSERT ... SELECT 의 WHERE 절에 넣어
//! 한 문장으로 처리합니다. 영향받은 행이 0이면 한도 초과입니다.
//!
//! ## 취소(void)
//! 취소는 감사 로그(`booth_usages_void`)에 한 줄을 남기고 원본 기록을 지우는
//! 두 작업을 한 트랜잭션에서 수행합니다.

use crate::error::AppError;
use crate::models::{BoothUsage, CheckInOutcome, UsageEntry, MAX_USAGE_PER_BOOTH};
use sqlx::{SqliteExecutor, SqlitePool};

/// 화면 표시용 이용 내역 SELECT. 학생/관리자가 사라졌어도 기록은 보이도록 LEFT JOIN.
pub(crate) const USAGE_ENTRY_SELECT: &str = r#"
    SELECT u.id, u.booth_id, u.student_id, u.admin_id, u.used_at,
           s.name AS student_name, s.grade, s.class_no, s.student_no,
           a.class_name AS admin_class
    FROM booth_usages u
    LEFT JOIN students s ON s.id = u.student_id
    LEFT JOIN booth_admins a ON a.id = u.admin_id
"#;

/// 특정 부스에서 학생이 이용한 횟수
pub async fn count_for_student<'e, E>(
    executor: E,
    booth_id: i64,
    student_id: i64,
) -> Result<i64, AppError>
where
    E: SqliteExecutor<'e>,
{
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM booth_usages WHERE booth_id = ? AND student_id = ?",
    )
    .bind(booth_id)
    .bind(student_id)
    .fetch_one(executor)
    .await?;

    Ok(count)
}

/// 모든 부스의 이용 기록 수
pub async fn count_usages<'e, E>(executor: E) -> Result<i64, AppError>
where
    E: SqliteExecutor<'e>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM booth_usages")
        .fetch_one(executor)
        .await?;

    Ok(count)
}

/// 이용 내역 한 줄을 JOIN 포함으로 조회합니다.
pub async fn get_usage_entry<'e, E>(executor: E, id: i64) -> Result<Option<UsageEntry>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{USAGE_ENTRY_SELECT} WHERE u.id = ?");
    let entry = sqlx::query_as::<_, UsageEntry>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(entry)
}

pub async fn get_usage(pool: &SqlitePool, id: i64) -> Result<Option<BoothUsage>, AppError> {
    let usage = sqlx::query_as::<_, BoothUsage>(
        "SELECT id, booth_id, student_id, admin_id, used_at FROM booth_usages WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(usage)
}

/// 체크인을 기록합니다.
///
/// 한도에 도달했으면 아무것도 쓰지 않고 `CheckInOutcome::OverLimit`을 돌려줍니다.
/// 학생/부스 존재 여부는 호출하는 쪽에서 먼저 확인합니다.
pub async fn check_in(
    pool: &SqlitePool,
    booth_id: i64,
    student_id: i64,
    admin_id: i64,
) -> Result<CheckInOutcome, AppError> {
    let mut tx = pool.begin().await?;

    // 첫 문장이 쓰기이므로 SQLite가 이 시점에 쓰기 잠금을 잡습니다.
    let inserted = sqlx::query(
        r#"
        INSERT INTO booth_usages (booth_id, student_id, admin_id)
        SELECT ?, ?, ?
        WHERE (
            SELECT COUNT(*) FROM booth_usages WHERE booth_id = ? AND student_id = ?
        ) < ?
        "#,
    )
    .bind(booth_id)
    .bind(student_id)
    .bind(admin_id)
    .bind(booth_id)
    .bind(student_id)
    .bind(MAX_USAGE_PER_BOOTH)
    .execute(&mut *tx)
    .await?;

    let total_used = count_for_student(&mut *tx, booth_id, student_id).await?;

    if inserted.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(CheckInOutcome::OverLimit { total_used });
    }

    let entry = get_usage_entry(&mut *tx, inserted.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal(
            "Failed to retrieve recorded usage".to_string(),
        ))?;

    tx.commit().await?;

    Ok(CheckInOutcome::Recorded {
        total_used,
        remaining: (MAX_USAGE_PER_BOOTH - total_used).max(0),
        entry,
    })
}

/// 이용 기록을 취소합니다.
///
/// 감사 로그를 남긴 뒤 원본을 지웁니다. 그 사이 다른 요청이 먼저 지웠다면
/// 감사 로그도 남기지 않고 `false`를 반환합니다.
pub async fn void_usage(
    pool: &SqlitePool,
    usage_id: i64,
    admin_id: i64,
    reason: &str,
) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO booth_usages_void (booth_usage_id, void_by_admin_id, void_reason)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(usage_id)
    .bind(admin_id)
    .bind(reason)
    .execute(&mut *tx)
    .await?;

    let deleted = sqlx::query("DELETE FROM booth_usages WHERE id = ?")
        .bind(usage_id)
        .execute(&mut *tx)
        .await?;

    if deleted.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    tx.commit().await?;
    Ok(true)
}

/// 취소 기록과 이용 기록을 모두 지웁니다. (이용 기록 수, 취소 기록 수)를 반환합니다.
pub async fn reset_all_usage(pool: &SqlitePool) -> Result<(u64, u64), AppError> {
    let mut tx = pool.begin().await?;

    let voids = sqlx::query("DELETE FROM booth_usages_void")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let usages = sqlx::query("DELETE FROM booth_usages")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok((usages, voids))
}
