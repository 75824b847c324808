//! # 명단 반영 쿼리
//!
//! 파싱이 끝난 행들을 하나의 트랜잭션으로 `students` 테이블에 반영합니다.
//! 중간에 실패하면 트랜잭션이 롤백되어 명단은 이전 상태 그대로 남습니다.

use crate::error::AppError;
use crate::models::{ImportMode, NewStudent, ReconcileCounts};
use sqlx::{Sqlite, SqlitePool, Transaction};

use super::usages::count_usages;

/// 명단을 교체하거나 병합합니다.
///
/// ## replace
/// 이용 기록이 남아 있으면 `HAS_USAGE_DATA`로 거부합니다.
/// `reset_usage`가 true면 이용/취소 기록을 먼저 지운 뒤 명단을 교체합니다.
///
/// ## merge
/// (학년, 반, 번호)가 같은 학생은 이름이 다를 때만 갱신하고, 없는 학생은 추가합니다.
/// 명단에서 빠진 학생은 지우지 않으며 `reset_usage`는 무시됩니다.
pub async fn reconcile_roster(
    pool: &SqlitePool,
    rows: &[NewStudent],
    mode: ImportMode,
    reset_usage: bool,
) -> Result<ReconcileCounts, AppError> {
    let mut tx = pool.begin().await?;

    let mut counts = match mode {
        ImportMode::Replace => replace_roster(&mut tx, rows, reset_usage).await?,
        ImportMode::Merge => merge_roster(&mut tx, rows).await?,
    };

    counts.total_students = sqlx::query_scalar("SELECT COUNT(*) FROM students")
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(counts)
}

async fn replace_roster(
    tx: &mut Transaction<'_, Sqlite>,
    rows: &[NewStudent],
    reset_usage: bool,
) -> Result<ReconcileCounts, AppError> {
    if reset_usage {
        sqlx::query("DELETE FROM booth_usages_void")
            .execute(&mut **tx)
            .await?;
        sqlx::query("DELETE FROM booth_usages")
            .execute(&mut **tx)
            .await?;
    } else {
        let usage_count = count_usages(&mut **tx).await?;
        if usage_count > 0 {
            return Err(AppError::HasUsageData { usage_count });
        }
    }

    let deleted = sqlx::query("DELETE FROM students")
        .execute(&mut **tx)
        .await?
        .rows_affected() as i64;

    for row in rows {
        insert_student(tx, row).await?;
    }

    Ok(ReconcileCounts {
        inserted: rows.len() as i64,
        deleted,
        ..Default::default()
    })
}

async fn merge_roster(
    tx: &mut Transaction<'_, Sqlite>,
    rows: &[NewStudent],
) -> Result<ReconcileCounts, AppError> {
    let mut counts = ReconcileCounts::default();

    for row in rows {
        let existing: Option<(i64, String)> = sqlx::query_as(
            "SELECT id, name FROM students WHERE grade = ? AND class_no = ? AND student_no = ?",
        )
        .bind(row.grade)
        .bind(row.class_no)
        .bind(row.student_no)
        .fetch_optional(&mut **tx)
        .await?;

        match existing {
            Some((id, name)) if name != row.name => {
                sqlx::query("UPDATE students SET name = ? WHERE id = ?")
                    .bind(&row.name)
                    .bind(id)
                    .execute(&mut **tx)
                    .await?;
                counts.updated += 1;
            }
            // 이름까지 같으면 변경 없음
            Some(_) => {}
            None => {
                insert_student(tx, row).await?;
                counts.inserted += 1;
            }
        }
    }

    Ok(counts)
}

async fn insert_student(
    tx: &mut Transaction<'_, Sqlite>,
    row: &NewStudent,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO students (grade, class_no, student_no, name) VALUES (?, ?, ?, ?)")
        .bind(row.grade)
        .bind(row.class_no)
        .bind(row.student_no)
        .bind(&row.name)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
