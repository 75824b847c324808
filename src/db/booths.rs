//! # 부스 쿼리

use crate::error::AppError;
use crate::models::Booth;
use sqlx::SqlitePool;

/// 모든 부스를 id 순으로 조회합니다.
pub async fn list_booths(pool: &SqlitePool) -> Result<Vec<Booth>, AppError> {
    let booths = sqlx::query_as::<_, Booth>(
        "SELECT id, class_name, name, location, description FROM booths ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(booths)
}

pub async fn get_booth(pool: &SqlitePool, id: i64) -> Result<Option<Booth>, AppError> {
    let booth = sqlx::query_as::<_, Booth>(
        "SELECT id, class_name, name, location, description FROM booths WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booth)
}

/// 관리자의 class_name으로 담당 부스를 찾습니다. 통합관리자는 None.
pub async fn find_booth_by_class_name(
    pool: &SqlitePool,
    class_name: &str,
) -> Result<Option<Booth>, AppError> {
    let booth = sqlx::query_as::<_, Booth>(
        "SELECT id, class_name, name, location, description FROM booths WHERE class_name = ?",
    )
    .bind(class_name)
    .fetch_optional(pool)
    .await?;

    Ok(booth)
}
