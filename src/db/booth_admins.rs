//! # 부스 관리자 디렉토리
//!
//! 관리자 로그인은 class_name과 비밀번호(PIN)의 정확한 문자열 일치로 판정합니다.

use crate::error::AppError;
use crate::models::BoothAdmin;
use sqlx::SqlitePool;

/// 로그인 확인. 두 값이 모두 정확히 일치하는 관리자 행을 반환합니다.
pub async fn find_admin_by_credentials(
    pool: &SqlitePool,
    class_name: &str,
    password: &str,
) -> Result<Option<BoothAdmin>, AppError> {
    let admin = sqlx::query_as::<_, BoothAdmin>(
        "SELECT id, class_name, password FROM booth_admins WHERE class_name = ? AND password = ?",
    )
    .bind(class_name)
    .bind(password)
    .fetch_optional(pool)
    .await?;

    Ok(admin)
}

/// 관리자 비밀번호를 설정합니다. 행이 없으면 새로 만듭니다.
pub async fn upsert_admin_password(
    pool: &SqlitePool,
    class_name: &str,
    password: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO booth_admins (class_name, password)
        VALUES (?, ?)
        ON CONFLICT (class_name) DO UPDATE SET password = excluded.password
        "#,
    )
    .bind(class_name)
    .bind(password)
    .execute(pool)
    .await?;

    Ok(())
}
