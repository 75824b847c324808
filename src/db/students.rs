//! # 학생 명단 조회 쿼리
//!
//! 명단은 항상 (학년, 반, 번호) 오름차순으로 돌려줍니다.
//! 명단을 바꾸는 쿼리는 트랜잭션이 필요하므로 `roster_import`에 있습니다.

use crate::error::AppError;
use crate::models::{Student, StudentFilter};
use sqlx::SqlitePool;

/// 조건에 맞는 학생 목록을 조회합니다.
///
/// `search`는 이름(대소문자 무시) 또는 번호 숫자열의 부분 문자열과 비교합니다.
/// `instr()`을 쓰므로 검색어의 `%`, `_`가 와일드카드로 해석되지 않습니다.
pub async fn list_students(
    pool: &SqlitePool,
    filter: &StudentFilter,
) -> Result<Vec<Student>, AppError> {
    let students = sqlx::query_as::<_, Student>(
        r#"
        SELECT id, grade, class_no, student_no, name
        FROM students
        WHERE (? IS NULL OR grade = ?)
          AND (? IS NULL OR class_no = ?)
          AND (
                ? IS NULL
                OR instr(LOWER(name), LOWER(?)) > 0
                OR instr(CAST(student_no AS TEXT), ?) > 0
              )
        ORDER BY grade, class_no, student_no
        "#,
    )
    .bind(filter.grade)
    .bind(filter.grade)
    .bind(filter.class_no)
    .bind(filter.class_no)
    .bind(filter.search.as_deref())
    .bind(filter.search.as_deref())
    .bind(filter.search.as_deref())
    .fetch_all(pool)
    .await?;

    Ok(students)
}

/// ID로 학생 한 명을 조회합니다.
pub async fn get_student(pool: &SqlitePool, id: i64) -> Result<Option<Student>, AppError> {
    let student = sqlx::query_as::<_, Student>(
        "SELECT id, grade, class_no, student_no, name FROM students WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(student)
}

/// 명단 인원 수
pub async fn count_students(pool: &SqlitePool) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
