//! # 학생 명단 검색 핸들러

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    db,
    error::AppError,
    middleware::auth::AdminAuth,
    models::{Student, StudentFilter, StudentQuery},
    routes::AppState,
};

/// `GET /students?search=&grade=&class_no=`: 로그인한 관리자 누구나
///
/// 빈 필터 값은 조건에서 빠집니다. 결과는 학년, 반, 번호 순입니다.
pub async fn list_students(
    AdminAuth(_): AdminAuth,
    State(state): State<AppState>,
    Query(query): Query<StudentQuery>,
) -> Result<Json<Vec<Student>>, AppError> {
    let filter = StudentFilter::from(query);
    let students = db::list_students(&state.pool, &filter).await?;
    Ok(Json(students))
}
