//! # 부스 목록 핸들러
//!
//! 로그인 화면의 반 선택 목록에 쓰이므로 인증이 필요 없습니다.

use axum::{extract::State, Json};

use crate::{db, error::AppError, models::Booth, routes::AppState};

/// `GET /booths`
pub async fn list_booths(State(state): State<AppState>) -> Result<Json<Vec<Booth>>, AppError> {
    let booths = db::list_booths(&state.pool).await?;
    Ok(Json(booths))
}
