//! # 부스 / 부스 관리자 모델
//!
//! 부스 하나는 반(class_name) 하나에 대응하고,
//! 같은 class_name을 가진 `BoothAdmin` 행이 그 부스의 로그인 PIN을 가집니다.
//! 통합관리자(super admin)는 부스가 없는 예약된 class_name을 사용합니다.

use serde::{Deserialize, Serialize};

/// 부스 엔티티: `booths` 테이블
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booth {
    pub id: i64,
    pub class_name: String,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// 부스 관리자 엔티티: `booth_admins` 테이블
///
/// 비밀번호는 평문으로 저장·비교합니다. 응답에는 절대 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BoothAdmin {
    pub id: i64,
    pub class_name: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// `POST /admin/booth-login` 요청 본문
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BoothLoginRequest {
    pub class_name: Option<String>,
    pub password: Option<String>,
}

/// 로그인 성공 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoothLoginResponse {
    pub token: String,
    pub admin_id: i64,
    pub class_name: String,
    pub is_super_admin: bool,
    pub booth_id: Option<i64>,
}

/// `PUT /admin/booth-ops/booth-admins/{className}/password` 요청 본문
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetPasswordRequest {
    pub password: Option<String>,
}
