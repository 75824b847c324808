//! # 부스 이용(체크인) 모델
//!
//! ## 구조체 역할
//! - `BoothUsage`: `booth_usages` 테이블 한 행 (체크인 1회)
//! - `UsageEntry`: 화면 표시용으로 학생 정보와 처리 관리자 반을 JOIN한 행
//! - `CheckInRequest` / `VoidRequest`: 요청 본문
//! - `CheckInOutcome`: 체크인 결과 (성공 또는 한도 초과)
//! - `BoothSummary` / `Dashboard`: 집계 응답

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 학생 한 명이 한 부스를 이용할 수 있는 최대 횟수
pub const MAX_USAGE_PER_BOOTH: i64 = 3;

/// 체크인 기록: `booth_usages` 테이블
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BoothUsage {
    pub id: i64,
    pub booth_id: i64,
    pub student_id: i64,
    pub admin_id: i64,
    pub used_at: String,
}

/// 최근 이용 내역 한 줄.
///
/// 학생이 명단 교체로 사라진 경우에도 기록은 남으므로 학생 필드는 Option 입니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UsageEntry {
    pub id: i64,
    pub booth_id: i64,
    pub student_id: i64,
    pub admin_id: i64,
    pub used_at: String,
    pub student_name: Option<String>,
    pub grade: Option<i64>,
    pub class_no: Option<i64>,
    pub student_no: Option<i64>,
    pub admin_class: Option<String>,
}

/// `POST /booths/{id}/use` 요청 본문
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CheckInRequest {
    pub student_id: Option<i64>,
}

/// `POST /booths/{id}/use/{usageId}/void` 요청 본문
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoidRequest {
    pub reason: Option<String>,
}

/// 체크인 결과
#[derive(Debug)]
pub enum CheckInOutcome {
    /// 기록됨. `total_used`는 이번 기록을 포함한 횟수
    Recorded {
        total_used: i64,
        remaining: i64,
        entry: UsageEntry,
    },
    /// 한도 도달로 기록하지 않음
    OverLimit { total_used: i64 },
}

/// 체크인 성공 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponse {
    pub success: bool,
    pub total_used: i64,
    pub remaining: i64,
    pub recent_entry: UsageEntry,
}

/// 학급별 이용 횟수 (상위 학급 순위용)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ClassUsage {
    pub grade: i64,
    pub class_no: i64,
    pub count: i64,
}

/// `GET /booths/{id}/usages/summary` 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoothSummary {
    pub booth_id: i64,
    pub total_usage: i64,
    pub unique_students: i64,
    pub top_classes: Vec<ClassUsage>,
    /// 학생 id → 이용 횟수 (1회 이상 이용한 학생만)
    pub per_student_counts: BTreeMap<i64, i64>,
    /// 남은 횟수(0..=3) → 학생 수. 명단 전체를 포함합니다.
    pub remaining_buckets: BTreeMap<i64, i64>,
    pub recent: Vec<UsageEntry>,
    pub total_students: i64,
    pub max_usage: i64,
}

/// 대시보드의 부스별 집계
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BoothStats {
    pub id: i64,
    #[serde(rename = "class_name")]
    pub class_name: String,
    pub name: String,
    pub total_usage: i64,
    pub unique_students: i64,
    pub last_used_at: Option<String>,
}

/// 이용 횟수 상위 학생
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TopStudent {
    pub student_id: i64,
    pub name: Option<String>,
    pub grade: Option<i64>,
    pub class_no: Option<i64>,
    pub student_no: Option<i64>,
    pub count: i64,
}

/// `GET /admin/booth-ops/dashboard` 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_students: i64,
    pub total_usage: i64,
    pub unique_students: i64,
    pub booths: Vec<BoothStats>,
    pub recent: Vec<UsageEntry>,
    pub top_students: Vec<TopStudent>,
}
