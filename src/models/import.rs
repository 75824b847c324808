//! # 명단 CSV 가져오기 모델

use serde::{Deserialize, Serialize};

/// 가져오기 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// 기존 명단을 모두 지우고 새로 넣습니다.
    Replace,
    /// 같은 (학년, 반, 번호)는 이름만 갱신하고 나머지는 추가합니다.
    Merge,
}

impl ImportMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "replace" => Some(Self::Replace),
            "merge" => Some(Self::Merge),
            _ => None,
        }
    }
}

/// `POST /admin/students/import` 요청 본문
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImportRequest {
    pub csv_text: Option<String>,
    pub mode: Option<String>,
    #[serde(default)]
    pub reset_booth_usage: bool,
}

/// 행 단위 오류 코드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowErrorCode {
    InvalidRow,
    DuplicateRow,
}

/// 건너뛴 행 하나. `line`은 1부터 시작하는 CSV 줄 번호입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    pub line: u64,
    pub code: RowErrorCode,
    pub message: String,
}

/// 파싱 통계
#[derive(Debug, Clone, Serialize)]
pub struct ParsedStats {
    pub rows: usize,
    pub errors: usize,
}

/// 명단 반영 결과 (DB 트랜잭션이 돌려주는 숫자들)
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileCounts {
    pub inserted: i64,
    pub updated: i64,
    pub deleted: i64,
    pub total_students: i64,
}

/// 가져오기 결과 보고서
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub success: bool,
    pub mode: ImportMode,
    pub inserted: i64,
    pub updated: i64,
    pub deleted: i64,
    pub total_students: i64,
    pub parsed: ParsedStats,
    /// 처음 50개 행 오류
    pub errors: Vec<RowError>,
}

/// `GET /admin/students/template` 응답
#[derive(Debug, Serialize)]
pub struct ImportTemplate {
    pub filename: &'static str,
    pub csv: &'static str,
}
