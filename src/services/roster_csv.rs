//! # 학생 명단 CSV 파서
//!
//! 관리자가 올린 CSV 텍스트를 검증된 명단 행(`NewStudent`)으로 바꿉니다.
//! DB 반영(교체/병합)은 `db::roster_import`가 담당하고, 이 모듈은 순수 함수만 가집니다.
//!
//! ## 헤더 해석
//! 첫 번째 비어있지 않은 줄이 헤더입니다. 각 헤더 칸은 정규화
//! (BOM 제거 → 앞뒤 공백 제거 → 소문자 → 공백/`-`/`_` 제거) 후
//! 별칭 표와 비교합니다. 네 필드(grade, class_no, student_no, name) 중
//! 하나라도 찾지 못하면 열 순서를 추측하지 않고 `INVALID_HEADER`로 실패합니다.
//!
//! ## 행 처리
//! - 빈 줄은 건너뜁니다.
//! - 이름 열이 마지막 열이고 칸 수가 헤더보다 많으면, 뒤쪽 조각을 `,`로 다시 이어
//!   이름으로 씁니다. (따옴표 없이 쉼표가 들어간 이름 허용)
//! - 숫자 변환 실패나 빈 이름은 `INVALID_ROW`, 같은 파일 안의 중복 키는 `DUPLICATE_ROW`.
//!   행 오류는 모아서 보고할 뿐 전체를 실패시키지 않습니다.
//! - 유효한 행이 하나도 없을 때만 `NO_VALID_ROWS`로 실패합니다.

use std::collections::HashSet;

use csv::{ReaderBuilder, StringRecord};
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::{NewStudent, RowError, RowErrorCode};

/// 템플릿 다운로드 파일 이름
pub const TEMPLATE_FILENAME: &str = "students_template.csv";

/// 템플릿 CSV. 예시 행 하나를 포함합니다.
pub const TEMPLATE_CSV: &str = "grade,class_no,student_no,name\n1,1,1,홍길동\n";

/// 응답에 담는 행 오류 최대 개수
pub const MAX_REPORTED_ERRORS: usize = 50;

/// 명단의 논리 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterField {
    Grade,
    ClassNo,
    StudentNo,
    Name,
}

impl RosterField {
    pub const ALL: [RosterField; 4] = [
        RosterField::Grade,
        RosterField::ClassNo,
        RosterField::StudentNo,
        RosterField::Name,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RosterField::Grade => "grade",
            RosterField::ClassNo => "class_no",
            RosterField::StudentNo => "student_no",
            RosterField::Name => "name",
        }
    }

    /// 정규화된 헤더 별칭 (영문/한글)
    fn aliases(self) -> &'static [&'static str] {
        match self {
            RosterField::Grade => &["grade", "year", "학년"],
            RosterField::ClassNo => &["classno", "class", "classnumber", "room", "반", "학급"],
            RosterField::StudentNo => &[
                "studentno",
                "studentnumber",
                "number",
                "num",
                "no",
                "번호",
                "출석번호",
            ],
            RosterField::Name => &["name", "studentname", "fullname", "이름", "성명", "학생명", "학생이름"],
        }
    }
}

/// 파일 단위로 가져오기를 거부하는 이유
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("CSV header is missing fields: {}", .missing.join(", "))]
    InvalidHeader { missing: Vec<&'static str> },

    #[error("CSV contains no valid rows ({} rejected)", .errors.len())]
    NoValidRows { errors: Vec<RowError> },
}

impl ImportError {
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::InvalidHeader { .. } => "INVALID_HEADER",
            ImportError::NoValidRows { .. } => "NO_VALID_ROWS",
        }
    }

    /// 응답 JSON 본문
    pub fn to_body(&self) -> Value {
        match self {
            ImportError::InvalidHeader { missing } => json!({
                "error": self.code(),
                "missing": missing,
                "expected": RosterField::ALL.map(RosterField::label),
            }),
            ImportError::NoValidRows { errors } => json!({
                "error": self.code(),
                "parsed": { "rows": 0, "errors": errors.len() },
                "errors": errors.iter().take(MAX_REPORTED_ERRORS).collect::<Vec<_>>(),
            }),
        }
    }
}

/// 파싱 결과: 유효한 행과 건너뛴 행 오류
#[derive(Debug, Default)]
pub struct ParsedRoster {
    pub rows: Vec<NewStudent>,
    pub errors: Vec<RowError>,
}

/// 헤더 칸을 비교용으로 정규화합니다.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect()
}

/// 논리 필드별 열 위치
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    grade: usize,
    class_no: usize,
    student_no: usize,
    name: usize,
    width: usize,
}

impl ColumnMap {
    fn resolve(header: &StringRecord) -> Result<Self, ImportError> {
        let normalized: Vec<String> = header.iter().map(normalize_header).collect();
        let find = |field: RosterField| {
            normalized
                .iter()
                .position(|h| field.aliases().contains(&h.as_str()))
        };

        let positions = RosterField::ALL.map(find);
        let missing: Vec<&'static str> = RosterField::ALL
            .iter()
            .zip(positions.iter())
            .filter(|(_, pos)| pos.is_none())
            .map(|(field, _)| field.label())
            .collect();

        match positions {
            [Some(grade), Some(class_no), Some(student_no), Some(name)] => Ok(Self {
                grade,
                class_no,
                student_no,
                name,
                width: header.len(),
            }),
            _ => Err(ImportError::InvalidHeader { missing }),
        }
    }

    /// 이름 칸. 이름이 마지막 열이면 남는 조각을 모두 이어 붙입니다.
    fn name_of(&self, record: &StringRecord) -> String {
        if self.name + 1 == self.width && record.len() > self.width {
            let fragments: Vec<&str> = record.iter().skip(self.name).collect();
            fragments.join(",").trim().to_string()
        } else {
            record.get(self.name).unwrap_or("").trim().to_string()
        }
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn parse_int(record: &StringRecord, index: usize) -> Option<i64> {
    record.get(index)?.trim().parse().ok()
}

/// CSV 텍스트를 명단 행으로 파싱합니다.
pub fn parse_roster(text: &str) -> Result<ParsedRoster, ImportError> {
    let text = text.trim_start_matches('\u{feff}');
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut columns: Option<ColumnMap> = None;
    let mut seen: HashSet<(i64, i64, i64)> = HashSet::new();
    let mut parsed = ParsedRoster::default();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                parsed.errors.push(RowError {
                    line,
                    code: RowErrorCode::InvalidRow,
                    message: format!("unreadable row: {}", e),
                });
                continue;
            }
        };
        if is_blank(&record) {
            continue;
        }

        let map = match columns {
            Some(map) => map,
            None => {
                columns = Some(ColumnMap::resolve(&record)?);
                continue;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let numbers = (
            parse_int(&record, map.grade),
            parse_int(&record, map.class_no),
            parse_int(&record, map.student_no),
        );
        let (grade, class_no, student_no) = match numbers {
            (Some(g), Some(c), Some(n)) => (g, c, n),
            _ => {
                parsed.errors.push(RowError {
                    line,
                    code: RowErrorCode::InvalidRow,
                    message: "grade, class_no and student_no must be integers".to_string(),
                });
                continue;
            }
        };

        let name = map.name_of(&record);
        if name.is_empty() {
            parsed.errors.push(RowError {
                line,
                code: RowErrorCode::InvalidRow,
                message: "name is empty".to_string(),
            });
            continue;
        }

        let row = NewStudent {
            grade,
            class_no,
            student_no,
            name,
        };
        if !seen.insert(row.key()) {
            parsed.errors.push(RowError {
                line,
                code: RowErrorCode::DuplicateRow,
                message: format!("duplicate student {}-{}-{}", grade, class_no, student_no),
            });
            continue;
        }
        parsed.rows.push(row);
    }

    if columns.is_none() {
        return Err(ImportError::InvalidHeader {
            missing: RosterField::ALL.map(RosterField::label).to_vec(),
        });
    }
    if parsed.rows.is_empty() {
        return Err(ImportError::NoValidRows {
            errors: parsed.errors,
        });
    }

    Ok(parsed)
}
