//! # 학생 명단 모델
//!
//! 학생은 (학년, 반, 번호) 조합으로 유일하게 식별됩니다.
//! `id`는 DB가 부여하는 대리키이며, 체크인 기록은 이 `id`를 참조합니다.

use serde::{Deserialize, Serialize};

/// 학생 엔티티. DB의 `students` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub grade: i64,
    pub class_no: i64,
    pub student_no: i64,
    pub name: String,
}

/// 아직 저장되지 않은 명단 한 줄 (CSV 가져오기 결과)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub grade: i64,
    pub class_no: i64,
    pub student_no: i64,
    pub name: String,
}

impl NewStudent {
    /// 명단 유일성 판단에 쓰는 (학년, 반, 번호) 키
    pub fn key(&self) -> (i64, i64, i64) {
        (self.grade, self.class_no, self.student_no)
    }
}

/// `GET /students` 쿼리 파라미터.
///
/// 프론트엔드가 선택하지 않은 필터를 빈 문자열로 보내므로
/// 숫자 필드도 문자열로 받은 뒤 [`StudentFilter`]로 변환합니다.
#[derive(Debug, Default, Deserialize)]
pub struct StudentQuery {
    pub search: Option<String>,
    pub grade: Option<String>,
    pub class_no: Option<String>,
}

/// 정규화된 명단 검색 조건
#[derive(Debug, Default, Clone)]
pub struct StudentFilter {
    pub search: Option<String>,
    pub grade: Option<i64>,
    pub class_no: Option<i64>,
}

impl From<StudentQuery> for StudentFilter {
    fn from(query: StudentQuery) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            search: non_empty(query.search),
            grade: non_empty(query.grade).and_then(|v| v.parse().ok()),
            class_no: non_empty(query.class_no).and_then(|v| v.parse().ok()),
        }
    }
}
