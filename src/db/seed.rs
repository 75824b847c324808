//! # 기본 데이터 시드
//!
//! 서버 시작 시 `SEED_MODE`에 따라 부스 7개, 반 관리자, 통합관리자, 학생 명단을 채웁니다.
//! 학생 명단은 실제 명단을 CSV로 가져오기 전까지 쓰는 예시 데이터입니다.

use crate::config::SeedMode;
use crate::error::AppError;
use sqlx::{Sqlite, SqlitePool, Transaction};

/// (class_name, 이름, 위치, 설명)
pub const DEFAULT_BOOTHS: [(&str, &str, &str, &str); 7] = [
    ("1-1", "방탈출", "1-1 교실", "미스터리 스릴러 방탈출 게임"),
    ("1-2", "분식집", "1-2 교실", "맛있는 떡볶이와 어묵"),
    ("2-1", "찜질방", "2-1 교실", "뜨끈뜨끈한 찜질 체험"),
    ("2-2", "영광이네 5성급 포차", "2-2 교실", "논알콜 칵테일과 안주"),
    ("3-1", "카페", "3-1 교실", "향긋한 커피와 디저트"),
    ("3-2", "풍선 다트 게임", "3-2 교실", "풍선 다트 게임으로 스트레스 해소"),
    ("3-3", "귀신의 집", "3-3 교실", "공포체험 귀신의 집"),
];

/// (학년, 반, 인원). 합계 143명.
const DEFAULT_CLASSES: [(i64, i64, i64); 7] = [
    (1, 1, 21),
    (1, 2, 20),
    (2, 1, 20),
    (2, 2, 21),
    (3, 1, 20),
    (3, 2, 21),
    (3, 3, 20),
];

const FAMILY_NAMES: [&str; 20] = [
    "김", "이", "박", "최", "정", "강", "조", "윤", "장", "임", "한", "오", "서", "신", "권", "황",
    "안", "송", "류", "홍",
];

const GIVEN_NAMES: [&str; 26] = [
    "민준", "서연", "도윤", "서윤", "예준", "지우", "시우", "하은", "주원", "하윤", "지호", "민서",
    "지후", "지유", "준서", "채원", "준우", "수아", "현우", "지아", "도현", "지민", "건우", "윤서",
    "우진", "다은",
];

/// 시드에 필요한 계정 정보
#[derive(Debug, Clone)]
pub struct SeedAccounts<'a> {
    pub superadmin_class_name: &'a str,
    pub superadmin_password: &'a str,
    pub default_booth_pin: &'a str,
}

/// 시드 결과
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub booths: u64,
    pub admins: u64,
    pub students: u64,
}

/// 예시 명단 생성 (학년, 반, 번호, 이름)
pub fn default_students() -> Vec<(i64, i64, i64, String)> {
    let mut students = Vec::new();
    let mut seq = 0usize;
    for (grade, class_no, size) in DEFAULT_CLASSES {
        for student_no in 1..=size {
            let name = format!(
                "{}{}",
                FAMILY_NAMES[seq % FAMILY_NAMES.len()],
                GIVEN_NAMES[(seq * 7) % GIVEN_NAMES.len()]
            );
            students.push((grade, class_no, student_no, name));
            seq += 1;
        }
    }
    students
}

/// 시드를 실행합니다. 한 트랜잭션으로 처리하므로 실패하면 아무것도 바뀌지 않습니다.
pub async fn run_seed(
    pool: &SqlitePool,
    mode: SeedMode,
    accounts: &SeedAccounts<'_>,
) -> Result<SeedReport, AppError> {
    if mode == SeedMode::Off {
        return Ok(SeedReport::default());
    }

    // 통합관리자 이름이 부스 반과 같으면 그 반 관리자가 모든 부스 권한을 갖게 됩니다.
    if DEFAULT_BOOTHS
        .iter()
        .any(|(class_name, ..)| *class_name == accounts.superadmin_class_name)
    {
        return Err(AppError::Internal(format!(
            "Super admin class name '{}' collides with a booth",
            accounts.superadmin_class_name
        )));
    }

    let mut tx = pool.begin().await?;

    if mode == SeedMode::Fresh {
        for table in [
            "booth_usages_void",
            "booth_usages",
            "students",
            "booth_admins",
            "booths",
        ] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await?;
        }
    }

    let mut report = SeedReport::default();

    if table_is_empty(&mut tx, "booths").await? {
        for (class_name, name, location, description) in DEFAULT_BOOTHS {
            sqlx::query(
                "INSERT INTO booths (class_name, name, location, description) VALUES (?, ?, ?, ?)",
            )
            .bind(class_name)
            .bind(name)
            .bind(location)
            .bind(description)
            .execute(&mut *tx)
            .await?;
            report.booths += 1;
        }
    }

    // 관리자는 없는 계정만 추가합니다. 이미 바뀐 PIN은 덮어쓰지 않습니다.
    let admin_classes = DEFAULT_BOOTHS
        .iter()
        .map(|(class_name, ..)| (*class_name, accounts.default_booth_pin))
        .chain(std::iter::once((
            accounts.superadmin_class_name,
            accounts.superadmin_password,
        )));
    for (class_name, password) in admin_classes {
        report.admins += sqlx::query(
            "INSERT OR IGNORE INTO booth_admins (class_name, password) VALUES (?, ?)",
        )
        .bind(class_name)
        .bind(password)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    if table_is_empty(&mut tx, "students").await? {
        for (grade, class_no, student_no, name) in default_students() {
            sqlx::query(
                "INSERT INTO students (grade, class_no, student_no, name) VALUES (?, ?, ?, ?)",
            )
            .bind(grade)
            .bind(class_no)
            .bind(student_no)
            .bind(&name)
            .execute(&mut *tx)
            .await?;
            report.students += 1;
        }
    }

    tx.commit().await?;

    tracing::info!(
        mode = ?mode,
        booths = report.booths,
        admins = report.admins,
        students = report.students,
        "Seed complete"
    );

    Ok(report)
}

async fn table_is_empty(tx: &mut Transaction<'_, Sqlite>, table: &str) -> Result<bool, AppError> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&mut **tx)
        .await?;
    Ok(count == 0)
}
