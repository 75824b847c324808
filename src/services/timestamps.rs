//! # 시각 문자열 처리
//!
//! DB는 `strftime('%Y-%m-%dT%H:%M:%fZ', 'now')`로 UTC 시각을 기록합니다.
//! 예전 데이터나 SQLite `CURRENT_TIMESTAMP`는 `2025-12-30 11:00:00`처럼
//! 시간대 표시가 없는데, 이 값도 반드시 UTC로 해석해야 합니다.
//! 서버 로컬 시간으로 해석하면 되돌리기 가능 시간이 시간대만큼 어긋납니다.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// 체크인 후 되돌리기가 허용되는 시간
pub const VOID_WINDOW_SECONDS: i64 = 120;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// DB 시각 문자열을 UTC 시각으로 해석합니다. 해석할 수 없으면 None.
pub fn parse_db_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// `used_at`으로부터 `now`까지 되돌리기 가능 시간 안인지 판정합니다.
pub fn within_void_window(used_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - used_at <= Duration::seconds(VOID_WINDOW_SECONDS)
}
