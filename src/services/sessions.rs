//! # 부스 관리자 세션
//!
//! 로그인에 성공한 관리자에게 12시간짜리 무작위 토큰을 발급하고,
//! 요청마다 토큰을 검증합니다. 세션은 프로세스 메모리에만 있으므로
//! 서버가 재시작되면 모든 관리자가 다시 로그인해야 합니다.
//!
//! 저장소는 [`SessionStore`] 트레이트 뒤에 숨겨져 `AppState`로 주입됩니다.
//! 테스트는 각자 독립된 [`MemorySessionStore`]를 사용합니다.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use rand_core::{OsRng, RngCore};
use serde::Serialize;

/// 세션 유효 기간
pub const SESSION_TTL_HOURS: i64 = 12;

/// 토큰 생성에 쓰는 무작위 바이트 수 (hex로 48자)
const TOKEN_BYTES: usize = 24;

/// 발급된 관리자 세션
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub token: String,
    pub admin_id: i64,
    pub class_name: String,
    pub is_super_admin: bool,
    pub default_booth_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// 통합관리자는 모든 부스, 반 관리자는 자기 부스만 다룰 수 있습니다.
    pub fn can_access(&self, booth_id: i64) -> bool {
        self.is_super_admin || self.default_booth_id == Some(booth_id)
    }
}

/// 세션 조회 실패 이유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionLookupError {
    Unknown,
    Expired,
}

/// 세션 저장소 추상화
pub trait SessionStore: Send + Sync {
    fn put(&self, session: AdminSession);

    fn get(&self, token: &str) -> Option<AdminSession>;

    fn remove(&self, token: &str) -> Option<AdminSession>;

    /// 조건에 맞는 세션을 모두 지우고 지운 개수를 반환합니다.
    fn invalidate_where(&self, predicate: &dyn Fn(&AdminSession) -> bool) -> usize;
}

/// 프로세스 메모리 기반 세션 저장소
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, AdminSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn put(&self, session: AdminSession) {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sessions.insert(session.token.clone(), session);
    }

    fn get(&self, token: &str) -> Option<AdminSession> {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(token)
            .cloned()
    }

    fn remove(&self, token: &str) -> Option<AdminSession> {
        self.sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(token)
    }

    fn invalidate_where(&self, predicate: &dyn Fn(&AdminSession) -> bool) -> usize {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = sessions.len();
        sessions.retain(|_, session| !predicate(session));
        before - sessions.len()
    }
}

/// 추측 불가능한 토큰 생성 (OS 난수 24바이트 → hex)
pub fn generate_token() -> String {
    let mut buf = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

/// 새 세션을 만들어 저장소에 넣고 반환합니다.
/// 다시 제시되지 않은 채 만료된 세션은 이때 함께 정리됩니다.
pub fn issue(
    store: &dyn SessionStore,
    admin_id: i64,
    class_name: &str,
    is_super_admin: bool,
    default_booth_id: Option<i64>,
) -> AdminSession {
    let now = Utc::now();
    store.invalidate_where(&|session| session.is_expired(now));

    let session = AdminSession {
        token: generate_token(),
        admin_id,
        class_name: class_name.to_string(),
        is_super_admin,
        default_booth_id,
        created_at: now,
        expires_at: now + Duration::hours(SESSION_TTL_HOURS),
    };
    store.put(session.clone());
    session
}

/// 토큰을 검증합니다. 만료된 세션은 이 시점에 저장소에서 지웁니다.
pub fn authenticate(
    store: &dyn SessionStore,
    token: &str,
    now: DateTime<Utc>,
) -> Result<AdminSession, SessionLookupError> {
    let session = store.get(token).ok_or(SessionLookupError::Unknown)?;
    if session.is_expired(now) {
        store.remove(token);
        return Err(SessionLookupError::Expired);
    }
    Ok(session)
}

/// 특정 반의 세션을 모두 무효화합니다. (비밀번호 변경 시)
pub fn invalidate_class(store: &dyn SessionStore, class_name: &str) -> usize {
    store.invalidate_where(&|session| session.class_name == class_name)
}
