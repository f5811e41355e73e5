use crate::model::{SessionId, UserId};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A login session.
///
/// Only the BLAKE3 digest of the session token is kept; the token itself is
/// handed to the client once, at login.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionId,
    pub token_digest: String,
    pub user_id: UserId,
    /// Milliseconds since the Unix epoch.
    pub expires_at: u64,
}

impl Session {
    pub fn is_expired(&self, now: u64) -> bool {
        self.expires_at <= now
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// `now + ttl`, saturating.
pub fn expiry_after(now: u64, ttl: Duration) -> u64 {
    now.saturating_add(u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX))
}

/// The authenticated identity a request runs as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub session_id: SessionId,
}

/// Hex digest under which a session token is stored and looked up.
pub fn digest_token(token: &str) -> String {
    blake3::hash(token.as_bytes()).to_hex().to_string()
}

/// Payload for opening a session.
#[derive(Clone)]
pub struct SessionCreate {
    pub token_digest: String,
    pub user_id: UserId,
    pub expires_at: u64,
}

impl fmt::Debug for SessionCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCreate")
            .field("user_id", &self.user_id)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}
