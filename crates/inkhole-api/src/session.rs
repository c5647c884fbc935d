// Session token lifecycle.
//
// The dashboard runs as a short-lived periodic task, so a session issued
// by the appliance is cached on disk and revalidated on the next run
// instead of logging in every time. A token is reused whole or not at
// all: if the probe rejects it, the sid and csrf are both discarded and
// a fresh login replaces the cache record.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::PiholeClient;
use crate::error::Error;

// ── Token types ─────────────────────────────────────────────────────

/// An appliance-issued session: the `sid` plus the CSRF token some
/// appliance versions require alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub sid: String,
    pub csrf: Option<String>,
    pub acquired_at: DateTime<Utc>,
}

/// Persisted form of a [`SessionToken`].
///
/// Written as the sole content of the session cache record; the
/// timestamp is RFC 3339 so the file stays human-readable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSession {
    pub sid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csrf: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl CachedSession {
    pub fn into_token(self) -> SessionToken {
        SessionToken {
            sid: self.sid,
            csrf: self.csrf,
            acquired_at: self.timestamp,
        }
    }
}

impl From<&SessionToken> for CachedSession {
    fn from(token: &SessionToken) -> Self {
        Self {
            sid: token.sid.clone(),
            csrf: token.csrf.clone(),
            timestamp: token.acquired_at,
        }
    }
}

// ── Store ───────────────────────────────────────────────────────────

/// Durable storage for the cached session record.
///
/// Injected into [`SessionManager`] so tests can substitute an
/// in-memory fake. Load failures are not errors: a missing or
/// malformed record means "no cached session" and the caller falls
/// back to a fresh login.
pub trait SessionStore {
    fn load(&self) -> Option<CachedSession>;
    fn save(&self, session: &CachedSession) -> std::io::Result<()>;
}

/// File-backed store at a well-known path.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<CachedSession> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring malformed session cache");
                None
            }
        }
    }

    fn save(&self, session: &CachedSession) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Write-to-temp-then-rename so an interrupted run never leaves a
        // truncated record behind.
        let tmp = self.path.with_extension("tmp");
        let body = serde_json::to_vec_pretty(session).map_err(std::io::Error::other)?;
        std::fs::write(&tmp, body)?;
        std::fs::rename(&tmp, &self.path)
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<CachedSession>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<CachedSession> {
        self.inner.lock().ok()?.clone()
    }

    fn save(&self, session: &CachedSession) -> std::io::Result<()> {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = Some(session.clone());
        }
        Ok(())
    }
}

// ── Manager ─────────────────────────────────────────────────────────

/// Owns the session state for one run: load cached token, probe it,
/// reuse on success, otherwise log in and replace the cache record.
pub struct SessionManager<S: SessionStore> {
    store: S,
    password: SecretString,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S, password: SecretString) -> Self {
        Self { store, password }
    }

    /// Acquire a usable session.
    ///
    /// Returns `Ok(None)` when the appliance has no password set --
    /// requests then go out without session headers. With a password,
    /// a cached token that still passes the validation probe is reused
    /// as-is (zero auth requests); anything else triggers exactly one
    /// login. The fresh token is persisted best-effort: a cache write
    /// failure only costs the next run its cache hit, so it is logged
    /// and swallowed rather than failing an otherwise healthy run.
    pub async fn acquire(&self, client: &PiholeClient) -> Result<Option<SessionToken>, Error> {
        if self.password.expose_secret().is_empty() {
            debug!("no password configured, skipping authentication");
            return Ok(None);
        }

        if let Some(cached) = self.store.load() {
            let token = cached.into_token();
            if client.validate(&token).await {
                debug!("cached session accepted by appliance");
                return Ok(Some(token));
            }
            debug!("cached session rejected, re-authenticating");
        }

        let token = client.authenticate(&self.password).await?;
        if let Err(e) = self.store.save(&CachedSession::from(&token)) {
            warn!(error = %e, "failed to persist session cache");
        }
        Ok(Some(token))
    }
}
