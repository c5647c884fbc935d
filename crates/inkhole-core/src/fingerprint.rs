// Render change detection
//
// E-ink refreshes are slow and visibly flash, so a run only redraws
// when the panel body actually changed. The body is hashed (SHA-256),
// compared by byte equality against the digest persisted by the last
// run, and the new digest replaces the record only on a change.

use std::path::PathBuf;
use std::sync::Mutex;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// Durable storage for the last rendered content's digest.
///
/// Missing or unreadable records mean "no prior digest", which always
/// triggers a render -- never an error.
pub trait FingerprintStore {
    fn load(&self) -> Option<String>;
    fn save(&self, digest: &str) -> std::io::Result<()>;
}

/// File-backed store holding the raw hex digest string.
#[derive(Debug)]
pub struct FileFingerprintStore {
    path: PathBuf,
}

impl FileFingerprintStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FingerprintStore for FileFingerprintStore {
    fn load(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let digest = raw.trim();
        if digest.is_empty() {
            return None;
        }
        Some(digest.to_owned())
    }

    fn save(&self, digest: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Same atomic rewrite as the session cache: temp file, then rename.
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, digest)?;
        std::fs::rename(&tmp, &self.path)
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryFingerprintStore {
    inner: Mutex<Option<String>>,
}

impl FingerprintStore for MemoryFingerprintStore {
    fn load(&self) -> Option<String> {
        self.inner.lock().ok()?.clone()
    }

    fn save(&self, digest: &str) -> std::io::Result<()> {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = Some(digest.to_owned());
        }
        Ok(())
    }
}

/// Decides whether the panel body differs from the last rendered one.
pub struct ChangeDetector<S: FingerprintStore> {
    store: S,
}

impl<S: FingerprintStore> ChangeDetector<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns `true` when `body` differs from the last rendered content
    /// (or no prior digest exists), persisting the new digest. On a
    /// match returns `false` and writes nothing. A digest persistence
    /// failure still renders -- it only costs the next run a redraw.
    pub fn should_render(&self, body: &str) -> bool {
        let digest = format!("{:x}", Sha256::digest(body.as_bytes()));

        if self.store.load().is_some_and(|prev| prev == digest) {
            debug!("panel content unchanged");
            return false;
        }

        if let Err(e) = self.store.save(&digest) {
            warn!(error = %e, "failed to persist render fingerprint");
        }
        true
    }
}
