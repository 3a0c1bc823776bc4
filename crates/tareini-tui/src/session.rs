//! Session-token storage.
//!
//! The single read/write boundary for the persisted token: every component
//! that needs the session goes through this type instead of touching the
//! file directly. Cleared on sign-out and whenever the backend stops
//! recognizing the session.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::warn;

const DEFAULT_TOKEN_PATH: &str = ".tareini/token";

/// File-backed token store.
pub struct Session {
    path: PathBuf,
}

impl Session {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Resolves the token path from `TAREINI_TOKEN_FILE`, defaulting to
    /// `.tareini/token` in the working directory.
    pub fn from_env() -> Self {
        let path = std::env::var("TAREINI_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TOKEN_PATH));
        Self::new(path)
    }

    /// The stored token, if a session exists.
    pub fn load(&self) -> Option<String> {
        let token = fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// Persists the token, creating the parent directory on first use.
    pub fn store(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, token)
    }

    /// Removes the stored token. A missing file is not an error.
    pub fn clear(&self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != io::ErrorKind::NotFound {
                warn!(%err, path = %self.path.display(), "failed to clear session token");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session_in(dir: &TempDir) -> Session {
        Session::new(dir.path().join("state").join("token"))
    }

    #[test]
    fn store_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let session = session_in(&dir);
        session.store("abc").unwrap();
        assert_eq!(session.load().as_deref(), Some("abc"));
    }

    #[test]
    fn load_without_a_stored_token_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(session_in(&dir).load().is_none());
    }

    #[test]
    fn clear_removes_the_token_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let session = session_in(&dir);
        session.store("abc").unwrap();
        session.clear();
        assert!(session.load().is_none());
        session.clear();
    }

    #[test]
    fn whitespace_only_tokens_count_as_absent() {
        let dir = TempDir::new().unwrap();
        let session = session_in(&dir);
        session.store("  \n").unwrap();
        assert!(session.load().is_none());
    }
}
