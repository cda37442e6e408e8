//! Client-side session state.
//!
//! Holds the token and user returned by login. [`UserSession`] is the plain
//! in-memory state; [`SessionStore`] keeps it in a JSON file under the
//! `user-storage` key so a client survives restarts. Logout clears both.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::User;

/// Storage key, used as the file stem.
pub const STORAGE_KEY: &str = "user-storage";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl UserSession {
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn set_user(&mut self, token: impl Into<String>, user: User) {
        self.token = Some(token.into());
        self.user = Some(user);
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
    }
}

/// A [`UserSession`] persisted to disk.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    session: UserSession,
}

impl SessionStore {
    /// Default location: `<data dir>/alumni-gateway/user-storage.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| {
            dir.join("alumni-gateway")
                .join(format!("{}.json", STORAGE_KEY))
        })
    }

    /// Open a store, loading any session saved at `path`.
    ///
    /// A missing file gives an empty session; an unreadable one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let session = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                Error::Internal(format!("Corrupt session file {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => UserSession::default(),
            Err(e) => return Err(io_error(&path, e)),
        };

        Ok(Self { path, session })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session(&self) -> &UserSession {
        &self.session
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Store the login result and write it to disk.
    pub fn set_user(&mut self, token: impl Into<String>, user: User) -> Result<()> {
        self.session.set_user(token, user);
        self.save()
    }

    /// Clear the session and remove the file.
    pub fn logout(&mut self) -> Result<()> {
        self.session.logout();
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session file removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&self.path, e)),
        }
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        let bytes = serde_json::to_vec_pretty(&self.session)
            .map_err(|e| Error::Internal(format!("Failed to encode session: {}", e)))?;
        fs::write(&self.path, bytes).map_err(|e| io_error(&self.path, e))
    }
}

fn io_error(path: &Path, err: io::Error) -> Error {
    Error::Internal(format!("Session file {}: {}", path.display(), err))
}
