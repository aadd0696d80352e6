use crate::models::user::User;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The demo user currently "logged in"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    /// Only used when the client runs in bearer mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Unix timestamp of the selection
    pub selected_at: i64,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self {
            user,
            token: None,
            selected_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// File-backed store for the current session, surviving across invocations
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session. A missing or unreadable file means nobody is selected.
    pub fn load(&self) -> Result<Option<Session>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No session file");
                return Ok(None);
            }
            Err(e) => {
                return Err(e).context(format!(
                    "Failed to read session file: {}",
                    self.path.display()
                ))
            }
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<Session>(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to parse session file, ignoring it"
                );
                Ok(None)
            }
        }
    }

    /// Persist the session, replacing any previous one
    pub fn save(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context(format!(
                    "Failed to create session directory: {}",
                    parent.display()
                ))?;
            }
        }

        // Write next to the target and rename so a crash never leaves half a file
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)
            .context(format!("Failed to write session file: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .context(format!("Failed to replace session file: {}", self.path.display()))?;

        info!(
            user_id = session.user.id,
            role = %session.user.role,
            "Session saved"
        );

        Ok(())
    }

    /// Forget the current selection ("switch user")
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context(format!(
                "Failed to remove session file: {}",
                self.path.display()
            )),
        }
    }
}
