//! Session file storage.
//!
//! Stores the session in `<base>/session.json` with restricted permissions
//! (0600). The token is never logged.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use patadmin_types::Session;

use super::store::{ListenerId, SessionStore};
use crate::config::paths;

#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The session file under PATADMIN_HOME.
    pub fn default_location() -> Self {
        Self::new(paths::session_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted session.
    /// Returns `None` if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .map(Some)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))
    }

    /// Saves the session with restricted permissions (0600).
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Deletes the session file. Returns false if there was nothing to delete.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn remove(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        Ok(true)
    }
}

/// Keeps `file` in sync with `store`: signed-in sessions are saved, an empty
/// session removes the file.
pub fn persist_session(store: &SessionStore, file: SessionFile) -> ListenerId {
    store.on_change(move |session| {
        let result = if session.is_signed_in() {
            file.save(session)
        } else {
            file.remove().map(drop)
        };
        if let Err(err) = result {
            tracing::warn!(path = %file.path().display(), "session persistence failed: {err:#}");
        }
    })
}

#[cfg(test)]
mod tests {
    use patadmin_types::UserRecord;
    use tempfile::tempdir;

    use super::*;

    fn user() -> UserRecord {
        UserRecord {
            id: 9,
            name: "Rui".to_string(),
            last_name: "Lima".to_string(),
            email: "rui@example.com".to_string(),
            cpf: "111".to_string(),
            birth_date: "1985-05-05".to_string(),
            municipality: "Iguatu".to_string(),
            is_admin: false,
            active: true,
        }
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempdir().unwrap();
        let file = SessionFile::new(dir.path().join("session.json"));
        assert!(file.load().unwrap().is_none());
        assert!(!file.remove().unwrap());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let file = SessionFile::new(dir.path().join("nested").join("session.json"));
        let session = Session::authenticated("tok", user());

        file.save(&session).unwrap();
        assert_eq!(file.load().unwrap(), Some(session));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(file.path()).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let err = SessionFile::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse session"));
    }

    #[test]
    fn test_store_listener_saves_and_removes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = SessionStore::new();
        persist_session(&store, SessionFile::new(&path));

        store.set(Session::authenticated("tok", user())).unwrap();
        assert!(path.exists());
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("tok"));

        store.clear();
        assert!(!path.exists());
    }
}
