use std::path::PathBuf;

use crate::auth::StoredCredentials;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("persist error: {0}")]
    Persist(String),
}

/// Where the OAuth credential blob lives between runs
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Option<StoredCredentials>;
    fn save(&self, credentials: &StoredCredentials) -> Result<(), StoreError>;
}

/// A simple in-memory store, mainly for testing.
#[derive(Default)]
pub struct MemoryCredentialStore {
    slot: std::sync::Mutex<Option<StoredCredentials>>,
}

impl MemoryCredentialStore {
    pub fn new(credentials: Option<StoredCredentials>) -> Self {
        Self {
            slot: std::sync::Mutex::new(credentials),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<StoredCredentials> {
        self.slot.lock().ok()?.clone()
    }

    fn save(&self, credentials: &StoredCredentials) -> Result<(), StoreError> {
        *self
            .slot
            .lock()
            .map_err(|e| StoreError::Persist(format!("lock poisoned: {}", e)))? =
            Some(credentials.clone());
        Ok(())
    }
}

/// JSON token file in Google's `authorized_user` layout (`token.json`)
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<StoredCredentials> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&raw)
            .inspect_err(|e| {
                tracing::warn!(error = %e, path = ?self.path, "Ignoring unreadable token file")
            })
            .ok()
    }

    fn save(&self, credentials: &StoredCredentials) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        }

        let s = serde_json::to_string_pretty(credentials)
            .map_err(|e| StoreError::Persist(format!("serde: {}", e)))?;
        std::fs::write(&self.path, &s).map_err(|e| StoreError::Persist(e.to_string()))?;

        // owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, perms)
                .map_err(|e| StoreError::Persist(format!("chmod: {}", e)))?;
        }

        tracing::info!(path = ?self.path, "Credentials saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> StoredCredentials {
        StoredCredentials {
            token: Some("ya29.access".into()),
            refresh_token: Some("1//refresh".into()),
            client_id: "client.apps.googleusercontent.com".into(),
            client_secret: "shh".into(),
            scopes: vec![crate::auth::YOUTUBE_SCOPE.into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_file_loads_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(tmp.path().join("token.json"));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_corrupt_file_loads_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("token.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(FileCredentialStore::new(path).load().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(tmp.path().join("auth").join("token.json"));

        store.save(&credentials()).unwrap();
        assert_eq!(store.load(), Some(credentials()));
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("token.json");
        FileCredentialStore::new(&path).save(&credentials()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_reads_google_authorized_user_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("token.json");
        std::fs::write(
            &path,
            r#"{
                "token": "ya29.a0Af",
                "refresh_token": "1//0g",
                "token_uri": "https://oauth2.googleapis.com/token",
                "client_id": "123.apps.googleusercontent.com",
                "client_secret": "GOCSPX-secret",
                "scopes": ["https://www.googleapis.com/auth/youtube.force-ssl"],
                "universe_domain": "googleapis.com",
                "account": "",
                "expiry": "2024-05-01T12:34:56.789012Z"
            }"#,
        )
        .unwrap();

        let loaded = FileCredentialStore::new(path).load().unwrap();
        assert_eq!(loaded.token.as_deref(), Some("ya29.a0Af"));
        assert_eq!(loaded.refresh_token.as_deref(), Some("1//0g"));
        assert!(loaded.expiry.is_some());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryCredentialStore::default();
        assert!(store.load().is_none());

        store.save(&credentials()).unwrap();
        assert_eq!(store.load(), Some(credentials()));
    }
}
