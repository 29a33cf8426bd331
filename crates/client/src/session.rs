//! Persisted credentials and session notifications.
//!
//! Two entries are kept: the bearer token under `token` and the serialized
//! signed-in user under `user`. A 401 from the backend wipes both and
//! broadcasts [`SessionEvent::Expired`] so the embedding application can
//! route the operator back to its login screen.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use domain::models::user::{AuthUser, LoginResponse};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::error::ClientError;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

const EVENT_CAPACITY: usize = 16;

/// Key/value storage for credentials.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;
    fn remove(&self, key: &str) -> Result<(), ClientError>;
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, ClientError> {
    mutex
        .lock()
        .map_err(|_| ClientError::Storage("credential store lock poisoned".to_string()))
}

/// Credentials that live as long as the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        lock(&self.entries)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        lock(&self.entries)?.remove(key);
        Ok(())
    }
}

/// Credentials kept in a JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, ClientError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                ClientError::Storage(format!("{}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(ClientError::Storage(format!("{}: {}", self.path.display(), e))),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ClientError::Storage(format!("{}: {}", parent.display(), e)))?;
        }
        let text = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, text)
            .map_err(|e| ClientError::Storage(format!("{}: {}", self.path.display(), e)))
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        let _guard = lock(&self.guard)?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let _guard = lock(&self.guard)?;
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        let _guard = lock(&self.guard)?;
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Session lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn,
    LoggedOut,
    /// The backend rejected the stored token; credentials were cleared.
    Expired,
}

/// Shared handle over the credential store and the event channel.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn CredentialStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("subscribers", &self.events.receiver_count())
            .finish()
    }
}

impl Session {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { store, events }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCredentialStore::new()))
    }

    /// Session persisted at `path`, or in memory when no path is given.
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::new(Arc::new(FileCredentialStore::new(path))),
            None => Self::in_memory(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn token(&self) -> Result<Option<String>, ClientError> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    pub fn user(&self) -> Result<Option<AuthUser>, ClientError> {
        match self.store.get(USER_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn is_authenticated(&self) -> Result<bool, ClientError> {
        Ok(self.token()?.is_some())
    }

    /// Persists a successful login.
    pub fn save(&self, login: &LoginResponse) -> Result<(), ClientError> {
        self.store.set(TOKEN_KEY, &login.token)?;
        self.store.set(USER_KEY, &serde_json::to_string(&login.user)?)?;
        info!(username = %login.user.username, "Session started");
        self.notify(SessionEvent::LoggedIn);
        Ok(())
    }

    /// Local logout; the backend is not contacted.
    pub fn clear(&self) -> Result<(), ClientError> {
        self.remove_credentials()?;
        self.notify(SessionEvent::LoggedOut);
        Ok(())
    }

    /// Reaction to a 401: wipe credentials and tell subscribers.
    pub fn expire(&self) -> Result<(), ClientError> {
        self.remove_credentials()?;
        warn!("Backend rejected credentials, session expired");
        self.notify(SessionEvent::Expired);
        Ok(())
    }

    fn remove_credentials(&self) -> Result<(), ClientError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)
    }

    fn notify(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            debug!(?event, "No session subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn login() -> LoginResponse {
        LoginResponse {
            token: "tok-123".to_string(),
            user: AuthUser {
                id: 1,
                username: "admin".to_string(),
                email: Some("admin@dw.ph".to_string()),
                full_name: Some("Maria Santos".to_string()),
                role: Some("admin".to_string()),
            },
        }
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryCredentialStore::new();
        assert_ok!(store.set(TOKEN_KEY, "abc"));
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        assert_ok!(store.remove(TOKEN_KEY));
        assert!(store.get(TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileCredentialStore::new(&path);
        assert_ok!(store.set(TOKEN_KEY, "abc"));
        assert_ok!(store.set(USER_KEY, "{}"));

        let reopened = FileCredentialStore::new(&path);
        assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));

        assert_ok!(reopened.remove(TOKEN_KEY));
        assert!(store.get(TOKEN_KEY).unwrap().is_none());
        assert_eq!(store.get(USER_KEY).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("absent.json"));
        assert!(store.get(TOKEN_KEY).unwrap().is_none());
        assert_ok!(store.remove(USER_KEY));
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        let store = FileCredentialStore::new(&path);
        assert_err!(store.get(TOKEN_KEY));
    }

    #[test]
    fn test_session_save_and_read() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated().unwrap());

        session.save(&login()).unwrap();
        assert_eq!(session.token().unwrap().as_deref(), Some("tok-123"));
        assert_eq!(session.user().unwrap().unwrap().username, "admin");
    }

    #[tokio::test]
    async fn test_expire_clears_both_entries_and_notifies() {
        let store = Arc::new(MemoryCredentialStore::new());
        let session = Session::new(store.clone());
        session.save(&login()).unwrap();

        let mut events = session.subscribe();
        session.expire().unwrap();

        assert!(store.get(TOKEN_KEY).unwrap().is_none());
        assert!(store.get(USER_KEY).unwrap().is_none());
        assert_eq!(events.recv().await.unwrap(), SessionEvent::Expired);
    }

    #[tokio::test]
    async fn test_clear_notifies_logout() {
        let session = Session::in_memory();
        session.save(&login()).unwrap();
        let mut events = session.subscribe();

        session.clear().unwrap();
        assert!(session.user().unwrap().is_none());
        assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedOut);
    }
}
