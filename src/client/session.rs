use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::client::api::TourismApi;
use crate::client::error::ClientError;
use crate::client::models::{Registration, SessionUser};

pub const USER_KEY: &str = "user";
pub const THEME_KEY: &str = "theme";

/// Small persisted key/value store that outlives the process.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;
    fn remove(&self, key: &str) -> Result<(), ClientError>;
}

#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// All entries live in one JSON object file, rewritten on every change.
pub struct FileSessionStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileSessionStore {
    /// A missing file starts an empty store. An unreadable one is an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

/// Holds the signed-in user.
///
/// The user is restored from the store when the session is created and
/// written back on every change. Each change of identity bumps
/// [`AuthSession::generation`] and is broadcast to [`AuthSession::subscribe`]
/// receivers, which is how the sync layer knows to reload favorites and to
/// drop responses that belong to a previous identity.
pub struct AuthSession {
    api: Arc<dyn TourismApi>,
    store: Arc<dyn SessionStore>,
    user: watch::Sender<Option<SessionUser>>,
    generation: AtomicU64,
}

impl AuthSession {
    pub fn restore(api: Arc<dyn TourismApi>, store: Arc<dyn SessionStore>) -> Self {
        let saved = match store.get(USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<SessionUser>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("Discarding unreadable saved session: {}", e);
                    if let Err(e) = store.remove(USER_KEY) {
                        warn!("Failed to clear saved session: {}", e);
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read saved session: {}", e);
                None
            }
        };

        if let Some(user) = &saved {
            info!("Restored session for user {}", user.id);
        }

        let (user, _) = watch::channel(saved);
        Self {
            api,
            store,
            user,
            generation: AtomicU64::new(0),
        }
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.user.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.borrow().is_some()
    }

    /// Bumped whenever the signed-in identity changes.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<SessionUser>> {
        self.user.subscribe()
    }

    /// On failure nothing is stored and the current user is unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, ClientError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation("Email and password required".into()));
        }

        let user = self.api.login(email, password).await.inspect_err(|e| {
            warn!("Login failed: {}", e);
        })?;

        self.store.set(USER_KEY, &serde_json::to_string(&user)?)?;
        self.replace_user(Some(user.clone()));
        info!("Signed in as user {}", user.id);
        Ok(user)
    }

    pub async fn register(&self, registration: &Registration) -> Result<(), ClientError> {
        registration.validate()?;
        self.api.register(registration).await.inspect_err(|e| {
            warn!("Registration failed: {}", e);
        })
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        let removed = self.store.remove(USER_KEY);
        self.replace_user(None);
        info!("Signed out");
        removed
    }

    /// The generation is bumped before the new identity is broadcast, so a
    /// receiver woken by the change never pairs the new user with the old
    /// generation.
    fn replace_user(&self, next: Option<SessionUser>) {
        let changed = self.user.borrow().as_ref().map(|u| u.id) != next.as_ref().map(|u| u.id);
        if changed {
            self.generation.fetch_add(1, Ordering::SeqCst);
        }
        self.user.send_replace(next);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light-theme",
            Theme::Dark => "dark-theme",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light-theme" => Some(Theme::Light),
            "dark-theme" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Display preferences kept next to the session entry.
pub struct Preferences {
    store: Arc<dyn SessionStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn theme(&self) -> Theme {
        match self.store.get(THEME_KEY) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Failed to read theme preference: {}", e);
                Theme::default()
            }
        }
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), ClientError> {
        self.store.set(THEME_KEY, theme.as_str())
    }

    pub fn toggle_theme(&self) -> Result<Theme, ClientError> {
        let next = self.theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}
