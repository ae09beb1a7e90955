use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{info, warn};

use crate::app_dirs::AppDirs;
use crate::user::UserRecord;

/// The whole persisted store: learner name to profile.
pub type UserMap = BTreeMap<String, UserRecord>;

#[derive(Debug)]
pub enum StoreError {
    /// Refused to overwrite the store with an empty map.
    Empty,
    Io(io::Error),
    Serde(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Empty => write!(f, "refusing to save an empty user store"),
            StoreError::Io(e) => write!(f, "user store i/o error: {}", e),
            StoreError::Serde(e) => write!(f, "user store encoding error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Empty => None,
            StoreError::Io(e) => Some(e),
            StoreError::Serde(e) => Some(e),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serde(e)
    }
}

/// Durable whole-store load/save boundary.
///
/// `load` on a store that does not exist yet returns an empty map; a first
/// run is a valid state, not an error. `save` rewrites the entire store and
/// must reject an empty map with [`StoreError::Empty`].
pub trait UserStore {
    fn load(&self) -> Result<UserMap, StoreError>;
    fn save(&self, users: &UserMap) -> Result<(), StoreError>;
}

/// File-backed store holding one pretty-printed JSON document.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::store_path().unwrap_or_else(|| PathBuf::from("fingerspell_users.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for JsonFileStore {
    fn load(&self) -> Result<UserMap, StoreError> {
        if !self.path.exists() {
            info!("no store at {}, starting empty", self.path.display());
            return Ok(UserMap::new());
        }
        let bytes = fs::read(&self.path)?;
        let mut users: UserMap = serde_json::from_slice(&bytes)?;
        for user in users.values_mut() {
            user.ensure_shape();
        }
        info!(
            "loaded {} user(s) from {}",
            users.len(),
            self.path.display()
        );
        Ok(users)
    }

    fn save(&self, users: &UserMap) -> Result<(), StoreError> {
        if users.is_empty() {
            warn!(
                "refusing to overwrite {} with an empty store",
                self.path.display()
            );
            return Err(StoreError::Empty);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(users)?;
        // Stage to a sibling file and rename so no reader ever observes a
        // partial write.
        let staged = self.path.with_extension("tmp");
        fs::write(&staged, &data)?;
        fs::rename(&staged, &self.path)?;
        info!("saved {} user(s) to {}", users.len(), self.path.display());
        Ok(())
    }
}

/// In-memory store for unit tests. Clones share the same backing map, so a
/// test can keep a handle and inspect what the registry persisted.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    saved: Rc<RefCell<Option<UserMap>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(users: UserMap) -> Self {
        Self {
            saved: Rc::new(RefCell::new(Some(users))),
        }
    }

    /// The last map passed to `save`, if any.
    pub fn snapshot(&self) -> Option<UserMap> {
        self.saved.borrow().clone()
    }
}

impl UserStore for MemoryStore {
    fn load(&self) -> Result<UserMap, StoreError> {
        Ok(self.saved.borrow().clone().unwrap_or_default())
    }

    fn save(&self, users: &UserMap) -> Result<(), StoreError> {
        if users.is_empty() {
            return Err(StoreError::Empty);
        }
        *self.saved.borrow_mut() = Some(users.clone());
        Ok(())
    }
}
