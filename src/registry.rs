use std::fmt;

use log::{error, info};

use crate::alphabet::Symbol;
use crate::history::Outcome;
use crate::proficiency::Proficiency;
use crate::scoring::DECAY_ALPHA;
use crate::store::{StoreError, UserMap, UserStore};
use crate::user::UserRecord;

#[derive(Debug)]
pub enum RegistryError {
    DuplicateName(String),
    NotFound(String),
    Store(StoreError),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateName(name) => write!(f, "user {:?} already exists", name),
            RegistryError::NotFound(name) => write!(f, "no such user: {:?}", name),
            RegistryError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for RegistryError {
    fn from(e: StoreError) -> Self {
        RegistryError::Store(e)
    }
}

/// In-memory authoritative map of learner profiles.
///
/// The registry loads the whole store once at open and rewrites it after
/// every mutation; there is no batching or async flush. Operations are
/// synchronous and run to completion, so a single instance needs no
/// internal locking. If the host ever grows threads, mutating calls must
/// be serialized by the caller; the store format carries no versioning.
#[derive(Debug)]
pub struct UserRegistry<S: UserStore> {
    store: S,
    active_users: UserMap,
}

impl<S: UserStore> UserRegistry<S> {
    /// Load the persisted store into a fresh registry.
    pub fn open(store: S) -> Result<Self, RegistryError> {
        let active_users = store.load()?;
        Ok(Self {
            store,
            active_users,
        })
    }

    /// Insert a new learner with empty histories, then persist.
    /// Names match case-sensitively.
    pub fn create_user(
        &mut self,
        name: &str,
        proficiency: Proficiency,
    ) -> Result<&UserRecord, RegistryError> {
        if self.active_users.contains_key(name) {
            error!("cannot create {:?}: name taken", name);
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        self.active_users
            .insert(name.to_string(), UserRecord::new(name, proficiency));
        info!("created user {:?}", name);
        self.persist()?;
        Ok(&self.active_users[name])
    }

    /// Remove a learner and persist. Removing the last learner leaves the
    /// backing store untouched and surfaces the empty-save rejection.
    pub fn delete_user(&mut self, name: &str) -> Result<(), RegistryError> {
        if self.active_users.remove(name).is_none() {
            return Err(RegistryError::NotFound(name.to_string()));
        }
        info!("deleted user {:?}", name);
        self.persist()
    }

    /// Append one lesson's outcomes to a learner, rederive every score and
    /// the tier, then persist.
    pub fn record_lesson_result(
        &mut self,
        name: &str,
        outcomes: &[(Symbol, Outcome)],
    ) -> Result<&UserRecord, RegistryError> {
        let user = self
            .active_users
            .get_mut(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        user.apply_lesson(outcomes, DECAY_ALPHA);
        info!(
            "recorded {} outcome(s) for {:?}: overall {:.1} ({})",
            outcomes.len(),
            name,
            user.overall_score(),
            user.proficiency()
        );
        self.persist()?;
        Ok(&self.active_users[name])
    }

    pub fn get_user(&self, name: &str) -> Option<&UserRecord> {
        self.active_users.get(name)
    }

    /// Snapshot of the active user names, sorted.
    pub fn list_active_users(&self) -> Vec<String> {
        self.active_users.keys().cloned().collect()
    }

    pub fn users(&self) -> impl Iterator<Item = &UserRecord> {
        self.active_users.values()
    }

    pub fn len(&self) -> usize {
        self.active_users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active_users.is_empty()
    }

    fn persist(&self) -> Result<(), RegistryError> {
        self.store
            .save(&self.active_users)
            .map_err(RegistryError::from)
    }
}
