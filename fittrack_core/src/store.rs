//! Profile store: repository abstraction over the user record collection.
//!
//! All user data lives in a single `users.json` under the data directory,
//! with the active-session pointer in `session.json` next to it. Reads
//! take shared file locks, writes go through a temp file and an atomic
//! rename. Last write wins; the intended execution context is one
//! interactive session at a time.

use crate::{Error, FitnessDetailsUpdate, Result, UserRecord};
use chrono::Utc;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Storage interface for user records.
///
/// Passed explicitly into the flows that need it, so tests can substitute
/// `MemoryStore` for the file-backed implementation.
pub trait Repository {
    fn get(&self, id: Uuid) -> Result<Option<UserRecord>>;
    fn list(&self) -> Result<Vec<UserRecord>>;
    fn put(&mut self, user: UserRecord) -> Result<()>;

    /// Look up a record by email (case-sensitive exact match, like the
    /// login form)
    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(self.list()?.into_iter().find(|u| u.email == email))
    }

    fn current_user(&self) -> Result<Option<Uuid>>;
    fn set_current_user(&mut self, id: Uuid) -> Result<()>;
    fn clear_current_user(&mut self) -> Result<()>;
}

/// Session pointer file format
#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    current_user: Uuid,
}

/// File-backed store: `users.json` + `session.json` under a data dir
pub struct JsonStore {
    users_path: PathBuf,
    session_path: PathBuf,
}

impl JsonStore {
    /// Open a store rooted at the given data directory. Nothing is
    /// created until the first write.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            users_path: data_dir.join("users.json"),
            session_path: data_dir.join("session.json"),
        }
    }

    /// Load the full record collection.
    ///
    /// A missing file is an empty store. A corrupt file is a hard error:
    /// this is the primary database, and silently starting empty would
    /// lose every account on the next save.
    fn load_users(&self) -> Result<Vec<UserRecord>> {
        if !self.users_path.exists() {
            tracing::debug!("No users file found, store is empty");
            return Ok(Vec::new());
        }

        let file = File::open(&self.users_path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read_result = reader.read_to_string(&mut contents);
        file.unlock()?;
        read_result?;

        let users: Vec<UserRecord> = serde_json::from_str(&contents)?;
        tracing::debug!("Loaded {} user records from {:?}", users.len(), self.users_path);
        Ok(users)
    }

    /// Atomically replace the record collection on disk
    fn save_users(&self, users: &[UserRecord]) -> Result<()> {
        write_json_atomic(&self.users_path, users)?;
        tracing::debug!("Saved {} user records to {:?}", users.len(), self.users_path);
        Ok(())
    }
}

impl Repository for JsonStore {
    fn get(&self, id: Uuid) -> Result<Option<UserRecord>> {
        Ok(self.load_users()?.into_iter().find(|u| u.id == id))
    }

    fn list(&self) -> Result<Vec<UserRecord>> {
        self.load_users()
    }

    fn put(&mut self, user: UserRecord) -> Result<()> {
        let mut users = self.load_users()?;
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => users.push(user),
        }
        self.save_users(&users)
    }

    fn current_user(&self) -> Result<Option<Uuid>> {
        if !self.session_path.exists() {
            return Ok(None);
        }

        let contents = match std::fs::read_to_string(&self.session_path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(
                    "Failed to read session file {:?}: {}. Treating as logged out.",
                    self.session_path,
                    e
                );
                return Ok(None);
            }
        };

        match serde_json::from_str::<SessionFile>(&contents) {
            Ok(session) => Ok(Some(session.current_user)),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse session file {:?}: {}. Treating as logged out.",
                    self.session_path,
                    e
                );
                Ok(None)
            }
        }
    }

    fn set_current_user(&mut self, id: Uuid) -> Result<()> {
        write_json_atomic(&self.session_path, &SessionFile { current_user: id })?;
        tracing::debug!("Session pointer set to {}", id);
        Ok(())
    }

    fn clear_current_user(&mut self) -> Result<()> {
        if self.session_path.exists() {
            std::fs::remove_file(&self.session_path)?;
            tracing::debug!("Session pointer cleared");
        }
        Ok(())
    }
}

/// Serialize a value to JSON and atomically replace `path`:
/// temp file in the same directory, exclusive lock, fsync, rename.
fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "store path missing parent")
    })?)?;

    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        let contents = serde_json::to_string(value)?;
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

/// In-memory store for tests
#[derive(Default)]
pub struct MemoryStore {
    users: HashMap<Uuid, UserRecord>,
    order: Vec<Uuid>,
    current: Option<Uuid>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for MemoryStore {
    fn get(&self, id: Uuid) -> Result<Option<UserRecord>> {
        Ok(self.users.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<UserRecord>> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.users.get(id).cloned())
            .collect())
    }

    fn put(&mut self, user: UserRecord) -> Result<()> {
        if !self.users.contains_key(&user.id) {
            self.order.push(user.id);
        }
        self.users.insert(user.id, user);
        Ok(())
    }

    fn current_user(&self) -> Result<Option<Uuid>> {
        Ok(self.current)
    }

    fn set_current_user(&mut self, id: Uuid) -> Result<()> {
        self.current = Some(id);
        Ok(())
    }

    fn clear_current_user(&mut self) -> Result<()> {
        self.current = None;
        Ok(())
    }
}

/// Merge a partial fitness-details update onto a stored record and stamp
/// `last_updated`.
///
/// This is the only mutation path for the profile; the save itself never
/// fails validation (findings are advisory and belong to the caller).
pub fn write_profile(
    repo: &mut dyn Repository,
    user_id: Uuid,
    update: &FitnessDetailsUpdate,
) -> Result<UserRecord> {
    let mut user = repo
        .get(user_id)?
        .ok_or_else(|| Error::Store(format!("Unknown user: {}", user_id)))?;

    update.apply(&mut user.details);
    user.details.last_updated = Some(Utc::now());

    repo.put(user.clone())?;
    Ok(user)
}

/// Read a user's fitness profile; unknown users read as an empty profile
/// (same shape the forms start from).
pub fn read_profile(repo: &dyn Repository, user_id: Uuid) -> Result<crate::FitnessDetails> {
    Ok(repo
        .get(user_id)?
        .map(|u| u.details)
        .unwrap_or_default())
}
