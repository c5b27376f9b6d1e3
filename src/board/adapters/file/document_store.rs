//! Task documents stored as JSON files in one directory.
//!
//! Each user's document lives in `<escaped-user-id>.json`. Writes go to a
//! temporary sibling first and are renamed into place. Watches are served
//! in-process: only writes made through this store instance are observed.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;
use tracing::debug;

use crate::board::ports::{
    DocumentSnapshots, StoredTask, TaskDocument, TaskDocumentStore, TaskDocumentStoreError,
    TaskDocumentStoreResult,
};
use crate::session::domain::UserId;

type Watchers = HashMap<UserId, Vec<mpsc::UnboundedSender<Option<TaskDocument>>>>;

/// Document store persisting one JSON file per user.
#[derive(Debug, Clone)]
pub struct FileTaskDocumentStore {
    dir: Arc<Dir>,
    watchers: Arc<RwLock<Watchers>>,
}

impl FileTaskDocumentStore {
    /// Opens the store rooted at `path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDocumentStoreError::Unavailable`] when the directory
    /// cannot be created or opened.
    pub fn open(path: &Utf8Path) -> TaskDocumentStoreResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(TaskDocumentStoreError::unavailable)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(TaskDocumentStoreError::unavailable)?;
        Ok(Self::from_dir(dir))
    }

    /// Wraps an already-opened directory capability.
    #[must_use]
    pub fn from_dir(dir: Dir) -> Self {
        Self {
            dir: Arc::new(dir),
            watchers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn read(&self, user: &UserId) -> TaskDocumentStoreResult<Option<TaskDocument>> {
        let dir = Arc::clone(&self.dir);
        let file_name = document_file_name(user);
        let contents = tokio::task::spawn_blocking(move || match dir.read_to_string(&file_name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        })
        .await
        .map_err(TaskDocumentStoreError::unavailable)?
        .map_err(TaskDocumentStoreError::unavailable)?;

        contents
            .map(|json| {
                serde_json::from_str(&json)
                    .map_err(|err| TaskDocumentStoreError::malformed(user.clone(), err))
            })
            .transpose()
    }

    async fn write(&self, user: &UserId, document: &TaskDocument) -> TaskDocumentStoreResult<()> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|err| TaskDocumentStoreError::malformed(user.clone(), err))?;
        let dir = Arc::clone(&self.dir);
        let file_name = document_file_name(user);
        let staging_name = format!("{file_name}.tmp");
        tokio::task::spawn_blocking(move || {
            dir.write(&staging_name, json.as_bytes())?;
            dir.rename(&staging_name, &dir, &file_name)
        })
        .await
        .map_err(TaskDocumentStoreError::unavailable)?
        .map_err(TaskDocumentStoreError::unavailable)?;

        debug!(user_id = %user, tasks = document.tasks.len(), "task document written");
        self.publish(user, Some(document.clone()))
    }

    fn publish(
        &self,
        user: &UserId,
        snapshot: Option<TaskDocument>,
    ) -> TaskDocumentStoreResult<()> {
        let mut watchers = self.watchers.write().map_err(poisoned)?;
        if let Some(listeners) = watchers.get_mut(user) {
            listeners.retain(|listener| listener.send(snapshot.clone()).is_ok());
        }
        Ok(())
    }
}

fn poisoned(err: impl std::fmt::Display) -> TaskDocumentStoreError {
    TaskDocumentStoreError::unavailable(io::Error::other(err.to_string()))
}

/// Maps a user id onto a file name, percent-escaping anything outside
/// `[A-Za-z0-9_-]` so ids cannot traverse or collide.
fn document_file_name(user: &UserId) -> String {
    let mut name = String::with_capacity(user.as_str().len() + 5);
    for byte in user.as_str().bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            name.push(char::from(byte));
        } else {
            name.push_str(&format!("%{byte:02X}"));
        }
    }
    name.push_str(".json");
    name
}

#[async_trait]
impl TaskDocumentStore for FileTaskDocumentStore {
    async fn watch(&self, user: &UserId) -> TaskDocumentStoreResult<DocumentSnapshots> {
        let current = self.read(user).await?;
        let (sender, receiver) = mpsc::unbounded_channel();
        sender.send(current).map_err(poisoned)?;
        let mut watchers = self.watchers.write().map_err(poisoned)?;
        watchers.entry(user.clone()).or_default().push(sender);
        Ok(receiver)
    }

    async fn get(&self, user: &UserId) -> TaskDocumentStoreResult<Option<TaskDocument>> {
        self.read(user).await
    }

    async fn create(&self, user: &UserId, document: &TaskDocument) -> TaskDocumentStoreResult<()> {
        self.write(user, document).await
    }

    async fn overwrite_tasks(
        &self,
        user: &UserId,
        tasks: &[StoredTask],
    ) -> TaskDocumentStoreResult<()> {
        let Some(mut document) = self.read(user).await? else {
            return Err(TaskDocumentStoreError::NotFound(user.clone()));
        };
        document.tasks = tasks.to_vec();
        self.write(user, &document).await
    }
}
