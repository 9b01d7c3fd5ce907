use std::sync::Arc;

use async_trait::async_trait;
use orgdir_application::{DirectoryReader, DirectoryStore, DirectoryTransaction};
use orgdir_core::AppResult;
use orgdir_domain::{Assignment, Department, Employee, Organisation, Project, User};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

mod queries;
mod transaction;

/// In-memory directory store.
///
/// Committed state is an immutable snapshot behind an `Arc`. Readers clone
/// the `Arc` and never wait on a writer. Write transactions are serialised by
/// a separate mutex and work on a private copy that replaces the snapshot on
/// commit. Listings follow insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectoryStore {
    snapshot: Arc<RwLock<Arc<DirectoryState>>>,
    writer: Arc<Mutex<()>>,
}

impl InMemoryDirectoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default)]
struct DirectoryState {
    organisations: Vec<Organisation>,
    departments: Vec<Department>,
    projects: Vec<Project>,
    employees: Vec<Employee>,
    users: Vec<User>,
    assignments: Vec<Assignment>,
    last_project_id: i64,
    last_user_id: i64,
}

struct InMemoryDirectoryReader {
    state: Arc<DirectoryState>,
}

struct InMemoryDirectoryTransaction {
    snapshot: Arc<RwLock<Arc<DirectoryState>>>,
    _writer: OwnedMutexGuard<()>,
    working: DirectoryState,
}

#[async_trait]
impl DirectoryStore for InMemoryDirectoryStore {
    async fn read(&self) -> AppResult<Box<dyn DirectoryReader>> {
        let state = Arc::clone(&*self.snapshot.read().await);

        Ok(Box::new(InMemoryDirectoryReader { state }))
    }

    async fn begin(&self) -> AppResult<Box<dyn DirectoryTransaction>> {
        let writer = Arc::clone(&self.writer).lock_owned().await;
        let working = DirectoryState::clone(&*self.snapshot.read().await);

        Ok(Box::new(InMemoryDirectoryTransaction {
            snapshot: Arc::clone(&self.snapshot),
            _writer: writer,
            working,
        }))
    }
}
