//! Shared world state for subtask workflow BDD scenarios.

use std::sync::Arc;

use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;
use todo_core::todo::{
    adapters::memory::{InMemoryEntityStore, InMemoryUndoCache},
    domain::{SubTask, Task, TaskGroup},
    ports::EntityStore,
    services::{SubTaskService, WorkflowResponse},
};

/// Service type used by the BDD world.
pub type TestSubTaskService = SubTaskService<
    InMemoryEntityStore<SubTask>,
    InMemoryEntityStore<Task>,
    InMemoryEntityStore<TaskGroup>,
    InMemoryUndoCache,
    DefaultClock,
>;

/// Success flag and message of the last service response.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub is_success: bool,
    pub message: String,
}

impl<T> From<WorkflowResponse<T>> for Outcome {
    fn from(response: WorkflowResponse<T>) -> Self {
        Self {
            is_success: response.is_success,
            message: response.message,
        }
    }
}

/// Scenario world for subtask workflow behaviour tests.
pub struct SubTaskWorld {
    pub service: TestSubTaskService,
    pub sub_tasks: InMemoryEntityStore<SubTask>,
    pub tasks: InMemoryEntityStore<Task>,
    pub groups: InMemoryEntityStore<TaskGroup>,
    pub undo_cache: InMemoryUndoCache,
    pub clock: DefaultClock,
    pub group: Option<TaskGroup>,
    pub parent: Option<Task>,
    pub sub_task: Option<SubTask>,
    pub last_outcome: Option<Outcome>,
}

impl SubTaskWorld {
    /// Creates a world backed by empty in-memory adapters.
    #[must_use]
    pub fn new() -> Self {
        let sub_tasks = InMemoryEntityStore::new();
        let tasks = InMemoryEntityStore::new();
        let groups = InMemoryEntityStore::new();
        let undo_cache = InMemoryUndoCache::new();
        let service = SubTaskService::new(
            Arc::new(sub_tasks.clone()),
            Arc::new(tasks.clone()),
            Arc::new(groups.clone()),
            Arc::new(undo_cache.clone()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            sub_tasks,
            tasks,
            groups,
            undo_cache,
            clock: DefaultClock,
            group: None,
            parent: None,
            sub_task: None,
            last_outcome: None,
        }
    }

    /// Returns the subtask under test.
    pub fn sub_task(&self) -> Result<&SubTask, eyre::Report> {
        self.sub_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing subtask in scenario world"))
    }

    /// Returns the parent task seeded by the background.
    pub fn parent(&self) -> Result<&Task, eyre::Report> {
        self.parent
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing parent task in scenario world"))
    }

    /// Returns the group seeded by the background.
    pub fn group(&self) -> Result<&TaskGroup, eyre::Report> {
        self.group
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing group in scenario world"))
    }

    /// Reloads the subtask under test from the store.
    pub fn stored_sub_task(&self) -> Result<SubTask, eyre::Report> {
        let id = self.sub_task()?.id();
        run_async(self.sub_tasks.find_by_id(id))
            .wrap_err("load subtask")?
            .ok_or_else(|| eyre::eyre!("subtask {id} missing from store"))
    }

    /// Reloads the parent task from the store.
    pub fn stored_parent(&self) -> Result<Task, eyre::Report> {
        let id = self.parent()?.id();
        run_async(self.tasks.find_by_id(id))
            .wrap_err("load parent task")?
            .ok_or_else(|| eyre::eyre!("task {id} missing from store"))
    }
}

impl Default for SubTaskWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SubTaskWorld {
    SubTaskWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
