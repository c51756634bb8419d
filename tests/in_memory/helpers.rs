//! Shared test helpers for in-memory subtask workflow integration tests.

use std::io;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use todo_core::todo::{
    adapters::memory::{InMemoryEntityStore, InMemoryUndoCache},
    domain::{SubTask, Task, TaskGroup},
    ports::EntityStore,
    services::SubTaskService,
};
use tokio::runtime::Runtime;

/// Service wired to in-memory adapters and the system clock.
pub type InMemoryService = SubTaskService<
    InMemoryEntityStore<SubTask>,
    InMemoryEntityStore<Task>,
    InMemoryEntityStore<TaskGroup>,
    InMemoryUndoCache,
    DefaultClock,
>;

/// Service plus handles onto the adapters it writes to.
pub struct Workspace {
    pub service: InMemoryService,
    pub sub_tasks: InMemoryEntityStore<SubTask>,
    pub tasks: InMemoryEntityStore<Task>,
    pub groups: InMemoryEntityStore<TaskGroup>,
    pub undo_cache: InMemoryUndoCache,
}

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a service over fresh in-memory adapters.
#[fixture]
pub fn workspace() -> Workspace {
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
    Workspace {
        service,
        sub_tasks,
        tasks,
        groups,
        undo_cache,
    }
}

/// Stores a group with one parent task and returns both.
///
/// # Errors
///
/// Returns an error if either store write fails.
pub fn seed_parent(
    rt: &Runtime,
    workspace: &Workspace,
) -> Result<(TaskGroup, Task), eyre::Report> {
    let group = rt.block_on(workspace.groups.add(TaskGroup::new("Errands", "My order")))?;
    let task = rt.block_on(
        workspace
            .tasks
            .add(Task::new(group.id(), "Saturday errands", &DefaultClock)),
    )?;
    Ok((group, task))
}
