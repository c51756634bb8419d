//! Unit tests for the subtask workflow.
//!
//! Tests are organised by concern: domain behaviour, in-memory adapters,
//! service operations, completion cascading, moves, and infrastructure fault
//! propagation.


use crate::todo::{
    adapters::memory::{InMemoryEntityStore, InMemoryUndoCache},
    domain::{SubTask, Task, TaskGroup},
    ports::EntityStore,
    services::SubTaskService,
};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::{Arc, Mutex, PoisonError};

/// Clock pinned to a controllable instant.
#[derive(Debug)]
pub(super) struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub(super) const fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub(super) fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(super) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0)
        .single()
        .unwrap_or_default()
}

pub(super) type TestService = SubTaskService<
    InMemoryEntityStore<SubTask>,
    InMemoryEntityStore<Task>,
    InMemoryEntityStore<TaskGroup>,
    InMemoryUndoCache,
    FixedClock,
>;

/// Service wired to in-memory adapters that the test can inspect directly.
pub(super) struct Harness {
    pub(super) service: TestService,
    pub(super) sub_tasks: InMemoryEntityStore<SubTask>,
    pub(super) tasks: InMemoryEntityStore<Task>,
    pub(super) groups: InMemoryEntityStore<TaskGroup>,
    pub(super) undo_cache: InMemoryUndoCache,
    pub(super) clock: Arc<FixedClock>,
}

impl Harness {
    pub(super) fn new() -> Self {
        let sub_tasks = InMemoryEntityStore::new();
        let tasks = InMemoryEntityStore::new();
        let groups = InMemoryEntityStore::new();
        let undo_cache = InMemoryUndoCache::new();
        let clock = Arc::new(FixedClock::at(base_time()));
        let service = SubTaskService::new(
            Arc::new(sub_tasks.clone()),
            Arc::new(tasks.clone()),
            Arc::new(groups.clone()),
            Arc::new(undo_cache.clone()),
            Arc::clone(&clock),
        );
        Self {
            service,
            sub_tasks,
            tasks,
            groups,
            undo_cache,
            clock,
        }
    }

    /// Stores an active group holding one active parent task.
    pub(super) async fn seed_parent(&self) -> eyre::Result<(TaskGroup, Task)> {
        let group = self.groups.add(TaskGroup::new("Home", "My order")).await?;
        let task = self
            .tasks
            .add(Task::new(group.id(), "Weekend chores", &*self.clock))
            .await?;
        Ok((group, task))
    }

    /// Stores an active subtask under `parent`.
    pub(super) async fn seed_sub_task(&self, parent: &Task, title: &str) -> eyre::Result<SubTask> {
        let sub_task = SubTask::new(parent.id(), title, &*self.clock)
            .with_description(Some(format!("{title} details")));
        Ok(self.sub_tasks.add(sub_task).await?)
    }
}

#[fixture]
pub(super) fn harness() -> Harness {
    Harness::new()
}
