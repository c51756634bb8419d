//! `PostgreSQL` entity store for subtasks, tasks, and task groups.

use super::{
    models::{
        SubTaskChangeset, SubTaskRow, TaskChangeset, TaskGroupChangeset, TaskGroupRow, TaskRow,
    },
    schema::{sub_tasks, task_groups, tasks},
};
use crate::todo::{
    domain::{Entity, SubTask, SubTaskId, Task, TaskGroup, TaskGroupId, TaskId},
    ports::{EntityStore, EntityStoreError, EntityStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the to-do store.
pub type TodoPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed store implementing [`EntityStore`] for every to-do
/// record type.
#[derive(Debug, Clone)]
pub struct PostgresTodoStore {
    pool: TodoPgPool,
}

impl PostgresTodoStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> EntityStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> EntityStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(EntityStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(EntityStoreError::persistence)?
    }
}

/// Maps insert failures, reporting primary-key conflicts as duplicates.
fn map_insert_error<T: Entity>(id: T::Id, err: DieselError) -> EntityStoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            EntityStoreError::duplicate::<T>(id)
        }
        _ => EntityStoreError::persistence(err),
    }
}

/// Reports a zero-row update as a missing record.
fn ensure_updated<T: Entity>(id: T::Id, affected: usize) -> EntityStoreResult<()> {
    if affected == 0 {
        return Err(EntityStoreError::not_found::<T>(id));
    }
    Ok(())
}

#[async_trait]
impl EntityStore<SubTask> for PostgresTodoStore {
    async fn find_by_id(&self, id: SubTaskId) -> EntityStoreResult<Option<SubTask>> {
        self.run_blocking(move |connection| {
            let row = sub_tasks::table
                .find(id.into_inner())
                .select(SubTaskRow::as_select())
                .first::<SubTaskRow>(connection)
                .optional()
                .map_err(EntityStoreError::persistence)?;
            Ok(row.map(SubTask::from))
        })
        .await
    }

    async fn add(&self, entity: SubTask) -> EntityStoreResult<SubTask> {
        let id = entity.id();
        let row = SubTaskRow::from(&entity);
        self.run_blocking(move |connection| {
            diesel::insert_into(sub_tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_insert_error::<SubTask>(id, err))?;
            Ok(())
        })
        .await?;
        Ok(entity)
    }

    async fn update(&self, entity: &SubTask) -> EntityStoreResult<()> {
        let id = entity.id();
        let changeset = SubTaskChangeset::from(entity);
        self.run_blocking(move |connection| {
            let affected = diesel::update(sub_tasks::table.find(id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(EntityStoreError::persistence)?;
            ensure_updated::<SubTask>(id, affected)
        })
        .await
    }

    async fn query_all(&self) -> EntityStoreResult<Vec<SubTask>> {
        self.run_blocking(|connection| {
            let rows = sub_tasks::table
                .order((sub_tasks::created_at.asc(), sub_tasks::id.asc()))
                .select(SubTaskRow::as_select())
                .load::<SubTaskRow>(connection)
                .map_err(EntityStoreError::persistence)?;
            Ok(rows.into_iter().map(SubTask::from).collect())
        })
        .await
    }
}

#[async_trait]
impl EntityStore<Task> for PostgresTodoStore {
    async fn find_by_id(&self, id: TaskId) -> EntityStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(EntityStoreError::persistence)?;
            Ok(row.map(Task::from))
        })
        .await
    }

    async fn add(&self, entity: Task) -> EntityStoreResult<Task> {
        let id = entity.id();
        let row = TaskRow::from(&entity);
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_insert_error::<Task>(id, err))?;
            Ok(())
        })
        .await?;
        Ok(entity)
    }

    async fn update(&self, entity: &Task) -> EntityStoreResult<()> {
        let id = entity.id();
        let changeset = TaskChangeset::from(entity);
        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(EntityStoreError::persistence)?;
            ensure_updated::<Task>(id, affected)
        })
        .await
    }

    async fn query_all(&self) -> EntityStoreResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(EntityStoreError::persistence)?;
            Ok(rows.into_iter().map(Task::from).collect())
        })
        .await
    }
}

#[async_trait]
impl EntityStore<TaskGroup> for PostgresTodoStore {
    async fn find_by_id(&self, id: TaskGroupId) -> EntityStoreResult<Option<TaskGroup>> {
        self.run_blocking(move |connection| {
            let row = task_groups::table
                .find(id.into_inner())
                .select(TaskGroupRow::as_select())
                .first::<TaskGroupRow>(connection)
                .optional()
                .map_err(EntityStoreError::persistence)?;
            Ok(row.map(TaskGroup::from))
        })
        .await
    }

    async fn add(&self, entity: TaskGroup) -> EntityStoreResult<TaskGroup> {
        let id = entity.id();
        let row = TaskGroupRow::from(&entity);
        self.run_blocking(move |connection| {
            diesel::insert_into(task_groups::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_insert_error::<TaskGroup>(id, err))?;
            Ok(())
        })
        .await?;
        Ok(entity)
    }

    async fn update(&self, entity: &TaskGroup) -> EntityStoreResult<()> {
        let id = entity.id();
        let changeset = TaskGroupChangeset::from(entity);
        self.run_blocking(move |connection| {
            let affected = diesel::update(task_groups::table.find(id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(EntityStoreError::persistence)?;
            ensure_updated::<TaskGroup>(id, affected)
        })
        .await
    }

    async fn query_all(&self) -> EntityStoreResult<Vec<TaskGroup>> {
        self.run_blocking(|connection| {
            let rows = task_groups::table
                .order((task_groups::created_at.asc(), task_groups::id.asc()))
                .select(TaskGroupRow::as_select())
                .load::<TaskGroupRow>(connection)
                .map_err(EntityStoreError::persistence)?;
            Ok(rows.into_iter().map(TaskGroup::from).collect())
        })
        .await
    }
}
