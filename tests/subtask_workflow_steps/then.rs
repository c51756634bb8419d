//! Then steps for subtask workflow BDD scenarios.

use super::world::{Outcome, SubTaskWorld, run_async};
use chrono::Utc;
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::then;
use todo_core::todo::{
    domain::{Entity, UndoDeleteItem, UndoRecord},
    ports::EntityStore,
};

fn last_outcome(world: &SubTaskWorld) -> Result<&Outcome, eyre::Report> {
    world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre!("missing service response"))
}

fn active_titles(world: &SubTaskWorld) -> Result<Vec<String>, eyre::Report> {
    let response = run_async(world.service.list_active()).wrap_err("list active subtasks")?;
    Ok(response
        .data
        .unwrap_or_default()
        .iter()
        .map(|sub_task| sub_task.title().to_owned())
        .collect())
}

#[then(r#"the response succeeds with message "{message}""#)]
fn response_succeeds(world: &SubTaskWorld, message: String) -> Result<(), eyre::Report> {
    let outcome = last_outcome(world)?;
    eyre::ensure!(outcome.is_success, "expected success, got {outcome:?}");
    eyre::ensure!(
        outcome.message == message,
        "expected message {message:?}, got {:?}",
        outcome.message
    );
    Ok(())
}

#[then(r#"the response fails with message "{message}""#)]
fn response_fails(world: &SubTaskWorld, message: String) -> Result<(), eyre::Report> {
    let outcome = last_outcome(world)?;
    eyre::ensure!(!outcome.is_success, "expected failure, got {outcome:?}");
    eyre::ensure!(
        outcome.message == message,
        "expected message {message:?}, got {:?}",
        outcome.message
    );
    Ok(())
}

#[then(r#"the active subtasks are "{title}""#)]
fn active_subtasks_are(world: &SubTaskWorld, title: String) -> Result<(), eyre::Report> {
    let titles = active_titles(world)?;
    eyre::ensure!(titles == vec![title], "unexpected active subtasks {titles:?}");
    Ok(())
}

#[then("no active subtasks remain")]
fn no_active_subtasks(world: &SubTaskWorld) -> Result<(), eyre::Report> {
    let titles = active_titles(world)?;
    eyre::ensure!(titles.is_empty(), "unexpected active subtasks {titles:?}");
    Ok(())
}

#[then("the undo cache holds the deleted subtask")]
fn undo_cache_holds_deleted(world: &SubTaskWorld) -> Result<(), eyre::Report> {
    let id = world.sub_task()?.id();
    let value = world
        .undo_cache
        .get(&world.service.config().undo_items_key, Utc::now())
        .wrap_err("read undo cache")?
        .ok_or_else(|| eyre!("undo record missing or expired"))?;
    let record: UndoRecord = serde_json::from_value(value).wrap_err("decode undo record")?;
    eyre::ensure!(
        record
            == UndoRecord::DeletedItems(UndoDeleteItem {
                sub_task_ids: vec![id],
            }),
        "unexpected undo record {record:?}"
    );
    Ok(())
}

#[then("the subtask is not starred")]
fn sub_task_not_starred(world: &SubTaskWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(!world.stored_sub_task()?.is_starred(), "subtask is starred");
    Ok(())
}

#[then("the subtask is incomplete")]
fn sub_task_incomplete(world: &SubTaskWorld) -> Result<(), eyre::Report> {
    let sub_task = world.stored_sub_task()?;
    eyre::ensure!(!sub_task.is_completed(), "subtask is still completed");
    eyre::ensure!(
        sub_task.completed_at().is_none(),
        "subtask completion time not cleared"
    );
    Ok(())
}

#[then("the parent task is incomplete")]
fn parent_incomplete(world: &SubTaskWorld) -> Result<(), eyre::Report> {
    let parent = world.stored_parent()?;
    eyre::ensure!(!parent.is_completed(), "parent task is still completed");
    eyre::ensure!(
        parent.completed_at().is_none(),
        "parent completion time not cleared"
    );
    Ok(())
}

#[then(r#"a group named "{group_name}" holds a task "{task_title}""#)]
fn group_holds_task(
    world: &SubTaskWorld,
    group_name: String,
    task_title: String,
) -> Result<(), eyre::Report> {
    let groups = run_async(world.groups.query_all()).wrap_err("list groups")?;
    let matching: Vec<_> = groups
        .iter()
        .filter(|group| group.name() == group_name)
        .collect();
    eyre::ensure!(
        matching.len() == 1,
        "expected one group named {group_name:?}, found {}",
        matching.len()
    );
    let group = matching
        .first()
        .ok_or_else(|| eyre!("group {group_name:?} missing"))?;
    let tasks = run_async(world.tasks.query_all()).wrap_err("list tasks")?;
    let promoted: Vec<_> = tasks
        .iter()
        .filter(|task| task.group_id() == group.id() && task.is_active())
        .collect();
    eyre::ensure!(
        promoted.len() == 1 && promoted.iter().all(|task| task.title() == task_title),
        "expected one task {task_title:?} in group, found {}",
        promoted.len()
    );
    Ok(())
}

#[then("the subtask is still active")]
fn sub_task_still_active(world: &SubTaskWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.stored_sub_task()?.is_active(), "subtask was deleted");
    Ok(())
}
