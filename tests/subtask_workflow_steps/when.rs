//! When steps for subtask workflow BDD scenarios.

use super::world::{SubTaskWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use todo_core::todo::services::{AddSubTaskRequest, MoveToNewGroupRequest};

#[when(r#"a subtask "{title}" is added to the task"#)]
fn add_sub_task(world: &mut SubTaskWorld, title: String) -> Result<(), eyre::Report> {
    let parent_id = world.parent()?.id();
    let response = run_async(world.service.add(AddSubTaskRequest::new(parent_id, title)))
        .wrap_err("add subtask")?;
    world.last_outcome = Some(response.into());
    Ok(())
}

#[when("the subtask is deleted")]
fn delete_sub_task(world: &mut SubTaskWorld) -> Result<(), eyre::Report> {
    let id = world.sub_task()?.id();
    let response = run_async(world.service.delete(id)).wrap_err("delete subtask")?;
    world.last_outcome = Some(response.into());
    Ok(())
}

#[when("the subtask star is toggled")]
fn toggle_star(world: &mut SubTaskWorld) -> Result<(), eyre::Report> {
    let id = world.sub_task()?.id();
    let response = run_async(world.service.toggle_star(id)).wrap_err("toggle star")?;
    world.last_outcome = Some(response.into());
    Ok(())
}

#[when("the subtask completion is toggled")]
fn toggle_completion(world: &mut SubTaskWorld) -> Result<(), eyre::Report> {
    let id = world.sub_task()?.id();
    let response =
        run_async(world.service.toggle_completion(id)).wrap_err("toggle completion")?;
    world.last_outcome = Some(response.into());
    Ok(())
}

#[when(r#"the subtask is moved to a new group "{group_name}""#)]
fn move_to_new_group(world: &mut SubTaskWorld, group_name: String) -> Result<(), eyre::Report> {
    let id = world.sub_task()?.id();
    let response = run_async(
        world
            .service
            .move_to_new_group(id, MoveToNewGroupRequest::new(group_name)),
    )
    .wrap_err("move subtask to new group")?;
    world.last_outcome = Some(response.into());
    Ok(())
}

#[when("the subtask is moved to the background group")]
fn move_to_background_group(world: &mut SubTaskWorld) -> Result<(), eyre::Report> {
    let id = world.sub_task()?.id();
    let group_id = world.group()?.id();
    let response = run_async(world.service.move_to_existing_group(id, group_id))
        .wrap_err("move subtask to existing group")?;
    world.last_outcome = Some(response.into());
    Ok(())
}
