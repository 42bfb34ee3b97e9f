//! Then steps for composer BDD scenarios.

use super::world::{ComposerWorld, parse_operation, parse_rule, parse_time};
use composer::form::{domain::PriorityLevel, ports::Diagnostic};
use rstest_bdd_macros::then;

#[then(r#"the form is in "{mode}" mode"#)]
fn form_is_in_mode(world: &mut ComposerWorld, mode: String) -> Result<(), eyre::Report> {
    let current = world.form_mut()?.current_mode();
    eyre::ensure!(
        current.as_str() == mode,
        "expected {mode} mode, found {}",
        current.as_str()
    );
    Ok(())
}

#[then(r#"a "{rule}" suggestion is offered"#)]
fn suggestion_is_offered(world: &mut ComposerWorld, rule: String) -> Result<(), eyre::Report> {
    let wanted = parse_rule(&rule)?;
    let offered = world
        .form_mut()?
        .suggestions()
        .iter()
        .any(|message| message.rule() == wanted);
    eyre::ensure!(offered, "expected a {rule} suggestion");
    Ok(())
}

#[then(r#"the event runs from "{start}" to "{end}""#)]
fn event_runs(world: &mut ComposerWorld, start: String, end: String) -> Result<(), eyre::Report> {
    let form = world.form_mut()?;
    let window = form
        .draft()
        .as_event()
        .ok_or_else(|| eyre::eyre!("draft is not an event"))?
        .window();
    eyre::ensure!(window.start() == parse_time(&start)?, "unexpected start {}", window.start());
    eyre::ensure!(window.end() == parse_time(&end)?, "unexpected end {}", window.end());
    Ok(())
}

#[then(r#"the task priority is "{priority}""#)]
fn task_priority_is(world: &mut ComposerWorld, priority: String) -> Result<(), eyre::Report> {
    let expected = PriorityLevel::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid expected priority: {err}"))?;
    let actual = world
        .form_mut()?
        .draft()
        .as_task()
        .ok_or_else(|| eyre::eyre!("draft is not a task"))?
        .priority;
    eyre::ensure!(actual == expected, "expected {expected:?}, found {actual:?}");
    Ok(())
}

#[then("the submission succeeds")]
fn submission_succeeds(world: &ComposerWorld) -> Result<(), eyre::Report> {
    match world.last_submit.as_ref() {
        Some(Ok(_)) => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("submission failed: {err}")),
        None => Err(eyre::eyre!("form was never submitted")),
    }
}

#[then("the stored task has no due date or assignee")]
fn stored_task_has_nulls(world: &ComposerWorld) -> Result<(), eyre::Report> {
    let tasks = world.remote.tasks();
    let [task] = tasks.as_slice() else {
        return Err(eyre::eyre!("expected one stored task, found {}", tasks.len()));
    };
    eyre::ensure!(task.due_date.is_none(), "due date should be null");
    eyre::ensure!(task.assignee_id.is_none(), "assignee should be null");
    Ok(())
}

#[then("the form is closed")]
fn form_is_closed(world: &mut ComposerWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(!world.form_mut()?.is_open(), "form should be closed");
    eyre::ensure!(world.keys.active_count() == 0, "key listener still attached");
    Ok(())
}

#[then("an upload failure is diagnosed")]
fn upload_failure_diagnosed(world: &ComposerWorld) -> Result<(), eyre::Report> {
    let entries = world.diagnostics.entries();
    eyre::ensure!(
        matches!(entries.as_slice(), [Diagnostic::AttachmentUploadFailed { .. }]),
        "expected one upload diagnostic, found {entries:?}"
    );
    Ok(())
}

#[then(r#""{operation}" is never called"#)]
fn never_called(world: &ComposerWorld, operation: String) -> Result<(), eyre::Report> {
    let count = world.remote.call_count(parse_operation(&operation)?);
    eyre::ensure!(count == 0, "{operation} was called {count} times");
    Ok(())
}

#[then("{count:usize} event is stored")]
fn events_stored(world: &ComposerWorld, count: usize) -> Result<(), eyre::Report> {
    let stored = world.remote.events().len();
    eyre::ensure!(stored == count, "expected {count} events, found {stored}");
    Ok(())
}
