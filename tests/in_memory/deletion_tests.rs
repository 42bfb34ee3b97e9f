//! Delete confirmation and lookups against the in-memory remote.

use super::helpers::{Rig, rig};
use composer::form::{
    adapters::memory::{InMemoryRemote, RemoteOperation},
    domain::{
        ColumnId, EntityKind, ExistingEntity, KanbanId, PriorityLevel, TaskId, TaskRecord,
        TaskStatus, UserId, WorkspaceId,
    },
    ports::{Board, BoardColumn, Diagnostic, WorkspaceMember},
    services::{ComposerError, OpenRequest, SubmissionError},
};
use rstest::{fixture, rstest};

fn record(workspace_id: &WorkspaceId) -> TaskRecord {
    TaskRecord {
        id: TaskId::new("task-7"),
        workspace_id: workspace_id.clone(),
        title: "Renew certificates".to_owned(),
        description: String::new(),
        priority: PriorityLevel::Critical,
        status: TaskStatus::Todo,
        due_date: None,
        assignee_id: None,
        tags: Vec::new(),
        column_id: None,
    }
}

#[fixture]
fn seeded() -> Rig {
    let rig = Rig::new(
        InMemoryRemote::new()
            .with_member(
                &WorkspaceId::new("ws-int"),
                WorkspaceMember {
                    id: UserId::new("user-9"),
                    name: String::new(),
                    email: "ops@example.com".to_owned(),
                },
            )
            .with_board(Board {
                id: KanbanId::new("ops"),
                columns: vec![
                    BoardColumn {
                        id: ColumnId::new("backlog"),
                        title: "Backlog".to_owned(),
                    },
                    BoardColumn {
                        id: ColumnId::new("progress"),
                        title: "In progress".to_owned(),
                    },
                ],
            }),
    );
    rig.remote.seed_task(record(&rig.workspace_id));
    rig
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirmed_delete_removes_task(seeded: Rig) -> Result<(), eyre::Report> {
    let mut form = seeded.open(OpenRequest::editing(ExistingEntity::Task(record(
        &seeded.workspace_id,
    ))))?;

    let prompt = form.request_delete()?;
    eyre::ensure!(
        prompt.message() == "Delete \"Renew certificates\"? This cannot be undone.",
        "unexpected prompt {}",
        prompt.message()
    );
    form.confirm_delete(prompt).await?;

    eyre::ensure!(
        seeded.remote.task(&TaskId::new("task-7")).is_none(),
        "task should be gone"
    );
    eyre::ensure!(!form.is_open(), "form should close after delete");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_delete_keeps_form_open(seeded: Rig) -> Result<(), eyre::Report> {
    seeded.remote.fail_on(RemoteOperation::TaskDelete);
    let mut form = seeded.open(OpenRequest::editing(ExistingEntity::Task(record(
        &seeded.workspace_id,
    ))))?;
    let prompt = form.request_delete()?;

    let result = form.confirm_delete(prompt).await;

    eyre::ensure!(
        matches!(
            result,
            Err(ComposerError::Submission(SubmissionError::Delete(_)))
        ),
        "expected a delete failure, got {result:?}"
    );
    eyre::ensure!(form.is_open(), "form should stay open");
    eyre::ensure!(form.last_failure().is_some(), "failure should be exposed");
    eyre::ensure!(
        matches!(
            seeded.diagnostics.entries().as_slice(),
            [Diagnostic::DeleteFailed { .. }]
        ),
        "expected a delete diagnostic"
    );
    eyre::ensure!(
        seeded.remote.task(&TaskId::new("task-7")).is_some(),
        "task should survive a failed delete"
    );
    Ok(())
}

#[rstest]
fn switching_an_edited_task_to_event_disables_delete(seeded: Rig) -> Result<(), eyre::Report> {
    let mut form = seeded.open(OpenRequest::editing(ExistingEntity::Task(record(
        &seeded.workspace_id,
    ))))?;
    form.set_mode(EntityKind::Event);

    eyre::ensure!(
        matches!(form.request_delete(), Err(ComposerError::NotEditingTask)),
        "delete must need a task draft"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn choices_come_from_directory_and_board(seeded: Rig) -> Result<(), eyre::Report> {
    let mut form = seeded.open(
        OpenRequest::new(EntityKind::Task).with_kanban(KanbanId::new("ops")),
    )?;

    form.load_choices().await?;

    let titles: Vec<&str> = form.columns().iter().map(|c| c.title.as_str()).collect();
    eyre::ensure!(titles == ["Backlog", "In progress"], "columns {titles:?}");
    let initials: Vec<String> = form.members().iter().map(WorkspaceMember::initials).collect();
    eyre::ensure!(initials == ["OP"], "initials {initials:?}");

    form.set_column(Some(ColumnId::new("progress")))?;
    let status = form.draft().as_task().map(|task| task.status);
    eyre::ensure!(status == Some(TaskStatus::InProgress), "status {status:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_board_fails_lookup(rig: Rig) {
    let mut form = rig
        .open(OpenRequest::new(EntityKind::Task).with_kanban(KanbanId::new("missing")))
        .expect("form opens");

    let result = form.load_choices().await;

    assert!(matches!(result, Err(ComposerError::Lookup(_))));
    assert_eq!(
        rig.remote.calls(),
        vec![RemoteOperation::WorkspaceListUsers, RemoteOperation::KanbanGet]
    );
}
