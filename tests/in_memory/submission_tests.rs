//! Submission flows against the in-memory remote.

use super::helpers::{Rig, at, rig};
use composer::form::{
    adapters::memory::RemoteOperation,
    domain::{
        AttachmentFile, AttachmentOwner, ColumnId, EntityKind, EntityRef, EventColor, EventId,
        EventRecord, EventType, ExistingEntity, PriorityLevel, TaskStatus,
    },
    ports::Diagnostic,
    services::{ComposerError, OpenRequest, SubmissionError, SubmitPhase},
};
use eyre::{WrapErr, eyre};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_with_files_is_saved_then_uploaded(rig: Rig) -> Result<(), eyre::Report> {
    let mut form = rig
        .open(OpenRequest::new(EntityKind::Task).with_column(ColumnId::new("done")))
        .wrap_err("open task form")?;
    form.set_title("Ship 1.2");
    form.set_description("  Tag and publish  ");
    form.select_priority_ordinal(3)?;
    form.add_files([
        AttachmentFile::new("notes.md", "text/markdown", b"# notes".to_vec()),
        AttachmentFile::new("build.log", "text/plain", b"ok".to_vec()),
    ])?;

    let outcome = form.submit().await.wrap_err("submit task")?;

    let EntityRef::Task(task_id) = outcome.entity else {
        return Err(eyre!("expected a task, got {}", outcome.entity));
    };
    let task = rig
        .remote
        .task(&task_id)
        .ok_or_else(|| eyre!("task not stored"))?;
    eyre::ensure!(task.description == "Tag and publish", "description not trimmed");
    eyre::ensure!(task.priority == PriorityLevel::High, "priority not kept");
    eyre::ensure!(task.status == TaskStatus::Done, "status not derived from column");
    eyre::ensure!(task.workspace_id == rig.workspace_id, "wrong workspace");

    let stored = rig.remote.attachments();
    eyre::ensure!(stored.len() == 2, "expected two uploads, found {}", stored.len());
    eyre::ensure!(
        stored
            .iter()
            .all(|attachment| attachment.owner == AttachmentOwner::Task(task_id.clone())),
        "uploads attached to the wrong owner"
    );
    let contents: Vec<&[u8]> = stored.iter().map(|attachment| attachment.file.bytes()).collect();
    eyre::ensure!(
        contents == vec![b"# notes".as_slice(), b"ok".as_slice()],
        "uploaded contents differ: {contents:?}"
    );
    eyre::ensure!(
        rig.remote.calls()
            == vec![
                RemoteOperation::TaskCreate,
                RemoteOperation::AttachmentsUpload
            ],
        "unexpected call order {:?}",
        rig.remote.calls()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn event_defaults_to_next_full_hour(rig: Rig) -> Result<(), eyre::Report> {
    let mut form = rig.open(OpenRequest::new(EntityKind::Event))?;
    form.set_title("Retro");
    form.set_location("  ")?;

    let outcome = form.submit().await?;

    let EntityRef::Event(event_id) = outcome.entity else {
        return Err(eyre!("expected an event"));
    };
    let event = rig
        .remote
        .event(&event_id)
        .ok_or_else(|| eyre!("event not stored"))?;
    eyre::ensure!(event.start == at(2024, 3, 8, 17, 0), "start {}", event.start);
    eyre::ensure!(event.end == at(2024, 3, 8, 18, 0), "end {}", event.end);
    eyre::ensure!(event.location.is_none(), "blank location should be null");
    eyre::ensure!(event.event_type == EventType::Event, "unexpected type");
    eyre::ensure!(
        rig.remote.call_count(RemoteOperation::AttachmentsUpload) == 0,
        "events never upload"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_event_update_is_reported(rig: Rig) -> Result<(), eyre::Report> {
    let record = EventRecord {
        id: EventId::new("event-gone"),
        workspace_id: rig.workspace_id.clone(),
        title: "Offsite".to_owned(),
        description: String::new(),
        start: at(2024, 3, 20, 9, 0),
        end: at(2024, 3, 20, 17, 0),
        all_day: false,
        location: Some("Lisbon".to_owned()),
        event_type: EventType::Event,
        color: EventColor::Orange,
    };
    let mut form = rig.open(OpenRequest::editing(ExistingEntity::Event(record)))?;

    let result = form.submit().await;

    eyre::ensure!(
        matches!(
            result,
            Err(ComposerError::Submission(SubmissionError::Persist {
                kind: EntityKind::Event,
                ..
            }))
        ),
        "expected a persist failure, got {result:?}"
    );
    eyre::ensure!(form.is_open(), "form should stay open");
    eyre::ensure!(
        matches!(
            rig.diagnostics.entries().as_slice(),
            [Diagnostic::EntityPersistFailed { editing: true, .. }]
        ),
        "expected an editing persist diagnostic"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn phase_returns_to_idle_after_submit(rig: Rig) -> Result<(), eyre::Report> {
    rig.remote.fail_on(RemoteOperation::TaskCreate);
    let mut form = rig.open(OpenRequest::new(EntityKind::Task))?;
    let mut phase = form.subscribe_phase();
    form.set_title("Observe phase");

    let result = form.submit().await;

    eyre::ensure!(result.is_err(), "create should have failed");
    eyre::ensure!(phase.has_changed()?, "phase was never published");
    eyre::ensure!(
        *phase.borrow_and_update() == SubmitPhase::Idle,
        "phase should settle on idle"
    );
    eyre::ensure!(form.can_submit(), "submit should be enabled again");
    Ok(())
}

#[rstest]
fn monday_week_start_comes_from_json(mut rig: Rig) -> Result<(), eyre::Report> {
    rig.config = composer::config::ComposerConfig::from_json(r#"{ "week_start": "monday" }"#)?;
    let form = rig.open(OpenRequest::new(EntityKind::Task))?;

    let grid = form.month_grid();

    eyre::ensure!(grid.title() == "Mar 2024", "unexpected title {}", grid.title());
    // 1 March 2024 is a Friday.
    eyre::ensure!(grid.leading_padding() == 4, "padding {}", grid.leading_padding());
    Ok(())
}

#[rstest]
fn invalid_config_is_rejected_on_open(mut rig: Rig) {
    rig.config.calendar_day_start_hour = 30;
    assert!(matches!(
        rig.open(OpenRequest::new(EntityKind::Task)),
        Err(ComposerError::Config(_))
    ));
    assert_eq!(rig.keys.active_count(), 0);
}
