//! The composer form: mode control, draft setters and submission.

use crate::config::{ComposerConfig, ConfigError};
use crate::form::{
    domain::{
        AttachmentFile, CalendarCursor, ColumnId, Draft, EntityKind, EntityRef, EventColor,
        EventDraft, EventType, EventWindow, ExistingEntity, FormDomainError, FormSnapshot,
        KanbanId, KeyAction, KeyPress, LocalAttachmentId, ModeSeed, MonthGrid, PendingAttachment,
        PriorityGauge, PriorityLevel, QuickPick, SessionContext, SuggestedMutation,
        SuggestionMessage, TaskDraft, TaskId, TaskStatus, UserId, keys,
    },
    ports::{
        BoardColumn, Diagnostics, DirectoryApi, KeyListenerRegistry, ListenerHandle, RemoteApis,
        RemoteError, WorkspaceMember,
    },
    services::{
        AttachmentStager, ConfirmedDeletion, KeyboardScope, PersistenceCoordinator,
        SubmissionError, SubmitMode, SubmitOutcome, SubmitPhase, SuggestionEngine,
    },
};
use chrono::{NaiveDate, NaiveDateTime};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

/// Errors returned by [`ComposerForm`].
#[derive(Debug, Error)]
pub enum ComposerError {
    /// The title is blank, so there is nothing to submit.
    #[error("title is required")]
    EmptyTitle,

    /// A submission is already in flight.
    #[error("a submission is in progress")]
    Busy,

    /// The form has been closed.
    #[error("form is closed")]
    Closed,

    /// The operation does not apply to the active draft kind.
    #[error("not available in {} mode", .0.as_str())]
    WrongMode(EntityKind),

    /// Delete was requested for something other than an existing task.
    #[error("only an existing task can be deleted")]
    NotEditingTask,

    /// No suggestion exists at the given position.
    #[error("no suggestion at index {0}")]
    UnknownSuggestion(usize),

    /// A draft value was rejected.
    #[error(transparent)]
    Domain(#[from] FormDomainError),

    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Assignee or column choices could not be loaded.
    #[error("failed to load choices: {0}")]
    Lookup(#[from] RemoteError),

    /// Submit or delete failed.
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// Result type for [`ComposerForm`] operations.
pub type ComposerResult<T> = Result<T, ComposerError>;

/// How the host opens the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenRequest {
    mode: EntityKind,
    existing: Option<ExistingEntity>,
    column_id: Option<ColumnId>,
    kanban_id: Option<KanbanId>,
    selected_date: Option<NaiveDate>,
}

impl OpenRequest {
    /// Opens a blank draft of `mode`.
    #[must_use]
    pub fn new(mode: EntityKind) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Edits an existing entity. The entity's kind becomes the mode.
    #[must_use]
    pub fn editing(existing: ExistingEntity) -> Self {
        let mode = match &existing {
            ExistingEntity::Task(_) => EntityKind::Task,
            ExistingEntity::Event(_) => EntityKind::Event,
        };
        Self {
            mode,
            existing: Some(existing),
            ..Self::default()
        }
    }

    /// Sets the board column the form was opened from.
    #[must_use]
    pub fn with_column(mut self, column_id: ColumnId) -> Self {
        self.column_id = Some(column_id);
        self
    }

    /// Sets the board whose columns are offered.
    #[must_use]
    pub fn with_kanban(mut self, kanban_id: KanbanId) -> Self {
        self.kanban_id = Some(kanban_id);
        self
    }

    /// Sets the calendar day the form was opened from.
    #[must_use]
    pub const fn with_selected_date(mut self, date: NaiveDate) -> Self {
        self.selected_date = Some(date);
        self
    }
}

/// Collaborators injected into [`ComposerForm::open`].
pub struct ComposerDeps<C> {
    /// Form tunables.
    pub config: ComposerConfig,
    /// Source of the evaluation instant.
    pub clock: Arc<C>,
    /// Current workspace.
    pub session: SessionContext,
    /// Remote data client.
    pub remote: RemoteApis,
    /// Diagnostic channel.
    pub diagnostics: Arc<dyn Diagnostics>,
    /// Host key listener registry.
    pub keys: Arc<dyn KeyListenerRegistry>,
}

impl<C> Clone for ComposerDeps<C> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            clock: Arc::clone(&self.clock),
            session: self.session.clone(),
            remote: self.remote.clone(),
            diagnostics: Arc::clone(&self.diagnostics),
            keys: Arc::clone(&self.keys),
        }
    }
}

/// A shown delete confirmation. Pass it to
/// [`ComposerForm::confirm_delete`] once the user agrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    task_id: TaskId,
    message: String,
}

impl DeletePrompt {
    /// Returns the task that would be deleted.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the confirmation text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One open task/event creation form.
///
/// The form owns its draft, the staged files and the key listener. Every
/// title or mode change re-runs the suggestion heuristics and applies the
/// suggestions the policy table marks as auto-applying. Everything else only
/// changes on an explicit call.
pub struct ComposerForm<C>
where
    C: Clock + Send + Sync,
{
    config: ComposerConfig,
    clock: Arc<C>,
    session: SessionContext,
    engine: SuggestionEngine,
    coordinator: PersistenceCoordinator,
    directory: Arc<dyn DirectoryApi>,
    stager: AttachmentStager,
    draft: Draft,
    submit_mode: SubmitMode,
    column_id: Option<ColumnId>,
    kanban_id: Option<KanbanId>,
    selected_date: Option<NaiveDate>,
    cursor: CalendarCursor,
    suggestions: Vec<SuggestionMessage>,
    members: Vec<WorkspaceMember>,
    columns: Vec<BoardColumn>,
    last_failure: Option<SubmissionError>,
    keyboard: Option<KeyboardScope>,
}

impl<C> ComposerForm<C>
where
    C: Clock + Send + Sync,
{
    /// Opens the form and attaches its key listener.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::Config`] when the configuration is invalid.
    pub fn open(request: OpenRequest, deps: ComposerDeps<C>) -> ComposerResult<Self> {
        deps.config.validate()?;
        let engine = SuggestionEngine::new(&deps.config)?;
        let coordinator = PersistenceCoordinator::new(
            deps.session.clone(),
            deps.remote.clone(),
            Arc::clone(&deps.diagnostics),
        );
        let OpenRequest {
            mode,
            existing,
            column_id,
            kanban_id,
            selected_date,
        } = request;

        let mut form = Self {
            engine,
            coordinator,
            directory: Arc::clone(&deps.remote.directory),
            stager: AttachmentStager::new(Arc::clone(&deps.remote.attachments)),
            draft: Draft::Task(TaskDraft::new(String::new(), String::new(), None)),
            submit_mode: SubmitMode::Create,
            column_id,
            kanban_id,
            selected_date,
            cursor: CalendarCursor::new(selected_date.unwrap_or_default()),
            suggestions: Vec::new(),
            members: Vec::new(),
            columns: Vec::new(),
            last_failure: None,
            keyboard: Some(KeyboardScope::attach(deps.keys)),
            config: deps.config,
            clock: deps.clock,
            session: deps.session,
        };

        if let Some(entity) = &existing {
            form.submit_mode = SubmitMode::Update(entity.entity_ref());
        }
        form.draft = match &existing {
            Some(ExistingEntity::Task(record)) => Draft::Task(TaskDraft::from_record(record)),
            Some(ExistingEntity::Event(record)) => Draft::Event(EventDraft::from_record(record)),
            None => form.fresh_draft(mode),
        };
        let focus = form
            .selected_day()
            .or(form.selected_date)
            .unwrap_or_else(|| form.now().date());
        form.cursor = CalendarCursor::new(focus);

        debug!(
            mode = form.draft.kind().as_str(),
            editing = form.is_editing(),
            "composer opened"
        );
        Ok(form)
    }

    /// Returns whether the form is still open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.keyboard.is_some()
    }

    /// Returns the attached key listener while the form is open.
    #[must_use]
    pub fn key_listener(&self) -> Option<ListenerHandle> {
        self.keyboard.as_ref().map(KeyboardScope::handle)
    }

    /// Returns the draft.
    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Returns whether submit updates an existing entity.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.submit_mode, SubmitMode::Update(_))
    }

    /// Returns the active entity kind.
    #[must_use]
    pub const fn current_mode(&self) -> EntityKind {
        self.draft.kind()
    }

    /// Switches the draft kind on explicit user action.
    ///
    /// Title and description survive. Kind-specific fields, including staged
    /// files when leaving task mode, are reset to mode defaults.
    pub fn set_mode(&mut self, kind: EntityKind) {
        self.switch_mode(kind);
        self.refresh_suggestions();
    }

    /// Replaces the title and re-runs the heuristics.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.set_title(title.into());
        self.refresh_suggestions();
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.set_description(description.into());
    }

    /// Returns the current suggestions, most recent analysis only.
    #[must_use]
    pub fn suggestions(&self) -> &[SuggestionMessage] {
        &self.suggestions
    }

    /// Applies the change proposed by the suggestion at `index`.
    ///
    /// Returns the applied change, or `None` for advisory messages.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::UnknownSuggestion`] for an out-of-range index.
    pub fn accept_suggestion(&mut self, index: usize) -> ComposerResult<Option<SuggestedMutation>> {
        let mutation = self
            .suggestions
            .get(index)
            .ok_or(ComposerError::UnknownSuggestion(index))?
            .mutation()
            .copied();
        if let Some(change) = mutation {
            self.apply_mutation(change);
            self.refresh_suggestions();
        }
        Ok(mutation)
    }

    /// Sets the task priority. Once chosen here, title heuristics no longer
    /// raise it.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::WrongMode`] in event mode.
    pub fn set_priority(&mut self, priority: PriorityLevel) -> ComposerResult<()> {
        self.task_mut()?.choose_priority(priority);
        Ok(())
    }

    /// Sets the task priority from a gauge ordinal (1 = low, 4 = critical).
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::Domain`] for an unknown ordinal and
    /// [`ComposerError::WrongMode`] in event mode.
    pub fn select_priority_ordinal(&mut self, ordinal: u8) -> ComposerResult<PriorityLevel> {
        let level = PriorityGauge::level(ordinal)?;
        self.set_priority(level)?;
        Ok(level)
    }

    /// Sets the task due date.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::WrongMode`] in event mode, where start and end
    /// are edited directly.
    pub fn select_date(&mut self, date: NaiveDate) -> ComposerResult<()> {
        self.task_mut()?.due_date = Some(date);
        self.refresh_suggestions();
        Ok(())
    }

    /// Clears the task due date.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::WrongMode`] in event mode.
    pub fn clear_due_date(&mut self) -> ComposerResult<()> {
        self.task_mut()?.due_date = None;
        self.refresh_suggestions();
        Ok(())
    }

    /// Sets the due date from a quick pick evaluated now and shows its month.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::WrongMode`] in event mode.
    pub fn apply_quick_pick(&mut self, pick: QuickPick) -> ComposerResult<NaiveDate> {
        let date = self.resolve_quick_pick(pick);
        self.select_date(date)?;
        self.cursor = CalendarCursor::new(date);
        Ok(date)
    }

    /// Returns whether the due date equals `pick` evaluated now.
    #[must_use]
    pub fn is_active_quick_pick(&self, pick: QuickPick) -> bool {
        let due_date = self.draft.as_task().and_then(|task| task.due_date);
        due_date == Some(self.resolve_quick_pick(pick))
    }

    /// Shows the previous month.
    pub fn previous_month(&mut self) {
        self.cursor.previous_month();
    }

    /// Shows the next month.
    pub fn next_month(&mut self) {
        self.cursor.next_month();
    }

    /// Builds the day grid for the shown month.
    #[must_use]
    pub fn month_grid(&self) -> MonthGrid {
        self.cursor
            .grid(self.config.week_start, self.now().date(), self.selected_day())
    }

    /// Sets or clears the assignee.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::WrongMode`] in event mode.
    pub fn set_assignee(&mut self, assignee: Option<UserId>) -> ComposerResult<()> {
        self.task_mut()?.assignee_id = assignee;
        Ok(())
    }

    /// Assigns the first loaded workspace member, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::WrongMode`] in event mode.
    pub fn assign_first_member(&mut self) -> ComposerResult<Option<UserId>> {
        let first = self.members.first().map(|member| member.id.clone());
        self.set_assignee(first.clone())?;
        Ok(first)
    }

    /// Replaces the tags from comma-separated text.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::WrongMode`] in event mode.
    pub fn set_tags_text(&mut self, text: &str) -> ComposerResult<()> {
        self.task_mut()?.tags = text
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned)
            .collect();
        Ok(())
    }

    /// Renders the tags as comma-separated text.
    #[must_use]
    pub fn tags_text(&self) -> String {
        self.draft
            .as_task()
            .map(|task| task.tags.join(", "))
            .unwrap_or_default()
    }

    /// Moves the task to another board column and derives its status.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::WrongMode`] in event mode.
    pub fn set_column(&mut self, column_id: Option<ColumnId>) -> ComposerResult<()> {
        let task = self.task_mut()?;
        task.status = TaskStatus::from_column(column_id.as_ref());
        task.column_id = column_id;
        Ok(())
    }

    /// Moves the event start, keeping its length.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::WrongMode`] in task mode.
    pub fn set_event_start(&mut self, start: NaiveDateTime) -> ComposerResult<()> {
        let event = self.event_mut()?;
        event.set_window(event.window().with_start(start));
        self.refresh_suggestions();
        Ok(())
    }

    /// Sets the event end.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::Domain`] when a timed event would end before
    /// it starts and [`ComposerError::WrongMode`] in task mode.
    pub fn set_event_end(&mut self, end: NaiveDateTime) -> ComposerResult<()> {
        let event = self.event_mut()?;
        let window = event.window().with_end(end)?;
        event.set_window(window);
        self.refresh_suggestions();
        Ok(())
    }

    /// Toggles the all-day flag.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::WrongMode`] in task mode.
    pub fn set_all_day(&mut self, all_day: bool) -> ComposerResult<()> {
        let event = self.event_mut()?;
        event.set_window(event.window().with_all_day(all_day));
        self.refresh_suggestions();
        Ok(())
    }

    /// Sets the event location. Blank text clears it.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::WrongMode`] in task mode.
    pub fn set_location(&mut self, location: impl Into<String>) -> ComposerResult<()> {
        let value = location.into();
        self.event_mut()?.location = (!value.trim().is_empty()).then_some(value);
        Ok(())
    }

    /// Sets the event category.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::WrongMode`] in task mode.
    pub fn set_event_type(&mut self, event_type: EventType) -> ComposerResult<()> {
        self.event_mut()?.event_type = event_type;
        self.refresh_suggestions();
        Ok(())
    }

    /// Sets the event colour.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::WrongMode`] in task mode.
    pub fn set_event_color(&mut self, color: EventColor) -> ComposerResult<()> {
        self.event_mut()?.color = color;
        Ok(())
    }

    /// Stages files for upload after the task is saved.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::WrongMode`] in event mode.
    pub fn add_files(
        &mut self,
        files: impl IntoIterator<Item = AttachmentFile>,
    ) -> ComposerResult<Vec<LocalAttachmentId>> {
        self.task_mut()?;
        Ok(self.stager.add(files))
    }

    /// Unstages one file. Returns whether it was staged.
    pub fn remove_file(&mut self, local_id: LocalAttachmentId) -> bool {
        self.stager.remove(local_id)
    }

    /// Returns the staged files.
    #[must_use]
    pub fn pending_files(&self) -> &[PendingAttachment] {
        self.stager.pending()
    }

    /// Loads assignee choices and, when a board is known, column choices.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::Lookup`] when a lookup rejects.
    pub async fn load_choices(&mut self) -> ComposerResult<()> {
        self.members = self
            .directory
            .list_users(self.session.workspace_id())
            .await?;
        if let Some(kanban_id) = &self.kanban_id {
            self.columns = self.directory.get_board(kanban_id).await?.columns;
        }
        Ok(())
    }

    /// Returns the loaded assignee choices.
    #[must_use]
    pub fn members(&self) -> &[WorkspaceMember] {
        &self.members
    }

    /// Returns the loaded column choices.
    #[must_use]
    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    /// Returns the submission phase.
    #[must_use]
    pub fn phase(&self) -> SubmitPhase {
        self.coordinator.phase()
    }

    /// Subscribes to submission phase changes.
    #[must_use]
    pub fn subscribe_phase(&self) -> watch::Receiver<SubmitPhase> {
        self.coordinator.subscribe()
    }

    /// Returns the failure of the last submit or delete, if it failed.
    #[must_use]
    pub const fn last_failure(&self) -> Option<&SubmissionError> {
        self.last_failure.as_ref()
    }

    /// Returns whether submit is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_open() && !self.draft.title().trim().is_empty() && !self.phase().is_busy()
    }

    /// Saves the draft, uploads staged files and closes the form.
    ///
    /// Once started, a submission runs to completion; the form cannot be
    /// closed while it is in flight.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::EmptyTitle`], [`ComposerError::Closed`] or
    /// [`ComposerError::Busy`] without issuing any call, and
    /// [`ComposerError::Submission`] when the entity call rejects. The form
    /// stays open on failure.
    pub async fn submit(&mut self) -> ComposerResult<SubmitOutcome> {
        self.ensure_open()?;
        if self.draft.title().trim().is_empty() {
            return Err(ComposerError::EmptyTitle);
        }
        if self.phase().is_busy() {
            return Err(ComposerError::Busy);
        }
        match self
            .coordinator
            .submit(&self.draft, &mut self.stager, &self.submit_mode)
            .await
        {
            Ok(outcome) => {
                self.last_failure = None;
                self.close();
                Ok(outcome)
            }
            Err(err) => {
                self.last_failure = Some(err.clone());
                Err(err.into())
            }
        }
    }

    /// Starts the delete confirmation for the task being edited.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::NotEditingTask`] unless an existing task is
    /// open, and [`ComposerError::Closed`] after close.
    pub fn request_delete(&self) -> ComposerResult<DeletePrompt> {
        self.ensure_open()?;
        match (&self.submit_mode, &self.draft) {
            (SubmitMode::Update(EntityRef::Task(id)), Draft::Task(task)) => Ok(DeletePrompt {
                task_id: id.clone(),
                message: format!("Delete \"{}\"? This cannot be undone.", task.title.trim()),
            }),
            _ => Err(ComposerError::NotEditingTask),
        }
    }

    /// Deletes the task after the user confirmed `prompt`, then closes.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::Submission`] when the delete call rejects;
    /// the form stays open.
    pub async fn confirm_delete(&mut self, prompt: DeletePrompt) -> ComposerResult<()> {
        self.ensure_open()?;
        let deletion = ConfirmedDeletion::new(prompt.task_id);
        match self.coordinator.delete_task(deletion).await {
            Ok(()) => {
                self.last_failure = None;
                self.close();
                Ok(())
            }
            Err(err) => {
                self.last_failure = Some(err.clone());
                Err(err.into())
            }
        }
    }

    /// Handles a key press from the attached listener.
    ///
    /// Returns the action taken, if the press was a shortcut.
    ///
    /// # Errors
    ///
    /// Returns the submit error when Cmd/Ctrl+Enter triggers a failing
    /// submission.
    pub async fn handle_key(&mut self, press: KeyPress) -> ComposerResult<Option<KeyAction>> {
        if !self.is_open() {
            return Ok(None);
        }
        let action = keys::interpret(press, self.can_submit());
        match action {
            Some(KeyAction::Cancel) => self.close(),
            Some(KeyAction::Submit) => {
                self.submit().await?;
            }
            None => {}
        }
        Ok(action)
    }

    /// Closes the form, discarding the draft and staged files and detaching
    /// the key listener. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.keyboard.take().is_none() {
            return;
        }
        self.stager.clear();
        self.suggestions.clear();
        self.draft = self.fresh_draft(self.draft.kind());
        debug!("composer closed");
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.local().naive_local()
    }

    fn resolve_quick_pick(&self, pick: QuickPick) -> NaiveDate {
        pick.resolve(self.now().date(), self.config.next_week_days)
    }

    fn selected_day(&self) -> Option<NaiveDate> {
        match &self.draft {
            Draft::Task(task) => task.due_date,
            Draft::Event(event) => Some(event.window().start().date()),
        }
    }

    fn ensure_open(&self) -> ComposerResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(ComposerError::Closed)
        }
    }

    fn task_mut(&mut self) -> ComposerResult<&mut TaskDraft> {
        self.draft
            .as_task_mut()
            .ok_or(ComposerError::WrongMode(EntityKind::Event))
    }

    fn event_mut(&mut self) -> ComposerResult<&mut EventDraft> {
        self.draft
            .as_event_mut()
            .ok_or(ComposerError::WrongMode(EntityKind::Task))
    }

    fn mode_seed(&self) -> ModeSeed {
        let event_window = self.selected_date.map_or_else(
            || EventWindow::next_full_hour(self.now(), self.config.event_duration()),
            |date| {
                EventWindow::on_day(
                    date,
                    self.config.calendar_day_start_hour,
                    self.config.calendar_day_end_hour,
                )
            },
        );
        ModeSeed {
            column_id: self.column_id.clone(),
            event_window,
        }
    }

    fn fresh_draft(&self, kind: EntityKind) -> Draft {
        let blank = Draft::Task(TaskDraft::new(
            String::new(),
            String::new(),
            self.column_id.clone(),
        ));
        self.seeded(blank.switch_to(kind, &self.mode_seed()))
    }

    /// A window seeded from a clicked calendar day counts as user-chosen.
    fn seeded(&self, mut draft: Draft) -> Draft {
        if self.selected_date.is_none() {
            return draft;
        }
        if let Some(event) = draft.as_event_mut() {
            event.set_window(event.window());
        }
        draft
    }

    fn switch_mode(&mut self, kind: EntityKind) {
        if self.draft.kind() == kind {
            return;
        }
        let seed = self.mode_seed();
        self.draft = self.seeded(self.draft.clone().switch_to(kind, &seed));
        if kind == EntityKind::Event {
            self.stager.clear();
        }
        debug!(mode = kind.as_str(), "mode switched");
    }

    fn snapshot(&self) -> FormSnapshot {
        let task = self.draft.as_task();
        let event = self.draft.as_event();
        FormSnapshot {
            mode: self.draft.kind(),
            due_date: task.and_then(|draft| draft.due_date),
            event_window_untouched: event.is_some_and(EventDraft::is_window_untouched),
            priority_untouched: task.is_some_and(TaskDraft::is_priority_untouched),
            event_type: event.map(|draft| draft.event_type),
            now: self.now(),
        }
    }

    fn refresh_suggestions(&mut self) {
        let messages = self.engine.analyze(self.draft.title(), &self.snapshot());
        let automatic: Vec<SuggestedMutation> = messages
            .iter()
            .filter(|message| message.auto_apply())
            .filter_map(SuggestionMessage::mutation)
            .copied()
            .collect();
        for mutation in automatic {
            self.apply_mutation(mutation);
        }
        self.suggestions = messages;
    }

    fn apply_mutation(&mut self, mutation: SuggestedMutation) {
        match mutation {
            SuggestedMutation::SwitchMode { kind, window } => {
                self.switch_mode(kind);
                if let (Some(proposed), Some(event)) = (window, self.draft.as_event_mut()) {
                    event.align_window(proposed);
                }
            }
            SuggestedMutation::AlignEventWindow(window) => {
                if let Some(event) = self.draft.as_event_mut() {
                    event.align_window(window);
                }
            }
            SuggestedMutation::SetDueDate(date) => {
                if let Some(task) = self.draft.as_task_mut() {
                    task.due_date = Some(date);
                }
            }
            SuggestedMutation::EscalatePriority(level) => {
                if let Some(task) = self.draft.as_task_mut() {
                    task.priority = PriorityGauge::escalate(task.priority, level);
                }
            }
            SuggestedMutation::SetEventType(event_type) => {
                if let Some(event) = self.draft.as_event_mut() {
                    event.event_type = event_type;
                }
            }
        }
    }
}
