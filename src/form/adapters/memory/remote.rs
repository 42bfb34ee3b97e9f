//! In-memory remote data client for tests and demos.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::form::{
    domain::{
        AttachmentFile, AttachmentId, AttachmentOwner, EventId, EventRecord, KanbanId, TaskId,
        TaskRecord, WorkspaceId,
    },
    ports::{
        AttachmentApi, Board, CalendarApi, DirectoryApi, EventPayload, RemoteError, RemoteResult,
        TaskApi, TaskPayload, UploadRequest, UploadedAttachment, WorkspaceMember,
    },
};

/// Named remote operations, as recorded in the call log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    /// `task.create`
    TaskCreate,
    /// `task.update`
    TaskUpdate,
    /// `task.delete`
    TaskDelete,
    /// `calendar.create`
    CalendarCreate,
    /// `calendar.update`
    CalendarUpdate,
    /// `attachments.upload`
    AttachmentsUpload,
    /// `workspace.listUsers`
    WorkspaceListUsers,
    /// `kanban.get`
    KanbanGet,
}

impl RemoteOperation {
    /// Returns the operation name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskCreate => "task.create",
            Self::TaskUpdate => "task.update",
            Self::TaskDelete => "task.delete",
            Self::CalendarCreate => "calendar.create",
            Self::CalendarUpdate => "calendar.update",
            Self::AttachmentsUpload => "attachments.upload",
            Self::WorkspaceListUsers => "workspace.listUsers",
            Self::KanbanGet => "kanban.get",
        }
    }
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file accepted by `attachments.upload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAttachment {
    /// Assigned identifier.
    pub id: AttachmentId,
    /// Owning entity.
    pub owner: AttachmentOwner,
    /// Uploaded file.
    pub file: AttachmentFile,
}

/// Thread-safe in-memory implementation of every remote port.
///
/// Each call is appended to a log before it runs. Operations registered with
/// [`InMemoryRemote::fail_on`] reject until [`InMemoryRemote::clear_failures`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryRemote {
    state: Arc<RwLock<RemoteState>>,
}

#[derive(Debug, Default)]
struct RemoteState {
    tasks: HashMap<TaskId, TaskRecord>,
    events: HashMap<EventId, EventRecord>,
    attachments: Vec<StoredAttachment>,
    members: HashMap<WorkspaceId, Vec<WorkspaceMember>>,
    boards: HashMap<KanbanId, Board>,
    calls: Vec<RemoteOperation>,
    failures: HashSet<RemoteOperation>,
    sequence: u64,
}

impl RemoteState {
    fn begin(&mut self, operation: RemoteOperation) -> RemoteResult<()> {
        self.calls.push(operation);
        if self.failures.contains(&operation) {
            return Err(RemoteError::Rejected {
                operation: operation.as_str(),
                reason: "injected failure".to_owned(),
            });
        }
        Ok(())
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.sequence = self.sequence.saturating_add(1);
        format!("{prefix}-{}", self.sequence)
    }
}

fn lock_error(err: impl fmt::Display) -> RemoteError {
    RemoteError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryRemote {
    /// Creates an empty remote.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member to a workspace directory.
    #[must_use]
    pub fn with_member(self, workspace_id: &WorkspaceId, member: WorkspaceMember) -> Self {
        if let Ok(mut state) = self.state.write() {
            state
                .members
                .entry(workspace_id.clone())
                .or_default()
                .push(member);
        }
        self
    }

    /// Adds a kanban board.
    #[must_use]
    pub fn with_board(self, board: Board) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.boards.insert(board.id.clone(), board);
        }
        self
    }

    /// Stores an existing task so it can be updated or deleted.
    pub fn seed_task(&self, record: TaskRecord) {
        if let Ok(mut state) = self.state.write() {
            state.tasks.insert(record.id.clone(), record);
        }
    }

    /// Stores an existing event so it can be updated.
    pub fn seed_event(&self, record: EventRecord) {
        if let Ok(mut state) = self.state.write() {
            state.events.insert(record.id.clone(), record);
        }
    }

    /// Makes `operation` reject from now on.
    pub fn fail_on(&self, operation: RemoteOperation) {
        if let Ok(mut state) = self.state.write() {
            state.failures.insert(operation);
        }
    }

    /// Removes every injected failure.
    pub fn clear_failures(&self) {
        if let Ok(mut state) = self.state.write() {
            state.failures.clear();
        }
    }

    /// Returns every call issued so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RemoteOperation> {
        self.read_with(|state| state.calls.clone())
    }

    /// Returns how many times `operation` was called.
    #[must_use]
    pub fn call_count(&self, operation: RemoteOperation) -> usize {
        self.read_with(|state| state.calls.iter().filter(|call| **call == operation).count())
    }

    /// Returns a stored task.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<TaskRecord> {
        self.read_with(|state| state.tasks.get(id).cloned())
    }

    /// Returns every stored task.
    #[must_use]
    pub fn tasks(&self) -> Vec<TaskRecord> {
        self.read_with(|state| state.tasks.values().cloned().collect())
    }

    /// Returns a stored event.
    #[must_use]
    pub fn event(&self, id: &EventId) -> Option<EventRecord> {
        self.read_with(|state| state.events.get(id).cloned())
    }

    /// Returns every stored event.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        self.read_with(|state| state.events.values().cloned().collect())
    }

    /// Returns every uploaded file, in upload order.
    #[must_use]
    pub fn attachments(&self) -> Vec<StoredAttachment> {
        self.read_with(|state| state.attachments.clone())
    }

    fn read_with<T: Default>(&self, read: impl FnOnce(&RemoteState) -> T) -> T {
        self.state
            .read()
            .map(|state| read(&state))
            .unwrap_or_default()
    }

    fn read(&self) -> RemoteResult<RwLockReadGuard<'_, RemoteState>> {
        self.state.read().map_err(lock_error)
    }

    fn write(&self) -> RemoteResult<RwLockWriteGuard<'_, RemoteState>> {
        self.state.write().map_err(lock_error)
    }
}

fn task_record(id: TaskId, payload: &TaskPayload) -> TaskRecord {
    TaskRecord {
        id,
        workspace_id: payload.workspace_id.clone(),
        title: payload.title.clone(),
        description: payload.description.clone(),
        priority: payload.priority,
        status: payload.status,
        due_date: payload.due_date,
        assignee_id: payload.assignee_id.clone(),
        tags: payload.tags.clone(),
        column_id: payload.column_id.clone(),
    }
}

fn event_record(id: EventId, payload: &EventPayload) -> EventRecord {
    EventRecord {
        id,
        workspace_id: payload.workspace_id.clone(),
        title: payload.title.clone(),
        description: payload.description.clone(),
        start: payload.start,
        end: payload.end,
        all_day: payload.all_day,
        location: payload.location.clone(),
        event_type: payload.event_type,
        color: payload.color,
    }
}

#[async_trait]
impl TaskApi for InMemoryRemote {
    async fn create(&self, payload: &TaskPayload) -> RemoteResult<TaskRecord> {
        let mut state = self.write()?;
        state.begin(RemoteOperation::TaskCreate)?;
        let id = TaskId::new(state.next_id("task"));
        let record = task_record(id.clone(), payload);
        state.tasks.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: &TaskId, payload: &TaskPayload) -> RemoteResult<TaskRecord> {
        let mut state = self.write()?;
        state.begin(RemoteOperation::TaskUpdate)?;
        if !state.tasks.contains_key(id) {
            return Err(RemoteError::NotFound(format!("task {id}")));
        }
        let record = task_record(id.clone(), payload);
        state.tasks.insert(id.clone(), record.clone());
        Ok(record)
    }

    async fn delete(&self, id: &TaskId) -> RemoteResult<()> {
        let mut state = self.write()?;
        state.begin(RemoteOperation::TaskDelete)?;
        state
            .tasks
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RemoteError::NotFound(format!("task {id}")))
    }
}

#[async_trait]
impl CalendarApi for InMemoryRemote {
    async fn create(&self, payload: &EventPayload) -> RemoteResult<EventRecord> {
        let mut state = self.write()?;
        state.begin(RemoteOperation::CalendarCreate)?;
        let id = EventId::new(state.next_id("event"));
        let record = event_record(id.clone(), payload);
        state.events.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: &EventId, payload: &EventPayload) -> RemoteResult<EventRecord> {
        let mut state = self.write()?;
        state.begin(RemoteOperation::CalendarUpdate)?;
        if !state.events.contains_key(id) {
            return Err(RemoteError::NotFound(format!("event {id}")));
        }
        let record = event_record(id.clone(), payload);
        state.events.insert(id.clone(), record.clone());
        Ok(record)
    }
}

#[async_trait]
impl AttachmentApi for InMemoryRemote {
    async fn upload(&self, request: &UploadRequest) -> RemoteResult<Vec<UploadedAttachment>> {
        let mut state = self.write()?;
        state.begin(RemoteOperation::AttachmentsUpload)?;
        let AttachmentOwner::Task(task_id) = &request.owner;
        if !state.tasks.contains_key(task_id) {
            return Err(RemoteError::NotFound(format!("task {task_id}")));
        }
        let mut uploaded = Vec::with_capacity(request.files.len());
        for file in &request.files {
            let id = AttachmentId::new(state.next_id("attachment"));
            uploaded.push(UploadedAttachment {
                id: id.clone(),
                name: file.name().to_owned(),
            });
            state.attachments.push(StoredAttachment {
                id,
                owner: request.owner.clone(),
                file: file.clone(),
            });
        }
        Ok(uploaded)
    }
}

#[async_trait]
impl DirectoryApi for InMemoryRemote {
    async fn list_users(&self, workspace_id: &WorkspaceId) -> RemoteResult<Vec<WorkspaceMember>> {
        self.write()?.begin(RemoteOperation::WorkspaceListUsers)?;
        let state = self.read()?;
        Ok(state.members.get(workspace_id).cloned().unwrap_or_default())
    }

    async fn get_board(&self, kanban_id: &KanbanId) -> RemoteResult<Board> {
        self.write()?.begin(RemoteOperation::KanbanGet)?;
        let state = self.read()?;
        state
            .boards
            .get(kanban_id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(format!("board {kanban_id}")))
    }
}
