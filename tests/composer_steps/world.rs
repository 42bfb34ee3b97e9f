//! Shared world state for composer BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use composer::{
    config::ComposerConfig,
    form::{
        adapters::{
            diagnostics::RecordingDiagnostics,
            memory::{InMemoryKeyListenerRegistry, InMemoryRemote, RemoteOperation},
        },
        domain::{SessionContext, SuggestionRule, WorkspaceId},
        ports::RemoteApis,
        services::{ComposerDeps, ComposerError, ComposerForm, SubmitOutcome},
    },
};
use mockable::Clock;
use rstest::fixture;

/// Clock pinned to the instant a scenario sets.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioClock(DateTime<Local>);

impl Clock for ScenarioClock {
    fn local(&self) -> DateTime<Local> {
        self.0
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }
}

/// Scenario world for composer behaviour tests.
pub struct ComposerWorld {
    pub remote: Arc<InMemoryRemote>,
    pub diagnostics: Arc<RecordingDiagnostics>,
    pub keys: Arc<InMemoryKeyListenerRegistry>,
    pub now: Option<NaiveDateTime>,
    pub form: Option<ComposerForm<ScenarioClock>>,
    pub last_submit: Option<Result<SubmitOutcome, ComposerError>>,
}

impl ComposerWorld {
    /// Creates a world with an empty remote and no open form.
    #[must_use]
    pub fn new() -> Self {
        Self {
            remote: Arc::new(InMemoryRemote::new()),
            diagnostics: Arc::new(RecordingDiagnostics::new()),
            keys: Arc::new(InMemoryKeyListenerRegistry::new()),
            now: None,
            form: None,
            last_submit: None,
        }
    }

    /// Builds form collaborators around the scenario clock.
    ///
    /// # Errors
    ///
    /// Returns an error when no time was set or it does not exist locally.
    pub fn deps(&self) -> Result<ComposerDeps<ScenarioClock>, eyre::Report> {
        let naive = self
            .now
            .ok_or_else(|| eyre::eyre!("scenario must set the current time first"))?;
        let local = Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| eyre::eyre!("{naive} does not exist in the local timezone"))?;
        Ok(ComposerDeps {
            config: ComposerConfig::default(),
            clock: Arc::new(ScenarioClock(local)),
            session: SessionContext::new(WorkspaceId::new("ws-bdd")),
            remote: RemoteApis::shared(Arc::clone(&self.remote)),
            diagnostics: self.diagnostics.clone(),
            keys: self.keys.clone(),
        })
    }

    /// Returns the open form.
    ///
    /// # Errors
    ///
    /// Returns an error when no form was opened.
    pub fn form_mut(&mut self) -> Result<&mut ComposerForm<ScenarioClock>, eyre::Report> {
        self.form
            .as_mut()
            .ok_or_else(|| eyre::eyre!("missing open form in scenario world"))
    }
}

impl Default for ComposerWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ComposerWorld {
    ComposerWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses the `YYYY-MM-DD HH:MM` form used in feature files.
///
/// # Errors
///
/// Returns an error for any other shape.
pub fn parse_time(value: &str) -> Result<NaiveDateTime, eyre::Report> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .map_err(|err| eyre::eyre!("invalid scenario time {value:?}: {err}"))
}

/// Maps a feature-file rule name to its heuristic.
///
/// # Errors
///
/// Returns an error for unknown names.
pub fn parse_rule(name: &str) -> Result<SuggestionRule, eyre::Report> {
    match name {
        "meeting" => Ok(SuggestionRule::Meeting),
        "deadline" => Ok(SuggestionRule::Deadline),
        "urgency" => Ok(SuggestionRule::Urgency),
        "review" => Ok(SuggestionRule::Review),
        "event type" => Ok(SuggestionRule::EventType),
        other => Err(eyre::eyre!("unknown suggestion rule {other:?}")),
    }
}

/// Maps a feature-file operation name to the recorded remote call.
///
/// # Errors
///
/// Returns an error for unknown names.
pub fn parse_operation(name: &str) -> Result<RemoteOperation, eyre::Report> {
    [
        RemoteOperation::TaskCreate,
        RemoteOperation::TaskUpdate,
        RemoteOperation::TaskDelete,
        RemoteOperation::CalendarCreate,
        RemoteOperation::CalendarUpdate,
        RemoteOperation::AttachmentsUpload,
        RemoteOperation::WorkspaceListUsers,
        RemoteOperation::KanbanGet,
    ]
    .into_iter()
    .find(|operation| operation.as_str() == name)
    .ok_or_else(|| eyre::eyre!("unknown remote operation {name:?}"))
}
