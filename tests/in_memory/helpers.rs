//! Shared helpers for in-memory composer integration tests.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use composer::{
    config::ComposerConfig,
    form::{
        adapters::{
            diagnostics::RecordingDiagnostics,
            memory::{InMemoryKeyListenerRegistry, InMemoryRemote},
        },
        domain::{SessionContext, WorkspaceId},
        ports::RemoteApis,
        services::{ComposerDeps, ComposerForm, ComposerResult, OpenRequest},
    },
};
use mockable::Clock;
use rstest::fixture;

/// Clock frozen at one local instant.
#[derive(Debug, Clone, Copy)]
pub struct PinnedClock(DateTime<Local>);

impl PinnedClock {
    /// Pins the clock to a local wall-clock time.
    ///
    /// # Panics
    ///
    /// Panics when the time does not exist in the local timezone.
    pub fn at(naive: NaiveDateTime) -> Self {
        Self(
            Local
                .from_local_datetime(&naive)
                .earliest()
                .expect("pinned instant should exist locally"),
        )
    }
}

impl Clock for PinnedClock {
    fn local(&self) -> DateTime<Local> {
        self.0
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }
}

/// Builds a wall-clock time.
///
/// # Panics
///
/// Panics for an invalid date or time.
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid test time")
}

/// Remote, diagnostics and key registry shared by one test.
pub struct Rig {
    pub remote: Arc<InMemoryRemote>,
    pub diagnostics: Arc<RecordingDiagnostics>,
    pub keys: Arc<InMemoryKeyListenerRegistry>,
    pub config: ComposerConfig,
    pub workspace_id: WorkspaceId,
    pub now: NaiveDateTime,
}

impl Rig {
    /// Wraps `remote` with fresh diagnostics, registry and default config.
    #[must_use]
    pub fn new(remote: InMemoryRemote) -> Self {
        Self {
            remote: Arc::new(remote),
            diagnostics: Arc::new(RecordingDiagnostics::new()),
            keys: Arc::new(InMemoryKeyListenerRegistry::new()),
            config: ComposerConfig::default(),
            workspace_id: WorkspaceId::new("ws-int"),
            now: at(2024, 3, 8, 16, 45),
        }
    }

    /// Builds collaborators for one form.
    #[must_use]
    pub fn deps(&self) -> ComposerDeps<PinnedClock> {
        ComposerDeps {
            config: self.config.clone(),
            clock: Arc::new(PinnedClock::at(self.now)),
            session: SessionContext::new(self.workspace_id.clone()),
            remote: RemoteApis::shared(Arc::clone(&self.remote)),
            diagnostics: self.diagnostics.clone(),
            keys: self.keys.clone(),
        }
    }

    /// Opens a form wired to this rig.
    ///
    /// # Errors
    ///
    /// Returns the composer error when the configuration is rejected.
    pub fn open(&self, request: OpenRequest) -> ComposerResult<ComposerForm<PinnedClock>> {
        ComposerForm::open(request, self.deps())
    }
}

/// Provides a rig around an empty remote.
#[fixture]
pub fn rig() -> Rig {
    Rig::new(InMemoryRemote::new())
}
