//! Shared fixtures for composer unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mockable::Clock;

use crate::config::ComposerConfig;
use crate::form::{
    adapters::{
        diagnostics::RecordingDiagnostics,
        memory::{InMemoryKeyListenerRegistry, InMemoryRemote},
    },
    domain::{SessionContext, WorkspaceId},
    ports::{Diagnostics, KeyListenerRegistry, RemoteApis},
    services::ComposerDeps,
};

/// Clock pinned to one local wall-clock instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Local>,
}

impl FixedClock {
    pub fn at(naive: NaiveDateTime) -> Self {
        let now = Local
            .from_local_datetime(&naive)
            .earliest()
            .expect("fixture instant should exist in the local timezone");
        Self { now }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(year, month, day)
        .and_hms_opt(hour, minute, 0)
        .expect("valid fixture time")
}

/// Wednesday 14 February 2024, 10:30.
pub fn fixture_now() -> NaiveDateTime {
    at(2024, 2, 14, 10, 30)
}

pub fn workspace() -> WorkspaceId {
    WorkspaceId::new("ws-1")
}

/// Collaborators wired to in-memory adapters, with handles kept for
/// assertions.
pub struct Harness {
    pub remote: Arc<InMemoryRemote>,
    pub diagnostics: Arc<RecordingDiagnostics>,
    pub keys: Arc<InMemoryKeyListenerRegistry>,
    pub deps: ComposerDeps<FixedClock>,
}

impl Harness {
    pub fn new(backend: InMemoryRemote) -> Self {
        let remote = Arc::new(backend);
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let keys = Arc::new(InMemoryKeyListenerRegistry::new());
        let diagnostics_port: Arc<dyn Diagnostics> = diagnostics.clone();
        let keys_port: Arc<dyn KeyListenerRegistry> = keys.clone();
        let deps = ComposerDeps {
            config: ComposerConfig::default(),
            clock: Arc::new(FixedClock::at(fixture_now())),
            session: SessionContext::new(workspace()),
            remote: RemoteApis::shared(Arc::clone(&remote)),
            diagnostics: diagnostics_port,
            keys: keys_port,
        };
        Self {
            remote,
            diagnostics,
            keys,
            deps,
        }
    }
}
