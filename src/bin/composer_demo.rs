//! Runs one scripted composer session against the in-memory remote.
//!
//! Usage:
//!
//! ```text
//! composer_demo [--config <config-path>] <title words...>
//! ```
//!
//! The optional JSON file at `config-path` must deserialize into a
//! [`ComposerConfig`]; omitted fields keep their defaults. A representative
//! payload is:
//!
//! ```json
//! {
//!   "event_duration_minutes": 30,
//!   "week_start": "monday",
//!   "keywords": { "urgency": ["urgent", "asap", "p0"] }
//! }
//! ```
//!
//! The session types the title, reports the suggestions, accepts a proposed
//! mode switch, assigns the first workspace member to tasks and submits.
//! Output goes through `tracing`; set `RUST_LOG` to change the filter.

use camino::Utf8PathBuf;
use composer::config::{ComposerConfig, ConfigError};
use composer::form::{
    adapters::{
        diagnostics::TracingDiagnostics,
        memory::{InMemoryKeyListenerRegistry, InMemoryRemote},
    },
    domain::{
        ColumnId, EntityKind, KanbanId, QuickPick, SessionContext, SuggestedMutation, UserId,
        WorkspaceId,
    },
    ports::{Board, BoardColumn, RemoteApis, WorkspaceMember},
    services::{ComposerDeps, ComposerError, ComposerForm, OpenRequest},
};
use mockable::DefaultClock;
use std::env;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const WORKSPACE: &str = "demo-workspace";
const BOARD: &str = "demo-board";

#[derive(Debug, Error)]
enum DemoError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("failed to read config: {0}")]
    ConfigRead(#[source] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error(transparent)]
    Composer(#[from] ComposerError),
}

#[derive(Debug)]
struct DemoArgs {
    config_path: Option<Utf8PathBuf>,
    title: String,
}

fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = parse_args(env::args().skip(1))?;
    let config = load_config(args.config_path.as_ref())?;
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(DemoError::RuntimeInit)?;
    runtime.block_on(run_session(config, &args.title))?;
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<DemoArgs, DemoError> {
    let mut config_path = None;
    let mut words = Vec::new();
    while let Some(arg) = args.next() {
        if arg == "--config" {
            let path = args
                .next()
                .ok_or_else(|| DemoError::InvalidArgs("--config needs a path".to_owned()))?;
            config_path = Some(Utf8PathBuf::from(path));
        } else {
            words.push(arg);
        }
    }
    if words.is_empty() {
        return Err(DemoError::InvalidArgs("missing title".to_owned()));
    }
    Ok(DemoArgs {
        config_path,
        title: words.join(" "),
    })
}

fn load_config(path: Option<&Utf8PathBuf>) -> Result<ComposerConfig, DemoError> {
    let Some(config_path) = path else {
        return Ok(ComposerConfig::default());
    };
    let raw = std::fs::read_to_string(config_path).map_err(DemoError::ConfigRead)?;
    Ok(ComposerConfig::from_json(&raw)?)
}

fn demo_remote(workspace_id: &WorkspaceId) -> InMemoryRemote {
    InMemoryRemote::new()
        .with_member(
            workspace_id,
            WorkspaceMember {
                id: UserId::new("user-ada"),
                name: "Ada Lovelace".to_owned(),
                email: "ada@example.com".to_owned(),
            },
        )
        .with_board(Board {
            id: KanbanId::new(BOARD),
            columns: ["todo", "progress", "review", "done"]
                .into_iter()
                .map(|column| BoardColumn {
                    id: ColumnId::new(column),
                    title: column.to_owned(),
                })
                .collect(),
        })
}

async fn run_session(config: ComposerConfig, title: &str) -> Result<(), DemoError> {
    let workspace_id = WorkspaceId::new(WORKSPACE);
    let remote = Arc::new(demo_remote(&workspace_id));
    let deps = ComposerDeps {
        config,
        clock: Arc::new(DefaultClock),
        session: SessionContext::new(workspace_id),
        remote: RemoteApis::shared(Arc::clone(&remote)),
        diagnostics: Arc::new(TracingDiagnostics),
        keys: Arc::new(InMemoryKeyListenerRegistry::new()),
    };
    let request = OpenRequest::new(EntityKind::Task)
        .with_kanban(KanbanId::new(BOARD))
        .with_column(ColumnId::new("todo"));
    let mut form = ComposerForm::open(request, deps)?;
    form.load_choices().await?;

    form.set_title(title);
    for message in form.suggestions() {
        info!(rule = ?message.rule(), auto = message.auto_apply(), "{}", message.text());
    }
    let switch = form.suggestions().iter().position(|message| {
        matches!(
            message.mutation(),
            Some(SuggestedMutation::SwitchMode { .. })
        )
    });
    if let Some(index) = switch {
        form.accept_suggestion(index)?;
        info!(mode = form.current_mode().as_str(), "accepted mode suggestion");
    }
    if form.current_mode() == EntityKind::Task {
        form.assign_first_member()?;
        for pick in QuickPick::ALL {
            info!(
                pick = pick.label(),
                active = form.is_active_quick_pick(pick),
                "due date shortcut"
            );
        }
    }

    let outcome = form.submit().await?;
    info!(entity = %outcome.entity, created = outcome.created, "submitted");
    for task in remote.tasks() {
        info!(
            id = %task.id,
            title = %task.title,
            priority = task.priority.label(),
            due = ?task.due_date,
            "stored task"
        );
    }
    for event in remote.events() {
        info!(
            id = %event.id,
            title = %event.title,
            start = %event.start,
            end = %event.end,
            "stored event"
        );
    }
    Ok(())
}
