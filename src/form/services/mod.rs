//! Application services for the composer form.

mod attachments;
mod composer;
mod keyboard;
mod persistence;
mod suggestion;

pub use attachments::AttachmentStager;
pub use composer::{
    ComposerDeps, ComposerError, ComposerForm, ComposerResult, DeletePrompt, OpenRequest,
};
pub use keyboard::KeyboardScope;
pub use persistence::{
    ConfirmedDeletion, PersistenceCoordinator, SubmissionError, SubmissionResult, SubmitMode,
    SubmitOutcome, SubmitPhase,
};
pub use suggestion::SuggestionEngine;
