//! Files staged client-side until their owning entity exists.

use super::{LocalAttachmentId, TaskId};
use serde::{Deserialize, Serialize};

/// A file chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentFile {
    name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl AttachmentFile {
    /// Creates a file from its name, MIME type and contents.
    #[must_use]
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Returns the file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the MIME type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// A staged file tagged with its client-side identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAttachment {
    local_id: LocalAttachmentId,
    file: AttachmentFile,
}

impl PendingAttachment {
    /// Stages a file under a fresh local identifier.
    #[must_use]
    pub fn new(file: AttachmentFile) -> Self {
        Self {
            local_id: LocalAttachmentId::new(),
            file,
        }
    }

    /// Returns the local identifier.
    #[must_use]
    pub const fn local_id(&self) -> LocalAttachmentId {
        self.local_id
    }

    /// Returns the staged file.
    #[must_use]
    pub const fn file(&self) -> &AttachmentFile {
        &self.file
    }

    /// Releases the file for upload.
    #[must_use]
    pub fn into_file(self) -> AttachmentFile {
        self.file
    }
}

/// Entity an upload is attached to. Only task cards accept attachments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "targetId", rename_all = "snake_case")]
pub enum AttachmentOwner {
    /// Attach to a task card.
    Task(TaskId),
}

impl AttachmentOwner {
    /// Returns the owner type understood by the upload endpoint.
    #[must_use]
    pub const fn owner_type(&self) -> &'static str {
        match self {
            Self::Task(_) => "task",
        }
    }

    /// Returns the owner identifier.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        match self {
            Self::Task(id) => id.as_str(),
        }
    }
}
