//! Staging of files chosen before the owning entity exists.

use crate::form::{
    domain::{AttachmentFile, AttachmentOwner, LocalAttachmentId, PendingAttachment},
    ports::{AttachmentApi, RemoteResult, UploadRequest},
};
use std::sync::Arc;
use tracing::debug;

/// Holds pending files until an owner id is available, then uploads them.
#[derive(Clone)]
pub struct AttachmentStager {
    api: Arc<dyn AttachmentApi>,
    pending: Vec<PendingAttachment>,
}

impl AttachmentStager {
    /// Creates an empty stager uploading through `api`.
    #[must_use]
    pub fn new(api: Arc<dyn AttachmentApi>) -> Self {
        Self {
            api,
            pending: Vec::new(),
        }
    }

    /// Appends files to the pending list and returns their local ids.
    pub fn add(
        &mut self,
        files: impl IntoIterator<Item = AttachmentFile>,
    ) -> Vec<LocalAttachmentId> {
        let staged: Vec<PendingAttachment> =
            files.into_iter().map(PendingAttachment::new).collect();
        let ids = staged.iter().map(PendingAttachment::local_id).collect();
        self.pending.extend(staged);
        ids
    }

    /// Removes one pending file. Returns whether it was staged.
    pub fn remove(&mut self, local_id: LocalAttachmentId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|attachment| attachment.local_id() != local_id);
        self.pending.len() != before
    }

    /// Returns the pending files in the order they were added.
    #[must_use]
    pub fn pending(&self) -> &[PendingAttachment] {
        &self.pending
    }

    /// Returns whether nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Discards every pending file without uploading.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Uploads every pending file to `owner` and returns how many were sent.
    ///
    /// The pending list is emptied before the upload starts and is not
    /// restored when the upload fails. An empty list issues no call.
    ///
    /// # Errors
    ///
    /// Returns the remote error when the upload rejects.
    pub async fn flush(&mut self, owner: AttachmentOwner) -> RemoteResult<usize> {
        if self.pending.is_empty() {
            return Ok(0);
        }
        let files: Vec<AttachmentFile> = std::mem::take(&mut self.pending)
            .into_iter()
            .map(PendingAttachment::into_file)
            .collect();
        let count = files.len();
        let total_bytes: usize = files.iter().map(AttachmentFile::size).sum();
        debug!(count, total_bytes, ?owner, "uploading staged attachments");
        self.api.upload(&UploadRequest { files, owner }).await?;
        Ok(count)
    }
}
