//! Saving downloaded documents to disk.

use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::info;

use ledgerdesk_core::attachment::Attachment;
use ledgerdesk_shared::types::DocId;
use ledgerdesk_shared::{AppError, AppResult};

use crate::session::SessionContext;

/// Disk access for a downloaded [`Attachment`].
pub trait AttachmentExt {
    /// Decodes the document and writes it into `dir` under its sanitized
    /// name, creating `dir` when needed. Returns the written path.
    fn save_to(&self, dir: &Path) -> impl Future<Output = AppResult<PathBuf>> + Send;
}

impl AttachmentExt for Attachment {
    fn save_to(&self, dir: &Path) -> impl Future<Output = AppResult<PathBuf>> + Send {
        let decoded = self.decode();
        let path = dir.join(self.safe_file_name());
        let dir = dir.to_path_buf();
        let doc_id = self.doc_id;
        async move {
            let bytes = decoded?;
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|err| AppError::Storage(format!("cannot create {}: {err}", dir.display())))?;
            tokio::fs::write(&path, &bytes)
                .await
                .map_err(|err| AppError::Storage(format!("cannot write {}: {err}", path.display())))?;
            info!(%doc_id, path = %path.display(), size = bytes.len(), "document saved");
            Ok(path)
        }
    }
}

/// Downloads a document and saves it into `dir`.
pub async fn download(ctx: &SessionContext, doc_id: DocId, dir: &Path) -> AppResult<PathBuf> {
    ctx.require_user()?;
    let attachment = ctx.gateway().download_attachment(doc_id).await?;
    attachment.save_to(dir).await
}
