//! Download links for a session's output text and its last stored image.

use super::TranslatorApp;
use crate::error::Result;
use crate::export::{DownloadableArtifact, RenderedLink};
use crate::types::SessionId;

impl TranslatorApp {
    /// Link for the current output text, `None` when it is empty
    pub async fn export_output(&self, id: SessionId) -> Result<Option<RenderedLink>> {
        let handle = self.sessions.get(id).await?;
        let output = handle.lock().await.output_text().to_string();

        let export = &self.config.export;
        self.presenter.present(
            output.as_bytes(),
            &export.default_base_name,
            &export.default_extension,
        )
    }

    /// Link for the image written by the last process action, `None` if nothing was stored
    pub async fn export_stored(&self, id: SessionId) -> Result<Option<RenderedLink>> {
        let handle = self.sessions.get(id).await?;
        let Some(stored) = handle.lock().await.last_stored().cloned() else {
            return Ok(None);
        };

        let presenter = self.presenter.clone();
        let link = tokio::task::spawn_blocking(move || {
            let artifact = DownloadableArtifact::from_stored_file(&stored)?;
            presenter.render(&artifact)
        })
        .await
        .map_err(|e| crate::error::Error::Other(format!("export task failed: {e}")))??;

        Ok(Some(link))
    }
}
