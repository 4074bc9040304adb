//! Session actions: text editing, translation, asset selection and processing.

use super::TranslatorApp;
use crate::error::{Error, Result};
use crate::export::RenderedLink;
use crate::session::{Action, Outcome, ProcessReport, SessionView};
use crate::types::{Event, Language, SessionField, SessionId, UploadedAsset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Session state after a translate action, plus the download link if any
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TranslationResult {
    /// Session after translation
    pub session: SessionView,
    /// Link for the output text; absent when the output is empty
    pub download: Option<RenderedLink>,
}

impl TranslatorApp {
    /// Start a new session
    pub async fn create_session(&self) -> SessionView {
        let session = self.sessions.create().await;
        tracing::info!(session_id = %session.id(), "session started");
        self.emit_event(Event::SessionStarted { id: session.id() });
        session.view()
    }

    /// Current state of a session
    pub async fn session(&self, id: SessionId) -> Result<SessionView> {
        let handle = self.sessions.get(id).await?;
        let session = handle.lock().await;
        Ok(session.view())
    }

    /// End a session and drop its state
    ///
    /// Files already written to the content directory are kept.
    pub async fn end_session(&self, id: SessionId) -> Result<()> {
        self.sessions.remove(id).await?;
        tracing::info!(session_id = %id, "session ended");
        self.emit_event(Event::SessionEnded { id });
        Ok(())
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.len().await
    }

    /// Replace the contents of a text area
    pub async fn edit_text(
        &self,
        id: SessionId,
        field: SessionField,
        text: String,
    ) -> Result<SessionView> {
        self.apply(id, Action::Edit { field, text })
            .await
            .map(|(_, view)| view)
    }

    /// Pick the target language
    pub async fn select_language(&self, id: SessionId, language: Language) -> Result<SessionView> {
        self.apply(id, Action::SelectLanguage(language))
            .await
            .map(|(_, view)| view)
    }

    /// Translate the input text and offer the output for download
    ///
    /// A download link is only produced when the output is non-empty. It is
    /// named from the configured default base name and extension.
    pub async fn translate(&self, id: SessionId) -> Result<TranslationResult> {
        let (outcome, session) = self.apply(id, Action::Translate).await?;
        let output_text = match outcome {
            Outcome::Translated { output_text } => output_text,
            _ => session.output_text.clone(),
        };

        let export = &self.config.export;
        let download = self.presenter.present(
            output_text.as_bytes(),
            &export.default_base_name,
            &export.default_extension,
        )?;

        self.emit_event(Event::Translated {
            id,
            chars: output_text.chars().count(),
            exported: download.is_some(),
        });

        Ok(TranslationResult { session, download })
    }

    /// Empty the named text areas
    pub async fn clear(&self, id: SessionId, keys: Vec<SessionField>) -> Result<SessionView> {
        self.apply(id, Action::Clear(keys))
            .await
            .map(|(_, view)| view)
    }

    /// Select an image for processing, enabling the process control
    pub async fn select_asset(&self, id: SessionId, asset: UploadedAsset) -> Result<SessionView> {
        let name = asset.original_name.clone();
        let (_, view) = self.apply(id, Action::SelectAsset(asset)).await?;
        self.emit_event(Event::AssetSelected { id, name });
        Ok(view)
    }

    /// Drop the pending image without processing it
    pub async fn clear_asset(&self, id: SessionId) -> Result<SessionView> {
        let (_, view) = self.apply(id, Action::ClearAsset).await?;
        self.emit_event(Event::AssetCleared { id });
        Ok(view)
    }

    /// Press the process control: store the pending image
    ///
    /// The write runs on the blocking thread pool while the session lock is
    /// held, so no other action on this session interleaves with it.
    pub async fn process(&self, id: SessionId) -> Result<ProcessReport> {
        let handle = self.sessions.get(id).await?;
        let mut session = handle.lock_owned().await;
        let machine = self.machine.clone();

        let result = tokio::task::spawn_blocking(move || {
            machine.dispatch(&mut session, Action::ClickProcess)
        })
        .await
        .map_err(|e| Error::Other(format!("process task failed: {e}")))?;

        match result {
            Ok(Outcome::Processed(report)) => {
                self.emit_event(Event::AssetStored {
                    id,
                    path: report.stored.path.clone(),
                });
                Ok(report)
            }
            Ok(other) => Err(Error::Other(format!(
                "process action produced unexpected outcome: {other:?}"
            ))),
            Err(e) => {
                if !matches!(e, Error::Session(_)) {
                    self.emit_event(Event::ProcessFailed {
                        id,
                        error: e.to_string(),
                    });
                }
                Err(e)
            }
        }
    }

    /// Voice translation is not available
    pub async fn translate_voice(&self, id: SessionId) -> Result<SessionView> {
        self.sessions.get(id).await?;
        Err(Error::NotSupported(
            "voice translation is not available".into(),
        ))
    }

    async fn apply(&self, id: SessionId, action: Action) -> Result<(Outcome, SessionView)> {
        let handle = self.sessions.get(id).await?;
        let mut session = handle.lock().await;
        let outcome = self.machine.dispatch(&mut session, action)?;
        Ok((outcome, session.view()))
    }
}
