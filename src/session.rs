//! Per-session interaction state machine
//!
//! A [`Session`] holds everything one user sees on the page: the two text
//! areas, the language picker, the pending upload and whether the
//! process control is enabled. It only changes through
//! [`InteractionMachine::dispatch`], one [`Action`] at a time.
//!
//! The process control has an asymmetric rule: it is disabled before a
//! process action does any work and is re-enabled only by the next asset
//! selection, never by the process action itself.

use crate::config::Config;
use crate::error::{Error, Result, SessionError};
use crate::namer::{ArtifactNamer, split_file_name};
use crate::store::FileStore;
use crate::translation::Translator;
use crate::types::{
    AssetSummary, Language, Phase, SessionField, SessionId, StoredFile, UploadedAsset,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// State of one user session
#[derive(Clone, Debug)]
pub struct Session {
    id: SessionId,
    input_text: String,
    output_text: String,
    process_button_disabled: bool,
    phase: Phase,
    target_language: Language,
    asset: Option<UploadedAsset>,
    last_stored: Option<StoredFile>,
}

impl Session {
    /// Fresh session: empty text areas, no asset, process control enabled
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            input_text: String::new(),
            output_text: String::new(),
            process_button_disabled: false,
            phase: Phase::Idle,
            target_language: Language::default(),
            asset: None,
            last_stored: None,
        }
    }

    /// Session ID
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Contents of the input text area
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Contents of the output text area
    pub fn output_text(&self) -> &str {
        &self.output_text
    }

    /// Whether the process control is disabled
    pub fn process_button_disabled(&self) -> bool {
        self.process_button_disabled
    }

    /// Current phase of the image path
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Selected target language
    pub fn target_language(&self) -> Language {
        self.target_language
    }

    /// The asset waiting to be processed, if any
    pub fn asset(&self) -> Option<&UploadedAsset> {
        self.asset.as_ref()
    }

    /// The file written by the most recent successful process action
    pub fn last_stored(&self) -> Option<&StoredFile> {
        self.last_stored.as_ref()
    }

    /// Serializable snapshot for the presentation layer
    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            phase: self.phase,
            input_text: self.input_text.clone(),
            output_text: self.output_text.clone(),
            process_button_disabled: self.process_button_disabled,
            target_language: self.target_language,
            asset: self.asset.as_ref().map(UploadedAsset::summary),
            last_stored: self.last_stored.clone(),
        }
    }
}

/// Snapshot of a session as rendered by the presentation layer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionView {
    /// Session ID
    pub id: SessionId,
    /// Current phase of the image path
    pub phase: Phase,
    /// Input text area
    pub input_text: String,
    /// Output text area
    pub output_text: String,
    /// Whether the process control is disabled
    pub process_button_disabled: bool,
    /// Selected target language
    pub target_language: Language,
    /// Pending upload, if any
    pub asset: Option<AssetSummary>,
    /// File written by the most recent process action
    pub last_stored: Option<StoredFile>,
}

/// A discrete user action
#[derive(Clone, Debug)]
pub enum Action {
    /// Replace the contents of a text area
    Edit {
        /// Which text area
        field: SessionField,
        /// New contents
        text: String,
    },
    /// Pick the target language
    SelectLanguage(Language),
    /// Run the translator over the input text
    Translate,
    /// Empty the named text areas
    Clear(Vec<SessionField>),
    /// A file was chosen in the uploader
    SelectAsset(UploadedAsset),
    /// The uploader was emptied
    ClearAsset,
    /// The process control was pressed
    ClickProcess,
}

impl Action {
    /// Short label used in logs and rejection messages
    pub fn label(&self) -> &'static str {
        match self {
            Action::Edit { .. } => "edit",
            Action::SelectLanguage(_) => "select_language",
            Action::Translate => "translate",
            Action::Clear(_) => "clear",
            Action::SelectAsset(_) => "select_asset",
            Action::ClearAsset => "clear_asset",
            Action::ClickProcess => "process",
        }
    }
}

/// Result of a successful dispatch
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Session fields changed, nothing else to report
    Updated,
    /// The translate action produced this output text
    Translated {
        /// Contents of the output text area after translation
        output_text: String,
    },
    /// The process action stored the asset
    Processed(ProcessReport),
}

/// What a successful process action produced
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProcessReport {
    /// Metadata of the processed image
    pub summary: AssetSummary,
    /// Where it was written
    pub stored: StoredFile,
}

/// Transition function shared by all sessions
pub struct InteractionMachine {
    translator: Arc<dyn Translator>,
    store: FileStore,
    namer: ArtifactNamer,
    max_input_chars: usize,
    allowed_extensions: Vec<String>,
}

impl InteractionMachine {
    /// Machine using the storage and export limits from `config`
    pub fn from_config(
        config: &Config,
        namer: ArtifactNamer,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            translator,
            store: FileStore::from_config(&config.storage),
            namer,
            max_input_chars: config.export.max_input_chars,
            allowed_extensions: config
                .storage
                .allowed_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// The file store used by process actions
    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Apply `action` to `session`
    ///
    /// On error the session is left as it was, except that a failed process
    /// action keeps the process control disabled.
    pub fn dispatch(&self, session: &mut Session, action: Action) -> Result<Outcome> {
        tracing::debug!(session_id = %session.id, action = action.label(), "dispatching action");

        match action {
            Action::Edit { field, text } => self.edit(session, field, text),
            Action::SelectLanguage(language) => {
                session.target_language = language;
                Ok(Outcome::Updated)
            }
            Action::Translate => {
                session.output_text = self
                    .translator
                    .translate(&session.input_text, session.target_language);
                tracing::debug!(
                    session_id = %session.id,
                    translator = self.translator.name(),
                    chars = session.output_text.chars().count(),
                    "translated input"
                );
                Ok(Outcome::Translated {
                    output_text: session.output_text.clone(),
                })
            }
            Action::Clear(keys) => {
                for key in keys {
                    match key {
                        SessionField::Input => session.input_text.clear(),
                        SessionField::Output => session.output_text.clear(),
                    }
                }
                Ok(Outcome::Updated)
            }
            Action::SelectAsset(asset) => self.select_asset(session, asset),
            Action::ClearAsset => {
                session.asset = None;
                session.phase = Phase::Idle;
                Ok(Outcome::Updated)
            }
            Action::ClickProcess => self.click_process(session),
        }
    }

    fn edit(&self, session: &mut Session, field: SessionField, text: String) -> Result<Outcome> {
        let chars = text.chars().count();
        if chars > self.max_input_chars {
            return Err(Error::Validation(format!(
                "text area accepts at most {} characters, got {}",
                self.max_input_chars, chars
            )));
        }
        match field {
            SessionField::Input => session.input_text = text,
            SessionField::Output => session.output_text = text,
        }
        Ok(Outcome::Updated)
    }

    fn select_asset(&self, session: &mut Session, asset: UploadedAsset) -> Result<Outcome> {
        let (_, extension) = split_file_name(&asset.original_name);
        let extension = extension.to_ascii_lowercase();
        if !self.allowed_extensions.contains(&extension) {
            return Err(Error::UnsupportedAsset {
                name: asset.original_name,
                allowed: self.allowed_extensions.join(", "),
            });
        }

        tracing::info!(
            session_id = %session.id,
            name = %asset.original_name,
            bytes = asset.size_bytes,
            "asset selected"
        );
        session.asset = Some(asset);
        session.phase = Phase::AssetSelected;
        session.process_button_disabled = false;
        Ok(Outcome::Updated)
    }

    fn click_process(&self, session: &mut Session) -> Result<Outcome> {
        let ready = !session.process_button_disabled && session.phase == Phase::AssetSelected;
        let asset = match session.asset.take() {
            Some(asset) if ready => asset,
            other => {
                session.asset = other;
                let current_state = if session.process_button_disabled {
                    "process control disabled"
                } else {
                    session.phase.as_str()
                };
                tracing::warn!(
                    session_id = %session.id,
                    state = current_state,
                    "process action rejected"
                );
                return Err(SessionError::InvalidState {
                    id: session.id,
                    operation: "process".into(),
                    current_state: current_state.into(),
                }
                .into());
            }
        };

        session.process_button_disabled = true;
        session.phase = Phase::Processing;

        match self.store.store(&asset, &self.namer) {
            Ok(stored) => {
                let summary = asset.summary();
                session.phase = Phase::Idle;
                session.last_stored = Some(stored.clone());
                Ok(Outcome::Processed(ProcessReport { summary, stored }))
            }
            Err(e) => {
                tracing::error!(session_id = %session.id, error = %e, "process action failed");
                session.asset = Some(asset);
                session.phase = Phase::AssetSelected;
                Err(e)
            }
        }
    }
}
