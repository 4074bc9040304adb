//! Application facade tying sessions, storage and export together.
//!
//! `TranslatorApp` is what the REST layer talks to. Its methods are split by
//! concern:
//! - [`registry`] - Session bookkeeping
//! - [`actions`] - Text and image actions dispatched into the state machine
//! - [`downloads`] - Download links for output text and stored images

mod actions;
mod downloads;
mod registry;

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

pub use actions::TranslationResult;
pub(crate) use registry::SessionRegistry;

use crate::config::Config;
use crate::error::Result;
use crate::export::ExportPresenter;
use crate::namer::{ArtifactNamer, SystemClock, TimeSource};
use crate::resources;
use crate::session::InteractionMachine;
use crate::translation::{PassThroughTranslator, Translator};
use crate::types::Event;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Capacity of the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Main application instance (cloneable - all fields are Arc-wrapped)
#[derive(Clone)]
pub struct TranslatorApp {
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: broadcast::Sender<Event>,
    /// Validated configuration
    pub(crate) config: Arc<Config>,
    /// Live sessions
    pub(crate) sessions: SessionRegistry,
    /// Transition function shared by all sessions
    pub(crate) machine: Arc<InteractionMachine>,
    /// Download link renderer
    pub(crate) presenter: Arc<ExportPresenter>,
    /// Stylesheet read once at startup
    pub(crate) stylesheet: Arc<str>,
}

impl TranslatorApp {
    /// Create an app using the local clock and the pass-through translator
    ///
    /// Validates `config` and reads the stylesheet. The content directory is
    /// not created; storing into a missing directory fails at process time.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_components(config, Arc::new(SystemClock), Arc::new(PassThroughTranslator))
    }

    /// Create an app with a custom clock and translator
    pub fn with_components(
        config: Config,
        clock: Arc<dyn TimeSource>,
        translator: Arc<dyn Translator>,
    ) -> Result<Self> {
        config.validate()?;

        let stylesheet = resources::load_stylesheet(&config.resources.stylesheet)?;

        if !config.storage.content_dir.is_dir() {
            tracing::warn!(
                path = %config.storage.content_dir.display(),
                "content directory does not exist, image processing will fail"
            );
        }

        let namer = ArtifactNamer::new(clock);
        let machine = InteractionMachine::from_config(&config, namer.clone(), translator);
        let presenter = ExportPresenter::new(config.resources.download_icon.clone(), namer);
        let (event_tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        tracing::info!(
            content_dir = %config.storage.content_dir.display(),
            max_input_chars = config.export.max_input_chars,
            "translator app ready"
        );

        Ok(Self {
            event_tx,
            config: Arc::new(config),
            sessions: SessionRegistry::default(),
            machine: Arc::new(machine),
            presenter: Arc::new(presenter),
            stylesheet: Arc::from(stylesheet),
        })
    }

    /// Subscribe to session events
    ///
    /// Each call returns an independent receiver. Events emitted while nobody
    /// is subscribed are dropped.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Get the current configuration
    pub fn get_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Stylesheet contents loaded at startup
    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// Emit an event to all subscribers
    pub(crate) fn emit_event(&self, event: Event) {
        // send() only fails when nobody is listening
        self.event_tx.send(event).ok();
    }

    /// Spawn the REST API server in a background task
    pub fn spawn_api_server(self: &Arc<Self>) -> tokio::task::JoinHandle<Result<()>> {
        let app = self.clone();
        let config = self.config.clone();

        tokio::spawn(async move { crate::api::start_api_server(app, config).await })
    }
}
