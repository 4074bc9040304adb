//! # page-translator
//!
//! Backend for a small translation page: per-session text translation,
//! image upload with timestamped storage, and embedded download links.
//!
//! ## Design
//!
//! - **Session state is explicit** - every user session is a [`Session`]
//!   changed only by [`InteractionMachine::dispatch`]
//! - **Sensible defaults** - `Config::default()` matches the stock page layout
//! - **Event-driven** - consumers subscribe to [`Event`]s, no polling required
//! - **REST surface** - an axum router exposes every session action
//!
//! ## Quick Start
//!
//! ```no_run
//! use page_translator::{Config, SessionField, TranslatorApp};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = TranslatorApp::new(Config::default())?;
//!
//!     let session = app.create_session().await;
//!     app.edit_text(session.id, SessionField::Input, "hello".into()).await?;
//!     let result = app.translate(session.id).await?;
//!
//!     if let Some(link) = result.download {
//!         println!("{}", link.to_html());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Application facade shared by all sessions
mod app;
/// Configuration types
pub mod config;
/// Base64 transport encoding
pub mod encoding;
/// Error types
pub mod error;
/// Download link rendering
pub mod export;
/// Timestamped artifact names
pub mod namer;
/// Static resource loading
pub mod resources;
/// Per-session state machine
pub mod session;
/// Flat-file image storage
pub mod store;
/// Translation backends
pub mod translation;
/// Core types and events
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use app::{TranslationResult, TranslatorApp};
pub use config::{Config, FileCollisionAction};
pub use error::{ApiError, Error, ErrorDetail, Result, SessionError, StorageError, ToHttpStatus};
pub use export::{DownloadableArtifact, ExportPresenter, RenderedLink};
pub use namer::{ArtifactNamer, FixedClock, SystemClock, TimeSource, generate_name};
pub use session::{Action, InteractionMachine, Outcome, ProcessReport, Session, SessionView};
pub use store::FileStore;
pub use translation::{PassThroughTranslator, Translator};
pub use types::{
    AssetSummary, Event, Language, Phase, SessionField, SessionId, StoredFile, UploadedAsset,
};

/// Serve the REST API until a termination signal arrives.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// Open connections are drained before this returns. Sessions live in memory
/// and are dropped; files already stored stay on disk.
///
/// # Example
///
/// ```no_run
/// use page_translator::{Config, TranslatorApp, run_with_shutdown};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let app = TranslatorApp::new(Config::default())?;
///     run_with_shutdown(app).await?;
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(app: TranslatorApp) -> Result<()> {
    let config = app.get_config();
    api::serve_until(std::sync::Arc::new(app), config, wait_for_signal()).await?;
    tracing::info!("shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C, or on SIGTERM where the platform has it
async fn wait_for_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!(signal = "SIGINT", "stopping server"),
            Err(e) => {
                tracing::warn!(error = %e, "Ctrl+C listener unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => tracing::info!(signal = "SIGTERM", "stopping server"),
                    _ = ctrl_c => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM listener unavailable, stopping on Ctrl+C only");
                ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    ctrl_c.await;
}
