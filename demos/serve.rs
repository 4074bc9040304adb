//! REST API server demo
//!
//! Runs page-translator with the REST API until Ctrl+C.
//!
//! ```bash
//! cargo run --example serve -- [config.json]
//! ```
//!
//! Without a config file the defaults are used, so run it from a directory
//! holding `style.css`, `images/download_icon.png` and `images/img_dir/`.
//!
//! After starting, you can:
//! - View Swagger UI at http://localhost:8501/swagger-ui
//! - Start a session via POST http://localhost:8501/sessions
//! - Stream events via GET http://localhost:8501/events

use page_translator::{Config, TranslatorApp, run_with_shutdown};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    println!(
        "page-translator listening on http://{}",
        config.server.api.bind_address
    );

    let app = TranslatorApp::new(config)?;

    // Log events alongside the server
    let mut events = app.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::info!(?event, "session event");
        }
    });

    run_with_shutdown(app).await?;
    Ok(())
}
