//! REST API server module
//!
//! Exposes session actions over HTTP. Each request dispatches one action into
//! the session's state machine and returns the resulting session state.

use crate::{Config, Result, TranslatorApp};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{delete, get, post, put},
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the API router with all route definitions
///
/// # Routes
///
/// ## Sessions
/// - `POST /sessions` - Start a session
/// - `GET /sessions/:id` - Current session state
/// - `DELETE /sessions/:id` - End a session
///
/// ## Text
/// - `PUT /sessions/:id/text` - Replace a text area
/// - `PUT /sessions/:id/language` - Pick the target language
/// - `POST /sessions/:id/translate` - Translate, with a download link for non-empty output
/// - `POST /sessions/:id/clear` - Empty text areas
///
/// ## Image
/// - `POST /sessions/:id/asset` - Select an image (multipart, up to `storage.max_upload_bytes`)
/// - `DELETE /sessions/:id/asset` - Drop the pending image
/// - `POST /sessions/:id/process` - Store the pending image
///
/// ## Export
/// - `GET /sessions/:id/export` - Link for the output text
/// - `GET /sessions/:id/export/stored` - Link for the last stored image
///
/// ## Voice
/// - `POST /sessions/:id/voice` - Always 501
///
/// ## System
/// - `GET /health` - Health check
/// - `GET /openapi.json` - OpenAPI specification
/// - `GET /swagger-ui` - Interactive Swagger UI documentation (if enabled)
/// - `GET /events` - Server-sent events stream
/// - `GET /style.css` - Page stylesheet
pub fn create_router(app: Arc<TranslatorApp>, config: Arc<Config>) -> Router {
    let state = AppState::new(app, config.clone());

    let router = Router::new()
        // Sessions
        .route("/sessions", post(routes::create_session))
        .route("/sessions/:id", get(routes::get_session))
        .route("/sessions/:id", delete(routes::end_session))
        // Text
        .route("/sessions/:id/text", put(routes::edit_text))
        .route("/sessions/:id/language", put(routes::select_language))
        .route("/sessions/:id/translate", post(routes::translate))
        .route("/sessions/:id/clear", post(routes::clear))
        // Image
        .route(
            "/sessions/:id/asset",
            post(routes::select_asset)
                .layer(DefaultBodyLimit::max(config.storage.max_upload_bytes))
                .delete(routes::clear_asset),
        )
        .route("/sessions/:id/process", post(routes::process))
        // Export
        .route("/sessions/:id/export", get(routes::export_output))
        .route("/sessions/:id/export/stored", get(routes::export_stored))
        // Voice
        .route("/sessions/:id/voice", post(routes::translate_voice))
        // System
        .route("/health", get(routes::health_check))
        .route("/openapi.json", get(routes::openapi_spec))
        .route("/events", get(routes::event_stream))
        .route("/style.css", get(routes::stylesheet));

    // Swagger UI must be merged before the state is applied. It serves its own
    // copy of the spec so it does not clash with /openapi.json.
    let router = if config.server.api.swagger_ui {
        router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    } else {
        router
    };

    let router = router.with_state(state).layer(TraceLayer::new_for_http());

    if config.server.api.cors_enabled {
        let cors = build_cors_layer(&config.server.api.cors_origins);
        router.layer(cors)
    } else {
        router
    }
}

/// Build a CORS layer based on configured origins
///
/// `"*"` or an empty list allows any origin.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the API server on the configured bind address.
///
/// Runs until the server fails or the process is stopped.
///
/// # Example
///
/// ```no_run
/// use page_translator::{TranslatorApp, Config};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Arc::new(Config::default());
/// let app = Arc::new(TranslatorApp::new((*config).clone())?);
///
/// page_translator::api::start_api_server(app, config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server(app: Arc<TranslatorApp>, config: Arc<Config>) -> Result<()> {
    serve_until(app, config, std::future::pending()).await
}

/// Serve the API until `shutdown` resolves, then drain open connections
pub async fn serve_until<F>(app: Arc<TranslatorApp>, config: Arc<Config>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let bind_address = config.server.api.bind_address;

    tracing::info!(address = %bind_address, "Starting API server");

    let router = create_router(app, config);

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(
        address = %listener.local_addr().unwrap_or(bind_address),
        "API server listening"
    );

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
