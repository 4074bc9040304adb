//! OpenAPI documentation and schema generation
//!
//! Defines the OpenAPI specification for the page-translator REST API using
//! utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the page-translator REST API
///
/// The spec can be accessed via:
/// - `/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "page-translator REST API",
        version = "0.1.0",
        description = "Per-session text translation, image upload and download links",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8501", description = "Local development server")
    ),
    paths(
        // Sessions
        crate::api::routes::create_session,
        crate::api::routes::get_session,
        crate::api::routes::end_session,

        // Text
        crate::api::routes::edit_text,
        crate::api::routes::select_language,
        crate::api::routes::translate,
        crate::api::routes::clear,

        // Image
        crate::api::routes::select_asset,
        crate::api::routes::clear_asset,
        crate::api::routes::process,

        // Export
        crate::api::routes::export_output,
        crate::api::routes::export_stored,

        // Voice
        crate::api::routes::translate_voice,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
        crate::api::routes::stylesheet,
        crate::api::routes::event_stream,
    ),
    components(schemas(
        // Core types from types.rs
        crate::types::SessionId,
        crate::types::Phase,
        crate::types::Language,
        crate::types::SessionField,
        crate::types::AssetSummary,
        crate::types::StoredFile,
        crate::types::Event,

        // Session and export types
        crate::session::SessionView,
        crate::session::ProcessReport,
        crate::export::RenderedLink,
        crate::app::TranslationResult,

        // API request/response types from routes
        crate::api::routes::EditTextRequest,
        crate::api::routes::SelectLanguageRequest,
        crate::api::routes::ClearRequest,
        crate::api::routes::DownloadLinkResponse,

        // Error types from error.rs
        crate::error::ApiError,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "sessions", description = "Session lifecycle - Start, inspect and end sessions"),
        (name = "text", description = "Text path - Edit, translate and clear the text areas"),
        (name = "image", description = "Image path - Select, drop and process an uploaded image"),
        (name = "export", description = "Downloads - Links for the output text and stored images"),
        (name = "voice", description = "Voice path - Not available"),
        (name = "system", description = "System endpoints - Health checks, OpenAPI spec, events, stylesheet"),
    )
)]
pub struct ApiDoc;
