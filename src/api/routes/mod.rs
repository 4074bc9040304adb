//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`sessions`] - Session lifecycle, text and image actions, downloads
//! - [`system`] - Health, events, OpenAPI, stylesheet

use crate::export::RenderedLink;
use crate::types::{Language, SessionField};
use serde::{Deserialize, Serialize};

mod sessions;
mod system;

pub use sessions::*;
pub use system::*;

// ============================================================================
// Request/Response Types (shared across handlers)
// ============================================================================

/// Request body for PUT /sessions/:id/text
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct EditTextRequest {
    /// Which text area to replace
    pub field: SessionField,
    /// New contents
    pub text: String,
}

/// Request body for PUT /sessions/:id/language
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SelectLanguageRequest {
    /// Target language
    pub language: Language,
}

/// Request body for POST /sessions/:id/clear
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ClearRequest {
    /// Text areas to empty (default: both)
    #[serde(default = "default_clear_keys")]
    pub keys: Vec<SessionField>,
}

impl Default for ClearRequest {
    fn default() -> Self {
        Self {
            keys: default_clear_keys(),
        }
    }
}

fn default_clear_keys() -> Vec<SessionField> {
    vec![SessionField::Input, SessionField::Output]
}

/// Response for the export endpoints
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DownloadLinkResponse {
    /// Link contents
    #[serde(flatten)]
    pub link: RenderedLink,
    /// `data:` URI for the anchor's href
    pub href: String,
    /// Ready-to-embed HTML fragment
    pub html: String,
}

impl From<RenderedLink> for DownloadLinkResponse {
    fn from(link: RenderedLink) -> Self {
        Self {
            href: link.href(),
            html: link.to_html(),
            link,
        }
    }
}
