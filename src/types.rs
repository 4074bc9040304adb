//! Core types for page-translator

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use utoipa::ToSchema;

/// Unique identifier for a session
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct SessionId(pub i64);

impl SessionId {
    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for SessionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Where a session is in the image path
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No asset selected
    #[default]
    Idle,
    /// An uploaded asset is waiting to be processed
    AssetSelected,
    /// A process action is running
    Processing,
}

impl Phase {
    /// Lowercase label used in logs and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::AssetSelected => "asset_selected",
            Phase::Processing => "processing",
        }
    }
}

/// Target language offered by the language picker
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Chinese
    Chinese,
    /// Farsi (default selection)
    #[default]
    Farsi,
    /// English
    English,
    /// Arabic
    Arabic,
}

/// Text fields of a session that the presentation layer can edit or clear
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionField {
    /// The input text area
    #[serde(alias = "text_input_area")]
    Input,
    /// The output text area
    #[serde(alias = "text_output_area")]
    Output,
}

/// A single user-submitted image, read-only once created
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    /// File name as sent by the client (may include a directory component)
    pub original_name: String,
    /// Size of `content` in bytes
    pub size_bytes: u64,
    /// MIME type reported by the client
    pub mime_type: String,
    /// Raw file bytes
    pub content: Vec<u8>,
}

impl UploadedAsset {
    /// Create an asset, deriving the size from the content
    pub fn new(
        original_name: impl Into<String>,
        mime_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            original_name: original_name.into(),
            size_bytes: content.len() as u64,
            mime_type: mime_type.into(),
            content,
        }
    }

    /// Metadata summary shown after processing
    pub fn summary(&self) -> AssetSummary {
        AssetSummary {
            name: self.original_name.clone(),
            size: format!("{:.3} KB", self.size_bytes as f64 / 1024.0),
            mime_type: self.mime_type.clone(),
        }
    }
}

// Content is elided so logs don't dump image bytes.
impl std::fmt::Debug for UploadedAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedAsset")
            .field("original_name", &self.original_name)
            .field("size_bytes", &self.size_bytes)
            .field("mime_type", &self.mime_type)
            .finish_non_exhaustive()
    }
}

/// Metadata summary of an uploaded image
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssetSummary {
    /// Original file name
    pub name: String,
    /// Size in kilobytes with three decimals, e.g. "1.500 KB"
    pub size: String,
    /// MIME type reported by the client
    pub mime_type: String,
}

/// An uploaded asset after it has been written to the content directory
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StoredFile {
    /// Full path of the written file
    #[schema(value_type = String)]
    pub path: PathBuf,
    /// File name component of `path`
    pub generated_name: String,
}

/// Event emitted when session state changes
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A session was created
    SessionStarted {
        /// Session ID
        id: SessionId,
    },

    /// A session was ended and its state dropped
    SessionEnded {
        /// Session ID
        id: SessionId,
    },

    /// The translate action ran
    Translated {
        /// Session ID
        id: SessionId,
        /// Character count of the output text
        chars: usize,
        /// Whether a download link was offered
        exported: bool,
    },

    /// An asset was selected for processing
    AssetSelected {
        /// Session ID
        id: SessionId,
        /// Original file name
        name: String,
    },

    /// The pending asset was dropped without processing
    AssetCleared {
        /// Session ID
        id: SessionId,
    },

    /// The process action wrote the asset to disk
    AssetStored {
        /// Session ID
        id: SessionId,
        /// Where the file was written
        #[schema(value_type = String)]
        path: PathBuf,
    },

    /// The process action failed
    ProcessFailed {
        /// Session ID
        id: SessionId,
        /// Error message
        error: String,
    },
}
