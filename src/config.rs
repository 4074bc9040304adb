//! Configuration types for page-translator

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path, path::PathBuf};

/// Main configuration for [`TranslatorApp`](crate::TranslatorApp)
///
/// Every section has defaults that match the stock page layout, so
/// `Config::default()` works when run from the directory holding `style.css`
/// and `images/`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where uploaded images are written
    #[serde(default)]
    pub storage: StorageConfig,

    /// Static resources read at startup and render time
    #[serde(default)]
    pub resources: ResourceConfig,

    /// Text export and input limits
    #[serde(default)]
    pub export: ExportConfig,

    /// API and external server integration
    #[serde(default)]
    pub server: ServerIntegrationConfig,
}

impl Config {
    /// Load configuration from a JSON file
    ///
    /// Missing sections and fields fall back to their defaults. The loaded
    /// configuration is validated before it is returned.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("cannot read {}: {}", path.display(), e),
            key: None,
        })?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the state machine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.export.default_base_name.trim().is_empty() {
            return Err(Error::Config {
                message: "default base name must not be empty".into(),
                key: Some("export.default_base_name".into()),
            });
        }
        if self.export.max_input_chars == 0 {
            return Err(Error::Config {
                message: "max_input_chars must be greater than zero".into(),
                key: Some("export.max_input_chars".into()),
            });
        }
        if self.storage.allowed_extensions.is_empty() {
            return Err(Error::Config {
                message: "at least one image extension must be allowed".into(),
                key: Some("storage.allowed_extensions".into()),
            });
        }
        if self.storage.max_upload_bytes == 0 {
            return Err(Error::Config {
                message: "max_upload_bytes must be greater than zero".into(),
                key: Some("storage.max_upload_bytes".into()),
            });
        }
        Ok(())
    }
}

/// Content directory and collision settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory uploaded images are written to (default: "images/img_dir")
    ///
    /// The directory is not created automatically; storing fails if it is missing.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// What to do when the generated name already exists (default: overwrite)
    #[serde(default)]
    pub file_collision: FileCollisionAction,

    /// Accepted upload extensions, compared case-insensitively (default: png, jpeg, jpg)
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    /// Largest accepted upload request in bytes (default: 200 MiB)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            file_collision: FileCollisionAction::default(),
            allowed_extensions: default_allowed_extensions(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// File collision handling strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCollisionAction {
    /// Replace the existing file (default)
    #[default]
    Overwrite,
    /// Append (1), (2), etc. to the generated name
    Rename,
    /// Fail the store and keep the existing file
    Skip,
}

/// Static resource locations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Stylesheet read once at startup (default: "style.css")
    #[serde(default = "default_stylesheet")]
    pub stylesheet: PathBuf,

    /// Icon embedded next to every download link (default: "images/download_icon.png")
    #[serde(default = "default_download_icon")]
    pub download_icon: PathBuf,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            stylesheet: default_stylesheet(),
            download_icon: default_download_icon(),
        }
    }
}

/// Text export settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Base name of exported text files (default: "result")
    #[serde(default = "default_base_name")]
    pub default_base_name: String,

    /// Extension of exported text files (default: "txt")
    #[serde(default = "default_extension")]
    pub default_extension: String,

    /// Maximum characters accepted in the input text area (default: 400)
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_base_name: default_base_name(),
            default_extension: default_extension(),
            max_input_chars: default_max_input_chars(),
        }
    }
}

/// API and external server integration configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServerIntegrationConfig {
    /// REST API configuration
    #[serde(default)]
    pub api: ApiConfig,
}

/// REST API configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address to bind to (default: 127.0.0.1:8501)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("images/img_dir")
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["png".into(), "jpeg".into(), "jpg".into()]
}

fn default_max_upload_bytes() -> usize {
    200 * 1024 * 1024
}

fn default_stylesheet() -> PathBuf {
    PathBuf::from("style.css")
}

fn default_download_icon() -> PathBuf {
    PathBuf::from("images/download_icon.png")
}

fn default_base_name() -> String {
    "result".into()
}

fn default_extension() -> String {
    "txt".into()
}

fn default_max_input_chars() -> usize {
    400
}

fn default_true() -> bool {
    true
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8501))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}
