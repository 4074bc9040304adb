//! Download links for translated text and stored images
//!
//! Content is embedded in the link itself as a base64 data URI, together
//! with an inline icon read from disk on every render.

use crate::encoding;
use crate::error::{Error, Result};
use crate::namer::{ArtifactNamer, split_file_name};
use crate::resources;
use crate::types::StoredFile;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use utoipa::ToSchema;

/// Icon width and height in pixels
pub const ICON_SIZE: u32 = 25;

/// Content offered for download, plus the name the browser should save it as
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadableArtifact {
    /// Bytes to embed
    pub raw_content: Vec<u8>,
    /// File name without extension
    pub suggested_file_name: String,
    /// Extension without the leading dot
    pub extension: String,
}

impl DownloadableArtifact {
    /// Artifact for a text area's contents, named `{base}_{timestamp}.{ext}`
    pub fn from_text(text: &str, base_name: &str, extension: &str, namer: &ArtifactNamer) -> Self {
        Self::named(text.as_bytes().to_vec(), base_name, extension, namer)
    }

    /// Artifact for arbitrary bytes, named `{base}_{timestamp}.{ext}`
    pub fn named(
        raw_content: Vec<u8>,
        base_name: &str,
        extension: &str,
        namer: &ArtifactNamer,
    ) -> Self {
        let extension = extension.trim_start_matches('.').to_string();
        let file_name = namer.name(base_name, &extension);
        let suggested_file_name = match file_name.strip_suffix(&format!(".{extension}")) {
            Some(stem) if !extension.is_empty() => stem.to_string(),
            _ => file_name,
        };
        Self {
            raw_content,
            suggested_file_name,
            extension,
        }
    }

    /// Artifact for a previously stored file, keeping its generated name
    pub fn from_stored_file(stored: &StoredFile) -> Result<Self> {
        let raw_content = std::fs::read(&stored.path).map_err(|e| Error::ResourceNotFound {
            path: stored.path.clone(),
            reason: format!("stored file is no longer readable: {e}"),
        })?;
        let (base, extension) = split_file_name(&stored.generated_name);
        Ok(Self {
            raw_content,
            suggested_file_name: base.to_string(),
            extension: extension.to_string(),
        })
    }

    /// Full download name, e.g. `result_20240101_120000.txt`
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.suggested_file_name.clone()
        } else {
            format!("{}.{}", self.suggested_file_name, self.extension)
        }
    }
}

/// A download link ready to be rendered
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RenderedLink {
    /// Name the browser saves the file as
    pub file_name: String,
    /// Extension used in the data URI media type
    pub extension: String,
    /// Base64 of the content
    pub content_base64: String,
    /// Base64 of the PNG icon
    pub icon_base64: String,
}

impl RenderedLink {
    /// `data:file/{ext};base64,...` URI carrying the content
    pub fn href(&self) -> String {
        format!("data:file/{};base64,{}", self.extension, self.content_base64)
    }

    /// `data:image/png;base64,...` URI carrying the icon
    pub fn icon_src(&self) -> String {
        format!("data:image/png;base64,{}", self.icon_base64)
    }

    /// HTML fragment: an anchor with the inline icon, wrapped in `div.download_link`
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="download_link"><a href="{href}" download="{name}"><img src="{icon}" width="{size}" height="{size}" alt="download"></a></div>"#,
            href = escape_attr(&self.href()),
            name = escape_attr(&self.file_name),
            icon = escape_attr(&self.icon_src()),
            size = ICON_SIZE,
        )
    }
}

// Attribute values are always double-quoted, so these four characters are enough.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Builds [`RenderedLink`]s, reading the icon at each render
#[derive(Debug)]
pub struct ExportPresenter {
    icon_path: PathBuf,
    namer: ArtifactNamer,
}

impl ExportPresenter {
    /// Presenter embedding the icon at `icon_path`
    pub fn new(icon_path: impl Into<PathBuf>, namer: ArtifactNamer) -> Self {
        Self {
            icon_path: icon_path.into(),
            namer,
        }
    }

    /// Link for `content` named `{base_name}_{timestamp}.{extension}`
    ///
    /// Returns `Ok(None)` for empty content; no link is offered then.
    pub fn present(
        &self,
        content: &[u8],
        base_name: &str,
        extension: &str,
    ) -> Result<Option<RenderedLink>> {
        if content.is_empty() {
            return Ok(None);
        }
        let artifact =
            DownloadableArtifact::named(content.to_vec(), base_name, extension, &self.namer);
        self.render(&artifact).map(Some)
    }

    /// Link for an already-named artifact
    pub fn render(&self, artifact: &DownloadableArtifact) -> Result<RenderedLink> {
        let icon = resources::read_icon(&self.icon_path).inspect_err(|e| {
            tracing::error!(path = %self.icon_path.display(), error = %e, "cannot read download icon");
        })?;

        Ok(RenderedLink {
            file_name: artifact.file_name(),
            extension: artifact.extension.clone(),
            content_base64: encoding::encode(&artifact.raw_content),
            icon_base64: encoding::encode(&icon),
        })
    }
}
