//! Static resources: the page stylesheet and the download icon

use crate::error::{Error, Result};
use std::path::Path;

/// Read the stylesheet injected into every page
pub fn load_stylesheet(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| not_found(path, e))
}

/// Read the icon embedded in download links
pub fn read_icon(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| not_found(path, e))
}

fn not_found(path: &Path, e: std::io::Error) -> Error {
    Error::ResourceNotFound {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}
