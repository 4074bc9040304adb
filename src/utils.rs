//! Utility functions for file operations and path manipulation

use crate::config::FileCollisionAction;
use crate::error::{Result, StorageError};
use std::path::{Path, PathBuf};

/// Maximum number of rename attempts when resolving file collisions
const MAX_RENAME_ATTEMPTS: u32 = 9999;

/// Get the path to write to, handling collisions according to the specified action
///
/// For Rename, a ` (n)` suffix is inserted before the extension until a free
/// name is found. For Skip, an existing file is an error. For Overwrite, the
/// original path is returned unchanged.
///
/// # Examples
///
/// ```
/// use page_translator::utils::get_unique_path;
/// use page_translator::config::FileCollisionAction;
/// use std::path::Path;
///
/// let path = Path::new("/tmp/cat_20240101_120000.png");
/// let unique = get_unique_path(path, FileCollisionAction::Rename).unwrap();
/// // If the file exists, returns /tmp/cat_20240101_120000 (1).png
/// ```
pub fn get_unique_path(path: &Path, action: FileCollisionAction) -> Result<PathBuf> {
    match action {
        FileCollisionAction::Overwrite => Ok(path.to_path_buf()),
        FileCollisionAction::Skip => {
            if path.exists() {
                return Err(StorageError::FileCollision {
                    path: path.to_path_buf(),
                    reason: "file already exists and collision action is skip".to_string(),
                }
                .into());
            }
            Ok(path.to_path_buf())
        }
        FileCollisionAction::Rename => {
            if !path.exists() {
                return Ok(path.to_path_buf());
            }

            let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(|| {
                StorageError::InvalidName {
                    name: path.display().to_string(),
                    reason: "cannot extract file stem".to_string(),
                }
            })?;
            let extension = path.extension().and_then(|e| e.to_str());
            let parent = path.parent().unwrap_or_else(|| Path::new(""));

            for i in 1..=MAX_RENAME_ATTEMPTS {
                let new_name = match extension {
                    Some(ext) => format!("{} ({}).{}", stem, i, ext),
                    None => format!("{} ({})", stem, i),
                };
                let new_path = parent.join(new_name);
                if !new_path.exists() {
                    return Ok(new_path);
                }
            }

            Err(StorageError::FileCollision {
                path: path.to_path_buf(),
                reason: format!(
                    "could not find unique filename after {} attempts",
                    MAX_RENAME_ATTEMPTS
                ),
            }
            .into())
        }
    }
}
