//! Flat-file storage for uploaded images
//!
//! Content is written to a temporary file inside the content directory and
//! renamed into place once fully written, so readers never see a partial file.
//! Writes through one [`FileStore`] are serialized.

use crate::config::{FileCollisionAction, StorageConfig};
use crate::error::{Error, Result, StorageError};
use crate::namer::ArtifactNamer;
use crate::types::{StoredFile, UploadedAsset};
use crate::utils::get_unique_path;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Writes uploaded assets under generated names
#[derive(Debug)]
pub struct FileStore {
    content_dir: PathBuf,
    collision: FileCollisionAction,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Store writing into `content_dir`
    pub fn new(content_dir: impl Into<PathBuf>, collision: FileCollisionAction) -> Self {
        Self {
            content_dir: content_dir.into(),
            collision,
            write_lock: Mutex::new(()),
        }
    }

    /// Store built from the `storage` config section
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.content_dir.clone(), config.file_collision)
    }

    /// Directory files are written to
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Write `asset.content` verbatim to `content_dir/<generated name>`
    ///
    /// The name comes from `namer` using the upload's own base name and
    /// extension. This performs blocking I/O.
    pub fn store(&self, asset: &UploadedAsset, namer: &ArtifactNamer) -> Result<StoredFile> {
        let generated = namer.name_for_upload(&asset.original_name)?;

        // A poisoned lock only means another write panicked; the directory is still usable.
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if !self.content_dir.is_dir() {
            return Err(StorageError::DirectoryMissing {
                path: self.content_dir.clone(),
            }
            .into());
        }

        let target = get_unique_path(&self.content_dir.join(&generated), self.collision)?;

        let mut temp = tempfile::Builder::new()
            .prefix(".upload-")
            .tempfile_in(&self.content_dir)
            .map_err(|e| StorageError::NotWritable {
                path: self.content_dir.clone(),
                reason: e.to_string(),
            })?;

        let write_failed = |e: std::io::Error| -> Error {
            StorageError::WriteFailed {
                path: target.clone(),
                reason: e.to_string(),
            }
            .into()
        };

        temp.write_all(&asset.content).map_err(write_failed)?;
        temp.as_file().sync_all().map_err(write_failed)?;

        let persisted = match self.collision {
            FileCollisionAction::Skip => temp.persist_noclobber(&target),
            FileCollisionAction::Overwrite | FileCollisionAction::Rename => temp.persist(&target),
        };
        if let Err(e) = persisted {
            if e.error.kind() == std::io::ErrorKind::AlreadyExists {
                return Err(StorageError::FileCollision {
                    path: target.clone(),
                    reason: "file appeared while writing".to_string(),
                }
                .into());
            }
            return Err(write_failed(e.error));
        }

        let generated_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(generated);

        tracing::info!(
            path = %target.display(),
            bytes = asset.content.len(),
            "stored uploaded asset"
        );

        Ok(StoredFile {
            path: target,
            generated_name,
        })
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::namer::{FixedClock, generate_name};
    use chrono::NaiveDate;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn fixed_clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2024, 5, 17)
                .unwrap()
                .and_hms_opt(10, 20, 30)
                .unwrap(),
        )
    }

    fn fixed_namer() -> ArtifactNamer {
        ArtifactNamer::new(Arc::new(fixed_clock()))
    }

    fn png(name: &str, content: &[u8]) -> UploadedAsset {
        UploadedAsset::new(name, "image/png", content.to_vec())
    }

    fn visible_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn stored_bytes_match_upload_at_generated_path() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path(), FileCollisionAction::Overwrite);
        let content: Vec<u8> = (0..=255).cycle().take(4096).collect();

        let stored = store.store(&png("cat.png", &content), &fixed_namer()).unwrap();

        let expected_name = generate_name("cat", "png", &fixed_clock());
        assert_eq!(stored.generated_name, expected_name);
        assert_eq!(stored.path, dir.path().join(&expected_name));
        assert_eq!(fs::read(&stored.path).unwrap(), content);
    }

    #[test]
    fn directory_component_of_upload_name_is_ignored() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path(), FileCollisionAction::Overwrite);

        let stored = store
            .store(&png("../../etc/evil.png", b"x"), &fixed_namer())
            .unwrap();

        assert_eq!(stored.path.parent().unwrap(), dir.path());
        assert_eq!(stored.generated_name, "evil_20240517_102030.png");
    }

    #[test]
    fn empty_content_is_written_as_empty_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path(), FileCollisionAction::Overwrite);

        let stored = store.store(&png("blank.png", b""), &fixed_namer()).unwrap();
        assert!(fs::read(&stored.path).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("img_dir");
        let store = FileStore::new(&missing, FileCollisionAction::Overwrite);

        match store.store(&png("cat.png", b"x"), &fixed_namer()) {
            Err(Error::Storage(StorageError::DirectoryMissing { path })) => {
                assert_eq!(path, missing)
            }
            other => panic!("expected DirectoryMissing, got {other:?}"),
        }
        assert!(!missing.exists());
    }

    #[test]
    fn content_dir_pointing_at_a_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not_a_dir");
        fs::write(&file, "x").unwrap();
        let store = FileStore::new(&file, FileCollisionAction::Overwrite);

        assert!(matches!(
            store.store(&png("cat.png", b"x"), &fixed_namer()),
            Err(Error::Storage(StorageError::DirectoryMissing { .. }))
        ));
    }

    #[test]
    fn invalid_upload_name_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path(), FileCollisionAction::Overwrite);

        assert!(matches!(
            store.store(&png("uploads/", b"x"), &fixed_namer()),
            Err(Error::Storage(StorageError::InvalidName { .. }))
        ));
        assert!(visible_entries(dir.path()).is_empty());
    }

    #[test]
    fn overwrite_replaces_same_second_upload() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path(), FileCollisionAction::Overwrite);
        let namer = fixed_namer();

        let first = store.store(&png("cat.png", b"first"), &namer).unwrap();
        let second = store.store(&png("cat.png", b"second"), &namer).unwrap();

        assert_eq!(first.path, second.path);
        assert_eq!(fs::read(&second.path).unwrap(), b"second");
        assert_eq!(visible_entries(dir.path()).len(), 1);
    }

    #[test]
    fn rename_keeps_both_same_second_uploads() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path(), FileCollisionAction::Rename);
        let namer = fixed_namer();

        let first = store.store(&png("cat.png", b"first"), &namer).unwrap();
        let second = store.store(&png("cat.png", b"second"), &namer).unwrap();

        assert_eq!(second.generated_name, "cat_20240517_102030 (1).png");
        assert_eq!(fs::read(&first.path).unwrap(), b"first");
        assert_eq!(fs::read(&second.path).unwrap(), b"second");
    }

    #[test]
    fn skip_refuses_to_replace_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path(), FileCollisionAction::Skip);
        let namer = fixed_namer();

        let first = store.store(&png("cat.png", b"first"), &namer).unwrap();
        let result = store.store(&png("cat.png", b"second"), &namer);

        assert!(matches!(
            result,
            Err(Error::Storage(StorageError::FileCollision { .. }))
        ));
        assert_eq!(fs::read(&first.path).unwrap(), b"first");
        assert_eq!(
            visible_entries(dir.path()),
            vec![first.generated_name.clone()]
        );
    }

    #[test]
    fn different_extensions_in_same_second_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path(), FileCollisionAction::Skip);
        let namer = fixed_namer();

        let a = store.store(&png("cat.png", b"a"), &namer).unwrap();
        let b = store.store(&png("cat.jpg", b"b"), &namer).unwrap();

        assert_ne!(a.path, b.path);
    }
}
