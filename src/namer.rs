//! Timestamped artifact names
//!
//! Names follow `{base}_{YYYYMMDD_HHMMSS}.{extension}` in local time. Two calls
//! within the same second with the same base and extension produce the same
//! name; the file store's collision policy decides what happens then.

use crate::error::{Result, StorageError};
use chrono::{Local, NaiveDateTime};
use std::sync::Arc;

/// Timestamp layout used in every generated name
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Source of the current time for name generation
pub trait TimeSource: Send + Sync {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local time zone
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock that always returns the same instant
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl TimeSource for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Build `{base_name}_{timestamp}.{extension}` from the clock's current time
///
/// A leading dot on `extension` is ignored. An empty extension yields
/// `{base_name}_{timestamp}` with no trailing dot.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use page_translator::namer::{FixedClock, generate_name};
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 9)
///     .and_then(|d| d.and_hms_opt(14, 5, 7))
///     .unwrap();
/// assert_eq!(
///     generate_name("result", "txt", &FixedClock(at)),
///     "result_20240309_140507.txt"
/// );
/// ```
pub fn generate_name(base_name: &str, extension: &str, clock: &dyn TimeSource) -> String {
    let timestamp = clock.now().format(TIMESTAMP_FORMAT);
    let extension = extension.strip_prefix('.').unwrap_or(extension);
    if extension.is_empty() {
        format!("{base_name}_{timestamp}")
    } else {
        format!("{base_name}_{timestamp}.{extension}")
    }
}

/// Split a client-supplied file name into base name and extension
///
/// Any directory component is discarded (both `/` and `\` separators), then the
/// trailing extension is split off. Leading dots belong to the base name, so
/// `.profile` has base `.profile` and no extension.
///
/// ```
/// use page_translator::namer::split_file_name;
///
/// assert_eq!(split_file_name("uploads/cat.final.png"), ("cat.final", "png"));
/// assert_eq!(split_file_name(r"C:\fakepath\scan.jpeg"), ("scan", "jpeg"));
/// assert_eq!(split_file_name("README"), ("README", ""));
/// ```
pub fn split_file_name(file_name: &str) -> (&str, &str) {
    let file = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let leading_dots = file.len() - file.trim_start_matches('.').len();
    match file[leading_dots..].rfind('.') {
        Some(idx) => {
            let dot = leading_dots + idx;
            (&file[..dot], &file[dot + 1..])
        }
        None => (file, ""),
    }
}

/// Generates artifact names from a shared clock
#[derive(Clone)]
pub struct ArtifactNamer {
    clock: Arc<dyn TimeSource>,
}

impl ArtifactNamer {
    /// Namer backed by the local wall clock
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// Namer backed by a custom clock
    pub fn new(clock: Arc<dyn TimeSource>) -> Self {
        Self { clock }
    }

    /// Name for an explicit base name and extension
    pub fn name(&self, base_name: &str, extension: &str) -> String {
        generate_name(base_name, extension, self.clock.as_ref())
    }

    /// Name for an uploaded file, keeping its base name and extension
    ///
    /// Fails with [`StorageError::InvalidName`] when nothing is left of the base
    /// name once the directory component and extension are removed.
    pub fn name_for_upload(&self, original_name: &str) -> Result<String> {
        let (base_name, extension) = split_file_name(original_name);
        if base_name.is_empty() {
            return Err(StorageError::InvalidName {
                name: original_name.to_string(),
                reason: "no base name left after removing directory and extension".into(),
            }
            .into());
        }
        Ok(self.name(base_name, extension))
    }
}

impl std::fmt::Debug for ArtifactNamer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactNamer").finish_non_exhaustive()
    }
}
