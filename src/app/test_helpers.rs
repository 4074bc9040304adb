//! Shared test helpers for creating TranslatorApp instances in tests.

use crate::app::TranslatorApp;
use crate::config::Config;
use crate::namer::FixedClock;
use crate::translation::PassThroughTranslator;
use chrono::NaiveDate;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Bytes written as the download icon
pub(crate) const TEST_ICON: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Stylesheet written next to the content directory
pub(crate) const TEST_STYLESHEET: &str = ".download_link { display: inline-block; }";

/// Clock frozen at 2024-03-01 09:15:42
pub(crate) fn test_clock() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 15, 42)
            .unwrap(),
    )
}

/// Config whose resources and content directory live under `root`
///
/// Creates the content directory, the icon and the stylesheet.
pub(crate) fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.storage.content_dir = root.join("images").join("img_dir");
    config.resources.stylesheet = root.join("style.css");
    config.resources.download_icon = root.join("images").join("download_icon.png");

    std::fs::create_dir_all(&config.storage.content_dir).unwrap();
    std::fs::write(&config.resources.stylesheet, TEST_STYLESHEET).unwrap();
    std::fs::write(&config.resources.download_icon, TEST_ICON).unwrap();

    config
}

/// App with a frozen clock over a fresh temp directory.
/// Returns the app and the tempdir (which must be kept alive).
pub(crate) fn create_test_app() -> (TranslatorApp, TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = test_config(temp_dir.path());
    let app = TranslatorApp::with_components(
        config,
        Arc::new(test_clock()),
        Arc::new(PassThroughTranslator),
    )
    .unwrap();
    (app, temp_dir)
}
