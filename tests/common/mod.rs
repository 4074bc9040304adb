//! Common test utilities for page-translator integration tests

use chrono::NaiveDate;
use page_translator::{Config, FixedClock, PassThroughTranslator, TranslatorApp};
use std::sync::Arc;
use tempfile::TempDir;

/// Icon bytes written into every test workspace
pub const ICON: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00];

/// Stylesheet written into every test workspace
pub const STYLESHEET: &str = "body { direction: rtl; }";

/// Clock frozen at 2024-07-04 12:00:05
pub fn frozen_clock() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2024, 7, 4)
            .unwrap()
            .and_hms_opt(12, 0, 5)
            .unwrap(),
    )
}

/// Lay out `style.css`, `images/download_icon.png` and `images/img_dir/`
/// under a fresh temp directory and return a config pointing at them
pub fn workspace() -> (Config, TempDir) {
    let dir = TempDir::new().unwrap();
    let images = dir.path().join("images");
    std::fs::create_dir_all(images.join("img_dir")).unwrap();
    std::fs::write(images.join("download_icon.png"), ICON).unwrap();
    std::fs::write(dir.path().join("style.css"), STYLESHEET).unwrap();

    let mut config = Config::default();
    config.storage.content_dir = images.join("img_dir");
    config.resources.stylesheet = dir.path().join("style.css");
    config.resources.download_icon = images.join("download_icon.png");
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap();
    (config, dir)
}

/// App over `config` with a frozen clock
pub fn frozen_app_with(config: Config) -> TranslatorApp {
    TranslatorApp::with_components(
        config,
        Arc::new(frozen_clock()),
        Arc::new(PassThroughTranslator),
    )
    .unwrap()
}

/// App over a fresh workspace with a frozen clock
pub fn frozen_app() -> (TranslatorApp, TempDir) {
    let (config, dir) = workspace();
    (frozen_app_with(config), dir)
}
