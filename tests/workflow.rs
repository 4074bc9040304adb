//! End-to-end flows through the public API of page-translator
//!
//! Each test drives a `TranslatorApp` the way the page does: one action at a
//! time, checking session state and files on disk in between.

mod common;

use common::{ICON, STYLESHEET, frozen_app, frozen_app_with, frozen_clock, workspace};
use page_translator::{
    Config, Error, Event, FileCollisionAction, Language, Phase, SessionError, SessionField,
    StorageError, TranslatorApp, UploadedAsset, encoding, generate_name,
};
use std::sync::Arc;

fn png(name: &str, content: &[u8]) -> UploadedAsset {
    UploadedAsset::new(name, "image/png", content.to_vec())
}

#[tokio::test]
async fn text_path_translate_export_clear() {
    let (app, _dir) = frozen_app();
    let id = app.create_session().await.id;

    app.select_language(id, Language::English).await.unwrap();
    app.edit_text(id, SessionField::Input, "سلام دنیا".into())
        .await
        .unwrap();

    let result = app.translate(id).await.unwrap();
    assert_eq!(result.session.output_text, "سلام دنیا");
    assert_eq!(result.session.target_language, Language::English);

    let link = result.download.unwrap();
    assert_eq!(link.file_name, generate_name("result", "txt", &frozen_clock()));
    assert_eq!(
        encoding::decode(&link.content_base64).unwrap(),
        "سلام دنیا".as_bytes()
    );
    assert_eq!(encoding::decode(&link.icon_base64).unwrap(), ICON);
    assert!(link.to_html().contains(r#"class="download_link""#));

    let view = app
        .clear(id, vec![SessionField::Input, SessionField::Output])
        .await
        .unwrap();
    assert_eq!(view.input_text, "");
    assert_eq!(view.output_text, "");
    assert!(app.export_output(id).await.unwrap().is_none());
}

#[tokio::test]
async fn image_path_select_process_reselect() {
    let (app, _dir) = frozen_app();
    let id = app.create_session().await.id;

    let view = app.select_asset(id, png("menu.png", b"one")).await.unwrap();
    assert_eq!(view.phase, Phase::AssetSelected);
    assert!(!view.process_button_disabled);

    let report = app.process(id).await.unwrap();
    assert_eq!(report.summary.name, "menu.png");
    assert_eq!(
        report.stored.path,
        app.get_config()
            .storage
            .content_dir
            .join(generate_name("menu", "png", &frozen_clock()))
    );
    assert_eq!(std::fs::read(&report.stored.path).unwrap(), b"one");

    let view = app.session(id).await.unwrap();
    assert!(view.process_button_disabled);
    assert!(matches!(
        app.process(id).await,
        Err(Error::Session(SessionError::InvalidState { .. }))
    ));

    // Same second and same name: the default collision action overwrites
    app.select_asset(id, png("menu.png", b"two")).await.unwrap();
    let second = app.process(id).await.unwrap();
    assert_eq!(second.stored.path, report.stored.path);
    assert_eq!(std::fs::read(&second.stored.path).unwrap(), b"two");
}

#[tokio::test]
async fn rename_collision_action_keeps_both_files() {
    let (mut config, _dir) = workspace();
    config.storage.file_collision = FileCollisionAction::Rename;
    let app = frozen_app_with(config);
    let id = app.create_session().await.id;

    app.select_asset(id, png("menu.png", b"one")).await.unwrap();
    let first = app.process(id).await.unwrap();
    app.select_asset(id, png("menu.png", b"two")).await.unwrap();
    let second = app.process(id).await.unwrap();

    assert_ne!(first.stored.path, second.stored.path);
    assert_eq!(std::fs::read(&first.stored.path).unwrap(), b"one");
    assert_eq!(std::fs::read(&second.stored.path).unwrap(), b"two");
}

#[tokio::test]
async fn missing_content_dir_surfaces_storage_error() {
    let (app, _dir) = frozen_app();
    std::fs::remove_dir(&app.get_config().storage.content_dir).unwrap();
    let id = app.create_session().await.id;
    app.select_asset(id, png("menu.png", b"x")).await.unwrap();

    let result = app.process(id).await;

    assert!(matches!(
        result,
        Err(Error::Storage(StorageError::DirectoryMissing { .. }))
    ));
    let view = app.session(id).await.unwrap();
    assert!(view.process_button_disabled);
    assert_eq!(view.asset.unwrap().name, "menu.png");
}

#[tokio::test]
async fn concurrent_sessions_do_not_interfere() {
    let (app, _dir) = frozen_app();
    let app = Arc::new(app);

    let mut handles = Vec::new();
    for i in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let id = app.create_session().await.id;
            let text = format!("session text {i}");
            app.edit_text(id, SessionField::Input, text.clone())
                .await
                .unwrap();
            let result = app.translate(id).await.unwrap();
            assert_eq!(result.session.output_text, text);
            id
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    assert_eq!(app.session_count().await, 8);
    for id in ids {
        let view = app.session(id).await.unwrap();
        assert_eq!(view.output_text, view.input_text);
    }
}

#[tokio::test]
async fn subscribers_see_the_image_path() {
    let (app, _dir) = frozen_app();
    let mut events = app.subscribe();
    let id = app.create_session().await.id;

    app.select_asset(id, png("menu.png", b"x")).await.unwrap();
    let report = app.process(id).await.unwrap();

    assert!(matches!(
        events.recv().await.unwrap(),
        Event::SessionStarted { .. }
    ));
    assert!(matches!(
        events.recv().await.unwrap(),
        Event::AssetSelected { .. }
    ));
    match events.recv().await.unwrap() {
        Event::AssetStored { path, .. } => assert_eq!(path, report.stored.path),
        other => panic!("expected AssetStored, got {other:?}"),
    }
}

#[tokio::test]
async fn config_file_round_trip() {
    let (config, dir) = workspace();
    let path = dir.path().join("config.json");
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let loaded = Config::from_json_file(&path).unwrap();
    assert_eq!(loaded.storage.content_dir, config.storage.content_dir);

    let app = TranslatorApp::new(loaded).unwrap();
    assert_eq!(app.stylesheet(), STYLESHEET);
}
