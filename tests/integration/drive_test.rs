//! End-to-end tests for sessions, listings and uploads over HTTP.

mod helpers;

use filedesk_core::error::ErrorKind;
use filedesk_core::types::{FileId, FolderId};
use filedesk_entity::upload::{DroppedItem, LocalFile, PickedFile, UploadSource};
use filedesk_service::upload::describe_file;

use helpers::{EMAIL, PASSWORD, TestApp};

#[tokio::test]
async fn test_login_persists_across_runs() {
    let app = TestApp::new().await;
    assert!(!app.ctx.session.is_authenticated().await);

    let user = app.ctx.session.login(EMAIL, PASSWORD).await.unwrap();
    assert_eq!(user.email, EMAIL);
    assert!(app.state_dir.path().join("auth_tokens.json").exists());
    assert!(app.state_dir.path().join("user.json").exists());

    let later = app.reconnect().await;
    assert!(later.session.is_authenticated().await);
    later.listing.refresh().await.unwrap();
    assert_eq!(app.store().hits("GET /folders/"), 1);
}

#[tokio::test]
async fn test_logout_clears_persisted_state() {
    let app = TestApp::logged_in().await;
    app.ctx.session.logout().await.unwrap();

    let later = app.reconnect().await;
    assert!(!later.session.is_authenticated().await);
    let err = later.listing.refresh().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.message, "You are not logged in");
}

#[tokio::test]
async fn test_bad_password_shows_backend_detail() {
    let app = TestApp::new().await;
    let err = app.ctx.session.login(EMAIL, "nope").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.message, "No active account found with the given credentials");
    assert!(!app.ctx.session.is_authenticated().await);
}

#[tokio::test]
async fn test_dropped_directory_creates_one_folder_then_uploads() {
    let app = TestApp::logged_in().await;
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("Reports");
    std::fs::create_dir_all(root.join("2024")).unwrap();
    std::fs::write(root.join("A.txt"), b"alpha").unwrap();
    std::fs::write(root.join("B.pdf"), b"%PDF-1.4 fake").unwrap();
    std::fs::write(root.join("2024").join("C.txt"), b"gamma").unwrap();

    let report = app
        .ctx
        .uploads
        .upload(UploadSource::Dropped(vec![DroppedItem::Directory(root)]))
        .await
        .unwrap();

    let folder = report.folder.clone().unwrap();
    assert_eq!(folder.name, "Reports");
    assert!(folder.is_root());
    assert_eq!(report.uploaded.len(), 3);
    assert!(report.is_complete_success());

    let store = app.store();
    let first_upload = store.requests.iter().position(|p| p == "POST /files/").unwrap();
    let create = store.requests.iter().position(|p| p == "POST /folders/").unwrap();
    assert!(create < first_upload);
    assert_eq!(store.hits("POST /folders/"), 1);

    let names: Vec<&str> = store
        .files_in(Some(folder.id.get()))
        .iter()
        .filter_map(|f| f["file_name"].as_str())
        .collect();
    assert_eq!(names, vec!["A.txt", "B.pdf", "C.txt"]);
    assert_eq!(store.files[1]["file_type"], "application/pdf");
}

#[tokio::test]
async fn test_folder_create_failure_uploads_nothing() {
    let app = TestApp::logged_in().await;
    app.store().reject_folders.push("Taken".to_string());
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("Taken");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("a.txt"), b"a").unwrap();

    let err = app
        .ctx
        .uploads
        .upload(UploadSource::Dropped(vec![DroppedItem::Directory(root)]))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Upload);
    assert!(err.message.starts_with("Failed to create folder 'Taken'"));
    assert_eq!(app.store().hits("POST /files/"), 0);
    assert_eq!(app.ctx.refresh.generation(), 0);
}

#[tokio::test]
async fn test_partial_batch_reports_failures_and_refreshes_once() {
    let app = TestApp::logged_in().await;
    let dir = tempfile::tempdir().unwrap();
    let mut items = Vec::new();
    for name in ["one.txt", "reject-me.txt", "three.txt"] {
        let path = dir.path().join(name);
        std::fs::write(&path, name.as_bytes()).unwrap();
        items.push(DroppedItem::File(describe_file(&path).unwrap()));
    }

    let report = app
        .ctx
        .uploads
        .upload(UploadSource::Dropped(items))
        .await
        .unwrap();

    assert_eq!(report.uploaded.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].name, "reject-me.txt");
    assert_eq!(report.failed[0].error, "The submitted file is empty.");
    assert_eq!(app.ctx.refresh.generation(), 1);

    assert!(app.ctx.listing.sync().await.unwrap());
    assert_eq!(app.ctx.listing.files().await.len(), 2);
}

#[tokio::test]
async fn test_picked_files_follow_selected_scope() {
    let app = TestApp::logged_in().await;
    let inbox = app.ctx.listing.create_folder("Inbox").await.unwrap();
    app.ctx.listing.select(Some(inbox.clone())).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mystery.blob");
    std::fs::write(&path, b"??").unwrap();
    let file = LocalFile {
        path: path.clone(),
        name: "mystery.blob".to_string(),
        size: 2,
        mime_type: None,
    };
    app.ctx
        .uploads
        .upload(UploadSource::Picked(vec![PickedFile {
            file,
            relative_path: None,
        }]))
        .await
        .unwrap();

    {
        let store = app.store();
        let uploaded = store.files_in(Some(inbox.id.get()));
        assert_eq!(uploaded.len(), 1);
        assert_eq!(uploaded[0]["file_type"], "Unknown");
    }

    app.ctx.listing.select(None).await.unwrap();
    assert!(app.ctx.listing.files().await.is_empty());
    assert_eq!(app.store().hits("GET /files/"), 1);
    assert_eq!(app.store().hits(&format!("GET /files/?folder={}", inbox.id)), 1);
}

#[tokio::test]
async fn test_delete_folder_returns_to_root() {
    let app = TestApp::logged_in().await;
    let work = app.ctx.listing.create_folder("Work").await.unwrap();
    app.ctx.listing.select(Some(work.clone())).await.unwrap();

    app.ctx.listing.delete_folder(work.id).await.unwrap();
    assert!(app.ctx.scope.is_root());
    assert!(app.ctx.listing.folders().await.is_empty());

    let err = app.ctx.listing.delete_folder(FolderId(999)).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_download_streams_bytes_to_disk() {
    let app = TestApp::logged_in().await;
    let id = app
        .store()
        .seed_file("report.csv", "text/csv", b"a,b\n1,2\n", None);

    let file = app.ctx.listing.file_info(FileId(id)).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let (path, bytes) = app.ctx.listing.download(&file, dir.path()).await.unwrap();

    assert_eq!(path, dir.path().join("report.csv"));
    assert_eq!(bytes, 8);
    assert_eq!(std::fs::read(&path).unwrap(), b"a,b\n1,2\n");
    assert!(!dir.path().join("report.csv.part").exists());
}

#[tokio::test]
async fn test_delete_file_updates_listing() {
    let app = TestApp::logged_in().await;
    let id = app.store().seed_file("old.txt", "text/plain", b"x", None);
    app.ctx.listing.refresh().await.unwrap();
    assert_eq!(app.ctx.listing.files().await.len(), 1);

    app.ctx.listing.delete_file(FileId(id)).await.unwrap();
    assert!(app.ctx.listing.files().await.is_empty());
    assert!(app.store().files.is_empty());
}
