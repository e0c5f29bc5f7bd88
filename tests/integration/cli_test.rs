//! Integration tests for CLI parsing and dispatch against the fake backend.

mod helpers;

use clap::Parser;

use filedesk_cli::{Cli, OutputFormat};
use filedesk_cli::commands::Commands;

use helpers::{EMAIL, PASSWORD, TestApp};

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["filedesk"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn test_global_flags() {
    let cli = parse(&["--format", "json", "--env", "staging", "whoami"]);
    assert_eq!(cli.format, OutputFormat::Json);
    assert_eq!(cli.environment(), "staging");
    assert!(matches!(cli.command, Commands::Whoami));
}

#[test]
fn test_rejects_non_numeric_ids() {
    assert!(Cli::try_parse_from(["filedesk", "file", "info", "abc"]).is_err());
    assert!(Cli::try_parse_from(["filedesk", "folder", "delete"]).is_err());
}

#[tokio::test]
async fn test_login_then_folder_and_upload_commands() {
    let app = TestApp::new().await;

    parse(&["login", "--email", EMAIL, "--password", PASSWORD])
        .dispatch(&app.ctx)
        .await
        .unwrap();
    parse(&["folder", "create", "Projects"])
        .dispatch(&app.ctx)
        .await
        .unwrap();
    let projects = app.store().folders[0]["id"].as_i64().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.txt");
    std::fs::write(&path, b"ship it").unwrap();
    let path = path.to_string_lossy().into_owned();
    let folder = projects.to_string();
    parse(&["upload", &path, "--folder", &folder])
        .dispatch(&app.ctx)
        .await
        .unwrap();

    {
        let store = app.store();
        let files = store.files_in(Some(projects));
        assert_eq!(files.len(), 1);
        assert_eq!(files[0]["file_name"], "plan.txt");
        assert_eq!(files[0]["file_type"], "text/plain");
    }

    parse(&["--format", "json", "file", "list", "--folder", &folder])
        .dispatch(&app.ctx)
        .await
        .unwrap();
    assert_eq!(app.ctx.listing.files().await.len(), 1);
}

#[tokio::test]
async fn test_commands_require_login() {
    let app = TestApp::new().await;
    let err = parse(&["folder", "list"]).dispatch(&app.ctx).await.unwrap_err();
    assert!(err.is_authentication());
    assert_eq!(app.store().requests.len(), 0);
}

#[tokio::test]
async fn test_preview_writes_html() {
    let app = TestApp::logged_in().await;
    let id = app
        .store()
        .seed_file("notes.md", "text/markdown", b"<b>not bold</b>", None);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("preview.html");
    let out_arg = out.to_string_lossy().into_owned();

    parse(&["preview", &id.to_string(), "--html", &out_arg])
        .dispatch(&app.ctx)
        .await
        .unwrap();

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("&lt;b&gt;not bold&lt;/b&gt;"));
    assert!(html.contains("<title>notes.md</title>"));
}
