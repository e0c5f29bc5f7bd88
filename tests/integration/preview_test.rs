//! End-to-end tests for previews fetched over HTTP.

mod helpers;

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;

use filedesk_core::types::FileId;
use filedesk_service::preview::{MediaKind, PreviewContent, render_html};

use helpers::TestApp;

fn zip_of(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(name.trim_end_matches('/'), SimpleFileOptions::default())
                .unwrap();
        } else {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(bytes).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

async fn preview_of(app: &TestApp, name: &str, mime: &str, bytes: &[u8]) -> PreviewContent {
    let id = app.store().seed_file(name, mime, bytes, None);
    let file = app.ctx.listing.file_info(FileId(id)).await.unwrap();
    app.ctx.previews.materialize(&file).await
}

#[tokio::test]
async fn test_zip_lists_entries_without_text_fetch() {
    let app = TestApp::logged_in().await;
    let archive = zip_of(&[("docs/", b""), ("docs/readme.txt", b"hello"), ("a.bin", b"\x00\x01")]);

    let content = preview_of(&app, "bundle.zip", "application/zip", &archive).await;
    let PreviewContent::Archive {
        entries,
        total_entries,
    } = content
    else {
        panic!("expected an archive listing, got {content:?}");
    };
    assert_eq!(total_entries, 3);
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["docs/", "docs/readme.txt", "a.bin"]);
    assert!(entries[0].is_dir);
    assert_eq!(entries[1].size, 5);
}

#[tokio::test]
async fn test_docx_becomes_html() {
    let app = TestApp::logged_in().await;
    let body = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Quarterly</w:t></w:r></w:p>
<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Revenue &amp; costs</w:t></w:r></w:p>
</w:body></w:document>"#;
    let docx = zip_of(&[("word/document.xml", body.as_bytes())]);

    let content = preview_of(
        &app,
        "q3.docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        &docx,
    )
    .await;
    let PreviewContent::Document { html } = content else {
        panic!("expected a document, got {content:?}");
    };
    assert!(html.contains("<h1>Quarterly</h1>"));
    assert!(html.contains("<strong>Revenue &amp; costs</strong>"));
}

#[tokio::test]
async fn test_media_is_not_downloaded() {
    let app = TestApp::logged_in().await;
    let content = preview_of(&app, "cat.png", "image/png", b"\x89PNG").await;

    match content {
        PreviewContent::Media {
            kind, source_url, ..
        } => {
            assert_eq!(kind, MediaKind::Image);
            assert!(source_url.ends_with("/media/uploads/1"));
        }
        other => panic!("expected media, got {other:?}"),
    }
    assert_eq!(app.store().hits("GET /media/uploads/1"), 0);
}

#[tokio::test]
async fn test_unknown_type_falls_back_to_text() {
    let app = TestApp::logged_in().await;
    let content = preview_of(&app, "build.log", "Unknown", b"step 1 ok\n").await;
    assert_eq!(
        content,
        PreviewContent::Text {
            text: "step 1 ok\n".to_string(),
            unsupported: true,
            truncated: false,
        }
    );
}

#[tokio::test]
async fn test_corrupt_pdf_degrades_to_unavailable() {
    let app = TestApp::logged_in().await;
    let content = preview_of(&app, "broken.pdf", "application/pdf", b"not a pdf").await;
    assert_eq!(content, PreviewContent::unavailable());

    let html = render_html("broken.pdf", &content);
    assert!(html.contains("Cannot preview this file type."));
}

#[tokio::test]
async fn test_reopening_fetches_again() {
    let app = TestApp::logged_in().await;
    let id = app.store().seed_file("notes.txt", "text/plain", b"hi", None);
    let file = app.ctx.listing.file_info(FileId(id)).await.unwrap();
    let path = format!("GET /media/uploads/{id}");

    let mut session = app.ctx.preview_session();
    session.open(file.clone());
    session.content().await.unwrap();
    session.content().await.unwrap();
    assert_eq!(app.store().hits(&path), 1);

    session.close();
    session.open(file);
    session.content().await.unwrap();
    assert_eq!(app.store().hits(&path), 2);
}
