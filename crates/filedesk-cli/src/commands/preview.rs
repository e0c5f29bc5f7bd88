//! Preview CLI command and terminal rendering.

use std::path::PathBuf;

use clap::Args;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::output::{self, OutputFormat};
use filedesk_core::error::AppError;
use filedesk_core::types::FileId;
use filedesk_entity::file::FileRecord;
use filedesk_service::DriveContext;
use filedesk_service::preview::{MediaKind, PreviewContent, render_html};

/// Arguments for `preview`
#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// File ID
    pub id: FileId,
    /// Write a standalone HTML page to this path instead of printing
    #[arg(long)]
    pub html: Option<PathBuf>,
    /// Show only this PDF page (1-based)
    #[arg(short, long)]
    pub page: Option<u32>,
}

/// Execute `preview`
pub async fn execute(
    args: &PreviewArgs,
    ctx: &DriveContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let file = ctx.listing.file_info(args.id).await?;
    let mut session = ctx.preview_session();
    session.open(file.clone());
    let content = session
        .content()
        .await
        .cloned()
        .unwrap_or_else(PreviewContent::unavailable);

    if let Some(path) = &args.html {
        tokio::fs::write(path, render_html(&file.file_name, &content)).await?;
        output::print_success(&format!("Preview written to {}", path.display()));
        return Ok(());
    }

    match format {
        OutputFormat::Json => output::print_item(&content, format),
        OutputFormat::Table => print!("{}", render_terminal(&file, &content, args.page)?),
    }
    Ok(())
}

/// Plain-text rendering of a preview for the terminal.
pub(crate) fn render_terminal(
    file: &FileRecord,
    content: &PreviewContent,
    page: Option<u32>,
) -> Result<String, AppError> {
    let mut out = format!("── {} ({}) ──\n", file.file_name, file.kind());

    match content {
        PreviewContent::Pdf { page_count, pages } => match page {
            Some(n) => {
                let found = pages.iter().find(|p| p.number == n).ok_or_else(|| {
                    AppError::validation(format!(
                        "Page {} is out of range (1-{})",
                        n,
                        pages.len().min(*page_count as usize)
                    ))
                })?;
                out.push_str(&format!("Page {} of {}\n\n{}\n", n, page_count, found.text));
            }
            None => {
                out.push_str(&format!("{} page(s)\n", page_count));
                for p in pages {
                    out.push_str(&format!("\n[Page {}]\n{}\n", p.number, p.text.trim_end()));
                }
                if (pages.len() as u32) < *page_count {
                    out.push_str(&format!("\nShowing {} of {} pages.\n", pages.len(), page_count));
                }
            }
        },
        PreviewContent::Media {
            kind,
            source_url,
            mime_type,
        } => {
            let what = match kind {
                MediaKind::Image => "Image",
                MediaKind::Audio => "Audio",
                MediaKind::Video => "Video",
            };
            out.push_str(&format!("{} ({})\nOpen: {}\n", what, mime_type, source_url));
        }
        PreviewContent::Document { html } => {
            out.push_str(&html_to_text(html)?);
            out.push('\n');
        }
        PreviewContent::Archive {
            entries,
            total_entries,
        } => {
            out.push_str(&format!("{} entr(y/ies)\n", total_entries));
            for entry in entries {
                if entry.is_dir {
                    out.push_str(&format!("  {}\n", entry.name));
                } else {
                    out.push_str(&format!("  {}  ({} bytes)\n", entry.name, entry.size));
                }
            }
            if entries.len() < *total_entries {
                out.push_str(&format!("  ... {} more\n", total_entries - entries.len()));
            }
        }
        PreviewContent::Text {
            text,
            unsupported,
            truncated,
        } => {
            if *unsupported {
                out.push_str("(unsupported file type, shown as text)\n");
            }
            out.push_str(text);
            if !text.ends_with('\n') {
                out.push('\n');
            }
            if *truncated {
                out.push_str("... (truncated)\n");
            }
        }
        PreviewContent::Unavailable { reason } => {
            out.push_str(reason);
            out.push('\n');
        }
    }

    Ok(out)
}

/// Flatten converted document markup into lines of text.
fn html_to_text(html: &str) -> Result<String, AppError> {
    let wrapped = format!("<div>{}</div>", html);
    let mut reader = Reader::from_str(&wrapped);
    let mut out = String::new();

    loop {
        match reader
            .read_event()
            .map_err(|e| AppError::preview(format!("Malformed preview markup: {}", e)))?
        {
            Event::Start(e) => match e.local_name().as_ref() {
                b"li" => out.push_str("  • "),
                b"td" => out.push_str("| "),
                _ => {}
            },
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"br" {
                    out.push('\n');
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"p" | b"li" | b"tr" | b"h1" | b"h2" | b"h3" | b"h4" | b"h5" | b"h6" => {
                    out.push('\n')
                }
                b"td" => out.push(' '),
                _ => {}
            },
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|e| AppError::preview(format!("Malformed preview text: {}", e)))?;
                out.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out.trim_end().to_string())
}
