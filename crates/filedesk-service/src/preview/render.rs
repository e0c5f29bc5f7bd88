//! Standalone HTML page for any preview.

use quick_xml::escape::escape;

use super::content::{MediaKind, PreviewContent};

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;max-width:60rem}\
pre{white-space:pre-wrap;background:#f6f6f6;padding:1rem}\
section.page{border-bottom:1px solid #ddd;padding:1rem 0}\
table{border-collapse:collapse}td{border:1px solid #ccc;padding:.25rem .5rem}\
.notice{color:#a60}";

/// Render `content` as a complete HTML document titled `title`.
pub fn render_html(title: &str, content: &PreviewContent) -> String {
    let title = escape(title);
    let body = match content {
        PreviewContent::Pdf { page_count, pages } => {
            let mut html = format!("<p>{page_count} page(s)</p>");
            for page in pages {
                html.push_str(&format!(
                    "<section class=\"page\"><h2>Page {}</h2><pre>{}</pre></section>",
                    page.number,
                    escape(page.text.as_str())
                ));
            }
            if (pages.len() as u32) < *page_count {
                html.push_str(&format!(
                    "<p class=\"notice\">Showing {} of {page_count} pages.</p>",
                    pages.len()
                ));
            }
            html
        }
        PreviewContent::Media {
            kind,
            source_url,
            mime_type,
        } => {
            let src = escape(source_url.as_str());
            let ty = escape(mime_type.as_str());
            match kind {
                MediaKind::Image => format!("<img src=\"{src}\" alt=\"{title}\"/>"),
                MediaKind::Audio => {
                    format!("<audio controls><source src=\"{src}\" type=\"{ty}\"/></audio>")
                }
                MediaKind::Video => {
                    format!("<video controls><source src=\"{src}\" type=\"{ty}\"/></video>")
                }
            }
        }
        PreviewContent::Document { html } => html.clone(),
        PreviewContent::Archive {
            entries,
            total_entries,
        } => {
            let mut html = String::from("<ul>");
            for entry in entries {
                let marker = if entry.is_dir { "&#128193; " } else { "" };
                html.push_str(&format!("<li>{marker}{}</li>", escape(entry.name.as_str())));
            }
            html.push_str("</ul>");
            if entries.len() < *total_entries {
                html.push_str(&format!(
                    "<p class=\"notice\">Showing {} of {total_entries} entries.</p>",
                    entries.len()
                ));
            }
            html
        }
        PreviewContent::Text {
            text,
            unsupported,
            truncated,
        } => {
            let mut html = String::new();
            if *unsupported {
                html.push_str("<p class=\"notice\">Unsupported file type, shown as text.</p>");
            }
            html.push_str(&format!("<pre>{}</pre>", escape(text.as_str())));
            if *truncated {
                html.push_str("<p class=\"notice\">Preview truncated.</p>");
            }
            html
        }
        PreviewContent::Unavailable { reason } => {
            format!("<p>{}</p>", escape(reason.as_str()))
        }
    };

    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title>\
<style>{STYLE}</style></head><body><h1>{title}</h1>{body}</body></html>\n"
    )
}
