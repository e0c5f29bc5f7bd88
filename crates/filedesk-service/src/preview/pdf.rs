//! PDF page text extraction.

use lopdf::Document;
use tracing::debug;

use filedesk_core::error::AppError;
use filedesk_core::result::AppResult;

use super::content::PdfPage;

/// Parse a PDF and extract the text of its first `max_pages` pages.
///
/// Returns the document's page count alongside the extracted pages. A page
/// whose text cannot be extracted is kept with empty text. CPU bound; call
/// from a blocking worker.
pub fn extract_pages(bytes: &[u8], max_pages: u32) -> AppResult<(u32, Vec<PdfPage>)> {
    let document =
        Document::load_mem(bytes).map_err(|e| AppError::preview(format!("Failed to parse PDF: {e}")))?;

    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
    let page_count = page_numbers.len() as u32;

    let pages = page_numbers
        .into_iter()
        .take(max_pages as usize)
        .map(|number| {
            let text = document.extract_text(&[number]).unwrap_or_else(|e| {
                debug!(page = number, error = %e, "No text extracted from page");
                String::new()
            });
            PdfPage {
                number,
                text: text.trim_end().to_string(),
            }
        })
        .collect();

    Ok((page_count, pages))
}
