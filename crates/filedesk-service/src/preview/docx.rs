//! Word (OOXML) body to sanitized HTML.
//!
//! Only structure is carried over: paragraphs, headings, bold, italic and
//! underline runs, line breaks, bulleted list items and tables. Every piece
//! of text is escaped and no attribute from the document reaches the
//! output.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;

use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::result::AppResult;

const DOCUMENT_PART: &str = "word/document.xml";

/// Convert a `.docx` package to HTML. Legacy binary `.doc` files are not
/// zip packages and fail here.
pub fn docx_to_html(bytes: &[u8]) -> AppResult<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
        AppError::with_source(ErrorKind::Preview, "Not an OOXML Word document", e)
    })?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| AppError::with_source(ErrorKind::Preview, "Document body is missing", e))?
        .read_to_string(&mut xml)
        .map_err(|e| AppError::with_source(ErrorKind::Preview, "Document body is unreadable", e))?;

    body_to_html(&xml)
}

#[derive(Debug, Default, Clone, Copy)]
struct RunStyle {
    bold: bool,
    italic: bool,
    underline: bool,
}

#[derive(Debug, Default)]
struct Paragraph {
    heading: Option<u8>,
    list_item: bool,
    html: String,
}

#[derive(Debug, Default)]
struct Converter {
    out: String,
    paragraph: Option<Paragraph>,
    run: Option<RunStyle>,
    in_text: bool,
    list_open: bool,
}

impl Converter {
    fn start(&mut self, e: &BytesStart<'_>, empty: bool) -> AppResult<()> {
        match e.local_name().as_ref() {
            b"p" if !empty => self.paragraph = Some(Paragraph::default()),
            b"pStyle" => {
                let level = val(e)?.as_deref().and_then(heading_level);
                if let Some(p) = self.paragraph.as_mut() {
                    p.heading = level;
                }
            }
            b"numPr" => {
                if let Some(p) = self.paragraph.as_mut() {
                    p.list_item = true;
                }
            }
            b"r" if !empty => self.run = Some(RunStyle::default()),
            b"b" => {
                let on = toggled_on(e)?;
                if let Some(run) = self.run.as_mut() {
                    run.bold = on;
                }
            }
            b"i" => {
                let on = toggled_on(e)?;
                if let Some(run) = self.run.as_mut() {
                    run.italic = on;
                }
            }
            b"u" => {
                let on = val(e)?.is_none_or(|v| v != "none");
                if let Some(run) = self.run.as_mut() {
                    run.underline = on;
                }
            }
            b"t" if !empty => self.in_text = true,
            b"br" | b"cr" => self.push_inline("<br/>"),
            b"tab" if self.run.is_some() => self.push_inline(" "),
            b"tbl" => {
                self.close_list();
                self.out.push_str("<table>");
            }
            b"tr" => self.out.push_str("<tr>"),
            b"tc" => self.out.push_str("<td>"),
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"t" => self.in_text = false,
            b"r" => self.run = None,
            b"p" => self.finish_paragraph(),
            b"tc" => {
                self.close_list();
                self.out.push_str("</td>");
            }
            b"tr" => self.out.push_str("</tr>"),
            b"tbl" => self.out.push_str("</table>"),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if !self.in_text || text.is_empty() {
            return;
        }
        let style = self.run.unwrap_or_default();
        let mut html = escape(text).into_owned();
        if style.underline {
            html = format!("<u>{html}</u>");
        }
        if style.italic {
            html = format!("<em>{html}</em>");
        }
        if style.bold {
            html = format!("<strong>{html}</strong>");
        }
        self.push_inline(&html);
    }

    fn push_inline(&mut self, html: &str) {
        if let Some(p) = self.paragraph.as_mut() {
            p.html.push_str(html);
        }
    }

    fn finish_paragraph(&mut self) {
        let Some(p) = self.paragraph.take() else {
            return;
        };

        if p.list_item {
            if !self.list_open {
                self.out.push_str("<ul>");
                self.list_open = true;
            }
            self.out.push_str(&format!("<li>{}</li>", p.html));
            return;
        }

        self.close_list();
        if p.html.trim().is_empty() {
            return;
        }
        match p.heading {
            Some(level) => self.out.push_str(&format!("<h{level}>{}</h{level}>", p.html)),
            None => self.out.push_str(&format!("<p>{}</p>", p.html)),
        }
    }

    fn close_list(&mut self) {
        if self.list_open {
            self.out.push_str("</ul>");
            self.list_open = false;
        }
    }
}

/// Convert the XML of `word/document.xml`.
pub fn body_to_html(xml: &str) -> AppResult<String> {
    let mut reader = Reader::from_str(xml);
    let mut converter = Converter::default();

    loop {
        match reader.read_event().map_err(|e| {
            AppError::with_source(ErrorKind::Preview, "Malformed document XML", e)
        })? {
            Event::Start(e) => converter.start(&e, false)?,
            Event::Empty(e) => converter.start(&e, true)?,
            Event::End(e) => converter.end(e.local_name().as_ref()),
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| {
                    AppError::with_source(ErrorKind::Preview, "Malformed document text", e)
                })?;
                converter.text(&text);
            }
            Event::CData(t) => {
                let raw = String::from_utf8_lossy(&t).into_owned();
                converter.text(&raw);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    converter.close_list();
    Ok(converter.out)
}

fn val(e: &BytesStart<'_>) -> AppResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr
            .map_err(|err| AppError::with_source(ErrorKind::Preview, "Malformed attribute", err))?;
        if attr.key.local_name().as_ref() == b"val" {
            let value = attr.unescape_value().map_err(|err| {
                AppError::with_source(ErrorKind::Preview, "Malformed attribute", err)
            })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// `<w:b/>` is on; `<w:b w:val="0"/>` (or `false`, `off`) is off.
fn toggled_on(e: &BytesStart<'_>) -> AppResult<bool> {
    Ok(val(e)?.is_none_or(|v| !matches!(v.as_str(), "0" | "false" | "off")))
}

fn heading_level(style: &str) -> Option<u8> {
    let lower = style.to_ascii_lowercase();
    match lower.as_str() {
        "title" => Some(1),
        "subtitle" => Some(2),
        _ => lower
            .strip_prefix("heading")
            .and_then(|n| n.trim().parse::<u8>().ok())
            .filter(|n| (1..=6).contains(n)),
    }
}
