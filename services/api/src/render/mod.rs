//! services/api/src/render/mod.rs
//!
//! Converts plain study-guide text into a paginated PDF.
//!
//! Rendering is a pure function of `(text, filename)`: no timestamps or random
//! identifiers are written, so identical inputs produce identical bytes.

pub mod classify;
pub mod layout;

use bytementor_core::domain::RenderedDocument;
use layout::{Font, PAGE_HEIGHT, PAGE_WIDTH};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

pub use classify::{classify_line, LineKind};

pub const DEFAULT_FILENAME: &str = "cheatsheet.pdf";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to encode page content: {0}")]
    Content(String),
    #[error("Failed to write PDF: {0}")]
    Write(String),
}

/// Replaces every character outside `[A-Za-z0-9_.-]` with `_`.
pub fn sanitize_filename(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Derives the display title: extension removed, separators turned into
/// spaces, upper-cased.
pub fn title_from_filename(filename: &str) -> String {
    let stem = match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    };
    let title = stem
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();
    if title.is_empty() {
        "DOCUMENT".to_string()
    } else {
        title
    }
}

/// Renders `text` as a styled, paginated PDF titled after `filename`.
///
/// `filename` is expected to be sanitized already.
pub fn render(text: &str, filename: &str) -> Result<RenderedDocument, RenderError> {
    let title = title_from_filename(filename);
    let pages = layout::lay_out(&title, text);
    let page_count = pages.len();
    let bytes = write_pdf(&title, pages)?;

    Ok(RenderedDocument {
        filename: filename.to_string(),
        bytes,
        page_count,
    })
}

fn write_pdf(title: &str, pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let encoded = Content { operations }
            .encode()
            .map_err(|e| RenderError::Content(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(layout::encode_win_ansi(title)),
        "Producer" => Object::string_literal("ByteMentor"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::Write(e.to_string()))?;
    Ok(bytes)
}
