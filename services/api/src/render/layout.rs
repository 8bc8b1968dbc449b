//! services/api/src/render/layout.rs
//!
//! Lays study-guide text out onto A4 pages as PDF content-stream operations.
//! Coordinates are PDF points with the origin at the bottom-left corner.

use crate::render::classify::{classify_line, LineKind};
use lopdf::content::Operation;
use lopdf::Object;

pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
pub const MARGIN: f32 = 50.0;

const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const TOP: f32 = PAGE_HEIGHT - MARGIN;
/// A section that would start below this line starts on a fresh page instead.
const SECTION_BREAK_Y: f32 = MARGIN + 100.0;
/// Footer baseline, measured from the bottom edge.
const FOOTER_Y: f32 = MARGIN - 20.0;
const LINE_SPACING: f32 = 1.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Mono,
}

impl Font {
    pub const ALL: [Font; 3] = [Font::Regular, Font::Bold, Font::Mono];

    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Mono => "F3",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Mono => "Courier",
        }
    }

    /// Average glyph advance as a fraction of the font size.
    ///
    /// Wrapping counts characters against this average, so lines made mostly of
    /// capitals or other wide glyphs can run slightly past the right margin.
    fn average_width(self) -> f32 {
        match self {
            Font::Regular => 0.52,
            Font::Bold => 0.56,
            Font::Mono => 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    font: Font,
    size: f32,
    color: [f32; 3],
    indent: f32,
}

impl TextStyle {
    fn leading(&self) -> f32 {
        self.size * LINE_SPACING
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.size * self.font.average_width()
    }

    fn max_chars(&self) -> usize {
        let width = CONTENT_WIDTH - self.indent;
        ((width / (self.size * self.font.average_width())) as usize).max(1)
    }
}

const TITLE: TextStyle = TextStyle {
    font: Font::Bold,
    size: 20.0,
    color: [0.1, 0.1, 0.1],
    indent: 0.0,
};
const HEADING: TextStyle = TextStyle {
    font: Font::Bold,
    size: 14.0,
    color: [0.12, 0.29, 0.53],
    indent: 0.0,
};
const BODY: TextStyle = TextStyle {
    font: Font::Regular,
    size: 11.0,
    color: [0.2, 0.2, 0.2],
    indent: 0.0,
};
const BULLET: TextStyle = TextStyle {
    font: Font::Regular,
    size: 11.0,
    color: [0.2, 0.2, 0.2],
    indent: 15.0,
};
const CODE: TextStyle = TextStyle {
    font: Font::Mono,
    size: 10.0,
    color: [0.35, 0.1, 0.45],
    indent: 10.0,
};
const FOOTER: TextStyle = TextStyle {
    font: Font::Regular,
    size: 9.0,
    color: [0.5, 0.5, 0.5],
    indent: 0.0,
};

fn style_for(kind: LineKind) -> TextStyle {
    match kind {
        LineKind::Heading => HEADING,
        LineKind::Code => CODE,
        LineKind::Bullet => BULLET,
        LineKind::Body => BODY,
    }
}

/// Splits `text` on blank lines. Whitespace-only lines count as blank.
pub fn split_sections(text: &str) -> Vec<Vec<&str>> {
    let mut sections = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

/// Greedy word wrap. Words longer than a full line are split by character.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Maps text onto the WinAnsi code page used by the standard Type1 fonts.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2022}' => 0x95,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\t' => b' ',
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

fn text_operations(text: &str, style: &TextStyle, x: f32, y: f32) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(style.font.resource_name().as_bytes().to_vec()), style.size.into()],
        ),
        Operation::new(
            "rg",
            style.color.iter().map(|&c| c.into()).collect(),
        ),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]),
        Operation::new("ET", vec![]),
    ]
}

/// Page state while laying out a document.
struct Layout {
    pages: Vec<Vec<Operation>>,
    cursor: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            cursor: TOP,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor = TOP;
    }

    fn at_page_top(&self) -> bool {
        self.cursor >= TOP
    }

    fn gap(&mut self, points: f32) {
        if !self.at_page_top() {
            self.cursor -= points;
        }
    }

    fn draw(&mut self, text: &str, style: &TextStyle, centered: bool) {
        if self.cursor - style.leading() < MARGIN {
            self.new_page();
        }
        self.cursor -= style.leading();
        let x = if centered {
            ((PAGE_WIDTH - style.text_width(text)) / 2.0).max(MARGIN)
        } else {
            MARGIN + style.indent
        };
        let baseline = self.cursor;
        if let Some(page) = self.pages.last_mut() {
            page.extend(text_operations(text, style, x, baseline));
        }
    }

    fn draw_wrapped(&mut self, text: &str, style: &TextStyle, centered: bool) {
        for line in wrap(text, style.max_chars()) {
            self.draw(&line, style, centered);
        }
    }

    fn section(&mut self, lines: &[&str]) {
        if self.cursor < SECTION_BREAK_Y {
            self.new_page();
        }
        self.gap(10.0);
        for (idx, line) in lines.iter().enumerate() {
            let kind = classify_line(line, idx == 0);
            let style = style_for(kind);
            if kind == LineKind::Code {
                // Code keeps its leading indentation.
                let text = line.replace('\t', "    ");
                for chunk in wrap_code(&text, style.max_chars()) {
                    self.draw(&chunk, &style, false);
                }
            } else {
                self.draw_wrapped(line.trim(), &style, false);
            }
            if kind == LineKind::Heading {
                self.cursor -= 2.0;
            }
        }
    }

    /// Stamps `Page i of N` on every page.
    fn stamp_footers(&mut self) {
        let total = self.pages.len();
        for (idx, page) in self.pages.iter_mut().enumerate() {
            let label = footer_label(idx + 1, total);
            let x = (PAGE_WIDTH - FOOTER.text_width(&label)) / 2.0;
            page.extend(text_operations(&label, &FOOTER, x, FOOTER_Y));
        }
    }
}

/// Code lines are split at the column limit rather than at word boundaries.
fn wrap_code(text: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

pub fn footer_label(page: usize, total: usize) -> String {
    format!("Page {} of {}", page, total)
}

/// Lays out the title and every section, then stamps the footers.
pub fn lay_out(title: &str, body: &str) -> Vec<Vec<Operation>> {
    let mut layout = Layout::new();
    layout.draw_wrapped(title, &TITLE, true);
    layout.cursor -= 12.0;

    for section in split_sections(body) {
        layout.section(&section);
    }

    layout.stamp_footers();
    layout.pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_split_on_blank_lines() {
        let text = "Intro\nline one\n\n   \nConcepts\n- a\n- b\n\n";
        let sections = split_sections(text);
        assert_eq!(sections, vec![vec!["Intro", "line one"], vec!["Concepts", "- a", "- b"]]);
    }

    #[test]
    fn wrap_respects_the_limit() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn wrapped_body_fits_the_estimated_width() {
        let text = "Ownership rules decide which binding frees a value and when it happens. ".repeat(6);
        for line in wrap(&text, BODY.max_chars()) {
            assert!(BODY.text_width(&line) <= CONTENT_WIDTH - BODY.indent);
        }
    }

    #[test]
    fn wrap_splits_oversized_words() {
        let lines = wrap("ab abcdefghij", 4);
        assert_eq!(lines, vec!["ab", "abcd", "efgh", "ij"]);
    }

    #[test]
    fn win_ansi_replaces_unmappable_characters() {
        assert_eq!(encode_win_ansi("caf\u{e9}"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("\u{2022} x"), vec![0x95, b' ', b'x']);
        assert_eq!(encode_win_ansi("\u{1F4A1}"), vec![b'?']);
    }

    #[test]
    fn empty_body_is_a_single_page() {
        assert_eq!(lay_out("TITLE", "").len(), 1);
    }

    #[test]
    fn late_section_moves_to_a_new_page() {
        let mut layout = Layout::new();
        layout.cursor = SECTION_BREAK_Y - 1.0;
        layout.section(&["Heading", "body"]);
        assert_eq!(layout.pages.len(), 2);
        assert!(layout.pages[0].is_empty());
    }

    #[test]
    fn overflowing_lines_flow_onto_new_pages() {
        let body: Vec<String> = (0..120).map(|i| format!("line {}", i)).collect();
        let mut layout = Layout::new();
        let lines: Vec<&str> = std::iter::once("Heading")
            .chain(body.iter().map(String::as_str))
            .collect();
        layout.section(&lines);
        assert!(layout.pages.len() > 1);
        assert!(layout.cursor >= MARGIN);
    }
}
