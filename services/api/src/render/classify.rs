//! services/api/src/render/classify.rs
//!
//! Text-driven styling heuristics for study-guide lines.
//!
//! The checks are plain substring tests and have known false positives: a prose
//! sentence mentioning "class " or "function" is rendered as code. Existing
//! output depends on this, so the heuristic is kept as is.

/// How a single line of a section is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    Code,
    Bullet,
    Body,
}

const COMMENT_MARKERS: &[&str] = &["//", "#", "/*", "<!--"];
const CODE_KEYWORDS: &[&str] = &["function", "def ", "class ", "const ", "let ", "var ", "=>"];
const BULLET_MARKERS: &[&str] = &["- ", "* ", "+ ", "\u{2022}"];

/// Classifies one non-blank line.
///
/// Precedence: the first line of a section is its heading; otherwise code,
/// then bullet, then body.
pub fn classify_line(line: &str, first_in_section: bool) -> LineKind {
    if first_in_section {
        return LineKind::Heading;
    }
    let trimmed = line.trim_start();
    if looks_like_code(trimmed) {
        LineKind::Code
    } else if BULLET_MARKERS.iter().any(|m| trimmed.starts_with(m)) {
        LineKind::Bullet
    } else {
        LineKind::Body
    }
}

fn looks_like_code(line: &str) -> bool {
    COMMENT_MARKERS.iter().any(|m| line.starts_with(m))
        || CODE_KEYWORDS.iter().any(|k| line.contains(k))
}
