//! Fenced code block extraction.
//!
//! Scans LLM output for triple-backtick blocks of the form
//! `` ```lang:path\nbody``` `` and yields them in document order. When the
//! text has no usable blocks at all, the whole text may be taken as a single
//! block if it looks like code.

use std::sync::LazyLock;

use regex::Regex;

/// Opening fence, optional bareword tag, optional `:path`, newline, body, closing fence
static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(\w+)?(?::([^\n]*))?[ \t]*\r?\n((?s:.*?))```").expect("Invalid regex")
});

static HEADING_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6}\s").expect("Invalid regex"));

/// Keywords that mark unfenced text as source code
const CODE_MARKERS: &[&str] = &["function", "class", "import"];

/// A fenced block as found in the text, before any path is assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub language_tag: Option<String>,
    pub explicit_path: Option<String>,
    pub body: String,
}

impl RawBlock {
    /// Create an untagged, unannotated block
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            language_tag: None,
            explicit_path: None,
            body: body.into(),
        }
    }

    /// Set the language tag
    pub fn with_language(mut self, tag: impl Into<String>) -> Self {
        self.language_tag = Some(tag.into());
        self
    }

    /// Set the explicit path annotation
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.explicit_path = Some(path.into());
        self
    }
}

/// Extract all non-empty fenced blocks in document order.
///
/// Blocks whose body is blank are skipped entirely. If nothing is accepted,
/// the whole text is considered via [`fallback_block`].
pub fn extract_blocks(text: &str) -> Vec<RawBlock> {
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while let Some(caps) = FENCED_BLOCK.captures_at(text, cursor) {
        let whole = caps.get(0).map(|m| m.range()).unwrap_or(cursor..text.len());
        cursor = whole.end;

        let body = caps.get(3).map(|m| m.as_str()).unwrap_or_default();
        if body.trim().is_empty() {
            log::debug!("Skipping empty fenced block at offset {}", whole.start);
            continue;
        }

        blocks.push(RawBlock {
            language_tag: non_empty(caps.get(1).map(|m| m.as_str())),
            explicit_path: non_empty(caps.get(2).map(|m| m.as_str())),
            body: body.to_string(),
        });
    }

    if blocks.is_empty() {
        if let Some(block) = fallback_block(text) {
            log::debug!("No fenced blocks found, using whole text as a single block");
            blocks.push(block);
        }
    }

    blocks
}

/// Treat unfenced text as one block when it looks like code.
pub fn fallback_block(text: &str) -> Option<RawBlock> {
    if text.trim().is_empty() {
        return None;
    }

    let stripped = strip_leading_headings(text);
    if !looks_like_code(stripped) {
        log::debug!("Unfenced text does not look like code, discarding");
        return None;
    }

    Some(RawBlock::new(stripped))
}

/// Heuristic for unfenced text: it mentions `function`, `class` or `import`.
///
/// The keyword alone decides, so a script opening with a shebang or a
/// comment still counts while plain prose does not.
pub fn looks_like_code(text: &str) -> bool {
    let trimmed = text.trim();
    CODE_MARKERS.iter().any(|marker| trimmed.contains(marker))
}

/// Drop leading markdown heading lines (and blank lines between them).
fn strip_leading_headings(text: &str) -> &str {
    let mut rest = text;
    loop {
        let (line, remainder) = match rest.find('\n') {
            Some(pos) => (&rest[..pos], &rest[pos + 1..]),
            None => (rest, ""),
        };
        let line = line.trim_start();
        if line.trim().is_empty() || HEADING_LINE.is_match(line) {
            if remainder.is_empty() {
                return remainder;
            }
            rest = remainder;
        } else {
            return rest;
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}
