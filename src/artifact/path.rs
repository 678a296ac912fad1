//! Path resolution for extracted blocks.
//!
//! Each accepted block gets a relative path from the first rule that yields
//! one:
//!
//! 1. the `:path` annotation on the fence
//! 2. a `File: <path>` comment inside the body
//! 3. `main<ext>` / `file<N><ext>` using the language tag
//! 4. the same naming using a sniffed extension

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::extension::{extension_for_language, sniff_extension};
use super::parser::{RawBlock, extract_blocks};

static FILE_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?://|#|<!--|/\*)[ \t]*File:[ \t]*(.+?)[ \t]*(?:-->|\*/)?[ \t]*\r?$")
        .expect("Invalid regex")
});

type PathRule = fn(&RawBlock, usize) -> Option<String>;

/// Resolution rules in priority order
const PATH_RULES: &[PathRule] = &[from_explicit_path, from_file_comment, from_language_tag, from_content];

/// A file ready to be written, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileArtifact {
    pub relative_path: String,
    pub content: String,
}

impl FileArtifact {
    pub fn new(relative_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }
}

/// Resolve the relative path for the block at accepted position `index`.
pub fn resolve_path(block: &RawBlock, index: usize) -> String {
    PATH_RULES
        .iter()
        .filter_map(|rule| rule(block, index))
        .map(|candidate| normalize_path(&candidate).to_string())
        .find(|path| !path.is_empty())
        // The content rule always produces a name
        .unwrap_or_else(|| generated_name(index, sniff_extension(&block.body)))
}

/// Extract blocks from markdown and assign each a path.
pub fn extract_artifacts(markdown: &str) -> Vec<FileArtifact> {
    extract_blocks(markdown)
        .into_iter()
        .enumerate()
        .map(|(index, block)| {
            let path = resolve_path(&block, index);
            log::debug!("Resolved block {} to {}", index, path);
            FileArtifact::new(path, block.body)
        })
        .collect()
}

/// Strip a single leading `./` or `/`.
pub fn normalize_path(path: &str) -> &str {
    let path = path.trim();
    path.strip_prefix("./")
        .or_else(|| path.strip_prefix('/'))
        .unwrap_or(path)
}

/// `main<ext>` for the first block, `file<N><ext>` (1-based) afterwards.
pub fn generated_name(index: usize, extension: &str) -> String {
    if index == 0 {
        format!("main{}", extension)
    } else {
        format!("file{}{}", index + 1, extension)
    }
}

fn from_explicit_path(block: &RawBlock, _index: usize) -> Option<String> {
    block.explicit_path.as_ref().map(|p| p.trim().to_string())
}

fn from_file_comment(block: &RawBlock, _index: usize) -> Option<String> {
    FILE_COMMENT
        .captures(&block.body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn from_language_tag(block: &RawBlock, index: usize) -> Option<String> {
    block
        .language_tag
        .as_deref()
        .map(|tag| generated_name(index, extension_for_language(tag)))
}

fn from_content(block: &RawBlock, index: usize) -> Option<String> {
    Some(generated_name(index, sniff_extension(&block.body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_names() {
        assert_eq!(generated_name(0, ".js"), "main.js");
        assert_eq!(generated_name(1, ".css"), "file2.css");
        assert_eq!(generated_name(9, ".py"), "file10.py");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("./src/app.js"), "src/app.js");
        assert_eq!(normalize_path("/src/app.js"), "src/app.js");
        assert_eq!(normalize_path("src/app.js"), "src/app.js");
        // Only a single prefix is removed
        assert_eq!(normalize_path("//etc"), "/etc");
        assert_eq!(normalize_path("././a"), "./a");
    }

    #[test]
    fn test_explicit_path_wins_over_tag() {
        let block = RawBlock::new("x = 1\n").with_language("python").with_path("lib/util.py");
        assert_eq!(resolve_path(&block, 0), "lib/util.py");
    }

    #[test]
    fn test_explicit_path_wins_over_file_comment() {
        let block = RawBlock::new("// File: other.js\nx();\n")
            .with_language("js")
            .with_path("real.js");
        assert_eq!(resolve_path(&block, 3), "real.js");
    }

    #[test]
    fn test_file_comment_slashes() {
        let block = RawBlock::new("// File: src/index.js\nconsole.log(1);\n").with_language("js");
        assert_eq!(resolve_path(&block, 0), "src/index.js");
    }

    #[test]
    fn test_file_comment_hash() {
        let block = RawBlock::new("# File: app.py\nprint(1)\n").with_language("python");
        assert_eq!(resolve_path(&block, 1), "app.py");
    }

    #[test]
    fn test_file_comment_html() {
        let block = RawBlock::new("<!-- File: public/index.html -->\n<html></html>\n");
        assert_eq!(resolve_path(&block, 0), "public/index.html");
    }

    #[test]
    fn test_file_comment_block() {
        let block = RawBlock::new("/* File: styles/main.css */\nbody {}\n").with_language("css");
        assert_eq!(resolve_path(&block, 0), "styles/main.css");
    }

    #[test]
    fn test_file_comment_first_match_wins() {
        let block = RawBlock::new("x();\n// File: first.js\n// File: second.js\n");
        assert_eq!(resolve_path(&block, 0), "first.js");
    }

    #[test]
    fn test_file_comment_must_start_line() {
        let block = RawBlock::new("x(); // File: inline.js\n").with_language("js");
        assert_eq!(resolve_path(&block, 0), "main.js");
    }

    #[test]
    fn test_file_comment_is_normalized() {
        let block = RawBlock::new("// File: ./src/a.js\na();\n");
        assert_eq!(resolve_path(&block, 0), "src/a.js");
    }

    #[test]
    fn test_language_tag_naming() {
        let block = RawBlock::new("body {}\n").with_language("css");
        assert_eq!(resolve_path(&block, 0), "main.css");
        assert_eq!(resolve_path(&block, 2), "file3.css");
    }

    #[test]
    fn test_unknown_tag_naming() {
        let block = RawBlock::new("stuff\n").with_language("toml");
        assert_eq!(resolve_path(&block, 0), "main.txt");
    }

    #[test]
    fn test_content_naming_without_tag() {
        let block = RawBlock::new("<!DOCTYPE html>\n<html></html>\n");
        assert_eq!(resolve_path(&block, 0), "main.html");
        assert_eq!(resolve_path(&block, 1), "file2.html");
    }

    #[test]
    fn test_empty_explicit_path_falls_through() {
        let block = RawBlock::new("print('x')\n").with_language("py").with_path("/");
        assert_eq!(resolve_path(&block, 0), "main.py");
    }

    #[test]
    fn test_extract_artifacts_untagged_sequence() {
        let text = "```\nalpha();\n```\n```\n\n```\n```\nbeta();\n```\n```\ngamma();\n```";
        let artifacts = extract_artifacts(text);
        let paths: Vec<_> = artifacts.iter().map(|a| a.relative_path.as_str()).collect();
        // Blank block does not consume an index
        assert_eq!(paths, vec!["main.js", "file2.js", "file3.js"]);
    }

    #[test]
    fn test_extract_artifacts_keeps_content() {
        let artifacts = extract_artifacts("```html\n<html></html>\n```");
        assert_eq!(artifacts, vec![FileArtifact::new("main.html", "<html></html>\n")]);
    }
}
