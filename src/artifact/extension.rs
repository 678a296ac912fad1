//! Extension resolution for extracted code blocks.
//!
//! A block either carries a language tag (looked up in a fixed table) or is
//! sniffed from its content. Both lookups are ordered tables so the priority
//! is visible in one place.

use std::sync::LazyLock;

use regex::Regex;

/// Extension used when a language tag is present but unknown
pub const UNKNOWN_TAG_EXTENSION: &str = ".txt";

/// Extension used when content sniffing matches nothing.
///
/// Untagged blocks that look like nothing in particular are assumed to be
/// JavaScript. This is a known bias, not a detection result.
pub const DEFAULT_SNIFFED_EXTENSION: &str = ".js";

/// Language tag to extension, matched case-insensitively
const LANGUAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("javascript", ".js"),
    ("js", ".js"),
    ("typescript", ".ts"),
    ("ts", ".ts"),
    ("python", ".py"),
    ("py", ".py"),
    ("java", ".java"),
    ("html", ".html"),
    ("css", ".css"),
    ("json", ".json"),
    ("xml", ".xml"),
    ("yaml", ".yaml"),
    ("yml", ".yml"),
    ("markdown", ".md"),
    ("md", ".md"),
    ("sql", ".sql"),
    ("sh", ".sh"),
    ("bash", ".sh"),
    ("go", ".go"),
    ("rust", ".rs"),
    ("cpp", ".cpp"),
    ("c", ".c"),
    ("php", ".php"),
    ("ruby", ".rb"),
    ("swift", ".swift"),
    ("kotlin", ".kt"),
];

// Anchored at line start so stray braces in prose or JS objects fall through.
static CSS_SELECTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[.#][A-Za-z_][\w-]*\s*\{").expect("Invalid regex"));

static LEADING_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<[A-Za-z!]").expect("Invalid regex"));

type Sniffer = fn(&str) -> bool;

/// Content heuristics in priority order; first match wins
const SNIFFERS: &[(Sniffer, &str)] = &[
    (looks_like_html_document, ".html"),
    (looks_like_css, ".css"),
    (looks_like_es_module, ".js"),
    (looks_like_commonjs, ".js"),
    (looks_like_python, ".py"),
    (looks_like_java, ".java"),
    (looks_like_php, ".php"),
    (starts_with_tag, ".html"),
];

/// Map a language tag to an extension including the leading dot.
pub fn extension_for_language(tag: &str) -> &'static str {
    let tag = tag.trim();
    LANGUAGE_EXTENSIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(tag))
        .map(|(_, ext)| *ext)
        .unwrap_or(UNKNOWN_TAG_EXTENSION)
}

/// Guess an extension from block content when no language tag exists.
pub fn sniff_extension(content: &str) -> &'static str {
    SNIFFERS
        .iter()
        .find(|(matches, _)| matches(content))
        .map(|(_, ext)| *ext)
        .unwrap_or(DEFAULT_SNIFFED_EXTENSION)
}

fn looks_like_html_document(content: &str) -> bool {
    content.contains("<!DOCTYPE") || content.contains("<html")
}

fn looks_like_css(content: &str) -> bool {
    CSS_SELECTOR.is_match(content)
}

fn looks_like_es_module(content: &str) -> bool {
    content.contains("import ") && content.contains("from ")
}

fn looks_like_commonjs(content: &str) -> bool {
    content.contains("require(")
}

fn looks_like_python(content: &str) -> bool {
    (content.contains("def ") || content.contains("import "))
        && content.contains("print(")
        && !content.contains("console.")
}

fn looks_like_java(content: &str) -> bool {
    content.contains("package ") || content.contains("public class")
}

fn looks_like_php(content: &str) -> bool {
    content.trim_start().starts_with("<?php")
}

fn starts_with_tag(content: &str) -> bool {
    LEADING_TAG.is_match(content.trim_start())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_table_lookup() {
        assert_eq!(extension_for_language("javascript"), ".js");
        assert_eq!(extension_for_language("ts"), ".ts");
        assert_eq!(extension_for_language("python"), ".py");
        assert_eq!(extension_for_language("yaml"), ".yaml");
        assert_eq!(extension_for_language("yml"), ".yml");
        assert_eq!(extension_for_language("bash"), ".sh");
        assert_eq!(extension_for_language("rust"), ".rs");
        assert_eq!(extension_for_language("ruby"), ".rb");
        assert_eq!(extension_for_language("kotlin"), ".kt");
    }

    #[test]
    fn test_language_lookup_is_case_insensitive() {
        assert_eq!(extension_for_language("HTML"), ".html");
        assert_eq!(extension_for_language("Python"), ".py");
        assert_eq!(extension_for_language(" Go "), ".go");
    }

    #[test]
    fn test_unknown_language_is_txt() {
        assert_eq!(extension_for_language("brainfuck"), UNKNOWN_TAG_EXTENSION);
        assert_eq!(extension_for_language("text"), ".txt");
    }

    #[test]
    fn test_sniff_html_document() {
        assert_eq!(sniff_extension("<!DOCTYPE html>\n<html></html>"), ".html");
        assert_eq!(sniff_extension("some text <html lang=\"en\">"), ".html");
    }

    #[test]
    fn test_sniff_css() {
        assert_eq!(sniff_extension(".container {\n  display: flex;\n}\n"), ".css");
        assert_eq!(sniff_extension("#header{ color: red; }"), ".css");
    }

    #[test]
    fn test_sniff_css_prefers_false_negatives() {
        // Brace after a method call is not a selector
        assert_eq!(sniff_extension("obj.method() {\n}\n"), DEFAULT_SNIFFED_EXTENSION);
        // Selector mid-line is ignored
        assert_eq!(sniff_extension("x = 1; .box { }"), DEFAULT_SNIFFED_EXTENSION);
    }

    #[test]
    fn test_sniff_es_module() {
        assert_eq!(sniff_extension("import React from 'react';\n"), ".js");
    }

    #[test]
    fn test_sniff_commonjs() {
        assert_eq!(sniff_extension("const fs = require('fs');\n"), ".js");
    }

    #[test]
    fn test_sniff_python() {
        assert_eq!(sniff_extension("def main():\n    print('hi')\n"), ".py");
        assert_eq!(sniff_extension("import sys\nprint(sys.argv)\n"), ".py");
    }

    #[test]
    fn test_sniff_python_rejected_when_console_used() {
        let content = "def x\nprint(1)\nconsole.log(2)\n";
        assert_eq!(sniff_extension(content), DEFAULT_SNIFFED_EXTENSION);
    }

    #[test]
    fn test_sniff_python_from_import_is_js() {
        // `from x import y` satisfies the ES module rule first
        let content = "from os import path\nprint(path.sep)\n";
        assert_eq!(sniff_extension(content), ".js");
    }

    #[test]
    fn test_sniff_java() {
        assert_eq!(sniff_extension("package com.example;\n"), ".java");
        assert_eq!(sniff_extension("public class Main {}\n"), ".java");
    }

    #[test]
    fn test_sniff_php() {
        assert_eq!(sniff_extension("<?php echo 'hi'; ?>"), ".php");
    }

    #[test]
    fn test_sniff_leading_tag_is_html() {
        assert_eq!(sniff_extension("<div>hello</div>"), ".html");
        assert_eq!(sniff_extension("  <section></section>"), ".html");
    }

    #[test]
    fn test_sniff_default_is_js_bias() {
        // Known bias: anything unrecognized is treated as JavaScript
        assert_eq!(DEFAULT_SNIFFED_EXTENSION, ".js");
        assert_eq!(sniff_extension("fn main() {}\n"), DEFAULT_SNIFFED_EXTENSION);
        assert_eq!(sniff_extension("SELECT 1;"), DEFAULT_SNIFFED_EXTENSION);
    }
}
