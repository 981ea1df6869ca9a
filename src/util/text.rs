//! Text metrics and plain-text normalization for field content

use std::sync::OnceLock;

use regex::Regex;

/// Tag-shaped substrings, including runs of adjacent tags
static MARKUP_REGEX: OnceLock<Regex> = OnceLock::new();

/// A whitespace run, or one non-breaking-space entity
static SPACE_REGEX: OnceLock<Regex> = OnceLock::new();

static WHITESPACE_RUN_REGEX: OnceLock<Regex> = OnceLock::new();

static LINE_BREAK_REGEX: OnceLock<Regex> = OnceLock::new();

fn markup_regex() -> &'static Regex {
    MARKUP_REGEX.get_or_init(|| {
        Regex::new(r#"(</*[\w\s='":;,\-]*/*>)+"#).expect("Invalid markup regex")
    })
}

fn space_regex() -> &'static Regex {
    SPACE_REGEX.get_or_init(|| Regex::new(r"\s+|&nbsp;").expect("Invalid space regex"))
}

fn whitespace_run_regex() -> &'static Regex {
    WHITESPACE_RUN_REGEX.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"))
}

fn line_break_regex() -> &'static Regex {
    LINE_BREAK_REGEX.get_or_init(|| Regex::new(r"\r\n|\n|\r").expect("Invalid line break regex"))
}

/// Placeholder character substituted for whitespace before counting
const SPACE_MARKER: &str = "_";

/// Plain-text length of a field's markup.
///
/// Tags are stripped, then every whitespace run and every `&nbsp;` counts as
/// one character. Other character references are counted as written.
/// An empty block (`<p><br></p>`) has length 0.
pub fn markup_length(markup: &str) -> usize {
    let stripped = markup_regex().replace_all(markup, "");
    space_regex()
        .replace_all(&stripped, SPACE_MARKER)
        .chars()
        .count()
}

/// Collapse every whitespace run (including line breaks) to one space
pub fn collapse_whitespace(text: &str) -> String {
    whitespace_run_regex().replace_all(text, " ").into_owned()
}

/// Split pasted text into lines, treating `\r\n` as a single break
pub fn split_lines(text: &str) -> Vec<&str> {
    line_break_regex().split(text).collect()
}

/// Single-line value of rendered text: line breaks become spaces and trailing
/// whitespace is dropped.
pub fn single_line_value(text: &str) -> String {
    line_break_regex()
        .replace_all(text, " ")
        .trim_end()
        .to_string()
}
