#![allow(clippy::module_inception)]

use std::{fmt::Display, sync::Arc};

use crate::errors::errors::{Error, ErrorTip};

pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;

/// Where a character or token came from.
///
/// `line` and `column` are 1-based and count characters, not bytes. A position
/// is never mutated: the cursor derives a fresh one for every consumed
/// character, so tokens holding older positions stay valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub source: Arc<str>,
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Source name used when tokenizing an in-memory string.
    pub const STRING_SOURCE: &'static str = "<string>";

    pub fn new(source: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Position {
            source: source.into(),
            line,
            column,
        }
    }

    /// The position of the first character of `source`.
    pub fn start(source: impl Into<Arc<str>>) -> Self {
        Position::new(source, 1, 1)
    }

    /// Returns the position that follows this one once `character` is consumed.
    pub fn advanced(&self, character: char) -> Self {
        if character == '\n' {
            Position {
                source: Arc::clone(&self.source),
                line: self.line + 1,
                column: 1,
            }
        } else {
            Position {
                source: Arc::clone(&self.source),
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

/// Returns the text of the 1-based `line` of `source`, without its line ending.
pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    let index = line.checked_sub(1)? as usize;

    source
        .split_inclusive('\n')
        .nth(index)
        .map(|text| text.trim_end_matches(|c: char| c == '\n' || c == '\r'))
}

/// Renders `error` against the source text it was produced from.
///
/// ```text
/// Error: unterminated string "abc" at main.tok:2:9
/// -> main.tok
///   |
/// 2 | let s = "abc
///   | --------^
/// ```
pub fn format_error(error: &Error, source: &str) -> String {
    let mut output = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}\n", error)
    } else {
        format!("Error: {} ({})\n", error, error.get_tip())
    };

    let Some(position) = error.get_position() else {
        return output;
    };

    output.push_str(&format!("-> {}\n", position.source));

    let Some(line_text) = get_line_at_position(source, position.line) else {
        return output;
    };

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    let arrows = (position.column as usize)
        .saturating_sub(removed_whitespace)
        .max(1);

    output.push_str(&format!("{:>padding$}\n", "|"));
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));
    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    output
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start_matches(|c: char| c == ' ' || c == '\t');
    let removed = string[..string.len() - trimmed.len()].chars().count();

    (trimmed, removed)
}
