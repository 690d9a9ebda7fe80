//! Character cursor with unbounded lookahead and position tracking.

use std::{collections::VecDeque, sync::Arc};

use crate::Position;

/// A pull-based view over a character stream.
///
/// Characters are read from the underlying source only when a `peek` or `next`
/// needs them, and kept in a lookahead buffer until consumed. The position
/// always describes the next character `next()` would return.
pub struct Cursor<'a> {
    source: Box<dyn Iterator<Item = char> + 'a>,
    lookahead: VecDeque<char>,
    origin: Position,
    consumed: usize,
}

impl<'a> Cursor<'a> {
    pub fn new<I>(source_name: impl Into<Arc<str>>, chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
        I::IntoIter: 'a,
    {
        Cursor {
            source: Box::new(chars.into_iter().fuse()),
            lookahead: VecDeque::new(),
            origin: Position::start(source_name),
            consumed: 0,
        }
    }

    pub fn from_text(source_name: impl Into<Arc<str>>, text: &'a str) -> Self {
        Cursor::new(source_name, text.chars())
    }

    /// Returns the character `relative` places after the next one, reading ahead
    /// as far as needed. `None` once the input is exhausted; the source is fused,
    /// so it is never read again after its first `None`.
    pub fn peek(&mut self, relative: usize) -> Option<char> {
        while self.lookahead.len() <= relative {
            let character = self.source.next()?;
            self.lookahead.push_back(character);
        }

        self.lookahead.get(relative).copied()
    }

    pub fn peek_is(&mut self, expected: char) -> bool {
        self.peek(0) == Some(expected)
    }

    /// True if the upcoming characters spell out `expected`.
    ///
    /// The last offset is peeked first so the buffer is filled in one go.
    pub fn peek_matches(&mut self, expected: &str) -> bool {
        let expected = expected.chars().collect::<Vec<_>>();

        (0..expected.len())
            .rev()
            .all(|index| self.peek(index) == Some(expected[index]))
    }

    /// Position of the character that `next()` would return.
    pub fn current_origin(&self) -> Position {
        self.origin.clone()
    }

    pub fn source_name(&self) -> &str {
        &self.origin.source
    }

    /// Number of characters consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn is_at_end(&mut self) -> bool {
        self.peek(0).is_none()
    }

    /// Consumes characters while `predicate` holds and returns them.
    pub fn consume_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> String {
        let mut consumed = String::new();

        while let Some(character) = self.peek(0) {
            if !predicate(character) {
                break;
            }
            self.next();
            consumed.push(character);
        }

        consumed
    }

    /// Consumes characters until `predicate` holds (or input ends) and returns them.
    pub fn consume_until(&mut self, mut predicate: impl FnMut(char) -> bool) -> String {
        self.consume_while(|character| !predicate(character))
    }
}

impl Iterator for Cursor<'_> {
    type Item = char;

    /// Consumes one character. At end of input this keeps returning `None` and
    /// leaves the position where it is.
    fn next(&mut self) -> Option<char> {
        if self.lookahead.is_empty() {
            self.peek(0)?;
        }

        let character = self.lookahead.pop_front()?;
        self.origin = self.origin.advanced(character);
        self.consumed += 1;

        Some(character)
    }
}
