//! The rule abstraction driven by the tokenizer, plus the rules that match
//! fixed text.

use crate::errors::errors::{Error, ErrorImpl};

use super::{
    cursor::Cursor,
    tokens::{Token, TokenKind},
};

/// A unit of lexical recognition.
///
/// The tokenizer asks every rule, in registration order, whether it can start
/// at the cursor. The first rule that answers `true` is asked to `consume`.
///
/// * `can_start` may peek as far ahead as it likes but must not consume.
/// * `consume` is only called right after `can_start` returned `true`. It must
///   consume at least one character and returns `Ok(None)` to drop the input
///   without producing a token.
pub trait Rule: Send + Sync {
    fn can_start(&self, cursor: &mut Cursor<'_>) -> bool;

    fn consume(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, Error>;

    /// Label used in logs and contract-violation panics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

pub type CanStartFn = fn(&mut Cursor<'_>) -> bool;
pub type ConsumeFn = fn(&mut Cursor<'_>) -> Result<Option<Token>, Error>;

/// A rule assembled from two plain functions.
#[derive(Clone, Copy)]
pub struct CallbackRule {
    name: &'static str,
    can_start: CanStartFn,
    consume: ConsumeFn,
}

impl CallbackRule {
    pub fn new(name: &'static str, can_start: CanStartFn, consume: ConsumeFn) -> Self {
        CallbackRule {
            name,
            can_start,
            consume,
        }
    }
}

impl Rule for CallbackRule {
    fn can_start(&self, cursor: &mut Cursor<'_>) -> bool {
        (self.can_start)(cursor)
    }

    fn consume(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, Error> {
        (self.consume)(cursor)
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Matches one fixed character and produces a token holding it.
#[derive(Debug, Clone)]
pub struct RuneRule {
    kind: TokenKind,
    rune: char,
}

impl RuneRule {
    pub fn new(kind: TokenKind, rune: char) -> Self {
        RuneRule { kind, rune }
    }
}

impl Rule for RuneRule {
    fn can_start(&self, cursor: &mut Cursor<'_>) -> bool {
        cursor.peek_is(self.rune)
    }

    fn consume(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, Error> {
        let received = cursor.next();
        if received != Some(self.rune) {
            return Err(Error::unpositioned(ErrorImpl::RuneMismatch {
                expected: self.rune,
                received,
            }));
        }

        Ok(Some(Token::new(self.kind.clone(), self.rune)))
    }
}

/// Matches a fixed word and produces a token holding it.
#[derive(Debug, Clone)]
pub struct LiteralRule {
    kind: TokenKind,
    literal: String,
    chars: Vec<char>,
}

impl LiteralRule {
    /// # Panics
    ///
    /// Panics if `literal` is empty: such a rule would match without consuming.
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        let literal = literal.into();
        assert!(
            !literal.is_empty(),
            "cannot create a LiteralRule with an empty string to match on"
        );

        LiteralRule {
            kind,
            chars: literal.chars().collect(),
            literal,
        }
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }
}

impl Rule for LiteralRule {
    fn can_start(&self, cursor: &mut Cursor<'_>) -> bool {
        // Peek the full length first so the cursor buffers once.
        (0..self.chars.len())
            .rev()
            .all(|index| cursor.peek(index) == Some(self.chars[index]))
    }

    fn consume(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, Error> {
        for (index, expected) in self.chars.iter().enumerate() {
            let received = cursor.next();
            if received != Some(*expected) {
                return Err(Error::unpositioned(ErrorImpl::LiteralMismatch {
                    expected: self.literal.clone(),
                    received,
                    index,
                }));
            }
        }

        Ok(Some(Token::new(self.kind.clone(), self.literal.as_str())))
    }

    fn name(&self) -> &str {
        &self.literal
    }
}
