//! Ready-made rules for the usual pieces of a C-like language: whitespace,
//! identifiers, numbers, quoted strings, comments and regex patterns.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::errors::{Error, ErrorImpl};

use super::{
    cursor::Cursor,
    rules::Rule,
    tokens::{Token, TokenKind, TokenValue},
};

lazy_static! {
    /// Character following a `\` inside a quoted string, mapped to what it stands for.
    pub static ref ESCAPE_LOOKUP: HashMap<char, &'static str> = {
        let mut map = HashMap::new();
        map.insert('\\', "\\");
        map.insert('\'', "'");
        map.insert('"', "\"");
        map.insert('n', "\n");
        map.insert('r', "\r");
        map.insert('t', "\t");
        map
    };
}

/// Skips a single whitespace character without producing a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceRule;

impl Rule for WhitespaceRule {
    fn can_start(&self, cursor: &mut Cursor<'_>) -> bool {
        cursor.peek(0).is_some_and(char::is_whitespace)
    }

    fn consume(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, Error> {
        match cursor.next() {
            Some(character) if character.is_whitespace() => Ok(None),
            other => panic!(
                "WhitespaceRule consumed {:?} at {}; can_start must hold before consume",
                other,
                cursor.current_origin()
            ),
        }
    }
}

/// Matches a C-style identifier: a letter or `_` followed by letters, digits
/// or `_`.
///
/// Words registered with [`IdentifierRule::with_keyword`] produce their own
/// kind instead, so `while` can be a keyword while `whiley` stays an identifier.
#[derive(Debug, Clone)]
pub struct IdentifierRule {
    kind: TokenKind,
    keywords: HashMap<String, TokenKind>,
}

impl IdentifierRule {
    pub fn new() -> Self {
        IdentifierRule {
            kind: TokenKind::IDENTIFIER,
            keywords: HashMap::new(),
        }
    }

    pub fn with_kind(mut self, kind: TokenKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_keyword(mut self, word: impl Into<String>, kind: TokenKind) -> Self {
        self.keywords.insert(word.into(), kind);
        self
    }

    pub fn with_keywords<I, W>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = (W, TokenKind)>,
        W: Into<String>,
    {
        self.keywords
            .extend(keywords.into_iter().map(|(word, kind)| (word.into(), kind)));
        self
    }
}

impl Default for IdentifierRule {
    fn default() -> Self {
        IdentifierRule::new()
    }
}

impl Rule for IdentifierRule {
    fn can_start(&self, cursor: &mut Cursor<'_>) -> bool {
        cursor
            .peek(0)
            .is_some_and(|character| character.is_alphabetic() || character == '_')
    }

    fn consume(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, Error> {
        let word = cursor.consume_while(|character| character.is_alphanumeric() || character == '_');
        if word.is_empty() {
            return Err(Error::unpositioned(ErrorImpl::EmptyIdentifier));
        }

        let kind = self.keywords.get(&word).unwrap_or(&self.kind).clone();
        Ok(Some(Token::new(kind, word)))
    }
}

/// Matches integer and float literals.
///
/// Decimal literals may start with `+` or `-`. `0b`, `0o` and `0x` select base
/// 2, 8 and 16 and take no sign. `_` separators are ignored. A decimal literal
/// containing `.` is a float, everything else is an integer.
#[derive(Debug, Clone)]
pub struct NumberRule {
    integer_kind: TokenKind,
    float_kind: TokenKind,
}

impl NumberRule {
    pub fn new() -> Self {
        NumberRule {
            integer_kind: TokenKind::INTEGER,
            float_kind: TokenKind::FLOAT,
        }
    }

    pub fn with_kinds(integer_kind: TokenKind, float_kind: TokenKind) -> Self {
        NumberRule {
            integer_kind,
            float_kind,
        }
    }
}

impl Default for NumberRule {
    fn default() -> Self {
        NumberRule::new()
    }
}

fn is_number_body(character: char) -> bool {
    character.is_alphanumeric() || character == '.' || character == '_'
}

fn base_for_prefix(character: char) -> Option<u32> {
    match character {
        'b' => Some(2),
        'o' => Some(8),
        'x' => Some(16),
        _ => None,
    }
}

impl Rule for NumberRule {
    fn can_start(&self, cursor: &mut Cursor<'_>) -> bool {
        match cursor.peek(0) {
            Some(character) if character.is_ascii_digit() => true,
            Some('+' | '-') => cursor.peek(1).is_some_and(|next| next.is_ascii_digit()),
            _ => false,
        }
    }

    fn consume(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, Error> {
        let base_prefix = match (cursor.peek(0), cursor.peek(1)) {
            (Some('0'), Some(prefix)) => base_for_prefix(prefix).map(|base| (prefix, base)),
            _ => None,
        };

        let (header, base) = match base_prefix {
            Some((prefix, base)) => {
                cursor.next();
                cursor.next();
                (format!("0{}", prefix), base)
            }
            None => (String::new(), 10),
        };

        let mut digits = String::new();
        if base == 10 {
            if let Some(sign @ ('+' | '-')) = cursor.peek(0) {
                cursor.next();
                digits.push(sign);
            }
        }
        digits.push_str(&cursor.consume_while(is_number_body));
        let digits = digits.replace('_', "");
        let literal = format!("{}{}", header, digits);

        if digits.is_empty() {
            return Err(Error::unpositioned(ErrorImpl::InvalidNumber { literal }));
        }

        let value = if base != 10 || !digits.contains('.') {
            i64::from_str_radix(&digits, base)
                .map(TokenValue::Integer)
                .map_err(|error| error.to_string())
        } else {
            digits
                .parse::<f64>()
                .map(TokenValue::Float)
                .map_err(|error| error.to_string())
        };

        match value {
            Ok(value @ TokenValue::Integer(_)) => Ok(Some(Token::new(self.integer_kind.clone(), value))),
            Ok(value) => Ok(Some(Token::new(self.float_kind.clone(), value))),
            Err(reason) => Err(Error::unpositioned(ErrorImpl::NumberParseError { literal, reason })),
        }
    }
}

/// Matches a string enclosed in `quote`, resolving `\` escapes through
/// [`ESCAPE_LOOKUP`].
#[derive(Debug, Clone)]
pub struct QuotedStringRule {
    quote: char,
    kind: TokenKind,
}

impl QuotedStringRule {
    pub fn new(quote: char) -> Self {
        QuotedStringRule {
            quote,
            kind: TokenKind::STRING,
        }
    }

    pub fn double() -> Self {
        QuotedStringRule::new('"')
    }

    pub fn single() -> Self {
        QuotedStringRule::new('\'')
    }

    pub fn with_kind(mut self, kind: TokenKind) -> Self {
        self.kind = kind;
        self
    }
}

impl Rule for QuotedStringRule {
    fn can_start(&self, cursor: &mut Cursor<'_>) -> bool {
        cursor.peek_is(self.quote)
    }

    fn consume(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, Error> {
        cursor.next();

        let mut string = String::new();
        let mut escaped = false;

        while let Some(character) = cursor.peek(0) {
            if !escaped && character == self.quote {
                break;
            }
            cursor.next();

            if escaped {
                let Some(replacement) = ESCAPE_LOOKUP.get(&character) else {
                    return Err(Error::unpositioned(ErrorImpl::UnknownEscape {
                        escape: character,
                        partial: string,
                    }));
                };
                string.push_str(replacement);
                escaped = false;
            } else if character == '\\' {
                escaped = true;
            } else {
                string.push(character);
            }
        }

        if escaped || cursor.next() != Some(self.quote) {
            return Err(Error::unpositioned(ErrorImpl::UnterminatedString {
                partial: string,
            }));
        }

        Ok(Some(Token::new(self.kind.clone(), string)))
    }
}

/// Skips everything from `prefix` up to, but not including, the next newline.
#[derive(Debug, Clone)]
pub struct LineCommentRule {
    prefix: String,
}

impl LineCommentRule {
    /// # Panics
    ///
    /// Panics if `prefix` is empty.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        assert!(!prefix.is_empty(), "a line comment needs a non-empty prefix");

        LineCommentRule { prefix }
    }
}

impl Rule for LineCommentRule {
    fn can_start(&self, cursor: &mut Cursor<'_>) -> bool {
        cursor.peek_matches(&self.prefix)
    }

    fn consume(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, Error> {
        for _ in self.prefix.chars() {
            cursor.next();
        }
        cursor.consume_until(|character| character == '\n');
        Ok(None)
    }
}

/// Matches a regular expression at the cursor.
///
/// The expression is first evaluated over `window` characters of lookahead.
/// A match reaching the end of the window while input remains is retried over a
/// doubled window, so lexemes are never cut. A pattern that cannot start
/// matching within the window does not fire. Empty matches never fire.
#[derive(Debug, Clone)]
pub struct PatternRule {
    kind: Option<TokenKind>,
    regex: Regex,
    window: usize,
}

impl PatternRule {
    pub const DEFAULT_WINDOW: usize = 64;

    /// A rule producing `kind` tokens holding the matched text.
    pub fn new(kind: TokenKind, pattern: &str) -> Result<Self, regex::Error> {
        Ok(PatternRule {
            kind: Some(kind),
            regex: anchored(pattern)?,
            window: PatternRule::DEFAULT_WINDOW,
        })
    }

    /// A rule that drops whatever the pattern matches.
    pub fn skipping(pattern: &str) -> Result<Self, regex::Error> {
        Ok(PatternRule {
            kind: None,
            regex: anchored(pattern)?,
            window: PatternRule::DEFAULT_WINDOW,
        })
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    fn match_length(&self, cursor: &mut Cursor<'_>) -> Option<usize> {
        let mut window = self.window;

        loop {
            let lookahead = (0..window)
                .map_while(|index| cursor.peek(index))
                .collect::<String>();

            let length = self
                .regex
                .find(&lookahead)
                .filter(|found| found.start() == 0 && !found.is_empty())
                .map(|found| found.as_str().chars().count())?;

            if length < window || cursor.peek(window).is_none() {
                return Some(length);
            }
            window = window.saturating_mul(2);
        }
    }
}

fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})", pattern))
}

impl Rule for PatternRule {
    fn can_start(&self, cursor: &mut Cursor<'_>) -> bool {
        self.match_length(cursor).is_some()
    }

    fn consume(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, Error> {
        let length = self.match_length(cursor).unwrap_or(0);
        let text = (0..length).filter_map(|_| cursor.next()).collect::<String>();

        Ok(self.kind.clone().map(|kind| Token::new(kind, text)))
    }

    fn name(&self) -> &str {
        self.regex.as_str()
    }
}
