use std::{borrow::Cow, fmt::Display};

use crate::Position;

/// The type tag of a token.
///
/// Token kinds are consumer-defined names; two kinds are equal when their names
/// are equal. Constants can be declared with [`TokenKind::from_static`]:
///
/// ```
/// use ruletok::lexer::tokens::TokenKind;
///
/// const SEMICOLON: TokenKind = TokenKind::from_static(";");
/// assert_eq!(SEMICOLON, TokenKind::new(String::from(";")));
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Hash, PartialOrd, Ord)]
pub struct TokenKind(Cow<'static, str>);

impl TokenKind {
    pub const IDENTIFIER: TokenKind = TokenKind::from_static("identifier");
    pub const INTEGER: TokenKind = TokenKind::from_static("integer");
    pub const FLOAT: TokenKind = TokenKind::from_static("float");
    pub const STRING: TokenKind = TokenKind::from_static("string");

    pub const fn from_static(name: &'static str) -> Self {
        TokenKind(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        TokenKind(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the kinds produced by the built-in number rule.
    pub fn is_numeric(&self) -> bool {
        *self == TokenKind::INTEGER || *self == TokenKind::FLOAT
    }
}

impl From<&'static str> for TokenKind {
    fn from(name: &'static str) -> Self {
        TokenKind::from_static(name)
    }
}

impl From<String> for TokenKind {
    fn from(name: String) -> Self {
        TokenKind::new(name)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum TokenValue {
    #[default]
    None,
    Integer(i64),
    Float(f64),
    String(String),
    Rune(char),
}

impl TokenValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            TokenValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            TokenValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_rune(&self) -> Option<char> {
        match self {
            TokenValue::Rune(value) => Some(*value),
            _ => None,
        }
    }
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenValue::None => write!(f, ""),
            TokenValue::Integer(value) => write!(f, "{}", value),
            TokenValue::Float(value) => write!(f, "{}", value),
            TokenValue::String(value) => write!(f, "{}", value),
            TokenValue::Rune(value) => write!(f, "{}", value),
        }
    }
}

impl From<i64> for TokenValue {
    fn from(value: i64) -> Self {
        TokenValue::Integer(value)
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        TokenValue::Float(value)
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::String(value)
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::String(String::from(value))
    }
}

impl From<char> for TokenValue {
    fn from(value: char) -> Self {
        TokenValue::Rune(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    /// Where the token started. Filled in by the tokenizer when the rule that
    /// produced the token left it empty.
    pub origin: Option<Position>,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<TokenValue>) -> Self {
        Token {
            kind,
            value: value.into(),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: Position) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn is_kind(&self, kind: &TokenKind) -> bool {
        self.kind == *kind
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().any(|kind| self.is_kind(kind))
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.value, &self.origin) {
            (TokenValue::None, Some(origin)) => write!(f, "{} at {}", self.kind, origin),
            (TokenValue::None, None) => write!(f, "{}", self.kind),
            (value, Some(origin)) => write!(f, "{} ({}) at {}", self.kind, value, origin),
            (value, None) => write!(f, "{} ({})", self.kind, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Token, TokenKind, TokenValue};
    use crate::Position;

    const TYPE_0: TokenKind = TokenKind::from_static("type0");
    const TYPE_1: TokenKind = TokenKind::from_static("type1");

    #[test]
    fn test_token_equality() {
        let token_0a = Token::new(TYPE_0, 5_i64);
        let token_0b = Token::new(TokenKind::new("type0"), 5_i64);
        let token_1 = Token::new(TYPE_1, 5_i64);

        assert_eq!(token_0a, token_0b);
        assert_ne!(token_0a, token_1);
        assert_eq!(token_0a.origin, None);
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenKind::IDENTIFIER, "foo").with_origin(Position::new("a.tok", 2, 4));
        assert_eq!(token.to_string(), "identifier (foo) at a.tok:2:4");

        let token = Token::new(TokenKind::from_static("eof"), TokenValue::None);
        assert_eq!(token.to_string(), "eof");
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(TokenValue::from(42_i64).as_integer(), Some(42));
        assert_eq!(TokenValue::from(1.5).as_float(), Some(1.5));
        assert_eq!(TokenValue::from("abc").as_str(), Some("abc"));
        assert_eq!(TokenValue::from('x').as_rune(), Some('x'));
        assert_eq!(TokenValue::from('x').as_str(), None);
    }

    #[test]
    fn test_numeric_kinds() {
        assert!(TokenKind::INTEGER.is_numeric());
        assert!(TokenKind::FLOAT.is_numeric());
        assert!(!TokenKind::STRING.is_numeric());
        assert!(Token::new(TokenKind::FLOAT, 1.0).is_one_of_many(&[TokenKind::INTEGER, TokenKind::FLOAT]));
    }
}
