use std::fmt::Display;

use thiserror::Error;

use crate::{
    lexer::tokens::{TokenKind, TokenValue},
    Position,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Option<Position>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position: Some(position),
        }
    }

    /// An error that does not yet know where it happened. Rules return these and
    /// the tokenizer attaches the start of the failing token.
    pub fn unpositioned(error_impl: ErrorImpl) -> Self {
        Error {
            internal_error: error_impl,
            position: None,
        }
    }

    /// Attaches `position` unless the error already carries one.
    pub fn or_at(mut self, position: Position) -> Self {
        if self.position.is_none() {
            self.position = Some(position);
        }
        self
    }

    pub fn get_position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn internal(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// True for the consistency checks that can only fail when a rule is driven
    /// against its own `can_start` answer: a bug in the host, not bad input.
    pub fn is_logic_error(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::RuneMismatch { .. } | ErrorImpl::LiteralMismatch { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorImpl::EmptyIdentifier => "EmptyIdentifier",
            ErrorImpl::InvalidNumber { .. } => "InvalidNumber",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnknownEscape { .. } => "UnknownEscape",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::RuneMismatch { .. } => "RuneMismatch",
            ErrorImpl::LiteralMismatch { .. } => "LiteralMismatch",
            ErrorImpl::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenValue { .. } => "UnexpectedTokenValue",
            ErrorImpl::InvalidConfig { .. } => "InvalidConfig",
            ErrorImpl::Custom { .. } => "Custom",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { character } => ErrorTip::Suggestion(format!(
                "No rule can start at `{}`, is a rule for it missing?",
                character.escape_default()
            )),
            ErrorImpl::InvalidNumber { .. } => ErrorTip::Suggestion(String::from(
                "A base prefix must be followed by at least one digit",
            )),
            ErrorImpl::NumberParseError { literal, .. } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit or malformed?",
                literal
            )),
            ErrorImpl::UnknownEscape { .. } => ErrorTip::Suggestion(String::from(
                "Supported escapes are \\\\, \\', \\\", \\n, \\r and \\t",
            )),
            ErrorImpl::UnterminatedString { .. } => {
                ErrorTip::Suggestion(String::from("Did you forget the closing quote?"))
            }
            ErrorImpl::UnexpectedEndOfInput { expected } => {
                ErrorTip::Suggestion(format!("Input ended while expecting `{}`", expected))
            }
            ErrorImpl::EmptyIdentifier
            | ErrorImpl::RuneMismatch { .. }
            | ErrorImpl::LiteralMismatch { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenValue { .. }
            | ErrorImpl::InvalidConfig { .. }
            | ErrorImpl::Custom { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.position {
            Some(position) => write!(f, "{} at {}", self.internal_error, position),
            None => write!(f, "{}", self.internal_error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unexpected character '{character}'")]
    UnexpectedCharacter { character: char },
    #[error("expected an identifier but got an empty identifier")]
    EmptyIdentifier,
    #[error("expected a number but got '{literal}'")]
    InvalidNumber { literal: String },
    #[error("invalid number literal '{literal}': {reason}")]
    NumberParseError { literal: String, reason: String },
    #[error("unknown escape '{escape}' while tokenizing string {partial:?}")]
    UnknownEscape { escape: char, partial: String },
    #[error("unterminated string {partial:?}")]
    UnterminatedString { partial: String },
    #[error("expected a '{expected}' rune but got {}", describe(.received))]
    RuneMismatch {
        expected: char,
        received: Option<char>,
    },
    #[error("expected word '{expected}' but got {} at offset {index}", describe(.received))]
    LiteralMismatch {
        expected: String,
        received: Option<char>,
        index: usize,
    },
    #[error("expected a '{expected}' token but got end of input")]
    UnexpectedEndOfInput { expected: TokenKind },
    #[error("expected a '{expected}' token but got a '{received}' token with value '{value}'")]
    UnexpectedToken {
        expected: TokenKind,
        received: TokenKind,
        value: TokenValue,
    },
    #[error("expected a '{expected}' token with value '{expected_value}' but got a '{received}' token with value '{value}'")]
    UnexpectedTokenValue {
        expected: TokenKind,
        expected_value: TokenValue,
        received: TokenKind,
        value: TokenValue,
    },
    #[error("invalid tokenizer configuration: {message}")]
    InvalidConfig { message: String },
    #[error("{message}")]
    Custom { message: String },
}

fn describe(received: &Option<char>) -> String {
    match received {
        Some(character) => format!("'{}'", character),
        None => String::from("end of input"),
    }
}
