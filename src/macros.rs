//! Utility macros for building tokens and rule lists.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_RULES!` - Boxes a list of rules for `Tokenizer::new`
//! - `MK_LITERAL_RULE!` - Creates a rule for a fixed word whose kind is the word itself

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - Anything convertible into a TokenValue
/// * `$origin` - Optional source position
///
/// # Example
///
/// ```
/// use ruletok::{lexer::tokens::TokenKind, Position, MK_TOKEN};
///
/// let token = MK_TOKEN!(TokenKind::INTEGER, 42_i64, Position::new("a.tok", 1, 1));
/// assert_eq!(token.value.as_integer(), Some(42));
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr) => {
        $crate::lexer::tokens::Token::new($kind, $value)
    };
    ($kind:expr, $value:expr, $origin:expr) => {
        $crate::lexer::tokens::Token::new($kind, $value).with_origin($origin)
    };
}

/// Builds a `Vec<Box<dyn Rule>>` from rule values, in dispatch order.
///
/// # Example
///
/// ```
/// use ruletok::{lexer::{builtins::{NumberRule, WhitespaceRule}, lexer::Tokenizer}, MK_RULES};
///
/// let tokenizer = Tokenizer::new(MK_RULES![WhitespaceRule, NumberRule::new()]);
/// assert_eq!(tokenizer.len(), 2);
/// ```
#[macro_export]
macro_rules! MK_RULES {
    ($($rule:expr),* $(,)?) => {
        vec![$(Box::new($rule) as Box<dyn $crate::lexer::rules::Rule>),*]
    };
}

/// Creates a rule matching a fixed word. The produced kind is the word itself,
/// so `MK_LITERAL_RULE!("==")` yields tokens of kind `==`.
#[macro_export]
macro_rules! MK_LITERAL_RULE {
    ($literal:literal) => {
        $crate::lexer::rules::LiteralRule::new(
            $crate::lexer::tokens::TokenKind::from_static($literal),
            $literal,
        )
    };
}
