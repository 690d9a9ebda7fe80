use std::collections::VecDeque;

use tracing::trace;

use crate::errors::errors::{Error, ErrorImpl};

use super::tokens::{Token, TokenKind, TokenValue};

/// A token-level cursor for parsers sitting on top of the tokenizer.
///
/// Tokens are consumed from the front. New tokens can be spliced into the
/// remaining sequence, which is how include-style directives are expanded.
#[derive(Debug, Clone, Default)]
pub struct Traverser {
    tokens: VecDeque<Token>,
}

impl Traverser {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Traverser {
            tokens: tokens.into_iter().collect(),
        }
    }

    pub fn peek_token(&self, relative: usize) -> Option<&Token> {
        self.tokens.get(relative)
    }

    pub fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.pop_front();
        if let Some(token) = &token {
            trace!(target: "ruletok::traverser", token = %token, "Consumed token");
        }
        token
    }

    pub fn is_at_end(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of tokens left.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn type_matches(&self, kind: &TokenKind) -> bool {
        self.peek_token(0).is_some_and(|token| token.is_kind(kind))
    }

    pub fn any_type_matches(&self, kinds: &[TokenKind]) -> bool {
        self.peek_token(0)
            .is_some_and(|token| token.is_one_of_many(kinds))
    }

    pub fn value_matches(&self, kind: &TokenKind, value: &TokenValue) -> bool {
        self.peek_token(0)
            .is_some_and(|token| token.is_kind(kind) && token.value == *value)
    }

    /// Consumes the next token whatever its kind. `expected` only names what
    /// was wanted if the input has run out.
    pub fn expect_token(&mut self, expected: &TokenKind) -> Result<Token, Error> {
        self.next_token().ok_or_else(|| {
            Error::unpositioned(ErrorImpl::UnexpectedEndOfInput {
                expected: expected.clone(),
            })
        })
    }

    /// Consumes the next token and checks its kind. The token is consumed even
    /// when the check fails.
    pub fn expect_type(&mut self, expected: &TokenKind) -> Result<Token, Error> {
        let token = self.expect_token(expected)?;

        if !token.is_kind(expected) {
            return Err(positioned(
                ErrorImpl::UnexpectedToken {
                    expected: expected.clone(),
                    received: token.kind.clone(),
                    value: token.value.clone(),
                },
                &token,
            ));
        }

        Ok(token)
    }

    pub fn expect_type_and_value(
        &mut self,
        expected: &TokenKind,
        expected_value: &TokenValue,
    ) -> Result<Token, Error> {
        let token = self.expect_type(expected)?;

        if token.value != *expected_value {
            return Err(positioned(
                ErrorImpl::UnexpectedTokenValue {
                    expected: expected.clone(),
                    expected_value: expected_value.clone(),
                    received: token.kind.clone(),
                    value: token.value.clone(),
                },
                &token,
            ));
        }

        Ok(token)
    }

    /// Inserts `tokens` ahead of everything not yet consumed, keeping their order.
    pub fn splice_front(&mut self, tokens: impl IntoIterator<Item = Token>) {
        self.splice_at(0, tokens);
    }

    /// Inserts `tokens` before the `index`th remaining token.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than [`Traverser::len`].
    pub fn splice_at(&mut self, index: usize, tokens: impl IntoIterator<Item = Token>) {
        assert!(
            index <= self.tokens.len(),
            "splice index {} is past the {} remaining tokens",
            index,
            self.tokens.len()
        );

        let tail = self.tokens.split_off(index);
        let before = self.tokens.len();
        self.tokens.extend(tokens);
        trace!(target: "ruletok::traverser", index, count = self.tokens.len() - before, "Spliced tokens");
        self.tokens.extend(tail);
    }

    pub fn into_remaining(self) -> Vec<Token> {
        self.tokens.into()
    }
}

impl From<Vec<Token>> for Traverser {
    fn from(tokens: Vec<Token>) -> Self {
        Traverser {
            tokens: tokens.into(),
        }
    }
}

fn positioned(error: ErrorImpl, token: &Token) -> Error {
    match &token.origin {
        Some(origin) => Error::new(error, origin.clone()),
        None => Error::unpositioned(error),
    }
}

#[cfg(test)]
mod tests {
    use super::Traverser;
    use crate::{
        errors::errors::ErrorImpl,
        lexer::tokens::{Token, TokenKind, TokenValue},
        Position,
    };

    const LEFT: TokenKind = TokenKind::from_static("(");
    const RIGHT: TokenKind = TokenKind::from_static(")");

    fn sample() -> Traverser {
        Traverser::new(vec![
            Token::new(LEFT, '(').with_origin(Position::new("t", 1, 1)),
            Token::new(TokenKind::IDENTIFIER, "x").with_origin(Position::new("t", 1, 2)),
            Token::new(RIGHT, ')').with_origin(Position::new("t", 1, 3)),
        ])
    }

    #[test]
    fn test_exhaustion() {
        let mut traverser = sample();

        assert_eq!(traverser.len(), 3);
        assert!(traverser.next_token().is_some());
        assert!(traverser.next_token().is_some());
        assert!(traverser.next_token().is_some());
        assert!(traverser.is_at_end());
        assert_eq!(traverser.next_token(), None);
        assert_eq!(traverser.peek_token(0), None);
        assert!(!traverser.type_matches(&LEFT));

        let error = traverser.expect_type(&RIGHT).unwrap_err();
        assert_eq!(
            *error.internal(),
            ErrorImpl::UnexpectedEndOfInput { expected: RIGHT }
        );
        assert_eq!(error.get_position(), None);
    }

    #[test]
    fn test_matches() {
        let traverser = sample();

        assert!(traverser.type_matches(&LEFT));
        assert!(traverser.any_type_matches(&[RIGHT, LEFT]));
        assert!(!traverser.any_type_matches(&[RIGHT]));
        assert!(traverser.value_matches(&LEFT, &TokenValue::Rune('(')));
        assert!(!traverser.value_matches(&LEFT, &TokenValue::Rune(')')));
        assert_eq!(traverser.peek_token(2).map(|token| &token.kind), Some(&RIGHT));
    }

    #[test]
    fn test_expect_type_mismatch_consumes() {
        let mut traverser = sample();

        let error = traverser.expect_type(&RIGHT).unwrap_err();
        assert_eq!(error.get_error_name(), "UnexpectedToken");
        assert_eq!(error.get_position(), Some(&Position::new("t", 1, 1)));
        assert_eq!(traverser.len(), 2);

        let token = traverser.expect_type(&TokenKind::IDENTIFIER).unwrap();
        assert_eq!(token.value.as_str(), Some("x"));
    }

    #[test]
    fn test_expect_type_and_value() {
        let mut traverser = sample();
        traverser.next_token();

        let error = traverser
            .expect_type_and_value(&TokenKind::IDENTIFIER, &TokenValue::from("y"))
            .unwrap_err();
        assert_eq!(error.get_error_name(), "UnexpectedTokenValue");
        assert_eq!(error.get_position(), Some(&Position::new("t", 1, 2)));

        assert!(traverser
            .expect_type_and_value(&RIGHT, &TokenValue::Rune(')'))
            .is_ok());
    }

    #[test]
    fn test_splice_front_keeps_order() {
        let mut traverser = sample();
        traverser.next_token();

        traverser.splice_front(vec![
            Token::new(TokenKind::INTEGER, 1_i64),
            Token::new(TokenKind::INTEGER, 2_i64),
        ]);

        let values = traverser
            .into_remaining()
            .into_iter()
            .map(|token| token.value.to_string())
            .collect::<Vec<_>>();
        assert_eq!(values, vec!["1", "2", "x", ")"]);
    }

    #[test]
    fn test_splice_at_end() {
        let mut traverser = sample();
        traverser.splice_at(3, vec![Token::new(TokenKind::STRING, "tail")]);

        assert_eq!(traverser.len(), 4);
        assert_eq!(
            traverser.peek_token(3).and_then(|token| token.value.as_str()),
            Some("tail")
        );
    }

    #[test]
    #[should_panic(expected = "past the")]
    fn test_splice_past_end_panics() {
        let mut traverser = sample();
        traverser.splice_at(4, Vec::new());
    }
}
