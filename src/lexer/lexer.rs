use tracing::{debug, trace};

use crate::{
    config::TokenizerConfig,
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{cursor::Cursor, rules::Rule, tokens::Token};

/// An ordered list of rules with first-match-wins dispatch.
///
/// The tokenizer holds no per-session state: one instance can tokenize any
/// number of inputs, one after another or from several threads at once.
#[derive(Default)]
pub struct Tokenizer {
    rules: Vec<Box<dyn Rule>>,
}

impl Tokenizer {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Tokenizer { rules }
    }

    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.push_rule(rule);
        self
    }

    pub fn push_rule(&mut self, rule: impl Rule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name())
    }

    /// Drains `cursor` into tokens.
    ///
    /// At every step the first rule whose `can_start` holds consumes the input.
    /// Tokens without an origin get the position where the rule started, and so
    /// do errors. The first error ends the session.
    ///
    /// # Panics
    ///
    /// Panics if a rule returns `Ok` without consuming anything.
    pub fn tokenize(&self, cursor: &mut Cursor<'_>) -> Result<Vec<Token>, Error> {
        debug!(target: "ruletok::lexer", source = cursor.source_name(), rules = self.rules.len(), "Tokenizing");

        let mut tokens = Vec::new();

        while let Some(character) = cursor.peek(0) {
            let start_origin = cursor.current_origin();
            let start_consumed = cursor.consumed();

            let Some(rule) = self.rules.iter().find(|rule| rule.can_start(cursor)) else {
                let error = Error::new(ErrorImpl::UnexpectedCharacter { character }, start_origin);
                debug!(target: "ruletok::lexer", %error, "Tokenizing failed");
                return Err(error);
            };

            let produced = match rule.consume(cursor) {
                Ok(produced) => produced,
                Err(error) => {
                    let error = error.or_at(start_origin);
                    debug!(target: "ruletok::lexer", rule = rule.name(), %error, "Tokenizing failed");
                    return Err(error);
                }
            };

            if cursor.consumed() == start_consumed {
                panic!(
                    "rule `{}` matched at {} without consuming any input",
                    rule.name(),
                    start_origin
                );
            }

            match produced {
                Some(mut token) => {
                    if token.origin.is_none() {
                        token.origin = Some(start_origin);
                    }
                    trace!(target: "ruletok::lexer", rule = rule.name(), token = %token, "Produced token");
                    tokens.push(token);
                }
                None => {
                    trace!(target: "ruletok::lexer", rule = rule.name(), at = %start_origin, "Suppressed input");
                }
            }
        }

        debug!(target: "ruletok::lexer", source = cursor.source_name(), tokens = tokens.len(), "Tokenized");
        Ok(tokens)
    }

    /// Tokenizes an in-memory string. `origin` names the source in positions and
    /// defaults to [`Position::STRING_SOURCE`].
    pub fn tokenize_str(&self, text: &str, origin: Option<&str>) -> Result<Vec<Token>, Error> {
        let mut cursor = Cursor::from_text(origin.unwrap_or(Position::STRING_SOURCE), text);
        self.tokenize(&mut cursor)
    }
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.rule_names()).finish()
    }
}

/// Tokenizes `source` with the standard rule set of [`TokenizerConfig::default`].
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let tokenizer = TokenizerConfig::default().build()?;
    tokenizer.tokenize_str(source, file.as_deref())
}
