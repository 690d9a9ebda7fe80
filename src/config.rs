//! Declarative tokenizer setup.
//!
//! A [`TokenizerConfig`] names which built-in rules to use and with what
//! parameters, and can be read from JSON. [`TokenizerConfig::build`] turns it
//! into a [`Tokenizer`] with a fixed rule order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::{
        builtins::{IdentifierRule, LineCommentRule, NumberRule, PatternRule, QuotedStringRule, WhitespaceRule},
        lexer::Tokenizer,
        rules::{LiteralRule, RuneRule},
        tokens::TokenKind,
    },
};

/// Punctuation of the standard rule set.
pub const DEFAULT_PUNCTUATION: &[&str] = &[
    "==", "!=", "<=", ">=", "&&", "||", "->", "+=", "-=", "++", "--", "(", ")", "{", "}", "[",
    "]", ";", ":", ",", ".", "+", "-", "*", "/", "%", "=", "<", ">", "!", "?",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    pub skip_whitespace: bool,
    /// Prefix starting a comment that runs to the end of the line.
    pub line_comment: Option<String>,
    pub numbers: bool,
    pub identifiers: bool,
    /// One string rule per quote character.
    pub quotes: Vec<char>,
    /// Words lexed with their own kind instead of `identifier`. The kind is the word.
    pub keywords: Vec<String>,
    /// Fixed symbols. The kind of each is the symbol itself.
    pub punctuation: Vec<String>,
    pub patterns: Vec<PatternConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Kind of the produced tokens. Required unless `skip` is set.
    #[serde(default)]
    pub kind: Option<String>,
    pub regex: String,
    #[serde(default)]
    pub window: Option<usize>,
    #[serde(default)]
    pub skip: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig {
            skip_whitespace: true,
            line_comment: Some(String::from("//")),
            numbers: true,
            identifiers: true,
            quotes: vec!['"', '\''],
            keywords: Vec::new(),
            punctuation: DEFAULT_PUNCTUATION.iter().map(|symbol| symbol.to_string()).collect(),
            patterns: Vec::new(),
        }
    }
}

impl TokenizerConfig {
    /// A configuration with every rule turned off.
    pub fn empty() -> Self {
        TokenizerConfig {
            skip_whitespace: false,
            line_comment: None,
            numbers: false,
            identifiers: false,
            quotes: Vec::new(),
            keywords: Vec::new(),
            punctuation: Vec::new(),
            patterns: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|error| invalid(error.to_string()))
    }

    /// Builds the tokenizer. Rules are registered as whitespace, line comment,
    /// patterns, numbers, strings, identifiers and finally punctuation, longest
    /// symbol first so `==` wins over `=`.
    pub fn build(&self) -> Result<Tokenizer, Error> {
        let mut tokenizer = Tokenizer::default();

        if self.skip_whitespace {
            tokenizer.push_rule(WhitespaceRule);
        }

        if let Some(prefix) = &self.line_comment {
            if prefix.is_empty() {
                return Err(invalid("line comment prefix must not be empty"));
            }
            tokenizer.push_rule(LineCommentRule::new(prefix.as_str()));
        }

        for pattern in &self.patterns {
            tokenizer.push_rule(pattern.build()?);
        }

        if self.numbers {
            tokenizer.push_rule(NumberRule::new());
        }

        for quote in &self.quotes {
            tokenizer.push_rule(QuotedStringRule::new(*quote));
        }

        if self.identifiers {
            if let Some(keyword) = self.keywords.iter().find(|keyword| keyword.is_empty()) {
                return Err(invalid(format!("keyword {:?} must not be empty", keyword)));
            }
            tokenizer.push_rule(IdentifierRule::new().with_keywords(
                self.keywords
                    .iter()
                    .map(|keyword| (keyword.as_str(), TokenKind::new(keyword.as_str()))),
            ));
        } else if !self.keywords.is_empty() {
            return Err(invalid("keywords need identifiers to be enabled"));
        }

        let mut punctuation = self.punctuation.iter().collect::<Vec<_>>();
        if punctuation.iter().any(|symbol| symbol.is_empty()) {
            return Err(invalid("punctuation must not contain empty symbols"));
        }
        punctuation.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
        punctuation.dedup();

        for symbol in punctuation {
            let kind = TokenKind::new(symbol.as_str());
            let mut chars = symbol.chars();
            match (chars.next(), chars.next()) {
                (Some(rune), None) => tokenizer.push_rule(RuneRule::new(kind, rune)),
                _ => tokenizer.push_rule(LiteralRule::new(kind, symbol.as_str())),
            }
        }

        debug!(target: "ruletok::lexer", rules = tokenizer.len(), "Built tokenizer from configuration");
        Ok(tokenizer)
    }
}

impl PatternConfig {
    fn build(&self) -> Result<PatternRule, Error> {
        let rule = match (&self.kind, self.skip) {
            (_, true) => PatternRule::skipping(&self.regex),
            (Some(kind), false) => PatternRule::new(TokenKind::new(kind.as_str()), &self.regex),
            (None, false) => {
                return Err(invalid(format!(
                    "pattern {:?} needs a kind unless it is skipped",
                    self.regex
                )))
            }
        }
        .map_err(|error| invalid(format!("bad pattern {:?}: {}", self.regex, error)))?;

        Ok(match self.window {
            Some(window) => rule.with_window(window),
            None => rule,
        })
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::unpositioned(ErrorImpl::InvalidConfig {
        message: message.into(),
    })
}
