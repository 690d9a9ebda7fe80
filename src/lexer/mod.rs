//! Lexical analysis: a character cursor, the rules that recognise tokens, the
//! tokenizer that dispatches between them and a token-level traverser for the
//! parsers built on top.

pub mod builtins;
pub mod cursor;
pub mod lexer;
pub mod rules;
pub mod tokens;
pub mod traverser;
