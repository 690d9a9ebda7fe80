//! Error types and error handling for the tokenizer.
//!
//! This module defines the error values produced while tokenizing and
//! traversing tokens. It includes:
//!
//! - An error structure carrying an optional source position
//! - Specific error variants for the engine, the built-in rules and the traverser
//! - Error formatting and helpful suggestions

pub mod errors;
