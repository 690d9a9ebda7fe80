//! Integration tests for end-to-end tokenization.
//!
//! These tests drive the public API the way a language front end would: build
//! a tokenizer, tokenize sources, and walk the tokens with a traverser.

use std::{collections::HashMap, sync::Arc, thread};

use ruletok::{
    config::TokenizerConfig,
    errors::errors::ErrorImpl,
    format_error,
    lexer::{
        builtins::{IdentifierRule, LineCommentRule, NumberRule, QuotedStringRule, WhitespaceRule},
        cursor::Cursor,
        lexer::{tokenize, Tokenizer},
        rules::RuneRule,
        tokens::{Token, TokenKind, TokenValue},
        traverser::Traverser,
    },
    Position, MK_RULES,
};

const INCLUDE: TokenKind = TokenKind::from_static("include");
const SEMICOLON: TokenKind = TokenKind::from_static(";");

/// A tiny concatenative language: words, numbers, strings and `include "file";`.
fn cat_tokenizer() -> Tokenizer {
    Tokenizer::new(MK_RULES![
        WhitespaceRule,
        LineCommentRule::new("#"),
        NumberRule::new(),
        QuotedStringRule::double(),
        IdentifierRule::new().with_keyword("include", INCLUDE),
        RuneRule::new(SEMICOLON, ';'),
    ])
}

fn expand_includes(
    tokenizer: &Tokenizer,
    files: &HashMap<&str, &str>,
    entry: &str,
) -> Result<Vec<Token>, ruletok::errors::errors::Error> {
    let mut traverser = Traverser::from(tokenizer.tokenize_str(files[entry], Some(entry))?);
    let mut expanded = Vec::new();

    while !traverser.is_at_end() {
        if traverser.type_matches(&INCLUDE) {
            traverser.expect_type(&INCLUDE)?;
            let path = traverser.expect_type(&TokenKind::STRING)?;
            traverser.expect_type_and_value(&SEMICOLON, &TokenValue::Rune(';'))?;

            let name = path.value.as_str().unwrap_or_default().to_string();
            let included = tokenizer.tokenize_str(files[name.as_str()], Some(&name))?;
            traverser.splice_front(included);
            continue;
        }

        if let Some(token) = traverser.next_token() {
            expanded.push(token);
        }
    }

    Ok(expanded)
}

#[test]
fn test_include_splicing() {
    let files = HashMap::from([
        ("main.cat", "1 include \"lib.cat\"; dup # comment\nprint"),
        ("lib.cat", "2 include \"deep.cat\";\nadd"),
        ("deep.cat", "\"deep\""),
    ]);

    let tokens = expand_includes(&cat_tokenizer(), &files, "main.cat").unwrap();

    let rendered = tokens.iter().map(|token| token.value.to_string()).collect::<Vec<_>>();
    assert_eq!(rendered, vec!["1", "2", "deep", "add", "dup", "print"]);

    let sources = tokens
        .iter()
        .map(|token| token.origin.as_ref().map(|origin| origin.source.to_string()).unwrap_or_default())
        .collect::<Vec<_>>();
    assert_eq!(sources, vec!["main.cat", "lib.cat", "deep.cat", "lib.cat", "main.cat", "main.cat"]);
    assert_eq!(tokens[5].origin, Some(Position::new("main.cat", 2, 1)));
}

#[test]
fn test_include_missing_semicolon() {
    let files = HashMap::from([("main.cat", "include \"lib.cat\" dup"), ("lib.cat", "")]);

    let error = expand_includes(&cat_tokenizer(), &files, "main.cat").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_position(), Some(&Position::new("main.cat", 1, 19)));
    assert_eq!(
        error.to_string(),
        "expected a ';' token but got a 'identifier' token with value 'dup' at main.cat:1:19"
    );
}

#[test]
fn test_shared_tokenizer_across_threads() {
    let tokenizer = cat_tokenizer();
    let sources = ["1 2 add", "\"a\" \"b\" concat", "3 # nothing\n4 mul", "broken \"string"];

    let results = thread::scope(|scope| {
        let handles = sources
            .iter()
            .enumerate()
            .map(|(index, source)| {
                let tokenizer = &tokenizer;
                let name = format!("thread{}.cat", index);
                scope.spawn(move || tokenizer.tokenize_str(source, Some(&name)))
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });

    assert_eq!(results[0].as_ref().map(Vec::len), Ok(3));
    assert_eq!(results[1].as_ref().map(Vec::len), Ok(3));
    assert_eq!(results[2].as_ref().map(Vec::len), Ok(3));

    let error = results[3].as_ref().unwrap_err();
    assert_eq!(error.get_error_name(), "UnterminatedString");
    assert_eq!(error.get_position(), Some(&Position::new("thread3.cat", 1, 8)));
}

#[test]
fn test_tokenizer_behind_arc() {
    let tokenizer = Arc::new(cat_tokenizer());

    let handle = {
        let tokenizer = Arc::clone(&tokenizer);
        thread::spawn(move || tokenizer.tokenize_str("7 8 9", None))
    };

    let tokens = handle.join().unwrap().unwrap();
    assert_eq!(tokens, tokenizer.tokenize_str("7 8 9", None).unwrap());
}

#[test]
fn test_config_json_end_to_end() {
    let config = TokenizerConfig::from_json(
        r#"{
            "line_comment": "--",
            "quotes": ["'"],
            "keywords": ["select", "from"],
            "punctuation": [",", "*", "<>"],
            "patterns": [{ "kind": "parameter", "regex": "\\$[0-9]+" }]
        }"#,
    )
    .unwrap();
    let tokenizer = config.build().unwrap();

    let tokens = tokenizer
        .tokenize_str("select name, 'x' from t -- rows\n  where id <> $1", Some("query.sql"))
        .unwrap();

    let kinds = tokens.iter().map(|token| token.kind.as_str()).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec!["select", "identifier", ",", "string", "from", "identifier", "identifier", "identifier", "<>", "parameter"]
    );
    assert_eq!(tokens[9].value, TokenValue::from("$1"));
    assert_eq!(tokens[6].origin, Some(Position::new("query.sql", 2, 3)));
}

#[test]
fn test_standard_rules_and_error_rendering() {
    let source = "let total = 0x10 + 2.5;\n  let name = \"ok\\q\";\n";
    let error = tokenize(source, Some(String::from("main.tok"))).unwrap_err();

    assert_eq!(*error.internal(), ErrorImpl::UnknownEscape { escape: 'q', partial: String::from("ok") });
    assert_eq!(error.get_position(), Some(&Position::new("main.tok", 2, 14)));

    let rendered = format_error(&error, source);
    let lines = rendered.lines().collect::<Vec<_>>();
    assert!(lines[0].starts_with("Error: unknown escape 'q'"));
    assert_eq!(lines[1], "-> main.tok");
    assert_eq!(lines[3], "2 | let name = \"ok\\q\";");
    assert_eq!(lines[4], "  | -----------^");
}

#[test]
fn test_standard_rules_round_trip() {
    let tokens = tokenize("x = 42 -7 3.5 0x1F 0b101 0o17 'c';", None).unwrap();

    let values = tokens.iter().map(|token| token.value.clone()).collect::<Vec<_>>();
    assert_eq!(
        values,
        vec![
            TokenValue::from("x"),
            TokenValue::Rune('='),
            TokenValue::Integer(42),
            TokenValue::Integer(-7),
            TokenValue::Float(3.5),
            TokenValue::Integer(31),
            TokenValue::Integer(5),
            TokenValue::Integer(15),
            TokenValue::from("c"),
            TokenValue::Rune(';'),
        ]
    );
}

#[test]
fn test_streaming_input_positions() {
    let text = "a\n\nbb\n";
    let mut cursor = Cursor::new("stream", text.chars());
    let tokens = cat_tokenizer().tokenize(&mut cursor).unwrap();

    let origins = tokens
        .iter()
        .filter_map(|token| token.origin.as_ref())
        .map(|origin| (origin.line, origin.column))
        .collect::<Vec<_>>();
    assert_eq!(origins, vec![(1, 1), (3, 1)]);
    assert_eq!(cursor.current_origin(), Position::new("stream", 4, 1));
}
