use std::{fs::read_to_string, path::PathBuf, process, time::Instant};

use clap::Parser;
use tracing::{debug, info, Level};

use ruletok::{
    config::TokenizerConfig,
    errors::errors::{Error, ErrorImpl},
    format_error,
    lexer::{tokens::TokenValue, traverser::Traverser},
};

mod logging;

use logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(name = "ruletok", version, about = "Tokenize a file and print its tokens")]
struct Cli {
    /// JSON tokenizer configuration (default: the standard rule set)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Extra keyword, lexed with its own kind (repeatable)
    #[arg(long = "keyword", value_name = "WORD")]
    keywords: Vec<String>,

    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,

    /// Level for the tokenizer's own logs, overriding --log-level
    #[arg(long, value_name = "LEVEL")]
    lexer_log_level: Option<Level>,

    /// Level for the traverser's logs, overriding --log-level
    #[arg(long, value_name = "LEVEL")]
    traverser_log_level: Option<Level>,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// File to tokenize
    file: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    logging::init(&log_config(&cli), cli.log_format);

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.to_string_lossy().into_owned());

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: cannot read '{}': {}", cli.file.display(), error);
            process::exit(1);
        }
    };

    let start = Instant::now();

    let tokens = load_config(&cli)
        .and_then(|config| config.build())
        .and_then(|tokenizer| tokenizer.tokenize_str(&source, Some(&file_name)));

    let tokens = match tokens {
        Ok(tokens) => tokens,
        Err(error) => {
            eprint!("{}", format_error(&error, &source));
            process::exit(1);
        }
    };

    info!(target: "ruletok::cli", count = tokens.len(), "Tokenized in {:?}", start.elapsed());

    let mut traverser = Traverser::from(tokens);
    while let Some(token) = traverser.next_token() {
        let location = token
            .origin
            .as_ref()
            .map(|origin| format!("{}:{}", origin.line, origin.column))
            .unwrap_or_default();

        match &token.value {
            TokenValue::None => println!("{:<8}  {}", location, token.kind),
            TokenValue::String(value) => println!("{:<8}  {}  {:?}", location, token.kind, value),
            value => println!("{:<8}  {}  {}", location, token.kind, value),
        }
    }
}

fn log_config(cli: &Cli) -> LogConfig {
    LogConfig {
        global: cli.log_level,
        lexer: cli.lexer_log_level,
        traverser: cli.traverser_log_level,
    }
}

fn load_config(cli: &Cli) -> Result<TokenizerConfig, Error> {
    let mut config = match &cli.config {
        Some(path) => {
            debug!(target: "ruletok::cli", path = %path.display(), "Reading tokenizer configuration");
            let json = read_to_string(path).map_err(|error| {
                Error::unpositioned(ErrorImpl::InvalidConfig {
                    message: format!("cannot read '{}': {}", path.display(), error),
                })
            })?;
            TokenizerConfig::from_json(&json)?
        }
        None => TokenizerConfig::default(),
    };

    config.keywords.extend(cli.keywords.iter().cloned());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tracing::Level;

    use super::{log_config, Cli};
    use crate::logging::{LEXER_TARGET, TRAVERSER_TARGET};

    #[test]
    fn test_per_target_log_levels() {
        let cli = Cli::try_parse_from([
            "ruletok",
            "--log-level",
            "info",
            "--traverser-log-level",
            "trace",
            "input.tok",
        ])
        .unwrap();
        let config = log_config(&cli);

        assert_eq!(config.level_for(TRAVERSER_TARGET), Level::TRACE);
        assert_eq!(config.level_for(LEXER_TARGET), Level::INFO);
    }

    #[test]
    fn test_default_log_levels() {
        let cli = Cli::try_parse_from(["ruletok", "input.tok"]).unwrap();
        let config = log_config(&cli);

        assert_eq!(config.global, Level::WARN);
        assert_eq!(config.traverser, None);
        assert_eq!(config.lexer, None);
    }
}
