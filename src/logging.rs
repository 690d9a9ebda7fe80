//! CLI logging setup.
//!
//! Installs a `tracing-subscriber` registry filtered per target, so the
//! tokenizer can be traced without the traverser flooding the output.

use std::io;

use clap::ValueEnum;
use tracing::Level;
use tracing_subscriber::{filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

pub const LEXER_TARGET: &str = "ruletok::lexer";
pub const TRAVERSER_TARGET: &str = "ruletok::traverser";
pub const CLI_TARGET: &str = "ruletok::cli";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Multi-line, coloured output
    Pretty,
    /// One line per event
    Compact,
    /// Newline-delimited JSON
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub lexer: Option<Level>,
    pub traverser: Option<Level>,
}

impl LogConfig {
    pub fn level_for(&self, target: &str) -> Level {
        match target {
            LEXER_TARGET => self.lexer.unwrap_or(self.global),
            TRAVERSER_TARGET => self.traverser.unwrap_or(self.global),
            _ => self.global,
        }
    }
}

/// Installs the global subscriber. Logs go to stderr so the token listing on
/// stdout stays machine readable.
pub fn init(log_config: &LogConfig, format: LogFormat) {
    let targets = Targets::new()
        .with_default(log_config.global)
        .with_target(LEXER_TARGET, log_config.level_for(LEXER_TARGET))
        .with_target(TRAVERSER_TARGET, log_config.level_for(TRAVERSER_TARGET))
        .with_target(CLI_TARGET, log_config.global);

    tracing_subscriber::registry()
        .with(create_format_layer(format, io::stderr).with_filter(targets))
        .init();
}

fn create_format_layer<W, F>(format: LogFormat, make_writer: F) -> Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>
where
    W: io::Write + Send + Sync + 'static,
    F: Fn() -> W + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
    }
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::{LogConfig, LEXER_TARGET, TRAVERSER_TARGET};

    #[test]
    fn test_level_for_target() {
        let config = LogConfig {
            global: Level::INFO,
            lexer: Some(Level::TRACE),
            traverser: None,
        };

        assert_eq!(config.level_for(LEXER_TARGET), Level::TRACE);
        assert_eq!(config.level_for(TRAVERSER_TARGET), Level::INFO);
        assert_eq!(config.level_for("elsewhere"), Level::INFO);
    }
}
