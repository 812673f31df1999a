//! Cadence CLI - checks ISO-8601 repeating interval expressions.

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use cadence_core::config::load_config;
use cadence_iso::iso8601::core::RepeatingInterval;
use cadence_iso::iso8601::parse::{IsoIntervalParser, RepeatingIntervalParser};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "cadence", version, about = "Parse ISO-8601 repeating intervals")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one or more `R[n]/interval` expressions
    Parse {
        /// Expressions to parse, e.g. `R5/PT1H`
        #[arg(required = true)]
        texts: Vec<String>,

        /// Separator between the repetition marker and the interval
        #[arg(short, long)]
        designator: Option<String>,

        /// Accept negative repetition counts
        #[arg(long)]
        allow_negative: bool,
    },
}

fn main() -> Result<ExitCode> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    match cli.command {
        Command::Parse {
            texts,
            designator,
            allow_negative,
        } => {
            let mut parser = RepeatingIntervalParser::from_config(IsoIntervalParser, &config.parse)?;
            if let Some(designator) = designator {
                parser = parser.with_designator(designator);
            }
            if allow_negative {
                parser = parser.with_negative_repetitions(true);
            }

            Ok(run_parse(&parser, &texts, &mut std::io::stdout().lock())?)
        }
    }
}

/// Parses every expression, writing one line per input to `out`.
///
/// ## Errors
/// Returns an error if writing to `out` fails.
fn run_parse<W: Write>(
    parser: &RepeatingIntervalParser,
    texts: &[String],
    out: &mut W,
) -> std::io::Result<ExitCode> {
    let mut failed = 0usize;

    for text in texts {
        match parser.parse(text) {
            Ok(repeating) => writeln!(out, "{text}: {}", describe(&repeating))?,
            Err(e) => {
                failed += 1;
                writeln!(out, "{text}: error: {e}")?;
            }
        }
    }

    tracing::info!(total = texts.len(), failed, "Parsed expressions");

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn describe(repeating: &RepeatingInterval) -> String {
    let repetitions = if repeating.is_infinite() {
        "infinite".to_string()
    } else {
        repeating.repetitions().to_string()
    };

    format!(
        "repetitions={repetitions} interval={:?}",
        repeating.interval()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(parser: &RepeatingIntervalParser, texts: &[&str]) -> (String, ExitCode) {
        let texts: Vec<String> = texts.iter().map(ToString::to_string).collect();
        let mut out = Vec::new();
        let code = run_parse(parser, &texts, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), code)
    }

    fn same_code(left: &ExitCode, right: &ExitCode) -> bool {
        format!("{left:?}") == format!("{right:?}")
    }

    #[test_log::test]
    fn test_run_parse_infinite() {
        let (output, code) = run(&RepeatingIntervalParser::default(), &["R/PT1H"]);

        assert!(output.starts_with("R/PT1H: repetitions=infinite interval="));
        assert_eq!(output.lines().count(), 1);
        assert!(same_code(&code, &ExitCode::SUCCESS));
    }

    #[test_log::test]
    fn test_run_parse_counted() {
        let (output, code) = run(&RepeatingIntervalParser::default(), &["R5/PT1H"]);

        assert!(output.starts_with("R5/PT1H: repetitions=5 interval="));
        assert!(same_code(&code, &ExitCode::SUCCESS));
    }

    #[test_log::test]
    fn test_run_parse_reports_failure() {
        let (output, code) = run(&RepeatingIntervalParser::default(), &["R5/PT1H", "PT1H"]);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("R5/PT1H: repetitions=5"));
        assert_eq!(
            lines[1],
            "PT1H: error: repetition spec must start with R: \"PT1H\" (position 0)"
        );
        assert!(same_code(&code, &ExitCode::FAILURE));
        assert!(!same_code(&code, &ExitCode::SUCCESS));
    }

    #[test]
    fn test_run_parse_custom_designator() {
        let parser = RepeatingIntervalParser::default().with_designator("::");
        let (output, code) = run(&parser, &["R3::PT1M", "R3/PT1M"]);

        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("R3::PT1M: repetitions=3"));
        assert!(lines[1].starts_with("R3/PT1M: error: "));
        assert!(same_code(&code, &ExitCode::FAILURE));
    }

    #[test]
    fn test_describe_negative_allowed() {
        let parser = RepeatingIntervalParser::default().with_negative_repetitions(true);
        let repeating = parser.parse("R-1/PT1H").unwrap();

        assert!(describe(&repeating).starts_with("repetitions=infinite"));
    }

    #[test]
    fn test_cli_parses_arguments() {
        let args = ["cadence", "parse", "-d", "::", "--allow-negative", "R5::PT1H"];
        let cli = Cli::try_parse_from(args).unwrap();

        let Command::Parse {
            texts,
            designator,
            allow_negative,
        } = cli.command;
        assert_eq!(texts, vec!["R5::PT1H".to_string()]);
        assert_eq!(designator.as_deref(), Some("::"));
        assert!(allow_negative);
    }
}
