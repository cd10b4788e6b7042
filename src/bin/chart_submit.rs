//! chart-submit CLI entry point.
//!
//! Reads chart option text, posts it to a render service and writes the SVG
//! or PNG answer.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;

use chart_submit::api::{EXAMPLE_OPTION, Notifier, OptionSubmitter, SubmitterConfig};
use chart_submit::core::{EChartsSummary, OutputKind, parse_chart_spec};
use chart_submit::telemetry;
use chart_submit::transport::{HttpTransport, RenderTransport};

#[derive(Parser, Debug)]
#[command(name = "chart-submit")]
#[command(version)]
#[command(about = "Render chart options through a chart render service", long_about = None)]
struct Cli {
    /// Root URL of the render service
    #[arg(long, env = "CHART_SUBMIT_URL", global = true)]
    url: Option<String>,

    /// JSON config file (base_url, output_kind, timeout_ms)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Log request details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render an option and print or save the result
    Submit {
        /// Option file, `-` for stdin; the example option when omitted
        #[arg(short, long)]
        input: Option<String>,

        /// Output kind: svg or png
        #[arg(short = 't', long)]
        output_type: Option<OutputKind>,

        /// Write the rendered file (SVG text or decoded PNG) here
        #[arg(short, long, conflicts_with_all = ["json", "markup"])]
        out: Option<PathBuf>,

        /// Print the display markup, an `<img>` tag for png
        #[arg(long, conflicts_with = "json")]
        markup: bool,

        /// Print the result as a JSON document
        #[arg(long)]
        json: bool,
    },

    /// Parse an option and summarize it without sending it
    Inspect {
        /// Option file, `-` for stdin; the example option when omitted
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Print the example option
    Example,

    /// Check that the render service answers
    Ping,
}

/// Where and how `submit` emits its result.
#[derive(Debug, PartialEq, Eq)]
enum OutputMode {
    /// Decoded bytes written to a file.
    File(PathBuf),
    /// JSON contract on stdout.
    Json,
    /// Display markup on stdout.
    Markup,
    /// Raw base64 payload on stdout (png only).
    Payload,
}

impl OutputMode {
    fn select(kind: OutputKind, out: Option<PathBuf>, markup: bool, json: bool) -> Self {
        match out {
            Some(path) => Self::File(path),
            None if json => Self::Json,
            None if kind == OutputKind::Png && !markup => Self::Payload,
            None => Self::Markup,
        }
    }
}

enum CliError {
    /// Already shown to the user by the notifier.
    Reported,
    Message(String),
}

impl<E: std::error::Error> From<E> for CliError {
    fn from(err: E) -> Self {
        Self::Message(err.to_string())
    }
}

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _ = telemetry::init_tracing_with_filter(if cli.verbose { "debug" } else { "warn" });

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Reported) => ExitCode::FAILURE,
        Err(CliError::Message(message)) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.base_url = url;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = Some(timeout_ms);
    }

    match cli.command {
        Commands::Submit {
            input,
            output_type,
            out,
            markup,
            json,
        } => {
            if let Some(kind) = output_type {
                config.output_kind = kind;
            }
            let transport = HttpTransport::new(&config)?;
            let mut submitter =
                OptionSubmitter::new(transport, config)?.with_notifier(Box::new(StderrNotifier));
            submitter.set_editor_text(read_option_text(input.as_deref())?);

            let result = submitter.run().map_err(|_| CliError::Reported)?;
            match OutputMode::select(result.kind, out, markup, json) {
                OutputMode::File(path) => {
                    let bytes = result.to_bytes()?;
                    fs::write(&path, &bytes).map_err(|e| {
                        CliError::Message(format!("failed to write `{}`: {e}", path.display()))
                    })?;
                    info!(path = %path.display(), bytes = bytes.len(), "wrote render output");
                }
                OutputMode::Json => println!("{}", result.to_json_contract_v1_pretty()?),
                OutputMode::Payload => println!("{}", result.payload),
                OutputMode::Markup => {
                    let mut stdout = io::stdout().lock();
                    stdout.write_all(submitter.display_markup().as_bytes())?;
                    stdout.write_all(b"\n")?;
                }
            }
            Ok(())
        }
        Commands::Inspect { input } => {
            let spec = parse_chart_spec(&read_option_text(input.as_deref())?)?;
            let summary = EChartsSummary::from_spec(&spec);
            print!("{summary}");
            for warning in summary.warnings() {
                println!("warning: {warning}");
            }
            Ok(())
        }
        Commands::Example => {
            print!("{EXAMPLE_OPTION}");
            Ok(())
        }
        Commands::Ping => {
            config.validate()?;
            HttpTransport::new(&config)?.ping()?;
            println!("pong");
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SubmitterConfig, CliError> {
    let Some(path) = path else {
        return Ok(SubmitterConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|e| {
        CliError::Message(format!("failed to read config `{}`: {e}", path.display()))
    })?;
    Ok(SubmitterConfig::from_json_str(&text)?)
}

fn read_option_text(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None => Ok(EXAMPLE_OPTION.to_owned()),
        Some("-") => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        Some(path) => fs::read_to_string(path)
            .map_err(|e| CliError::Message(format!("failed to read `{path}`: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit_mode(args: &[&str]) -> Result<OutputMode, clap::Error> {
        let cli = Cli::try_parse_from(["chart-submit", "submit"].into_iter().chain(args.iter().copied()))?;
        let Commands::Submit {
            output_type,
            out,
            markup,
            json,
            ..
        } = cli.command
        else {
            panic!("expected submit command");
        };
        Ok(OutputMode::select(
            output_type.unwrap_or_default(),
            out,
            markup,
            json,
        ))
    }

    #[test]
    fn out_file_conflicts_with_stdout_formats() {
        for args in [
            &["--json", "--out", "chart.svg"][..],
            &["--markup", "-o", "chart.svg"][..],
            &["--markup", "--json"][..],
        ] {
            let err = submit_mode(args).expect_err("conflicting output modes");
            assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
        }
    }

    #[test]
    fn output_mode_follows_flags_and_kind() {
        assert_eq!(
            submit_mode(&["--out", "chart.png", "-t", "png"]).expect("parse"),
            OutputMode::File(PathBuf::from("chart.png"))
        );
        assert_eq!(submit_mode(&["--json"]).expect("parse"), OutputMode::Json);
        assert_eq!(submit_mode(&[]).expect("parse"), OutputMode::Markup);
        assert_eq!(
            submit_mode(&["-t", "png"]).expect("parse"),
            OutputMode::Payload
        );
        assert_eq!(
            submit_mode(&["-t", "PNG", "--markup"]).expect("parse"),
            OutputMode::Markup
        );
    }
}
