//! Open Targets evidence worker main executable

pub mod common;
pub mod err;
pub mod evidence;
pub mod sample;

use clap::{Args, Parser, Subcommand};
use console::{Emoji, Term};

/// CLI parser based on clap.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Open Targets genetic association evidence",
    long_about = "This tool converts genetic association TSV files to Open Targets evidence strings"
)]
struct Cli {
    /// Commonly used arguments
    #[command(flatten)]
    common: common::Args,

    /// The sub command to run
    #[command(subcommand)]
    command: Commands,
}

/// Enum supporting the parsing of top-level commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Evidence string related commands.
    Evidence(Evidence),
    /// Sample data related commands.
    Sample(Sample),
}

/// Parsing of "evidence *" sub commands.
#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
struct Evidence {
    /// The sub command to run
    #[command(subcommand)]
    command: EvidenceCommands,
}

/// Enum supporting the parsing of "evidence *" sub commands.
#[derive(Debug, Subcommand)]
enum EvidenceCommands {
    Convert(evidence::convert::Args),
    Consequences(evidence::list_consequences::Args),
}

/// Parsing of "sample *" sub commands.
#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
struct Sample {
    /// The sub command to run
    #[command(subcommand)]
    command: SampleCommands,
}

/// Enum supporting the parsing of "sample *" sub commands.
#[derive(Debug, Subcommand)]
enum SampleCommands {
    RandomTsv(sample::random_tsv::Args),
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Build a tracing subscriber according to the configuration in `cli.common`.
    // Logs go to stderr, stdout carries the records.
    let collector = tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(match cli.common.verbose.log_level() {
            Some(level) => match level {
                log::Level::Error => tracing::Level::ERROR,
                log::Level::Warn => tracing::Level::WARN,
                log::Level::Info => tracing::Level::INFO,
                log::Level::Debug => tracing::Level::DEBUG,
                log::Level::Trace => tracing::Level::TRACE,
            },
            None => tracing::Level::INFO,
        })
        .compact()
        .finish();

    // Install collector and go into sub commands.
    let term = Term::stderr();
    tracing::subscriber::with_default(collector, || {
        match &cli.command {
            Commands::Evidence(evidence) => match &evidence.command {
                EvidenceCommands::Convert(args) => {
                    evidence::convert::run(&cli.common, args)?;
                }
                EvidenceCommands::Consequences(args) => {
                    evidence::list_consequences::run(&cli.common, args)?;
                }
            },
            Commands::Sample(sample) => match &sample.command {
                SampleCommands::RandomTsv(args) => {
                    sample::random_tsv::run(&cli.common, args)?;
                }
            },
        }

        Ok::<(), anyhow::Error>(())
    })?;
    term.write_line(&format!("All done. Have a nice day!{}", Emoji(" 😃", "")))?;

    Ok(())
}
