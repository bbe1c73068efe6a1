//! Implementation of `evidence consequences` subcommand.

use std::io::Write;

use clap::Parser;
use strum::IntoEnumIterator;

use crate::common::{self, io::open_write_maybe_gz};

use super::consequences::ConsequenceType;

/// Command line arguments for `evidence consequences` subcommand.
#[derive(Parser, Debug)]
#[command(author, version, about = "List accepted consequence types", long_about = None)]
pub struct Args {
    /// Path to output TSV file, `-` for stdout.
    #[arg(long, default_value = common::STDIO_PATH)]
    pub path_output: String,
}

/// Write the lookup table as TSV with header.
pub fn write_table<W: Write>(writer: W) -> Result<(), anyhow::Error> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);
    writer.write_record(["consequence_type", "so_term"])?;
    for csq in ConsequenceType::iter() {
        writer.write_record([csq.to_string(), csq.so_term()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Main entry point for `evidence consequences` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    tracing::info!("args_common = {:?}", &args_common);
    tracing::info!("args = {:?}", &args);

    let mut writer = open_write_maybe_gz(&args.path_output)?;
    write_table(&mut writer)?;
    writer.finish()?;

    Ok(())
}
