//! Implementation of `evidence convert` subcommand.

use std::{
    collections::HashMap,
    io::{BufRead, Write},
    time::Instant,
};

use clap::Parser;
use thousands::Separable;

use crate::{
    common::{self, io::open_tsv_reader, io::open_write_maybe_gz},
    err::RowError,
};

use super::{
    builder::build_evidence_record,
    conf::{parse_date, EvidenceConf},
    input::{EvidenceInput, InputFormat, SimpleRecord, TieringRecord},
};

/// What to do with rows that cannot be converted.
#[derive(
    clap::ValueEnum,
    Clone,
    Copy,
    Debug,
    Default,
    strum::Display,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[strum(serialize_all = "snake_case")]
pub enum OnRowError {
    /// Stop at the first failing row with an error.
    #[default]
    Abort,
    /// Log and count failing rows, then continue.
    Skip,
}

/// Command line arguments for `evidence convert` subcommand.
#[derive(Parser, Debug)]
#[command(author, version, about = "Convert TSV to Open Targets evidence JSONL", long_about = None)]
pub struct Args {
    /// Path to input TSV file, `-` for stdin.
    #[arg(long)]
    pub path_input: String,
    /// Path to output JSONL file, `-` for stdout.
    #[arg(long, default_value = common::STDIO_PATH)]
    pub path_output: String,
    /// Layout of the input file.
    #[arg(long, value_enum, default_value_t = InputFormat::default())]
    pub input_format: InputFormat,
    /// Handling of rows that cannot be converted.
    #[arg(long, value_enum, default_value_t = OnRowError::default())]
    pub on_row_error: OnRowError,

    /// Optional path to TOML file with assertion metadata.
    #[arg(long)]
    pub path_conf: Option<String>,
    /// Override the source identifier.
    #[arg(long)]
    pub source_id: Option<String>,
    /// Override the assertion date, format `YYYY-MM-DDTHH:MM:SS`.
    #[arg(long)]
    pub date_asserted: Option<String>,
    /// Override the score used when the input has none.
    #[arg(long)]
    pub default_score: Option<f64>,
    /// Override the provenance database ID.
    #[arg(long)]
    pub database_id: Option<String>,
    /// Override the provenance database version.
    #[arg(long)]
    pub database_version: Option<String>,
}

/// Counts reported at the end of a conversion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Number of records written.
    pub processed: usize,
    /// Number of rows skipped because of row errors.
    pub skipped: usize,
}

/// Build the assertion metadata from the configuration file and overrides.
pub fn load_conf(args: &Args) -> Result<EvidenceConf, anyhow::Error> {
    let mut conf = match &args.path_conf {
        Some(path_conf) => EvidenceConf::from_toml_path(path_conf)?,
        None => EvidenceConf::default(),
    };

    if let Some(source_id) = &args.source_id {
        conf.source_id = source_id.clone();
    }
    if let Some(date_asserted) = &args.date_asserted {
        conf.date_asserted = parse_date(date_asserted)?;
    }
    if let Some(default_score) = args.default_score {
        conf.default_score = default_score;
    }
    if let Some(database_id) = &args.database_id {
        conf.database_id = database_id.clone();
    }
    if let Some(database_version) = &args.database_version {
        conf.database_version = database_version.clone();
    }
    conf.validate()?;

    Ok(conf)
}

/// Open the input file and check that the header has all required columns.
pub fn open_checked_reader(
    path_input: &str,
    input_format: InputFormat,
) -> Result<csv::Reader<Box<dyn BufRead>>, anyhow::Error> {
    let mut reader = open_tsv_reader(path_input)?;
    let header = reader.headers()?;
    tracing::debug!("columns in {}: {:?}", path_input, header);
    common::check_columns(path_input, header, input_format.required_columns())?;
    Ok(reader)
}

/// Whether `err` concerns the content of a single data row, as opposed to
/// reading the input as a whole.
fn is_row_error(err: &csv::Error) -> bool {
    matches!(
        err.kind(),
        csv::ErrorKind::Utf8 { .. }
            | csv::ErrorKind::UnequalLengths { .. }
            | csv::ErrorKind::Deserialize { .. }
    )
}

/// Convert all rows from `reader` and write one JSON record per line.
///
/// The header of `reader` must have been checked already, see
/// `open_checked_reader()`.
pub fn write_records<R, W>(
    reader: &mut csv::Reader<R>,
    writer: &mut W,
    conf: &EvidenceConf,
    input_format: InputFormat,
    on_row_error: OnRowError,
) -> Result<ConvertSummary, anyhow::Error>
where
    R: std::io::Read,
    W: Write,
{
    let rows: Box<dyn Iterator<Item = Result<EvidenceInput, csv::Error>> + '_> =
        match input_format {
            InputFormat::Tiering => Box::new(
                reader
                    .deserialize::<TieringRecord>()
                    .map(|r| r.map(EvidenceInput::from)),
            ),
            InputFormat::Simple => {
                let has_consequence_column = reader
                    .headers()?
                    .iter()
                    .any(|h| h == SimpleRecord::CONSEQUENCE_COLUMN);
                Box::new(
                    reader
                        .deserialize::<SimpleRecord>()
                        .map(move |r| r.map(|record| record.into_input(has_consequence_column))),
                )
            }
        };

    let mut summary = ConvertSummary::default();
    // unique association key -> first data row number
    let mut seen: HashMap<Vec<String>, usize> = HashMap::new();
    for (i, row) in rows.enumerate() {
        let row_no = i + 1;
        let input = match row {
            Ok(input) => Ok(input),
            Err(e) if is_row_error(&e) => Err(RowError::Malformed(e.to_string())),
            Err(e) => {
                return Err(
                    anyhow::Error::new(e).context(format!("could not read data row {}", row_no))
                );
            }
        };

        let result = input.and_then(|input| {
            let record = build_evidence_record(conf, &input)?;
            let key = input
                .association_key()
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>();
            match seen.get(&key) {
                Some(first_row_no) => Err(RowError::DuplicateAssociation(
                    key.join("/"),
                    *first_row_no,
                )),
                None => {
                    seen.insert(key, row_no);
                    Ok(record)
                }
            }
        });

        match (result, on_row_error) {
            (Ok(record), _) => {
                serde_json::to_writer(&mut *writer, &record)?;
                writeln!(writer)?;
                summary.processed += 1;
            }
            (Err(e), OnRowError::Abort) => {
                writer.flush()?;
                return Err(
                    anyhow::Error::new(e).context(format!("problem in data row {}", row_no))
                );
            }
            (Err(e), OnRowError::Skip) => {
                tracing::warn!("skipping data row {}: {}", row_no, e);
                summary.skipped += 1;
            }
        }
    }
    writer.flush()?;

    Ok(summary)
}

/// Main entry point for `evidence convert` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    let before_anything = Instant::now();
    tracing::info!("ot-evidence-worker {}", common::worker_version());
    tracing::info!("args_common = {:?}", &args_common);
    tracing::info!("args = {:?}", &args);

    let conf = load_conf(args)?;
    tracing::debug!("conf = {:?}", &conf);

    let summary = convert(args, &conf)?;

    tracing::info!(
        "Processed {} objects, skipped {} rows",
        summary.processed.separate_with_commas(),
        summary.skipped.separate_with_commas()
    );
    tracing::info!(
        "All of `evidence convert` completed in {:?}",
        before_anything.elapsed()
    );
    Ok(())
}

/// Perform the conversion as configured in `args`.
///
/// The output file is only created after the input header has been checked.
pub fn convert(args: &Args, conf: &EvidenceConf) -> Result<ConvertSummary, anyhow::Error> {
    tracing::info!("Reading TSV from {}", &args.path_input);
    let mut reader = open_checked_reader(&args.path_input, args.input_format)?;
    let mut writer = open_write_maybe_gz(&args.path_output).map_err(|e| {
        anyhow::anyhow!("could not open file {} for writing: {}", &args.path_output, e)
    })?;
    let summary = write_records(
        &mut reader,
        &mut writer,
        conf,
        args.input_format,
        args.on_row_error,
    )?;
    writer
        .finish()
        .map_err(|e| anyhow::anyhow!("could not finish writing {}: {}", &args.path_output, e))?;
    Ok(summary)
}
