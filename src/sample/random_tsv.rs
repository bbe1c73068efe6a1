//! Implementation of `sample random-tsv` subcommand.
//!
//! Builds random rows from the values actually occurring in a TSV file,
//! e.g., to create test input for `evidence convert`.

use std::io::Write;

use clap::Parser;
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use rand::{rngs::StdRng, Rng, SeedableRng};
use thousands::Separable;

use crate::{
    common::{self, io::open_tsv_reader, io::open_write_maybe_gz},
    err::ConfigError,
};

use super::phenotypes::{PhenotypeMapper, TsvPhenotypeMapper};

/// Name of the column appended when mapping phenotypes.
pub const MAPPED_PHENOTYPE_COLUMN: &str = "mapped_phenotype";

/// Command line arguments for `sample random-tsv` subcommand.
#[derive(Parser, Debug)]
#[command(author, version, about = "Build random rows from values in a TSV file", long_about = None)]
pub struct Args {
    /// Path to input TSV file.
    #[arg(long)]
    pub path_input: String,
    /// Number of rows to write.
    #[arg(long)]
    pub num_samples: usize,
    /// Columns to include, all columns if not given.
    #[arg(long, num_args = 1..)]
    pub columns: Vec<String>,
    /// Name of phenotype column whose values to map to ontology terms.
    #[arg(long, requires = "path_phenotype_map")]
    pub map_phenotypes: Option<String>,
    /// Path to TSV file with `phenotype` and `ontology_id` columns.
    #[arg(long, requires = "map_phenotypes")]
    pub path_phenotype_map: Option<String>,
    /// Seed for the random number generator.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Path to output TSV file, `-` for stdout.
    #[arg(long, default_value = common::STDIO_PATH)]
    pub path_output: String,
}

/// Distinct values of each selected column, in first-seen order.
pub type ColumnValues = IndexMap<String, IndexSet<String>>;

/// Read the distinct values of `columns` from the TSV file at `path`.
///
/// An empty `columns` selects all columns of the file.  Columns named more
/// than once are only included once.
pub fn collect_column_values(
    path: &str,
    columns: &[String],
) -> Result<ColumnValues, anyhow::Error> {
    let mut reader = open_tsv_reader(path)?;
    let header = reader.headers()?.clone();

    let duplicates = header
        .iter()
        .duplicates()
        .map(String::from)
        .collect::<Vec<_>>();
    if !duplicates.is_empty() {
        return Err(ConfigError::DuplicateColumns {
            path: path.to_string(),
            duplicates,
        }
        .into());
    }

    let columns = if columns.is_empty() {
        header.iter().map(String::from).collect::<Vec<_>>()
    } else {
        common::check_columns(path, &header, columns)?;
        columns.to_vec()
    };
    // column name -> index in header, in selection order
    let mut indices: IndexMap<String, usize> = IndexMap::new();
    for column in columns {
        if let Some(idx) = header.iter().position(|h| h == column) {
            indices.entry(column).or_insert(idx);
        }
    }

    let mut result: ColumnValues = indices
        .keys()
        .map(|column| (column.clone(), IndexSet::new()))
        .collect();
    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record)? {
        for (values, idx) in result.values_mut().zip(indices.values()) {
            if let Some(value) = record.get(*idx) {
                values.insert(value.to_string());
            }
        }
    }

    Ok(result)
}

/// Write header and `num_samples` random rows.
///
/// If `mapping` is given, its column's drawn value is looked up and the
/// result is written to an extra trailing column (empty if unmapped).
pub fn write_samples<W, R>(
    values: &ColumnValues,
    num_samples: usize,
    mapping: Option<(&str, &dyn PhenotypeMapper)>,
    rng: &mut R,
    writer: W,
) -> Result<(), anyhow::Error>
where
    W: Write,
    R: Rng,
{
    if num_samples > 0 {
        if let Some((column, _)) = values.iter().find(|(_, v)| v.is_empty()) {
            return Err(ConfigError::EmptyColumn(column.clone()).into());
        }
    }
    let map_idx = match mapping {
        Some((column, _)) => match values.get_index_of(column) {
            Some(idx) => Some(idx),
            None => anyhow::bail!("phenotype column {} is not among the sampled columns", column),
        },
        None => None,
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    let mut header = values.keys().cloned().collect::<Vec<_>>();
    if mapping.is_some() {
        header.push(MAPPED_PHENOTYPE_COLUMN.to_string());
    }
    writer.write_record(&header)?;

    for _ in 0..num_samples {
        let mut row = values
            .values()
            .map(|column_values| {
                let idx = rng.gen_range(0..column_values.len());
                column_values
                    .get_index(idx)
                    .expect("index in range")
                    .as_str()
            })
            .collect::<Vec<_>>();
        if let (Some((_, mapper)), Some(map_idx)) = (mapping, map_idx) {
            row.push(mapper.find_term(row[map_idx]).unwrap_or_default());
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Main entry point for `sample random-tsv` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    tracing::info!("args_common = {:?}", &args_common);
    tracing::info!("args = {:?}", &args);

    let mut columns = args.columns.clone();
    if let Some(map_column) = &args.map_phenotypes {
        if !columns.is_empty() && !columns.contains(map_column) {
            tracing::info!("adding phenotype column {} to selected columns", map_column);
            columns.push(map_column.clone());
        }
    }

    tracing::info!("Reading values from {}", &args.path_input);
    let values = collect_column_values(&args.path_input, &columns)?;
    tracing::info!(
        "... done, distinct values per column: {}",
        values
            .iter()
            .map(|(column, values)| format!("{}={}", column, values.len().separate_with_commas()))
            .join(", ")
    );
    if let Some(map_column) = &args.map_phenotypes {
        if !values.contains_key(map_column) {
            return Err(ConfigError::MissingColumns {
                path: args.path_input.clone(),
                missing: vec![map_column.clone()],
                observed: values.keys().cloned().collect(),
            }
            .into());
        }
    }

    let mapper = match &args.path_phenotype_map {
        Some(path) => Some(TsvPhenotypeMapper::from_path(path)?),
        None => None,
    };
    let mapping = match (&args.map_phenotypes, &mapper) {
        (Some(column), Some(mapper)) => Some((column.as_str(), mapper as &dyn PhenotypeMapper)),
        _ => None,
    };

    let mut rng = if let Some(seed) = args.seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_entropy()
    };

    let mut writer = open_write_maybe_gz(&args.path_output)?;
    write_samples(&values, args.num_samples, mapping, &mut rng, &mut writer)?;
    writer.finish()?;
    tracing::info!(
        "Wrote {} random rows",
        args.num_samples.separate_with_commas()
    );

    Ok(())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run_to_string(args: &Args) -> Result<String, anyhow::Error> {
        super::run(&crate::common::Args::default(), args)?;
        Ok(std::fs::read_to_string(&args.path_output)?)
    }

    fn args(path_output: &str) -> Args {
        Args {
            path_input: String::from("tests/sample/input.tsv"),
            num_samples: 10,
            columns: Vec::new(),
            map_phenotypes: None,
            path_phenotype_map: None,
            seed: Some(42),
            path_output: path_output.to_string(),
        }
    }

    #[test]
    fn collect_column_values_all() -> Result<(), anyhow::Error> {
        let values = collect_column_values("tests/sample/input.tsv", &[])?;

        assert_eq!(
            values.keys().cloned().collect::<Vec<_>>(),
            vec!["sample_id", "phenotype", "db_snp_id", "tier"]
        );
        assert_eq!(
            values["tier"].iter().cloned().collect::<Vec<_>>(),
            vec!["TIER1", "TIER2", "TIER3"]
        );
        assert_eq!(values["phenotype"].len(), 3);

        Ok(())
    }

    #[test]
    fn collect_column_values_selected_order() -> Result<(), anyhow::Error> {
        let values = collect_column_values(
            "tests/sample/input.tsv",
            &[String::from("tier"), String::from("sample_id")],
        )?;

        assert_eq!(
            values.keys().cloned().collect::<Vec<_>>(),
            vec!["tier", "sample_id"]
        );

        Ok(())
    }

    #[test]
    fn collect_column_values_repeated_column() -> Result<(), anyhow::Error> {
        let values = collect_column_values(
            "tests/sample/input.tsv",
            &[
                String::from("tier"),
                String::from("tier"),
                String::from("sample_id"),
            ],
        )?;

        assert_eq!(
            values.keys().cloned().collect::<Vec<_>>(),
            vec!["tier", "sample_id"]
        );
        assert_eq!(
            values["tier"].iter().cloned().collect::<Vec<_>>(),
            vec!["TIER1", "TIER2", "TIER3"]
        );
        assert_eq!(
            values["sample_id"].iter().cloned().collect::<Vec<_>>(),
            vec!["S1", "S2", "S3", "S4"]
        );

        Ok(())
    }

    #[test]
    fn collect_column_values_duplicate_header() -> Result<(), anyhow::Error> {
        let tmp_dir = temp_testdir::TempDir::default();
        let path = tmp_dir.join("dup.tsv");
        std::fs::write(&path, "tier\tsample_id\ttier\nTIER1\tS1\tTIER2\n")?;
        let path = path.to_string_lossy().to_string();

        let err = collect_column_values(&path, &[]).expect_err("tier occurs twice");

        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::DuplicateColumns {
                path,
                duplicates: vec![String::from("tier")],
            })
        );

        Ok(())
    }

    #[test]
    fn collect_column_values_missing_column() {
        let err = collect_column_values("tests/sample/input.tsv", &[String::from("gene")])
            .expect_err("there is no gene column");

        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MissingColumns { .. })
        ));
    }

    #[test]
    fn run_draws_values_from_input() -> Result<(), anyhow::Error> {
        let tmp_dir = temp_testdir::TempDir::default();
        let output = run_to_string(&args(&tmp_dir.join("out.tsv").to_string_lossy()))?;

        let values = collect_column_values("tests/sample/input.tsv", &[])?;
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "sample_id\tphenotype\tdb_snp_id\ttier");
        for line in &lines[1..] {
            let fields = line.split('\t').collect::<Vec<_>>();
            assert_eq!(fields.len(), 4);
            for (field, column_values) in fields.iter().zip(values.values()) {
                assert!(column_values.contains(*field), "unexpected value {}", field);
            }
        }

        Ok(())
    }

    #[test]
    fn run_same_seed_same_output() -> Result<(), anyhow::Error> {
        let tmp_dir = temp_testdir::TempDir::default();
        let first = run_to_string(&args(&tmp_dir.join("first.tsv").to_string_lossy()))?;
        let second = run_to_string(&args(&tmp_dir.join("second.tsv").to_string_lossy()))?;

        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn run_map_phenotypes() -> Result<(), anyhow::Error> {
        let tmp_dir = temp_testdir::TempDir::default();
        let mut args = args(&tmp_dir.join("out.tsv").to_string_lossy());
        args.columns = vec![String::from("sample_id")];
        args.map_phenotypes = Some(String::from("phenotype"));
        args.path_phenotype_map = Some(String::from("tests/sample/phenotype-map.tsv"));

        let output = run_to_string(&args)?;

        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "sample_id\tphenotype\tmapped_phenotype");
        for line in &lines[1..] {
            let fields = line.split('\t').collect::<Vec<_>>();
            let expected = match fields[1] {
                "Asthma" => "EFO_0000270",
                "Breast carcinoma" => "EFO_0000305",
                _ => "",
            };
            assert_eq!(fields[2], expected);
        }

        Ok(())
    }

    #[test]
    fn run_map_phenotypes_missing_column() {
        let tmp_dir = temp_testdir::TempDir::default();
        let mut args = args(&tmp_dir.join("out.tsv").to_string_lossy());
        args.map_phenotypes = Some(String::from("disease"));
        args.path_phenotype_map = Some(String::from("tests/sample/phenotype-map.tsv"));

        let err = super::run(&crate::common::Args::default(), &args)
            .expect_err("there is no disease column");

        match err.downcast_ref::<ConfigError>() {
            Some(ConfigError::MissingColumns { path, missing, .. }) => {
                assert_eq!(path, "tests/sample/input.tsv");
                assert_eq!(missing, &vec![String::from("disease")]);
            }
            _ => panic!("unexpected error: {}", err),
        }
    }

    #[rstest::rstest]
    #[case(&["--map-phenotypes", "phenotype"])]
    #[case(&["--path-phenotype-map", "tests/sample/phenotype-map.tsv"])]
    fn args_mapping_options_require_each_other(#[case] extra: &[&str]) {
        let mut argv = vec![
            "random-tsv",
            "--path-input",
            "tests/sample/input.tsv",
            "--num-samples",
            "1",
        ];
        argv.extend_from_slice(extra);

        let err = Args::try_parse_from(argv).expect_err("mapping options come in pairs");

        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn write_samples_zero_rows_only_header() -> Result<(), anyhow::Error> {
        let mut values = ColumnValues::new();
        values.insert(String::from("empty"), IndexSet::new());
        let mut buf = Vec::new();

        write_samples(&values, 0, None, &mut StdRng::seed_from_u64(1), &mut buf)?;

        assert_eq!(String::from_utf8(buf)?, "empty\n");

        Ok(())
    }

    #[test]
    fn write_samples_empty_column() {
        let mut values = ColumnValues::new();
        values.insert(String::from("empty"), IndexSet::new());

        let err = write_samples(
            &values,
            1,
            None,
            &mut StdRng::seed_from_u64(1),
            Vec::new(),
        )
        .expect_err("nothing to sample from");

        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::EmptyColumn(String::from("empty")))
        );
    }
}
