//! Common functionality.

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

pub mod io;

/// Commonly used command line arguments.
#[derive(Parser, Debug)]
pub struct Args {
    /// Verbosity of the program
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            verbose: Verbosity::new(0, 0),
        }
    }
}

/// Path value that selects stdin/stdout instead of a file.
pub const STDIO_PATH: &str = "-";

/// Return the version of the `ot-evidence-worker` crate and `x.y.z` in tests.
pub fn worker_version() -> &'static str {
    if cfg!(test) {
        "x.y.z"
    } else {
        env!("CARGO_PKG_VERSION")
    }
}

/// Check that all `required` column names are present in `header`.
///
/// All missing columns are reported at once, together with the full list of
/// columns observed in the file at `path`.
pub fn check_columns<S>(
    path: &str,
    header: &csv::StringRecord,
    required: &[S],
) -> Result<(), crate::err::ConfigError>
where
    S: AsRef<str>,
{
    let missing = required
        .iter()
        .map(|c| c.as_ref())
        .filter(|column| !header.iter().any(|h| h == *column))
        .map(String::from)
        .collect::<Vec<_>>();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(crate::err::ConfigError::MissingColumns {
            path: path.to_string(),
            missing,
            observed: header.iter().map(String::from).collect(),
        })
    }
}
