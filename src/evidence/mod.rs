//! Conversion of genetic association TSV files to Open Targets evidence
//! strings following the "genetic association" JSON schema.
//!
//! See <https://github.com/opentargets/json_schema> for the schema.

pub mod builder;
pub mod conf;
pub mod consequences;
pub mod convert;
pub mod input;
pub mod list_consequences;
pub mod schema;
