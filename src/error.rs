use std::path::PathBuf;

use thiserror::Error;

/// Errors returned while building a report.
///
/// Every variant aborts the whole report: no partial results are returned.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: missing field `{field}`", path.display())]
    MissingField { path: PathBuf, field: &'static str },

    #[error("{}, line {line}: invalid rating {value:?}: {source}", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        value: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("{}, line {line}: rating {value:?} for {brand:?}: {source}", path.display())]
    Overflow {
        path: PathBuf,
        line: u64,
        brand: String,
        value: String,
        #[source]
        source: crate::rating::Overflow,
    },

    #[error("reading {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("unknown report: {0}")]
    UnknownReport(String),
}

pub type Result<T> = std::result::Result<T, Error>;
