//! Error types for sqrubber

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while cleaning or de-duplicating a SQL dump
#[derive(Error, Debug)]
pub enum SqrubberError {
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Input is not a regular file: {path}")]
    InputNotAFile { path: PathBuf },

    #[error("Failed to read input file: {path}")]
    InputReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input is empty: {name}")]
    EmptyInput { name: String },

    #[error("Input has no valid DDL, please check input: {name}")]
    NoValidDdl { name: String },

    #[error(
        "No SQL dump marker precedes line {line}; run `sqrubber clean` on the sources first"
    )]
    MissingSourceMarker { line: usize },

    #[error("SQL dump marker on line {line} does not name a dump file")]
    MalformedSourceMarker { line: usize },

    #[error("No suffix was assigned to SQL dump '{name}'")]
    UnassignedDumpName { name: String },

    #[error("--overwrite needs exactly one input file, got {count}")]
    AmbiguousOverwrite { count: usize },

    #[error("Failed to write output file: {path}")]
    OutputWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SqrubberError {
    /// Whether the error comes from the files or flags the user passed, as
    /// opposed to the dump's own structure or the output side.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SqrubberError::InputNotFound { .. }
                | SqrubberError::InputNotAFile { .. }
                | SqrubberError::InputReadError { .. }
                | SqrubberError::EmptyInput { .. }
                | SqrubberError::NoValidDdl { .. }
                | SqrubberError::AmbiguousOverwrite { .. }
        )
    }
}
