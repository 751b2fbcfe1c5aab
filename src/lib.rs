//! sqrubber: SQL dump name standardization and collision resolution
//!
//! `clean` rewrites table and column names in one or more SQL dumps to a
//! lowercase/underscore convention and tags each source with a marker
//! comment. `collisions` takes such a combined dump and renames tables that
//! are created by more than one source, giving each a suffix derived from its
//! source's file name.

pub mod collisions;
pub mod document;
pub mod dump;
pub mod error;
pub mod identifier;
pub mod standardize;
pub mod statement;
pub mod util;

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

pub use collisions::{resolve_collisions, ResolveReport};
pub use document::Document;
pub use error::SqrubberError;
pub use identifier::NameStyle;

use dump::{default_output_path, read_dump, write_dump, Header, OutputTarget};
use standardize::{standardize_dump, Source};
use statement::is_ddl;

/// Options for the name standardization pass
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Source dump files, combined in this order
    pub inputs: Vec<PathBuf>,
    /// Output path (defaults to `<first input>.cleaned`)
    pub output: Option<PathBuf>,
    /// Print to stdout instead of writing a file
    pub print_only: bool,
    /// Write back over the (single) input file
    pub overwrite: bool,
    /// Prefix prepended to every table name
    pub prefix: Option<String>,
    /// Schema qualifier applied to every table name
    pub schema: Option<String>,
}

/// Options for the collision resolution pass
#[derive(Debug, Clone, Default)]
pub struct CollisionOptions {
    /// Combined, already standardized dump
    pub input: PathBuf,
    /// Output path (defaults to `<input>.cleaned`)
    pub output: Option<PathBuf>,
    /// Print to stdout instead of writing a file
    pub print_only: bool,
    /// Write back over the input file
    pub overwrite: bool,
}

/// Check that a document holds at least one DDL statement.
///
/// Only a high-level guard before processing; `name` identifies the input in
/// the error.
pub fn validate(document: &Document, name: &str) -> Result<()> {
    if document.iter().all(|line| line.trim().is_empty()) {
        return Err(SqrubberError::EmptyInput {
            name: name.to_string(),
        }
        .into());
    }
    if !document.iter().any(is_ddl) {
        return Err(SqrubberError::NoValidDdl {
            name: name.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Decide where output goes from the I/O flags.
pub fn output_target(
    inputs: &[PathBuf],
    output: Option<&PathBuf>,
    print_only: bool,
    overwrite: bool,
) -> Result<OutputTarget> {
    if print_only {
        return Ok(OutputTarget::Stdout);
    }
    if overwrite {
        return match inputs {
            [input] => Ok(OutputTarget::File(input.clone())),
            _ => Err(SqrubberError::AmbiguousOverwrite {
                count: inputs.len(),
            }
            .into()),
        };
    }
    if let Some(output) = output {
        return Ok(OutputTarget::File(output.clone()));
    }
    match inputs.first() {
        Some(first) => Ok(OutputTarget::File(default_output_path(first))),
        None => Err(SqrubberError::EmptyInput {
            name: "<no input files>".to_string(),
        }
        .into()),
    }
}

/// Standardize names in every input dump and write them as one combined dump.
pub fn clean_dump(options: CleanOptions) -> Result<OutputTarget> {
    let target = output_target(
        &options.inputs,
        options.output.as_ref(),
        options.print_only,
        options.overwrite,
    )?;

    let mut sources = Vec::with_capacity(options.inputs.len());
    for path in &options.inputs {
        let document = read_dump(path)?;
        validate(&document, &path.display().to_string())?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        info!(file = %file_name, lines = document.len(), "Read source dump");
        sources.push(Source {
            file_name,
            document,
        });
    }

    let style = NameStyle {
        prefix: options.prefix,
        schema: options.schema,
    };
    let combined = standardize_dump(&sources, &style);

    write_dump(&combined, &Header::new("Sqrubber"), &target)?;
    info!(lines = combined.len(), "Wrote standardized dump");
    Ok(target)
}

/// Resolve table-name collisions in a combined dump and write the result.
///
/// Nothing is written unless the whole document was processed.
pub fn resolve_dump(options: CollisionOptions) -> Result<(ResolveReport, OutputTarget)> {
    let inputs = [options.input.clone()];
    let target = output_target(
        &inputs,
        options.output.as_ref(),
        options.print_only,
        options.overwrite,
    )?;

    let mut document = read_dump(&options.input)?;
    validate(&document, &options.input.display().to_string())?;

    let report = resolve_collisions(&mut document)?;

    write_dump(&document, &Header::new("Collisions"), &target)?;
    Ok((report, target))
}
