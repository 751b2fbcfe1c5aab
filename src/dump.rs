//! Dump file reading and writing
//!
//! Dumps are read whole into a [`Document`] and written whole after
//! processing, behind a generated header naming the tool, its version and the
//! generation time.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Local};
use encoding_rs::WINDOWS_1252;

use crate::document::Document;
use crate::error::SqrubberError;

/// Where processed output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// Generated header comment written ahead of the dump lines.
#[derive(Debug, Clone)]
pub struct Header {
    /// Tool name shown in the header, e.g. `Collisions`
    pub tool: &'static str,
    pub version: &'static str,
    pub generated_at: DateTime<Local>,
}

impl Header {
    pub fn new(tool: &'static str) -> Self {
        Self {
            tool,
            version: env!("CARGO_PKG_VERSION"),
            generated_at: Local::now(),
        }
    }

    /// The header text, including the two blank lines that follow it.
    pub fn render(&self) -> String {
        format!(
            "-- {tool} version {version}\n-- {tool} output generated on {at}\n\n\n",
            tool = self.tool,
            version = self.version,
            at = self.generated_at.format("%Y-%m-%d %H:%M:%S%.6f"),
        )
    }
}

/// Decode file bytes as UTF-8, falling back to Windows-1252
fn decode(bytes: Vec<u8>) -> std::io::Result<String> {
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(s)),
        Err(err) => {
            // Dumps exported from Access/Windows tooling are often cp1252
            let bytes = err.into_bytes();
            let (decoded, _, had_errors) = WINDOWS_1252.decode(&bytes);
            if had_errors {
                Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "File contains invalid characters",
                ))
            } else {
                Ok(decoded.into_owned())
            }
        }
    }
}

/// Read a dump file into a document, one trimmed line per entry.
pub fn read_dump(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(SqrubberError::InputNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    if !path.is_file() {
        return Err(SqrubberError::InputNotAFile {
            path: path.to_path_buf(),
        }
        .into());
    }

    let text = std::fs::read(path)
        .and_then(decode)
        .map_err(|source| SqrubberError::InputReadError {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(Document::from_text(&text))
}

/// Render a header and document as the final output text.
pub fn render_dump(document: &Document, header: &Header) -> String {
    let mut out = header.render();
    for line in document.iter() {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Write a header and document to the target in one piece.
pub fn write_dump(document: &Document, header: &Header, target: &OutputTarget) -> Result<()> {
    let text = render_dump(document, header);
    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
        OutputTarget::File(path) => {
            std::fs::write(path, text).map_err(|source| SqrubberError::OutputWriteError {
                path: path.clone(),
                source,
            })?;
        }
    }
    Ok(())
}

/// Default output path: the input path with `.cleaned` appended.
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".cleaned");
    PathBuf::from(name)
}
