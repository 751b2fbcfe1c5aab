//! In-place rewriting of colliding table statements
//!
//! A colliding DROP gets its source's suffix on the table name. A colliding
//! CREATE gets the suffix too, and so does every INSERT for that table found
//! before the next DDL line or the end of the document.

use anyhow::Result;
use tracing::{debug, warn};

use super::signatures::SignatureCounts;
use super::suffix::SuffixMap;
use crate::document::Document;
use crate::error::SqrubberError;
use crate::identifier::same_table;
use crate::statement::{
    dump_name, fallback_suffix_offset, is_ddl, is_insert, is_source_marker, locate_table,
    LineKind,
};

/// What happened to the INSERTs after a rewritten CREATE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Indices of the INSERT lines that received the suffix
    Inserts(Vec<usize>),
    /// No INSERT for this table before the next DDL line or end of document
    Orphaned,
}

/// Result of handling one line during the rewrite pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Not a colliding DDL line; left untouched
    Skipped,
    Drop,
    Create(CreateOutcome),
}

/// Inserts `_<suffix>` into a statement line after its table name.
///
/// Falls back to the positional anchors of [`fallback_suffix_offset`] when the
/// table name cannot be located. Returns `None` when neither applies.
pub fn insert_suffix(line: &str, suffix: &str, kind: LineKind) -> Option<String> {
    let offset = locate_table(line, kind)
        .map(|stmt| stmt.suffix_offset())
        .or_else(|| fallback_suffix_offset(line, kind))?;

    let mut out = String::with_capacity(line.len() + suffix.len() + 1);
    out.push_str(&line[..offset]);
    out.push('_');
    out.push_str(suffix);
    out.push_str(&line[offset..]);
    Some(out)
}

/// Dump name of the source region containing line `idx`.
///
/// Scans backward to the nearest source marker. A line with no marker above it
/// means the dump was never cleaned, so no suffix is guessed.
pub fn get_sql_dump_name(document: &Document, idx: usize) -> Result<String> {
    let marker_idx = document
        .scan_backward_to(idx, is_source_marker)
        .ok_or(SqrubberError::MissingSourceMarker { line: idx + 1 })?;
    let name = dump_name(&document[marker_idx]).ok_or(SqrubberError::MalformedSourceMarker {
        line: marker_idx + 1,
    })?;
    Ok(name)
}

/// Adds the suffix to the DROP at `idx`. Returns whether the line changed.
pub fn process_drop_table(document: &mut Document, idx: usize, suffix: &str) -> bool {
    match insert_suffix(&document[idx], suffix, LineKind::DropTable) {
        Some(line) => {
            debug!(line = idx + 1, rewritten = %line, "Rewrote DROP TABLE");
            document.replace(idx, line);
            true
        }
        None => false,
    }
}

/// Adds the suffix to the CREATE at `idx` and to the INSERTs that load it.
///
/// Every INSERT targeting the same table up to the next DDL line (or the end
/// of the document) is rewritten, not just the first one.
pub fn process_create_table(document: &mut Document, idx: usize, suffix: &str) -> CreateOutcome {
    let table = locate_table(&document[idx], LineKind::CreateTable).map(|s| s.name.to_string());

    if let Some(line) = insert_suffix(&document[idx], suffix, LineKind::CreateTable) {
        debug!(line = idx + 1, rewritten = %line, "Rewrote CREATE TABLE");
        document.replace(idx, line);
    }

    let start = idx + 1;
    let end = document.scan_forward_while(start, |line| !is_ddl(line));

    let mut inserts = Vec::new();
    for pos in start..end {
        if !is_insert(&document[pos]) {
            continue;
        }
        if let (Some(table), Some(stmt)) = (
            table.as_deref(),
            locate_table(&document[pos], LineKind::InsertInto),
        ) {
            if !same_table(table, stmt.name) {
                continue;
            }
        }
        if let Some(line) = insert_suffix(&document[pos], suffix, LineKind::InsertInto) {
            debug!(line = pos + 1, "Rewrote INSERT INTO");
            document.replace(pos, line);
            inserts.push(pos);
        }
    }

    if inserts.is_empty() {
        CreateOutcome::Orphaned
    } else {
        CreateOutcome::Inserts(inserts)
    }
}

/// Routes a DDL line to the DROP or CREATE rewrite with its source's suffix.
pub fn process_table_name(
    document: &mut Document,
    idx: usize,
    suffixes: &SuffixMap,
) -> Result<Rewrite> {
    let kind = LineKind::classify(&document[idx]);
    if !matches!(kind, LineKind::DropTable | LineKind::CreateTable) {
        return Ok(Rewrite::Skipped);
    }

    let dump = get_sql_dump_name(document, idx)?;
    let suffix = suffixes
        .get(&dump)
        .ok_or_else(|| SqrubberError::UnassignedDumpName { name: dump.clone() })?;

    let rewrite = match kind {
        LineKind::DropTable => {
            if process_drop_table(document, idx, suffix) {
                Rewrite::Drop
            } else {
                Rewrite::Skipped
            }
        }
        _ => {
            let outcome = process_create_table(document, idx, suffix);
            if outcome == CreateOutcome::Orphaned {
                warn!(line = idx + 1, dump = %dump, "CREATE TABLE has no INSERT before the next DDL");
            }
            Rewrite::Create(outcome)
        }
    };
    Ok(rewrite)
}

/// Rewrites the line at `idx` when its DDL signature occurs more than once.
pub fn process_dupes(
    document: &mut Document,
    idx: usize,
    counts: &SignatureCounts,
    suffixes: &SuffixMap,
) -> Result<Rewrite> {
    if !counts.is_duplicate(&document[idx]) {
        return Ok(Rewrite::Skipped);
    }
    process_table_name(document, idx, suffixes)
}
