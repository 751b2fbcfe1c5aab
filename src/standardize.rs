//! Name standardization pass
//!
//! Rewrites table and column identifiers in a raw dump to the
//! lowercase/underscore convention, optionally prefixing table names or
//! qualifying them with a schema, and tags each source with a marker comment
//! so a combined dump can later be checked for collisions. Every line is
//! handled on its own; nothing carries over between lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::Document;
use crate::identifier::{standardize_column_list, standardize_name, standardize_part, NameStyle};
use crate::statement::{locate_table, source_marker, LineKind, TableStatement};
use crate::util::starts_with_ci;

/// An indented column definition: a single (possibly quoted) name followed by
/// its type and modifiers.
static COLUMN_DEF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<indent>\s+)(?P<name>"[^"]+"|`[^`]+`|\[[^\]]+\]|[A-Za-z_][\w$]*)(?P<rest>\s+\S.*)$"#,
    )
    .expect("Invalid column definition regex")
});

/// Leading words of table-level clauses inside a CREATE body.
const CONSTRAINT_WORDS: &[&str] = &[
    "constraint",
    "primary",
    "foreign",
    "unique",
    "key",
    "index",
    "check",
    "fulltext",
    "spatial",
];

/// One source dump to be standardized.
#[derive(Debug, Clone)]
pub struct Source {
    /// File name written into the source marker, e.g. `DB_2.mdb`
    pub file_name: String,
    pub document: Document,
}

/// Replaces whitespace inside the table name of a DROP / CREATE / INSERT line
/// with underscores. Keywords, case and everything after the name are kept.
pub fn remove_spaces(line: &str) -> String {
    match table_statement(line) {
        Some(stmt) => format!(
            "{}{}{}",
            stmt.head,
            stmt.name.split_whitespace().collect::<Vec<_>>().join("_"),
            stmt.tail
        ),
        None => line.to_string(),
    }
}

/// Standardizes one dump line.
pub fn standardize_line(line: &str, style: &NameStyle) -> String {
    if is_comment(line) {
        return line.to_string();
    }

    if let Some(stmt) = table_statement(line) {
        let name = standardize_name(stmt.name, style);
        let tail = match stmt.kind {
            LineKind::InsertInto => standardize_insert_tail(stmt.tail),
            _ => stmt.tail.to_string(),
        };
        return format!("{}{}{}", keyword_head(stmt.head), name, tail);
    }

    standardize_column_def(line).unwrap_or_else(|| line.to_string())
}

/// Standardizes every line of a document.
pub fn standardize_document(document: &Document, style: &NameStyle) -> Document {
    Document::new(
        document
            .iter()
            .map(|line| standardize_line(line, style))
            .collect(),
    )
}

/// Standardizes each source and concatenates them, each behind its source marker.
pub fn standardize_dump(sources: &[Source], style: &NameStyle) -> Document {
    let mut combined = Document::default();
    for source in sources {
        combined.push(source_marker(&source.file_name));
        combined.extend(standardize_document(&source.document, style));
    }
    combined
}

fn table_statement(line: &str) -> Option<TableStatement<'_>> {
    let kind = LineKind::classify(line);
    match kind {
        LineKind::DropTable | LineKind::CreateTable | LineKind::InsertInto => {
            locate_table(line, kind)
        }
        LineKind::SourceMarker | LineKind::Other => None,
    }
}

fn is_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("--") || trimmed.starts_with("/*") || trimmed.starts_with('#')
}

/// `DROP  TABLE IF EXISTS ` → `drop table if exists `
fn keyword_head(head: &str) -> String {
    let mut words = head
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");
    words.push(' ');
    words
}

/// Standardizes the column list that may open an INSERT tail; values are kept.
fn standardize_insert_tail(tail: &str) -> String {
    let trimmed = tail.trim_start();
    if !trimmed.starts_with('(') {
        return tail.to_string();
    }
    let Some(close) = trimmed.find(')') else {
        return tail.to_string();
    };
    let (columns, rest) = trimmed.split_at(close + 1);
    format!(" {}{}", standardize_column_list(columns), rest)
}

fn standardize_column_def(line: &str) -> Option<String> {
    let caps = COLUMN_DEF_RE.captures(line)?;
    let name = caps.name("name")?.as_str();
    if CONSTRAINT_WORDS.iter().any(|w| starts_with_ci(name, w) && name.len() == w.len()) {
        return None;
    }
    Some(format!(
        "{}{}{}",
        caps.name("indent")?.as_str(),
        standardize_part(name),
        caps.name("rest")?.as_str()
    ))
}
