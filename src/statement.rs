//! Line-level statement recognition.
//!
//! This is deliberately not a SQL parser: a dump line is classified by the
//! fixed keyword set (`drop table`, `create table`, `insert into`) and by the
//! source marker comment, and the table name of a recognized statement is
//! located so it can be rewritten in place.

use std::sync::LazyLock;

use regex::Regex;

use crate::util::{contains_ci, last_char_index};

/// DDL keywords whose lines take part in collision detection.
pub const DDL_KEYWORDS: &[&str] = &["create table", "drop table"];

/// DML keyword for data lines that follow a CREATE.
pub const INSERT_KEYWORD: &str = "insert into";

/// Source marker text written ahead of each source's block.
pub const SOURCE_MARKER: &str = "-- SQL Dump of";

/// A table name: quoted chunks, or any run of characters that cannot open a
/// column list or end a statement. Lazy so trailing whitespace lands in the tail.
const NAME: &str = r#"(?:"[^"]*"|`[^`]*`|\[[^\]]*\]|[^(;"`\[\]])+?"#;

static DROP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?P<head>\s*drop\s+table\s+(?:if\s+exists\s+)?)(?P<name>{NAME})(?P<tail>(?:\s+(?:cascade|restrict))?\s*;?\s*)$"
    ))
    .expect("Invalid drop table regex")
});

static CREATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?P<head>\s*create\s+(?:temporary\s+|temp\s+)?table\s+(?:if\s+not\s+exists\s+)?)(?P<name>{NAME})(?P<tail>\s*\(.*|\s+as\s+.*|\s*;?\s*)$"
    ))
    .expect("Invalid create table regex")
});

static INSERT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?P<head>\s*insert\s+(?:ignore\s+)?into\s+)(?P<name>{NAME})(?P<tail>\s*\(.*|\s+(?:values|select|default)\b.*|\s*;?\s*)$"
    ))
    .expect("Invalid insert into regex")
});

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*--\s*sql\s+dump\s+of\b(?P<file>.*)$").expect("Invalid source marker regex")
});

/// What a dump line is, as far as collision handling cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    SourceMarker,
    DropTable,
    CreateTable,
    InsertInto,
    Other,
}

impl LineKind {
    pub fn classify(line: &str) -> Self {
        if is_source_marker(line) {
            LineKind::SourceMarker
        } else if contains_ci(line, "drop table") {
            LineKind::DropTable
        } else if contains_ci(line, "create table") {
            LineKind::CreateTable
        } else if contains_ci(line, INSERT_KEYWORD) {
            LineKind::InsertInto
        } else {
            LineKind::Other
        }
    }

    fn regex(self) -> Option<&'static Regex> {
        match self {
            LineKind::DropTable => Some(&*DROP_RE),
            LineKind::CreateTable => Some(&*CREATE_RE),
            LineKind::InsertInto => Some(&*INSERT_RE),
            LineKind::SourceMarker | LineKind::Other => None,
        }
    }
}

/// A recognized table statement split around its table name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStatement<'a> {
    pub kind: LineKind,
    /// Keyword text up to the name, e.g. `drop table if exists `
    pub head: &'a str,
    /// The table name exactly as written
    pub name: &'a str,
    /// Everything after the name
    pub tail: &'a str,
}

impl TableStatement<'_> {
    /// Byte offset in the line at which a name suffix belongs: the end of the
    /// name, or just inside its closing quote.
    pub fn suffix_offset(&self) -> usize {
        let name_end = self.head.len() + self.name.len();
        match self.name.chars().last() {
            Some('"' | '`' | ']') => name_end - 1,
            _ => name_end,
        }
    }
}

/// Splits a DROP / CREATE / INSERT line around its table name.
pub fn parse_table_statement(line: &str) -> Option<TableStatement<'_>> {
    locate_table(line, LineKind::classify(line))
}

/// Splits `line` around its table name, reading it as a statement of `kind`.
pub fn locate_table(line: &str, kind: LineKind) -> Option<TableStatement<'_>> {
    let caps = kind.regex()?.captures(line)?;
    Some(TableStatement {
        kind,
        head: caps.name("head")?.as_str(),
        name: caps.name("name")?.as_str(),
        tail: caps.name("tail")?.as_str(),
    })
}

/// Whether the line contains any DDL keyword (case-insensitive).
pub fn is_ddl(line: &str) -> bool {
    DDL_KEYWORDS.iter().any(|kw| contains_ci(line, kw))
}

pub fn is_insert(line: &str) -> bool {
    contains_ci(line, INSERT_KEYWORD)
}

pub fn is_source_marker(line: &str) -> bool {
    MARKER_RE.is_match(line)
}

/// Dump name carried by a source marker: the file name's stem, lowercased.
///
/// `-- SQL Dump of DB_2.mdb` yields `db_2`. Whitespace inside the file name
/// becomes `_`, so `Fall Report 2016.mdb` yields `fall_report_2016`. Returns
/// `None` for lines that are not markers or that name no file.
pub fn dump_name(line: &str) -> Option<String> {
    let caps = MARKER_RE.captures(line)?;
    let file = join_words(caps.name("file")?.as_str());
    let stem = file.split('.').next().unwrap_or(file.as_str());
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_lowercase())
    }
}

/// The marker line written for a source file. The file name is written as a
/// single token.
pub fn source_marker(file_name: &str) -> String {
    format!("{} {}", SOURCE_MARKER, join_words(file_name))
}

fn join_words(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Byte offset for a suffix when the table name cannot be located.
///
/// DROP: before the final character (the terminator). CREATE: before the
/// ` (` that opens the column list, else before the final two characters.
/// INSERT: before the first ` (`.
pub fn fallback_suffix_offset(line: &str, kind: LineKind) -> Option<usize> {
    let line = line.trim_end();
    match kind {
        LineKind::DropTable => last_char_index(line),
        LineKind::CreateTable => line.rfind(" (").or_else(|| {
            let mut indices = line.char_indices().rev();
            indices.next()?;
            indices.next().map(|(idx, _)| idx)
        }),
        LineKind::InsertInto => line.find(" ("),
        LineKind::SourceMarker | LineKind::Other => None,
    }
}
