//! Duplicate DDL signature counting
//!
//! A signature is the lowercased text of a `create table` / `drop table`
//! line. All signatures are counted before any line is rewritten, since a
//! rewrite changes the line text the count is keyed on.

use std::collections::HashMap;

use crate::document::Document;
use crate::statement::is_ddl;

/// Occurrence count per DDL signature across a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureCounts {
    counts: HashMap<String, usize>,
}

impl SignatureCounts {
    /// Counts every DDL line of the document.
    pub fn count(document: &Document) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for line in document.iter().filter(|line| is_ddl(line)) {
            *counts.entry(signature(line)).or_default() += 1;
        }
        Self { counts }
    }

    /// Occurrences of the line's signature; 0 for lines never counted.
    pub fn get(&self, line: &str) -> usize {
        self.counts.get(&signature(line)).copied().unwrap_or(0)
    }

    /// Whether the line's signature occurs more than once.
    pub fn is_duplicate(&self, line: &str) -> bool {
        self.get(line) > 1
    }

    /// Number of distinct signatures seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Signatures occurring more than once, sorted for stable output.
    pub fn duplicates(&self) -> Vec<(&str, usize)> {
        let mut dupes: Vec<(&str, usize)> = self
            .counts
            .iter()
            .filter(|&(_, &n)| n > 1)
            .map(|(sig, &n)| (sig.as_str(), n))
            .collect();
        dupes.sort_unstable();
        dupes
    }
}

/// The deduplication key of a line.
pub fn signature(line: &str) -> String {
    line.to_lowercase()
}
