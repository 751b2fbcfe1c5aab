//! Per-source suffix derivation and uniqueness
//!
//! Every dump name found in a document gets a short suffix built from its
//! underscore-separated segments. Suffixes must stay distinct across the
//! document, so a name whose suffix is already taken gets an ordinal.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::document::Document;
use crate::statement::{dump_name, is_source_marker};

/// Derives the base suffix for a dump name.
///
/// Segments starting with a letter contribute that letter; segments starting
/// with a digit contribute `_` plus the whole segment, so year and version
/// tokens survive intact. Empty segments are skipped.
///
/// ```
/// use sqrubber::collisions::suffix::derive_suffix;
///
/// assert_eq!(derive_suffix("wilkes_barre_report_fall_2016"), "wbrf_2016");
/// assert_eq!(derive_suffix("db_2"), "d_2");
/// ```
pub fn derive_suffix(name: &str) -> String {
    derive_suffix_with_span(name, 0)
}

/// Derives the candidate suffix for `name` at a given `span`.
///
/// Span 0 is the base suffix. Span `n > 0` appends the ordinal `n + 1`, so the
/// second dump name that derives `dd` becomes `dd_2`, the third `dd_3`.
pub fn derive_suffix_with_span(name: &str, span: usize) -> String {
    let mut suffix = String::new();
    for segment in name.split('_').filter(|s| !s.is_empty()) {
        let Some(first) = segment.chars().next() else {
            continue;
        };
        if first.is_ascii_digit() {
            suffix.push('_');
            suffix.push_str(segment);
        } else if first.is_alphabetic() {
            suffix.push(first);
        }
    }
    if span > 0 {
        suffix.push('_');
        suffix.push_str(&(span + 1).to_string());
    }
    suffix
}

/// Dump name → suffix assignment for one document.
///
/// Built once per run; assignment follows first-seen order, so the first dump
/// name to derive a given suffix keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuffixMap {
    by_dump: HashMap<String, String>,
    /// Dump names in first-seen order
    order: Vec<String>,
}

impl SuffixMap {
    /// Assigns a unique suffix to every distinct dump name, in iteration order.
    pub fn resolve<I, S>(dump_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = SuffixMap::default();
        let mut taken: HashSet<String> = HashSet::new();

        for name in dump_names {
            let name = name.as_ref().to_lowercase();
            if map.by_dump.contains_key(&name) {
                continue;
            }

            let mut span = 0;
            let mut candidate = derive_suffix_with_span(&name, span);
            while candidate.is_empty() || taken.contains(&candidate) {
                span += 1;
                candidate = derive_suffix_with_span(&name, span);
            }

            taken.insert(candidate.clone());
            map.order.push(name.clone());
            map.by_dump.insert(name, candidate);
        }

        map
    }

    /// Collects every source marker's dump name and resolves their suffixes.
    ///
    /// Markers that name no file are skipped; they only fail a run when a
    /// colliding line belongs to one.
    pub fn from_document(document: &Document) -> Self {
        let names = document.iter().enumerate().filter_map(|(idx, line)| {
            let name = dump_name(line);
            if name.is_none() && is_source_marker(line) {
                warn!(line = idx + 1, "SQL dump marker names no file");
            }
            name
        });
        Self::resolve(names)
    }

    pub fn get(&self, dump_name: &str) -> Option<&str> {
        self.by_dump.get(dump_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(dump name, suffix)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .map(|name| (name.as_str(), self.by_dump[name].as_str()))
    }
}
