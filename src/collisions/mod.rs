//! Table-name collision resolution for combined dumps
//!
//! When dumps from several sources are concatenated, the same table name can
//! be created more than once. Each colliding DROP / CREATE / INSERT group is
//! renamed with a suffix derived from the source marker above it, so the
//! combined dump loads without one source clobbering another.
//!
//! The pass runs in a fixed order over one [`Document`]:
//! 1. assign a unique suffix to every source marker's dump name
//! 2. count every DDL signature
//! 3. rewrite colliding lines in forward order

pub mod rewrite;
pub mod signatures;
pub mod suffix;

use anyhow::Result;
use tracing::info;

use crate::document::Document;
use rewrite::{process_dupes, CreateOutcome, Rewrite};
use signatures::SignatureCounts;
use suffix::SuffixMap;

/// Summary of one collision-resolution run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// `(dump name, suffix)` in first-seen order
    pub suffixes: Vec<(String, String)>,
    /// Distinct DDL signatures occurring more than once
    pub duplicate_signatures: usize,
    pub drops_rewritten: usize,
    pub creates_rewritten: usize,
    pub inserts_rewritten: usize,
    /// 1-based line numbers of colliding CREATEs with no INSERT after them
    pub orphaned_creates: Vec<usize>,
}

impl ResolveReport {
    /// Whether anything in the document was renamed.
    pub fn has_rewrites(&self) -> bool {
        self.drops_rewritten + self.creates_rewritten + self.inserts_rewritten > 0
    }
}

/// Renames every colliding table statement group in `document` in place.
///
/// Fails without guessing when a colliding line has no source marker above it.
/// The document may be partially rewritten on error, so callers write output
/// only after this returns `Ok`.
pub fn resolve_collisions(document: &mut Document) -> Result<ResolveReport> {
    let suffixes = SuffixMap::from_document(document);
    let counts = SignatureCounts::count(document);

    let mut report = ResolveReport {
        suffixes: suffixes
            .iter()
            .map(|(name, suffix)| (name.to_string(), suffix.to_string()))
            .collect(),
        duplicate_signatures: counts.duplicates().len(),
        ..Default::default()
    };

    info!(
        sources = suffixes.len(),
        signatures = counts.len(),
        duplicates = report.duplicate_signatures,
        "Counted DDL signatures"
    );

    for idx in 0..document.len() {
        match process_dupes(document, idx, &counts, &suffixes)? {
            Rewrite::Skipped => {}
            Rewrite::Drop => report.drops_rewritten += 1,
            Rewrite::Create(outcome) => {
                report.creates_rewritten += 1;
                match outcome {
                    CreateOutcome::Inserts(lines) => report.inserts_rewritten += lines.len(),
                    CreateOutcome::Orphaned => report.orphaned_creates.push(idx + 1),
                }
            }
        }
    }

    info!(
        drops = report.drops_rewritten,
        creates = report.creates_rewritten,
        inserts = report.inserts_rewritten,
        orphaned = report.orphaned_creates.len(),
        "Resolved table name collisions"
    );

    Ok(report)
}
