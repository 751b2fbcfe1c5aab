//! In-memory SQL dump document
//!
//! A [`Document`] is the ordered line sequence of a dump. Line position is
//! meaningful: adjacency groups a table's DROP, CREATE and INSERT lines, and a
//! source marker applies to every line after it until the next marker. Scans
//! are bounds-checked and return an index instead of moving a shared cursor.

use std::ops::Index;

/// Ordered, index-addressable, mutable sequence of dump lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Split text into lines, stripping trailing whitespace and line endings.
    pub fn from_text(text: &str) -> Self {
        let lines = text.lines().map(|l| l.trim_end().to_string()).collect();
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Replace the line at `idx`. Out-of-range indices are ignored.
    pub fn replace(&mut self, idx: usize, line: String) {
        if let Some(slot) = self.lines.get_mut(idx) {
            *slot = line;
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn extend(&mut self, other: Document) {
        self.lines.extend(other.lines);
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Nearest index at or before `from` whose line satisfies `pred`.
    ///
    /// `from` past the end is clamped to the last line.
    pub fn scan_backward_to<P>(&self, from: usize, mut pred: P) -> Option<usize>
    where
        P: FnMut(&str) -> bool,
    {
        if self.lines.is_empty() {
            return None;
        }
        let start = from.min(self.lines.len() - 1);
        (0..=start).rev().find(|&idx| pred(&self.lines[idx]))
    }

    /// First index at or after `from` whose line satisfies `pred`.
    pub fn scan_forward_to<P>(&self, from: usize, mut pred: P) -> Option<usize>
    where
        P: FnMut(&str) -> bool,
    {
        (from..self.lines.len()).find(|&idx| pred(&self.lines[idx]))
    }

    /// End (exclusive) of the run of lines starting at `from` that satisfy
    /// `pred`. Stops at the end of the document; never exceeds `len()`.
    pub fn scan_forward_while<P>(&self, from: usize, mut pred: P) -> usize
    where
        P: FnMut(&str) -> bool,
    {
        let from = from.min(self.lines.len());
        self.scan_forward_to(from, |line| !pred(line))
            .unwrap_or(self.lines.len())
    }
}

impl Index<usize> for Document {
    type Output = str;

    fn index(&self, idx: usize) -> &str {
        &self.lines[idx]
    }
}

impl From<Vec<String>> for Document {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines)
    }
}

impl From<Vec<&str>> for Document {
    fn from(lines: Vec<&str>) -> Self {
        Self::new(lines.into_iter().map(str::to_string).collect())
    }
}
