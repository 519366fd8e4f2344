//! Interval lookup keyed by start offset.

use crate::source_map::find_lower_bound;
use solscope_api::{NodeId, SourceRange};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartIdPair {
    pub length: usize,
    pub id: NodeId,
}

/// Nodes grouped by the byte offset they start at.
///
/// `starts` holds the distinct keys of `list` in ascending order once
/// [`StartOffsetIndex::finish`] has run.
#[derive(Debug, Clone, Default)]
pub struct StartOffsetIndex {
    starts: Vec<usize>,
    list: HashMap<usize, Vec<StartIdPair>>,
}

impl StartOffsetIndex {
    /// Ranges with a negative start or length are not indexed.
    pub fn insert(&mut self, range: &SourceRange, id: NodeId) {
        if !range.is_valid() {
            return;
        }
        self.list
            .entry(range.start as usize)
            .or_default()
            .push(StartIdPair {
                length: range.length as usize,
                id,
            });
    }

    pub fn finish(&mut self) {
        self.starts = self.list.keys().copied().collect();
        self.starts.sort_unstable();
    }

    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    pub fn bucket(&self, start: usize) -> &[StartIdPair] {
        self.list.get(&start).map(Vec::as_slice).unwrap_or_default()
    }

    /// Tightest node starting at the nearest start `<= offset` that still
    /// contains `offset`.
    pub fn at_offset(&self, offset: usize) -> Option<NodeId> {
        self.tightest(offset, |start, pair| start + pair.length > offset)
    }

    /// Tightest node starting at the nearest start `<= range.start` whose end
    /// reaches `range.start + range.length`.
    ///
    /// A reversed selection (negative length) ends before it starts, so every
    /// node in the probed bucket reaches it.
    pub fn at_range(&self, range: &SourceRange) -> Option<NodeId> {
        let start = range.start.max(0) as usize;
        let end = range.end()?;
        self.tightest(start, |bucket_start, pair| {
            (bucket_start + pair.length) as i64 >= end
        })
    }

    // Only the bucket found by the lower-bound search is inspected; a wider
    // node bucketed under an earlier start is not considered.
    fn tightest(
        &self,
        offset: usize,
        covers: impl Fn(usize, &StartIdPair) -> bool,
    ) -> Option<NodeId> {
        if self.starts.is_empty() {
            return None;
        }
        let index = find_lower_bound(&offset, &self.starts).unwrap_or(0);
        let start = self.starts[index];
        self.bucket(start)
            .iter()
            .filter(|pair| covers(start, pair))
            .min_by_key(|pair| pair.length)
            .map(|pair| pair.id)
    }
}
