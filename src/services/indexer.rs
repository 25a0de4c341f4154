//! Per-stream index for nearest-neighbor lookup on the serial timeline
//!
//! Each secondary stream (IMU, AoA) keeps its records in serial-log
//! line order together with a parallel vector of bare sequence indices.
//! Lookups binary-search that vector, so correlating M matches against
//! N records costs O(M log N) instead of O(M*N).

/// Ordered records of one secondary stream, keyed by sequence index.
///
/// Push order must be non-decreasing in sequence index; reading the
/// serial log top to bottom guarantees this, and `push` asserts it in
/// debug builds.
#[derive(Debug)]
pub struct StreamIndex<T> {
    records: Vec<T>,
    indices: Vec<usize>,
}

// manual impl: a derive would demand T: Default
impl<T> Default for StreamIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StreamIndex<T> {
    pub fn new() -> Self {
        Self { records: Vec::new(), indices: Vec::new() }
    }

    /// Append a record observed at `sequence_index`.
    pub fn push(&mut self, sequence_index: usize, record: T) {
        debug_assert!(
            !self.indices.last().is_some_and(|&last| last > sequence_index),
            "sequence indices must be non-decreasing"
        );
        self.indices.push(sequence_index);
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record whose sequence index is closest to `target`.
    ///
    /// Candidates are the records on either side of the left insertion
    /// point; on an exact distance tie the earlier record wins. Returns
    /// `None` when the stream is empty.
    pub fn nearest(&self, target: usize) -> Option<&T> {
        if self.indices.is_empty() {
            return None;
        }

        // left insertion point of target
        let pos = self.indices.partition_point(|&idx| idx < target);

        let mut best: Option<usize> = None;
        for candidate in [pos.checked_sub(1), (pos < self.indices.len()).then_some(pos)]
            .into_iter()
            .flatten()
        {
            let dist = self.indices[candidate].abs_diff(target);
            // strict < keeps the first (lower-index) candidate on ties
            match best {
                Some(b) if self.indices[b].abs_diff(target) <= dist => {}
                _ => best = Some(candidate),
            }
        }

        best.map(|b| &self.records[b])
    }
}
