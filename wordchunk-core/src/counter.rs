//! Chunk frequency counting and ranking

use crate::types::{Chunk, Count};
use rustc_hash::FxHashMap;
use std::cmp::Reverse;

/// Occurrence count for every distinct chunk in a stream
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: FxHashMap<Chunk, usize>,
    total: usize,
}

impl FrequencyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of a chunk
    pub fn record(&mut self, chunk: Chunk) {
        *self.counts.entry(chunk).or_insert(0) += 1;
        self.total += 1;
    }

    /// Occurrences of a chunk (0 if never seen)
    pub fn get(&self, chunk: &Chunk) -> usize {
        self.counts.get(chunk).copied().unwrap_or(0)
    }

    /// Number of distinct chunks
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no chunk was recorded
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of chunks recorded, duplicates included
    pub fn total(&self) -> usize {
        self.total
    }

    /// Sort into a ranking, most frequent first
    pub fn into_ranking(self) -> Ranking {
        Ranking::from_table(self)
    }
}

impl FromIterator<Chunk> for FrequencyTable {
    fn from_iter<T: IntoIterator<Item = Chunk>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl Extend<Chunk> for FrequencyTable {
    fn extend<T: IntoIterator<Item = Chunk>>(&mut self, iter: T) {
        for chunk in iter {
            self.record(chunk);
        }
    }
}

/// Drain a chunk stream into a frequency table
pub fn count_chunks<I>(chunks: I) -> FrequencyTable
where
    I: IntoIterator<Item = Chunk>,
{
    chunks.into_iter().collect()
}

/// Frequency table entries ordered by descending count
///
/// Equal counts are ordered by ascending chunk content, so the order is the
/// same on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
    entries: Vec<Count>,
}

impl Ranking {
    fn from_table(table: FrequencyTable) -> Self {
        let mut entries: Vec<Count> = table
            .counts
            .into_iter()
            .map(|(chunk, count)| Count::new(count, chunk))
            .collect();
        entries.sort_unstable_by(|a, b| {
            Reverse(a.count)
                .cmp(&Reverse(b.count))
                .then_with(|| a.chunk.cmp(&b.chunk))
        });
        Self { entries }
    }

    /// The `n` most frequent entries, or all of them if there are fewer
    pub fn top(&self, n: usize) -> &[Count] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Every entry, most frequent first
    pub fn as_slice(&self) -> &[Count] {
        &self.entries
    }

    /// Iterate entries, most frequent first
    pub fn iter(&self) -> std::slice::Iter<'_, Count> {
        self.entries.iter()
    }

    /// Number of distinct chunks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ranking has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a Count;
    type IntoIter = std::slice::Iter<'a, Count>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
