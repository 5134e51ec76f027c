// censorfilter-core/src/range.rs
//! Inclusive word-index ranges and the collapse algorithm that reduces a set of
//! hit ranges to a minimal, sorted, non-overlapping cover.
//!
//! Ranges are expressed in word-index space (the n-th token of a message), never
//! in character offsets. They serialize positionally as `[start, end]`.

use log::debug;
use serde::{Deserialize, Serialize};

/// An inclusive `[start, end]` range of word indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[usize; 2]", into = "[usize; 2]")]
pub struct InclusiveRange {
    pub start: usize,
    pub end: usize,
}

impl InclusiveRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inclusive range start must not exceed end");
        Self { start, end }
    }

    /// A range covering exactly one index.
    pub fn single(index: usize) -> Self {
        Self { start: index, end: index }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// True when the two ranges share at least one index.
    pub fn overlaps(&self, other: &InclusiveRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Widens `self` in place so that it also covers `other`.
    pub fn widen(&mut self, other: &InclusiveRange) {
        self.start = self.start.min(other.start);
        self.end = self.end.max(other.end);
    }
}

impl TryFrom<[usize; 2]> for InclusiveRange {
    type Error = String;

    /// Rejects reversed pairs instead of reordering them.
    fn try_from([start, end]: [usize; 2]) -> Result<Self, Self::Error> {
        if start > end {
            return Err(format!("inclusive range [{}, {}] has start after end", start, end));
        }
        Ok(Self { start, end })
    }
}

impl From<InclusiveRange> for [usize; 2] {
    fn from(range: InclusiveRange) -> Self {
        [range.start, range.end]
    }
}

/// Drops tombstoned slots and sorts the survivors by start index.
fn compact(slots: Vec<Option<InclusiveRange>>) -> Vec<Option<InclusiveRange>> {
    let mut live: Vec<Option<InclusiveRange>> = slots.into_iter().filter(Option::is_some).collect();
    live.sort_by_key(|slot| slot.map(|r| r.start));
    live
}

/// Collapses hit ranges into a minimal sorted cover where `r[i].end < r[i + 1].start`.
///
/// Runs one adjacency pass (a range ending where the next one starts is folded into
/// the next), then repeats containment passes until a pass merges nothing.
pub fn collapse_ranges(ranges: Vec<InclusiveRange>) -> Vec<InclusiveRange> {
    if ranges.len() < 2 {
        return ranges;
    }
    let input_len = ranges.len();

    let mut slots = compact(ranges.into_iter().map(Some).collect());

    for i in 0..slots.len().saturating_sub(1) {
        if let (Some(prev), Some(next)) = (slots[i], slots[i + 1]) {
            if prev.end == next.start {
                slots[i + 1] = Some(InclusiveRange { start: prev.start, end: next.end });
                slots[i] = None;
            }
        }
    }
    slots = compact(slots);

    let mut passes = 0usize;
    loop {
        passes += 1;
        let mut merges = 0usize;
        for i in 0..slots.len().saturating_sub(1) {
            let (Some(mut current), Some(next)) = (slots[i], slots[i + 1]) else {
                continue;
            };
            if current.overlaps(&next) {
                current.widen(&next);
                slots[i] = Some(current);
                slots[i + 1] = None;
                merges += 1;
            }
        }
        slots = compact(slots);
        if merges == 0 {
            break;
        }
    }

    let collapsed: Vec<InclusiveRange> = slots.into_iter().flatten().collect();
    debug!(
        "Collapsed {} hit ranges into {} after {} containment pass(es).",
        input_len,
        collapsed.len(),
        passes
    );
    collapsed
}
