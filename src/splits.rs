use std::collections::BTreeMap;

/// A recorded split
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Split {
    /// milliseconds since run start, minus paused time
    Time(i64),
    /// checkpoint passed without a time
    Skipped,
}

impl Split {
    /// Time in milliseconds, with `-1` standing in for a skip.
    pub fn as_millis(&self) -> i64 {
        match self {
            Split::Time(ms) => *ms,
            Split::Skipped => -1,
        }
    }

    pub fn time(&self) -> Option<i64> {
        match self {
            Split::Time(ms) => Some(*ms),
            Split::Skipped => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Split::Skipped)
    }
}

/// Checkpoint index -> split, contiguous from 0.
///
/// `append` is the only writer, so the next free index always equals `len()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitLedger {
    entries: BTreeMap<usize, Split>,
}

impl SplitLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `split` at the next index and returns that index.
    pub fn append(&mut self, split: Split) -> usize {
        let idx = self.entries.len();
        self.entries.insert(idx, split);
        idx
    }

    pub fn remove_last(&mut self) -> Option<(usize, Split)> {
        self.entries.pop_last()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `None` means not reached yet, which is distinct from `Split::Skipped`.
    pub fn get(&self, index: usize) -> Option<Split> {
        self.entries.get(&index).copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    pub fn last(&self) -> Option<(usize, Split)> {
        self.entries.last_key_value().map(|(&idx, &split)| (idx, split))
    }

    /// Most recent split that carries a time
    pub fn last_time(&self) -> Option<i64> {
        self.entries.values().rev().find_map(Split::time)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Split)> + '_ {
        self.entries.iter().map(|(&idx, &split)| (idx, split))
    }

    /// Time spent on checkpoint `index`, measured from the previous timed split.
    pub fn segment(&self, index: usize) -> Option<i64> {
        let end = self.get(index)?.time()?;
        let start = self
            .entries
            .range(..index)
            .rev()
            .find_map(|(_, split)| split.time())
            .unwrap_or(0);
        Some(end - start)
    }
}
