//! Generic grouping and reduction
//!
//! Every sub-report is a grouping of records by some key with an
//! accumulator folded per group. `GroupBy` keeps groups in first-seen
//! order so tie-breaks ("favorite method") are explicit rather than an
//! accident of map iteration order.
//!
//! Rounding is centralized here: all rating-like averages round half away
//! from zero at one decimal, all gram sums to the nearest whole gram with
//! the same half rule.

use std::collections::HashMap;
use std::hash::Hash;

/// Order-preserving grouping map: keys come out in the order they were
/// first seen.
#[derive(Debug, Clone)]
pub struct GroupBy<K, A> {
    index: HashMap<K, usize>,
    entries: Vec<(K, A)>,
}

impl<K: Eq + Hash + Clone, A: Default> GroupBy<K, A> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Fold one observation into the accumulator for `key`, creating a
    /// default accumulator the first time the key is seen.
    pub fn update(&mut self, key: K, fold: impl FnOnce(&mut A)) {
        let entries = &mut self.entries;
        let idx = *self.index.entry(key.clone()).or_insert_with(|| {
            entries.push((key, A::default()));
            entries.len() - 1
        });
        fold(&mut self.entries[idx].1);
    }

    /// Groups in first-seen order
    pub fn into_entries(self) -> Vec<(K, A)> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash + Clone, A: Default> Default for GroupBy<K, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Count accumulator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub count: u64,
}

impl Tally {
    pub fn bump(&mut self) {
        self.count += 1;
    }
}

/// Running sum (gram totals)
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum {
    total: f64,
}

impl Sum {
    pub fn add(&mut self, value: f64) {
        self.total += value;
    }

    /// Total rounded to the nearest integer, half away from zero
    pub fn rounded(&self) -> i64 {
        round_grams(self.total)
    }
}

/// Running mean over the observations actually pushed. Records that carry
/// no value for the averaged field are simply never pushed, so they can
/// never bias the denominator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mean {
    sum: f64,
    samples: u64,
}

impl Mean {
    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.samples += 1;
    }

    /// Number of observations pushed
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// The mean, or `None` when nothing was pushed. Never NaN.
    pub fn value(&self) -> Option<f64> {
        if self.samples == 0 {
            None
        } else {
            Some(self.sum / self.samples as f64)
        }
    }

    /// The mean rounded to one decimal, half away from zero
    pub fn rounded(&self) -> Option<f64> {
        self.value().map(round_rating)
    }
}

/// First entry holding the highest tally; earlier entries win ties, which
/// together with `GroupBy`'s first-seen ordering gives first-encountered
/// tie-break semantics.
pub fn max_tally<K>(entries: &[(K, Tally)]) -> Option<&(K, Tally)> {
    let mut best: Option<&(K, Tally)> = None;
    for entry in entries {
        match best {
            Some(current) if entry.1.count <= current.1.count => {}
            _ => best = Some(entry),
        }
    }
    best
}

/// Round to one decimal place, half away from zero (`f64::round`
/// semantics on `value * 10`).
pub fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to the nearest integer, half away from zero
pub fn round_grams(value: f64) -> i64 {
    value.round() as i64
}
