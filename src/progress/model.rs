//! Persisted progress records

use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Attempt counts for a question, or summed over many questions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of attempts
    #[serde(default)]
    pub total: u64,
    /// Number of correct attempts
    #[serde(default)]
    pub correct: u64,
}

impl Stats {
    /// Create stats from counts
    pub fn new(total: u64, correct: u64) -> Self {
        Self { total, correct }
    }

    /// Fraction of correct attempts in `0.0..=1.0`; zero when nothing was attempted
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 { 0.0 } else { self.correct as f64 / self.total as f64 }
    }

    /// Accuracy as a percentage, or `None` when nothing was attempted
    pub fn percent(&self) -> Option<f64> {
        (self.total > 0).then(|| self.accuracy() * 100.0)
    }

    /// Whether no attempt was recorded
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Count one attempt
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(self, rhs: Stats) -> Stats {
        Stats { total: self.total + rhs.total, correct: self.correct + rhs.correct }
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, rhs: Stats) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Stats {
    fn sum<I: Iterator<Item = Stats>>(iter: I) -> Stats {
        iter.fold(Stats::default(), Add::add)
    }
}

/// Global attempt counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    #[serde(default)]
    pub total_attempts: u64,
    #[serde(default)]
    pub correct_attempts: u64,
}

impl From<Totals> for Stats {
    fn from(totals: Totals) -> Self {
        Stats { total: totals.total_attempts, correct: totals.correct_attempts }
    }
}

impl From<Stats> for Totals {
    fn from(stats: Stats) -> Self {
        Totals { total_attempts: stats.total, correct_attempts: stats.correct }
    }
}

/// Attempt statistics record (`stats.json`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptLog {
    /// Per-question attempt counts, by question key
    #[serde(default)]
    pub attempts: BTreeMap<String, Stats>,
    /// Sum of every per-question count
    #[serde(default)]
    pub totals: Totals,
}

impl AttemptLog {
    /// Count one attempt at `key` in both the per-key and global counters
    pub fn record(&mut self, key: &str, correct: bool) {
        self.attempts.entry(key.to_string()).or_default().record(correct);

        let mut totals = Stats::from(self.totals);
        totals.record(correct);
        self.totals = totals.into();
    }

    /// Sum of the per-key counts
    pub fn summed(&self) -> Stats {
        self.attempts.values().copied().sum()
    }

    /// Rebuild the global counters from the per-key counts
    ///
    /// Returns `true` if they disagreed.
    pub fn reconcile(&mut self) -> bool {
        let summed = self.summed();
        if Stats::from(self.totals) == summed {
            return false;
        }
        self.totals = summed.into();
        true
    }
}

/// Completion record (`progress.json`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionLog {
    /// Completed questions, by question key
    #[serde(default)]
    pub completed: BTreeMap<String, bool>,
    /// Questions whose hint was revealed, by question key
    #[serde(default)]
    pub hints_used: BTreeMap<String, bool>,
}
