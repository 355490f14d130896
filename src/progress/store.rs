//! Progress persistence
//!
//! Two records are kept side by side: attempt statistics (`stats.json`) and completion
//! flags (`progress.json`). Every mutation is written to disk before the in-memory state
//! changes, so what callers observe is always what is on disk.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::{Path, PathBuf};

use super::key::{self, QuestionKey};
use super::model::{AttemptLog, CompletionLog, Stats};
use crate::content::{Difficulty, TopicLocation};
use crate::error::StoreError;
use crate::storage::{self, StorePaths};

/// Attempt statistics and completion state for every question
#[derive(Debug)]
pub struct ProgressStore {
    stats_path: PathBuf,
    progress_path: PathBuf,
    attempts: AttemptLog,
    completion: CompletionLog,
}

impl ProgressStore {
    /// Load both records, starting empty where a record is missing or malformed
    pub fn load(stats_path: impl Into<PathBuf>, progress_path: impl Into<PathBuf>) -> Self {
        let stats_path = stats_path.into();
        let progress_path = progress_path.into();

        let mut attempts: AttemptLog = storage::load_or_default(&stats_path);
        if attempts.reconcile() {
            tracing::warn!("Global totals in {:?} disagreed with per-question stats; recomputed", stats_path);
        }
        let completion = storage::load_or_default(&progress_path);

        tracing::info!("Progress store initialized");
        Self { stats_path, progress_path, attempts, completion }
    }

    /// Load both records from their standard locations
    pub fn load_from(paths: &StorePaths) -> Self {
        Self::load(&paths.stats, &paths.progress)
    }

    /// Path of the statistics record
    pub fn stats_path(&self) -> &Path {
        &self.stats_path
    }

    /// Path of the completion record
    pub fn progress_path(&self) -> &Path {
        &self.progress_path
    }

    /// Count one attempt at `key`, updating the global totals in the same write
    pub fn record_attempt(&mut self, key: &QuestionKey, correct: bool) -> Result<(), StoreError> {
        let mut next = self.attempts.clone();
        next.record(key.as_str(), correct);
        storage::write_json(&self.stats_path, &next)?;
        self.attempts = next;

        tracing::debug!(
            "Recorded {} attempt for {}",
            if correct { "correct" } else { "incorrect" },
            key
        );
        Ok(())
    }

    /// Mark `key` completed; returns `false` if it already was
    pub fn mark_completed(&mut self, key: &QuestionKey) -> Result<bool, StoreError> {
        if self.is_completed(key) {
            return Ok(false);
        }

        let mut next = self.completion.clone();
        next.completed.insert(key.to_string(), true);
        self.commit_completion(next)?;
        tracing::debug!("Marked question completed: {}", key);
        Ok(true)
    }

    /// Whether `key` has been completed
    pub fn is_completed(&self, key: &QuestionKey) -> bool {
        self.completion.completed.get(key.as_str()).copied().unwrap_or(false)
    }

    /// Flag that the hint for `key` was revealed; returns `false` if it already was
    pub fn mark_hint_used(&mut self, key: &QuestionKey) -> Result<bool, StoreError> {
        if self.is_hint_used(key) {
            return Ok(false);
        }

        let mut next = self.completion.clone();
        next.hints_used.insert(key.to_string(), true);
        self.commit_completion(next)?;
        tracing::debug!("Marked hint used for question: {}", key);
        Ok(true)
    }

    /// Whether the hint for `key` was revealed
    pub fn is_hint_used(&self, key: &QuestionKey) -> bool {
        self.completion.hints_used.get(key.as_str()).copied().unwrap_or(false)
    }

    /// Attempt counts for one question
    pub fn stats_for(&self, key: &QuestionKey) -> Stats {
        self.attempts.attempts.get(key.as_str()).copied().unwrap_or_default()
    }

    /// Attempt counts summed over every key starting with `prefix`
    ///
    /// An empty prefix sums every recorded question.
    pub fn rollup(&self, prefix: &str) -> Stats {
        with_prefix(&self.attempts.attempts, prefix).map(|(_, stats)| *stats).sum()
    }

    /// Attempt counts for a topic
    pub fn topic_stats(&self, location: &TopicLocation) -> Stats {
        self.rollup(&key::location_prefix(location))
    }

    /// Attempt counts for a difficulty tier of a module
    pub fn difficulty_stats(&self, module: &str, difficulty: Option<Difficulty>) -> Stats {
        self.rollup(&key::difficulty_prefix(module, difficulty))
    }

    /// Attempt counts for a module
    pub fn module_stats(&self, module: &str) -> Stats {
        self.rollup(&key::module_prefix(module))
    }

    /// Global attempt counters
    pub fn overall_stats(&self) -> Stats {
        self.attempts.totals.into()
    }

    /// Number of completed questions whose key starts with `prefix`
    pub fn completed_count(&self, prefix: &str) -> usize {
        with_prefix(&self.completion.completed, prefix).filter(|(_, done)| **done).count()
    }

    /// Clear every attempt, completion and hint flag
    pub fn reset(&mut self) -> Result<(), StoreError> {
        let attempts = AttemptLog::default();
        let completion = CompletionLog::default();

        storage::write_json(&self.stats_path, &attempts)?;
        if let Err(e) = storage::write_json(&self.progress_path, &completion) {
            // Put the statistics back so the two files stay consistent.
            if let Err(restore) = storage::write_json(&self.stats_path, &self.attempts) {
                tracing::error!("Failed to restore statistics after aborted reset: {}", restore);
            }
            return Err(e);
        }

        self.attempts = attempts;
        self.completion = completion;
        tracing::info!("Progress and statistics reset");
        Ok(())
    }

    fn commit_completion(&mut self, next: CompletionLog) -> Result<(), StoreError> {
        storage::write_json(&self.progress_path, &next)?;
        self.completion = next;
        Ok(())
    }
}

/// Entries of a key-sorted map whose key starts with `prefix`
fn with_prefix<'a, V>(
    map: &'a BTreeMap<String, V>,
    prefix: &'a str,
) -> impl Iterator<Item = (&'a String, &'a V)> {
    map.range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
        .take_while(move |(k, _)| k.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{GETTING_STARTED, Topic};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> ProgressStore {
        ProgressStore::load_from(&StorePaths::in_dir(temp.path()))
    }

    fn key(module: &str, difficulty: Option<Difficulty>, topic: &str, q: &str) -> QuestionKey {
        QuestionKey::new(module, difficulty, topic, q)
    }

    #[test]
    fn record_attempt_initializes_and_counts() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        let k = key("OSI", Some(Difficulty::Beginner), "Topic1", "A.txt");

        assert_eq!(store.stats_for(&k), Stats::default());
        store.record_attempt(&k, false).unwrap();
        store.record_attempt(&k, true).unwrap();

        assert_eq!(store.stats_for(&k), Stats::new(2, 1));
        assert_eq!(store.stats_for(&k).accuracy(), 0.5);
        assert_eq!(store.overall_stats(), Stats::new(2, 1));
    }

    #[test]
    fn state_survives_reload() {
        let temp = TempDir::new().unwrap();
        let k = key(GETTING_STARTED, None, "Topic1", "A.txt");
        {
            let mut store = store_in(&temp);
            store.record_attempt(&k, true).unwrap();
            store.mark_completed(&k).unwrap();
            store.mark_hint_used(&k).unwrap();
        }

        let store = store_in(&temp);
        assert!(store.is_completed(&k));
        assert!(store.is_hint_used(&k));
        assert_eq!(store.stats_for(&k), Stats::new(1, 1));
        assert_eq!(store.overall_stats(), Stats::new(1, 1));
    }

    #[test]
    fn mark_completed_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        let k = key("OSI", Some(Difficulty::Beginner), "Topic1", "A.txt");
        store.record_attempt(&k, true).unwrap();

        assert!(store.mark_completed(&k).unwrap());
        assert!(!store.mark_completed(&k).unwrap());
        assert!(store.is_completed(&k));
        assert_eq!(store.stats_for(&k), Stats::new(1, 1));
        assert_eq!(store.overall_stats(), Stats::new(1, 1));
    }

    #[test]
    fn hint_flag_is_independent() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        let k = key("OSI", Some(Difficulty::Advanced), "Topic1", "A.txt");

        assert!(store.mark_hint_used(&k).unwrap());
        assert!(store.is_hint_used(&k));
        assert!(!store.is_completed(&k));
        assert!(store.stats_for(&k).is_empty());
    }

    #[test]
    fn rollups_respect_hierarchy() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        let b = Some(Difficulty::Beginner);
        store.record_attempt(&key("OSI", b, "Topic1", "A.txt"), true).unwrap();
        store.record_attempt(&key("OSI", b, "Topic10", "A.txt"), false).unwrap();
        store.record_attempt(&key("OSI", Some(Difficulty::Insane), "Topic1", "A.txt"), true).unwrap();
        store.record_attempt(&key("OSINT", b, "Topic1", "A.txt"), true).unwrap();

        let topic1 = TopicLocation::new("OSI", b, Topic::from_dir("Topic1"));
        assert_eq!(store.topic_stats(&topic1), Stats::new(1, 1));
        assert_eq!(store.difficulty_stats("OSI", b), Stats::new(2, 1));
        assert_eq!(store.module_stats("OSI"), Stats::new(3, 2));
        assert_eq!(store.module_stats("OSINT"), Stats::new(1, 1));
        assert_eq!(store.rollup(""), store.overall_stats());
        assert_eq!(store.module_stats("Forensics"), Stats::default());
    }

    #[test]
    fn completed_count_by_prefix() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        let b = Some(Difficulty::Beginner);
        for q in ["A.txt", "B.txt"] {
            let k = key("OSI", b, "Topic1", q);
            store.record_attempt(&k, true).unwrap();
            store.mark_completed(&k).unwrap();
        }

        assert_eq!(store.completed_count(&key::module_prefix("OSI")), 2);
        assert_eq!(store.completed_count(&key::topic_prefix("OSI", b, "Topic2")), 0);
    }

    #[test]
    fn reset_clears_everything() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        let k = key("OSI", Some(Difficulty::Beginner), "Topic1", "A.txt");
        store.record_attempt(&k, true).unwrap();
        store.mark_completed(&k).unwrap();
        store.mark_hint_used(&k).unwrap();

        store.reset().unwrap();

        assert!(!store.is_completed(&k));
        assert!(!store.is_hint_used(&k));
        assert!(store.stats_for(&k).is_empty());
        assert_eq!(store.overall_stats().total, 0);

        let reloaded = store_in(&temp);
        assert!(!reloaded.is_completed(&k));
        assert_eq!(reloaded.overall_stats(), Stats::default());
    }

    #[test]
    fn malformed_records_load_empty() {
        let temp = TempDir::new().unwrap();
        let paths = StorePaths::in_dir(temp.path());
        std::fs::write(&paths.stats, "not json").unwrap();
        std::fs::write(&paths.progress, "[]").unwrap();

        let store = ProgressStore::load_from(&paths);
        assert_eq!(store.overall_stats(), Stats::default());
        assert_eq!(store.completed_count(""), 0);
    }

    #[test]
    fn drifted_totals_are_reconciled_on_load() {
        let temp = TempDir::new().unwrap();
        let paths = StorePaths::in_dir(temp.path());
        std::fs::write(
            &paths.stats,
            r#"{"attempts":{"OSI/Beginner/Topic1/A.txt":{"total":3,"correct":1}},
                "totals":{"total_attempts":10,"correct_attempts":9}}"#,
        )
        .unwrap();

        let store = ProgressStore::load_from(&paths);
        assert_eq!(store.overall_stats(), Stats::new(3, 1));
    }

    const MODULES: [&str; 3] = ["OSI", "OSI Extra", GETTING_STARTED];

    fn attempt() -> impl Strategy<Value = (usize, Option<Difficulty>, u8, u8, bool)> {
        (
            0..MODULES.len(),
            prop::option::of(prop::sample::select(Difficulty::ALL.to_vec())),
            1u8..12,
            0u8..3,
            any::<bool>(),
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn rollups_match_per_key_sums(attempts in prop::collection::vec(attempt(), 0..40)) {
            let temp = TempDir::new().unwrap();
            let mut store = store_in(&temp);
            let mut keys = Vec::new();

            for (m, d, t, q, correct) in attempts {
                let k = key(MODULES[m], d, &format!("Topic{}", t), &format!("{}.txt", q));
                store.record_attempt(&k, correct).unwrap();
                keys.push(k);
            }
            keys.sort();
            keys.dedup();

            let mut module_sum = Stats::default();
            for module in MODULES {
                let prefix = key::module_prefix(module);
                let expected: Stats = keys
                    .iter()
                    .filter(|k| k.as_str().starts_with(&prefix))
                    .map(|k| store.stats_for(k))
                    .sum();
                prop_assert_eq!(store.module_stats(module), expected);
                module_sum += expected;
            }

            prop_assert_eq!(module_sum, store.overall_stats());
            prop_assert_eq!(store.rollup(""), store.overall_stats());
        }
    }
}
