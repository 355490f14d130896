//! Training session facade
//!
//! [`Trainer`] owns the configuration store, the content repository and the progress store,
//! and implements the workflows that span them: root selection, answer submission, hint
//! reveals and hierarchical completion.

pub mod command;
pub mod practice;

use std::path::Path;

use crate::config::ConfigStore;
use crate::content::model::has_difficulties;
use crate::content::{ContentRepository, Difficulty, GETTING_STARTED, TopicLocation};
use crate::error::{ContentError, StoreError};
use crate::progress::{ProgressStore, QuestionKey, Stats, key};
use crate::storage::StorePaths;

/// Result of submitting an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was entered
    Blank,
    /// The question was already completed; nothing recorded
    AlreadyCompleted,
    /// No answer file could be resolved; nothing recorded
    NoAnswer,
    /// Recorded as correct and the question is now completed
    Correct,
    /// Recorded as incorrect
    Incorrect,
}

/// Result of asking for a hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    /// No hint file exists for the question
    Unavailable,
    /// The hint text, with the number of incorrect attempts charged for this reveal
    Revealed { hint: String, penalty: u32 },
}

/// A training session over one content root and one progress record
#[derive(Debug)]
pub struct Trainer {
    config: ConfigStore,
    content: ContentRepository,
    progress: ProgressStore,
}

impl Trainer {
    /// Build a session from loaded stores, pointing the repository at the configured root
    pub fn new(config: ConfigStore, progress: ProgressStore) -> Self {
        let mut content = ContentRepository::new(None);
        if let Some(root) = config.root() {
            if let Err(e) = content.set_root(root) {
                tracing::warn!("Configured content root is unavailable: {}", e);
            }
        }
        Self { config, content, progress }
    }

    /// Load every store from `paths`
    pub fn open(paths: &StorePaths) -> Self {
        Self::new(ConfigStore::load(&paths.config), ProgressStore::load_from(paths))
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn content(&self) -> &ContentRepository {
        &self.content
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    /// Active content root, if it exists on disk
    pub fn root(&self) -> Option<&Path> {
        self.content.root()
    }

    /// Make `dir` the active content root
    ///
    /// A directory without any known module is rejected with
    /// [`ContentError::UnrecognizedRoot`] unless `confirmed` is set.
    pub fn select_root(&mut self, dir: &Path, confirmed: bool) -> Result<(), ContentError> {
        check_root(dir, confirmed)?;
        self.config.set_root(dir)?;
        self.content.set_root(dir)
    }

    /// Remember `dir` as a content root, activating it when no root is active
    ///
    /// Returns `false` if it was already known.
    pub fn add_root(&mut self, dir: &Path, confirmed: bool) -> Result<bool, ContentError> {
        check_root(dir, confirmed)?;
        let added = self.config.add_root(dir)?;
        if self.content.root().is_none() {
            self.config.set_root(dir)?;
        }
        self.sync_root();
        Ok(added)
    }

    /// Forget `dir`; removing the active root promotes the next known one
    pub fn remove_root(&mut self, dir: &Path) -> Result<bool, StoreError> {
        let removed = self.config.remove_root(dir)?;
        self.sync_root();
        Ok(removed)
    }

    /// Forget every known root
    pub fn clear_roots(&mut self) -> Result<(), StoreError> {
        self.config.clear()?;
        self.sync_root();
        Ok(())
    }

    /// Replace the configuration with an exported record
    pub fn import_config(&mut self, path: &Path) -> Result<(), StoreError> {
        self.config.import_from(path)?;
        self.sync_root();
        Ok(())
    }

    fn sync_root(&mut self) {
        let Some(root) = self.config.root().map(Path::to_path_buf) else {
            self.content = ContentRepository::new(None);
            return;
        };
        if self.content.root() == Some(root.as_path()) {
            return;
        }
        if let Err(e) = self.content.set_root(&root) {
            tracing::warn!("Configured content root is unavailable: {}", e);
            self.content = ContentRepository::new(None);
        }
    }

    /// Resolve a topic by module, difficulty and directory or display name
    pub fn locate(
        &self,
        module: &str,
        difficulty: Option<Difficulty>,
        topic: &str,
    ) -> Option<TopicLocation> {
        let difficulty = if has_difficulties(module) { difficulty } else { None };
        let topic = self.content.find_topic(module, difficulty, topic)?;
        Some(TopicLocation::new(module, difficulty, topic))
    }

    /// Check an answer, recording the attempt and completing the question when correct
    pub fn submit_answer(
        &mut self,
        location: &TopicLocation,
        question_file: &str,
        answer: &str,
    ) -> Result<SubmitOutcome, StoreError> {
        if answer.trim().is_empty() {
            return Ok(SubmitOutcome::Blank);
        }

        let key = QuestionKey::for_question(location, question_file);
        if self.progress.is_completed(&key) {
            return Ok(SubmitOutcome::AlreadyCompleted);
        }

        let Some(answer_key) = self.content.resolve_answer(location, question_file) else {
            tracing::warn!("No answer found for question {}", key);
            return Ok(SubmitOutcome::NoAnswer);
        };

        let correct = answer_key.accepts(answer);
        self.progress.record_attempt(&key, correct)?;
        if !correct {
            return Ok(SubmitOutcome::Incorrect);
        }

        self.progress.mark_completed(&key)?;
        Ok(SubmitOutcome::Correct)
    }

    /// Reveal a question's hint
    ///
    /// Every reveal charges the difficulty's penalty as incorrect attempts. Questions without
    /// a difficulty, and Insane questions, offer no hint.
    pub fn reveal_hint(
        &mut self,
        location: &TopicLocation,
        question_file: &str,
    ) -> Result<HintOutcome, StoreError> {
        let Some(difficulty) = location.difficulty.filter(|d| d.offers_hints()) else {
            return Ok(HintOutcome::Unavailable);
        };
        let Some(hint) = self.content.resolve_hint(location, question_file) else {
            return Ok(HintOutcome::Unavailable);
        };

        let key = QuestionKey::for_question(location, question_file);
        self.progress.mark_hint_used(&key)?;

        let penalty = difficulty.hint_penalty();
        for _ in 0..penalty {
            self.progress.record_attempt(&key, false)?;
        }
        if penalty > 0 {
            tracing::debug!("Charged {} incorrect attempt(s) for hint on {}", penalty, key);
        }

        Ok(HintOutcome::Revealed { hint, penalty })
    }

    pub fn is_question_completed(&self, location: &TopicLocation, question_file: &str) -> bool {
        self.progress.is_completed(&QuestionKey::for_question(location, question_file))
    }

    pub fn is_hint_used(&self, location: &TopicLocation, question_file: &str) -> bool {
        self.progress.is_hint_used(&QuestionKey::for_question(location, question_file))
    }

    /// Whether a topic has questions and all of them are completed
    pub fn is_topic_completed(&self, location: &TopicLocation) -> bool {
        let questions = self.content.list_questions(location);
        !questions.is_empty()
            && questions.iter().all(|q| self.is_question_completed(location, &q.file_name))
    }

    /// Whether a tier has topics and all of them are completed
    pub fn is_difficulty_completed(&self, module: &str, difficulty: Option<Difficulty>) -> bool {
        let topics = self.content.list_topics(module, difficulty);
        !topics.is_empty()
            && topics.into_iter().all(|topic| {
                self.is_topic_completed(&TopicLocation::new(module, difficulty, topic))
            })
    }

    /// Whether every tier of a module is completed
    pub fn is_module_completed(&self, module: &str) -> bool {
        if module == GETTING_STARTED {
            return self.is_difficulty_completed(module, None);
        }

        let difficulties = self.content.list_difficulties(module);
        !difficulties.is_empty()
            && difficulties.into_iter().all(|d| self.is_difficulty_completed(module, Some(d)))
    }

    /// Completed and total question counts of a module
    pub fn module_question_counts(&self, module: &str) -> (usize, usize) {
        let tiers: Vec<Option<Difficulty>> = if module == GETTING_STARTED {
            vec![None]
        } else {
            self.content.list_difficulties(module).into_iter().map(Some).collect()
        };

        let mut completed = 0;
        let mut total = 0;
        for difficulty in tiers {
            for topic in self.content.list_topics(module, difficulty) {
                let location = TopicLocation::new(module, difficulty, topic);
                for question in self.content.list_questions(&location) {
                    total += 1;
                    if self.is_question_completed(&location, &question.file_name) {
                        completed += 1;
                    }
                }
            }
        }
        (completed, total)
    }

    /// Percentage of a module's questions that are completed; 0 for an empty module
    pub fn module_completion(&self, module: &str) -> f64 {
        match self.module_question_counts(module) {
            (_, 0) => 0.0,
            (completed, total) => completed as f64 / total as f64 * 100.0,
        }
    }

    pub fn question_stats(&self, location: &TopicLocation, question_file: &str) -> Stats {
        self.progress.stats_for(&QuestionKey::for_question(location, question_file))
    }

    pub fn topic_stats(&self, location: &TopicLocation) -> Stats {
        self.progress.topic_stats(location)
    }

    pub fn difficulty_stats(&self, module: &str, difficulty: Option<Difficulty>) -> Stats {
        self.progress.difficulty_stats(module, difficulty)
    }

    pub fn module_stats(&self, module: &str) -> Stats {
        self.progress.module_stats(module)
    }

    pub fn overall_stats(&self) -> Stats {
        self.progress.overall_stats()
    }

    /// Number of completed questions in a module, from the progress record alone
    pub fn recorded_completions(&self, module: &str) -> usize {
        self.progress.completed_count(&key::module_prefix(module))
    }

    /// Clear all progress and statistics
    pub fn reset_progress(&mut self) -> Result<(), StoreError> {
        self.progress.reset()
    }
}

fn check_root(dir: &Path, confirmed: bool) -> Result<(), ContentError> {
    if !dir.is_dir() {
        return Err(ContentError::RootNotFound(dir.to_path_buf()));
    }
    if !confirmed && !ContentRepository::is_valid_content_root(dir) {
        return Err(ContentError::UnrecognizedRoot(dir.to_path_buf()));
    }
    Ok(())
}
