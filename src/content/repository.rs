//! Content repository resolver
//!
//! Maps a content root on disk onto the module → difficulty → topic → question hierarchy.
//! Every query is a fresh, read-only scan except topic listings, which are memoized per
//! (module, difficulty) until the root changes. Missing or unreadable content never
//! surfaces as an error: queries return empty collections or `None`.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use super::answer::AnswerKey;
use super::lookup;
use super::model::{
    Difficulty, KNOWN_MODULES, Question, QuestionKind, Topic, TopicLocation, has_difficulties,
};
use super::question::QuestionText;
use super::resources::{self, Resource};
use super::scan;
use crate::error::ContentError;

/// Sidecar file holding a topic's display name
pub const TOPIC_NAME_FILE: &str = "topic_name.txt";

/// Extension of question files
pub const QUESTION_EXTENSION: &str = ".txt";

/// Topic number embedded in a topic directory name
static TOPIC_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Topic\s*(\d+)").unwrap());

type TopicCacheKey = (String, Option<Difficulty>);

/// Read-only view of a content root
#[derive(Debug, Default)]
pub struct ContentRepository {
    root: Option<PathBuf>,
    topics: RefCell<HashMap<TopicCacheKey, Vec<Topic>>>,
}

impl ContentRepository {
    /// Create a repository over `root` (which may be absent)
    pub fn new(root: Option<PathBuf>) -> Self {
        tracing::info!("Content repository initialized with root {:?}", root);
        Self { root, topics: RefCell::default() }
    }

    /// Current content root
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Point the repository at a new root
    ///
    /// Only existence is checked; see [`ContentRepository::is_valid_content_root`] for the
    /// advisory shape check.
    pub fn set_root(&mut self, dir: impl AsRef<Path>) -> Result<(), ContentError> {
        let dir = dir.as_ref();
        if dir.as_os_str().is_empty() || !dir.is_dir() {
            tracing::error!("Directory does not exist: {:?}", dir);
            return Err(ContentError::RootNotFound(dir.to_path_buf()));
        }

        self.root = Some(dir.to_path_buf());
        self.topics.borrow_mut().clear();
        tracing::info!("Content root set to {:?}", dir);
        Ok(())
    }

    /// Whether `dir` holds at least one known module directory
    pub fn is_valid_content_root(dir: &Path) -> bool {
        if !dir.is_dir() {
            tracing::error!("Directory does not exist: {:?}", dir);
            return false;
        }

        let valid = KNOWN_MODULES.iter().any(|module| dir.join(module).is_dir());
        if !valid {
            tracing::warn!("No common CTF modules found in directory: {:?}", dir);
        }
        valid
    }

    /// Every module directory under the root
    pub fn list_modules(&self) -> BTreeSet<String> {
        let Some(root) = &self.root else {
            return BTreeSet::new();
        };

        scan::entries(root).into_iter().filter(|e| e.is_dir()).map(|e| e.name).collect()
    }

    /// Path of a module directory, if it exists
    pub fn module_path(&self, module: &str) -> Option<PathBuf> {
        let root = self.root.as_ref()?;
        if module.is_empty() {
            return None;
        }

        let path = root.join(module);
        if !path.is_dir() {
            tracing::warn!("Module path does not exist: {:?}", path);
            return None;
        }
        Some(path)
    }

    /// Path of a difficulty directory
    ///
    /// Modules without difficulty tiers (and a `None` difficulty) resolve to the module
    /// directory itself.
    pub fn difficulty_path(&self, module: &str, difficulty: Option<Difficulty>) -> Option<PathBuf> {
        let module_path = self.module_path(module)?;
        let Some(difficulty) = difficulty.filter(|_| has_difficulties(module)) else {
            return Some(module_path);
        };

        let path = module_path.join(difficulty.name());
        if !path.is_dir() {
            tracing::debug!("Difficulty path does not exist: {:?}", path);
            return None;
        }
        Some(path)
    }

    /// Difficulty tiers present for a module, easiest first
    pub fn list_difficulties(&self, module: &str) -> Vec<Difficulty> {
        if !has_difficulties(module) {
            return Vec::new();
        }

        Difficulty::ALL
            .into_iter()
            .filter(|d| self.difficulty_path(module, Some(*d)).is_some())
            .collect()
    }

    /// Path of a topic directory, if it exists
    pub fn topic_path(&self, location: &TopicLocation) -> Option<PathBuf> {
        let parent = self.difficulty_path(&location.module, location.difficulty)?;
        let path = parent.join(&location.topic.dir_name);
        if !path.is_dir() {
            tracing::warn!("Topic path does not exist: {:?}", path);
            return None;
        }
        Some(path)
    }

    /// Topics of a module/difficulty, ordered by topic number
    pub fn list_topics(&self, module: &str, difficulty: Option<Difficulty>) -> Vec<Topic> {
        let difficulty = difficulty.filter(|_| has_difficulties(module));
        let cache_key = (module.to_string(), difficulty);
        if let Some(topics) = self.topics.borrow().get(&cache_key) {
            return topics.clone();
        }

        let Some(path) = self.difficulty_path(module, difficulty) else {
            return Vec::new();
        };

        let mut topics: Vec<Topic> = scan::entries(&path)
            .into_iter()
            .filter(|e| e.name.starts_with("Topic") && e.is_dir())
            .map(|e| match read_topic_name(&e.path) {
                Some(display) => Topic::new(e.name, display),
                None => Topic::from_dir(e.name),
            })
            .collect();
        sort_topics(&mut topics);

        self.topics.borrow_mut().insert(cache_key, topics.clone());
        topics
    }

    /// Find a topic by directory name or display name (case-insensitive)
    pub fn find_topic(
        &self,
        module: &str,
        difficulty: Option<Difficulty>,
        query: &str,
    ) -> Option<Topic> {
        let topics = self.list_topics(module, difficulty);
        let query = query.trim();
        topics
            .iter()
            .find(|t| t.dir_name == query)
            .or_else(|| topics.iter().find(|t| t.dir_name.eq_ignore_ascii_case(query)))
            .or_else(|| topics.iter().find(|t| t.display_name.eq_ignore_ascii_case(query)))
            .cloned()
    }

    /// Questions of a topic: regular questions first, then prompt-style ones
    pub fn list_questions(&self, location: &TopicLocation) -> Vec<Question> {
        let Some(topic_path) = self.topic_path(location) else {
            return Vec::new();
        };

        [QuestionKind::Regular, QuestionKind::Prompt]
            .into_iter()
            .flat_map(|kind| {
                scan::entries(&topic_path.join(kind.relative_dir()))
                    .into_iter()
                    .filter(|e| e.name.ends_with(QUESTION_EXTENSION) && e.is_file())
                    .map(move |e| Question::new(kind, e.name))
            })
            .collect()
    }

    /// Find a question of a topic by file name (with or without extension)
    pub fn find_question(&self, location: &TopicLocation, file_name: &str) -> Option<Question> {
        let questions = self.list_questions(location);
        let with_ext = format!("{}{}", file_name, QUESTION_EXTENSION);
        questions
            .iter()
            .find(|q| q.file_name == file_name)
            .or_else(|| questions.iter().find(|q| q.file_name == with_ext))
            .cloned()
    }

    /// Read and parse a question file
    pub fn load_question(&self, location: &TopicLocation, question: &Question) -> Option<QuestionText> {
        let path = self.topic_path(location)?.join(question.relative_path());
        match fs::read_to_string(&path) {
            Ok(content) => Some(QuestionText::parse(&content)),
            Err(e) => {
                tracing::error!("Error loading question {:?}: {}", path, e);
                None
            }
        }
    }

    /// Accepted answers of a question
    pub fn resolve_answer(&self, location: &TopicLocation, question_file: &str) -> Option<AnswerKey> {
        let answers_dir = self.topic_path(location)?.join("Answers");
        lookup::find_answer(&answers_dir, question_file).map(AnswerKey::new)
    }

    /// Hint text of a question
    pub fn resolve_hint(&self, location: &TopicLocation, question_file: &str) -> Option<String> {
        let hints_dir = self.topic_path(location)?.join("Hints");
        lookup::find_hint(&hints_dir, question_file)
    }

    /// Every attachment of a topic
    pub fn list_topic_resources(&self, location: &TopicLocation) -> Vec<Resource> {
        self.topic_path(location).map(|p| resources::topic_resources(&p)).unwrap_or_default()
    }

    /// Attachments named after one question
    pub fn list_question_resources(
        &self,
        location: &TopicLocation,
        question_file: &str,
    ) -> Vec<Resource> {
        self.topic_path(location)
            .map(|p| resources::question_resources(&p, question_file))
            .unwrap_or_default()
    }
}

/// Topic number parsed from a directory name
pub fn topic_number(dir_name: &str) -> Option<u64> {
    TOPIC_NUMBER_RE.captures(dir_name).and_then(|c| c[1].parse().ok())
}

/// Order topics by number; unnumbered topics go last, names break ties
pub fn sort_topics(topics: &mut [Topic]) {
    topics.sort_by(|a, b| {
        let key = |t: &Topic| topic_number(&t.dir_name).unwrap_or(u64::MAX);
        key(a).cmp(&key(b)).then_with(|| a.dir_name.cmp(&b.dir_name))
    });
}

fn read_topic_name(topic_path: &Path) -> Option<String> {
    let path = topic_path.join(TOPIC_NAME_FILE);
    if !path.is_file() {
        return None;
    }
    scan::read_trimmed(&path)
}
