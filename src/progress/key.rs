//! Composite question keys
//!
//! Every progress and statistics entry is addressed by
//! `"<module>/<difficulty or None>/<topic dir>/<question file>"`. Directory and file names
//! cannot contain `/`, so the key is unique across the whole content tree and every level of
//! the hierarchy is a string prefix of the keys below it.

use std::fmt;

use crate::content::{Difficulty, TopicLocation};

/// Difficulty segment used for modules without difficulty tiers
pub const NO_DIFFICULTY: &str = "None";

/// Key of one question in the progress and statistics records
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionKey(String);

impl QuestionKey {
    /// Build a key from its components
    pub fn new(
        module: &str,
        difficulty: Option<Difficulty>,
        topic_dir: &str,
        question_file: &str,
    ) -> Self {
        Self(format!("{}{}", topic_prefix(module, difficulty, topic_dir), question_file))
    }

    /// Key of a question inside a located topic
    pub fn for_question(location: &TopicLocation, question_file: &str) -> Self {
        Self::new(&location.module, location.difficulty, &location.topic.dir_name, question_file)
    }

    /// The key string as persisted
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for QuestionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Prefix shared by every key of a module
pub fn module_prefix(module: &str) -> String {
    format!("{}/", module)
}

/// Prefix shared by every key of a module's difficulty tier
pub fn difficulty_prefix(module: &str, difficulty: Option<Difficulty>) -> String {
    format!("{}{}/", module_prefix(module), difficulty.map_or(NO_DIFFICULTY, Difficulty::name))
}

/// Prefix shared by every key of a topic
pub fn topic_prefix(module: &str, difficulty: Option<Difficulty>, topic_dir: &str) -> String {
    format!("{}{}/", difficulty_prefix(module, difficulty), topic_dir)
}

/// Prefix shared by every key of a located topic
pub fn location_prefix(location: &TopicLocation) -> String {
    topic_prefix(&location.module, location.difficulty, &location.topic.dir_name)
}
