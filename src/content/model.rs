//! Content model for the exercise hierarchy
//!
//! A content root holds modules; most modules are split into difficulty tiers, each tier
//! holds numbered topics, and each topic holds question files. `Getting Started` is the
//! one module without difficulty tiers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The module that keeps its topics directly under the module directory
pub const GETTING_STARTED: &str = "Getting Started";

/// Module directory names that mark a directory as CTF content
pub const KNOWN_MODULES: [&str; 11] = [
    "OSI",
    "Cryptography",
    "Password Cracking",
    "Web App Exploitation",
    GETTING_STARTED,
    "Log Analysis",
    "Forensics",
    "Network Traffic Analysis",
    "Enumeration & Exploitation",
    "Scanning & Reconnaissance",
    "Wireless Exploitation",
];

/// Whether `module` is split into difficulty tiers
pub fn has_difficulties(module: &str) -> bool {
    module != GETTING_STARTED
}

/// Difficulty tier of a module
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Insane,
}

impl Difficulty {
    /// Every tier, easiest first
    pub const ALL: [Difficulty; 4] =
        [Difficulty::Beginner, Difficulty::Intermediate, Difficulty::Advanced, Difficulty::Insane];

    /// Directory name of the tier
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Insane => "Insane",
        }
    }

    /// Display color as an RGB triple
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Difficulty::Beginner => (0x00, 0x67, 0xC5),
            Difficulty::Intermediate => (0x1C, 0x92, 0xD1),
            Difficulty::Advanced => (0x00, 0x1A, 0x31),
            Difficulty::Insane => (0x00, 0x7F, 0x3E),
        }
    }

    /// Display color as a `#RRGGBB` string
    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    /// Whether questions at this tier offer a hint at all
    pub fn offers_hints(self) -> bool {
        !matches!(self, Difficulty::Insane)
    }

    /// Incorrect attempts charged for each hint reveal at this tier
    pub fn hint_penalty(self) -> u32 {
        match self {
            Difficulty::Intermediate => 1,
            Difficulty::Advanced => 3,
            Difficulty::Beginner | Difficulty::Insane => 0,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognised difficulty name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown difficulty '{0}'. Expected Beginner, Intermediate, Advanced or Insane")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

/// A topic directory and the name shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topic {
    /// Directory name (e.g., "Topic3")
    pub dir_name: String,
    /// Name from `topic_name.txt`, or the directory name
    pub display_name: String,
}

impl Topic {
    /// Create a topic with an explicit display name
    pub fn new(dir_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self { dir_name: dir_name.into(), display_name: display_name.into() }
    }

    /// Create a topic displayed under its directory name
    pub fn from_dir(dir_name: impl Into<String>) -> Self {
        let dir_name = dir_name.into();
        Self { display_name: dir_name.clone(), dir_name }
    }

    /// Whether a custom display name was found
    pub fn has_custom_name(&self) -> bool {
        self.display_name != self.dir_name
    }
}

/// Where a question file lives inside its topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuestionKind {
    /// `Questions/`
    Regular,
    /// `Prompt or Not/Prompt Style/`
    Prompt,
}

impl QuestionKind {
    /// Directory of this kind, relative to the topic directory
    pub fn relative_dir(self) -> PathBuf {
        match self {
            QuestionKind::Regular => PathBuf::from("Questions"),
            QuestionKind::Prompt => PathBuf::from("Prompt or Not").join("Prompt Style"),
        }
    }

    /// Short label for listings
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::Regular => "regular",
            QuestionKind::Prompt => "prompt",
        }
    }
}

/// A question file within a topic
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    /// Which question directory holds the file
    pub kind: QuestionKind,
    /// File name (e.g., "A_Question.txt")
    pub file_name: String,
}

impl Question {
    /// Create a new question reference
    pub fn new(kind: QuestionKind, file_name: impl Into<String>) -> Self {
        Self { kind, file_name: file_name.into() }
    }

    /// File path relative to the topic directory
    pub fn relative_path(&self) -> PathBuf {
        self.kind.relative_dir().join(&self.file_name)
    }
}

/// Fully-qualified position of a topic in the hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicLocation {
    /// Module directory name
    pub module: String,
    /// Difficulty tier; always `None` for modules without tiers
    pub difficulty: Option<Difficulty>,
    /// The topic itself
    pub topic: Topic,
}

impl TopicLocation {
    /// Create a location, dropping the difficulty for modules without tiers
    pub fn new(module: impl Into<String>, difficulty: Option<Difficulty>, topic: Topic) -> Self {
        let module = module.into();
        let difficulty = if has_difficulties(&module) { difficulty } else { None };
        Self { module, difficulty, topic }
    }
}
