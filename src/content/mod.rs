//! Exercise content discovery and parsing

pub mod answer;
pub mod lookup;
pub mod model;
pub mod question;
pub mod repository;
pub mod resources;
mod scan;

pub use answer::AnswerKey;
pub use model::{
    Difficulty, GETTING_STARTED, KNOWN_MODULES, Question, QuestionKind, Topic, TopicLocation,
};
pub use question::QuestionText;
pub use repository::ContentRepository;
pub use resources::{Resource, ResourceKind};
