//! Attempt statistics and completion tracking

pub mod key;
pub mod model;
pub mod store;

pub use key::QuestionKey;
pub use model::Stats;
pub use store::ProgressStore;
