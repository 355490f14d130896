//! CTF Trainer - an offline terminal trainer for hierarchical CTF exercises
//!
//! Content lives in a directory tree of modules, difficulty tiers, topics and questions.
//! The trainer resolves that tree, checks answers against instructor answer files and tracks
//! completion and accuracy across sessions.

pub mod app;
pub mod config;
pub mod content;
pub mod error;
pub mod progress;
pub mod storage;
pub mod theme;
pub mod ui;

pub use app::Trainer;
pub use config::ConfigStore;
pub use content::ContentRepository;
pub use progress::ProgressStore;
pub use theme::Theme;
