//! Topic attachments
//!
//! Instructors drop supporting files (captures, images, PDFs) into one of several sibling
//! directories of a topic. Every non-hidden file there belongs to the topic; files whose
//! base name matches a question file also belong to that question.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::scan;
use crate::error::StoreError;

/// Topic subdirectories that may hold attachments
pub const RESOURCE_DIRS: [&str; 4] = ["Resources", "Files", "Media", "Documents"];

/// Attachment type, derived from the file extension
///
/// Declaration order is the listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    File,
    Image,
    Pdf,
    Text,
    Video,
}

impl ResourceKind {
    /// Classify a file name by extension (case-insensitive)
    pub fn classify(file_name: &str) -> Self {
        let ext = Path::new(file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" => ResourceKind::Image,
            "pdf" => ResourceKind::Pdf,
            "txt" | "text" | "md" | "rtf" => ResourceKind::Text,
            "mp4" | "avi" | "mov" | "wmv" => ResourceKind::Video,
            _ => ResourceKind::File,
        }
    }

    /// Lowercase label for listings
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::File => "file",
            ResourceKind::Image => "image",
            ResourceKind::Pdf => "pdf",
            ResourceKind::Text => "text",
            ResourceKind::Video => "video",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An attachment file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Attachment type
    pub kind: ResourceKind,
    /// Absolute path of the file
    pub path: PathBuf,
    /// File name, used for ordering and display
    pub file_name: String,
}

impl Resource {
    /// Build a resource from a path, classifying it by extension
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let file_name = path.file_name()?.to_string_lossy().to_string();
        Some(Self { kind: ResourceKind::classify(&file_name), path, file_name })
    }

    /// Copy the attachment into `dest_dir`, returning the written path
    pub fn copy_to(&self, dest_dir: &Path) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(dest_dir)
            .map_err(|source| StoreError::Io { path: dest_dir.to_path_buf(), source })?;
        let dest = dest_dir.join(&self.file_name);
        fs::copy(&self.path, &dest).map_err(|source| StoreError::Io { path: dest.clone(), source })?;
        tracing::info!("Saved {:?} to {:?}", self.path, dest);
        Ok(dest)
    }
}

/// Every attachment of the topic at `topic_path`
pub fn topic_resources(topic_path: &Path) -> Vec<Resource> {
    collect(topic_path, |_| true)
}

/// Attachments of one question: files named after the question file
///
/// `A_Question.txt` matches `A_Question.png` and `A_Question_capture.pcap`.
pub fn question_resources(topic_path: &Path, question_file: &str) -> Vec<Resource> {
    let base = Path::new(question_file)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| question_file.to_string());
    let prefix = format!("{}_", base);

    collect(topic_path, |name| {
        let stem = Path::new(name).file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
        stem == base || stem.starts_with(&prefix)
    })
}

fn collect(topic_path: &Path, keep: impl Fn(&str) -> bool) -> Vec<Resource> {
    let mut resources: Vec<Resource> = RESOURCE_DIRS
        .iter()
        .flat_map(|dir| scan::entries(&topic_path.join(dir)))
        .filter(|e| !e.is_hidden() && e.is_file() && keep(&e.name))
        .filter_map(|e| Resource::from_path(e.path))
        .collect();

    resources.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.file_name.cmp(&b.file_name)));
    resources
}
