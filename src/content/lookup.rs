//! Answer and hint file lookup
//!
//! Answer and hint files are not paired with question files by exact name. Instead a
//! question is reduced to an identifier (the token before the first `_`, after stripping a
//! `PS_` prefix, or the first character when there is no underscore) and the sibling
//! directory is searched in two stages:
//!
//! 1. an identifier-prefix scan of the directory, in name order;
//! 2. a short list of fixed fallback candidates derived from the question file name.
//!
//! The first candidate that can be read and is not blank wins. Unreadable candidates are
//! logged and skipped.

use std::path::{Path, PathBuf};

use super::scan::{self, Entry};

/// Extract the identifier shared by a question and its answer and hint files
pub fn question_identifier(question_file: &str) -> Option<&str> {
    let base = strip_prompt_prefix(question_file);
    let id = match base.split_once('_') {
        Some((id, _)) => id,
        None => base.chars().next().map(|c| &base[..c.len_utf8()])?,
    };
    (!id.is_empty()).then_some(id)
}

/// Remove the `PS_` marker carried by prompt-style question files
pub fn strip_prompt_prefix(question_file: &str) -> &str {
    question_file.strip_prefix("PS_").unwrap_or(question_file)
}

/// Find the canonical answer string for `question_file` in `answers_dir`
pub fn find_answer(answers_dir: &Path, question_file: &str) -> Option<String> {
    let id = question_identifier(question_file)?;
    let base = strip_prompt_prefix(question_file);
    let entries = scan::entries(answers_dir);
    tracing::debug!("Looking for answer with identifier {:?} in {:?}", id, answers_dir);

    let prefix = format!("{}_", id);
    let scanned = entries
        .iter()
        .filter(|e| e.is_file())
        .filter(|e| e.name.starts_with(&prefix) && e.name.contains("Answer"))
        .filter(|e| e.name.ends_with(".txt"))
        .map(|e| e.path.clone());

    let fallback = [
        base.replace("Question", "Answer"),
        format!("{}_Answer.txt", stem(base)),
        base.to_string(),
    ]
    .into_iter()
    .map(|name| answers_dir.join(name));

    let found = read_first(scanned.chain(fallback));
    if found.is_none() {
        tracing::warn!("No answer file found for question: {}", question_file);
    }
    found
}

/// Find the hint text for `question_file` in `hints_dir`
pub fn find_hint(hints_dir: &Path, question_file: &str) -> Option<String> {
    let id = question_identifier(question_file)?;
    let base = strip_prompt_prefix(question_file);
    let entries = scan::entries(hints_dir);
    tracing::debug!("Looking for hint with identifier {:?} in {:?}", id, hints_dir);

    let prefix = format!("{}_", id);
    let files: Vec<&Entry> = entries.iter().filter(|e| e.is_file()).collect();

    // Exact `<id>_` matches first, then any other name starting with the identifier.
    let (exact, loose): (Vec<&Entry>, Vec<&Entry>) = files
        .iter()
        .copied()
        .filter(|e| e.name.starts_with(id))
        .partition(|e| e.name.starts_with(&prefix));

    let embedded = files
        .iter()
        .filter(|e| !e.name.starts_with(id))
        .filter(|e| e.name.contains(&prefix) && e.name.ends_with(".txt"))
        .map(|e| e.path.clone());

    let candidates = exact
        .into_iter()
        .chain(loose)
        .map(|e| e.path.clone())
        .chain(embedded)
        .chain(std::iter::once(hints_dir.join(base.replace("Question", "Hint"))));

    let found = read_first(candidates);
    if found.is_none() {
        tracing::warn!("No hint file found for question {} with identifier {}", question_file, id);
    }
    found
}

fn stem(file_name: &str) -> &str {
    Path::new(file_name).file_stem().and_then(|s| s.to_str()).unwrap_or(file_name)
}

fn read_first(candidates: impl IntoIterator<Item = PathBuf>) -> Option<String> {
    let mut tried: Vec<PathBuf> = Vec::new();
    for path in candidates {
        if tried.contains(&path) {
            continue;
        }
        if path.is_file() {
            if let Some(content) = scan::read_trimmed(&path) {
                tracing::debug!("Loaded content from {:?}", path);
                return Some(content);
            }
        }
        tried.push(path);
    }
    None
}
