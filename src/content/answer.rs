//! Accepted-answer matching

use serde::{Deserialize, Serialize};

/// The canonical answer string of a question
///
/// Several accepted answers are separated by `|`. Matching ignores case and surrounding
/// whitespace of each alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerKey {
    raw: String,
}

impl AnswerKey {
    /// Wrap an answer file's content
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into().trim().to_string() }
    }

    /// Content as stored in the answer file
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Each accepted answer, trimmed
    pub fn alternatives(&self) -> impl Iterator<Item = &str> {
        self.raw.split('|').map(str::trim).filter(|alt| !alt.is_empty())
    }

    /// Check a submitted answer
    pub fn accepts(&self, submitted: &str) -> bool {
        let submitted = submitted.trim().to_lowercase();
        if submitted.is_empty() {
            return false;
        }
        self.alternatives().any(|alt| alt.to_lowercase() == submitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_any_alternative() {
        let key = AnswerKey::new("cat|dog");
        assert!(key.accepts("Cat"));
        assert!(key.accepts(" dog "));
        assert!(key.accepts("DOG"));
        assert!(!key.accepts("catdog"));
    }

    #[test]
    fn alternatives_are_trimmed() {
        let key = AnswerKey::new(" port 80 | http |");
        assert_eq!(key.alternatives().collect::<Vec<_>>(), vec!["port 80", "http"]);
        assert!(key.accepts("HTTP"));
        assert!(key.accepts("Port 80"));
    }

    #[test]
    fn blank_submission_is_rejected() {
        let key = AnswerKey::new("flag|");
        assert!(!key.accepts(""));
        assert!(!key.accepts("   "));
    }

    #[test]
    fn single_answer() {
        let key = AnswerKey::new("flag{r0t13}\n");
        assert_eq!(key.raw(), "flag{r0t13}");
        assert!(key.accepts("FLAG{R0T13}"));
        assert!(!key.accepts("flag{rot13}"));
    }
}
