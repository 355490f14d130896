//! Question file parsing
//!
//! A question file may carry a `[ ... ]` block with the scenario shown to the user and a
//! `{ ... }` block with the literal question, in either order. Files with neither block are
//! shown as-is.

use serde::{Deserialize, Serialize};

/// Parsed question content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionText {
    /// Text inside the first `[ ... ]` block
    pub description: Option<String>,
    /// Text inside the first `{ ... }` block
    pub question: Option<String>,
    /// Whole file content, trimmed
    pub raw: String,
}

impl QuestionText {
    /// Parse the content of a question file
    pub fn parse(content: &str) -> Self {
        Self {
            description: extract_region(content, '[', ']').map(str::to_string),
            question: extract_region(content, '{', '}').map(str::to_string),
            raw: content.trim().to_string(),
        }
    }

    /// Whether either delimited block was found
    pub fn is_structured(&self) -> bool {
        self.description.is_some() || self.question.is_some()
    }

    /// Text to show the user: description and question separated by a blank line
    pub fn display_text(&self) -> String {
        if !self.is_structured() {
            return self.raw.clone();
        }

        [self.description.as_deref(), self.question.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// The question being answered
    ///
    /// Empty when the file only has a description block.
    pub fn literal_question(&self) -> &str {
        match (&self.question, self.is_structured()) {
            (Some(q), _) => q,
            (None, true) => "",
            (None, false) => &self.raw,
        }
    }
}

/// Trimmed text between the first `open` and the next `close` after it
fn extract_region(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)? + open.len_utf8();
    let end = start + text[start..].find(close)?;
    let inner = text[start..end].trim();
    (!inner.is_empty()).then_some(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_description_and_question() {
        let parsed = QuestionText::parse("[Scenario here]{What is 2+2?}");
        assert_eq!(parsed.description.as_deref(), Some("Scenario here"));
        assert_eq!(parsed.literal_question(), "What is 2+2?");
        assert_eq!(parsed.display_text(), "Scenario here\n\nWhat is 2+2?");
    }

    #[test]
    fn parse_blocks_in_either_order() {
        let parsed = QuestionText::parse("{Which port?}\nsome filler\n[ A web server is running. ]");
        assert_eq!(parsed.description.as_deref(), Some("A web server is running."));
        assert_eq!(parsed.literal_question(), "Which port?");
        assert_eq!(parsed.display_text(), "A web server is running.\n\nWhich port?");
    }

    #[test]
    fn parse_plain_file() {
        let parsed = QuestionText::parse("  What does OSI stand for?\n");
        assert!(!parsed.is_structured());
        assert_eq!(parsed.display_text(), "What does OSI stand for?");
        assert_eq!(parsed.literal_question(), "What does OSI stand for?");
    }

    #[test]
    fn parse_question_only() {
        let parsed = QuestionText::parse("Intro text {Decode this}");
        assert_eq!(parsed.description, None);
        assert_eq!(parsed.display_text(), "Decode this");
        assert_eq!(parsed.literal_question(), "Decode this");
    }

    #[test]
    fn parse_description_only() {
        let parsed = QuestionText::parse("[Read the attached capture.]");
        assert_eq!(parsed.display_text(), "Read the attached capture.");
        assert_eq!(parsed.literal_question(), "");
    }

    #[test]
    fn unclosed_bracket_is_ignored() {
        let parsed = QuestionText::parse("array[0 is {first}");
        assert_eq!(parsed.description, None);
        assert_eq!(parsed.literal_question(), "first");
    }

    #[test]
    fn close_before_open_is_ignored() {
        let parsed = QuestionText::parse("] backwards [");
        assert!(!parsed.is_structured());
        assert_eq!(parsed.display_text(), "] backwards [");
    }

    #[test]
    fn empty_block_counts_as_missing() {
        let parsed = QuestionText::parse("[]{   }plain");
        assert!(!parsed.is_structured());
        assert_eq!(parsed.literal_question(), "[]{   }plain");
    }
}
