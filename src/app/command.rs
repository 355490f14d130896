//! Command parsing for the interactive practice prompt
//!
//! A line starting with `:` is a command; anything else is an answer.

/// Parsed line of practice input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit an answer to the current question
    Answer(String),
    /// Reveal the hint: :hint or :h
    Hint,
    /// Move on to the next question: :skip or :s
    Skip,
    /// List attachments of the current question and topic: :resources or :r
    Resources,
    /// Show help: :help or :?
    Help,
    /// Leave the practice session: :q or :quit
    Quit,
    /// Empty input
    Nop,
}

/// Result of parsing a line
#[derive(Debug)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Unknown command
    UnknownCommand(String),
}

/// Parse one line of practice input
pub fn parse_input(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Ok(Command::Nop);
    }

    match input.strip_prefix(':') {
        Some(cmd) => parse_command(cmd),
        None => ParseResult::Ok(Command::Answer(input.to_string())),
    }
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> ParseResult {
    let cmd = input.trim();

    match cmd.to_lowercase().as_str() {
        "" => ParseResult::Ok(Command::Nop),
        "hint" | "h" => ParseResult::Ok(Command::Hint),
        "skip" | "s" | "next" | "n" => ParseResult::Ok(Command::Skip),
        "resources" | "r" | "files" => ParseResult::Ok(Command::Resources),
        "help" | "?" => ParseResult::Ok(Command::Help),
        "quit" | "q" | "exit" => ParseResult::Ok(Command::Quit),
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}

/// Help text listing every practice command
pub const HELP: &[(&str, &str)] = &[
    (":hint, :h", "reveal the hint (may count as incorrect attempts)"),
    (":skip, :s", "move on to the next question"),
    (":resources, :r", "list attachments for this question and topic"),
    (":help, :?", "show this help"),
    (":quit, :q", "leave the practice session"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_command() {
        assert!(matches!(parse_input(":q"), ParseResult::Ok(Command::Quit)));
        assert!(matches!(parse_input(":quit"), ParseResult::Ok(Command::Quit)));
        assert!(matches!(parse_input(":Q"), ParseResult::Ok(Command::Quit)));
    }

    #[test]
    fn parse_help_command() {
        assert!(matches!(parse_input(":help"), ParseResult::Ok(Command::Help)));
        assert!(matches!(parse_input(":?"), ParseResult::Ok(Command::Help)));
    }

    #[test]
    fn parse_hint_and_skip() {
        assert!(matches!(parse_input(":hint"), ParseResult::Ok(Command::Hint)));
        assert!(matches!(parse_input(" :h "), ParseResult::Ok(Command::Hint)));
        assert!(matches!(parse_input(":skip"), ParseResult::Ok(Command::Skip)));
        assert!(matches!(parse_input(":n"), ParseResult::Ok(Command::Skip)));
    }

    #[test]
    fn parse_resources_command() {
        assert!(matches!(parse_input(":resources"), ParseResult::Ok(Command::Resources)));
        assert!(matches!(parse_input(":r"), ParseResult::Ok(Command::Resources)));
    }

    #[test]
    fn plain_text_is_an_answer() {
        match parse_input("  192.168.0.1  ") {
            ParseResult::Ok(Command::Answer(answer)) => assert_eq!(answer, "192.168.0.1"),
            other => panic!("Expected Answer, got {:?}", other),
        }
    }

    #[test]
    fn answer_may_contain_colons() {
        assert!(matches!(
            parse_input("aa:bb:cc:dd:ee:ff"),
            ParseResult::Ok(Command::Answer(a)) if a == "aa:bb:cc:dd:ee:ff"
        ));
    }

    #[test]
    fn parse_unknown_command() {
        assert!(matches!(parse_input(":unknown"), ParseResult::UnknownCommand(c) if c == "unknown"));
    }

    #[test]
    fn parse_empty_is_nop() {
        assert!(matches!(parse_input(""), ParseResult::Ok(Command::Nop)));
        assert!(matches!(parse_input("   "), ParseResult::Ok(Command::Nop)));
        assert!(matches!(parse_input(":"), ParseResult::Ok(Command::Nop)));
    }
}
