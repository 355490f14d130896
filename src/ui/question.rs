//! Question view and feedback messages

use std::io::{self, Write};

use super::{Painter, heading, listing};
use crate::app::command::HELP;
use crate::app::{HintOutcome, SubmitOutcome};
use crate::content::{Difficulty, Question, QuestionText, Resource};

/// A question with its text and question-scoped attachments
pub fn question(
    out: &mut impl Write,
    painter: &Painter,
    title: &str,
    question: &Question,
    text: Option<&QuestionText>,
    resources: &[Resource],
    completed: bool,
) -> io::Result<()> {
    heading(out, painter, title)?;
    writeln!(
        out,
        "{} {} {}",
        painter.check(completed),
        painter.bold(&question.file_name),
        painter.muted(format!("({})", question.kind.label())),
    )?;
    writeln!(out)?;

    match text {
        Some(text) => {
            for line in painter.wrapped(&text.display_text(), "  ") {
                writeln!(out, "{}", line)?;
            }
        }
        None => writeln!(out, "  {}", painter.muted("(question could not be loaded)"))?,
    }

    if !resources.is_empty() {
        writeln!(out)?;
        writeln!(out, "  {}", painter.bold("Resources"))?;
        listing::resources(out, painter, resources)?;
    }
    Ok(())
}

/// Feedback after an answer submission
pub fn outcome(out: &mut impl Write, painter: &Painter, outcome: SubmitOutcome) -> io::Result<()> {
    let theme = painter.theme();
    match outcome {
        SubmitOutcome::Correct => writeln!(out, "{}", painter.paint("✓ Correct!", theme.success)),
        SubmitOutcome::Incorrect => {
            writeln!(out, "{}", painter.paint("✗ Incorrect. Try again.", theme.error))
        }
        SubmitOutcome::AlreadyCompleted => {
            writeln!(out, "{}", painter.muted("This question is already completed."))
        }
        SubmitOutcome::NoAnswer => writeln!(
            out,
            "{}",
            painter.paint("No answer file was found for this question.", theme.warning)
        ),
        SubmitOutcome::Blank => writeln!(out, "{}", painter.muted("Please enter an answer.")),
    }
}

/// A revealed hint, noting any penalty charged
pub fn hint(
    out: &mut impl Write,
    painter: &Painter,
    outcome: &HintOutcome,
    difficulty: Option<Difficulty>,
) -> io::Result<()> {
    let HintOutcome::Revealed { hint, penalty } = outcome else {
        return writeln!(out, "{}", painter.muted("No hint available for this question."));
    };

    let title = match penalty {
        0 => "Hint".to_string(),
        1 => "Hint (counts as 1 incorrect attempt)".to_string(),
        n => format!("Hint (counts as {} incorrect attempts)", n),
    };
    let color = difficulty.map_or(painter.theme().accent_primary, |d| painter.theme().difficulty(d));
    writeln!(out, "{}", painter.bold(painter.paint(title, color)))?;
    for line in painter.wrapped(hint, "  ") {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Practice command summary
pub fn help(out: &mut impl Write, painter: &Painter) -> io::Result<()> {
    writeln!(out, "Type an answer, or one of:")?;
    for (command, description) in HELP {
        writeln!(out, "  {:<16} {}", command, painter.muted(description))?;
    }
    Ok(())
}
