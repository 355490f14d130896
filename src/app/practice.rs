//! Interactive practice session over one topic

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use super::command::{Command, ParseResult, parse_input};
use super::{SubmitOutcome, Trainer};
use crate::content::TopicLocation;
use crate::ui::{self, Painter};

/// How a practice session ended and what happened during it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PracticeSummary {
    /// Questions answered correctly in this session
    pub solved: usize,
    /// Questions skipped or left without an answer file
    pub skipped: usize,
    /// Whether the user left before the last question
    pub quit: bool,
}

/// Step through the unfinished questions of a topic, reading answers and commands from `input`
pub fn run(
    trainer: &mut Trainer,
    painter: &Painter,
    location: &TopicLocation,
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<PracticeSummary> {
    let title = ui::listing::location_title(location);
    let pending: Vec<_> = trainer
        .content()
        .list_questions(location)
        .into_iter()
        .filter(|q| !trainer.is_question_completed(location, &q.file_name))
        .collect();

    let mut summary = PracticeSummary::default();
    if pending.is_empty() {
        writeln!(output, "Every question in {} is already completed.", title)?;
        return Ok(summary);
    }

    tracing::info!("Practice started on {} with {} question(s)", title, pending.len());
    ui::question::help(&mut output, painter)?;

    'questions: for question in &pending {
        let name = &question.file_name;
        writeln!(output)?;
        ui::question::question(
            &mut output,
            painter,
            &title,
            question,
            trainer.content().load_question(location, question).as_ref(),
            &trainer.content().list_question_resources(location, name),
            false,
        )?;

        loop {
            write!(output, "> ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line).context("Failed to read input")? == 0 {
                summary.quit = true;
                break 'questions;
            }

            let command = match parse_input(&line) {
                ParseResult::Ok(command) => command,
                ParseResult::UnknownCommand(cmd) => {
                    writeln!(output, "Unknown command: :{} (try :help)", cmd)?;
                    continue;
                }
            };

            match command {
                Command::Answer(answer) => {
                    let outcome = trainer.submit_answer(location, name, &answer)?;
                    ui::question::outcome(&mut output, painter, outcome)?;
                    match outcome {
                        SubmitOutcome::Correct => {
                            summary.solved += 1;
                            break;
                        }
                        SubmitOutcome::AlreadyCompleted => break,
                        SubmitOutcome::NoAnswer => {
                            summary.skipped += 1;
                            break;
                        }
                        SubmitOutcome::Incorrect | SubmitOutcome::Blank => {}
                    }
                }
                Command::Hint => {
                    let outcome = trainer.reveal_hint(location, name)?;
                    ui::question::hint(&mut output, painter, &outcome, location.difficulty)?;
                }
                Command::Skip => {
                    summary.skipped += 1;
                    break;
                }
                Command::Resources => {
                    writeln!(output, "Question resources:")?;
                    ui::listing::resources(
                        &mut output,
                        painter,
                        &trainer.content().list_question_resources(location, name),
                    )?;
                    writeln!(output, "Topic resources:")?;
                    ui::listing::resources(
                        &mut output,
                        painter,
                        &trainer.content().list_topic_resources(location),
                    )?;
                }
                Command::Help => ui::question::help(&mut output, painter)?,
                Command::Quit => {
                    summary.quit = true;
                    break 'questions;
                }
                Command::Nop => {}
            }
        }
    }

    writeln!(output)?;
    let stats = trainer.topic_stats(location);
    let state = if trainer.is_topic_completed(location) { "completed" } else { "in progress" };
    writeln!(output, "{}: {}, accuracy {}", title, state, painter.accuracy(&stats))?;
    tracing::info!("Practice ended: {:?}", summary);
    Ok(summary)
}
