//! Progress report

use std::io::{self, Write};

use super::{Painter, heading};
use crate::app::Trainer;

/// Overall accuracy followed by a per-module breakdown
pub fn report(out: &mut impl Write, painter: &Painter, trainer: &Trainer) -> io::Result<()> {
    let overall = trainer.overall_stats();
    heading(out, painter, "Progress")?;
    writeln!(
        out,
        "  Overall accuracy: {}  ({} correct of {} attempts)",
        painter.accuracy(&overall),
        overall.correct,
        overall.total,
    )?;

    let modules = trainer.content().list_modules();
    if modules.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    let name_width = modules.iter().map(|m| m.chars().count()).max().unwrap_or(0);
    for module in &modules {
        let stats = trainer.module_stats(module);
        let (completed, total) = trainer.module_question_counts(module);
        writeln!(
            out,
            "  {} {:<width$}  {:>3}/{:<3} questions  accuracy {}",
            painter.check(trainer.is_module_completed(module)),
            module,
            completed,
            total,
            painter.accuracy(&stats),
            width = name_width,
        )?;

        for difficulty in trainer.content().list_difficulties(module) {
            let stats = trainer.difficulty_stats(module, Some(difficulty));
            if stats.is_empty() {
                continue;
            }
            writeln!(
                out,
                "      {} {}",
                painter.paint(format!("{:<12}", difficulty), painter.theme().difficulty(difficulty)),
                painter.accuracy(&stats),
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Difficulty, Topic, TopicLocation};
    use crate::storage::StorePaths;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn report_shows_overall_and_module_lines() {
        let content = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        let topic = content.path().join("OSI/Beginner/Topic1");
        fs::create_dir_all(topic.join("Questions")).unwrap();
        fs::create_dir_all(topic.join("Answers")).unwrap();
        fs::write(topic.join("Questions/1_Question.txt"), "Q").unwrap();
        fs::write(topic.join("Answers/1_Answer.txt"), "a").unwrap();

        let mut trainer = Trainer::open(&StorePaths::in_dir(data.path()));
        trainer.select_root(content.path(), false).unwrap();
        let loc = TopicLocation::new("OSI", Some(Difficulty::Beginner), Topic::from_dir("Topic1"));
        trainer.submit_answer(&loc, "1_Question.txt", "b").unwrap();
        trainer.submit_answer(&loc, "1_Question.txt", "a").unwrap();

        let mut out = Vec::new();
        report(&mut out, &Painter::plain(80), &trainer).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Overall accuracy: 50.0%  (1 correct of 2 attempts)"));
        assert!(text.contains("OSI"));
        assert!(text.contains("1/1"));
        assert!(text.contains("Beginner"));
    }

    #[test]
    fn empty_report_is_na() {
        let data = TempDir::new().unwrap();
        let trainer = Trainer::open(&StorePaths::in_dir(data.path()));
        let mut out = Vec::new();
        report(&mut out, &Painter::plain(80), &trainer).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Overall accuracy: N/A"));
    }
}
