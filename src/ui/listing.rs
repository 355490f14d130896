//! Navigation listings: roots, modules, difficulties, topics, questions and resources

use std::io::{self, Write};

use super::{Painter, heading};
use crate::app::Trainer;
use crate::config::ConfigStore;
use crate::content::{Difficulty, Resource, TopicLocation};

/// Known content roots, marking the active one
pub fn roots(out: &mut impl Write, painter: &Painter, config: &ConfigStore) -> io::Result<()> {
    heading(out, painter, "Content directories")?;
    if config.known_roots().is_empty() {
        return writeln!(out, "  {}", painter.muted("(none)"));
    }

    for dir in config.known_roots() {
        let active = config.root() == Some(dir.as_path());
        let marker = if active { painter.paint("*", painter.theme().success) } else { " ".into() };
        let missing = if dir.is_dir() { String::new() } else { painter.muted(" (missing)") };
        writeln!(out, "  {} {}{}", marker, dir.display(), missing)?;
    }
    Ok(())
}

/// Every module with its completion and accuracy
pub fn modules(out: &mut impl Write, painter: &Painter, trainer: &Trainer) -> io::Result<()> {
    let Some(root) = trainer.root() else {
        return writeln!(out, "No content directory selected. Use `ctf-trainer root set <PATH>`.");
    };

    heading(out, painter, &format!("Modules in {}", root.display()))?;
    let modules = trainer.content().list_modules();
    if modules.is_empty() {
        return writeln!(out, "  {}", painter.muted("(no modules found)"));
    }

    let name_width = modules.iter().map(|m| m.chars().count()).max().unwrap_or(0);
    for module in &modules {
        let stats = trainer.module_stats(module);
        writeln!(
            out,
            "  {} {:<width$}  {:>6.1}% complete  accuracy {}",
            painter.check(trainer.is_module_completed(module)),
            module,
            trainer.module_completion(module),
            painter.accuracy(&stats),
            width = name_width,
        )?;
    }
    Ok(())
}

/// Difficulty tiers present for a module
pub fn difficulties(
    out: &mut impl Write,
    painter: &Painter,
    trainer: &Trainer,
    module: &str,
) -> io::Result<()> {
    heading(out, painter, module)?;
    let tiers = trainer.content().list_difficulties(module);
    if tiers.is_empty() {
        return writeln!(out, "  {}", painter.muted("(no difficulty levels)"));
    }

    for difficulty in tiers {
        let stats = trainer.difficulty_stats(module, Some(difficulty));
        writeln!(
            out,
            "  {} {}  accuracy {}",
            painter.check(trainer.is_difficulty_completed(module, Some(difficulty))),
            painter.paint(format!("{:<12}", difficulty), painter.theme().difficulty(difficulty)),
            painter.accuracy(&stats),
        )?;
    }
    Ok(())
}

/// Topics of a module tier in numeric order
pub fn topics(
    out: &mut impl Write,
    painter: &Painter,
    trainer: &Trainer,
    module: &str,
    difficulty: Option<Difficulty>,
) -> io::Result<()> {
    let title = match difficulty {
        Some(d) => format!("{} / {}", module, d),
        None => module.to_string(),
    };
    heading(out, painter, &title)?;

    let topics = trainer.content().list_topics(module, difficulty);
    if topics.is_empty() {
        return writeln!(out, "  {}", painter.muted("(no topics)"));
    }

    for topic in topics {
        let dir = topic.dir_name.clone();
        let name = if topic.has_custom_name() {
            format!("{} {}", topic.display_name, painter.muted(format!("({})", dir)))
        } else {
            dir
        };
        let location = TopicLocation::new(module, difficulty, topic);
        writeln!(
            out,
            "  {} {}  accuracy {}",
            painter.check(trainer.is_topic_completed(&location)),
            name,
            painter.accuracy(&trainer.topic_stats(&location)),
        )?;
    }
    Ok(())
}

/// Questions of a topic with completion and hint marks
pub fn questions(
    out: &mut impl Write,
    painter: &Painter,
    trainer: &Trainer,
    location: &TopicLocation,
) -> io::Result<()> {
    heading(out, painter, &location_title(location))?;
    let questions = trainer.content().list_questions(location);
    if questions.is_empty() {
        return writeln!(out, "  {}", painter.muted("(no questions)"));
    }

    for question in questions {
        let name = &question.file_name;
        let hint =
            if trainer.is_hint_used(location, name) { painter.muted(" [hint]") } else { String::new() };
        writeln!(
            out,
            "  {} {} {}{}  accuracy {}",
            painter.check(trainer.is_question_completed(location, name)),
            painter.muted(format!("{:<7}", question.kind.label())),
            name,
            hint,
            painter.accuracy(&trainer.question_stats(location, name)),
        )?;
    }
    Ok(())
}

/// Attachment list
pub fn resources(out: &mut impl Write, painter: &Painter, resources: &[Resource]) -> io::Result<()> {
    if resources.is_empty() {
        return writeln!(out, "  {}", painter.muted("(no resources)"));
    }

    for resource in resources {
        writeln!(
            out,
            "  {} {}  {}",
            painter.paint(format!("{:<5}", resource.kind), painter.theme().accent_secondary),
            resource.file_name,
            painter.muted(resource.path.display()),
        )?;
    }
    Ok(())
}

/// `Module / Difficulty / Topic` title of a location
pub fn location_title(location: &TopicLocation) -> String {
    let mut parts = vec![location.module.clone()];
    if let Some(d) = location.difficulty {
        parts.push(d.to_string());
    }
    parts.push(location.topic.display_name.clone());
    parts.join(" / ")
}
