use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use ctf_trainer::app::practice;
use ctf_trainer::content::model::has_difficulties;
use ctf_trainer::content::{Difficulty, TopicLocation};
use ctf_trainer::error::ContentError;
use ctf_trainer::storage::StorePaths;
use ctf_trainer::ui::{self, DEFAULT_WIDTH, Painter};
use ctf_trainer::{Theme, Trainer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ctf-trainer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Keep configuration and progress files in this directory
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Use this content directory (remembered for later runs)
    #[arg(short = 'd', long, global = true, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Reset all progress before running the command
    #[arg(long, global = true)]
    reset: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage content directories
    Root {
        #[command(subcommand)]
        command: RootCommand,
    },
    /// List modules with completion and accuracy
    Modules,
    /// List the difficulty levels of a module
    Difficulties {
        /// Module directory name
        module: String,
    },
    /// List the topics of a module
    Topics {
        /// Module directory name
        module: String,
        /// Difficulty level
        #[arg(long, alias = "level")]
        difficulty: Option<Difficulty>,
    },
    /// List the questions of a topic
    Questions(TopicArgs),
    /// Show a question
    Show {
        #[command(flatten)]
        topic: TopicArgs,
        /// Question file name (extension optional)
        question: String,
    },
    /// Submit an answer
    Answer {
        #[command(flatten)]
        topic: TopicArgs,
        /// Question file name (extension optional)
        question: String,
        /// Your answer
        answer: String,
    },
    /// Reveal a question's hint
    Hint {
        #[command(flatten)]
        topic: TopicArgs,
        /// Question file name (extension optional)
        question: String,
    },
    /// List or save a topic's resources
    Resources {
        #[command(flatten)]
        topic: TopicArgs,
        /// Copy every resource into this directory
        #[arg(long, value_name = "DIR")]
        save: Option<PathBuf>,
    },
    /// Answer a topic's questions interactively
    Practice(TopicArgs),
    /// Show overall progress
    Stats,
    /// Clear all progress and statistics
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum RootCommand {
    /// Print the active content directory
    Show,
    /// Make a directory the active content directory
    Set {
        path: PathBuf,
        /// Accept a directory without any known module
        #[arg(long)]
        force: bool,
    },
    /// Remember a content directory
    Add {
        path: PathBuf,
        /// Accept a directory without any known module
        #[arg(long)]
        force: bool,
    },
    /// Forget a content directory
    Remove { path: PathBuf },
    /// List remembered content directories
    List,
    /// Forget every content directory
    Clear,
    /// Write the directory configuration to a file
    Export { file: PathBuf },
    /// Load the directory configuration from a file
    Import { file: PathBuf },
}

#[derive(Args)]
struct TopicArgs {
    /// Module directory name
    module: String,
    /// Topic directory or display name
    topic: String,
    /// Difficulty level
    #[arg(long, alias = "level")]
    difficulty: Option<Difficulty>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.debug { "ctf_trainer=debug" } else { "ctf_trainer=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let paths = match &cli.data_dir {
        Some(dir) => StorePaths::in_dir(dir),
        None => StorePaths::platform()?,
    };
    let mut trainer = Trainer::open(&paths);
    let painter = painter();
    let mut out = io::stdout().lock();

    if cli.reset {
        trainer.reset_progress().context("Failed to reset progress")?;
        writeln!(out, "Progress reset.")?;
    }
    if let Some(dir) = &cli.directory {
        choose_root(&mut trainer, dir, false)?;
    }

    match cli.command.unwrap_or(Commands::Modules) {
        Commands::Root { command } => root(&mut trainer, &painter, &mut out, command)?,
        Commands::Modules => ui::listing::modules(&mut out, &painter, &trainer)?,
        Commands::Difficulties { module } => {
            ui::listing::difficulties(&mut out, &painter, &trainer, &module)?
        }
        Commands::Topics { module, difficulty } => {
            let difficulty = tier(&module, difficulty)?;
            ui::listing::topics(&mut out, &painter, &trainer, &module, difficulty)?
        }
        Commands::Questions(args) => {
            let location = locate(&trainer, &args)?;
            ui::listing::questions(&mut out, &painter, &trainer, &location)?
        }
        Commands::Show { topic, question } => {
            let location = locate(&trainer, &topic)?;
            let question = find_question(&trainer, &location, &question)?;
            let content = trainer.content();
            ui::question::question(
                &mut out,
                &painter,
                &ui::listing::location_title(&location),
                &question,
                content.load_question(&location, &question).as_ref(),
                &content.list_question_resources(&location, &question.file_name),
                trainer.is_question_completed(&location, &question.file_name),
            )?
        }
        Commands::Answer { topic, question, answer } => {
            let location = locate(&trainer, &topic)?;
            let question = find_question(&trainer, &location, &question)?;
            let outcome = trainer
                .submit_answer(&location, &question.file_name, &answer)
                .context("Failed to record attempt")?;
            ui::question::outcome(&mut out, &painter, outcome)?
        }
        Commands::Hint { topic, question } => {
            let location = locate(&trainer, &topic)?;
            let question = find_question(&trainer, &location, &question)?;
            let outcome = trainer
                .reveal_hint(&location, &question.file_name)
                .context("Failed to record hint")?;
            ui::question::hint(&mut out, &painter, &outcome, location.difficulty)?
        }
        Commands::Resources { topic, save } => {
            let location = locate(&trainer, &topic)?;
            let resources = trainer.content().list_topic_resources(&location);
            match save {
                None => {
                    ui::heading(&mut out, &painter, &ui::listing::location_title(&location))?;
                    ui::listing::resources(&mut out, &painter, &resources)?
                }
                Some(dir) => {
                    for resource in &resources {
                        let written = resource
                            .copy_to(&dir)
                            .with_context(|| format!("Failed to save {}", resource.file_name))?;
                        writeln!(out, "Saved {}", written.display())?;
                    }
                    if resources.is_empty() {
                        writeln!(out, "No resources to save.")?;
                    }
                }
            }
        }
        Commands::Practice(args) => {
            let location = locate(&trainer, &args)?;
            drop(out);
            practice::run(&mut trainer, &painter, &location, io::stdin().lock(), io::stdout())?;
        }
        Commands::Stats => ui::report::report(&mut out, &painter, &trainer)?,
        Commands::Reset { yes } => {
            if yes || confirm("Reset all progress and statistics?")? {
                trainer.reset_progress().context("Failed to reset progress")?;
                writeln!(out, "Progress reset.")?;
            } else {
                writeln!(out, "Reset cancelled.")?;
            }
        }
    }

    Ok(())
}

fn root(
    trainer: &mut Trainer,
    painter: &Painter,
    out: &mut impl Write,
    command: RootCommand,
) -> Result<()> {
    match command {
        RootCommand::Show => match trainer.config().root() {
            Some(root) => writeln!(out, "{}", root.display())?,
            None => writeln!(out, "No content directory selected.")?,
        },
        RootCommand::Set { path, force } => {
            choose_root(trainer, &path, force)?;
            writeln!(out, "Content directory set to {}", path.display())?;
        }
        RootCommand::Add { path, force } => {
            let added = match trainer.add_root(&path, force) {
                Err(e) if e.is_confirmable() => {
                    if !confirm(&unrecognized(&path))? {
                        bail!("{} (use --force to add it anyway)", e);
                    }
                    trainer.add_root(&path, true)?
                }
                other => other?,
            };
            if added {
                writeln!(out, "Added {}", path.display())?;
            } else {
                writeln!(out, "{} is already known", path.display())?;
            }
        }
        RootCommand::Remove { path } => {
            if trainer.remove_root(&path)? {
                writeln!(out, "Removed {}", path.display())?;
            } else {
                writeln!(out, "{} was not a known content directory", path.display())?;
            }
        }
        RootCommand::List => ui::listing::roots(out, painter, trainer.config())?,
        RootCommand::Clear => {
            trainer.clear_roots()?;
            writeln!(out, "Forgot every content directory.")?;
        }
        RootCommand::Export { file } => {
            trainer.config().export_to(&file)?;
            writeln!(out, "Configuration exported to {}", file.display())?;
        }
        RootCommand::Import { file } => {
            trainer
                .import_config(&file)
                .with_context(|| format!("Failed to import {}", file.display()))?;
            writeln!(out, "Configuration imported from {}", file.display())?;
        }
    }
    Ok(())
}

/// Select a content root, asking for confirmation when it does not look like one
fn choose_root(trainer: &mut Trainer, dir: &Path, force: bool) -> Result<()> {
    match trainer.select_root(dir, force) {
        Err(e) if e.is_confirmable() => {
            if confirm(&unrecognized(dir))? {
                trainer.select_root(dir, true)?;
                Ok(())
            } else {
                bail!("{} (use --force to select it anyway)", e)
            }
        }
        Err(ContentError::RootNotFound(dir)) => bail!("Directory does not exist: {}", dir.display()),
        other => Ok(other?),
    }
}

fn unrecognized(dir: &Path) -> String {
    format!("{} doesn't appear to contain CTF modules. Use it anyway?", dir.display())
}

/// Ask a yes/no question on the terminal; non-interactive input answers no
fn confirm(prompt: &str) -> Result<bool> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Ok(false);
    }

    let mut stderr = io::stderr();
    write!(stderr, "{} [y/N] ", prompt)?;
    stderr.flush()?;

    let mut line = String::new();
    stdin.read_line(&mut line).context("Failed to read confirmation")?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn tier(module: &str, difficulty: Option<Difficulty>) -> Result<Option<Difficulty>> {
    if !has_difficulties(module) {
        return Ok(None);
    }
    match difficulty {
        Some(d) => Ok(Some(d)),
        None => bail!("Module {} has difficulty levels; pass --difficulty", module),
    }
}

fn locate(trainer: &Trainer, args: &TopicArgs) -> Result<TopicLocation> {
    if trainer.root().is_none() {
        bail!("No content directory selected. Use `ctf-trainer root set <PATH>`.");
    }
    let difficulty = tier(&args.module, args.difficulty)?;
    trainer
        .locate(&args.module, difficulty, &args.topic)
        .with_context(|| format!("Topic {} not found in {}", args.topic, args.module))
}

fn find_question(
    trainer: &Trainer,
    location: &TopicLocation,
    name: &str,
) -> Result<ctf_trainer::content::Question> {
    trainer
        .content()
        .find_question(location, name)
        .with_context(|| format!("Question {} not found", name))
}

fn painter() -> Painter {
    let color = io::stdout().is_terminal();
    let width = crossterm::terminal::size().map(|(w, _)| w as usize).unwrap_or(DEFAULT_WIDTH);
    Painter::new(Theme::default(), color, width)
}
