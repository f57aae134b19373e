//! # Study Buddy CLI (`sbd`)
//!
//! The `sbd` binary runs the HTTP API and exposes the study pipeline
//! directly from the command line.
//!
//! ## Usage
//!
//! ```bash
//! sbd --config ./config/studybuddy.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `sbd serve` | Start the HTTP API server |
//! | `sbd summarize <file>` | Summarize a document in a given style |
//! | `sbd quiz <file>` | Generate a quiz from a document (JSON) |
//! | `sbd flashcards <file>` | Generate flashcards from a document (JSON) |
//! | `sbd plan "<topic>"` | Generate a study plan |
//!
//! ## Examples
//!
//! ```bash
//! # Start the API server
//! sbd serve --config ./config/studybuddy.toml
//!
//! # Five bulleted key points from a PDF
//! sbd summarize lecture.pdf --style simple
//!
//! # Ten key takeaways
//! sbd summarize lecture.pdf --style takeaways
//!
//! # A two-week plan
//! sbd plan "Organic Chemistry" --days 14
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use studybuddy::config::load_config;
use studybuddy::extract::extract_text;
use studybuddy::generate::generator_or_disabled;
use studybuddy::server::run_server;
use studybuddy::study;
use studybuddy::styles::truncate_chars;

/// Study Buddy — a document study-aid backend with a deterministic local
/// generation pipeline.
#[derive(Parser)]
#[command(
    name = "sbd",
    about = "Study Buddy — summaries, quizzes, flashcards, and study plans from your documents",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/studybuddy.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server.
    Serve,

    /// Summarize a document file.
    ///
    /// Styles: simple, detailed, concept, qa, takeaways. Unrecognized
    /// styles produce a generic extractive summary.
    Summarize {
        /// Document to summarize (PDF, PPTX, DOCX, or plain text).
        file: PathBuf,

        /// Summary style.
        #[arg(long, default_value = "simple")]
        style: String,
    },

    /// Generate a multiple-choice quiz from a document file (JSON output).
    Quiz {
        /// Source document.
        file: PathBuf,

        /// Number of questions.
        #[arg(long, default_value_t = 5)]
        count: usize,
    },

    /// Generate flashcards from a document file (JSON output).
    Flashcards {
        /// Source document.
        file: PathBuf,

        /// Number of cards (remote hint; the local fallback caps at 10).
        #[arg(long, default_value_t = 10)]
        count: usize,
    },

    /// Generate a study plan for a topic.
    Plan {
        /// Topic to study.
        topic: String,

        /// Total number of days.
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
}

fn read_document(file: &PathBuf) -> anyhow::Result<String> {
    let bytes = std::fs::read(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let text = extract_text(&name, &bytes)
        .map_err(|e| anyhow::anyhow!("{}: {}", file.display(), e))?;
    if text.is_empty() {
        bail!("{}: no usable text extracted", file.display());
    }
    Ok(text)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            run_server(&config).await?;
        }

        Commands::Summarize { file, style } => {
            let text = read_document(&file)?;
            let generator = generator_or_disabled(&config.generator);
            let context = truncate_chars(&text, study::REMOTE_CONTEXT_CHARS);
            let answer = study::styled_summary(
                generator.as_ref(),
                &config.embedding,
                &style.to_lowercase(),
                &context,
                &text,
            )
            .await;
            println!("{}", answer);
        }

        Commands::Quiz { file, count } => {
            let text = read_document(&file)?;
            let generator = generator_or_disabled(&config.generator);
            let quiz = study::build_quiz(generator.as_ref(), &text, count).await;
            println!("{}", serde_json::to_string_pretty(&quiz)?);
        }

        Commands::Flashcards { file, count } => {
            let text = read_document(&file)?;
            let generator = generator_or_disabled(&config.generator);
            let cards = study::build_flashcards(generator.as_ref(), &text, count).await;
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }

        Commands::Plan { topic, days } => {
            if days == 0 {
                bail!("--days must be >= 1");
            }
            let generator = generator_or_disabled(&config.generator);
            let plan = study::build_plan(generator.as_ref(), &topic, days).await;
            println!("{}", plan);
        }
    }

    Ok(())
}
