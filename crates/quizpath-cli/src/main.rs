//! quizpath CLI: take a sectioned quiz and get a learning path.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(
    name = "quizpath",
    version,
    about = "Sectioned multiple-choice quiz with learning-path recommendations"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Output format for `score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz interactively
    Take {
        /// Dataset file path or http(s) URL (overrides config)
        #[arg(long)]
        dataset: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory to save JSON and HTML reports of each finished attempt
        /// (defaults to `output_dir` from the config)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Score a file of answers without prompting
    Score {
        /// File of 1-based choice numbers, one per question
        #[arg(long)]
        answers: PathBuf,

        /// Dataset file path or http(s) URL (overrides config)
        #[arg(long)]
        dataset: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write the result to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Check a dataset for integrity errors and likely mistakes
    Validate {
        /// Dataset file path or http(s) URL (overrides config)
        #[arg(long)]
        dataset: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and sample dataset
    Init,
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quizpath=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            dataset,
            config,
            output,
        } => commands::take::execute(dataset, config, output).await,
        Commands::Score {
            answers,
            dataset,
            config,
            format,
            output,
        } => commands::score::execute(answers, dataset, config, format, output).await,
        Commands::Validate { dataset, config } => {
            commands::validate::execute(dataset, config).await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
