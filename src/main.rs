//! Codetweak - LLM-Powered Code Assistant
//!
//! Forwards a selection of source text to a remote completion API and
//! either rewrites the selection in place or answers about it.

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use codetweak::actions::Action;
use codetweak::config::{config_path, Config};
use codetweak::core::openai::OpenAiClient;
use codetweak::error::{TweakError, TweakResult};
use codetweak::executor::{self, RunOutcome};
use codetweak::selection::Selection;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Where the selection comes from
#[derive(ClapArgs, Debug)]
struct SelectionArgs {
    /// Read the selection from this file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// 1-based inclusive line range within --file, e.g. "4-10" or "7"
    #[arg(short, long, requires = "file")]
    lines: Option<String>,

    /// Language identifier override (e.g. rust, python)
    #[arg(long)]
    lang: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite the selection as optimized code
    Optimize(SelectionArgs),

    /// Add a comment to each line of the selection
    Document(SelectionArgs),

    /// Explain what the selection does in plain English
    Analyze(SelectionArgs),

    /// Refactor the selection into concise, DRY code
    Dry(SelectionArgs),

    /// Ask a free-form question about the selection
    Inquire {
        /// The question to ask
        question: Option<String>,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// List the available actions
    Actions,
}

/// Parse "4-10" or "7" into a 1-based inclusive range
fn parse_lines(spec: &str) -> TweakResult<(usize, usize)> {
    let parse = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|_| TweakError::Selection(format!("Invalid line range: '{spec}'")))
    };

    match spec.split_once('-') {
        Some((start, end)) => Ok((parse(start)?, parse(end)?)),
        None => {
            let line = parse(spec)?;
            Ok((line, line))
        }
    }
}

fn build_selection(args: &SelectionArgs) -> TweakResult<Selection> {
    match &args.file {
        Some(path) => {
            let lines = args.lines.as_deref().map(parse_lines).transpose()?;
            Selection::from_file(path, lines, args.lang.as_deref())
        }
        None => Selection::from_stdin(args.lang.as_deref()),
    }
}

fn print_actions() {
    println!("Available actions:");
    for action in Action::ALL {
        println!("  {:<10} {}", action.name(), action.description());
    }
}

async fn run(cli: Cli) -> TweakResult<()> {
    let (action, selection_args, question) = match &cli.command {
        Command::Optimize(args) => (Action::Optimize, args, None),
        Command::Document(args) => (Action::Document, args, None),
        Command::Analyze(args) => (Action::Analyze, args, None),
        Command::Dry(args) => (Action::Dry, args, None),
        Command::Inquire {
            question,
            selection,
        } => (Action::Inquire, selection, question.as_deref()),
        Command::Actions => {
            print_actions();
            return Ok(());
        }
    };

    let config = Config::load()?;
    let selection = build_selection(selection_args)?;
    let client = OpenAiClient::new(&config);

    info!("🛠️ Running '{}'...", action.name());

    let outcome = executor::run(action, &selection, question, &config, &client).await?;

    match outcome {
        RunOutcome::Edited(replacement) => selection.replace_with(&replacement)?,
        RunOutcome::Message(message) => println!("{message}"),
        // Abandoned invocations already logged why; they are not failures
        RunOutcome::NoSelection | RunOutcome::NoQuestion => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Err(e) = run(cli).await {
        match e {
            TweakError::MissingApiKey => {
                error!(
                    "Please configure the API key in {} or set OPENAI_API_KEY.",
                    config_path().display()
                );
            }
            e => error!("Error generating completion: {}", e),
        }
        std::process::exit(1);
    }

    Ok(())
}
