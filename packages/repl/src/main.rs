use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stanza_repl::{CommitMode, EditMode, ReplConfig, DEFAULT_HISTORY_SIZE};

/// Stanza - multi-line REPL that commits statements once their brackets balance
#[derive(Parser, Debug)]
#[command(name = "stanza")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory for persisted state (defaults to the platform data directory)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Commit statements only after a blank line
    #[arg(long)]
    double_newline: bool,

    /// Maximum number of history entries to keep
    #[arg(long, default_value_t = DEFAULT_HISTORY_SIZE)]
    history_size: usize,

    /// Force vi editing mode
    #[arg(long, conflicts_with = "emacs")]
    vi: bool,

    /// Force emacs editing mode
    #[arg(long)]
    emacs: bool,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("STANZA_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let Some(dir) = args.dir.or_else(ReplConfig::default_dir) else {
        eprintln!("Error: no data directory available; pass --dir");
        std::process::exit(1);
    };

    let edit_mode = if args.vi {
        Some(EditMode::Vi)
    } else if args.emacs {
        Some(EditMode::Emacs)
    } else {
        None
    };
    let commit_mode = if args.double_newline {
        CommitMode::DoubleNewline
    } else {
        CommitMode::Immediate
    };

    let config = ReplConfig::new(dir)
        .with_commit_mode(commit_mode)
        .with_history_size(args.history_size)
        .with_edit_mode(edit_mode);

    match stanza_repl::run(config) {
        Ok(reason) => tracing::debug!(?reason, "session ended"),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
