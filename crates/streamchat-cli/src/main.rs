use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

mod commands;
mod output;

use commands::admin::{run_completions, run_config};
use commands::chat::run_tui;
use commands::complete::run_complete;
use commands::emotes::run_emotes;

#[derive(Parser)]
#[command(name = "streamchat")]
#[command(about = "Chat composer with inline @mention and :emoji: completion", long_about = None)]
struct Cli {
    /// Emit machine-readable JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Log composer events to stderr as they happen.
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive composer (default).
    Tui(TuiArgs),
    /// Run one completion query against the configured index.
    Complete(CompleteArgs),
    /// Manage custom emotes.
    Emotes {
        #[command(subcommand)]
        command: EmotesCmd,
    },
    Config {
        #[command(subcommand)]
        command: ConfigCmd,
    },
    Completions(CompletionsArgs),
}

#[derive(Args, Default)]
struct TuiArgs {
    /// Extra usernames for `@` completion.
    #[arg(long = "user")]
    users: Vec<String>,
}

#[derive(Args)]
struct CompleteArgs {
    /// Buffer contents.
    #[arg(long)]
    text: String,
    /// Caret offset in characters; defaults to the end of the buffer.
    #[arg(long)]
    caret: Option<usize>,
    /// Usernames for `@` completion, in addition to the configured roster.
    #[arg(long = "user")]
    users: Vec<String>,
    /// Override the trigger policy (`sigil-only` or `permissive`).
    #[arg(long)]
    policy: Option<String>,
    /// Commit the entry at this position and print the resulting buffer.
    #[arg(long)]
    accept: Option<usize>,
}

#[derive(Subcommand)]
enum EmotesCmd {
    /// List custom emotes by alias.
    List,
    Add(EmoteAddArgs),
    Drop(EmoteDropArgs),
}

#[derive(Args)]
struct EmoteAddArgs {
    alias: String,
    uri: String,
}

#[derive(Args)]
struct EmoteDropArgs {
    alias: String,
}

#[derive(Subcommand)]
enum ConfigCmd {
    Show,
}

#[derive(Args)]
struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish, powershell, elvish).
    #[arg(long)]
    shell: Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;

    match cli.command {
        None => run_tui(&cwd, TuiArgs::default(), cli.verbose),
        Some(Commands::Tui(args)) => run_tui(&cwd, args, cli.verbose),
        Some(Commands::Complete(args)) => run_complete(&cwd, args, cli.json, cli.verbose),
        Some(Commands::Emotes { command }) => run_emotes(&cwd, command, cli.json),
        Some(Commands::Config { command }) => run_config(&cwd, command, cli.json),
        Some(Commands::Completions(args)) => run_completions(args),
    }
}
