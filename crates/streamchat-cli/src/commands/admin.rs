use anyhow::Result;
use clap::CommandFactory;
use clap_complete::generate;
use std::io;
use std::path::Path;
use streamchat_core::AppConfig;

use crate::output::*;
use crate::{Cli, CompletionsArgs, ConfigCmd};

pub(crate) fn run_config(cwd: &Path, cmd: ConfigCmd, json_mode: bool) -> Result<()> {
    let cfg = AppConfig::ensure(cwd)?;
    match cmd {
        ConfigCmd::Show => {
            if json_mode {
                print_json(&cfg)?;
            } else {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            }
        }
    }
    Ok(())
}

pub(crate) fn run_completions(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "streamchat", &mut io::stdout());
    Ok(())
}
