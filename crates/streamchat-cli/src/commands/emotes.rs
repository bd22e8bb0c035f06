use anyhow::{Result, anyhow};
use serde_json::json;
use std::path::Path;
use streamchat_core::{AppConfig, Candidate};

use crate::EmotesCmd;
use crate::output::*;

pub(crate) fn run_emotes(cwd: &Path, cmd: EmotesCmd, json_mode: bool) -> Result<()> {
    let cfg = AppConfig::ensure(cwd)?;
    match cmd {
        EmotesCmd::List => {
            let mut emotes = Vec::new();
            for (alias, uri) in &cfg.emotes {
                emotes.push(Candidate::emote(alias, uri)?);
            }
            emotes.sort_by_key(|e| e.display_text().to_lowercase());
            if json_mode {
                print_json(&emotes)?;
            } else if emotes.is_empty() {
                println!("no custom emotes");
            } else {
                print_candidate_rows(&emotes);
            }
        }
        EmotesCmd::Add(args) => {
            let emote = Candidate::emote(&args.alias, &args.uri)?;
            let key = emote.text().trim_matches(':').to_string();
            let mut emotes = AppConfig::project_emotes(cwd)?;
            let replaced = emotes.insert(key, args.uri.clone()).is_some();
            AppConfig::save_project_emotes(cwd, &emotes)?;
            if json_mode {
                print_json(&json!({"added": emote, "replaced": replaced}))?;
            } else {
                println!("added {} -> {}", emote.text(), emote.preview());
            }
        }
        EmotesCmd::Drop(args) => {
            let probe = Candidate::emote(&args.alias, "")?;
            let key = probe.text().trim_matches(':');
            let mut emotes = AppConfig::project_emotes(cwd)?;
            if emotes.remove(key).is_none() {
                return Err(anyhow!(
                    "no custom emote named {} in project settings",
                    probe.text()
                ));
            }
            AppConfig::save_project_emotes(cwd, &emotes)?;
            if json_mode {
                print_json(&json!({"dropped": probe.text()}))?;
            } else {
                println!("dropped {}", probe.text());
            }
        }
    }
    Ok(())
}
