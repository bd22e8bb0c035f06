use anyhow::{Result, anyhow};
use serde_json::json;
use std::path::Path;
use streamchat_core::{
    AppConfig, CandidateSources, TriggerPolicy, classify, extract_span, rank, splice,
};
use streamchat_observe::Observer;

use crate::CompleteArgs;
use crate::output::*;

pub(crate) fn run_complete(
    cwd: &Path,
    args: CompleteArgs,
    json_mode: bool,
    verbose: bool,
) -> Result<()> {
    let cfg = AppConfig::load(cwd)?;
    let policy = match args.policy.as_deref() {
        Some(raw) => TriggerPolicy::parse(raw).ok_or_else(|| {
            anyhow!("unknown trigger policy: {raw} (expected sigil-only or permissive)")
        })?,
        None => cfg.autocomplete.trigger_policy,
    };

    let mut sources = if cfg.autocomplete.builtin_emoji {
        CandidateSources::with_builtins()
    } else {
        CandidateSources::empty()
    };
    for (alias, uri) in &cfg.emotes {
        sources.add_emote(alias, uri)?;
    }
    let roster: Vec<&str> = cfg
        .roster
        .iter()
        .chain(args.users.iter())
        .map(String::as_str)
        .collect();
    if let Some(err) = sources.set_roster(roster).into_iter().next() {
        return Err(err.into());
    }
    let candidates = sources.compose();

    let caret = args.caret.unwrap_or_else(|| args.text.chars().count());
    let span = extract_span(&args.text, caret);
    let trigger = classify(&span.text, policy);
    let set = trigger
        .as_ref()
        .map(|t| rank(&candidates, t, cfg.autocomplete.max_visible))
        .unwrap_or_default();

    let mut observer = Observer::new(cwd)?;
    observer.set_verbose(verbose);
    observer.verbose_log(&format!(
        "complete word={:?} policy={} matches={}",
        span.text,
        policy.as_str(),
        set.len()
    ));

    let commit = match args.accept {
        Some(index) => {
            let chosen = set
                .entries
                .get(index)
                .ok_or_else(|| anyhow!("no suggestion at position {index} ({} shown)", set.len()))?;
            let (value, caret) = splice(&args.text, &span, chosen.insertion_text());
            Some(json!({"value": value, "caret": caret}))
        }
        None => None,
    };

    if json_mode {
        print_json(&json!({
            "word": span,
            "trigger": trigger,
            "policy": policy.as_str(),
            "entries": set.entries,
            "exact": set.exact_len,
            "more_available": set.more_available,
            "commit": commit,
        }))?;
        return Ok(());
    }

    if let Some(commit) = commit {
        println!("{}", commit["value"].as_str().unwrap_or_default());
        return Ok(());
    }
    if set.is_empty() {
        println!("no suggestions for {:?}", span.text);
        return Ok(());
    }
    print_candidate_rows(&set.entries);
    if set.more_available {
        println!("...");
    }
    Ok(())
}
