use anyhow::Result;
use chrono::Local;
use std::path::Path;
use streamchat_core::AppConfig;
use streamchat_observe::Observer;
use streamchat_ui::{ChatSession, KeyBindings, TuiTheme, load_keybindings, run_composer};

use crate::TuiArgs;

pub(crate) fn run_tui(cwd: &Path, args: TuiArgs, verbose: bool) -> Result<()> {
    let mut cfg = AppConfig::ensure(cwd)?;
    cfg.roster.extend(args.users);

    let mut observer = Observer::new(cwd)?;
    observer.set_verbose(verbose);

    let bindings = match cfg.keybindings_path() {
        Some(path) if path.exists() => load_keybindings(&path).unwrap_or_else(|err| {
            observer.warn_log(&format!(
                "ignoring keybindings at {}: {err}",
                path.display()
            ));
            KeyBindings::default()
        }),
        _ => KeyBindings::default(),
    };
    let theme = TuiTheme::from_config(&cfg.theme);

    let (session, rejected) = ChatSession::from_config(&cfg);
    for err in rejected {
        observer.warn_log(&format!("skipped candidate: {err}"));
    }
    observer.verbose_log(&format!(
        "composer ready with {} candidates, policy {}",
        session.snapshot().len(),
        cfg.autocomplete.trigger_policy.as_str()
    ));
    let mut session = session.with_observer(observer);

    run_composer(
        &mut session,
        &bindings,
        &theme,
        cfg.ui.mouse_capture,
        |text| Ok(format!("{} you: {text}", Local::now().format("%H:%M"))),
    )
}
