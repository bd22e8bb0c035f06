use anyhow::Result;
use chrono::Utc;
use std::cell::Cell;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use streamchat_core::{ComposerEvent, EventEnvelope, runtime_dir};

pub struct Observer {
    log_path: PathBuf,
    verbose: bool,
    next_seq: Cell<u64>,
}

impl Observer {
    pub fn new(workspace: &Path) -> Result<Self> {
        let dir = runtime_dir(workspace);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            log_path: dir.join("observe.log"),
            verbose: false,
            next_seq: Cell::new(1),
        })
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Append an event line and echo it to stderr in verbose mode.
    pub fn record(&self, event: ComposerEvent) -> Result<()> {
        let seq_no = self.next_seq.get();
        self.next_seq.set(seq_no + 1);
        let envelope = EventEnvelope::new(seq_no, event);
        let payload = serde_json::to_string(&envelope)?;
        self.verbose_log(&payload);
        self.append_log_line(&format!("{} EVENT {payload}", Utc::now().to_rfc3339()))
    }

    /// Enable or disable verbose logging to stderr.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Log a message to stderr with `[streamchat]` prefix when verbose mode is on.
    pub fn verbose_log(&self, msg: &str) {
        if self.verbose {
            eprintln!("[streamchat] {msg}");
        }
    }

    /// Written to the log file and to stderr regardless of verbosity.
    pub fn warn_log(&self, msg: &str) {
        eprintln!("[streamchat WARN] {msg}");
        let _ = self.append_log_line(&format!("{} WARN {msg}", Utc::now().to_rfc3339()));
    }

    fn append_log_line(&self, line: &str) -> Result<()> {
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(f, "{line}")?;
        Ok(())
    }
}
