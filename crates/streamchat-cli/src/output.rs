use anyhow::Result;
use serde::Serialize;
use streamchat_core::Candidate;

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// One line per candidate: `kind  text  preview`.
pub(crate) fn print_candidate_rows<'a>(candidates: impl IntoIterator<Item = &'a Candidate>) {
    for candidate in candidates {
        println!(
            "{:<8} {:<24} {}",
            candidate.kind().label(),
            candidate.text(),
            candidate.preview()
        );
    }
}
