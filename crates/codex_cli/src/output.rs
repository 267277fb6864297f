//! Human-readable and JSON rendering of command results.

use anyhow::Result;
use codex_core::{Atom, RelatedContent, Text};
use serde::Serialize;

pub fn print_related(related: &RelatedContent, json: bool) -> Result<()> {
    if json {
        return print_json(related);
    }

    println!("Related notes:");
    if related.notes.is_empty() {
        println!("  (none)");
    }
    for suggestion in &related.notes {
        println!(
            "  {:>5.1}  {}  [{}]  {}",
            suggestion.score,
            suggestion.candidate.uuid,
            suggestion.candidate.kind.as_str(),
            suggestion.candidate.title
        );
        println!("         {}", suggestion.reason());
    }

    println!("Related texts:");
    if related.texts.is_empty() {
        println!("  (none)");
    }
    for suggestion in &related.texts {
        println!(
            "  {:>5.1}  {}  {} ({})",
            suggestion.score,
            suggestion.candidate.uuid,
            suggestion.candidate.title,
            suggestion.candidate.author
        );
        println!("         {}", suggestion.reason());
    }
    Ok(())
}

pub fn print_atoms(atoms: &[Atom], json: bool) -> Result<()> {
    if json {
        return print_json(&atoms);
    }
    for atom in atoms {
        let hidden = if atom.is_hidden { " hidden" } else { "" };
        println!(
            "{}  [{}] {}{}  {}",
            atom.uuid,
            atom.kind.as_str(),
            atom.status.as_str(),
            hidden,
            atom.title
        );
    }
    Ok(())
}

pub fn print_texts(texts: &[Text], json: bool) -> Result<()> {
    if json {
        return print_json(&texts);
    }
    for text in texts {
        let archived = if text.is_archived { " (archived)" } else { "" };
        println!(
            "{}  [{}] {} by {}{}",
            text.uuid,
            text.kind.as_str(),
            text.title,
            text.author,
            archived
        );
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
