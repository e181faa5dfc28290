//! Text rendering for the console layer. Pure functions, no I/O.

use std::fmt::Write;

use crate::roster::{LevelUp, Record, Roster, RosterError, SkipReason};

pub const SEPARATOR: &str = "___________________________________";

pub fn banner() -> String {
    "=== Console RPG Character Manager ===\n".to_string()
}

pub fn main_menu() -> String {
    let mut out = String::new();
    out.push_str("What would you like to do?\n");
    out.push_str("1. Display All Characters\n");
    out.push_str("2. Add New Character\n");
    out.push_str("3. Level Up Character\n");
    out.push_str("0. Exit\n");
    out
}

/// One character's full block as shown by "Display All Characters".
pub fn character_block(record: &Record) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nName: {}", record.name);
    let _ = writeln!(out, "Profession: {}", record.profession);
    let _ = writeln!(out, "Level: {}", record.level);
    let _ = writeln!(out, "HP: {}", record.hp);
    out.push_str("Equipment:\n");
    for item in &record.equipment {
        let _ = writeln!(out, " - {}", item);
    }
    out.push('\n');
    out.push_str(SEPARATOR);
    out.push('\n');
    out
}

/// Every listed character in file order. Blank lines are silent; malformed
/// lines leave a note where they sat.
pub fn listing(roster: &Roster) -> String {
    let mut out = String::new();
    let mut skipped = roster.skipped.iter().peekable();
    for entry in &roster.entries {
        while let Some(skip) = skipped.next_if(|s| s.line_index < entry.line_index) {
            push_skip_note(&mut out, skip.reason);
        }
        out.push_str(&character_block(&entry.record));
    }
    for skip in skipped {
        push_skip_note(&mut out, skip.reason);
    }
    if roster.is_empty() {
        out.push_str("No characters found.\n");
    }
    out
}

fn push_skip_note(out: &mut String, reason: SkipReason) {
    if let SkipReason::Malformed { .. } = reason {
        out.push_str("Skipping malformed line.\n");
    }
}

/// Numbered selection list for "Level Up Character". Numbers are 1-based
/// ordinals of the listing, not file line numbers.
pub fn selection_list(roster: &Roster) -> String {
    let mut out = String::from("Character List: \n");
    for (ordinal, entry) in roster.entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {}: Level {}",
            ordinal + 1,
            entry.record.name,
            entry.record.level
        );
    }
    out
}

pub fn level_up_summary(up: &LevelUp) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Leveled up {} to Level {}.", up.record.name, up.new_level);
    let _ = writeln!(out, "Name: {}", up.record.name);
    let _ = writeln!(out, "Class: {}", up.record.profession);
    let _ = writeln!(out, "Level: {} -> {}", up.old_level, up.new_level);
    let _ = writeln!(out, "HP: {}", up.record.hp);
    let _ = writeln!(out, "Equipment items: {}", up.equipment_count());
    out
}

/// User-facing message for a failed or notice-only operation.
pub fn error_message(err: &RosterError) -> String {
    match err {
        RosterError::StoreNotFound(_) => "Data file not found.".to_string(),
        RosterError::EmptyStore => "No characters found.".to_string(),
        RosterError::Malformed { .. } => "Selected character data is malformed.".to_string(),
        RosterError::InvalidNumber { field: "level", .. } => {
            "Character level is not a valid number.".to_string()
        }
        RosterError::InvalidNumber { .. } => "Invalid input. Please enter a number.".to_string(),
        RosterError::OutOfRange { .. } => "Selection out of range.".to_string(),
        RosterError::LevelOverflow(_) => "Character is already at the maximum level.".to_string(),
        RosterError::Io(e) => format!("Could not access the data file: {}", e),
    }
}
