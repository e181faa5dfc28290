//! Record codec: one character per line, five comma-separated fields.
//!
//! ```text
//! Name,Class,Level,HP,Item1|Item2|Item3
//! ```
//!
//! No escaping is performed. A `,` inside a name or a `|` inside an item will
//! change how the line reads back.

use std::fmt;

use super::errors::{RosterError, RosterResult};
use crate::validation::parse_whole_number;

/// Number of top-level fields in a well-formed line.
pub const FIELD_COUNT: usize = 5;
pub const FIELD_SEPARATOR: char = ',';
pub const EQUIPMENT_SEPARATOR: char = '|';

const LEVEL_FIELD: usize = 2;
const EQUIPMENT_FIELD: usize = 4;

/// A parsed character record.
///
/// Level and HP stay textual so listing never rejects a line over a bad number;
/// [`Record::level_value`] and [`Record::hp_value`] parse on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub profession: String,
    pub level: String,
    pub hp: String,
    pub equipment: Vec<String>,
}

impl Record {
    /// Build a record from validated input. Text fields and items are trimmed,
    /// empty items dropped.
    pub fn new(
        name: impl Into<String>,
        profession: impl Into<String>,
        level: i32,
        hp: i32,
        equipment: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        Record {
            name: name.into().trim().to_string(),
            profession: profession.into().trim().to_string(),
            level: level.to_string(),
            hp: hp.to_string(),
            equipment: equipment
                .into_iter()
                .map(|item| item.as_ref().trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
        }
    }

    /// Parse one store line. Lines with fewer than five fields are `Malformed`;
    /// anything past the fifth field is ignored.
    pub fn parse(line: &str) -> RosterResult<Self> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() < FIELD_COUNT {
            return Err(RosterError::Malformed {
                found: fields.len(),
            });
        }
        Ok(Record {
            name: fields[0].trim().to_string(),
            profession: fields[1].trim().to_string(),
            level: fields[LEVEL_FIELD].trim().to_string(),
            hp: fields[3].trim().to_string(),
            equipment: split_equipment(fields[EQUIPMENT_FIELD]),
        })
    }

    /// Serialize back into the store's line form (no terminator).
    pub fn format(&self) -> String {
        self.to_string()
    }

    pub fn level_value(&self) -> RosterResult<i32> {
        parse_whole_number("level", &self.level)
    }

    pub fn hp_value(&self) -> RosterResult<i32> {
        parse_whole_number("hp", &self.hp)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.name,
            self.profession,
            self.level,
            self.hp,
            join_equipment(&self.equipment)
        )
    }
}

/// Split an equipment field on `|`, trimming items and dropping empty ones.
pub fn split_equipment(raw: &str) -> Vec<String> {
    raw.split(EQUIPMENT_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_equipment<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| item.as_ref())
        .collect::<Vec<&str>>()
        .join(&EQUIPMENT_SEPARATOR.to_string())
}

/// A stored line opened for an in-place edit.
///
/// The first five fields are trimmed; the equipment field and any extra fields
/// are otherwise kept exactly as read, so rejoining only changes what was set.
#[derive(Debug, Clone)]
pub(crate) struct RecordLine {
    fields: Vec<String>,
}

impl RecordLine {
    pub(crate) fn split(line: &str) -> RosterResult<Self> {
        let mut fields: Vec<String> = line.split(FIELD_SEPARATOR).map(str::to_string).collect();
        if fields.len() < FIELD_COUNT {
            return Err(RosterError::Malformed {
                found: fields.len(),
            });
        }
        for field in fields.iter_mut().take(FIELD_COUNT) {
            *field = field.trim().to_string();
        }
        Ok(RecordLine { fields })
    }

    pub(crate) fn level(&self) -> RosterResult<i32> {
        parse_whole_number("level", &self.fields[LEVEL_FIELD])
    }

    pub(crate) fn set_level(&mut self, level: i32) {
        self.fields[LEVEL_FIELD] = level.to_string();
    }

    pub(crate) fn record(&self) -> Record {
        Record {
            name: self.fields[0].clone(),
            profession: self.fields[1].clone(),
            level: self.fields[LEVEL_FIELD].clone(),
            hp: self.fields[3].clone(),
            equipment: split_equipment(&self.fields[EQUIPMENT_FIELD]),
        }
    }

    pub(crate) fn join(&self) -> String {
        self.fields.join(&FIELD_SEPARATOR.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_drops_trailing_empty_item() {
        let r = Record::parse("Ada,Wizard,3,15,staff|tome|").unwrap();
        assert_eq!(r.name, "Ada");
        assert_eq!(r.profession, "Wizard");
        assert_eq!(r.level_value().unwrap(), 3);
        assert_eq!(r.hp_value().unwrap(), 15);
        assert_eq!(r.equipment, vec!["staff", "tome"]);
    }

    #[test]
    fn trims_every_field() {
        let r = Record::parse("  Bo ,  Rogue ,2,9,dagger | cloak").unwrap();
        assert_eq!(r.name, "Bo");
        assert_eq!(r.profession, "Rogue");
        assert_eq!(r.level, "2");
        assert_eq!(r.hp, "9");
        assert_eq!(r.equipment, vec!["dagger", "cloak"]);
    }

    #[test]
    fn short_lines_are_malformed() {
        for line in ["", "   ", "Ada", "Ada,Wizard,3,15"] {
            match Record::parse(line) {
                Err(RosterError::Malformed { found }) => assert!(found < FIELD_COUNT),
                other => panic!("expected Malformed for {line:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_equipment_field_yields_no_items() {
        let r = Record::parse("Cy,Cleric,1,8,").unwrap();
        assert!(r.equipment.is_empty());
        let r = Record::parse("Cy,Cleric,1,8, | |").unwrap();
        assert!(r.equipment.is_empty());
    }

    #[test]
    fn non_numeric_level_still_lists() {
        let r = Record::parse("Ada,Wizard,three,15,staff").unwrap();
        assert_eq!(r.level, "three");
        assert!(matches!(
            r.level_value(),
            Err(RosterError::InvalidNumber { field: "level", .. })
        ));
    }

    #[test]
    fn format_then_parse_is_stable() {
        let cases = [
            Record::new("Ada", "Wizard", 3, 15, ["staff", "tome"]),
            Record::new("Bo", "Rogue", 0, 1, Vec::<String>::new()),
            Record::new("Dee Dee", "Bard of Lore", 12, 40, ["lute", "cloak of many colours"]),
        ];
        for record in cases {
            let back = Record::parse(&record.format()).unwrap();
            assert_eq!(back, record);
        }
    }

    #[test]
    fn format_joins_equipment_with_pipes() {
        let r = Record::new(" Ada ", "Wizard", 3, 15, [" staff", "", "tome "]);
        assert_eq!(r.format(), "Ada,Wizard,3,15,staff|tome");
    }

    #[test]
    fn record_line_keeps_equipment_and_extras_verbatim() {
        let mut line = RecordLine::split(" Ada , Wizard , 4 ,15, staff || tome ,extra ").unwrap();
        assert_eq!(line.level().unwrap(), 4);
        line.set_level(5);
        assert_eq!(line.join(), "Ada,Wizard,5,15,staff || tome,extra ");
        assert_eq!(line.record().equipment, vec!["staff", "tome"]);
    }
}
