//! File-backed roster store.
//!
//! The file is the source of truth: every operation re-reads it, and every
//! level change rewrites it whole through a temp file and a rename. Appends and
//! level changes hold an exclusive lock on a sibling `.<name>.lock` file.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use log::{debug, info, warn};
use tokio::fs;

use super::errors::{RosterError, RosterResult};
use super::record::{Record, RecordLine};
use crate::config::StoreConfig;
use crate::logutil::preview_line;

/// Handle on a roster file. Cheap to clone; holds no open descriptors.
#[derive(Debug, Clone)]
pub struct RosterStore {
    path: PathBuf,
}

/// A listed character and the raw line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub line_index: usize,
    pub record: Record,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    Malformed { found: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_index: usize,
    pub reason: SkipReason,
}

/// The selectable view of a store: parseable lines in file order, plus the
/// raw lines that were passed over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub entries: Vec<RosterEntry>,
    pub skipped: Vec<SkippedLine>,
}

impl Roster {
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut roster = Roster::default();
        for (line_index, line) in lines.iter().enumerate() {
            let line: &str = line.as_ref();
            if line.trim().is_empty() {
                roster.skipped.push(SkippedLine {
                    line_index,
                    reason: SkipReason::Blank,
                });
                continue;
            }
            match Record::parse(line) {
                Ok(record) => roster.entries.push(RosterEntry { line_index, record }),
                Err(RosterError::Malformed { found }) => {
                    warn!(
                        "skipping malformed line {}: {}",
                        line_index + 1,
                        preview_line(line)
                    );
                    roster.skipped.push(SkippedLine {
                        line_index,
                        reason: SkipReason::Malformed { found },
                    });
                }
                // Parsing only ever reports Malformed.
                Err(e) => warn!("skipping line {}: {}", line_index + 1, e),
            }
        }
        roster
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a 0-based ordinal of this listing to the raw line index.
    pub fn line_index_of(&self, ordinal: usize) -> RosterResult<usize> {
        self.entries
            .get(ordinal)
            .map(|entry| entry.line_index)
            .ok_or(RosterError::OutOfRange {
                index: ordinal,
                len: self.entries.len(),
            })
    }
}

/// Outcome of a successful level increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    pub line_index: usize,
    pub old_level: i32,
    pub new_level: i32,
    pub record: Record,
}

impl LevelUp {
    pub fn equipment_count(&self) -> usize {
        self.record.equipment.len()
    }
}

impl RosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RosterStore { path: path.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every raw line. `None` means the file does not exist.
    ///
    /// See [`split_store_lines`] for how the text is cut into lines.
    pub async fn load_all(&self) -> RosterResult<Option<Vec<String>>> {
        match fs::read_to_string(&self.path).await {
            Ok(data) => {
                let lines = split_store_lines(&data);
                debug!("loaded {} lines from {}", lines.len(), self.path.display());
                Ok(Some(lines))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("store {} does not exist", self.path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Raw lines, with "missing" and "empty" turned into their notices.
    async fn require_lines(&self) -> RosterResult<Vec<String>> {
        match self.load_all().await? {
            None => Err(RosterError::StoreNotFound(self.path.clone())),
            Some(lines) if lines.is_empty() => Err(RosterError::EmptyStore),
            Some(lines) => Ok(lines),
        }
    }

    /// Load the selectable listing.
    pub async fn list(&self) -> RosterResult<Roster> {
        let lines = self.require_lines().await?;
        Ok(Roster::from_lines(&lines))
    }

    /// Append one record as a new line, creating the file if needed.
    pub async fn append(&self, record: &Record) -> RosterResult<()> {
        let line = record.format();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let lock = lock_store(&self.path)?;
        append_line(&self.path, &line)?;
        drop(lock);
        debug!("appended {} to {}", preview_line(&line), self.path.display());
        Ok(())
    }

    /// Raise the level of the record on raw line `index` (0-based) by one and
    /// persist the whole store. On any error the file is left untouched.
    pub async fn increment_level(&self, index: usize) -> RosterResult<LevelUp> {
        let lock = self.lock_existing()?;
        let mut lines = self.require_lines().await?;
        let level_up = raise_level_at(&mut lines, index)?;
        replace_lines(&self.path, &lines)?;
        drop(lock);
        info!(
            "leveled up {} (line {}) from {} to {}",
            level_up.record.name,
            index + 1,
            level_up.old_level,
            level_up.new_level
        );
        Ok(level_up)
    }

    /// Raise the level of the `ordinal`-th (0-based) entry of [`RosterStore::list`].
    ///
    /// The listing and the target are resolved from the same read, so skipped
    /// lines never shift which record is changed.
    pub async fn increment_selection(&self, ordinal: usize) -> RosterResult<LevelUp> {
        let lock = self.lock_existing()?;
        let mut lines = self.require_lines().await?;
        let index = Roster::from_lines(&lines).line_index_of(ordinal)?;
        let level_up = raise_level_at(&mut lines, index)?;
        replace_lines(&self.path, &lines)?;
        drop(lock);
        info!(
            "leveled up {} (entry {}, line {}) from {} to {}",
            level_up.record.name,
            ordinal + 1,
            index + 1,
            level_up.old_level,
            level_up.new_level
        );
        Ok(level_up)
    }

    /// Store lock for a read-modify-write. A missing directory means a missing store.
    fn lock_existing(&self) -> RosterResult<File> {
        match lock_store(&self.path) {
            Err(RosterError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                Err(RosterError::StoreNotFound(self.path.clone()))
            }
            other => other,
        }
    }
}

/// Cut store text into raw lines.
///
/// A leading UTF-8 byte order mark is dropped. `\r\n`, `\n` and a lone `\r` all
/// end a line, and a final terminator does not produce a trailing empty line.
pub fn split_store_lines(data: &str) -> Vec<String> {
    let data = data.strip_prefix('\u{feff}').unwrap_or(data);
    let mut lines = Vec::new();
    let mut rest = data;
    while !rest.is_empty() {
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(end) => {
                lines.push(rest[..end].to_string());
                let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + skip..];
            }
            None => {
                lines.push(rest.to_string());
                rest = "";
            }
        }
    }
    lines
}

/// Path of the sibling lock file, `.<name>.lock`.
fn lock_path(path: &Path) -> PathBuf {
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("roster.csv");
    path.with_file_name(format!(".{}.lock", base))
}

/// Take the exclusive store lock; released when the returned file is dropped.
///
/// The lock lives on a sibling file rather than the store itself, because a
/// rewrite renames a new inode over the store. It is left on disk afterwards.
fn lock_store(path: &Path) -> RosterResult<File> {
    let lock_file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .open(lock_path(path))?;
    lock_file.lock_exclusive()?;
    Ok(lock_file)
}

/// Apply the increment to `lines[index]` in memory.
fn raise_level_at(lines: &mut [String], index: usize) -> RosterResult<LevelUp> {
    let len = lines.len();
    let line = lines
        .get_mut(index)
        .ok_or(RosterError::OutOfRange { index, len })?;
    let mut fields = RecordLine::split(line)?;
    let old_level = fields.level()?;
    let new_level = old_level
        .checked_add(1)
        .ok_or(RosterError::LevelOverflow(old_level))?;
    fields.set_level(new_level);
    *line = fields.join();
    Ok(LevelUp {
        line_index: index,
        old_level,
        new_level,
        record: fields.record(),
    })
}

/// Replace the file with `lines`, each terminated by `\n`. Callers hold the
/// store lock.
///
/// Content goes to a sibling temp file first and is renamed over the target,
/// so readers see the old or the new file.
fn replace_lines(path: &Path, lines: &[String]) -> RosterResult<()> {
    let mut content = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("roster.csv");
    let mut counter = 0u32;
    let tmp_path = loop {
        let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(mut tmp) => {
                let written = tmp
                    .write_all(content.as_bytes())
                    .and_then(|_| tmp.flush());
                if let Err(e) = written {
                    let _ = std::fs::remove_file(&candidate);
                    return Err(e.into());
                }
                let _ = tmp.sync_all();
                break candidate;
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(e) => return Err(e.into()),
        }
    };

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    if let Ok(dir_file) = File::open(dir) {
        let _ = dir_file.sync_all();
    }
    debug!("rewrote {} ({} lines)", path.display(), lines.len());
    Ok(())
}

/// Append `line` plus `\n`. Callers hold the store lock. If the file's last
/// byte is not a newline, one is written first so the new line stands on its own.
fn append_line(path: &Path, line: &str) -> RosterResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)?;

    let mut entry = String::with_capacity(line.len() + 2);
    let len = file.metadata()?.len();
    if len > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::Start(len - 1))?;
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            entry.push('\n');
        }
    }
    entry.push_str(line);
    entry.push('\n');

    file.write_all(entry.as_bytes())?;
    file.flush()?;
    let _ = file.sync_all();
    drop(file);
    Ok(())
}
