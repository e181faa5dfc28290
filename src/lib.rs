//! # Roster - console manager for RPG character records
//!
//! Roster keeps a party of role-playing-game characters in a plain text file, one
//! comma-separated record per line:
//!
//! ```text
//! Name,Class,Level,HP,Item1|Item2|Item3
//! ```
//!
//! It can list the characters, append a new one, and raise a character's level by
//! one. The file is re-read for every operation and rewritten atomically on every
//! level change.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use roster::config::Config;
//! use roster::menu::Menu;
//! use roster::roster::RosterStore;
//! use tokio::io::{stdin, stdout, BufReader};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default("roster.toml").await?;
//!     let store = RosterStore::from_config(&config.store);
//!     Menu::new(store, BufReader::new(stdin()), stdout()).run().await
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`roster`] - Record codec, the file-backed store and its errors
//! - [`menu`] - Interactive console menu and text rendering
//! - [`config`] - TOML configuration
//! - [`validation`] - Pure input validation helpers
//! - [`logutil`] - Log-safe previews of raw store lines

pub mod config;
pub mod logutil;
pub mod menu;
pub mod roster;
pub mod validation;
