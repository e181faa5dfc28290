//! # Roster core
//!
//! Parsing, formatting and persistence of character records. The console layer in
//! [`crate::menu`] only ever talks to [`RosterStore`].
//!
//! ```rust,no_run
//! use roster::roster::{Record, RosterStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = RosterStore::new("input.csv");
//!     store.append(&Record::new("Ada", "Wizard", 3, 15, ["staff", "tome"])).await?;
//!
//!     let listing = store.list().await?;
//!     let up = store.increment_selection(listing.len() - 1).await?;
//!     println!("{} is now level {}", up.record.name, up.new_level);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod record;
pub mod store;

pub use errors::{RosterError, RosterResult};
pub use record::Record;
pub use store::{LevelUp, Roster, RosterEntry, RosterStore, SkipReason, SkippedLine};
