//! # Interactive menu
//!
//! The console front end over [`RosterStore`]. It owns every prompt and every
//! retry loop; the store only ever sees validated values.
//!
//! [`Menu`] is generic over its input and output so a whole session can be
//! driven from a byte slice:
//!
//! ```rust,no_run
//! use roster::menu::Menu;
//! use roster::roster::RosterStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let script: &[u8] = b"1\n0\n";
//!     let mut menu = Menu::new(RosterStore::new("input.csv"), script, Vec::new());
//!     menu.run().await?;
//!     print!("{}", String::from_utf8_lossy(&menu.into_output()));
//!     Ok(())
//! }
//! ```
//!
//! End of input is treated like choosing `0`.

pub mod render;

use anyhow::Result;
use log::{debug, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::roster::{Record, RosterStore};
use crate::validation::{normalize_text, parse_whole_number, stray_delimiter, stray_field_separator};

/// Whether the session should keep going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Menu<R, W> {
    store: RosterStore,
    input: R,
    output: W,
    pause_after_action: bool,
}

impl<R, W> Menu<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(store: RosterStore, input: R, output: W) -> Self {
        Menu {
            store,
            input,
            output,
            pause_after_action: false,
        }
    }

    pub fn with_pause(mut self, pause_after_action: bool) -> Self {
        self.pause_after_action = pause_after_action;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu loop until the user exits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        self.say(&render::banner()).await?;
        loop {
            self.say(&render::main_menu()).await?;
            let Some(choice) = self.prompt("\nEnter your choice: ").await? else {
                debug!("input closed at main menu");
                break;
            };
            let flow = match choice.as_str() {
                "1" => self.display_all().await?,
                "2" => self.add_character().await?,
                "3" => self.level_up().await?,
                "0" => {
                    self.say("\nGoodbye! Thanks for playing.\n").await?;
                    break;
                }
                _ => {
                    self.say("\nInvalid choice. Please try again.\n").await?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit || self.pause().await? == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Menu option 1.
    pub async fn display_all(&mut self) -> Result<Flow> {
        self.say("\n=== All Characters ===\n\n").await?;
        match self.store.list().await {
            Ok(roster) => self.say(&render::listing(&roster)).await?,
            Err(e) => self.report(&e).await?,
        }
        Ok(Flow::Continue)
    }

    /// Menu option 2.
    pub async fn add_character(&mut self) -> Result<Flow> {
        self.say("\n=== Add New Character ===\n\n").await?;

        let Some(name) = self.prompt("Enter character name: ").await? else {
            return Ok(Flow::Exit);
        };
        let Some(profession) = self.prompt("Enter character class: ").await? else {
            return Ok(Flow::Exit);
        };
        let Some(level) = self
            .prompt_number(
                "Enter character level (number): ",
                "level",
                "Invalid level. Please enter a number.\n",
            )
            .await?
        else {
            return Ok(Flow::Exit);
        };
        let Some(hp) = self
            .prompt_number(
                "Enter character HP (number): ",
                "hp",
                "Invalid HP. Please enter a number.\n",
            )
            .await?
        else {
            return Ok(Flow::Exit);
        };
        let Some(equipment) = self
            .prompt("Enter character equipment (separate items with '|'): ")
            .await?
        else {
            return Ok(Flow::Exit);
        };

        for (field, value) in [("name", &name), ("class", &profession)] {
            if let Some(c) = stray_delimiter(value) {
                warn!("{} contains '{}' and will not read back as entered", field, c);
            }
        }
        if stray_field_separator(&equipment).is_some() {
            warn!("equipment contains ',' and will not read back as entered");
        }

        let record = Record::new(name, profession, level, hp, equipment.split('|'));
        match self.store.append(&record).await {
            Ok(()) => self.say("Character added.\n").await?,
            Err(e) => self.report(&e).await?,
        }
        Ok(Flow::Continue)
    }

    /// Menu option 3.
    pub async fn level_up(&mut self) -> Result<Flow> {
        self.say("\n=== Level Up Character ===\n\n").await?;

        let roster = match self.store.list().await {
            Ok(roster) if roster.is_empty() => {
                self.say("No characters found.\n").await?;
                return Ok(Flow::Continue);
            }
            Ok(roster) => roster,
            Err(e) => {
                self.report(&e).await?;
                return Ok(Flow::Continue);
            }
        };
        self.say(&render::selection_list(&roster)).await?;

        let Some(input) = self
            .prompt("\nEnter the number of the character to level up: ")
            .await?
        else {
            return Ok(Flow::Exit);
        };
        let selection = match parse_whole_number("selection", &input) {
            Ok(n) => n,
            Err(_) => {
                self.say("Invalid input. Please enter a number.\n").await?;
                return Ok(Flow::Continue);
            }
        };
        let Some(ordinal) = usize::try_from(selection)
            .ok()
            .and_then(|n| n.checked_sub(1))
        else {
            self.say("Selection out of range.\n").await?;
            return Ok(Flow::Continue);
        };

        match self.store.increment_selection(ordinal).await {
            Ok(up) => self.say(&render::level_up_summary(&up)).await?,
            Err(e) => self.report(&e).await?,
        }
        Ok(Flow::Continue)
    }

    async fn pause(&mut self) -> Result<Flow> {
        if !self.pause_after_action {
            self.say("\n").await?;
            return Ok(Flow::Continue);
        }
        self.say("\nPress Enter to continue...").await?;
        match self.read_line().await? {
            Some(_) => {
                self.say("\n").await?;
                Ok(Flow::Continue)
            }
            None => Ok(Flow::Exit),
        }
    }

    /// Re-prompt until the answer parses as an integer. `None` on end of input.
    async fn prompt_number(
        &mut self,
        label: &str,
        field: &'static str,
        invalid: &str,
    ) -> Result<Option<i32>> {
        loop {
            let Some(answer) = self.prompt(label).await? else {
                return Ok(None);
            };
            match parse_whole_number(field, &answer) {
                Ok(n) => return Ok(Some(n)),
                Err(e) => {
                    debug!("rejected input: {}", e);
                    self.say(invalid).await?;
                }
            }
        }
    }

    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        self.say(label).await?;
        Ok(self.read_line().await?.map(|line| normalize_text(&line)))
    }

    async fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        let n = self.input.read_line(&mut buf).await?;
        Ok((n > 0).then_some(buf))
    }

    async fn report(&mut self, err: &crate::roster::RosterError) -> Result<()> {
        if err.is_notice() {
            debug!("{}", err);
        } else {
            warn!("{}", err);
        }
        let text = render::error_message(err);
        self.say(&format!("{}\n", text)).await
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    #[tokio::test]
    async fn end_of_input_leaves_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path().join("input.csv"));
        let input = tokio_test::io::Builder::new().read(b"9\n").build();
        let mut menu = Menu::new(store, BufReader::new(input), Vec::new());
        menu.run().await.unwrap();
        let out = String::from_utf8(menu.into_output()).unwrap();
        assert!(out.contains("Invalid choice. Please try again."));
        assert!(!out.contains("Goodbye"));
    }

    #[tokio::test]
    async fn pause_waits_for_enter() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path().join("input.csv"));
        let input: &[u8] = b"1\n\n0\n";
        let mut menu = Menu::new(store, input, Vec::new()).with_pause(true);
        menu.run().await.unwrap();
        let out = String::from_utf8(menu.into_output()).unwrap();
        assert!(out.contains("Data file not found."));
        assert!(out.contains("Press Enter to continue..."));
        assert!(out.contains("Goodbye! Thanks for playing."));
    }
}
