mod common;

use roster::menu::Menu;
use roster::roster::RosterStore;

async fn run_script(store: RosterStore, script: &str) -> String {
    let mut menu = Menu::new(store, script.as_bytes(), Vec::new());
    menu.run().await.expect("menu run");
    String::from_utf8(menu.into_output()).expect("utf8 output")
}

#[tokio::test]
async fn display_lists_characters_and_notes_malformed_lines() {
    let (_tmp, store) = common::store_with(common::PARTY);
    let out = run_script(store, "1\n0\n").await;
    assert!(out.contains("=== All Characters ==="));
    assert!(out.contains("Name: Ada\nProfession: Wizard\nLevel: 3\nHP: 15\nEquipment:\n - staff\n - tome\n"));
    assert!(out.contains("Name: Cy"));
    assert_eq!(out.matches("Skipping malformed line.").count(), 1);
    assert!(out.ends_with("Goodbye! Thanks for playing.\n"));
}

#[tokio::test]
async fn display_reports_missing_and_empty_stores() {
    let (_tmp, store) = common::missing_store();
    let out = run_script(store, "1\n0\n").await;
    assert!(out.contains("Data file not found."));

    let (_tmp, store) = common::store_with("");
    let out = run_script(store, "1\n0\n").await;
    assert!(out.contains("No characters found."));
}

#[tokio::test]
async fn add_reprompts_until_numbers_parse() {
    let (_tmp, store) = common::missing_store();
    let check = store.clone();
    let out = run_script(
        store,
        "2\n  Dee  \nBard\nten\n10\n\nforty\n40\nlute | | cloak\n0\n",
    )
    .await;
    assert_eq!(out.matches("Invalid level. Please enter a number.").count(), 1);
    assert_eq!(out.matches("Invalid HP. Please enter a number.").count(), 2);
    assert!(out.contains("Character added."));
    assert_eq!(common::read_store(&check), "Dee,Bard,10,40,lute|cloak\n");
}

#[tokio::test]
async fn add_with_closed_input_writes_nothing() {
    let (_tmp, store) = common::missing_store();
    let check = store.clone();
    let out = run_script(store, "2\nDee\nBard\n").await;
    assert!(!out.contains("Character added."));
    assert!(!check.path().exists());
}

#[tokio::test]
async fn level_up_uses_listing_numbers() {
    let (_tmp, store) = common::store_with(common::PARTY);
    let check = store.clone();
    let out = run_script(store, "3\n2\n0\n").await;
    assert!(out.contains("Character List: \n1. Ada: Level 3\n2. Bo: Level 4\n3. Cy: Level 1\n"));
    assert!(out.contains("Leveled up Bo to Level 5."));
    assert!(out.contains("Level: 4 -> 5"));
    assert!(out.contains("Equipment items: 2"));
    assert!(common::read_store(&check).contains("Bo,Rogue,5,9,dagger|cloak\n"));
}

#[tokio::test]
async fn level_up_rejects_bad_selections() {
    let (_tmp, store) = common::store_with(common::PARTY);
    let check = store.clone();
    let out = run_script(store, "3\nabc\n3\n0\n3\n4\n3\n-1\n0\n").await;
    assert_eq!(out.matches("Invalid input. Please enter a number.").count(), 1);
    assert_eq!(out.matches("Selection out of range.").count(), 3);
    assert_eq!(common::read_store(&check), common::PARTY);
}

#[tokio::test]
async fn level_up_reports_unparseable_level() {
    let (_tmp, store) = common::store_with("Ada,Wizard,three,15,staff\n");
    let out = run_script(store, "3\n1\n0\n").await;
    assert!(out.contains("1. Ada: Level three"));
    assert!(out.contains("Character level is not a valid number."));
}

#[tokio::test]
async fn level_up_on_store_without_records() {
    let (_tmp, store) = common::store_with("\nbroken\n");
    let out = run_script(store, "3\n0\n").await;
    assert!(out.contains("No characters found."));
    assert!(!out.contains("Character List:"));
}

#[tokio::test]
async fn unknown_choice_returns_to_menu() {
    let (_tmp, store) = common::missing_store();
    let out = run_script(store, "7\n0\n").await;
    assert!(out.contains("Invalid choice. Please try again."));
    assert_eq!(out.matches("What would you like to do?").count(), 2);
}
