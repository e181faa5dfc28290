//! Shared fixtures for roster integration tests.

use roster::roster::RosterStore;

/// A small party used across tests, with one blank and one malformed line mixed in.
#[allow(dead_code)]
pub const PARTY: &str = "Ada,Wizard,3,15,staff|tome\n\
                         \n\
                         Bo,Rogue,4,9,dagger|cloak\n\
                         broken line\n\
                         Cy,Cleric,1,12,\n";

/// Temp directory holding `input.csv` with `contents`. Keep the `TempDir` alive
/// for as long as the store is used.
#[allow(dead_code)]
pub fn store_with(contents: &str) -> (tempfile::TempDir, RosterStore) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("input.csv");
    std::fs::write(&path, contents).expect("write fixture");
    (tmp, RosterStore::new(path))
}

/// Temp directory with no store file in it yet.
#[allow(dead_code)]
pub fn missing_store() -> (tempfile::TempDir, RosterStore) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("input.csv");
    (tmp, RosterStore::new(path))
}

#[allow(dead_code)]
pub fn read_store(store: &RosterStore) -> String {
    std::fs::read_to_string(store.path()).expect("read store")
}

/// No temp files from an atomic rewrite may be left next to the store.
#[allow(dead_code)]
pub fn assert_no_temp_files(tmp: &tempfile::TempDir) {
    let leftovers: Vec<_> = std::fs::read_dir(tmp.path())
        .expect("read dir")
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().contains(".tmp-"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {:?}", leftovers);
}
