#![allow(clippy::unwrap_used)]
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated config/data directories for one test
struct TestEnv {
    temp_dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("cardbase").unwrap();

        // XDG base directories get "cardbase" appended by the CLI
        cmd.env("XDG_CONFIG_HOME", self.temp_dir.path().join("config"));
        cmd.env("XDG_DATA_HOME", self.temp_dir.path().join("data"));
        cmd.env("CARDBASE_PROFILE", "test");
        // keep log output out of stderr assertions
        cmd.env_remove("RUST_LOG");
        cmd
    }

    fn db_path(&self) -> PathBuf {
        self.temp_dir
            .path()
            .join("data")
            .join("cardbase")
            .join("profiles")
            .join("test")
            .join("cardbase.db")
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.cmd().args(args).output().unwrap();
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).unwrap()
    }

    fn create(&self, name: &str) -> String {
        self.cmd()
            .args(["collection", "create", name])
            .assert()
            .success();

        let collections = self.json(&["collection", "list", "--output", "json"]);
        collections
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["name"] == name)
            .unwrap()["id"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

#[test]
fn test_create_collection() {
    let env = TestEnv::new();

    env.cmd()
        .args(["collection", "create", "Standard", "Deck"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created collection Standard Deck"));

    let collections = env.json(&["collection", "list", "--output", "json"]);
    let collections = collections.as_array().unwrap();
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0]["name"], "Standard Deck");
    assert_eq!(collections[0]["isFavorite"], false);
    assert_eq!(collections[0]["cards"].as_array().unwrap().len(), 0);

    let activity = env.json(&["activity", "--output", "json"]);
    assert_eq!(activity[0]["type"], "add");
    assert_eq!(activity[0]["collectionName"], "Standard Deck");

    assert!(env.db_path().exists());
}

#[test]
fn test_blank_collection_name_fails() {
    let env = TestEnv::new();

    env.cmd()
        .args(["collection", "create", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));

    let collections = env.json(&["collection", "list", "--output", "json"]);
    assert!(collections.as_array().unwrap().is_empty());

    let activity = env.json(&["activity", "--output", "json"]);
    assert!(activity.as_array().unwrap().is_empty());
}

#[test]
fn test_delete_collection() {
    let env = TestEnv::new();
    let id = env.create("Commander");

    env.cmd()
        .args(["collection", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted collection Commander"));

    let collections = env.json(&["collection", "list", "--output", "json"]);
    assert!(collections.as_array().unwrap().is_empty());

    let activity = env.json(&["activity", "--output", "json"]);
    assert_eq!(activity[0]["type"], "remove");
    assert_eq!(activity[0]["collectionName"], "Commander");
}

#[test]
fn test_delete_nonexistent_collection_succeeds() {
    let env = TestEnv::new();
    env.create("Keep me");

    env.cmd()
        .args(["collection", "delete", "nonexistent_id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No collection with id nonexistent_id"));

    let collections = env.json(&["collection", "list", "--output", "json"]);
    assert_eq!(collections.as_array().unwrap().len(), 1);
}

#[test]
fn test_favorite_toggle_and_filter() {
    let env = TestEnv::new();
    let id = env.create("Pauper");
    env.create("Modern");

    env.cmd()
        .args(["collection", "favorite", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added"));

    let favorites = env.json(&["collection", "list", "--favorites", "--output", "json"]);
    let favorites = favorites.as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["name"], "Pauper");

    env.cmd()
        .args(["collection", "favorite", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));
}

#[test]
fn test_show_records_view() {
    let env = TestEnv::new();
    let id = env.create("Elves");

    env.cmd()
        .args(["collection", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cards in this collection."));

    let activity = env.json(&["activity", "--output", "json"]);
    assert_eq!(activity[0]["type"], "view");
    assert_eq!(activity.as_array().unwrap().len(), 2);
}

#[test]
fn test_show_unknown_collection_fails() {
    let env = TestEnv::new();

    env.cmd()
        .args(["collection", "show", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No collection with id missing"));
}

#[test]
fn test_remove_card_not_in_collection() {
    let env = TestEnv::new();
    let id = env.create("Burn");

    env.cmd()
        .args(["collection", "remove", &id, "bolt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is not in collection"));
}

#[test]
fn test_add_card_to_unknown_collection_fails_before_lookup() {
    let env = TestEnv::new();

    env.cmd()
        .args(["collection", "add", "missing", "some-card"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No collection with id missing"));
}

#[test]
fn test_activity_is_capped() {
    let env = TestEnv::new();
    let id = env.create("Busy");

    for _ in 0..12 {
        env.cmd().args(["collection", "favorite", &id]).assert().success();
    }

    let activity = env.json(&["activity", "--output", "json"]);
    let activity = activity.as_array().unwrap();
    assert_eq!(activity.len(), 10);
    assert!(activity.iter().all(|a| a["type"] == "favorite"));
}

#[test]
fn test_recent_cards_empty() {
    let env = TestEnv::new();

    env.cmd()
        .arg("recent")
        .assert()
        .success()
        .stdout(predicate::str::contains("No recently viewed cards"));
}

#[test]
fn test_theme_round_trip() {
    let env = TestEnv::new();

    env.cmd()
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("auto"));

    env.cmd()
        .args(["theme", "dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));

    env.cmd()
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));

    env.cmd().args(["theme", "sepia"]).assert().failure();
}

#[test]
fn test_config_output() {
    let env = TestEnv::new();
    env.create("Anything");

    let config = env.json(&["config"]);

    assert_eq!(config["profile_name"], "test");
    assert_eq!(config["catalog_url"], "https://api.scryfall.com");
    assert_eq!(config["profile_exists"], false);
    let keys: Vec<_> = config["stored_keys"].as_array().unwrap().iter().collect();
    assert!(keys.iter().any(|k| *k == "collections"));
    assert!(keys.iter().any(|k| *k == "recentActivity"));
}

#[test]
fn test_init_writes_profile() {
    let env = TestEnv::new();

    env.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile written"));

    let config = env.json(&["config"]);
    assert_eq!(config["profile_exists"], true);

    env.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_profile_arg_overrides_env() {
    let env = TestEnv::new();

    let output = env
        .cmd()
        .args(["--profile", "other", "config"])
        .output()
        .unwrap();
    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(config["profile_name"], "other");
}
