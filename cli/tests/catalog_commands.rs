#![allow(clippy::unwrap_used)]
#![allow(deprecated)]

use std::collections::HashMap;

use assert_cmd::Command;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

fn elves() -> Value {
    json!({"object": "card", "id": "elves", "name": "Llanowar Elves", "colors": ["G"], "set": "dom"})
}

async fn search(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    let query = params.get("q").map(String::as_str).unwrap_or("");
    if query != "llanowar elves c:g" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"object": "error", "details": format!("unexpected query {}", query)})),
        );
    }

    let body = match params.get("page").map(String::as_str) {
        Some("1") => json!({
            "object": "list",
            "has_more": true,
            "data": [
                {"object": "card", "id": "bolt", "name": "Lightning Bolt", "colors": ["R"]},
                elves()
            ]
        }),
        _ => json!({
            "object": "list",
            "has_more": false,
            "data": [
                elves(),
                {"object": "card", "id": "growth", "name": "Giant Growth", "colors": ["G"]}
            ]
        }),
    };

    (StatusCode::OK, Json(body))
}

async fn card(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    if id == "elves" {
        Ok(Json(elves()))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

/// Serves a small catalog on a background runtime and returns its base url
fn start_catalog() -> String {
    let (tx, rx) = std::sync::mpsc::channel();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async move {
            let app = Router::new()
                .route("/cards/search", get(search))
                .route("/cards/:id", get(card));
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    format!("http://{}", rx.recv().unwrap())
}

struct TestEnv {
    temp_dir: TempDir,
}

impl TestEnv {
    /// Isolated directories plus a profile pointing at a local catalog
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let profile_dir = temp_dir.path().join("config").join("cardbase").join("profiles");
        std::fs::create_dir_all(&profile_dir).unwrap();
        std::fs::write(
            profile_dir.join("test.toml"),
            format!("catalog_url = \"{}\"\n", start_catalog()),
        )
        .unwrap();

        Self { temp_dir }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("cardbase").unwrap();
        cmd.env("XDG_CONFIG_HOME", self.temp_dir.path().join("config"));
        cmd.env("XDG_DATA_HOME", self.temp_dir.path().join("data"));
        cmd.env("CARDBASE_PROFILE", "test");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    fn json(&self, args: &[&str]) -> Value {
        let output = self.cmd().args(args).output().unwrap();
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

fn ids(cards: &Value) -> Vec<&str> {
    cards
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect()
}

#[test]
fn test_search_with_flags_after_term() {
    let env = TestEnv::new();

    let cards = env.json(&[
        "search", "llanowar", "elves", "--color", "g", "--pages", "2", "--output", "json",
    ]);

    assert_eq!(ids(&cards), vec!["elves", "growth"]);
}

#[test]
fn test_search_single_page() {
    let env = TestEnv::new();

    let cards = env.json(&["search", "--color", "g", "llanowar", "elves", "--output", "json"]);

    assert_eq!(ids(&cards), vec!["elves"]);
}

#[test]
fn test_failed_search_prints_no_cards() {
    let env = TestEnv::new();

    env.cmd()
        .args(["search", "unknown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cards found"));
}

#[test]
fn test_card_is_recorded_as_recent() {
    let env = TestEnv::new();

    env.cmd()
        .args(["card", "elves"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Llanowar Elves"));

    let recent = env.json(&["recent", "--output", "json"]);
    assert_eq!(recent[0]["id"], "elves");
    assert_eq!(recent[0]["name"], "Llanowar Elves");
}

#[test]
fn test_missing_card_fails() {
    let env = TestEnv::new();

    env.cmd()
        .args(["card", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Card not found: missing"));

    let recent = env.json(&["recent", "--output", "json"]);
    assert!(recent.as_array().unwrap().is_empty());
}

#[test]
fn test_add_card_from_catalog() {
    let env = TestEnv::new();
    env.cmd()
        .args(["collection", "create", "Elves"])
        .assert()
        .success();
    let collections = env.json(&["collection", "list", "--output", "json"]);
    let id = collections[0]["id"].as_str().unwrap().to_string();

    env.cmd()
        .args(["collection", "add", &id, "elves"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Llanowar Elves"));

    env.cmd()
        .args(["collection", "add", &id, "elves"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already in collection"));

    let collection = env.json(&["collection", "show", &id, "--output", "json"]);
    assert_eq!(ids(&collection["cards"]), vec!["elves"]);
}
