// SPDX-License-Identifier: MIT OR Apache-2.0

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

fn ember_search(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ember-search"));
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("EMBER_SEARCH_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn addon_listing() -> String {
    json!({
        "addons": [
            {
                "name": "ember-websockets",
                "description": "sockets",
                "score": 8,
                "latest_version_date": "2024-05-01T00:00:00.000Z"
            },
            {
                "name": "ember-data",
                "description": "data layer",
                "score": 5,
                "latest_version_date": "2024-05-01T00:00:00.000Z"
            }
        ]
    })
    .to_string()
}

#[test]
fn name_search_prints_matching_addon_only() {
    let home = TempDir::new().expect("tempdir");
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/addons")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(addon_listing())
        .create();

    ember_search(&home)
        .args(["--registry-url", server.url().as_str(), "search", "--addon", "socket"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8 ember-websockets updated"))
        .stdout(predicate::str::contains("sockets"))
        .stdout(predicate::str::contains("ember-data").not())
        .stdout(predicate::str::contains("View next page").not());

    mock.assert();
}

#[test]
fn positional_keywords_act_as_addon_fragment() {
    let home = TempDir::new().expect("tempdir");
    let mut server = Server::new();
    server
        .mock("GET", "/api/addons")
        .with_status(200)
        .with_body(addon_listing())
        .create();

    ember_search(&home)
        .args(["--registry-url", server.url().as_str(), "s", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 ember-data"));
}

#[test]
fn unmatched_name_search_reports_no_results() {
    let home = TempDir::new().expect("tempdir");
    let mut server = Server::new();
    server
        .mock("GET", "/api/addons")
        .with_status(200)
        .with_body(addon_listing())
        .create();

    ember_search(&home)
        .args(["--registry-url", server.url().as_str(), "search", "-a", "graphql"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results matched your search."));
}

#[test]
fn missing_addon_and_code_is_a_usage_error() {
    let home = TempDir::new().expect("tempdir");
    let mut server = Server::new();
    let mock = server.mock("GET", Matcher::Any).expect(0).create();

    ember_search(&home)
        .args(["--registry-url", server.url().as_str(), "search"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("requires --addon or --code"));

    mock.assert();
}

#[test]
fn failing_status_is_reported() {
    let home = TempDir::new().expect("tempdir");
    let mut server = Server::new();
    server.mock("GET", "/api/addons").with_status(503).create();

    ember_search(&home)
        .args(["--registry-url", server.url().as_str(), "search", "socket"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[503]"));
}

#[test]
fn global_code_search_lists_occurrences() {
    let home = TempDir::new().expect("tempdir");
    let mut server = Server::new();
    let mock = server
        .mock("GET", Matcher::Regex(r"^/api/search/addons".to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "this.socketFor(url)".into()),
            Matcher::UrlEncoded("sort".into(), "usages".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({ "results": [
                { "addon": "ember-websockets", "count": 9 },
                { "addon": "ember-phoenix", "count": 1 }
            ] })
            .to_string(),
        )
        .create();

    ember_search(&home)
        .args(["--registry-url", server.url().as_str(), "search", "--code", "this.socketFor(url)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ember-websockets contains 9 occurrences"))
        .stdout(predicate::str::contains("ember-phoenix contains 1 occurrences"))
        .stdout(predicate::str::contains("For more information run:"));

    mock.assert();
}

#[test]
fn scoped_code_search_shows_first_page_when_not_interactive() {
    let home = TempDir::new().expect("tempdir");
    let mut server = Server::new();
    let results: Vec<Value> = (1..=7)
        .map(|n| {
            json!({
                "filename": format!("addon/file-{n}.js"),
                "line_number": 3,
                "lines": [
                    { "number": 2, "text": "import Service from '@ember/service';\n" },
                    { "number": 3, "text": "const socket = this.socketFor(url);\n" }
                ]
            })
        })
        .collect();
    let mock = server
        .mock("GET", Matcher::Regex(r"^/api/search/source".to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("addon".into(), "ember-websockets".into()),
            Matcher::UrlEncoded("query".into(), "socketFor".into()),
        ]))
        .with_status(200)
        .with_body(json!({ "results": results }).to_string())
        .create();

    ember_search(&home)
        .args([
            "--registry-url",
            server.url().as_str(),
            "search",
            "-a",
            "ember-websockets",
            "-c",
            "socketFor",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("ember-websockets/addon/file-5.js:3"))
        .stdout(predicate::str::contains("> 3 | const socket = this.socketFor(url);"))
        .stdout(predicate::str::contains("  2 | import Service"))
        .stdout(predicate::str::contains("addon/file-6.js").not());

    mock.assert();
}

#[test]
fn json_format_prints_all_results() {
    let home = TempDir::new().expect("tempdir");
    let mut server = Server::new();
    server
        .mock("GET", "/api/addons")
        .with_status(200)
        .with_body(addon_listing())
        .create();

    let assert = ember_search(&home)
        .args(["--registry-url", server.url().as_str(), "search", "ember", "--format", "json"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let parsed: Value = serde_json::from_str(&stdout).expect("json");
    let names: Vec<&str> = parsed
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|v| v.get("name").and_then(Value::as_str))
        .collect();
    assert_eq!(names, vec!["ember-websockets", "ember-data"]);
}

#[test]
fn config_file_sets_registry_and_page_size() {
    let home = TempDir::new().expect("tempdir");
    let mut server = Server::new();
    let addons: Vec<Value> = (0..4)
        .map(|i| json!({ "name": format!("ember-socket-{i}"), "description": "", "score": i }))
        .collect();
    server
        .mock("GET", "/api/addons")
        .with_status(200)
        .with_body(json!({ "addons": addons }).to_string())
        .create();
    std::fs::write(
        home.path().join(".embersearchrc.toml"),
        format!("registry_url = \"{}\"\naddon_page_size = 2\n", server.url()),
    )
    .expect("write config");

    ember_search(&home)
        .args(["search", "socket"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 ember-socket-3"))
        .stdout(predicate::str::contains("2 ember-socket-2"))
        .stdout(predicate::str::contains("ember-socket-1").not());
}

#[test]
fn npm_search_lists_packages_without_installing() {
    let home = TempDir::new().expect("tempdir");
    let mut server = Server::new();
    server
        .mock("GET", Matcher::Regex(r"^/v2/search".to_string()))
        .match_query(Matcher::UrlEncoded(
            "q".into(),
            "keywords:ember-addon websocket".into(),
        ))
        .with_status(200)
        .with_body(
            json!({
                "total": 1,
                "results": [{ "package": {
                    "name": "ember-websockets",
                    "version": "10.2.1",
                    "description": "EmberJS WebSockets addon",
                    "links": { "repository": "https://github.com/thoov/ember-websockets" }
                } }]
            })
            .to_string(),
        )
        .create();
    std::fs::write(
        home.path().join(".embersearchrc.toml"),
        format!("npm_registry_url = \"{}\"\n", server.url()),
    )
    .expect("write config");

    ember_search(&home)
        .args(["npm", "websocket"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ember-websockets (v10.2.1)"))
        .stdout(predicate::str::contains("EmberJS WebSockets addon"))
        .stdout(predicate::str::contains("https://github.com/thoov/ember-websockets"));
}

#[test]
fn completions_are_generated() {
    let home = TempDir::new().expect("tempdir");
    ember_search(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ember-search"));
}
