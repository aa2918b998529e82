use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SCHEMA: &str = r#"
option_groups:
  - group_id: site_group
    option_name: site
    sanitizer: trim_all
sections:
  - id: basics
    title: Basics
    description: Site-wide settings
    page: site-settings
    option_name: site
    fields:
      - id: tagline
        type: text
        name: tagline
        title: Tagline
      - id: landing
        type: dropdown_pages
        name: landing
        title: Landing page
      - id: preview
        type: callback
        callback: live_preview
  - id: extras
    title: Extras
    page: site-extras
    option_name: site
    fields:
      - id: tags
        type: checkboxes
        name: tags
        title: Tags
        choices:
          news: News
          blog: Blog
"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn settingsform() -> Command {
    let mut cmd = Command::cargo_bin("settingsform").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn validate_reports_counts() {
    let tmp = TempDir::new().unwrap();
    let schema = write(tmp.path(), "schema.yaml", SCHEMA);

    settingsform()
        .arg("validate")
        .arg(&schema)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1 option group(s), 2 section(s), 4 field(s) on 2 page(s)",
        ));
}

#[test]
fn validate_fails_on_empty_choices() {
    let tmp = TempDir::new().unwrap();
    let schema = write(
        tmp.path(),
        "schema.yaml",
        &SCHEMA.replace("          news: News\n          blog: Blog\n", "          {}\n"),
    );

    settingsform()
        .arg("validate")
        .arg(&schema)
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires at least one choice"));
}

#[test]
fn fields_as_json_filters_by_page() {
    let tmp = TempDir::new().unwrap();
    let schema = write(tmp.path(), "schema.yaml", SCHEMA);

    let output = settingsform()
        .args(["fields", "--json", "--page", "site-extras"])
        .arg(&schema)
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "tags");
    assert_eq!(rows[0]["type"], "checkboxes");
    assert_eq!(rows[0]["option"], "site");
}

#[test]
fn fields_table_lists_every_field() {
    let tmp = TempDir::new().unwrap();
    let schema = write(tmp.path(), "schema.yaml", SCHEMA);

    settingsform()
        .arg("fields")
        .arg(&schema)
        .assert()
        .success()
        .stdout(predicate::str::contains("dropdown_pages"))
        .stdout(predicate::str::contains("4 field(s)."));
}

#[test]
fn render_binds_stored_options_and_pages() {
    let tmp = TempDir::new().unwrap();
    let schema = write(tmp.path(), "schema.yaml", SCHEMA);
    let options = write(
        tmp.path(),
        "options.json",
        r#"{"site": {"tagline": "Hello & welcome", "landing": 3}}"#,
    );
    let pages = write(
        tmp.path(),
        "pages.json",
        r#"[{"id": 3, "title": "Home"}, {"id": 5, "title": "Blog", "depth": 1}]"#,
    );

    settingsform()
        .args(["render", "--page", "site-settings", "--nonce", "abc"])
        .arg("--options")
        .arg(&options)
        .arg("--pages")
        .arg(&pages)
        .arg(&schema)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            r#"<form action="options.php" method="post">"#,
        ))
        .stdout(predicate::str::contains(r#"value="Hello &amp; welcome""#))
        .stdout(predicate::str::contains(r#"value="3" selected="selected">Home"#))
        .stdout(predicate::str::contains("<!-- callback: live_preview -->"))
        .stdout(predicate::str::contains(r#"name="_nonce" value="abc""#));
}

#[test]
fn render_reads_config_directory() {
    let tmp = TempDir::new().unwrap();
    let schema = write(tmp.path(), "schema.yaml", SCHEMA);
    write(
        tmp.path(),
        "settingsform.toml",
        "form_action = \"/admin/save\"\nsubmit_label = \"Apply\"\n",
    );

    settingsform()
        .args(["render", "--page", "site-extras"])
        .arg("--config")
        .arg(tmp.path())
        .arg(&schema)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<form action="/admin/save""#))
        .stdout(predicate::str::contains(r#"value="Apply""#));
}

#[test]
fn render_unknown_page_fails() {
    let tmp = TempDir::new().unwrap();
    let schema = write(tmp.path(), "schema.yaml", SCHEMA);

    settingsform()
        .args(["render", "--page", "nowhere"])
        .arg(&schema)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No sections are registered for page 'nowhere'"));
}
