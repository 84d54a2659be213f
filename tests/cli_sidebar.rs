use std::path::Path;

use predicates::prelude::*;

const TOC: &str = r#"
title: Handbook
chapters:
  - title: Intro
    path: /intro
    chapters:
      - title: Setup
        path: /intro/setup
  - title: Reference
    chapters:
      - title: API
        path: /api
"#;

fn write_toc(dir: &Path) -> anyhow::Result<String> {
    let path = dir.join("toc.yaml");
    std::fs::write(&path, TOC)?;
    Ok(path.display().to_string())
}

fn book_sidebar() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("book-sidebar")
}

#[test]
fn outline_restores_persisted_state() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let toc = write_toc(dir.path())?;
    let state_dir = dir.path().join("state");
    std::fs::create_dir_all(&state_dir)?;
    std::fs::write(
        state_dir.join("book-sidebar.expanded.json"),
        r#"{"/intro": true}"#,
    )?;

    book_sidebar()
        .args(["outline", "--toc", &toc, "--state-dir"])
        .arg(&state_dir)
        .assert()
        .success()
        .stdout("[-] Intro (/intro)\n  [ ] Setup (/intro/setup)\n[+] Reference\n  [ ] API (/api)\n");

    Ok(())
}

#[test]
fn arrow_click_toggles_and_persists_snapshot() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let toc = write_toc(dir.path())?;
    let state_dir = dir.path().join("state");

    book_sidebar()
        .args(["click", "--toc", &toc, "--chapter", "/intro", "--on", "arrow"])
        .arg("--state-dir")
        .arg(&state_dir)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("toggled /intro expanded=true\n"));

    let saved = std::fs::read_to_string(state_dir.join("book-sidebar.expanded.json"))?;
    let saved: serde_json::Value = serde_json::from_str(&saved)?;
    assert_eq!(
        saved,
        serde_json::json!({"/intro": true, "title:Reference": false})
    );

    book_sidebar()
        .args(["outline", "--toc", &toc])
        .arg("--state-dir")
        .arg(&state_dir)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[-] Intro (/intro)\n"));

    Ok(())
}

#[test]
fn link_body_click_navigates_without_writing_state() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let toc = write_toc(dir.path())?;
    let state_dir = dir.path().join("state");

    book_sidebar()
        .args(["click", "--toc", &toc, "--chapter", "/intro", "--offset-x", "25"])
        .arg("--state-dir")
        .arg(&state_dir)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("navigate /intro\n"));

    assert!(!state_dir.join("book-sidebar.expanded.json").exists());

    Ok(())
}

#[test]
fn collapsed_record_keeps_active_chapter_open() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let toc = write_toc(dir.path())?;
    let state_dir = dir.path().join("state");
    std::fs::create_dir_all(&state_dir)?;
    std::fs::write(
        state_dir.join("book-sidebar.expanded.json"),
        r#"{"title:Reference": false}"#,
    )?;

    book_sidebar()
        .args(["outline", "--toc", &toc, "--active", "/api"])
        .arg("--state-dir")
        .arg(&state_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("[-] Reference\n  [ ] API (/api) *\n"));

    Ok(())
}

#[test]
fn icon_zone_comes_from_config() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let toc = write_toc(dir.path())?;
    let config = dir.path().join("config.yaml");
    std::fs::write(&config, "icon_zone_px: 40\nstorage_key: nav\n")?;
    let state_dir = dir.path().join("state");

    book_sidebar()
        .args(["click", "--toc", &toc, "--chapter", "/intro", "--offset-x", "30"])
        .arg("--config")
        .arg(&config)
        .arg("--state-dir")
        .arg(&state_dir)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("toggled /intro expanded=true\n"));

    assert!(state_dir.join("nav.json").is_file());

    Ok(())
}

#[test]
fn unknown_chapter_fails() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let toc = write_toc(dir.path())?;

    book_sidebar()
        .args(["click", "--toc", &toc, "--chapter", "/missing"])
        .arg("--state-dir")
        .arg(dir.path().join("state"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("chapter not found in toc: /missing"));

    Ok(())
}

#[test]
fn verbose_logs_toggle_decision_to_stderr() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let toc = write_toc(dir.path())?;

    book_sidebar()
        .env_remove("RUST_LOG")
        .args(["-v", "click", "--toc", &toc, "--chapter", "title:Reference", "--on", "title"])
        .arg("--state-dir")
        .arg(dir.path().join("state"))
        .assert()
        .success()
        .stderr(predicate::str::contains("toggled chapter"));

    Ok(())
}
