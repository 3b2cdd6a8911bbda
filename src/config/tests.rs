use super::{AppConfig, StartScreen, DEFAULT_SIDEBAR_WIDTH};
use crate::toggle::SubmenuPolicy;
use clap::Parser;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let path = env::temp_dir().join(format!("wordpanel_cfg_{nanos}_{name}"));
    fs::write(&path, contents).expect("write temp file");
    path
}

#[test]
fn defaults_are_valid() {
    let mut cfg = AppConfig::parse_from(["test-app"]);
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.submenu_policy, SubmenuPolicy::Exclusive);
    assert_eq!(cfg.sidebar_width, DEFAULT_SIDEBAR_WIDTH);
    assert_eq!(cfg.start_screen, StartScreen::Words);
    assert!(cfg.words_path.is_none());
}

#[test]
fn parses_submenu_policy() {
    let cfg = AppConfig::parse_from(["test-app", "--submenu-policy", "independent"]);
    assert_eq!(cfg.submenu_policy, SubmenuPolicy::Independent);
    assert!(AppConfig::try_parse_from(["test-app", "--submenu-policy", "both"]).is_err());
}

#[test]
fn rejects_sidebar_width_out_of_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--sidebar-width", "11"]);
    assert!(cfg.validate().is_err());

    let mut cfg = AppConfig::parse_from(["test-app", "--sidebar-width", "61"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn accepts_sidebar_width_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--sidebar-width", "12"]);
    assert!(cfg.validate().is_ok());

    let mut cfg = AppConfig::parse_from(["test-app", "--sidebar-width", "60"]);
    assert!(cfg.validate().is_ok());
}

#[test]
fn rejects_missing_words_file() {
    let mut cfg = AppConfig::parse_from(["test-app", "--words", "/definitely/not/here.json"]);
    let err = cfg.validate().expect_err("missing file");
    assert!(format!("{err:#}").contains("not found"));
}

#[test]
fn rejects_unsupported_words_extension() {
    let path = temp_file("words.csv", "id,en\n");
    let mut cfg = AppConfig::parse_from(["test-app", "--words", path.to_str().expect("utf8")]);
    assert!(cfg.validate().is_err());
    let _ = fs::remove_file(path);
}

#[test]
fn canonicalizes_words_path() {
    let path = temp_file("words.yaml", "languages: []\n");
    let mut cfg = AppConfig::parse_from(["test-app", "--words", path.to_str().expect("utf8")]);
    cfg.validate().expect("valid words path");
    let stored = cfg.words_path.clone().expect("path kept");
    assert!(stored.is_absolute());
    assert_eq!(stored, path.canonicalize().expect("canonical"));
    let _ = fs::remove_file(path);
}

#[test]
fn no_logs_overrides_logs() {
    let cfg = AppConfig::parse_from(["test-app", "--logs"]);
    assert!(cfg.logging_enabled());
    let cfg = AppConfig::parse_from(["test-app", "--logs", "--no-logs"]);
    assert!(!cfg.logging_enabled());
}

#[test]
fn parses_start_screen() {
    let cfg = AppConfig::parse_from(["test-app", "--start-screen", "decks"]);
    assert_eq!(cfg.start_screen, StartScreen::Decks);
}
