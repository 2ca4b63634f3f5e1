/*
 * tests/cli.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Tests for the ltx-addons command line.
 */

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const PAGE: &str = concat!(
    r#"<html><head><title>T</title></head><body>"#,
    r#"<div class="ltx_page_main"><p>See "#,
    r##"<cite class="ltx_cite">[<a href="#bib.3">3</a>, <a href="#bib.4">4</a>, <a href="#bib.5">5</a>]</cite>"##,
    r#"</p><ul class="ltx_biblist">"#,
    r##"<li id="bib.3" class="ltx_bibitem">Three <a href="https://doi.org/x">doi</a></li>"##,
    r#"<li id="bib.5" class="ltx_bibitem">Five</li>"#,
    r#"</ul></div></body></html>"#,
);

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ltx-addons"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute ltx-addons")
}

fn write_page(dir: &Path, relative: &str, content: &str) -> String {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_ranges() {
    let output = run(&["ranges", "5", "3", "4", "9", "9"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "[3-5,9]\n");
}

#[test]
fn test_ranges_reports_malformed_labels() {
    let output = run(&["ranges", "2", "x"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "[2]\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("L-2-1"));
}

#[test]
fn test_decorate_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_page(dir.path(), "2401.00001/paper.html", PAGE);

    let output = run(&["decorate", &input, "--quiet"]);
    assert!(output.status.success());
    let html = String::from_utf8_lossy(&output.stdout);
    assert!(html.contains(r#"data-range="3-5""#));
    assert!(html.contains(r#"href="https://arxiv.org/abs/2401.00001""#));
    assert!(html.contains(r#"id="cite-modal""#));
}

#[test]
fn test_decorate_submission() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_page(dir.path(), "2401.00001/paper.html", PAGE);

    let output = run(&["decorate", &input, "--quiet", "--submission"]);
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Back to Abstract"));
}

#[test]
fn test_decorate_diagnostics_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_page(
        dir.path(),
        "paper.html",
        r##"<html><body><cite class="ltx_cite">[<a href="#bib.1">one</a>]</cite></body></html>"##,
    );

    let output = run(&["decorate", &input, "--diagnostics-json"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let codes: Vec<String> = stderr
        .lines()
        .filter(|line| line.starts_with('{'))
        .map(|line| {
            let json: serde_json::Value = serde_json::from_str(line).unwrap();
            json["code"].as_str().unwrap_or_default().to_string()
        })
        .collect();
    assert!(codes.contains(&"L-2-1".to_string()));
    assert!(codes.contains(&"L-2-2".to_string()));
}

#[test]
fn test_decorate_parse_error_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_page(dir.path(), "paper.html", "plain text");

    let output = run(&["decorate", &input]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("L-1-2"));
}

#[test]
fn test_decorate_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input_dir = dir.path().join("html");
    write_page(&input_dir, "2401.00001/paper.html", PAGE);
    write_page(&input_dir, "2401.00002/paper.html", PAGE);
    write_page(&input_dir, ".cache/skip.html", PAGE);
    let out_dir = dir.path().join("out");

    let output = run(&[
        "decorate",
        input_dir.to_str().unwrap(),
        "-o",
        out_dir.to_str().unwrap(),
        "--quiet",
    ]);
    assert!(output.status.success());
    let second = fs::read_to_string(out_dir.join("2401.00002/paper.html")).unwrap();
    assert!(second.contains("https://arxiv.org/abs/2401.00002"));
    assert!(out_dir.join("2401.00001/paper.html").is_file());
    assert!(!out_dir.join(".cache").exists());
}

#[test]
fn test_decorate_directory_requires_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["decorate", dir.path().to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_page(dir.path(), "paper.html", PAGE);
    fs::write(dir.path().join("_addons.yml"), "header:\n  enabled: false\n").unwrap();

    let output = run(&["decorate", &input, "--quiet"]);
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("ltx_addons_header"));

    fs::write(dir.path().join("_addons.yml"), "header: [oops\n").unwrap();
    let output = run(&["decorate", &input, "--quiet"]);
    assert!(!output.status.success());
}

#[test]
fn test_modal_replay() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_page(dir.path(), "paper.html", PAGE);

    let output = run(&[
        "modal", &input, "-e", "open:3-5", "-e", "shift-tab", "-e", "tab", "-e", "escape",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "open:3-5 -> opened 3-5 [bib.3, bib.5] (focus: button#cite-modal-close)",
            "shift-tab -> focus 1 (focus: a)",
            "tab -> focus 0 (focus: button#cite-modal-close)",
            "escape -> closed",
            "state: closed",
        ]
    );
    // bib.4 is missing.
    assert!(String::from_utf8_lossy(&output.stderr).contains("L-3-1"));
}

#[test]
fn test_modal_click_inside_before_open() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_page(dir.path(), "paper.html", PAGE);

    let output = run(&["modal", &input, "-e", "click-inside", "-e", "open:3", "-e", "click-inside"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "click-inside -> ignored");
    assert_eq!(lines[2], "click-inside -> ignored");
    assert_eq!(lines[3], "state: open 3");
}

#[test]
fn test_modal_unknown_event() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_page(dir.path(), "paper.html", PAGE);
    let output = run(&["modal", &input, "-e", "hover"]);
    assert!(!output.status.success());
}
