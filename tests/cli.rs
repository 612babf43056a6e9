//! Integration tests for top-level CLI behavior.
//!
//! Every invocation runs with `AULA_BACKEND=memory` so no network or
//! configuration is needed; each process starts with an empty store.

use std::process::Command;

fn run_aula(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_aula");
    Command::new(bin)
        .args(args)
        .env("AULA_BACKEND", "memory")
        .output()
        .expect("failed to run aula binary")
}

#[test]
fn courses_list_empty_store() {
    let output = run_aula(&["courses", "list"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("No courses found."));
}

#[test]
fn courses_create_prints_derived_id() {
    let output = run_aula(&[
        "courses", "create", "--name", "Rust", "--description", "Systems programming",
        "--category", "systems",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Created course"));
    assert!(stdout.contains("(Rust)"));
}

#[test]
fn courses_create_without_name_shows_error() {
    let output = run_aula(&["courses", "create", "--description", "d", "--category", "c"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("--name"));
}

#[test]
fn enroll_in_unknown_course_fails() {
    let output = run_aula(&["enroll", "404", "--student", "ana@campus.edu"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("no courses record found"));
}

#[test]
fn enrollments_list_empty_store() {
    let output = run_aula(&["enrollments"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("No enrollments found."));
}

#[test]
fn periods_create_with_bad_date_fails() {
    let output = run_aula(&[
        "periods", "create", "--name", "Midterm", "--start", "soon", "--end", "2026-03-15",
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("RFC 3339"));
}

#[test]
fn periods_list_empty_store() {
    let output = run_aula(&["periods", "list"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("No evaluation periods found."));
}

#[test]
fn register_succeeds_against_memory_backend() {
    let output = run_aula(&[
        "register", "--name", "Ana", "--email", "ana@campus.edu", "--password", "secret",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Registered ana@campus.edu"));
}

#[test]
fn login_with_unknown_account_fails() {
    let output = run_aula(&["login", "--email", "ghost@campus.edu", "--password", "pw"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Login failed"));
}

#[test]
fn periods_help_shows_date_format() {
    let output = run_aula(&["periods", "create", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("RFC 3339"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_aula(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
