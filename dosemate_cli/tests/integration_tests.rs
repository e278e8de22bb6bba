//! Integration tests for the dosemate binary.
//!
//! The store is seeded in memory per invocation, so each test asserts on a
//! single command's output against the known demo data.

use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("dosemate"))
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Smart pillbox medication tracker"));
}

#[test]
fn test_default_command_shows_dashboard() {
    cli()
        .assert()
        .success()
        .stdout(predicate::str::contains("Health Overview"))
        .stdout(predicate::str::contains("Weekly adherence"))
        .stdout(predicate::str::contains("Lisinopril"));
}

#[test]
fn test_dashboard_posts_insight() {
    cli()
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Insight:"));
}

#[test]
fn test_schedule_lists_demo_doses() {
    cli()
        .args(["schedule", "--day", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Schedule for Wed"))
        .stdout(predicate::str::contains("Lisinopril"))
        .stdout(predicate::str::contains("Atorvastatin"));
}

#[test]
fn test_schedule_rejects_invalid_day() {
    cli().args(["schedule", "--day", "7"]).assert().failure();
}

#[test]
fn test_schedule_respects_24h_format() {
    cli()
        .args(["schedule", "--day", "0", "--time-format", "24h"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12:55"))
        .stdout(predicate::str::contains("20:00"));
}

#[test]
fn test_take_known_medication() {
    cli()
        .args(["take", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dose recorded for Lisinopril"))
        .stdout(predicate::str::contains("23 pills left"));
}

#[test]
fn test_take_unknown_medication_is_noop() {
    cli()
        .args(["take", "nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing recorded"));
}

#[test]
fn test_reset_requires_confirmation() {
    cli()
        .args(["reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Re-run with --yes"));

    cli()
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("have been refilled"));
}

#[test]
fn test_refill_single_medication() {
    cli()
        .args(["refill", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Refilled Atorvastatin to 30 pills"));
}

#[test]
fn test_add_valid_medication() {
    cli()
        .args([
            "add",
            "--name",
            "Metformin",
            "--dosage",
            "500mg",
            "--compartment",
            "3",
            "--time",
            "09:00",
            "--time",
            "21:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Metformin 500mg"));
}

#[test]
fn test_add_rejects_empty_name() {
    cli()
        .args([
            "add",
            "--name",
            "",
            "--dosage",
            "500mg",
            "--compartment",
            "3",
            "--time",
            "09:00",
        ])
        .assert()
        .failure();
}

#[test]
fn test_add_rejects_bad_time() {
    cli()
        .args([
            "add",
            "--name",
            "Metformin",
            "--dosage",
            "500mg",
            "--compartment",
            "3",
            "--time",
            "9am",
        ])
        .assert()
        .failure();
}

#[test]
fn test_skip_reports_day_name() {
    cli()
        .args(["skip", "1", "08:00", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped 1 at 08:00 on Wed"));
}

#[test]
fn test_logs_json_snapshot() {
    cli()
        .args(["logs", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"medications\""))
        .stdout(predicate::str::contains("\"medication_id\""));
}

#[test]
fn test_notifications_include_low_inventory() {
    // Atorvastatin is seeded with 4 pills, below the default threshold
    cli()
        .arg("notifications")
        .assert()
        .success()
        .stdout(predicate::str::contains("Low Inventory"))
        .stdout(predicate::str::contains("Atorvastatin"));
}
