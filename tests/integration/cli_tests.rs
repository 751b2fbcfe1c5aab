//! Tests that drive the `sqrubber` binary

use std::process::{Command, Output};

use crate::common::{two_source_dump, TestContext};

fn sqrubber(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sqrubber"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run sqrubber binary")
}

#[test]
fn test_cli_collisions_print() {
    let ctx = TestContext::new();
    let input = ctx.write_dump("combined.sql", &two_source_dump());

    let output = sqrubber(&["collisions", "-i", input.to_str().unwrap(), "--print"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("-- Collisions version "));
    assert!(stdout.contains("drop table myschema.der_all_brands_price_data_d_2;"));
    assert!(stdout.contains("drop table myschema.der_all_brands_price_data_d_3;"));
    assert!(!ctx.path("combined.sql.cleaned").exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("db_2 -> _d_2"));
}

#[test]
fn test_cli_clean_default_output() {
    let ctx = TestContext::new();
    let input = ctx.write_dump("DB_2.mdb", &["DROP TABLE Orders;"]);

    let output = sqrubber(&["clean", "-i", input.to_str().unwrap(), "--prefix", "acme"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let written = std::fs::read_to_string(ctx.path("DB_2.mdb.cleaned")).unwrap();
    assert!(written.contains("-- SQL Dump of DB_2.mdb\ndrop table acme_orders;\n"));
}

#[test]
fn test_cli_usage_error_exits_2() {
    let output = sqrubber(&["collisions"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn test_cli_print_conflicts_with_output() {
    let output = sqrubber(&["collisions", "-i", "x.sql", "-p", "-o", "y.sql"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_cli_no_ddl_reported_distinctly() {
    let ctx = TestContext::new();
    let input = ctx.write_dump("notes.txt", &["Here is some data"]);

    let output = sqrubber(&["collisions", "-i", input.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no valid DDL"));
}

#[test]
fn test_cli_missing_input_reported() {
    let ctx = TestContext::new();
    let missing = ctx.path("missing.sql");

    let output = sqrubber(&["collisions", "-i", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Input file not found"));
}

#[test]
fn test_cli_input_errors_point_at_usage() {
    let ctx = TestContext::new();
    let missing = ctx.path("missing.sql");

    let output = sqrubber(&["clean", "-i", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("sqrubber clean --help"));
}

#[test]
fn test_cli_structural_errors_have_no_usage_hint() {
    let ctx = TestContext::new();
    let input = ctx.write_dump(
        "combined.sql",
        &["drop table t;", "-- SQL Dump of a.mdb", "drop table t;"],
    );

    let output = sqrubber(&["collisions", "-i", input.to_str().unwrap(), "--print"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No SQL dump marker precedes line 1"));
    assert!(!stderr.contains("--help"));
}
