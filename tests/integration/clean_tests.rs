//! Integration tests for the clean workflow

use pretty_assertions::assert_eq;

use sqrubber::dump::OutputTarget;
use sqrubber::{clean_dump, CleanOptions, SqrubberError};

use crate::common::{read_body, TestContext};

#[test]
fn test_clean_combines_sources_with_markers() {
    let ctx = TestContext::new();
    let db2 = ctx.write_dump(
        "DB_2.mdb",
        &["DROP TABLE [Price Data];", "CREATE TABLE [Price Data] (", "  [Brand Name] TEXT", ");"],
    );
    let db3 = ctx.write_dump("DB_3.mdb", &["DROP TABLE [Price Data];"]);
    let out = ctx.path("combined.sql");

    let target = clean_dump(CleanOptions {
        inputs: vec![db2, db3],
        output: Some(out.clone()),
        schema: Some("MySchema".to_string()),
        ..Default::default()
    })
    .expect("clean should succeed");

    assert_eq!(target, OutputTarget::File(out.clone()));
    assert_eq!(
        read_body(&out),
        vec![
            "-- SQL Dump of DB_2.mdb",
            "drop table myschema.price_data;",
            "create table myschema.price_data (",
            "  brand_name TEXT",
            ");",
            "-- SQL Dump of DB_3.mdb",
            "drop table myschema.price_data;",
        ]
    );
}

#[test]
fn test_clean_default_output_path() {
    let ctx = TestContext::new();
    let input = ctx.write_dump("dump.sql", &["DROP TABLE Orders;"]);

    let target = clean_dump(CleanOptions {
        inputs: vec![input],
        ..Default::default()
    })
    .unwrap();

    let expected = ctx.path("dump.sql.cleaned");
    assert_eq!(target, OutputTarget::File(expected.clone()));
    assert!(expected.exists(), "Default output should be <input>.cleaned");
}

#[test]
fn test_clean_overwrite_in_place() {
    let ctx = TestContext::new();
    let input = ctx.write_dump("dump.sql", &["DROP TABLE Orders;"]);

    clean_dump(CleanOptions {
        inputs: vec![input.clone()],
        overwrite: true,
        prefix: Some("acme".to_string()),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(
        read_body(&input),
        vec!["-- SQL Dump of dump.sql", "drop table acme_orders;"]
    );
}

#[test]
fn test_clean_overwrite_rejects_multiple_inputs() {
    let ctx = TestContext::new();
    let a = ctx.write_dump("a.sql", &["DROP TABLE a;"]);
    let b = ctx.write_dump("b.sql", &["DROP TABLE b;"]);

    let err = clean_dump(CleanOptions {
        inputs: vec![a, b],
        overwrite: true,
        ..Default::default()
    })
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SqrubberError>(),
        Some(SqrubberError::AmbiguousOverwrite { count: 2 })
    ));
}

#[test]
fn test_clean_missing_input() {
    let ctx = TestContext::new();
    let err = clean_dump(CleanOptions {
        inputs: vec![ctx.path("nope.sql")],
        ..Default::default()
    })
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SqrubberError>(),
        Some(SqrubberError::InputNotFound { .. })
    ));
    assert!(!ctx.path("nope.sql.cleaned").exists());
}

#[test]
fn test_clean_rejects_input_without_ddl() {
    let ctx = TestContext::new();
    let input = ctx.write_dump("notes.txt", &["Here is some data"]);

    let err = clean_dump(CleanOptions {
        inputs: vec![input],
        ..Default::default()
    })
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SqrubberError>(),
        Some(SqrubberError::NoValidDdl { .. })
    ));
    assert!(!ctx.path("notes.txt.cleaned").exists());
}
