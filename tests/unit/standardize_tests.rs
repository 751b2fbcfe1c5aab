//! Name standardization tests

use pretty_assertions::assert_eq;

use sqrubber::identifier::{add_prefix, remove_caps};
use sqrubber::standardize::{remove_spaces, standardize_document, standardize_dump, Source};
use sqrubber::{validate, Document, NameStyle, SqrubberError};

#[test]
fn test_remove_spaces_only_touches_names() {
    assert_eq!("DROP TABLE employees;", remove_spaces("DROP TABLE employees;"));
    assert_eq!("CREATE TABLE employees (", remove_spaces("CREATE TABLE employees ("));
    assert_eq!(
        "CREATE TABLE former_employees (",
        remove_spaces("CREATE TABLE former employees (")
    );
}

#[test]
fn test_remove_caps_and_add_prefix() {
    assert_eq!(remove_caps("Former_Employees"), "former_employees");
    assert_eq!(add_prefix("employees", "hr"), "hr_employees");
}

#[test]
fn test_standardize_access_export() {
    let raw = Document::from(vec![
        "DROP TABLE [All Brands Price Data];",
        "CREATE TABLE [All Brands Price Data] (",
        "  [Brand Name] VARCHAR(50),",
        "  [Unit-Price] NUMERIC,",
        "  PRIMARY KEY ([Brand Name])",
        ");",
        "INSERT INTO [All Brands Price Data] ([Brand Name], [Unit-Price]) VALUES ('Acme Co', 1.5);",
    ]);
    let style = NameStyle {
        prefix: Some("der".to_string()),
        schema: Some("myschema".to_string()),
    };

    let cleaned = standardize_document(&raw, &style);

    assert_eq!(
        cleaned.lines(),
        &[
            "drop table myschema.der_all_brands_price_data;",
            "create table myschema.der_all_brands_price_data (",
            "  brand_name VARCHAR(50),",
            "  unit_price NUMERIC,",
            "  PRIMARY KEY ([Brand Name])",
            ");",
            "insert into myschema.der_all_brands_price_data (brand_name, unit_price) VALUES ('Acme Co', 1.5);",
        ]
    );
}

#[test]
fn test_standardize_is_stable_on_clean_input() {
    let style = NameStyle::default();
    let once = standardize_document(
        &Document::from(vec!["DROP TABLE \"Orders\";", "CREATE TABLE \"Orders\" ("]),
        &style,
    );
    let twice = standardize_document(&once, &style);
    assert_eq!(once, twice);
}

#[test]
fn test_standardize_dump_output_feeds_collisions() {
    let sources = vec![
        Source {
            file_name: "DB_2.mdb".to_string(),
            document: Document::from(vec!["DROP TABLE Brands;", "CREATE TABLE Brands ("]),
        },
        Source {
            file_name: "DB_3.mdb".to_string(),
            document: Document::from(vec!["DROP TABLE Brands;", "CREATE TABLE Brands ("]),
        },
    ];
    let mut combined = standardize_dump(&sources, &NameStyle::default());
    let report = sqrubber::resolve_collisions(&mut combined).unwrap();

    assert_eq!(report.drops_rewritten, 2);
    assert_eq!(&combined[1], "drop table brands_d_2;");
    assert_eq!(&combined[5], "create table brands_d_3 (");
}

#[test]
fn test_validate_categories() {
    let empty = Document::from(vec!["", "   "]);
    match validate(&empty, "empty.sql").unwrap_err().downcast_ref::<SqrubberError>() {
        Some(SqrubberError::EmptyInput { .. }) => {}
        other => panic!("Expected EmptyInput, got {:?}", other),
    }

    let prose = Document::from(vec!["Here is some data"]);
    match validate(&prose, "notes.txt").unwrap_err().downcast_ref::<SqrubberError>() {
        Some(SqrubberError::NoValidDdl { name }) => assert_eq!(name, "notes.txt"),
        other => panic!("Expected NoValidDdl, got {:?}", other),
    }

    assert!(validate(&Document::from(vec!["create table t ("]), "ok.sql").is_ok());
}
