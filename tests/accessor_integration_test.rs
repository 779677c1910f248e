//! Integration tests for the table accessor across all four strategies

use cleanframe::accessor::{Applied, ColumnRequest, Strategy, TableAccessor};
use cleanframe::domain::{CleanError, Column, Table, Value};
use cleanframe::synth::FakerKind;

fn patient_table() -> Table {
    Table::from_columns(vec![
        Column::new(
            "ssn",
            vec![Value::from("555-55-5555"), Value::from("123-45-6789")],
        ),
        Column::new(
            "name",
            vec![Value::from("Ada Lovelace"), Value::from("Grace Hopper")],
        ),
        Column::new(
            "notes",
            vec![
                Value::from("reached at ada@example.com"),
                Value::Null,
            ],
        ),
        Column::new("age", vec![Value::Int(34), Value::Int(29)]),
    ])
    .unwrap()
}

#[test]
fn truncate_ssn_scenario() {
    // SSN column truncated to its first 7 characters: the column is text,
    // so recast trivially succeeds and the literal truncated strings come
    // back.
    let accessor = TableAccessor::new().unwrap();
    let table = patient_table();

    let result = accessor
        .apply(
            &table,
            "ssn",
            &Strategy::Truncate {
                max_length: 7,
                from_end: false,
            },
        )
        .unwrap()
        .into_table();

    assert_eq!(
        result.column("ssn").unwrap().values(),
        &[Value::from("555-55-"), Value::from("123-45-")]
    );
}

#[test]
fn truncate_directionality() {
    let accessor = TableAccessor::new().unwrap();
    let table = patient_table();

    let from_end = accessor
        .truncate_column(&table, "ssn", 4, true)
        .unwrap();
    assert_eq!(
        from_end.column("ssn").unwrap().values(),
        &[Value::from("5555"), Value::from("6789")]
    );

    let from_start = accessor
        .truncate_column(&table, "ssn", 4, false)
        .unwrap();
    assert_eq!(
        from_start.column("ssn").unwrap().values(),
        &[Value::from("555-"), Value::from("123-")]
    );
}

#[test]
fn truncate_no_shortening_yields_null() {
    let accessor = TableAccessor::new().unwrap();
    let table = patient_table();

    // Both SSNs are 11 characters; a 20-character budget shortens nothing.
    let result = accessor
        .truncate_column(&table, "ssn", 20, false)
        .unwrap();
    assert_eq!(
        result.column("ssn").unwrap().values(),
        &[Value::Null, Value::Null]
    );
}

#[test]
fn faker_substitutes_every_row() {
    let accessor = TableAccessor::new().unwrap();
    let table = patient_table();

    let result = accessor
        .fake_column(&table, "name", FakerKind::FullName)
        .unwrap();

    let values = result.column("name").unwrap().values();
    assert_eq!(values.len(), 2);
    assert!(values.iter().all(|v| matches!(v, Value::Text(_))));
    assert_ne!(values, table.column("name").unwrap().values());
}

#[test]
fn scrub_redacts_detected_pii_and_keeps_nulls() {
    let accessor = TableAccessor::new().unwrap();
    let table = patient_table();

    let result = accessor.scrub_column(&table, "notes").unwrap();
    assert_eq!(
        result.column("notes").unwrap().values(),
        &[Value::from("reached at {{EMAIL}}"), Value::Null]
    );
}

#[test]
fn scrub_leaves_clean_values_untouched() {
    let accessor = TableAccessor::new().unwrap();
    let table = patient_table();

    let result = accessor.scrub_column(&table, "name").unwrap();
    assert_eq!(result.column("name"), table.column("name"));
}

#[test]
fn apply_never_mutates_the_input_table() {
    let accessor = TableAccessor::new().unwrap();
    let table = patient_table();
    let snapshot = table.clone();

    let _ = accessor.apply(&table, "ssn", &Strategy::Encrypt).unwrap();
    let _ = accessor
        .apply(
            &table,
            "ssn",
            &Strategy::Truncate {
                max_length: 4,
                from_end: true,
            },
        )
        .unwrap();
    let _ = accessor.apply(&table, "notes", &Strategy::Scrubadub).unwrap();
    let _ = accessor
        .apply(
            &table,
            "name",
            &Strategy::Faker {
                provider: FakerKind::FirstName,
            },
        )
        .unwrap();

    assert_eq!(table, snapshot);
}

#[test]
fn batch_matches_sequential_single_column_calls() {
    let accessor = TableAccessor::new().unwrap();
    let table = patient_table();

    let truncate = Strategy::Truncate {
        max_length: 4,
        from_end: true,
    };

    let batched = accessor
        .apply_many(
            &table,
            &[
                ColumnRequest {
                    column: "ssn".to_string(),
                    strategy: truncate.clone(),
                },
                ColumnRequest {
                    column: "notes".to_string(),
                    strategy: Strategy::Scrubadub,
                },
            ],
        )
        .unwrap();

    let step1 = accessor
        .apply(&table, "ssn", &truncate)
        .unwrap()
        .into_table();
    let sequential = accessor
        .apply(&step1, "notes", &Strategy::Scrubadub)
        .unwrap()
        .into_table();

    assert_eq!(batched, sequential);
    // Columns not named in any descriptor pass through unchanged.
    assert_eq!(batched.column("age"), table.column("age"));
    assert_eq!(batched.column("name"), table.column("name"));
}

#[test]
fn batch_with_encrypt_descriptor_is_rejected() {
    let accessor = TableAccessor::new().unwrap();
    let table = patient_table();

    let err = accessor
        .apply_many(
            &table,
            &[ColumnRequest {
                column: "ssn".to_string(),
                strategy: Strategy::Encrypt,
            }],
        )
        .unwrap_err();
    assert!(matches!(err, CleanError::Configuration(_)));
}

#[test]
fn batch_aborts_before_transforming_when_any_descriptor_is_invalid() {
    let accessor = TableAccessor::new().unwrap();
    let table = patient_table();

    let err = accessor
        .apply_many(
            &table,
            &[
                ColumnRequest {
                    column: "ssn".to_string(),
                    strategy: Strategy::Scrubadub,
                },
                ColumnRequest {
                    column: "nope".to_string(),
                    strategy: Strategy::Scrubadub,
                },
            ],
        )
        .unwrap_err();

    assert!(matches!(err, CleanError::ColumnNotFound(_)));
}

#[test]
fn apply_encrypt_outcome_carries_artifacts() {
    let accessor = TableAccessor::new().unwrap();
    let table = patient_table();

    match accessor.apply(&table, "age", &Strategy::Encrypt).unwrap() {
        Applied::Encrypted { table: result, key, dtype } => {
            assert_eq!(dtype.column, "age");
            let restored = accessor
                .decrypt_column(&result, "age", &key, &dtype)
                .unwrap();
            assert_eq!(restored, table);
        }
        Applied::Table(_) => panic!("encrypt must return the encrypted outcome"),
    }
}
