use super::*;

fn table() -> RecordTable {
    let columns = vec!["IncidentOutcome".to_string(), "Gender".to_string()];
    let rows = [("Arrest", "M"), ("Cited", "F"), ("Arrest", "F"), ("Warned", "M")];
    let records = rows
        .iter()
        .enumerate()
        .map(|(i, (o, g))| Record::new(i as f64, -(i as f64), vec![o.to_string(), g.to_string()]))
        .collect();
    RecordTable::new(columns, records).unwrap()
}

#[test]
fn field_lookup_is_typed_and_rejects_unknown_names() {
    let t = table();
    assert_eq!(t.field("Gender").unwrap().index(), 1);
    let err = t.field("Nope").unwrap_err();
    assert!(err.to_string().contains("unknown categorical field 'Nope'"));
}

#[test]
fn categories_preserve_first_seen_order() {
    let t = table();
    let cats = t.categories(t.field("IncidentOutcome").unwrap());
    assert_eq!(cats.keys(), &["Arrest", "Cited", "Warned"]);
    assert_eq!(cats.slot_of_record(3), Some(2));
    assert_eq!(cats.slot_of_record(9), None);
    assert_eq!(cats.slot_of_record(2), Some(0));
    assert_eq!(cats.groups(), vec![vec![0, 2], vec![1], vec![3]]);
}

#[test]
fn ragged_rows_are_rejected() {
    let err = RecordTable::new(
        vec!["a".to_string(), "b".to_string()],
        vec![Record::new(0.0, 0.0, vec!["x".to_string()])],
    )
    .unwrap_err();
    assert!(matches!(err, ScatterError::Validation(_)));
}

#[test]
fn empty_table_has_no_categories() {
    let t = RecordTable::new(vec!["a".to_string()], vec![]).unwrap();
    let cats = t.categories(t.field("a").unwrap());
    assert!(cats.is_empty());
    assert!(cats.groups().is_empty());
}
