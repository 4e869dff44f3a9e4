use super::*;

const SAMPLE: &str = "\
IncidentDistrict,IncidentOutcome,Gender,lat,lon
Central,Arrest,M,37.79,-122.40
Mission,Cited,F, 37.76 ,-122.42
Central,Arrest,F,,-122.41
";

#[test]
fn reads_rows_in_order_with_all_columns() {
    let table = read_records(SAMPLE.as_bytes(), &CoordinateColumns::default()).unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(
        table.columns(),
        &["IncidentDistrict", "IncidentOutcome", "Gender", "lat", "lon"]
    );
    let district = table.field("IncidentDistrict").unwrap();
    assert_eq!(table.records()[1].category(district), "Mission");
    assert_eq!(table.records()[1].lat, 37.76);
    assert_eq!(table.records()[0].lon, -122.40);
}

#[test]
fn unparsable_coordinates_degrade_to_nan() {
    let table = read_records(SAMPLE.as_bytes(), &CoordinateColumns::default()).unwrap();
    let r = &table.records()[2];
    assert!(r.lat.is_nan());
    assert!(!r.has_coordinates());
}

#[test]
fn missing_coordinate_column_is_a_load_error() {
    let cols = CoordinateColumns {
        lat: "latitude".to_string(),
        lon: "lon".to_string(),
    };
    let err = read_records(SAMPLE.as_bytes(), &cols).unwrap_err();
    assert!(matches!(err, ScatterError::Load(_)));
}

#[test]
fn ragged_csv_row_is_a_load_error() {
    let bad = "a,lat,lon\nx,1,2\ny,3\n";
    let err = read_records(bad.as_bytes(), &CoordinateColumns::default()).unwrap_err();
    assert!(matches!(err, ScatterError::Load(_)));
}

#[test]
fn missing_file_is_a_load_error() {
    let err = load_records(
        Path::new("target/definitely/not/here.csv"),
        &CoordinateColumns::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ScatterError::Load(_)));
}
