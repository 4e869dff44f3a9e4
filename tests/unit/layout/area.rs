use super::*;
use crate::data::table::Record;

const EPS: f64 = 1e-9;

fn table(rows: &[(f64, &str)]) -> RecordTable {
    let records = rows
        .iter()
        .map(|&(lat, g)| Record::new(lat, 0.0, vec![g.to_string()]))
        .collect();
    RecordTable::new(vec!["gender".to_string()], records).unwrap()
}

fn layout(t: &RecordTable, separate: bool) -> Vec<Point> {
    let c = Canvas::new(800, 100).unwrap();
    area_layout(t, c, t.field("gender").unwrap(), separate)
}

#[test]
fn quantize_covers_extent_ends() {
    let q = Quantize::new(Extent { min: 0.0, max: 10.0 }, 800.0, 2.0);
    assert_eq!(q.bins(), 400);
    assert_eq!(q.bin_of(0.0), 0);
    assert_eq!(q.bin_of(10.0), 399);
    assert_eq!(q.bin_of(5.0), 200);
    assert_eq!(q.bin_of(f64::NAN), 0);
    assert!((q.x_of(399) - 798.0).abs() < EPS);
}

#[test]
fn same_bin_stacks_upward() {
    let t = table(&[(0.0, "m"), (0.0, "m"), (0.0, "m"), (10.0, "m")]);
    let pts = layout(&t, false);
    assert!((pts[0].y - 100.0).abs() < EPS);
    assert!((pts[1].y - 96.25).abs() < EPS);
    assert!((pts[2].y - 92.5).abs() < EPS);
    assert!((pts[3].x - 798.0).abs() < EPS);
    assert!((pts[3].y - 100.0).abs() < EPS);
}

#[test]
fn categories_stack_in_first_seen_order() {
    // "f" appears second, so its record stacks on top of both "m" records.
    let t = table(&[(0.0, "m"), (0.0, "f"), (0.0, "m")]);
    let pts = layout(&t, false);
    assert!((pts[0].y - 100.0).abs() < EPS);
    assert!((pts[2].y - 96.25).abs() < EPS);
    assert!((pts[1].y - 92.5).abs() < EPS);
}

#[test]
fn separation_lifts_later_categories() {
    let t = table(&[(0.0, "m"), (10.0, "f")]);
    let joined = layout(&t, false);
    let split = layout(&t, true);
    assert!((joined[1].y - split[1].y - CATEGORY_SEPARATION).abs() < EPS);
    assert_eq!(joined[0], split[0]);
}

#[test]
fn flat_extent_and_missing_latitude() {
    let t = table(&[(5.0, "m"), (5.0, "m"), (f64::NAN, "f")]);
    let pts = layout(&t, false);
    assert!(pts.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    assert_eq!(pts[2].x, 0.0);
}

#[test]
fn empty_table_places_nothing() {
    assert!(layout(&table(&[]), false).is_empty());
}
