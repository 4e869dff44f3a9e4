use super::*;
use crate::data::table::Record;

const EPS: f64 = 1e-9;

fn table(coords: &[(f64, f64)]) -> RecordTable {
    let records = coords
        .iter()
        .map(|&(lat, lon)| Record::new(lat, lon, vec!["d".to_string()]))
        .collect();
    RecordTable::new(vec!["district".to_string()], records).unwrap()
}

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

#[test]
fn fitted_extent_stays_inside_half_canvas() {
    let t = table(&[
        (37.70, -122.51),
        (37.81, -122.36),
        (37.75, -122.45),
        (37.78, -122.39),
    ]);
    let c = canvas(1200, 800);
    let pts = geo_layout(&t, c);
    assert_eq!(pts.len(), 4);
    for p in &pts {
        assert!(p.x >= -EPS && p.x <= 600.0 + EPS, "{p:?}");
        assert!(p.y >= -EPS && p.y <= 400.0 + EPS, "{p:?}");
    }
}

#[test]
fn fit_touches_both_edges_of_the_tight_axis() {
    // A wide box: longitude is the constraining axis.
    let t = table(&[(0.0, -10.0), (1.0, 10.0)]);
    let pts = geo_layout(&t, canvas(400, 400));
    let xs: Vec<f64> = pts.iter().map(|p| p.x).collect();
    let min_x = xs.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_x = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert!(min_x.abs() < 1e-6);
    assert!((max_x - 200.0).abs() < 1e-6);
}

#[test]
fn north_is_up() {
    let t = table(&[(10.0, 0.0), (20.0, 0.0), (15.0, 5.0)]);
    let pts = geo_layout(&t, canvas(300, 300));
    assert!(pts[1].y < pts[0].y);
}

#[test]
fn single_point_extent_is_finite() {
    let t = table(&[(37.7, -122.4)]);
    let pts = geo_layout(&t, canvas(200, 100));
    assert!(pts[0].x.is_finite() && pts[0].y.is_finite());
    // The only point sits near the center of its widened box (Mercator bends y slightly).
    assert!((pts[0].x - 50.0).abs() < 1e-6);
    assert!((pts[0].y - 25.0).abs() < 0.5);
}

#[test]
fn missing_coordinates_use_extent_center() {
    let t = table(&[(0.0, -10.0), (f64::NAN, 5.0), (0.0, 10.0)]);
    let pts = geo_layout(&t, canvas(400, 400));
    assert_eq!(pts.len(), 3);
    assert!((pts[1].x - 100.0).abs() < 1e-6);
    assert!(pts[1].y.is_finite());
}

#[test]
fn polar_latitudes_are_clamped() {
    let t = table(&[(90.0, 0.0), (-90.0, 10.0)]);
    for p in geo_layout(&t, canvas(100, 100)) {
        assert!(p.x.is_finite() && p.y.is_finite());
    }
}

#[test]
fn empty_table_projects_nothing() {
    assert!(geo_layout(&table(&[]), canvas(10, 10)).is_empty());
}

#[test]
fn layout_is_idempotent() {
    let t = table(&[(1.0, 2.0), (3.0, 4.0), (5.0, -1.0)]);
    assert_eq!(geo_layout(&t, canvas(640, 480)), geo_layout(&t, canvas(640, 480)));
}
