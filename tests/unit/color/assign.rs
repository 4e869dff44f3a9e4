use rand::{SeedableRng, rngs::StdRng};

use super::*;
use crate::data::table::Record;

fn table(cats: &[&str]) -> RecordTable {
    let records = cats
        .iter()
        .map(|c| Record::new(0.0, 0.0, vec![c.to_string()]))
        .collect();
    RecordTable::new(vec!["cat".to_string()], records).unwrap()
}

fn hue_of(c: Rgb) -> f64 {
    let [r, g, b, _] = c.to_rgba8();
    Rgb8 { r, g, b }.to_hsl().h
}

#[test]
fn stops_are_six_even_steps_then_one() {
    let s = ColorScale::stops();
    assert_eq!(s.len(), 7);
    assert_eq!(s[0], 0.0);
    assert!((s[3] - 0.5).abs() < 1e-12);
    assert_eq!(s[6], 1.0);
    assert!(s.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn eighth_category_reuses_first_stop() {
    let keys = ["a", "b", "c", "d", "e", "f", "g", "h"];
    let scale = ColorScale::new(keys, ColorRamp::Cool);
    assert_eq!(scale.base_color("h"), scale.base_color("a"));
    assert_ne!(scale.base_color("b"), scale.base_color("a"));
    assert_eq!(scale.base_color("zzz"), None);
}

#[test]
fn one_color_per_record_in_range() {
    let t = table(&["x", "y", "x", "z", "y"]);
    let mut rng = StdRng::seed_from_u64(1);
    let colors = assign_colors(&t, t.field("cat").unwrap(), ColorRamp::Cool, &mut rng);
    assert_eq!(colors.len(), 5);
    for c in colors {
        for ch in [c.r, c.g, c.b] {
            assert!((0.0..=1.0).contains(&ch));
        }
    }
}

#[test]
fn equal_categories_share_base_hue() {
    let t = table(&["x", "y", "x", "x", "y"]);
    let field = t.field("cat").unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    let colors = assign_colors(&t, field, ColorRamp::Cool, &mut rng);
    // Lightness jitter can push channels to black or white, which erases hue; compare only
    // chromatic samples.
    let chromatic = |c: &Rgb| {
        let [r, g, b, _] = c.to_rgba8();
        Rgb8 { r, g, b }.to_hsl().s > 0.2 && r.max(g).max(b) < 250 && r.max(g).max(b) > 60
    };
    let xs: Vec<f64> = [0usize, 2, 3]
        .iter()
        .map(|&i| colors[i])
        .filter(chromatic)
        .map(hue_of)
        .collect();
    for pair in xs.windows(2) {
        assert!((pair[0] - pair[1]).abs() < 8.0, "hues {pair:?}");
    }
}

#[test]
fn same_seed_reproduces_colors() {
    let t = table(&["x", "y", "z"]);
    let field = t.field("cat").unwrap();
    let a = assign_colors(&t, field, ColorRamp::Magma, &mut StdRng::seed_from_u64(5));
    let b = assign_colors(&t, field, ColorRamp::Magma, &mut StdRng::seed_from_u64(5));
    assert_eq!(a, b);
}

#[test]
fn empty_table_yields_no_colors() {
    let t = table(&[]);
    let mut rng = StdRng::seed_from_u64(1);
    assert!(assign_colors(&t, t.field("cat").unwrap(), ColorRamp::Cool, &mut rng).is_empty());
}

#[test]
fn lightness_jitter_stays_in_range() {
    let base = Rgb8 {
        r: 110,
        g: 64,
        b: 170,
    };
    let l = base.to_hsl().l;
    let t = table(&["x"; 200]);
    let mut rng = StdRng::seed_from_u64(3);
    let colors = assign_colors(&t, t.field("cat").unwrap(), ColorRamp::Cool, &mut rng);
    for c in colors {
        let [r, g, b, _] = c.to_rgba8();
        let jittered = Rgb8 { r, g, b }.to_hsl().l;
        // 8-bit requantization moves lightness by well under 0.01.
        assert!(jittered >= l * 0.1 - 0.01, "{jittered}");
        assert!(jittered <= (l * 1.1).min(1.0) + 0.01, "{jittered}");
    }
}
