use std::{collections::HashMap, ops::Range};

use rand::Rng;

use crate::{
    color::ramp::{ColorRamp, Rgb8},
    data::table::{FieldId, RecordTable},
    foundation::core::Rgb,
};

/// Number of cyclic stops a category scale walks through before repeating.
pub const CATEGORY_STOPS: usize = 7;

/// Lightness multiplier range applied per point.
pub const LIGHTNESS_JITTER: Range<f64> = 0.1..1.1;

/// Ordinal category -> base color mapping over one ramp.
#[derive(Clone, Debug)]
pub struct ColorScale {
    base: HashMap<String, Rgb8>,
}

impl ColorScale {
    /// Six evenly spaced stops in `[0, 1)` followed by `1.0`.
    pub fn stops() -> [f64; CATEGORY_STOPS] {
        let mut out = [1.0; CATEGORY_STOPS];
        for (i, s) in out.iter_mut().take(CATEGORY_STOPS - 1).enumerate() {
            *s = i as f64 / (CATEGORY_STOPS - 1) as f64;
        }
        out
    }

    /// The i-th distinct key (first-seen order) gets stop `i mod 7`.
    pub fn new<'a>(keys: impl IntoIterator<Item = &'a str>, ramp: ColorRamp) -> Self {
        let stops = Self::stops();
        let base = keys
            .into_iter()
            .enumerate()
            .map(|(i, key)| (key.to_string(), ramp.sample(stops[i % CATEGORY_STOPS])))
            .collect();
        Self { base }
    }

    pub fn base_color(&self, key: &str) -> Option<Rgb8> {
        self.base.get(key).copied()
    }
}

/// Scale HSL lightness by `factor` and requantize.
pub fn vary_lightness(color: Rgb8, factor: f64) -> Rgb8 {
    let mut hsl = color.to_hsl();
    hsl.l *= factor;
    hsl.to_rgb8()
}

/// One color per record, in record order.
pub fn assign_colors(
    table: &RecordTable,
    field: FieldId,
    ramp: ColorRamp,
    rng: &mut impl Rng,
) -> Vec<Rgb> {
    let categories = table.categories(field);
    let scale = ColorScale::new(categories.keys().iter().copied(), ramp);

    let mut unknown = 0usize;
    let colors = table
        .records()
        .iter()
        .map(|record| match scale.base_color(record.category(field)) {
            Some(base) => {
                let factor = rng.random_range(LIGHTNESS_JITTER);
                vary_lightness(base, factor).to_rgb()
            }
            None => {
                unknown += 1;
                Rgb::BLACK
            }
        })
        .collect();

    if unknown > 0 {
        tracing::warn!(records = unknown, "records without a category color, drawn black");
    }
    colors
}

#[cfg(test)]
#[path = "../../tests/unit/color/assign.rs"]
mod tests;
