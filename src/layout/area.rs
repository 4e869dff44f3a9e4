use crate::{
    data::table::{FieldId, RecordTable},
    foundation::{
        core::{Canvas, Point},
        math::Extent,
    },
};

/// Vertical distance between category bands when they are separated.
pub const CATEGORY_SEPARATION: f64 = 20.0;

const POINT_MARGIN: f64 = 1.0;
const POINT_HEIGHT_RATIO: f64 = 0.375;
const STACK_SPACING: f64 = 10.0;

/// Maps a continuous domain onto `bins` evenly spaced x positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quantize {
    domain: Extent,
    bins: usize,
    step: f64,
}

impl Quantize {
    pub fn new(domain: Extent, width: f64, step: f64) -> Self {
        let bins = ((width / step).ceil() as usize).max(1);
        Self {
            domain: domain.widened(),
            bins,
            step,
        }
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Bin index of `value`; non-finite values fall into bin 0.
    pub fn bin_of(&self, value: f64) -> usize {
        if !value.is_finite() {
            return 0;
        }
        let t = (value - self.domain.min) / self.domain.span();
        let raw = (t * self.bins as f64).floor();
        (raw.max(0.0) as usize).min(self.bins - 1)
    }

    pub fn x_of(&self, bin: usize) -> f64 {
        bin as f64 * self.step
    }
}

/// Latitude histogram: each record stacks on the x-bin of its latitude, categories visited
/// in first-seen order so earlier categories sit at the bottom.
#[tracing::instrument(skip(table), fields(records = table.len()))]
pub fn area_layout(
    table: &RecordTable,
    canvas: Canvas,
    field: FieldId,
    separate: bool,
) -> Vec<Point> {
    let point_width = (canvas.width_f64() / 800.0).round().max(1.0);
    let point_height = point_width * POINT_HEIGHT_RATIO;
    let separation = if separate { CATEGORY_SEPARATION } else { 0.0 };

    let records = table.records();
    let lat = Extent::of(records.iter().map(|r| r.lat)).unwrap_or_else(Extent::unit);
    let scale = Quantize::new(lat, canvas.width_f64(), point_width + POINT_MARGIN);
    let mut counts = vec![0usize; scale.bins()];

    let mut positions = vec![Point::ZERO; records.len()];
    let categories = table.categories(field);
    for (category_index, group) in categories.groups().iter().enumerate() {
        for &idx in group {
            let bin = scale.bin_of(records[idx].lat);
            let stacked = counts[bin] as f64;
            positions[idx] = Point::new(
                scale.x_of(bin),
                canvas.height_f64()
                    - (point_height * stacked * STACK_SPACING
                        + category_index as f64 * separation),
            );
            counts[bin] += 1;
        }
    }

    tracing::debug!(
        bins = scale.bins(),
        tallest = counts.iter().copied().max().unwrap_or(0),
        "stacked latitude histogram"
    );
    positions
}

#[cfg(test)]
#[path = "../../tests/unit/layout/area.rs"]
mod tests;
