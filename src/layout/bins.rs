use crate::{
    data::table::{FieldId, RecordTable},
    foundation::core::{Canvas, Point, Rgb, Vec2},
};

/// Sizing rules shared by the bar and grid arrangements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinGeometry {
    /// Point width is `canvas width / point_width_divisor`.
    pub point_width_divisor: f64,
    pub point_margin: f64,
    /// Each bin is `canvas width / (bins * bin_width_factor)` wide.
    pub bin_width_factor: f64,
}

impl BinGeometry {
    pub const BARS: BinGeometry = BinGeometry {
        point_width_divisor: 800.0,
        point_margin: 1.0,
        bin_width_factor: 2.5,
    };

    pub const GRID: BinGeometry = BinGeometry {
        point_width_divisor: 400.0,
        point_margin: 3.0,
        bin_width_factor: 1.5,
    };

    pub fn point_width(&self, canvas: Canvas) -> f64 {
        canvas.width_f64() / self.point_width_divisor
    }

    /// Distance between neighbouring points in a bin, both axes.
    pub fn increment(&self, canvas: Canvas) -> f64 {
        self.point_width(canvas) + self.point_margin
    }
}

/// Placement region for one category; lives for a single layout call.
#[derive(Clone, Debug, PartialEq)]
pub struct Bin {
    pub width: f64,
    pub start: f64,
    pub count: usize,
    pub columns: usize,
}

impl Bin {
    pub fn row_col(&self, k: usize) -> (usize, usize) {
        (k / self.columns, k % self.columns)
    }

    /// Cell of the next point: left to right, then upward from `base_y`.
    fn place(&mut self, increment: f64, base_y: f64) -> Point {
        let (row, col) = self.row_col(self.count);
        self.count += 1;
        Point::new(
            self.start + col as f64 * increment,
            base_y - row as f64 * increment,
        )
    }
}

/// Equal-width bins, the slack split evenly left and right.
pub fn build_bins(num_bins: usize, canvas: Canvas, geom: BinGeometry) -> Vec<Bin> {
    if num_bins == 0 {
        return Vec::new();
    }
    let width = canvas.width_f64();
    let n = num_bins as f64;
    let bin_margin = geom.point_width(canvas) * 10.0;
    let bin_width = width / (n * geom.bin_width_factor);
    let extra = width - bin_margin * (n - 1.0) - bin_width * n;
    let increment = geom.increment(canvas);
    let columns = ((bin_width / increment).floor() as usize).max(1);

    let mut running = extra / 2.0;
    (0..num_bins)
        .map(|i| {
            let bin = Bin {
                width: bin_width,
                start: running + i as f64 * bin_margin,
                count: 0,
                columns,
            };
            running += bin_width - 1.0;
            bin
        })
        .collect()
}

/// Result of a binned arrangement. `binned[i]` is false when record `i` had no bin and kept
/// its prior position.
#[derive(Clone, Debug, PartialEq)]
pub struct BinPlacement {
    pub positions: Vec<Point>,
    pub binned: Vec<bool>,
}

impl BinPlacement {
    /// Black out the colors of records that kept their prior position.
    pub fn mask_unbinned(&self, colors: &mut [Rgb]) {
        for (color, binned) in colors.iter_mut().zip(&self.binned) {
            if !binned {
                *color = Rgb::BLACK;
            }
        }
    }
}

fn recenter_offset(canvas: Canvas) -> Vec2 {
    Vec2::new(canvas.width_f64() / 5.0, canvas.height_f64() / 5.0)
}

fn fill(
    table: &RecordTable,
    canvas: Canvas,
    geom: BinGeometry,
    bins: &mut [Bin],
    prior: &[Point],
    slot_of: impl Fn(usize) -> Option<usize>,
) -> BinPlacement {
    let increment = geom.increment(canvas);
    let base_y = canvas.height_f64();
    let offset = recenter_offset(canvas);

    let mut positions = Vec::with_capacity(table.len());
    let mut binned = Vec::with_capacity(table.len());
    for idx in 0..table.len() {
        match slot_of(idx).and_then(|slot| bins.get_mut(slot)) {
            Some(bin) => {
                positions.push(bin.place(increment, base_y) - offset);
                binned.push(true);
            }
            None => {
                positions.push(prior.get(idx).copied().unwrap_or(Point::ZERO));
                binned.push(false);
            }
        }
    }

    let misses = binned.iter().filter(|b| !**b).count();
    if misses > 0 {
        tracing::warn!(records = misses, "records without a bin kept their prior position");
    }
    BinPlacement { positions, binned }
}

/// One bar per distinct value of `field`, filled bottom-up in record order.
#[tracing::instrument(skip(table, prior), fields(records = table.len()))]
pub fn bars_layout(
    table: &RecordTable,
    canvas: Canvas,
    field: FieldId,
    prior: &[Point],
) -> BinPlacement {
    let categories = table.categories(field);
    let mut bins = build_bins(categories.len(), canvas, BinGeometry::BARS);
    tracing::debug!(bins = bins.len(), "built category bins");
    fill(
        table,
        canvas,
        BinGeometry::BARS,
        &mut bins,
        prior,
        |idx| categories.slot_of_record(idx),
    )
}

/// A single dense block holding every record.
#[tracing::instrument(skip(table), fields(records = table.len()))]
pub fn grid_layout(table: &RecordTable, canvas: Canvas) -> BinPlacement {
    let num_bins = usize::from(!table.is_empty());
    let mut bins = build_bins(num_bins, canvas, BinGeometry::GRID);
    fill(table, canvas, BinGeometry::GRID, &mut bins, &[], |_| Some(0))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/bins.rs"]
mod tests;
