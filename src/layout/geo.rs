use std::f64::consts::FRAC_PI_4;

use crate::{
    data::table::RecordTable,
    foundation::{
        core::{Canvas, Point},
        math::Extent,
    },
};

/// Fixed compression applied after fitting the projection to the canvas.
pub const GEO_DISPLAY_SCALE: f64 = 0.5;

/// Latitude limit of the Mercator projection, in degrees.
pub const MERCATOR_MAX_LAT: f64 = 85.051_128_779_806_59;

/// Mercator projection scaled and translated so a lon/lat box fills the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MercatorFit {
    scale: f64,
    translate_x: f64,
    translate_y: f64,
}

impl MercatorFit {
    /// Fit the box spanned by `lon` x `lat` (degrees) into `[0, w] x [0, h]` with uniform scale,
    /// centered along the axis with slack.
    pub fn fit(lon: Extent, lat: Extent, canvas: Canvas) -> Self {
        let lon = lon.widened();
        let lat = Extent {
            min: clamp_lat(lat.min),
            max: clamp_lat(lat.max),
        }
        .widened();

        let x0 = lon.min.to_radians();
        let x1 = lon.max.to_radians();
        // Screen y grows downward, so north maps to the smaller value.
        let y0 = -mercator_y(lat.max);
        let y1 = -mercator_y(lat.min);

        let w = canvas.width_f64();
        let h = canvas.height_f64();
        let scale = (w / (x1 - x0)).min(h / (y1 - y0));
        Self {
            scale,
            translate_x: (w - scale * (x0 + x1)) / 2.0,
            translate_y: (h - scale * (y0 + y1)) / 2.0,
        }
    }

    pub fn project(&self, lon: f64, lat: f64) -> Point {
        Point::new(
            self.scale * lon.to_radians() + self.translate_x,
            self.translate_y - self.scale * mercator_y(clamp_lat(lat)),
        )
    }
}

fn clamp_lat(lat: f64) -> f64 {
    lat.clamp(-MERCATOR_MAX_LAT, MERCATOR_MAX_LAT)
}

fn mercator_y(lat_deg: f64) -> f64 {
    (FRAC_PI_4 + lat_deg.to_radians() / 2.0).tan().ln()
}

/// Project every record into the canvas, then compress by [`GEO_DISPLAY_SCALE`].
///
/// Records without finite coordinates land on the projected center of the data extent.
#[tracing::instrument(skip(table), fields(records = table.len()))]
pub fn geo_layout(table: &RecordTable, canvas: Canvas) -> Vec<Point> {
    let records = table.records();
    let located = || records.iter().filter(|r| r.has_coordinates());
    let lon = Extent::of(located().map(|r| r.lon)).unwrap_or_else(Extent::unit);
    let lat = Extent::of(located().map(|r| r.lat)).unwrap_or_else(Extent::unit);

    let projection = MercatorFit::fit(lon, lat, canvas);
    let fallback = projection.project(lon.center(), lat.center());

    let mut unlocated = 0usize;
    let positions = records
        .iter()
        .map(|r| {
            let p = if r.has_coordinates() {
                projection.project(r.lon, r.lat)
            } else {
                unlocated += 1;
                fallback
            };
            Point::new(p.x * GEO_DISPLAY_SCALE, p.y * GEO_DISPLAY_SCALE)
        })
        .collect();

    if unlocated > 0 {
        tracing::debug!(records = unlocated, "placed records without coordinates at extent center");
    }
    positions
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geo.rs"]
mod tests;
