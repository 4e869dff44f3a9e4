use crate::{
    animation::ease::Ease,
    foundation::{
        core::{Canvas, Point, Rgb},
        error::{ScatterError, ScatterResult},
    },
    layout::Arrangement,
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(
            <f64 as Lerp>::lerp(&a.x, &b.x, t),
            <f64 as Lerp>::lerp(&a.y, &b.y, t),
        )
    }
}

impl Lerp for Rgb {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Rgb::new(
            <f64 as Lerp>::lerp(&a.r, &b.r, t),
            <f64 as Lerp>::lerp(&a.g, &b.g, t),
            <f64 as Lerp>::lerp(&a.b, &b.b, t),
        )
    }
}

/// Per-transition timing. Point `i` starts moving `delay_by_index_ms * i` after the
/// transition begins and arrives `duration_ms` later.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    pub duration_ms: f64,
    pub delay_by_index_ms: f64,
    pub hold_ms: f64,
    pub ease: Ease,
}

impl Timing {
    pub const DEFAULT_DURATION_MS: f64 = 1500.0;
    pub const DEFAULT_STAGGER_TOTAL_MS: f64 = 500.0;
    pub const DEFAULT_HOLD_MS: f64 = 100.0;

    /// Spread `stagger_total_ms` evenly over `n` points.
    pub fn for_points(
        duration_ms: f64,
        stagger_total_ms: f64,
        hold_ms: f64,
        ease: Ease,
        n: usize,
    ) -> Self {
        let delay_by_index_ms = if n == 0 {
            0.0
        } else {
            stagger_total_ms / n as f64
        };
        Self {
            duration_ms,
            delay_by_index_ms,
            hold_ms,
            ease,
        }
    }

    /// Eased progress of point `index` at `elapsed_ms`, in `[0, 1]`.
    pub fn progress(&self, index: usize, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let local = elapsed_ms - self.delay_by_index_ms * index as f64;
        self.ease.apply((local / self.duration_ms).clamp(0.0, 1.0))
    }

    /// Elapsed time after which a transition over `n` points is complete, hold included.
    pub fn total_ms(&self, n: usize) -> f64 {
        self.duration_ms + self.delay_by_index_ms * n as f64 + self.hold_ms
    }
}

/// Start and end state of one point for the current transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointState {
    pub start_pos: Point,
    pub end_pos: Point,
    pub start_color: Rgb,
    pub end_color: Rgb,
}

impl PointState {
    pub fn at_rest(pos: Point, color: Rgb) -> Self {
        Self {
            start_pos: pos,
            end_pos: pos,
            start_color: color,
            end_color: color,
        }
    }

    pub fn sample(&self, t: f64) -> (Point, Rgb) {
        (
            <Point as Lerp>::lerp(&self.start_pos, &self.end_pos, t),
            <Rgb as Lerp>::lerp(&self.start_color, &self.end_color, t),
        )
    }
}

/// One point per record, index-aligned with the record table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    points: Vec<PointState>,
}

impl PointSet {
    /// `n` black points resting at the canvas center.
    pub fn centered(n: usize, canvas: Canvas) -> Self {
        Self {
            points: vec![PointState::at_rest(canvas.center(), Rgb::BLACK); n],
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PointState] {
        &self.points
    }

    pub fn end_positions(&self) -> Vec<Point> {
        self.points.iter().map(|p| p.end_pos).collect()
    }

    /// Copy every end state into its start state.
    pub fn snapshot_end_as_start(&mut self) {
        for p in &mut self.points {
            p.start_pos = p.end_pos;
            p.start_color = p.end_color;
        }
    }

    /// Set new end states. Start states are left untouched.
    pub fn retarget(&mut self, target: &Arrangement) -> ScatterResult<()> {
        if target.positions.len() != self.points.len() || target.colors.len() != self.points.len()
        {
            return Err(ScatterError::animation(format!(
                "arrangement has {} positions and {} colors for {} points",
                target.positions.len(),
                target.colors.len(),
                self.points.len()
            )));
        }
        for ((p, pos), color) in self
            .points
            .iter_mut()
            .zip(&target.positions)
            .zip(&target.colors)
        {
            p.end_pos = *pos;
            p.end_color = *color;
        }
        Ok(())
    }

    /// Finish the transition: start and end coincide.
    pub fn settle(&mut self) {
        self.snapshot_end_as_start();
    }

    /// Put every point at rest on `pos` with `color`.
    pub fn collapse_to(&mut self, pos: Point, color: Rgb) {
        for p in &mut self.points {
            *p = PointState::at_rest(pos, color);
        }
    }

    /// Fill flat draw buffers: `x, y, 0` and `r, g, b` per point.
    pub fn interpolate_into(
        &self,
        timing: &Timing,
        elapsed_ms: f64,
        positions: &mut Vec<f32>,
        colors: &mut Vec<f32>,
    ) {
        positions.clear();
        colors.clear();
        positions.reserve(self.points.len() * 3);
        colors.reserve(self.points.len() * 3);
        for (i, p) in self.points.iter().enumerate() {
            let (pos, color) = p.sample(timing.progress(i, elapsed_ms));
            positions.extend_from_slice(&[pos.x as f32, pos.y as f32, 0.0]);
            colors.extend_from_slice(&[color.r as f32, color.g as f32, color.b as f32]);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/pointset.rs"]
mod tests;
