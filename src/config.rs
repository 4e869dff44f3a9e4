use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    animation::{
        animator::{Animator, DEFAULT_POINT_SIZE},
        ease::Ease,
        pointset::Timing,
    },
    color::ramp::ColorRamp,
    data::{load::CoordinateColumns, table::RecordTable},
    foundation::{
        core::{Canvas, Fps},
        error::{ScatterError, ScatterResult},
    },
    layout::LayoutSpec,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Complete run configuration, read from JSON. Every section is optional.
pub struct AppConfig {
    /// Where the records come from.
    pub input: InputConfig,
    /// Output canvas dimensions.
    pub canvas: Canvas,
    /// Transition timing and drawing.
    pub animation: AnimationConfig,
    /// Layouts in cycle order.
    pub layouts: Vec<LayoutSpec>,
    /// Color ramps in cycle order, advanced once per transition.
    pub ramps: Vec<ColorRamp>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            canvas: Canvas {
                width: 1280,
                height: 720,
            },
            animation: AnimationConfig::default(),
            layouts: LayoutSpec::default_cycle(),
            ramps: ColorRamp::ALL.to_vec(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// CSV file; relative paths resolve against the working directory.
    pub csv: Option<PathBuf>,
    #[serde(flatten)]
    pub columns: CoordinateColumns,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    pub fps: Fps,
    /// Per-point travel time.
    pub duration_ms: f64,
    /// Total stagger, spread evenly over all points.
    pub stagger_total_ms: f64,
    /// Pause after the last point arrives.
    pub hold_ms: f64,
    pub ease: Ease,
    /// Disc diameter in pixels.
    pub point_size: f32,
    /// Send every point back to the center when the cycle wraps. On by default.
    pub collapse_on_wrap: bool,
    /// Seed for lightness jitter.
    pub seed: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fps: Fps { num: 60, den: 1 },
            duration_ms: Timing::DEFAULT_DURATION_MS,
            stagger_total_ms: Timing::DEFAULT_STAGGER_TOTAL_MS,
            hold_ms: Timing::DEFAULT_HOLD_MS,
            ease: Ease::Linear,
            point_size: DEFAULT_POINT_SIZE,
            collapse_on_wrap: true,
            seed: 0,
        }
    }
}

impl AppConfig {
    #[tracing::instrument]
    pub fn load_from_file(path: &Path) -> ScatterResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            ScatterError::serde(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> ScatterResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ScatterError::validation("canvas width/height must be > 0"));
        }
        let anim = &self.animation;
        if anim.fps.num == 0 || anim.fps.den == 0 {
            return Err(ScatterError::validation("fps must have num>0 and den>0"));
        }
        if !anim.duration_ms.is_finite() || anim.duration_ms <= 0.0 {
            return Err(ScatterError::validation(
                "animation.duration_ms must be finite and > 0",
            ));
        }
        for (name, value) in [
            ("stagger_total_ms", anim.stagger_total_ms),
            ("hold_ms", anim.hold_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScatterError::validation(format!(
                    "animation.{name} must be finite and >= 0",
                )));
            }
        }
        if !anim.point_size.is_finite() || anim.point_size <= 0.0 {
            return Err(ScatterError::validation(
                "animation.point_size must be finite and > 0",
            ));
        }
        if self.layouts.is_empty() {
            return Err(ScatterError::validation("layouts must not be empty"));
        }
        if self.ramps.is_empty() {
            return Err(ScatterError::validation("ramps must not be empty"));
        }
        Ok(())
    }

    pub fn csv_path(&self) -> ScatterResult<&Path> {
        self.input
            .csv
            .as_deref()
            .ok_or_else(|| ScatterError::validation("no input CSV configured (input.csv)"))
    }

    pub fn timing(&self, points: usize) -> Timing {
        Timing::for_points(
            self.animation.duration_ms,
            self.animation.stagger_total_ms,
            self.animation.hold_ms,
            self.animation.ease,
            points,
        )
    }

    /// Resolve every layout against `table` and build the animator for it.
    pub fn animator(&self, table: &RecordTable) -> ScatterResult<Animator> {
        self.validate()?;
        let layouts = self
            .layouts
            .iter()
            .map(|spec| spec.resolve(table))
            .collect::<ScatterResult<Vec<_>>>()?;
        let canvas = Canvas::new(self.canvas.width, self.canvas.height)?;
        let fps = Fps::new(self.animation.fps.num, self.animation.fps.den)?;
        Ok(Animator::new(
            layouts,
            self.ramps.clone(),
            canvas,
            fps,
            self.timing(table.len()),
        )?
        .with_point_size(self.animation.point_size)
        .with_collapse_on_wrap(self.animation.collapse_on_wrap))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
