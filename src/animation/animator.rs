use rand::{SeedableRng, rngs::StdRng};

use crate::{
    animation::{
        pointset::{PointSet, Timing},
        trigger::{Trigger, TriggerSource},
    },
    color::ramp::ColorRamp,
    data::table::RecordTable,
    foundation::{
        core::{Canvas, Fps, FrameIndex, Rgb},
        error::{ScatterError, ScatterResult},
    },
    layout::Layout,
    render::backend::{DrawParams, PointRenderer},
};

/// Default point sprite diameter in pixels.
pub const DEFAULT_POINT_SIZE: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning { started: FrameIndex },
}

/// Mutable bookkeeping of a run, threaded through every animator step.
#[derive(Clone, Debug)]
pub struct AnimationState {
    pub phase: Phase,
    /// Layout used by the next transition to start.
    pub layout_index: usize,
    pub ramp_index: usize,
    pub transitions_started: u64,
    /// Source of the per-point lightness jitter.
    pub rng: StdRng,
}

impl AnimationState {
    pub fn new(seed: u64) -> Self {
        Self {
            phase: Phase::Idle,
            layout_index: 0,
            ramp_index: 0,
            transitions_started: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Running,
    Completed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub transitions: u64,
    pub interruptions: u64,
    pub frames: u64,
}

/// Cycles points through a fixed list of layouts, one color ramp per transition.
#[derive(Clone, Debug)]
pub struct Animator {
    layouts: Vec<Layout>,
    ramps: Vec<ColorRamp>,
    canvas: Canvas,
    fps: Fps,
    timing: Timing,
    point_size: f32,
    collapse_on_wrap: bool,
}

impl Animator {
    pub fn new(
        layouts: Vec<Layout>,
        ramps: Vec<ColorRamp>,
        canvas: Canvas,
        fps: Fps,
        timing: Timing,
    ) -> ScatterResult<Self> {
        if layouts.is_empty() {
            return Err(ScatterError::validation("animator needs at least one layout"));
        }
        if ramps.is_empty() {
            return Err(ScatterError::validation(
                "animator needs at least one color ramp",
            ));
        }
        if timing.duration_ms.is_nan() || timing.duration_ms <= 0.0 {
            return Err(ScatterError::validation("transition duration must be > 0"));
        }
        if [timing.delay_by_index_ms, timing.hold_ms]
            .iter()
            .any(|v| v.is_nan() || *v < 0.0)
        {
            return Err(ScatterError::validation(
                "stagger and hold must be non-negative",
            ));
        }
        Ok(Self {
            layouts,
            ramps,
            canvas,
            fps,
            timing,
            point_size: DEFAULT_POINT_SIZE,
            collapse_on_wrap: true,
        })
    }

    pub fn with_point_size(mut self, point_size: f32) -> Self {
        self.point_size = point_size;
        self
    }

    pub fn with_collapse_on_wrap(mut self, collapse: bool) -> Self {
        self.collapse_on_wrap = collapse;
        self
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    /// Frames drawn per uninterrupted transition over `n` points, hold included.
    pub fn frames_per_transition(&self, n: usize) -> u64 {
        let total = self.timing.total_ms(n);
        let mut frames = self.fps.ms_to_frames_ceil(total);
        while self.fps.frames_to_ms(frames) <= total {
            frames += 1;
        }
        while frames > 1 && self.fps.frames_to_ms(frames - 1) > total {
            frames -= 1;
        }
        frames
    }

    /// Snapshot the current targets as start states and aim every point at the next layout.
    #[tracing::instrument(skip(self, table, points, state), fields(layout = state.layout_index))]
    pub fn begin_transition(
        &self,
        table: &RecordTable,
        points: &mut PointSet,
        mut state: AnimationState,
        now: FrameIndex,
    ) -> ScatterResult<AnimationState> {
        let layout = self.layouts[state.layout_index % self.layouts.len()];
        let ramp = self.ramps[state.ramp_index % self.ramps.len()];

        points.snapshot_end_as_start();
        let target = layout.arrange(
            table,
            self.canvas,
            &points.end_positions(),
            ramp,
            &mut state.rng,
        );
        points.retarget(&target)?;

        state.phase = Phase::Transitioning { started: now };
        state.transitions_started += 1;
        tracing::debug!(
            layout = layout.name(),
            ramp = ?ramp,
            points = points.len(),
            frame = now.0,
            "transition started"
        );
        Ok(state)
    }

    /// Milliseconds since the running transition started; `None` when idle.
    pub fn elapsed_ms(&self, state: &AnimationState, now: FrameIndex) -> Option<f64> {
        match state.phase {
            Phase::Idle => None,
            Phase::Transitioning { started } => {
                Some(self.fps.frames_to_ms(now.frames_since(started)))
            }
        }
    }

    /// Complete the transition once its full duration, stagger and hold have elapsed.
    pub fn tick(
        &self,
        points: &mut PointSet,
        mut state: AnimationState,
        now: FrameIndex,
    ) -> (AnimationState, TickOutcome) {
        let Some(elapsed) = self.elapsed_ms(&state, now) else {
            return (state, TickOutcome::Idle);
        };
        if elapsed <= self.timing.total_ms(points.len()) {
            return (state, TickOutcome::Running);
        }
        points.settle();
        self.advance(points, &mut state);
        state.phase = Phase::Idle;
        (state, TickOutcome::Completed)
    }

    /// A trigger arrived mid-transition: move on and start the next transition at `now`.
    pub fn interrupt(
        &self,
        table: &RecordTable,
        points: &mut PointSet,
        mut state: AnimationState,
        now: FrameIndex,
    ) -> ScatterResult<AnimationState> {
        if matches!(state.phase, Phase::Transitioning { .. }) {
            self.advance(points, &mut state);
        }
        self.begin_transition(table, points, state, now)
    }

    fn advance(&self, points: &mut PointSet, state: &mut AnimationState) {
        state.layout_index = (state.layout_index + 1) % self.layouts.len();
        state.ramp_index = (state.ramp_index + 1) % self.ramps.len();
        if self.collapse_on_wrap && state.layout_index == 0 {
            points.collapse_to(self.canvas.center(), Rgb::BLACK);
        }
    }

    /// Interpolate every point for `now` and hand the buffers to `renderer`.
    pub fn draw_frame(
        &self,
        points: &PointSet,
        state: &AnimationState,
        now: FrameIndex,
        renderer: &mut dyn PointRenderer,
        buffers: &mut FrameBuffers,
    ) -> ScatterResult<()> {
        let elapsed = self
            .elapsed_ms(state, now)
            .unwrap_or_else(|| self.timing.total_ms(points.len()));
        points.interpolate_into(
            &self.timing,
            elapsed,
            &mut buffers.positions,
            &mut buffers.colors,
        );
        renderer.draw(&DrawParams {
            positions: &buffers.positions,
            colors: &buffers.colors,
            canvas: self.canvas,
            point_size: self.point_size,
            duration_ms: self.timing.duration_ms,
            delay_by_index_ms: self.timing.delay_by_index_ms,
            frame: now,
        })
    }

    /// Drive transitions until `trigger` stops.
    ///
    /// Frames are only produced while a transition runs; frame indices are continuous across
    /// transitions.
    pub fn run(
        &self,
        table: &RecordTable,
        points: &mut PointSet,
        mut state: AnimationState,
        trigger: &mut dyn TriggerSource,
        renderer: &mut dyn PointRenderer,
    ) -> ScatterResult<(AnimationState, RunStats)> {
        if points.len() != table.len() {
            return Err(ScatterError::animation(format!(
                "{} points for {} records",
                points.len(),
                table.len()
            )));
        }

        renderer.begin(self.canvas, self.fps)?;
        let mut stats = RunStats::default();
        let mut buffers = FrameBuffers::default();
        let mut now = FrameIndex(0);
        let mut stopping = false;

        while !stopping && trigger.wait() == Trigger::Advance {
            state = self.begin_transition(table, points, state, now)?;
            stats.transitions += 1;

            loop {
                match trigger.poll() {
                    Some(Trigger::Advance) => {
                        state = self.interrupt(table, points, state, now)?;
                        stats.transitions += 1;
                        stats.interruptions += 1;
                    }
                    Some(Trigger::Stop) => stopping = true,
                    None => {}
                }

                self.draw_frame(points, &state, now, renderer, &mut buffers)?;
                stats.frames += 1;
                now = now.next();

                let (next, outcome) = self.tick(points, state, now);
                state = next;
                if stopping || outcome == TickOutcome::Completed {
                    break;
                }
            }
        }

        renderer.finish()?;
        tracing::debug!(
            transitions = stats.transitions,
            interruptions = stats.interruptions,
            frames = stats.frames,
            "animation run finished"
        );
        Ok((state, stats))
    }
}

/// Reused flat draw buffers.
#[derive(Clone, Debug, Default)]
pub struct FrameBuffers {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
}

#[cfg(test)]
#[path = "../../tests/unit/animation/animator.rs"]
mod tests;
