use vello_cpu::kurbo::Shape as _;

use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::{
        core::{Canvas, Fps},
        error::{ScatterError, ScatterResult},
    },
    render::backend::{DrawParams, FrameRGBA, PointRenderer},
};

/// Opaque black, the backdrop every frame starts from.
pub const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

const CIRCLE_TOLERANCE: f64 = 0.1;

fn surface_size(canvas: Canvas) -> ScatterResult<(u16, u16)> {
    let width: u16 = canvas
        .width
        .try_into()
        .map_err(|_| ScatterError::render("canvas width exceeds u16"))?;
    let height: u16 = canvas
        .height
        .try_into()
        .map_err(|_| ScatterError::render("canvas height exceeds u16"))?;
    Ok((width, height))
}

fn channel_u8(c: f32) -> u8 {
    if c.is_nan() {
        return 0;
    }
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Draw every point as a filled disc over `background`.
///
/// Discs are never smaller than one pixel across. Points with non-finite coordinates are
/// skipped.
pub fn rasterize(params: &DrawParams<'_>, background: [u8; 4]) -> ScatterResult<FrameRGBA> {
    let (width, height) = surface_size(params.canvas)?;
    let mut ctx = vello_cpu::RenderContext::new(width, height);

    let [r, g, b, a] = background;
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(width),
        f64::from(height),
    ));

    let radius = f64::from(params.point_size.max(1.0)) / 2.0;
    for (pos, color) in params
        .positions
        .chunks_exact(3)
        .zip(params.colors.chunks_exact(3))
    {
        let (x, y) = (f64::from(pos[0]), f64::from(pos[1]));
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            channel_u8(color[0]),
            channel_u8(color[1]),
            channel_u8(color[2]),
            255,
        ));
        let disc = vello_cpu::kurbo::Circle::new((x, y), radius).to_path(CIRCLE_TOLERANCE);
        ctx.fill_path(&disc);
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);

    Ok(FrameRGBA {
        width: params.canvas.width,
        height: params.canvas.height,
        data: pixmap.data_as_u8_slice().to_vec(),
    })
}

/// Rasterizes on the CPU and hands each frame to a [`FrameSink`].
#[derive(Debug)]
pub struct CpuRenderer<S> {
    sink: S,
    background: [u8; 4],
    frames: u64,
}

impl<S: FrameSink> CpuRenderer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            background: BACKGROUND,
            frames: 0,
        }
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: FrameSink> PointRenderer for CpuRenderer<S> {
    fn begin(&mut self, canvas: Canvas, fps: Fps) -> ScatterResult<()> {
        surface_size(canvas)?;
        self.frames = 0;
        self.sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps,
        })
    }

    fn draw(&mut self, params: &DrawParams<'_>) -> ScatterResult<()> {
        let frame = rasterize(params, self.background)?;
        self.sink.push_frame(params.frame, &frame)?;
        self.frames += 1;
        Ok(())
    }

    fn finish(&mut self) -> ScatterResult<()> {
        tracing::debug!(frames = self.frames, "cpu renderer finished");
        self.sink.end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
