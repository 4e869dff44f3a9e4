use crate::foundation::{
    core::{Canvas, Fps, FrameIndex},
    error::ScatterResult,
};

/// One rendered frame. RGBA8, row-major, straight alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRGBA {
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y as usize * self.width as usize + x as usize) * 4;
        self.data
            .get(at..at + 4)
            .and_then(|px| <[u8; 4]>::try_from(px).ok())
    }
}

/// Everything a renderer needs for one frame.
///
/// `positions` holds `x, y, 0` per point and `colors` holds `r, g, b` per point, both already
/// interpolated for `frame`.
#[derive(Clone, Copy, Debug)]
pub struct DrawParams<'a> {
    pub positions: &'a [f32],
    pub colors: &'a [f32],
    pub canvas: Canvas,
    pub point_size: f32,
    pub duration_ms: f64,
    pub delay_by_index_ms: f64,
    pub frame: FrameIndex,
}

/// Frame consumer driven by the animator: `begin` once, `draw` per frame, `finish` once.
pub trait PointRenderer {
    fn begin(&mut self, canvas: Canvas, fps: Fps) -> ScatterResult<()>;
    fn draw(&mut self, params: &DrawParams<'_>) -> ScatterResult<()>;
    fn finish(&mut self) -> ScatterResult<()>;
}
