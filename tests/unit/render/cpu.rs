use super::*;
use crate::{encode::sink::InMemorySink, foundation::core::FrameIndex};

fn params<'a>(positions: &'a [f32], colors: &'a [f32], point_size: f32) -> DrawParams<'a> {
    DrawParams {
        positions,
        colors,
        canvas: Canvas::new(20, 20).unwrap(),
        point_size,
        duration_ms: 1500.0,
        delay_by_index_ms: 0.0,
        frame: FrameIndex(0),
    }
}

#[test]
fn empty_frame_is_background() {
    let frame = rasterize(&params(&[], &[], 4.0), BACKGROUND).unwrap();
    assert_eq!(frame.data.len(), 20 * 20 * 4);
    assert!(frame.data.chunks_exact(4).all(|px| px == BACKGROUND));
}

#[test]
fn disc_covers_its_center_only() {
    let frame = rasterize(&params(&[10.0, 10.0, 0.0], &[1.0, 0.0, 0.0], 6.0), BACKGROUND).unwrap();
    let center = frame.pixel(10, 10).unwrap();
    assert!(center[0] >= 250 && center[1] <= 5 && center[2] <= 5, "{center:?}");
    assert_eq!(center[3], 255);
    assert_eq!(frame.pixel(0, 0).unwrap(), BACKGROUND);
    assert_eq!(frame.pixel(19, 10).unwrap(), BACKGROUND);
}

#[test]
fn non_finite_points_are_skipped() {
    let frame = rasterize(
        &params(&[f32::NAN, 5.0, 0.0], &[1.0, 1.0, 1.0], 40.0),
        BACKGROUND,
    )
    .unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == BACKGROUND));
}

#[test]
fn renderer_forwards_frames_to_sink() {
    let mut r = CpuRenderer::new(InMemorySink::new());
    let canvas = Canvas::new(20, 20).unwrap();
    r.begin(canvas, Fps::new(30, 1).unwrap()).unwrap();
    let pos = [4.0, 4.0, 0.0];
    let col = [0.0, 1.0, 0.0];
    for i in 0..3 {
        let mut p = params(&pos, &col, 2.0);
        p.frame = FrameIndex(i);
        r.draw(&p).unwrap();
    }
    r.finish().unwrap();
    assert_eq!(r.frames_drawn(), 3);

    let sink = r.into_sink();
    assert!(sink.is_ended());
    assert_eq!(sink.config().unwrap().width, 20);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2]);
}

#[test]
fn oversized_canvas_is_a_render_error() {
    let mut r = CpuRenderer::new(InMemorySink::new());
    let canvas = Canvas::new(70_000, 10).unwrap();
    assert!(r.begin(canvas, Fps::new(30, 1).unwrap()).is_err());
}
