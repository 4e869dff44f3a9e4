use super::*;
use crate::foundation::core::Fps;

fn out_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("scatterflow-tests")
        .join(name)
}

#[test]
fn writes_one_file_per_frame() {
    let dir = out_dir("png_sequence");
    let _ = std::fs::remove_dir_all(&dir);
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(SinkConfig {
        width: 4,
        height: 3,
        fps: Fps::new(30, 1).unwrap(),
    })
    .unwrap();
    let frame = FrameRGBA::filled(4, 3, [10, 20, 30, 255]);
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    sink.push_frame(FrameIndex(7), &frame).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written(), 2);
    assert!(dir.join("frame_00000.png").exists());
    let img = image::open(dir.join("frame_00007.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 3));
    assert_eq!(img.get_pixel(2, 1).0, [10, 20, 30, 255]);
}

#[test]
fn rejects_frames_of_the_wrong_size() {
    let dir = out_dir("png_mismatch");
    let mut sink = PngSequenceSink::new(&dir);
    assert!(
        sink.push_frame(FrameIndex(0), &FrameRGBA::filled(1, 1, [0; 4]))
            .is_err()
    );
    sink.begin(SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
    })
    .unwrap();
    assert!(
        sink.push_frame(FrameIndex(0), &FrameRGBA::filled(3, 2, [0; 4]))
            .is_err()
    );
}
