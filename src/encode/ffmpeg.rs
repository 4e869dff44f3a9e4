use std::{
    io::Write as _,
    path::PathBuf,
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::{
    encode::{
        ensure_parent_dir,
        sink::{FrameSink, SinkConfig},
    },
    foundation::{
        core::FrameIndex,
        error::{ScatterError, ScatterResult},
    },
    render::backend::FrameRGBA,
};

/// yuv420p output needs even dimensions.
pub fn validate_mp4_size(width: u32, height: u32) -> ScatterResult<()> {
    if width == 0 || height == 0 {
        return Err(ScatterError::validation(
            "encode width/height must be non-zero",
        ));
    }
    if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
        return Err(ScatterError::validation(
            "encode width/height must be even (required for yuv420p mp4 output)",
        ));
    }
    Ok(())
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

struct Encoder {
    child: Child,
    stdin: ChildStdin,
    cfg: SinkConfig,
}

/// Pipes raw RGBA frames into the system `ffmpeg` to produce an H.264 MP4.
pub struct FfmpegSink {
    out_path: PathBuf,
    overwrite: bool,
    encoder: Option<Encoder>,
    frames: u64,
}

impl std::fmt::Debug for FfmpegSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FfmpegSink")
            .field("out_path", &self.out_path)
            .field("overwrite", &self.overwrite)
            .field("running", &self.encoder.is_some())
            .field("frames", &self.frames)
            .finish()
    }
}

impl FfmpegSink {
    pub fn new(out_path: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite,
            encoder: None,
            frames: 0,
        }
    }

    fn spawn(&self, cfg: SinkConfig) -> ScatterResult<Encoder> {
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .arg(if self.overwrite { "-y" } else { "-n" })
            .args([
                "-loglevel",
                "error",
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgba",
                "-s",
                &format!("{}x{}", cfg.width, cfg.height),
                "-r",
                &format!("{}/{}", cfg.fps.num, cfg.fps.den),
                "-i",
                "pipe:0",
                "-an",
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "-movflags",
                "+faststart",
            ])
            .arg(&self.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            ScatterError::render(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ScatterError::render("failed to open ffmpeg stdin"))?;
        Ok(Encoder { child, stdin, cfg })
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> ScatterResult<()> {
        validate_mp4_size(cfg.width, cfg.height)?;
        ensure_parent_dir(&self.out_path)?;
        if !self.overwrite && self.out_path.exists() {
            return Err(ScatterError::validation(format!(
                "output file '{}' already exists",
                self.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(ScatterError::render(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }
        self.encoder = Some(self.spawn(cfg)?);
        self.frames = 0;
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &FrameRGBA) -> ScatterResult<()> {
        let Some(enc) = self.encoder.as_mut() else {
            return Err(ScatterError::render("ffmpeg sink is not running"));
        };
        if frame.width != enc.cfg.width || frame.height != enc.cfg.height {
            return Err(ScatterError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, enc.cfg.width, enc.cfg.height
            )));
        }
        enc.stdin.write_all(&frame.data).map_err(|e| {
            ScatterError::render(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        self.frames += 1;
        Ok(())
    }

    fn end(&mut self) -> ScatterResult<()> {
        let Some(Encoder { child, stdin, .. }) = self.encoder.take() else {
            return Ok(());
        };
        drop(stdin);

        let output = child.wait_with_output().map_err(|e| {
            ScatterError::render(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScatterError::render(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        tracing::info!(
            frames = self.frames,
            out = %self.out_path.display(),
            "encoded mp4"
        );
        Ok(())
    }
}
