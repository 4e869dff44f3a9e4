use std::{io::BufRead as _, path::PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use scatterflow::{
    AnimationState, AppConfig, AutoTrigger, Canvas, CpuRenderer, DrawParams, FfmpegSink, Fps,
    FrameIndex, FrameRGBA, PngSequenceSink, PointRenderer, PointSet, RecordTable, ScatterResult,
    Trigger, TriggerSource, load_records,
    render::cpu::{BACKGROUND, rasterize},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scatterflow", version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// JSON configuration file. Defaults apply to anything it leaves out.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Input CSV (overrides input.csv).
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    /// Canvas width in pixels (overrides canvas.width).
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Canvas height in pixels (overrides canvas.height).
    #[arg(long, global = true)]
    height: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute one layout and write its positions and colors as JSON.
    Layout(LayoutArgs),
    /// Render a single frame of the continuous run as a PNG.
    Frame(FrameArgs),
    /// Render a continuous run to a PNG sequence or an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Advance to the next layout on every line read from stdin; frames go to a PNG sequence.
    Interactive(InteractiveArgs),
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Position in the configured layout cycle (0-based).
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Frame index (0-based) in the continuous run.
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Output directory (png) or file (mp4).
    #[arg(long)]
    out: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
    format: OutputFormat,

    /// Number of transitions; one full layout cycle when omitted.
    #[arg(long)]
    transitions: Option<u64>,
}

#[derive(Parser, Debug)]
struct InteractiveArgs {
    /// Output directory for the PNG sequence.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Png,
    Mp4,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = resolve_config(&cli.common)?;
    match cli.cmd {
        Command::Layout(args) => cmd_layout(&cfg, args),
        Command::Frame(args) => cmd_frame(&cfg, args),
        Command::Render(args) => cmd_render(&cfg, args),
        Command::Interactive(args) => cmd_interactive(&cfg, args),
    }
}

fn resolve_config(common: &CommonArgs) -> anyhow::Result<AppConfig> {
    let mut cfg = match &common.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(csv) = &common.csv {
        cfg.input.csv = Some(csv.clone());
    }
    if let Some(width) = common.width {
        cfg.canvas.width = width;
    }
    if let Some(height) = common.height {
        cfg.canvas.height = height;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn load_table(cfg: &AppConfig) -> anyhow::Result<RecordTable> {
    let path = cfg.csv_path()?;
    let table = load_records(path, &cfg.input.columns)
        .with_context(|| format!("load records from '{}'", path.display()))?;
    Ok(table)
}

fn cmd_layout(cfg: &AppConfig, args: LayoutArgs) -> anyhow::Result<()> {
    let table = load_table(cfg)?;
    let spec = cfg.layouts.get(args.index).with_context(|| {
        format!(
            "layout index {} out of range ({} configured)",
            args.index,
            cfg.layouts.len()
        )
    })?;
    let layout = spec.resolve(&table)?;
    let canvas = Canvas::new(cfg.canvas.width, cfg.canvas.height)?;
    let ramp = cfg.ramps[args.index % cfg.ramps.len()];
    let prior = PointSet::centered(table.len(), canvas).end_positions();
    let mut state = AnimationState::new(cfg.animation.seed);
    let arrangement = layout.arrange(&table, canvas, &prior, ramp, &mut state.rng);

    match &args.out {
        Some(out) => {
            scatterflow::encode::ensure_parent_dir(out)?;
            let f = std::fs::File::create(out)
                .with_context(|| format!("create '{}'", out.display()))?;
            serde_json::to_writer_pretty(f, &arrangement).context("write arrangement JSON")?;
            tracing::info!(layout = layout.name(), out = %out.display(), "wrote layout");
        }
        None => {
            let stdout = std::io::stdout();
            serde_json::to_writer_pretty(stdout.lock(), &arrangement)
                .context("write arrangement JSON")?;
            println!();
        }
    }
    Ok(())
}

/// Rasterizes only the requested frame.
struct CaptureRenderer {
    target: FrameIndex,
    captured: Option<FrameRGBA>,
}

impl PointRenderer for CaptureRenderer {
    fn begin(&mut self, _canvas: Canvas, _fps: Fps) -> ScatterResult<()> {
        self.captured = None;
        Ok(())
    }

    fn draw(&mut self, params: &DrawParams<'_>) -> ScatterResult<()> {
        if params.frame == self.target {
            self.captured = Some(rasterize(params, BACKGROUND)?);
        }
        Ok(())
    }

    fn finish(&mut self) -> ScatterResult<()> {
        Ok(())
    }
}

fn cmd_frame(cfg: &AppConfig, args: FrameArgs) -> anyhow::Result<()> {
    let table = load_table(cfg)?;
    let animator = cfg.animator(&table)?;
    let per_transition = animator.frames_per_transition(table.len());
    let transitions = args.frame / per_transition + 1;

    let mut points = PointSet::centered(table.len(), animator.canvas());
    let mut capture = CaptureRenderer {
        target: FrameIndex(args.frame),
        captured: None,
    };
    animator.run(
        &table,
        &mut points,
        AnimationState::new(cfg.animation.seed),
        &mut AutoTrigger::limited(transitions),
        &mut capture,
    )?;

    let frame = capture
        .captured
        .with_context(|| format!("frame {} was not reached", args.frame))?;
    scatterflow::encode::png::write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(cfg: &AppConfig, args: RenderArgs) -> anyhow::Result<()> {
    let table = load_table(cfg)?;
    let animator = cfg.animator(&table)?;
    let transitions = args
        .transitions
        .unwrap_or(animator.layouts().len() as u64);
    let mut trigger = AutoTrigger::limited(transitions);

    tracing::info!(
        records = table.len(),
        transitions,
        format = ?args.format,
        "rendering"
    );
    let stats = match args.format {
        OutputFormat::Png => {
            let mut renderer = CpuRenderer::new(PngSequenceSink::new(&args.out));
            run(cfg, &table, &animator, &mut trigger, &mut renderer)?
        }
        OutputFormat::Mp4 => {
            let mut renderer = CpuRenderer::new(FfmpegSink::new(&args.out, true));
            run(cfg, &table, &animator, &mut trigger, &mut renderer)?
        }
    };
    tracing::info!(frames = stats.frames, "render finished");
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_interactive(cfg: &AppConfig, args: InteractiveArgs) -> anyhow::Result<()> {
    let table = load_table(cfg)?;
    let animator = cfg.animator(&table)?;
    let (tx, mut trigger) = scatterflow::animation::trigger::channel();

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let t = match line.trim() {
                "q" | "quit" => Trigger::Stop,
                _ => Trigger::Advance,
            };
            if tx.send(t).is_err() || t == Trigger::Stop {
                break;
            }
        }
    });

    eprintln!("press enter to advance, 'q' or EOF to stop");
    let mut renderer = CpuRenderer::new(PngSequenceSink::new(&args.out));
    let stats = run(cfg, &table, &animator, &mut trigger, &mut renderer)?;
    tracing::info!(
        transitions = stats.transitions,
        interruptions = stats.interruptions,
        frames = stats.frames,
        "interactive session finished"
    );
    Ok(())
}

fn run(
    cfg: &AppConfig,
    table: &RecordTable,
    animator: &scatterflow::Animator,
    trigger: &mut dyn TriggerSource,
    renderer: &mut dyn PointRenderer,
) -> anyhow::Result<scatterflow::RunStats> {
    let mut points = PointSet::centered(table.len(), animator.canvas());
    let (_, stats) = animator.run(
        table,
        &mut points,
        AnimationState::new(cfg.animation.seed),
        trigger,
        renderer,
    )?;
    Ok(stats)
}
