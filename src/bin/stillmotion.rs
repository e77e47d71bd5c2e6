use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use stillmotion::{
    AnimationKind, CancelToken, ExportEvent, ExportSettings, Exporter, Family, InMemoryBackend,
    OutputFormat, RealTimeClock, RenderRequest, Resolution, SimulatedClock, SourceImage,
    SourcePaint, Surface, compute_transform, load_source_image,
};

#[derive(Parser, Debug)]
#[command(name = "stillmotion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Animate an image and write `animation.<ext>` (video formats require `ffmpeg` on PATH).
    Export(ExportArgs),
    /// List every animation tag, grouped by family.
    List,
    /// Render a single sampled frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Load the whole request from a JSON file instead of flags.
    #[arg(long, conflicts_with_all = ["image", "animation", "resolution", "duration", "format"])]
    request: Option<PathBuf>,

    /// Source image.
    #[arg(long, required_unless_present = "request")]
    image: Option<PathBuf>,

    /// Animation tag (see `stillmotion list`). Unknown tags fall back to `scaleIn`.
    #[arg(long, default_value = "scaleIn")]
    animation: String,

    /// Aspect preset: 1:1, 9:16 or 16:9.
    #[arg(long, default_value = "1:1")]
    resolution: Resolution,

    /// Seconds per animation cycle, within [0.5, 5].
    #[arg(long, default_value_t = 2.0)]
    duration: f64,

    /// Output format: webm, mp4, gif or webp.
    #[arg(long, default_value = "webm")]
    format: OutputFormat,

    /// Directory receiving `animation.<ext>`.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Background color as `RRGGBB` hex.
    #[arg(long, default_value = "ffffff", value_parser = parse_hex_rgb)]
    background: [u8; 4],

    /// Give up loading the image after this many seconds.
    #[arg(long, default_value_t = 30.0)]
    load_timeout: f64,

    /// Use in-memory encoders and a simulated clock; writes frame digests instead of media.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Source image.
    #[arg(long)]
    image: PathBuf,

    /// Animation tag.
    #[arg(long, default_value = "scaleIn")]
    animation: String,

    /// Aspect preset: 1:1, 9:16 or 16:9.
    #[arg(long, default_value = "1:1")]
    resolution: Resolution,

    /// Position within the cycle, wrapped into [0, 1).
    #[arg(long, default_value_t = 0.5)]
    progress: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::List => cmd_list(),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let request = match (&args.request, &args.image) {
        (Some(path), _) => RenderRequest::from_path(path)?,
        (None, Some(image)) => RenderRequest {
            source: SourceImage::path(image),
            animation: AnimationKind::from_tag_or_default(&args.animation),
            resolution: args.resolution,
            cycle_duration_secs: args.duration,
            format: args.format,
        },
        (None, None) => anyhow::bail!("either --request or --image is required"),
    };

    if !args.load_timeout.is_finite() || args.load_timeout <= 0.0 {
        anyhow::bail!("--load-timeout must be a positive number of seconds");
    }
    let settings = ExportSettings {
        background_rgba: args.background,
        load_timeout: Duration::from_secs_f64(args.load_timeout),
        ..ExportSettings::default()
    };

    let mut observer = |e: &ExportEvent| match e {
        ExportEvent::Started { format } => eprintln!("exporting {format}..."),
        ExportEvent::Completed { file_name, bytes } => eprintln!("done: {file_name} ({bytes} bytes)"),
        ExportEvent::Failed { cause } => eprintln!("failed: {cause}"),
    };
    let cancel = CancelToken::new();

    let report = if args.dry_run {
        Exporter::new(InMemoryBackend::all()).export(
            &request,
            &settings,
            &mut SimulatedClock::new(),
            &cancel,
            &mut observer,
        )?
    } else {
        Exporter::system().export(
            &request,
            &settings,
            &mut RealTimeClock::new(),
            &cancel,
            &mut observer,
        )?
    };

    if let Some(sub) = report.substitution {
        eprintln!("note: {} unavailable, encoded with {}", sub.requested, sub.used);
    }
    let path = report.artifact.save_in(&args.out_dir)?;
    eprintln!(
        "wrote {} ({} frames, {})",
        path.display(),
        report.frames_encoded,
        report.codec
    );
    Ok(())
}

fn cmd_list() -> anyhow::Result<()> {
    let mut current: Option<Family> = None;
    for kind in AnimationKind::ALL {
        if current != Some(kind.family()) {
            current = Some(kind.family());
            println!("{}:", kind.family().label());
        }
        println!("  {:<20} {}", kind.tag(), kind.label());
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let kind = AnimationKind::from_tag_or_default(&args.animation);
    let settings = ExportSettings::default();
    let decoded = load_source_image(&SourceImage::path(&args.image), settings.load_timeout)?;
    let paint = SourcePaint::from_decoded(&decoded)?;
    let canvas = args.resolution.canvas();
    let mut surface = Surface::new(canvas, settings.background_rgba)?;

    let transform = compute_transform(
        kind,
        args.progress,
        f64::from(canvas.width),
        f64::from(canvas.height),
    );
    let frame = surface.compose(&transform, &paint);

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn parse_hex_rgb(s: &str) -> Result<[u8; 4], String> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("expected RRGGBB, got '{s}'"));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("bad hex color '{s}': {e}"))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?, 255])
}
