use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "maskpaint", version)]
struct Cli {
    /// Log verbosity on stderr (`-v` info, `-vv` debug, `-vvv` trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a strokes script over an image and write the mask PNG.
    Mask(MaskArgs),
    /// Print the inpainting request JSON for an image, mask and prompt.
    Request(RequestArgs),
}

#[derive(Parser, Debug)]
struct MaskArgs {
    /// Input image (file path, `file://`, or data URI).
    #[arg(long)]
    image: String,

    /// Strokes script JSON.
    #[arg(long)]
    strokes: PathBuf,

    /// Output mask PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Optional composited preview PNG path.
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Editor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rendered display size (`WIDTHxHEIGHT`) the stroke points are expressed in.
    #[arg(long)]
    display: Option<String>,
}

#[derive(Parser, Debug)]
struct RequestArgs {
    /// Input image (file path, `file://`, data URI, or URL).
    #[arg(long)]
    image: String,

    /// Mask PNG path.
    #[arg(long)]
    mask: PathBuf,

    /// Text prompt.
    #[arg(long)]
    prompt: String,

    #[arg(long)]
    negative_prompt: Option<String>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    steps: Option<u32>,

    #[arg(long)]
    guidance: Option<f64>,

    #[arg(long)]
    strength: Option<f64>,

    #[arg(long)]
    num_images: Option<u32>,

    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    #[arg(long, value_enum)]
    acceleration: Option<AccelerationChoice>,

    /// Preset name (`square_hd`, `landscape_16_9`, ...) or `WIDTHxHEIGHT`.
    #[arg(long)]
    image_size: Option<maskpaint::ImageSize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Jpeg,
    Png,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AccelerationChoice {
    None,
    Regular,
    High,
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct StrokeScript {
    strokes: Vec<ScriptStroke>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptStroke {
    #[serde(default)]
    radius: Option<u32>,
    #[serde(default)]
    mode: Option<maskpaint::BrushMode>,
    points: Vec<[f64; 2]>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Mask(args) => cmd_mask(args),
        Command::Request(args) => cmd_request(args),
    }
}

fn read_strokes_json(path: &Path) -> anyhow::Result<StrokeScript> {
    let f = File::open(path).with_context(|| format!("open strokes '{}'", path.display()))?;
    let script: StrokeScript =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse strokes JSON")?;
    Ok(script)
}

fn parse_display(s: &str) -> anyhow::Result<maskpaint::DisplayRect> {
    let (w, h) = s
        .trim()
        .split_once(['x', 'X'])
        .with_context(|| format!("display must be WIDTHxHEIGHT (got '{s}')"))?;
    let w: f64 = w.parse().with_context(|| format!("display width '{w}'"))?;
    let h: f64 = h.parse().with_context(|| format!("display height '{h}'"))?;
    Ok(maskpaint::DisplayRect::from_size(w, h))
}

fn cmd_mask(args: MaskArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(p) => maskpaint::EditorConfig::from_path(p)?,
        None => maskpaint::EditorConfig::default(),
    };
    let script = read_strokes_json(&args.strokes)?;

    let mut session = maskpaint::EditorSession::new(&config)?;
    session.load_image(&maskpaint::ImageRef::parse(&args.image))?;
    if let Some(display) = &args.display {
        session.set_display(parse_display(display)?)?;
    }

    let base = session.brush();
    for stroke in &script.strokes {
        session.set_brush(maskpaint::BrushConfig {
            radius: stroke.radius.unwrap_or(base.radius),
            mode: stroke.mode.unwrap_or(base.mode),
        })?;
        let points: Vec<maskpaint::Point> = stroke
            .points
            .iter()
            .map(|&[x, y]| maskpaint::Point::new(x, y))
            .collect();
        session.replay_stroke(&points);
    }

    let mask = session
        .get_mask()?
        .context("no mask after loading the image")?;
    write_file(&args.out, &mask.png)?;
    eprintln!("wrote {}", args.out.display());

    if let Some(preview) = &args.preview {
        let frame = match session.flush()? {
            Some(frame) => frame,
            None => session.render_now()?.context("no frame to preview")?,
        };
        write_file(preview, &maskpaint::encode_frame_png(&frame)?)?;
        eprintln!("wrote {}", preview.display());
    }

    let stats = session.scheduler_stats();
    tracing::info!(
        strokes = script.strokes.len(),
        composites = stats.fired,
        coalesced = stats.coalesced,
        "mask written"
    );
    Ok(())
}

fn cmd_request(args: RequestArgs) -> anyhow::Result<()> {
    let image_url = image_url_for(&args.image)?;
    let mask_png = std::fs::read(&args.mask)
        .with_context(|| format!("read mask '{}'", args.mask.display()))?;
    maskpaint::decode_mask_png(&mask_png)?;
    let mask_url = maskpaint::encode_data_uri("image/png", &mask_png);

    let params = maskpaint::InpaintParams {
        negative_prompt: args.negative_prompt,
        image_size: args.image_size,
        num_inference_steps: args.steps,
        guidance_scale: args.guidance,
        strength: args.strength,
        seed: args.seed,
        num_images: args.num_images,
        enable_safety_checker: None,
        output_format: args.format.map(|f| match f {
            FormatChoice::Jpeg => maskpaint::OutputFormat::Jpeg,
            FormatChoice::Png => maskpaint::OutputFormat::Png,
        }),
        acceleration: args.acceleration.map(|a| match a {
            AccelerationChoice::None => maskpaint::Acceleration::None,
            AccelerationChoice::Regular => maskpaint::Acceleration::Regular,
            AccelerationChoice::High => maskpaint::Acceleration::High,
        }),
    };

    let request = maskpaint::InpaintRequest::new(image_url, mask_url, &args.prompt, params)?;
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

fn image_url_for(arg: &str) -> anyhow::Result<String> {
    match maskpaint::ImageRef::parse(arg) {
        maskpaint::ImageRef::DataUri(uri) => Ok(uri),
        maskpaint::ImageRef::Url(url) => Ok(url),
        other => {
            let bytes = maskpaint::load_image_bytes(&other, None)?;
            let mime = image::guess_format(&bytes)
                .with_context(|| format!("unrecognized image format: {}", other.describe()))?
                .to_mime_type();
            Ok(maskpaint::encode_data_uri(mime, &bytes))
        }
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}
