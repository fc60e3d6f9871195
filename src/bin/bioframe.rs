use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bioframe", version)]
struct Cli {
    /// Engine configuration JSON. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scale an embed to a container width.
    Scale(ScaleArgs),
    /// Print frame geometry and CSS for a frame type.
    Frame(FrameArgs),
    /// Print the preview remount key and URL for a profile.
    PreviewKey(ProfileArgs),
    /// Walk the icon fallback chain for a link.
    Icon(IconArgs),
    /// Render a whole profile for one viewport.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct ScaleArgs {
    /// Container width in CSS pixels.
    #[arg(long)]
    width: f64,

    #[arg(long, value_enum, default_value_t = Viewport::Mobile)]
    viewport: Viewport,

    /// Provider name as stored on the link (`YouTube`, `spotify`, ...).
    #[arg(long)]
    provider: Option<String>,

    /// File holding the raw embed markup.
    #[arg(long = "html")]
    html_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Frame type (`circle`, `pentagon`, `heart`, ...).
    #[arg(long = "type")]
    frame_type: String,

    /// Frame colour, `#RGB` or `#RRGGBB`.
    #[arg(long, default_value = "#000000")]
    color: String,
}

#[derive(Parser, Debug)]
struct ProfileArgs {
    /// Input profile JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct IconArgs {
    /// Link URL the icon represents.
    #[arg(long)]
    url: String,

    /// Configured icon size in pixels.
    #[arg(long, default_value_t = 32)]
    size: u32,

    #[arg(long, default_value = "#000000")]
    color: String,

    /// Number of consecutive load failures to simulate.
    #[arg(long, default_value_t = 0)]
    failures: u32,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input profile JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[arg(long, value_enum, default_value_t = Viewport::Mobile)]
    viewport: Viewport,

    /// Container width in CSS pixels.
    #[arg(long, default_value_t = 390.0)]
    width: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Viewport {
    Mobile,
    Tablet,
    Desktop,
}

impl From<Viewport> for bioframe::ViewportClass {
    fn from(value: Viewport) -> Self {
        match value {
            Viewport::Mobile => Self::Mobile,
            Viewport::Tablet => Self::Tablet,
            Viewport::Desktop => Self::Desktop,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bioframe=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Scale(args) => cmd_scale(args, &cfg),
        Command::Frame(args) => cmd_frame(args),
        Command::PreviewKey(args) => cmd_preview_key(args, &cfg),
        Command::Icon(args) => cmd_icon(args, &cfg),
        Command::Render(args) => cmd_render(args, &cfg),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<bioframe::EngineConfig> {
    match path {
        Some(p) => bioframe::EngineConfig::from_path(p)
            .with_context(|| format!("load engine config '{}'", p.display())),
        None => Ok(bioframe::EngineConfig::default()),
    }
}

fn read_profile(path: &Path) -> anyhow::Result<bioframe::ProfileDocument> {
    bioframe::ProfileDocument::from_path(path)
        .with_context(|| format!("load profile '{}'", path.display()))
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize output JSON")?;
    println!("{s}");
    Ok(())
}

fn cmd_scale(args: ScaleArgs, cfg: &bioframe::EngineConfig) -> anyhow::Result<()> {
    let html = match &args.html_path {
        Some(p) => Some(
            fs::read_to_string(p).with_context(|| format!("read embed markup '{}'", p.display()))?,
        ),
        None => None,
    };
    let provider = bioframe::resolve_provider(args.provider.as_deref());
    let result = bioframe::compute_scaling(
        bioframe::ScalingInput {
            container_width_px: args.width,
            raw_embed_html: html.as_deref(),
            provider_id: provider.provider_id,
            viewport_class: args.viewport.into(),
        },
        &cfg.scaling,
    );
    print_json(&serde_json::json!({
        "providerId": provider.provider_id,
        "containerClassName": provider.container_class_name,
        "scaling": result,
    }))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let spec = bioframe::FrameSpec {
        frame_type: bioframe::FrameType::parse(&args.frame_type)?,
        color_hex: bioframe::HexColor::parse(&args.color)?,
    };
    let style = bioframe::FrameStyle::for_spec(&spec);
    print_json(&serde_json::json!({
        "frameType": spec.frame_type,
        "css": style.to_css(),
        "style": style,
    }))
}

fn cmd_preview_key(args: ProfileArgs, cfg: &bioframe::EngineConfig) -> anyhow::Result<()> {
    let doc = read_profile(&args.in_path)?;
    let key = bioframe::PreviewSyncKey::derive(&doc.settings.layout());
    let src = bioframe::preview_url(&cfg.preview.base_url, &doc.username)?;
    print_json(&serde_json::json!({ "key": key, "src": src }))
}

fn cmd_icon(args: IconArgs, cfg: &bioframe::EngineConfig) -> anyhow::Result<()> {
    let color = bioframe::HexColor::parse(&args.color)?;
    let mut state = bioframe::RetryState::new(args.size);
    let mut attempts = Vec::new();
    let mut exhausted = false;
    for _ in 0..args.failures {
        let source = bioframe::resolve_icon_src(&state, &args.url, &color, &cfg.icon);
        attempts.push(source.src);
        match source.on_error {
            bioframe::IconTransition::Retry { next, .. } => state = next,
            bioframe::IconTransition::GiveUp { next } => {
                state = next;
                exhausted = true;
                break;
            }
            bioframe::IconTransition::Exhausted => {
                exhausted = true;
                break;
            }
        }
    }
    let current = bioframe::resolve_icon_src(&state, &args.url, &color, &cfg.icon);
    print_json(&serde_json::json!({
        "failedSources": attempts,
        "state": state,
        "src": current.src,
        "exhausted": exhausted,
    }))
}

fn cmd_render(args: RenderArgs, cfg: &bioframe::EngineConfig) -> anyhow::Result<()> {
    let doc = read_profile(&args.in_path)?;
    let out = bioframe::render_profile(&doc, args.viewport.into(), args.width, cfg)?;
    print_json(&out)
}
