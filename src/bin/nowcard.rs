use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nowcard", version)]
struct Cli {
    /// Renderer config JSON. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one card and print its path.
    Render(RenderArgs),
    /// List available profile names.
    Profiles,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Track JSON; individual flags override its fields.
    #[arg(long)]
    track: Option<PathBuf>,

    #[arg(long)]
    id: Option<String>,

    #[arg(long)]
    title: Option<String>,

    /// Channel name drawn as the artist line.
    #[arg(long)]
    artist: Option<String>,

    /// Display duration such as `3:45`.
    #[arg(long)]
    duration: Option<String>,

    /// Artwork URL.
    #[arg(long)]
    thumbnail: Option<String>,

    #[arg(long, default_value = nowcard::BOLD)]
    profile: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => nowcard::RenderConfig::from_path(path)?,
        None => nowcard::RenderConfig::default(),
    };
    match cli.cmd {
        Command::Render(args) => cmd_render(config, args).await,
        Command::Profiles => cmd_profiles(&config),
    }
}

async fn cmd_render(config: nowcard::RenderConfig, args: RenderArgs) -> anyhow::Result<()> {
    let track = build_track(&args)?;
    let renderer = nowcard::CardRenderer::from_config(config)?;
    let path = renderer.generate(&track, &args.profile).await;
    println!("{}", path.display());
    Ok(())
}

fn cmd_profiles(config: &nowcard::RenderConfig) -> anyhow::Result<()> {
    let table = config.profile_table()?;
    for name in table.names() {
        println!("{name}");
    }
    Ok(())
}

fn build_track(args: &RenderArgs) -> anyhow::Result<nowcard::Track> {
    let mut track = match &args.track {
        Some(path) => {
            let f =
                File::open(path).with_context(|| format!("open track '{}'", path.display()))?;
            serde_json::from_reader(BufReader::new(f))
                .with_context(|| format!("parse track JSON '{}'", path.display()))?
        }
        None => nowcard::Track::default(),
    };

    if let Some(id) = &args.id {
        track.id = id.clone();
    }
    if let Some(title) = &args.title {
        track.title = title.clone();
    }
    if let Some(artist) = &args.artist {
        track.channel_name = artist.clone();
    }
    if let Some(duration) = &args.duration {
        track.duration = Some(duration.clone());
    }
    if let Some(thumbnail) = &args.thumbnail {
        track.thumbnail = thumbnail.clone();
    }
    if track.id.trim().is_empty() {
        anyhow::bail!("a track id is required (--id or --track)");
    }
    Ok(track)
}
