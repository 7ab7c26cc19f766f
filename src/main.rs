use anyhow::Context as _;
use clap::{ArgAction, Parser};
use lanternpost::card::{CardSession, RenderConfig};
use lanternpost::config::Config;
use lanternpost::export::{self, LinkOpener, PrintOpener, ShareOutcome, SystemOpener, Unavailable};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "lanternpost")]
#[command(version, about = "Festive greeting card renderer")]
struct Cli {
    /// Name written on the card
    #[arg(long, short = 'n', value_name = "NAME")]
    name: String,

    /// Directory the card is written to (defaults to [export].output_dir, then the current directory)
    #[arg(long, short = 'o', value_name = "DIR")]
    output: Option<PathBuf>,

    /// Device pixel ratio, capped at 2.0
    #[arg(long, value_name = "RATIO")]
    scale: Option<f64>,

    /// Share the card after saving it
    #[arg(long, action = ArgAction::SetTrue)]
    share: bool,

    /// Print the share fallback link instead of opening it
    #[arg(long, action = ArgAction::SetTrue, requires = "share")]
    print_link: bool,

    /// Config file to use instead of ~/.config/lanternpost/config.toml
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let mut render_config = RenderConfig::from_config(&config);
    if let Some(scale) = cli.scale {
        render_config = render_config.with_device_scale(scale);
    }

    let session =
        CardSession::new(Arc::new(render_config)).context("Failed to allocate card surface")?;
    let name = session.generate(&cli.name).await?;

    let output_dir = export::file::resolve_output_dir(&config.export, cli.output.as_deref());
    let path = {
        let renderer = session.renderer();
        export::download_card(&renderer, &config.export, &output_dir)
            .with_context(|| format!("Failed to save card for '{}'", name))?
    };
    println!("{}", path.display());

    if cli.share {
        let image = export::share::capture_image(&session.renderer())?;
        let system = SystemOpener::default();
        let opener: &dyn LinkOpener = if cli.print_link {
            &PrintOpener
        } else {
            &system
        };
        let outcome = export::share_card(
            image,
            &name,
            &config.share,
            &config.export.filename_prefix,
            &Unavailable,
            opener,
        )
        .await
        .context("Failed to share card")?;

        match outcome {
            ShareOutcome::Native => log::info!("Card shared"),
            ShareOutcome::Fallback { url } => log::info!("Share link: {}", url),
        }
    }

    Ok(())
}
