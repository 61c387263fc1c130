//! Command line entrypoint: renders the Camino deck to a PDF

use std::path::PathBuf;

use anyhow::{Context, Result};
use camino_deck::{camino, DeckConfig, MissingAssetPolicy};
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "camino-deck", about = "Render the Camino de Santiago slide deck")]
struct Cli {
    /// Directory holding the slide images (01.jpg ... 30.jpg)
    #[arg(long, value_name = "DIR", env = "CAMINO_IMAGES", default_value = "img")]
    images: PathBuf,

    /// CJK-capable font file (TTF, OTF or TTC)
    #[arg(long, value_name = "FILE", env = "CAMINO_FONT")]
    font: PathBuf,

    /// Bold font file; bold is synthesised when omitted
    #[arg(long, value_name = "FILE", env = "CAMINO_BOLD_FONT")]
    bold_font: Option<PathBuf>,

    /// Face index inside a font collection
    #[arg(long, value_name = "N", default_value_t = 0)]
    font_index: u32,

    /// Output PDF
    #[arg(short, long, value_name = "FILE", default_value = "朝聖之路.pdf")]
    output: PathBuf,

    /// Leave out images that are missing or unreadable instead of failing
    #[arg(long)]
    skip_missing: bool,

    /// Also write a JSON summary of the deck
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // RUST_LOG wins over -v
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directives = match verbosity {
                0 => "info",
                1 => "info,camino_deck=debug,pdf_core=debug",
                _ => "trace",
            };
            EnvFilter::try_new(directives).context("building log filter")?
        }
    };
    fmt().with_env_filter(filter).with_target(false).init();
    Ok(())
}

impl Cli {
    fn into_config(self) -> DeckConfig {
        let policy = if self.skip_missing {
            MissingAssetPolicy::Skip
        } else {
            MissingAssetPolicy::Abort
        };
        let mut config =
            DeckConfig::new(self.images, self.font, self.output).with_missing_assets(policy);
        config.bold_font = self.bold_font;
        config.font_index = self.font_index;
        config.summary = self.summary;
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = cli
        .into_config()
        .validated()
        .context("validating configuration")?;

    let summary = camino::render(&config)
        .with_context(|| format!("rendering {}", config.output.display()))?;

    if !summary.skipped_assets.is_empty() {
        info!(
            "Skipped {} missing image(s): {}",
            summary.skipped_assets.len(),
            summary.skipped_assets.join(", ")
        );
    }

    if let Some(path) = &config.summary {
        summary
            .write_json(path)
            .with_context(|| format!("writing summary to {}", path.display()))?;
        info!("Summary written to: {}", path.display());
    }
    Ok(())
}
