use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thumbfit::config::{self, StrategyKind, ThumbfitConfig};
use thumbfit::imaging::RustEngine;
use thumbfit::strategy::Strategy;
use thumbfit::{ImageProcessingStrategy, batch, output};
use tracing_subscriber::EnvFilter;

/// Strategy overrides shared by the commands that process images.
///
/// Dimensions are signed and unchecked here; out-of-range values are
/// reported by the strategy itself.
#[derive(clap::Args, Clone)]
struct StrategyArgs {
    /// Fitting strategy (overrides config)
    #[arg(long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Target width in pixels (overrides config)
    #[arg(long, allow_negative_numbers = true)]
    width: Option<i32>,

    /// Target height in pixels (overrides config)
    #[arg(long, allow_negative_numbers = true)]
    height: Option<i32>,

    /// Inscribe canvas color, e.g. "none", "#fff", "rgba(0,0,0,0.5)" (overrides config)
    #[arg(long)]
    background: Option<String>,
}

impl StrategyArgs {
    fn apply(self, config: &mut ThumbfitConfig) {
        if let Some(kind) = self.strategy {
            config.strategy.kind = kind;
        }
        if let Some(width) = self.width {
            config.strategy.width = width;
        }
        if let Some(height) = self.height {
            config.strategy.height = height;
        }
        if let Some(background) = self.background {
            config.strategy.background = background;
        }
    }
}

#[derive(Parser)]
#[command(name = "thumbfit")]
#[command(about = "Fit images into a bounding box to make thumbnails")]
#[command(long_about = "\
Fit images into a bounding box to make thumbnails

Strategies:

  resize    Scale to fit within WIDTHxHEIGHT, keeping the aspect ratio.
            One side may come out smaller than the box.
  inscribe  Scale the same way, then center on a WIDTHxHEIGHT canvas
            filled with --background (\"none\" for transparent).

The output keeps the input's format (JPEG in, JPEG out).

Settings come from thumbfit.toml when present; flags override it.
Run 'thumbfit gen-config' to generate a documented thumbfit.toml.
Set RUST_LOG=thumbfit=debug to trace each pipeline step.")]
#[command(version)]
struct Cli {
    /// Config file (ignored if missing)
    #[arg(long, default_value = "thumbfit.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Make a thumbnail from a single image
    Process {
        /// Source image
        input: PathBuf,
        /// Where to write the thumbnail
        output: PathBuf,
        #[command(flatten)]
        strategy: StrategyArgs,
    },
    /// Make thumbnails for every image under a directory
    Batch {
        /// Directory to read images from
        #[arg(long)]
        source: PathBuf,
        /// Directory to write thumbnails to, mirroring the source layout
        #[arg(long)]
        output: PathBuf,
        #[command(flatten)]
        strategy: StrategyArgs,
    },
    /// Print a stock thumbfit.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Process {
            input,
            output: output_path,
            strategy,
        } => {
            let config = resolve_config(&cli.config, strategy)?;
            let processor = build_strategy(&config);

            let data = std::fs::read(&input)?;
            let thumbnail = processor.process(&data)?;
            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output_path, &thumbnail)?;

            output::print_process_output(
                &input,
                &output_path,
                processor.name(),
                config.strategy.width,
                config.strategy.height,
                data.len(),
                thumbnail.len(),
            );
        }
        Command::Batch {
            source,
            output: output_dir,
            strategy,
        } => {
            let config = resolve_config(&cli.config, strategy)?;
            init_thread_pool(&config.processing);
            let processor = build_strategy(&config);

            let report = batch::process_directory(&processor, &source, &output_dir)?;
            output::print_batch_report(&report);
            if !report.is_success() {
                return Err(format!("{} of {} images failed", report.failed.len(), report.total()).into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config file (or stock defaults) and apply command-line overrides.
fn resolve_config(
    path: &std::path::Path,
    overrides: StrategyArgs,
) -> Result<ThumbfitConfig, config::ConfigError> {
    let mut config = config::load_config(path)?;
    overrides.apply(&mut config);
    Ok(config)
}

fn build_strategy(config: &ThumbfitConfig) -> Strategy {
    let engine = RustEngine::with_quality(config.encoding.quality());
    Strategy::from_config(&config.strategy, engine)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
