use clap::{Parser, Subcommand};
use gallery_lightbox::lightbox::Lightbox;
use gallery_lightbox::{config, manifest, output, script};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gallery-lightbox")]
#[command(about = "Gallery layout classification and modal lightbox replay")]
#[command(long_about = "\
Gallery layout classification and modal lightbox replay

The gallery manifest describes a page: its entries in document order and the
overlay element the lightbox opens into.

  {
    \"entries\": [
      { \"media\": \"public/gallery/1.png\", \"width\": 800, \"height\": 600, \"alt\": \"Harbour\" },
      { \"media\": \"public/gallery/2.jpg\", \"video\": \"https://www.youtube.com/embed/abc\" }
    ],
    \"overlay\": { \"bounds\": { \"x\": 100, \"y\": 50, \"width\": 800, \"height\": 600 } }
  }

Layout classes:
  tall   height > width
  wide   width > 2 × height
  (none) standard ratio, or a dimension is 0/unknown

Replay scripts list one event per line:
  click entry 0
  key ArrowRight
  click overlay 20 20     # outside the content box closes
  click close
  key Escape

Set RUST_LOG=gallery_lightbox=debug to trace every event.
Run 'gallery-lightbox gen-config' to print a documented lightbox.toml.")]
#[command(version)]
struct Cli {
    /// Gallery manifest (JSON)
    #[arg(long, default_value = "gallery.json", global = true)]
    gallery: PathBuf,

    /// Lightbox config (TOML); stock defaults when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify gallery entries and print their layout classes
    Classify,
    /// Validate the manifest and config without running anything
    Check,
    /// Run a script of events through the lightbox
    Replay {
        /// Event script, one event per line
        script: PathBuf,
        /// Print the final page as HTML
        #[arg(long)]
        html: bool,
    },
    /// Print a stock lightbox.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive("gallery_lightbox=warn".parse()?)
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Classify => {
            let config = config::load_config(cli.config.as_deref())?;
            let manifest = manifest::load_manifest(&cli.gallery)?;
            let mut lightbox = Lightbox::new(manifest.into_page(), config);
            lightbox.ready();
            output::print_classify_output(lightbox.page(), &lightbox.config().classes);
        }
        Command::Check => {
            println!("==> Checking {}", cli.gallery.display());
            config::load_config(cli.config.as_deref())?;
            if let Some(path) = &cli.config {
                println!("Config: {} (valid)", path.display());
            }
            let manifest = manifest::load_manifest(&cli.gallery)?;
            output::print_check_output(&manifest);
            println!("==> Manifest is valid");
        }
        Command::Replay { script, html } => {
            let config = config::load_config(cli.config.as_deref())?;
            let manifest = manifest::load_manifest(&cli.gallery)?;
            let steps = script::load_script(&script)?;

            let mut lightbox = Lightbox::new(manifest.into_page(), config);
            lightbox.ready();
            println!("==> Ready: {}", output::format_snapshot(&lightbox.snapshot()));
            for step in &steps {
                lightbox.dispatch(step.event.clone());
                output::print_step(step, &lightbox.snapshot());
            }
            if html {
                println!("{}", lightbox.render().into_string());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
