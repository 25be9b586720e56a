mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cropframe", about = "Pan, zoom and crop an image into a fixed viewport")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image size and its cover-fit placement
    Info(commands::info::InfoArgs),
    /// Crop an image and emit the form value, a JPEG file, or an upload
    Crop(commands::crop::CropArgs),
    /// Print or save the default widget config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Crop(args) => commands::crop::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_crop_accepts_negative_pan() {
        let cli = Cli::try_parse_from([
            "cropframe",
            "crop",
            "photo.png",
            "--pan",
            "-40,-10",
            "--zoom-in",
            "3",
        ])
        .unwrap();
        let Commands::Crop(args) = cli.command else {
            panic!("expected crop subcommand");
        };
        let pan = args.pan.unwrap();
        assert_eq!((pan.dx, pan.dy), (-40.0, -10.0));
        assert_eq!(args.zoom_in, 3);
    }
}
