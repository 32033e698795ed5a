use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use egui::Color32;
use inscribe::error::{ConfigError, DigitizeError, ExportError};
use inscribe::export::{DEFAULT_FILE_STEM, DirectoryExporter, ExportPayload, ExportSink};
use inscribe::svg::parse_hex_color;
use inscribe::{DigitizeConfig, InscriptionSession, RasterImage};

/// Trace the ink in a scanned inscription into SVG line art
#[derive(Parser, Debug)]
#[command(name = "inscribe", version)]
#[command(about = "Trace inscriptions from raster images into SVG", long_about = None)]
struct Args {
    /// Input image (any format the image crate decodes)
    image: PathBuf,

    /// Luminance below which a pixel counts as ink (overrides the config file)
    #[arg(short, long)]
    threshold: Option<u8>,

    /// Output SVG path [default: the image path with an .svg extension]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Background fill as #rrggbb
    #[arg(long, value_parser = parse_background)]
    background: Option<Color32>,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_background(raw: &str) -> Result<Color32, String> {
    parse_hex_color(raw).ok_or_else(|| format!("expected #rrggbb, got {raw:?}"))
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Digitize(#[from] DigitizeError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl Args {
    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.image.with_extension("svg"))
    }

    fn load_config(&self) -> Result<DigitizeConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => DigitizeConfig::load(path)?,
            None => DigitizeConfig::default(),
        };
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if self.background.is_some() {
            config.background = self.background;
        }
        Ok(config)
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = args.load_config()?;
    let bytes = std::fs::read(&args.image).map_err(|source| CliError::Read {
        path: args.image.clone(),
        source,
    })?;
    let image = RasterImage::decode(&bytes)?;

    let mut session = InscriptionSession::new(config);
    session.digitize(&image)?;
    let artifact = session.artifact()?;

    let output = args.output_path();
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut payload = ExportPayload::svg(&artifact, None)?;
    payload.filename = file_name(&output);
    DirectoryExporter::new(dir).deliver(&payload)?;

    println!("{} ({} paths)", output.display(), artifact.path_count);
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("{DEFAULT_FILE_STEM}.svg"))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("inscribe: {err}");
            ExitCode::FAILURE
        }
    }
}
