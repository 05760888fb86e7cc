//! `stickyphrases` CLI: export words to `stickyphrases.svg`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};
use thiserror::Error;

use stickyphrases_fonts::{FontData, FontError, FontProvider, MemoryFontRegistry};
use stickyphrases_svg::{
    DEFAULT_FAMILY_LABEL, ExportOptions, ExportRequest, TextMode, export_text_to_svg_with,
};

/// Name the bundled fallback font is registered under.
const BUNDLED_FAMILY: &str = "monospace";

#[derive(Parser)]
#[command(version, about = "Export words to a StickyPhrases SVG")]
struct Cli {
    /// Words to export, in order
    words: Vec<String>,

    /// Font weight of each word, comma-separated (e.g. 400,700)
    #[arg(short, long, value_delimiter = ',')]
    weights: Vec<f64>,

    /// Font size of every word
    #[arg(short = 's', long, default_value_t = 48.0)]
    font_size: f64,

    /// Stylesheet URL that defines the font
    #[arg(long, default_value = "")]
    font_url: String,

    /// Font family to make available before export
    #[arg(long)]
    family: Option<String>,

    /// `font-family` written on each <text> element
    #[arg(long, default_value = DEFAULT_FAMILY_LABEL)]
    family_label: String,

    /// Font file (.ttf, .otf) used to measure words and draw outlines
    #[arg(long, value_name = "PATH")]
    font_file: Option<PathBuf>,

    /// Measure words with real glyph advances instead of the estimate
    #[arg(long)]
    measure: bool,

    /// Leave font-weight off words that have no weight, instead of
    /// writing "undefined"
    #[arg(long)]
    omit_missing_weights: bool,

    /// How words are written: "text" (default) or "outlines"
    #[arg(long, default_value = "text", value_parser = parse_text_mode)]
    text_mode: TextMode,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read font file {}: {source}", path.display())]
    ReadFont { path: PathBuf, source: io::Error },
    #[error("cannot load font file {}: {source}", path.display())]
    LoadFont { path: PathBuf, source: FontError },
    #[error("font initialization failed: {0}")]
    Fonts(#[from] FontError),
    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

fn parse_text_mode(s: &str) -> Result<TextMode, String> {
    match s.to_lowercase().as_str() {
        "text" => Ok(TextMode::Text),
        "outlines" => Ok(TextMode::Outlines),
        _ => Err(format!(
            "unknown text mode \"{s}\": expected \"text\" or \"outlines\""
        )),
    }
}

/// Family name a font file is registered under: `--family` if given,
/// otherwise the file stem.
fn font_file_family(cli: &Cli, path: &Path) -> String {
    cli.family.clone().unwrap_or_else(|| {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("font")
            .to_owned()
    })
}

/// Registry with the bundled fonts plus `--font-file`, and the family to
/// measure with, if any.
///
/// Words are measured only with `--measure` or `--text-mode outlines`;
/// `--font-file` alone picks which font that is.
fn build_registry(cli: &Cli) -> Result<(MemoryFontRegistry, Option<String>), CliError> {
    let mut registry = MemoryFontRegistry::with_embedded()?;
    let wants_font = cli.measure || cli.text_mode == TextMode::Outlines;

    let mut family = wants_font.then(|| BUNDLED_FAMILY.to_owned());
    if let Some(path) = &cli.font_file {
        let bytes = fs::read(path).map_err(|source| CliError::ReadFont {
            path: path.clone(),
            source,
        })?;
        let file_family = font_file_family(cli, path);
        registry
            .load_font(&file_family, bytes)
            .map_err(|source| CliError::LoadFont {
                path: path.clone(),
                source,
            })?;
        if wants_font {
            family = Some(file_family);
        }
    }

    Ok((registry, family))
}

fn run(cli: &Cli) -> Result<PathBuf, CliError> {
    if cli.weights.len() != cli.words.len() {
        let fallback = if cli.omit_missing_weights {
            "none"
        } else {
            "\"undefined\""
        };
        warn!(
            "{} words but {} weights; words without a weight get {fallback}",
            cli.words.len(),
            cli.weights.len()
        );
    }

    let (registry, metrics_family) = build_registry(cli)?;
    let metrics_font: Option<&FontData> = metrics_family.as_deref().and_then(|f| registry.font(f));

    let request = ExportRequest {
        words: cli.words.clone(),
        font_url: cli.font_url.clone(),
        weights: cli.weights.clone(),
        base_font_size: cli.font_size,
        family: cli.family.clone(),
    };
    let opts = ExportOptions {
        family_label: cli.family_label.clone(),
        metrics_font,
        text_mode: cli.text_mode,
        omit_missing_weights: cli.omit_missing_weights,
        ..ExportOptions::default()
    };

    let result = pollster::block_on(export_text_to_svg_with(&registry, &request, &opts));

    let path = cli.output.join(result.filename);
    fs::write(&path, &result.blob.bytes).map_err(|source| CliError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(path) => {
            info!("Wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
