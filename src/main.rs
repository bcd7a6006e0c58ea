//! `floorplan`: command-line tools for exported factory floor layouts.


use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use planner::config::EditorConfig;
use planner::error::{ExportError, LayoutError};
use planner::export::{self, LayoutSnapshot};
use planner::model::{Field, LayoutModel};
use planner::render;
use time::OffsetDateTime;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("{0}")]
    Export(#[from] ExportError),
    #[error("{0}")]
    Layout(#[from] LayoutError),
    #[error("layout has {count} conflicting item pair(s)")]
    Conflicts { count: usize },
}

#[derive(Parser, Debug)]
#[command(name = "floorplan", about = "Validate, measure, and render factory floor layouts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report overlap-policy conflicts and items outside the field.
    Check { layout: PathBuf },
    /// Print field size, occupied area, and item count.
    Metrics { layout: PathBuf },
    /// Render the layout to an SVG or PNG image (chosen by extension).
    Render {
        layout: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Image scale; defaults to FLOORPLAN_EXPORT_PX_PER_METER or 50.
        #[arg(long, env = "FLOORPLAN_EXPORT_PX_PER_METER")]
        px_per_meter: Option<f64>,
        #[arg(long, default_value = export::DEFAULT_TITLE)]
        title: String,
    },
    /// Write an empty layout file.
    New {
        /// Field width in meters; defaults to FLOORPLAN_FIELD_WIDTH or 20.
        #[arg(long, env = "FLOORPLAN_FIELD_WIDTH")]
        width: Option<f64>,
        /// Field height in meters; defaults to FLOORPLAN_FIELD_HEIGHT or 15.
        #[arg(long, env = "FLOORPLAN_FIELD_HEIGHT")]
        height: Option<f64>,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let config = EditorConfig::from_env();

    match cli.command {
        Command::Check { layout } => run_check(&layout),
        Command::Metrics { layout } => run_metrics(&layout),
        Command::Render { layout, output, px_per_meter, title } => {
            run_render(&layout, &output, px_per_meter.unwrap_or(config.export_px_per_meter), &title)
        }
        Command::New { width, height, output } => run_new(
            width.unwrap_or(config.field_width),
            height.unwrap_or(config.field_height),
            &output,
        ),
    }
}

fn load(path: &Path) -> Result<LayoutModel, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })?;
    let snapshot = LayoutSnapshot::from_json(&text)?;
    let model = LayoutModel::from_snapshot(snapshot);
    info!(path = %path.display(), items = model.len(), "layout loaded");
    Ok(model)
}

/// Human-readable findings for `model`; the second value counts conflicts.
fn check_report(model: &LayoutModel) -> (Vec<String>, usize) {
    let conflicts = model.conflicts();
    let mut lines: Vec<String> = conflicts
        .iter()
        .map(|(a, b)| format!("conflict: item {a} overlaps item {b}"))
        .collect();
    lines.extend(model.out_of_bounds().iter().map(|id| format!("outside field: item {id}")));
    (lines, conflicts.len())
}

fn run_check(path: &Path) -> Result<(), CliError> {
    let model = load(path)?;
    let (lines, conflicts) = check_report(&model);
    for line in &lines {
        println!("{line}");
    }
    if conflicts > 0 {
        warn!(conflicts, "layout failed check");
        return Err(CliError::Conflicts { count: conflicts });
    }
    println!("ok: {} items", model.len());
    Ok(())
}

fn run_metrics(path: &Path) -> Result<(), CliError> {
    let model = load(path)?;
    for line in render::footer_lines(&model) {
        println!("{line}");
    }
    Ok(())
}

fn run_render(path: &Path, output: &Path, px_per_meter: f64, title: &str) -> Result<(), CliError> {
    let model = load(path)?;
    let format = export::write_image(&model, output, px_per_meter, title)?;
    println!("wrote {} ({format:?})", output.display());
    Ok(())
}

fn run_new(width: f64, height: f64, output: &Path) -> Result<(), CliError> {
    let model = LayoutModel::new(Field::new(width, height)?);
    let json = LayoutSnapshot::capture(&model, OffsetDateTime::now_utc())?.to_json()?;
    fs::write(output, json).map_err(|source| CliError::Write { path: output.to_owned(), source })?;
    println!("wrote {}", output.display());
    Ok(())
}
