//! Command-line interface for inspecting and maintaining saved projects
//! and for computing grid layouts.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gridframe_core::{LengthUnit, Measurement};
use gridframe_designer::{EditCommand, EditStore, LabelStyle, PaperPreset};
use gridframe_projects::{ImageRecord, ImageSource, ProjectStore, ProjectSummary};
use gridframe_settings::{default_config_path, Config};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GridFrame - real-world grid overlays for photos
#[derive(Parser, Debug)]
#[command(name = "gridframe")]
#[command(about = "Real-world grid overlays and project storage", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (.toml or .json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List saved projects, most recent first
    List,

    /// Print one project as JSON
    Show {
        id: String,
    },

    /// Write every project to a JSON file
    Export {
        file: PathBuf,
    },

    /// Save every project from an exported JSON file
    Import {
        file: PathBuf,
    },

    /// Delete a project
    Delete {
        id: String,
    },

    /// Delete all projects
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Remove orphan records and dangling index entries
    Reconcile,

    /// Rename a project
    Rename {
        id: String,
        name: String,
    },

    /// Mark or unmark a project as favorite
    Favorite {
        id: String,

        /// Remove the favorite mark
        #[arg(long)]
        off: bool,
    },

    /// Compute a grid layout and print it as JSON
    Grid(GridArgs),
}

#[derive(Parser, Debug)]
pub struct GridArgs {
    /// Container width in pixels
    #[arg(long, default_value_t = 800.0)]
    pub container_width: f64,

    /// Container height in pixels
    #[arg(long, default_value_t = 600.0)]
    pub container_height: f64,

    /// Paper preset (A0-A5)
    #[arg(long, value_name = "PRESET", conflicts_with_all = ["width", "height"])]
    pub paper: Option<PaperPreset>,

    /// Custom page width
    #[arg(long, requires = "height")]
    pub width: Option<f64>,

    /// Custom page height
    #[arg(long, requires = "width")]
    pub height: Option<f64>,

    /// Unit of the custom page size
    #[arg(long, default_value = "mm")]
    pub unit: LengthUnit,

    /// Cell size, e.g. `20mm` or `1in`
    #[arg(long)]
    pub cell: Option<Measurement>,

    /// Cell height when it differs from the width
    #[arg(long)]
    pub cell_height: Option<Measurement>,

    /// Include cell diagonals
    #[arg(long)]
    pub diagonals: bool,

    /// Labels to include: none, row, col or both
    #[arg(long, default_value = "none", value_parser = parse_label_style)]
    pub labels: LabelStyle,
}

fn parse_label_style(s: &str) -> std::result::Result<LabelStyle, String> {
    match s.trim().to_lowercase().as_str() {
        "none" => Ok(LabelStyle::None),
        "row" | "rows" => Ok(LabelStyle::Row),
        "col" | "cols" | "column" | "columns" => Ok(LabelStyle::Col),
        "both" => Ok(LabelStyle::Both),
        _ => Err(format!("Unknown label style: {}", s)),
    }
}

/// Load `path`, or the default config file when no path is given.
///
/// An explicit path must exist; the default path may be absent.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            let path = default_config_path()?;
            Ok(Config::load_or_default(&path)?)
        }
    }
}

/// Run a parsed command, writing results to `out`.
///
/// `grid` never touches project storage; every other command opens and
/// reconciles the configured store first.
pub async fn execute(cli: Cli, config: &Config, out: &mut dyn Write) -> Result<()> {
    let open_store = || crate::open_project_store(config);

    match cli.command {
        Commands::Grid(args) => grid(&args, config, out),
        Commands::List => list(&open_store().await?, cli.json, out).await,
        Commands::Show { id } => {
            let project = open_store().await?.require_detail(&id).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&project)?)?;
            Ok(())
        }
        Commands::Export { file } => {
            let blob = open_store().await?.export_all().await?;
            tokio::fs::write(&file, blob)
                .await
                .with_context(|| format!("Failed to write {}", file.display()))?;
            writeln!(out, "Exported projects to {}", file.display())?;
            Ok(())
        }
        Commands::Import { file } => {
            let blob = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let count = open_store().await?.import_all(&blob).await?;
            writeln!(out, "Imported {} projects", count)?;
            Ok(())
        }
        Commands::Delete { id } => {
            open_store().await?.delete(&id).await?;
            writeln!(out, "Deleted {}", id)?;
            Ok(())
        }
        Commands::Clear { yes } => {
            if !yes {
                bail!("Refusing to delete all projects without --yes");
            }
            open_store().await?.clear_all().await?;
            writeln!(out, "Deleted all projects")?;
            Ok(())
        }
        Commands::Reconcile => {
            let report = open_store().await?.reconcile().await?;
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                writeln!(
                    out,
                    "Removed {} orphan records and {} dangling index entries",
                    report.orphans_removed.len(),
                    report.dangling_removed.len()
                )?;
            }
            Ok(())
        }
        Commands::Rename { id, name } => {
            let project = open_store().await?.rename(&id, name).await?;
            writeln!(out, "Renamed {} to {}", project.id, project.name)?;
            Ok(())
        }
        Commands::Favorite { id, off } => {
            let project = open_store().await?.set_favorite(&id, !off).await?;
            writeln!(out, "{} favorite: {}", project.id, project.is_favorite)?;
            Ok(())
        }
    }
}

async fn list(store: &ProjectStore, json: bool, out: &mut dyn Write) -> Result<()> {
    let summaries = store.list_summaries().await?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summaries)?)?;
        return Ok(());
    }
    if summaries.is_empty() {
        writeln!(out, "No projects")?;
    }
    for summary in &summaries {
        writeln!(out, "{}", summary_line(summary))?;
    }
    Ok(())
}

fn summary_line(summary: &ProjectSummary) -> String {
    format!(
        "{}  {}  {}{}",
        summary.id,
        summary.updated_at.format("%Y-%m-%d %H:%M"),
        summary.name,
        if summary.is_favorite { "  *" } else { "" }
    )
}

fn grid(args: &GridArgs, config: &Config, out: &mut dyn Write) -> Result<()> {
    let mut store = EditStore::with_defaults(&config.grid.edit_defaults()?);
    store.dispatch(EditCommand::SetGridVisible(true));
    if args.diagonals {
        store.dispatch(EditCommand::SetDiagonalVisible(true));
    }
    if args.labels != LabelStyle::None {
        store.dispatch(EditCommand::SetLabelStyle(args.labels));
    }

    match (args.paper, args.width, args.height) {
        (Some(paper), _, _) => {
            if paper.dimensions_mm().is_none() {
                bail!("--paper must be one of A0-A5; use --width/--height for a custom size");
            }
            store.dispatch(EditCommand::SetPaperPreset(paper));
        }
        (None, Some(width), Some(height)) => {
            store.dispatch(EditCommand::SetCustomDimensions {
                width: Some(width),
                height: Some(height),
                unit: args.unit,
            });
        }
        _ => bail!("Give either --paper or both --width and --height"),
    }

    if let Some(cell) = args.cell {
        store.dispatch(EditCommand::SetCellWidth(cell));
        store.dispatch(EditCommand::SetCellHeight(args.cell_height.unwrap_or(cell)));
    } else if let Some(cell_height) = args.cell_height {
        store.dispatch(EditCommand::SetCellHeight(cell_height));
    }

    let mut page = ImageRecord::new("", ImageSource::Default);
    page.apply_paper(&store.state().paper);
    let geometry = page
        .geometry()
        .context("Page size must be positive and in a physical unit")?;

    let layout = store.grid_layout(args.container_width, args.container_height, &geometry);
    writeln!(out, "{}", serde_json::to_string_pretty(&layout)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_style() {
        assert_eq!(parse_label_style("Both").unwrap(), LabelStyle::Both);
        assert_eq!(parse_label_style("columns").unwrap(), LabelStyle::Col);
        assert!(parse_label_style("diagonal").is_err());
    }

    #[test]
    fn test_cli_parses_grid_args() {
        let cli = Cli::try_parse_from([
            "gridframe",
            "grid",
            "--paper",
            "A4",
            "--cell",
            "3cm",
            "--labels",
            "row",
        ])
        .unwrap();
        let Commands::Grid(args) = cli.command else {
            panic!("expected grid command");
        };
        assert_eq!(args.paper, Some(PaperPreset::A4));
        assert_eq!(args.cell, Some(Measurement::new(3.0, LengthUnit::Cm)));
        assert_eq!(args.labels, LabelStyle::Row);
    }

    #[test]
    fn test_cli_rejects_paper_with_custom_size() {
        let result = Cli::try_parse_from([
            "gridframe", "grid", "--paper", "A4", "--width", "10", "--height", "10",
        ]);
        assert!(result.is_err());
    }
}
