//! Gridboard command-line entry point.
//!
//! Loads a user's dashboard from file storage, applies one command and
//! prints the resulting layout as JSON.

mod config;

use clap::{Parser, Subcommand};
use config::{AppConfig, AppError};
use gridboard_core::widget::catalog;
use gridboard_core::{BoxFuture, Breakpoint, DashboardService, FileStorage, Widget, WidgetType};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Inspect and edit a dashboard layout
#[derive(Parser)]
#[command(name = "gridboard")]
#[command(version, about = "Inspect and edit a dashboard layout")]
struct Cli {
    /// User whose layout is edited (defaults to $GRIDBOARD_USER or "local")
    #[arg(long, global = true)]
    user: Option<String>,

    /// Directory holding layout files
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Grid configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the layout, for one breakpoint or all of them
    Show {
        #[arg(value_parser = parse_breakpoint)]
        breakpoint: Option<Breakpoint>,
    },

    /// Add a widget, placed automatically on every breakpoint
    Add {
        /// Widget type tag, e.g. calendar
        widget_type: String,
    },

    /// Drop a widget onto a breakpoint's grid at a cell
    Drop {
        #[arg(value_parser = parse_breakpoint)]
        breakpoint: Breakpoint,
        widget_type: String,
        x: u32,
        y: u32,
    },

    /// Remove a widget
    Remove { id: String },

    /// Restore the default dashboard
    Reset,

    /// List the widgets that can be added
    Catalog,
}

fn parse_breakpoint(name: &str) -> Result<Breakpoint, String> {
    Breakpoint::parse(name).ok_or_else(|| {
        let names: Vec<&str> = Breakpoint::ALL.iter().map(|bp| bp.name()).collect();
        format!("unknown breakpoint '{}', expected one of {}", name, names.join(", "))
    })
}

fn parse_widget_type(tag: &str) -> WidgetType {
    let widget_type = WidgetType::from(tag);
    if !widget_type.is_known() {
        log::warn!("Unknown widget type '{}', using the fallback size", tag);
    }
    widget_type
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    if let Commands::Catalog = cli.command {
        return print_catalog();
    }

    let config = AppConfig::resolve(cli.user, cli.dir, cli.config.as_deref())?;
    log::info!("Starting gridboard for {} in {}", config.user_id, config.storage_dir.display());

    let storage = Arc::new(FileStorage::new(config.storage_dir)?);
    let mut service = DashboardService::new(
        config.grid,
        storage,
        Box::new(|future: BoxFuture<'static, ()>| pollster::block_on(future)),
    )
    .with_user(config.user_id);
    pollster::block_on(service.fetch_layout());

    match cli.command {
        Commands::Show { breakpoint } => print_layouts(&service, breakpoint),
        Commands::Add { widget_type } => {
            let widget = Widget::generate(parse_widget_type(&widget_type));
            let id = widget.id.clone();
            service.add_widget(widget);
            eprintln!("Added {}", id);
            print_layouts(&service, None)
        }
        Commands::Drop {
            breakpoint,
            widget_type,
            x,
            y,
        } => {
            let id = service.on_external_drop(breakpoint, parse_widget_type(&widget_type), x, y);
            eprintln!("Dropped {}", id);
            print_layouts(&service, Some(breakpoint))
        }
        Commands::Remove { id } => {
            if !service.on_widget_remove(&id) {
                log::warn!("No widget with id {}", id);
            }
            print_layouts(&service, None)
        }
        Commands::Reset => {
            service.reset_to_default();
            print_layouts(&service, None)
        }
        Commands::Catalog => print_catalog(),
    }
}

fn print_layouts(
    service: &DashboardService<FileStorage>,
    breakpoint: Option<Breakpoint>,
) -> Result<(), AppError> {
    let json = match breakpoint {
        Some(bp) => serde_json::to_string_pretty(service.store().layout(bp))?,
        None => serde_json::to_string_pretty(&service.store().snapshot())?,
    };
    println!("{}", json);
    Ok(())
}

fn print_catalog() -> Result<(), AppError> {
    let entries: Vec<serde_json::Value> = catalog::entries()
        .into_iter()
        .map(|entry| {
            serde_json::json!({
                "type": entry.widget_type.as_str(),
                "title": entry.title,
                "w": entry.profile.default_width,
                "h": entry.profile.default_height,
                "minW": entry.profile.min_width,
                "minH": entry.profile.min_height,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
