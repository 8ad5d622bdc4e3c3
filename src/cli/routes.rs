//! Saved route commands: list, show, export.

use std::fs;
use std::path::Path;

use clap::{Subcommand, ValueEnum};

use crate::export;
use crate::session;
use crate::storage::{RouteBook, Storage};

use super::format::{format_hydrated, format_route_line};

#[derive(Debug, Subcommand)]
pub enum RoutesCommand {
    /// List saved routes, oldest first, with their positions.
    List,

    /// Show a saved route and its events.
    Show {
        /// Position in `routes list`.
        index: usize,
    },
}

/// CLI-facing export format.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Pretty-printed JSON array of events.
    Json,
    /// GPX 1.1 track of the location events.
    Gpx,
}

pub(super) fn cmd_list(storage: &Storage) -> Result<(), String> {
    let routes = RouteBook::new(storage)
        .list()
        .map_err(|e| format!("failed to list routes: {e}"))?;

    if routes.is_empty() {
        println!("No saved routes");
        return Ok(());
    }

    for (index, route) in routes.iter().enumerate() {
        println!("{}", format_route_line(index, route));
    }

    Ok(())
}

pub(super) fn cmd_show(storage: &Storage, index: usize) -> Result<(), String> {
    let summary = RouteBook::new(storage)
        .get(index)
        .map_err(|e| format!("failed to load route: {e}"))?;
    tracing::info!(index, name = %summary.name, "route loaded");

    println!("{}", format_hydrated(&session::hydrate(&summary)));
    Ok(())
}

pub(super) fn cmd_export(
    storage: &Storage,
    index: usize,
    format: ExportFormat,
    out: Option<&Path>,
) -> Result<(), String> {
    let summary = RouteBook::new(storage)
        .get(index)
        .map_err(|e| format!("failed to load route: {e}"))?;

    let contents = match format {
        ExportFormat::Json => export::to_json(&summary.events)
            .map_err(|e| format!("failed to serialize events: {e}"))?,
        ExportFormat::Gpx => export::to_gpx(Some(&summary.name), &summary.events),
    };

    match out {
        Some(path) => {
            fs::write(path, &contents)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            eprintln!("Exported \"{}\" → {}", summary.name, path.display());
        }
        None => println!("{contents}"),
    }

    Ok(())
}
