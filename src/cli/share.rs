//! Share link commands: share a saved route, open a received link.

use crate::config::Config;
use crate::session;
use crate::share;
use crate::storage::{RouteBook, Storage};

use super::format::format_hydrated;
use super::routes;

pub(super) fn cmd_share(config: &Config, storage: &Storage, index: usize) -> Result<(), String> {
    let summary = RouteBook::new(storage)
        .get(index)
        .map_err(|e| format!("failed to load route: {e}"))?;

    let link = share::link(&config.share_base, &summary.events)
        .map_err(|e| format!("failed to build share link: {e}"))?;

    println!("{link}");
    Ok(())
}

/// Opens a shared link, or lists saved routes if it carries nothing usable.
///
/// Input without a scheme is taken as the bare `data` value.
pub(super) fn cmd_open(storage: &Storage, link: &str) -> Result<(), String> {
    let shared = if link.contains("://") {
        share::from_link(link)
    } else {
        share::decode(link).map(Some)
    };
    match shared {
        Ok(Some(events)) => {
            tracing::info!(events = events.len(), "shared route loaded");
            println!("{}", format_hydrated(&session::hydrate_shared(events)));
            Ok(())
        }
        Ok(None) => {
            eprintln!("Link carries no shared route.");
            routes::cmd_list(storage)
        }
        Err(e) => {
            eprintln!("Could not load shared route: {e}");
            routes::cmd_list(storage)
        }
    }
}
