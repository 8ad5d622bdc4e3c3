//! Output formatting for CLI display.

use jiff::SignedDuration;

use crate::model::{Event, RouteSummary};
use crate::session::Hydrated;

/// Elapsed time as the timer shows it: `HH:MM:SS`.
pub(super) fn format_elapsed(elapsed: SignedDuration) -> String {
    let secs = elapsed.as_secs().max(0);
    let (h, m, s) = (secs / 3600, secs / 60 % 60, secs % 60);
    format!("{h:02}:{m:02}:{s:02}")
}

pub(super) fn format_distance(km: f64) -> String {
    format!("{km:.2} km")
}

/// One line of the route listing.
pub(super) fn format_route_line(index: usize, route: &RouteSummary) -> String {
    format!(
        "{index:>3}  {}  {}  {}  {}",
        route.created_at.strftime("%Y-%m-%d %H:%M"),
        format_elapsed(route.elapsed),
        format_distance(route.total_distance_km),
        route.name
    )
}

/// One line per event, in log order.
pub(super) fn format_event(event: &Event) -> String {
    let c = event.coordinate();
    let head = format!(
        "{}  {:<8}  {:.5}, {:.5}",
        event.timestamp(),
        event.kind().as_str(),
        c.lat,
        c.lng
    );
    match event {
        Event::Location { .. } => head,
        Event::TextNote { text, .. } => format!("{head}  {text:?}"),
        Event::Photo { image: bytes, .. }
        | Event::Video { video: bytes, .. }
        | Event::AudioNote { audio: bytes, .. } => format!("{head}  ({} bytes)", bytes.len()),
    }
}

/// Header and event listing for a loaded route.
pub(super) fn format_hydrated(route: &Hydrated) -> String {
    let mut lines = vec![match (&route.name, route.created_at) {
        (Some(name), Some(at)) => format!("{name} ({})", at.strftime("%Y-%m-%d %H:%M")),
        (Some(name), None) => name.clone(),
        (None, _) => "Shared route".to_string(),
    }];
    if let Some(elapsed) = route.elapsed {
        lines.push(format!("Time:     {}", format_elapsed(elapsed)));
    }
    if let Some(km) = route.total_distance_km {
        lines.push(format!("Distance: {}", format_distance(km)));
    }
    lines.push(format!(
        "Points:   {}  Events: {}",
        route.state.path().len(),
        route.state.log.len()
    ));
    if route.state.log.is_empty() {
        lines.push("No events".to_string());
    }
    lines.extend(route.state.log.events().iter().map(format_event));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;

    use crate::model::{Coordinate, MediaKind};
    use crate::session;

    fn at() -> Timestamp {
        Timestamp::new(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn elapsed_is_hours_minutes_seconds() {
        assert_eq!(format_elapsed(SignedDuration::ZERO), "00:00:00");
        assert_eq!(format_elapsed(SignedDuration::from_secs(59)), "00:00:59");
        assert_eq!(format_elapsed(SignedDuration::from_secs(3_723)), "01:02:03");
        assert_eq!(format_elapsed(SignedDuration::from_millis(61_900)), "00:01:01");
        assert_eq!(format_elapsed(SignedDuration::from_secs(100 * 3600)), "100:00:00");
    }

    #[test]
    fn distance_has_two_decimals() {
        assert_eq!(format_distance(0.0), "0.00 km");
        assert_eq!(format_distance(0.222_4), "0.22 km");
        assert_eq!(format_distance(12.345_6), "12.35 km");
    }

    #[test]
    fn events_render_by_kind() {
        let c = Coordinate::new(51.5, -0.125);
        let location = Event::Location {
            timestamp: at(),
            coordinate: c,
        };
        let note = Event::TextNote {
            timestamp: at(),
            coordinate: c,
            text: "stile".into(),
        };
        let photo = Event::media(MediaKind::Photo, at(), c, vec![0; 12]);

        assert_eq!(
            format_event(&location),
            "2023-11-14T22:13:20Z  location  51.50000, -0.12500"
        );
        assert!(format_event(&note).ends_with(r#"  "stile""#));
        assert!(format_event(&photo).ends_with("(12 bytes)"));
    }

    #[test]
    fn route_line_and_shared_header() {
        let route = RouteSummary {
            name: "Canal".into(),
            created_at: at(),
            elapsed: SignedDuration::from_secs(754),
            total_distance_km: 1.5,
            events: vec![],
        };
        assert_eq!(
            format_route_line(0, &route),
            "  0  2023-11-14 22:13  00:12:34  1.50 km  Canal"
        );

        let shared = format_hydrated(&session::hydrate_shared(vec![]));
        assert!(shared.starts_with("Shared route\nPoints:   0"));
        assert!(!shared.contains("Distance"));

        let saved = format_hydrated(&session::hydrate(&route));
        assert!(saved.starts_with("Canal (2023-11-14 22:13)\nTime:     00:12:34"));
    }
}
