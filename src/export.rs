//! Export of a route's event log to portable formats.

use crate::model::Event;

/// The event log as a pretty-printed JSON array.
pub fn to_json(events: &[Event]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(events)
}

/// The path as a GPX 1.1 track. Only location events become track points.
pub fn to_gpx(name: Option<&str>, events: &[Event]) -> String {
    let mut lines = vec![
        r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string(),
        r#"<gpx version="1.1" creator="fieldtrack" xmlns="http://www.topografix.com/GPX/1/1">"#
            .to_string(),
        "  <trk>".to_string(),
    ];
    if let Some(name) = name {
        lines.push(format!("    <name>{}</name>", escape(name)));
    }
    lines.push("    <trkseg>".to_string());
    lines.extend(events.iter().filter_map(|event| match event {
        Event::Location {
            timestamp,
            coordinate,
        } => Some(format!(
            r#"      <trkpt lat="{}" lon="{}"><time>{timestamp}</time></trkpt>"#,
            coordinate.lat, coordinate.lng
        )),
        _ => None,
    }));
    lines.extend(["    </trkseg>", "  </trk>", "</gpx>", ""].map(String::from));
    lines.join("\n")
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;

    use crate::model::{Coordinate, MediaKind};

    fn events() -> Vec<Event> {
        let at = |secs: i64| Timestamp::new(1_700_000_000 + secs, 0).unwrap();
        vec![
            Event::Location {
                timestamp: at(0),
                coordinate: Coordinate::new(51.5, -0.125),
            },
            Event::TextNote {
                timestamp: at(5),
                coordinate: Coordinate::new(51.5, -0.125),
                text: "bench".into(),
            },
            Event::media(MediaKind::Photo, at(6), Coordinate::new(51.5, -0.125), vec![1]),
            Event::Location {
                timestamp: at(10),
                coordinate: Coordinate::new(51.501, -0.126),
            },
        ]
    }

    #[test]
    fn json_export_is_the_event_array() {
        let json = to_json(&events()).unwrap();
        let back: Vec<Event> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, events());
        assert!(json.contains('\n'));
    }

    #[test]
    fn gpx_has_one_point_per_location() {
        let gpx = to_gpx(Some("Thames walk"), &events());

        assert!(gpx.contains(r#"<gpx version="1.1" creator="fieldtrack""#));
        assert!(gpx.contains("<name>Thames walk</name>"));
        assert_eq!(gpx.matches("<trkpt").count(), 2);
        assert!(gpx.contains(
            r#"<trkpt lat="51.5" lon="-0.125"><time>2023-11-14T22:13:20Z</time></trkpt>"#
        ));
        assert!(!gpx.contains("bench"));
        assert!(gpx.ends_with("</trkseg>\n  </trk>\n</gpx>\n"));
    }

    #[test]
    fn gpx_escapes_the_name() {
        let gpx = to_gpx(Some("Fish & <Chips>"), &[]);
        assert!(gpx.contains("<name>Fish &amp; &lt;Chips&gt;</name>"));
        assert_eq!(gpx.matches("<trkpt").count(), 0);
    }

    #[test]
    fn shared_routes_have_no_name() {
        assert!(!to_gpx(None, &events()).contains("<name>"));
    }
}
