//! Write a simulated timeline as CSV for spreadsheet inspection.
//!
//! One row per event, times in seconds. Damage columns are left empty for
//! events that carry none, so fire rows stay easy to filter.

use std::io::Write;

use crate::sim::timeline::{ticks_to_seconds, EventKind, TimelineEvent};

const HEADER: [&str; 6] = [
    "kind",
    "start_seconds",
    "duration_seconds",
    "sequence_index",
    "damage",
    "cumulative_damage",
];

fn kind_label(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Reload => "reload",
        EventKind::Cast => "cast",
        EventKind::Fire => "fire",
        EventKind::Interval => "interval",
        EventKind::Recovery => "recovery",
    }
}

fn optional_number<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn write_timeline_csv<W: Write>(
    events: &[TimelineEvent],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for event in events {
        csv_writer.write_record([
            kind_label(event.kind).to_string(),
            format!("{:.4}", ticks_to_seconds(event.start_tick)),
            format!("{:.4}", ticks_to_seconds(event.duration_ticks)),
            optional_number(event.sequence_index),
            optional_number(event.damage),
            optional_number(event.cumulative_damage),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::blaster::{simulate_blaster_cycle, BlasterParams};

    #[test]
    fn csv_has_header_and_one_row_per_event() {
        let result = simulate_blaster_cycle(&BlasterParams::default());
        let mut buffer = Vec::new();
        write_timeline_csv(&result.timeline, &mut buffer).expect("csv write");
        let text = String::from_utf8(buffer).expect("utf8 csv");
        let lines: Vec<&str> = text.trim_end().lines().collect();
        assert_eq!(lines[0], HEADER.join(","));
        assert_eq!(lines.len(), result.timeline.len() + 1);
        assert!(lines[1].starts_with("reload,0.0000,1.5000,,,"));
    }
}
