use chrono::{DateTime, Local};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::monitor::{FeedRecord, PricePoint};

pub fn build_history_table(records: &[FeedRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Date", "Time", "Price"]);
    for record in records {
        match PricePoint::try_from(record) {
            Ok(point) => {
                let observed_at: DateTime<Local> = point.observed_at.into();
                table.add_row(vec![
                    Cell::new(observed_at.format("%b %d")).add_attribute(Attribute::Dim),
                    Cell::new(observed_at.format("%H:%M")),
                    Cell::new(format!("{:.1}", point.price))
                        .set_alignment(CellAlignment::Right)
                        .fg(if point.under_threshold { Color::Green } else { Color::Red }),
                ]);
            }
            Err(_) => {
                table.add_row(vec![
                    Cell::new(&record.millis_utc).add_attribute(Attribute::Dim),
                    Cell::new(""),
                    Cell::new(&record.price)
                        .set_alignment(CellAlignment::Right)
                        .add_attribute(Attribute::Dim),
                ]);
            }
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_records_are_kept() {
        let records = vec![
            FeedRecord { millis_utc: "1700000300000".to_owned(), price: "4.2".to_owned() },
            FeedRecord { millis_utc: "garbage".to_owned(), price: "n/a".to_owned() },
        ];
        let table = build_history_table(&records);
        assert_eq!(table.row_count(), 2);
        assert!(table.to_string().contains("n/a"));
    }
}
