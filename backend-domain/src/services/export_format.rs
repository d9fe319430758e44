// Formatting helpers for spreadsheet export

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::entities::{ExportRow, InventoryRecord};

const ENTRY_DATE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Renders a stored entry timestamp as `DD/MM/YYYY HH:MM`, or returns the
/// text unchanged when it cannot be read as a date.
pub fn format_entry_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    parse_entry_timestamp(trimmed)
        .map(|value| value.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn parse_entry_timestamp(raw: &str) -> Option<NaiveDateTime> {
    for format in ENTRY_DATE_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(value);
        }
    }
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.naive_local());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// `{prefix}_{YYYY-MM-DDTHH-MM-SS}.xlsx`
pub fn export_file_name(prefix: &str, now: NaiveDateTime) -> String {
    let prefix = prefix.trim();
    let prefix = if prefix.is_empty() {
        "inventory_export"
    } else {
        prefix
    };
    format!("{}_{}.xlsx", prefix, now.format("%Y-%m-%dT%H-%M-%S"))
}

pub fn to_export_row(record: &InventoryRecord, person_name: Option<&str>) -> ExportRow {
    ExportRow {
        id: record.id.clone(),
        name: record.name.clone(),
        brand: record.brand.clone(),
        unit: record.unit.clone(),
        quantity: record.quantity,
        price: record.price,
        color: record.color.clone(),
        size: record.size.clone(),
        shape: record.shape.clone(),
        person_name: person_name.unwrap_or_default().to_string(),
        entry_date: record
            .entry_timestamp
            .as_deref()
            .map(format_entry_date)
            .unwrap_or_default(),
        notes: record.notes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_date_renders_day_first() {
        assert_eq!(format_entry_date("2023-05-10T14:30"), "10/05/2023 14:30");
        assert_eq!(format_entry_date("2023-05-10"), "10/05/2023 00:00");
    }

    #[test]
    fn malformed_entry_date_is_kept() {
        assert_eq!(format_entry_date("2023-13-10T00:00"), "2023-13-10T00:00");
        assert_eq!(format_entry_date(""), "");
    }

    #[test]
    fn file_name_uses_dashed_timestamp() {
        let now = NaiveDate::from_ymd_opt(2026, 10, 18)
            .and_then(|date| date.and_hms_opt(9, 5, 7))
            .expect("timestamp");
        assert_eq!(
            export_file_name("kho", now),
            "kho_2026-10-18T09-05-07.xlsx"
        );
        assert_eq!(
            export_file_name(" ", now),
            "inventory_export_2026-10-18T09-05-07.xlsx"
        );
    }
}
