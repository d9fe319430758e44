// Spreadsheet import normalizer
// Turns loosely labelled rows into inventory records in two passes:
// `normalize_rows` maps rows and collects unknown person names, then
// `resolve_people` re-maps pending records once those names are registered.

use std::collections::HashSet;

use crate::entities::{CellValue, InventoryRecord, RawRow, DEFAULT_PRICE, DEFAULT_QUANTITY};
use crate::services::{normalize_entry_date, PersonDirectory};
use crate::utils::{leading_decimal, leading_integer};
use crate::value_objects::ImportField;

#[derive(Debug, Clone, PartialEq)]
pub struct PendingRecord {
    pub record: InventoryRecord,
    pub person_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub pending: Vec<PendingRecord>,
    /// Distinct person names with no directory match, first spelling kept.
    pub unknown_people: Vec<String>,
    /// Rows dropped for a missing id or name.
    pub skipped: usize,
}

/// First cell whose label contains one of the field's aliases, compared
/// case-insensitively, scanning columns in row order.
pub fn resolve_field(row: &RawRow, field: ImportField) -> Option<&CellValue> {
    let aliases = field
        .aliases()
        .iter()
        .map(|alias| alias.to_lowercase())
        .collect::<Vec<_>>();
    row.cells()
        .iter()
        .find(|(label, _)| {
            let label = label.to_lowercase();
            aliases.iter().any(|alias| label.contains(alias.as_str()))
        })
        .map(|(_, value)| value)
}

fn field_text(row: &RawRow, field: ImportField) -> String {
    resolve_field(row, field)
        .map(|cell| cell.as_text().trim().to_string())
        .unwrap_or_default()
}

pub fn parse_quantity(cell: Option<&CellValue>) -> u32 {
    let parsed = match cell {
        Some(CellValue::Number(number)) if number.is_finite() => Some(number.trunc() as i64),
        Some(other) => leading_integer(&other.as_text()),
        None => None,
    };
    parsed
        .filter(|value| *value >= 1)
        .map(|value| u32::try_from(value).unwrap_or(u32::MAX))
        .unwrap_or(DEFAULT_QUANTITY)
}

pub fn parse_price(cell: Option<&CellValue>) -> f64 {
    let parsed = match cell {
        Some(CellValue::Number(number)) => Some(*number),
        Some(other) => leading_decimal(&other.as_text()),
        None => None,
    };
    parsed
        .filter(|value| value.is_finite() && *value > 0.0)
        .unwrap_or(DEFAULT_PRICE)
}

fn parse_entry_date(cell: Option<&CellValue>) -> Option<String> {
    let cell = cell?;
    if cell.is_blank() {
        return None;
    }
    match cell {
        CellValue::Text(text) => Some(normalize_entry_date(text.trim())),
        other => Some(other.as_text()),
    }
}

/// Maps one row. Returns `None` when the row has no id or no name.
pub fn normalize_row(row: &RawRow, directory: &PersonDirectory) -> Option<PendingRecord> {
    let id = field_text(row, ImportField::Id);
    let name = field_text(row, ImportField::Name);
    if id.is_empty() || name.is_empty() {
        return None;
    }

    let person_name = Some(field_text(row, ImportField::Person)).filter(|name| !name.is_empty());
    let person_id = person_name
        .as_deref()
        .and_then(|name| directory.lookup(name));

    let record = InventoryRecord {
        id,
        name,
        brand: field_text(row, ImportField::Brand),
        unit: field_text(row, ImportField::Unit),
        quantity: parse_quantity(resolve_field(row, ImportField::Quantity)),
        price: parse_price(resolve_field(row, ImportField::Price)),
        color: field_text(row, ImportField::Color),
        size: field_text(row, ImportField::Size),
        shape: field_text(row, ImportField::Shape),
        notes: field_text(row, ImportField::Notes),
        entry_timestamp: parse_entry_date(resolve_field(row, ImportField::Date)),
        person_id,
        saved_at: None,
    };
    Some(PendingRecord {
        record,
        person_name,
    })
}

pub fn normalize_rows(rows: &[RawRow], directory: &PersonDirectory) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    let mut seen = HashSet::new();
    for row in rows {
        let Some(pending) = normalize_row(row, directory) else {
            batch.skipped += 1;
            continue;
        };
        if pending.record.person_id.is_none() {
            if let Some(name) = &pending.person_name {
                if seen.insert(name.to_lowercase()) {
                    batch.unknown_people.push(name.clone());
                }
            }
        }
        batch.pending.push(pending);
    }
    batch
}

/// Second pass: fills in person ids that the updated directory now knows.
pub fn resolve_people(
    pending: Vec<PendingRecord>,
    directory: &PersonDirectory,
) -> Vec<InventoryRecord> {
    pending
        .into_iter()
        .map(|PendingRecord { mut record, person_name }| {
            if record.person_id.is_none() {
                record.person_id = person_name
                    .as_deref()
                    .and_then(|name| directory.lookup(name));
            }
            record
        })
        .collect()
}
