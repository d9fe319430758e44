use std::io::Cursor;

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use rust_xlsxwriter::{Workbook, Worksheet};

use backend_domain::{
    CellValue, ExportRow, RawRow, SheetFormat, SpreadsheetCodec, EXPORT_COLUMNS,
    EXPORT_SHEET_NAME,
};

use crate::utils::format_sheet_datetime;

/// Reads xlsx/xls/ods through calamine and csv through the csv crate;
/// writes xlsx through rust_xlsxwriter.
#[derive(Debug, Default, Clone)]
pub struct WorkbookCodec;

impl WorkbookCodec {
    pub fn new() -> Self {
        Self
    }
}

impl SpreadsheetCodec for WorkbookCodec {
    fn read_rows(&self, bytes: &[u8], format: SheetFormat) -> Result<Vec<RawRow>> {
        match format {
            SheetFormat::Csv => read_csv_rows(bytes),
            SheetFormat::Xlsx | SheetFormat::Xls | SheetFormat::Ods => read_workbook_rows(bytes),
        }
    }

    fn write_workbook(&self, rows: &[ExportRow]) -> Result<Vec<u8>> {
        write_export_workbook(rows)
    }
}

/// Blank cells are left out of the row, the way a header-keyed sheet reader
/// omits them.
fn data_to_cell(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(text) if text.trim().is_empty() => None,
        Data::String(text) => Some(CellValue::Text(text.clone())),
        Data::Int(value) => Some(CellValue::Number(*value as f64)),
        Data::Float(value) => Some(CellValue::Number(*value)),
        Data::Bool(flag) => Some(CellValue::Bool(*flag)),
        Data::DateTime(value) => Some(
            value
                .as_datetime()
                .map(|datetime| CellValue::Text(format_sheet_datetime(datetime)))
                .unwrap_or(CellValue::Number(value.as_f64())),
        ),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Some(CellValue::Text(text.clone())),
    }
}

fn read_workbook_rows(bytes: &[u8]) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .context("Failed to open workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("workbook has no sheets"))?
        .context("Failed to read first sheet")?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect::<Vec<_>>();

    let mut out = Vec::new();
    for cells in rows {
        let mut row = RawRow::new();
        for (col, cell) in cells.iter().enumerate() {
            let Some(label) = headers.get(col).filter(|label| !label.is_empty()) else {
                continue;
            };
            if let Some(value) = data_to_cell(cell) {
                row.push(label.clone(), value);
            }
        }
        if !row.is_empty() {
            out.push(row);
        }
    }
    Ok(out)
}

fn read_csv_rows(bytes: &[u8]) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);
    let headers = reader.headers().context("Failed to read CSV header")?.clone();

    let mut out = Vec::new();
    for record in reader.records() {
        let record = record.context("Failed to read CSV row")?;
        let mut row = RawRow::new();
        for (label, value) in headers.iter().zip(record.iter()) {
            if label.is_empty() || value.trim().is_empty() {
                continue;
            }
            row.push(label, CellValue::Text(value.to_string()));
        }
        if !row.is_empty() {
            out.push(row);
        }
    }
    Ok(out)
}

fn write_export_workbook(rows: &[ExportRow]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    for (col, (header, width)) in EXPORT_COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string(0, col, *header)?;
        worksheet.set_column_width(col, *width)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let line = (row_idx + 1) as u32;
        write_text(worksheet, line, 0, &row.id)?;
        write_text(worksheet, line, 1, &row.name)?;
        write_text(worksheet, line, 2, &row.brand)?;
        write_text(worksheet, line, 3, &row.unit)?;
        worksheet.write_number(line, 4, row.quantity as f64)?;
        worksheet.write_number(line, 5, row.price)?;
        write_text(worksheet, line, 6, &row.color)?;
        write_text(worksheet, line, 7, &row.size)?;
        write_text(worksheet, line, 8, &row.shape)?;
        write_text(worksheet, line, 9, &row.person_name)?;
        write_text(worksheet, line, 10, &row.entry_date)?;
        write_text(worksheet, line, 11, &row.notes)?;
    }

    workbook
        .save_to_buffer()
        .context("Failed to render export workbook")
}

fn write_text(ws: &mut Worksheet, row: u32, col: u16, value: &str) -> Result<()> {
    if !value.is_empty() {
        ws.write_string(row, col, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend_domain::{normalize_rows, PersonDirectory};

    fn export_row() -> ExportRow {
        ExportRow {
            id: "8934563138165".to_string(),
            name: "Bút bi".to_string(),
            brand: "Thiên Long".to_string(),
            unit: "cây".to_string(),
            quantity: 12,
            price: 5000.0,
            color: "Xanh".to_string(),
            size: String::new(),
            shape: String::new(),
            person_name: "Lan".to_string(),
            entry_date: "10/05/2023 14:30".to_string(),
            notes: "Hàng mới".to_string(),
        }
    }

    #[test]
    fn exported_workbook_reimports_through_aliases() {
        let codec = WorkbookCodec::new();
        let bytes = codec.write_workbook(&[export_row()]).expect("write");
        let rows = codec.read_rows(&bytes, SheetFormat::Xlsx).expect("read");
        assert_eq!(rows.len(), 1);

        let batch = normalize_rows(&rows, &PersonDirectory::default());
        assert_eq!(batch.skipped, 0);
        let pending = &batch.pending[0];
        let record = &pending.record;
        assert_eq!(record.id, "8934563138165");
        assert_eq!(record.name, "Bút bi");
        assert_eq!(record.brand, "Thiên Long");
        assert_eq!(record.unit, "cây");
        assert_eq!(record.quantity, 12);
        assert_eq!(record.price, 5000.0);
        assert_eq!(record.color, "Xanh");
        assert_eq!(record.notes, "Hàng mới");
        assert_eq!(record.entry_timestamp.as_deref(), Some("2023-05-10T14:30"));
        assert_eq!(pending.person_name.as_deref(), Some("Lan"));
        assert_eq!(batch.unknown_people, vec!["Lan".to_string()]);
    }

    #[test]
    fn csv_rows_skip_blank_cells() {
        let csv = "Barcode,Name,Qty,Note\n123,Ly, ,dễ vỡ\n,,,\n456,Chén,3,\n";
        let rows = WorkbookCodec::new()
            .read_rows(csv.as_bytes(), SheetFormat::Csv)
            .expect("read");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells().len(), 3);
        assert_eq!(
            rows[1].cells()[2],
            ("Qty".to_string(), CellValue::Text("3".to_string()))
        );
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        let err = WorkbookCodec::new()
            .read_rows(b"definitely not a workbook", SheetFormat::Xlsx)
            .expect_err("garbage");
        assert!(err.to_string().contains("Failed to open workbook"));
    }
}
