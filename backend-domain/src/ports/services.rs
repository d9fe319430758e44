use crate::entities::{ExportRow, RawRow};
use crate::value_objects::SheetFormat;

pub trait SpreadsheetCodec: Send + Sync {
    /// Reads the first sheet; the first row holds the column labels.
    fn read_rows(&self, bytes: &[u8], format: SheetFormat) -> anyhow::Result<Vec<RawRow>>;
    fn write_workbook(&self, rows: &[ExportRow]) -> anyhow::Result<Vec<u8>>;
}
