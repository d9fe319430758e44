// Export row entity
// A record flattened for spreadsheet output

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub unit: String,
    pub quantity: u32,
    pub price: f64,
    pub color: String,
    pub size: String,
    pub shape: String,
    pub person_name: String,
    pub entry_date: String,
    pub notes: String,
}

/// Column headers and widths of the exported sheet, in column order.
pub const EXPORT_COLUMNS: [(&str, f64); 12] = [
    ("Mã Sản Phẩm", 15.0),
    ("Tên Sản Phẩm", 25.0),
    ("Thương Hiệu", 15.0),
    ("Đơn Vị", 10.0),
    ("Số Lượng", 10.0),
    ("Giá (VND)", 15.0),
    ("Màu Sắc", 12.0),
    ("Kích Thước", 12.0),
    ("Hình Dạng", 12.0),
    ("Người Nhập", 15.0),
    ("Ngày Nhập", 20.0),
    ("Ghi Chú", 30.0),
];

pub const EXPORT_SHEET_NAME: &str = "Danh Sách Hàng Hóa";
