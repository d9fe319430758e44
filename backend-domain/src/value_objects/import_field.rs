// Import field value object
// Target fields of the spreadsheet importer and their accepted header aliases

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportField {
    Id,
    Name,
    Brand,
    Unit,
    Quantity,
    Price,
    Color,
    Size,
    Shape,
    Notes,
    Person,
    Date,
}

/// Header substrings accepted per field. Matching is case-insensitive and
/// the first row column containing any alias wins.
pub const FIELD_ALIASES: [(ImportField, &[&str]); 12] = [
    (ImportField::Id, &["Mã Sản Phẩm", "ID", "Code", "Barcode", "Mã"]),
    (ImportField::Name, &["Tên Sản Phẩm", "Name", "Product Name", "Tên"]),
    (ImportField::Brand, &["Thương Hiệu", "Brand", "Nhãn Hiệu", "Hiệu"]),
    (ImportField::Unit, &["Đơn Vị", "Unit", "Đơn vị"]),
    (ImportField::Quantity, &["Số Lượng", "Quantity", "Qty", "SL"]),
    (ImportField::Price, &["Giá", "Price", "Cost", "Đơn Giá", "Giá (VND)"]),
    (ImportField::Color, &["Màu Sắc", "Color", "Màu"]),
    (ImportField::Size, &["Kích Thước", "Size", "Kích cỡ"]),
    (ImportField::Shape, &["Hình Dạng", "Shape", "Kiểu Dáng", "Dáng"]),
    (ImportField::Notes, &["Ghi Chú", "Notes", "Note", "Comment", "Description"]),
    (ImportField::Person, &["Người Nhập", "Person", "User", "Người"]),
    (ImportField::Date, &["Ngày Nhập", "Date", "Entry Date", "Ngày"]),
];

impl ImportField {
    pub fn aliases(&self) -> &'static [&'static str] {
        FIELD_ALIASES
            .iter()
            .find(|(field, _)| field == self)
            .map(|(_, aliases)| *aliases)
            .unwrap_or(&[])
    }
}
