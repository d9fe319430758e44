// Domain value objects
pub mod identifiers;
pub mod import_field;
pub mod sheet_format;

pub use identifiers::*;
pub use import_field::*;
pub use sheet_format::*;
