pub mod spreadsheet_codec;

pub use spreadsheet_codec::*;
