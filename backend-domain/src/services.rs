// Domain services

pub mod entry_date;
pub mod export_format;
pub mod import_normalizer;
pub mod person_directory;

pub use entry_date::*;
pub use export_format::*;
pub use import_normalizer::*;
pub use person_directory::*;
