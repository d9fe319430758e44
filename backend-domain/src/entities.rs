// Domain entities

pub mod export_row;
pub mod import_row;
pub mod import_summary;
pub mod inventory_record;
pub mod person;
pub mod runtime_config;

pub use export_row::*;
pub use import_row::*;
pub use import_summary::*;
pub use inventory_record::*;
pub use person::*;
pub use runtime_config::*;
