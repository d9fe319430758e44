pub mod export_queries;
pub mod person_queries;
pub mod record_queries;
