pub mod import_commands;
pub mod person_commands;
pub mod record_commands;
