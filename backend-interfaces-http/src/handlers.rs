pub mod ops_handlers;
pub mod person_handlers;
pub mod record_handlers;
pub mod transfer_handlers;

pub use ops_handlers::*;
pub use person_handlers::*;
pub use record_handlers::*;
pub use transfer_handlers::*;
