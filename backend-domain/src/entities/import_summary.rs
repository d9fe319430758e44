// Import summary entity

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub people_added: usize,
}
