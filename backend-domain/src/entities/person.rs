// Person entity
// The entry operator credited with recording an item

use serde::{Deserialize, Serialize};

use crate::value_objects::PersonId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
}

impl Person {
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonPayload {
    pub name: String,
}
