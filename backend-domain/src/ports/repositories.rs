use async_trait::async_trait;

use crate::entities::{InventoryRecord, Person};
use crate::value_objects::PersonId;

#[async_trait]
pub trait PersonRepository: Send + Sync {
    async fn list_people(&self) -> anyhow::Result<Vec<Person>>;
    async fn get_person(&self, id: PersonId) -> anyhow::Result<Option<Person>>;
    /// Case-insensitive lookup by display name.
    async fn find_person_by_name(&self, name: &str) -> anyhow::Result<Option<Person>>;
    /// Registers a new person. Fails when the name is already taken.
    async fn add_person(&self, name: &str) -> anyhow::Result<Person>;
    async fn delete_person(&self, id: PersonId) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn get_record(&self, id: &str) -> anyhow::Result<Option<InventoryRecord>>;
    /// Create-or-replace by record id.
    async fn upsert_record(&self, record: InventoryRecord) -> anyhow::Result<()>;
    async fn list_records(&self) -> anyhow::Result<Vec<InventoryRecord>>;
    async fn delete_record(&self, id: &str) -> anyhow::Result<bool>;
    async fn clear_records(&self) -> anyhow::Result<()>;
}
