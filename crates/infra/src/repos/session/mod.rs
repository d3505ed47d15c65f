mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
use huddle_domain::Session;
pub use inmemory::InMemorySessionRepo;
pub use postgres::PostgresSessionRepo;

#[async_trait::async_trait]
pub trait ISessionRepo: Send + Sync {
    async fn insert(&self, session: &Session) -> anyhow::Result<()>;
    async fn delete_expired(&self, now: i64) -> anyhow::Result<DeleteResult>;
}
