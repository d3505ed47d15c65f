mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
use huddle_domain::{Participant, ID};
pub use inmemory::InMemoryParticipantRepo;
pub use postgres::PostgresParticipantRepo;

#[async_trait::async_trait]
pub trait IParticipantRepo: Send + Sync {
    async fn insert(&self, participant: &Participant) -> anyhow::Result<()>;
    async fn find_by_meeting(&self, meeting_id: &ID) -> Vec<Participant>;
    async fn delete_by_meeting(&self, meeting_id: &ID) -> anyhow::Result<DeleteResult>;
}
