mod inmemory;
mod postgres;

use huddle_domain::{Meeting, ID};
pub use inmemory::InMemoryMeetingRepo;
pub use postgres::PostgresMeetingRepo;

#[async_trait::async_trait]
pub trait IMeetingRepo: Send + Sync {
    async fn insert(&self, meeting: &Meeting) -> anyhow::Result<()>;
    async fn save(&self, meeting: &Meeting) -> anyhow::Result<()>;
    async fn find(&self, meeting_id: &ID) -> Option<Meeting>;
    async fn find_many(&self, meeting_ids: &[ID]) -> anyhow::Result<Vec<Meeting>>;
}
