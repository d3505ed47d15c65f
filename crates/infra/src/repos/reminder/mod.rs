mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
use huddle_domain::{Reminder, ID};
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn bulk_insert(&self, reminders: &[Reminder]) -> anyhow::Result<()>;
    async fn find_by_meeting(&self, meeting_id: &ID) -> Vec<Reminder>;
    /// Pending reminders with a fire time before `now + lookahead`, capped
    /// at `limit` and ordered by fire time. Reminders whose meeting is
    /// cancelled or already started are excluded.
    async fn find_due(&self, now: i64, lookahead: i64, limit: i64) -> anyhow::Result<Vec<Reminder>>;
    /// Marks a pending reminder as dispatched. A reminder that already has
    /// `sent_at` set is left untouched.
    async fn mark_sent(&self, reminder_id: &ID, sent_at: i64) -> anyhow::Result<()>;
    async fn delete_by_meeting(&self, meeting_id: &ID) -> anyhow::Result<DeleteResult>;
}
