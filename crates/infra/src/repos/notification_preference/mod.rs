mod inmemory;
mod postgres;

use huddle_domain::{NotificationPreference, ID};
pub use inmemory::InMemoryNotificationPreferenceRepo;
pub use postgres::PostgresNotificationPreferenceRepo;

#[async_trait::async_trait]
pub trait INotificationPreferenceRepo: Send + Sync {
    /// `None` means the user never stored a preference, which callers treat
    /// as all channels enabled
    async fn find_by_user(&self, user_id: &ID) -> Option<NotificationPreference>;
    async fn upsert(&self, preference: &NotificationPreference) -> anyhow::Result<()>;
}
