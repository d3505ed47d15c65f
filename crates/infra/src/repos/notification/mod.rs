mod inmemory;
mod postgres;

use huddle_domain::{Notification, ID};
pub use inmemory::InMemoryNotificationRepo;
pub use postgres::PostgresNotificationRepo;

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<Notification>;
}
