mod inmemory;
mod postgres;

use huddle_domain::{PushSubscription, ID};
pub use inmemory::InMemoryPushSubscriptionRepo;
pub use postgres::PostgresPushSubscriptionRepo;

#[async_trait::async_trait]
pub trait IPushSubscriptionRepo: Send + Sync {
    async fn insert(&self, subscription: &PushSubscription) -> anyhow::Result<()>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<PushSubscription>;
    async fn delete(&self, subscription_id: &ID) -> Option<PushSubscription>;
}
