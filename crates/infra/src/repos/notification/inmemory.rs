use super::INotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use huddle_domain::{Notification, ID};

pub struct InMemoryNotificationRepo {
    notifications: std::sync::Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Notification> {
        find_by(&self.notifications, |n| n.user_id == *user_id)
    }
}
