use super::INotificationPreferenceRepo;
use crate::repos::shared::inmemory_repo::*;
use huddle_domain::{NotificationPreference, ID};

pub struct InMemoryNotificationPreferenceRepo {
    preferences: std::sync::Mutex<Vec<NotificationPreference>>,
}

impl InMemoryNotificationPreferenceRepo {
    pub fn new() -> Self {
        Self {
            preferences: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl INotificationPreferenceRepo for InMemoryNotificationPreferenceRepo {
    async fn find_by_user(&self, user_id: &ID) -> Option<NotificationPreference> {
        let mut preferences = find_by(&self.preferences, |p| p.user_id == *user_id);
        if preferences.is_empty() {
            return None;
        }
        Some(preferences.remove(0))
    }

    async fn upsert(&self, preference: &NotificationPreference) -> anyhow::Result<()> {
        delete_by(&self.preferences, |p| p.user_id == preference.user_id);
        insert(preference, &self.preferences);
        Ok(())
    }
}
