use crate::shared::entity::{Entity, ID};

/// Per `User` channel toggles for reminder notifications. A `User` without
/// a stored preference gets all channels enabled, new users should not
/// silently miss reminders.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationPreference {
    pub user_id: ID,
    pub email_enabled: bool,
    pub push_enabled: bool,
    pub in_app_enabled: bool,
}

impl NotificationPreference {
    pub fn all_enabled(user_id: ID) -> Self {
        Self {
            user_id,
            email_enabled: true,
            push_enabled: true,
            in_app_enabled: true,
        }
    }
}

impl Entity for NotificationPreference {
    fn id(&self) -> ID {
        self.user_id.clone()
    }
}
