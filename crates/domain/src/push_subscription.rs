use crate::shared::entity::{Entity, ID};

/// A Web Push endpoint registered by one of a `User`s browsers. A `User`
/// can have many, one per device or browser profile.
#[derive(Debug, Clone, PartialEq)]
pub struct PushSubscription {
    pub id: ID,
    pub user_id: ID,
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}

impl PushSubscription {
    pub fn new(user_id: ID, endpoint: &str, p256dh: &str, auth: &str) -> Self {
        Self {
            id: Default::default(),
            user_id,
            endpoint: endpoint.into(),
            p256dh: p256dh.into(),
            auth: auth.into(),
        }
    }
}

impl Entity for PushSubscription {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
