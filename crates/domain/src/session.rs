use crate::shared::entity::{Entity, ID};

/// A refresh token session issued by the auth component. This service only
/// deletes expired rows as a periodic maintenance task.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: ID,
    pub user_id: ID,
    pub refresh_token: String,
    pub expires_at: i64,
}

impl Session {
    pub fn new(user_id: ID, refresh_token: &str, expires_at: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            refresh_token: refresh_token.into(),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

impl Entity for Session {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
