use super::ISessionRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use huddle_domain::Session;

pub struct InMemorySessionRepo {
    sessions: std::sync::Mutex<Vec<Session>>,
}

impl InMemorySessionRepo {
    pub fn new() -> Self {
        Self {
            sessions: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ISessionRepo for InMemorySessionRepo {
    async fn insert(&self, session: &Session) -> anyhow::Result<()> {
        insert(session, &self.sessions);
        Ok(())
    }

    async fn delete_expired(&self, now: i64) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.sessions, |s| s.is_expired(now)))
    }
}
