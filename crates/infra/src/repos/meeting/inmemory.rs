use super::IMeetingRepo;
use crate::repos::shared::inmemory_repo::*;
use huddle_domain::{Meeting, ID};

pub struct InMemoryMeetingRepo {
    meetings: std::sync::Mutex<Vec<Meeting>>,
}

impl InMemoryMeetingRepo {
    pub fn new() -> Self {
        Self {
            meetings: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IMeetingRepo for InMemoryMeetingRepo {
    async fn insert(&self, meeting: &Meeting) -> anyhow::Result<()> {
        insert(meeting, &self.meetings);
        Ok(())
    }

    async fn save(&self, meeting: &Meeting) -> anyhow::Result<()> {
        save(meeting, &self.meetings);
        Ok(())
    }

    async fn find(&self, meeting_id: &ID) -> Option<Meeting> {
        find(meeting_id, &self.meetings)
    }

    async fn find_many(&self, meeting_ids: &[ID]) -> anyhow::Result<Vec<Meeting>> {
        Ok(find_by(&self.meetings, |m| meeting_ids.contains(&m.id)))
    }
}
