use super::IParticipantRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use huddle_domain::{Participant, ID};

pub struct InMemoryParticipantRepo {
    participants: std::sync::Mutex<Vec<Participant>>,
}

impl InMemoryParticipantRepo {
    pub fn new() -> Self {
        Self {
            participants: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IParticipantRepo for InMemoryParticipantRepo {
    async fn insert(&self, participant: &Participant) -> anyhow::Result<()> {
        insert(participant, &self.participants);
        Ok(())
    }

    async fn find_by_meeting(&self, meeting_id: &ID) -> Vec<Participant> {
        find_by(&self.participants, |p| p.meeting_id == *meeting_id)
    }

    async fn delete_by_meeting(&self, meeting_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.participants, |p| {
            p.meeting_id == *meeting_id
        }))
    }
}
