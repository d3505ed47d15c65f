use super::IReminderRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use huddle_domain::{Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn bulk_insert(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        for reminder in reminders {
            insert(reminder, &self.reminders);
        }
        Ok(())
    }

    async fn find_by_meeting(&self, meeting_id: &ID) -> Vec<Reminder> {
        let mut reminders = find_by(&self.reminders, |r| r.meeting_id == *meeting_id);
        reminders.sort_by_key(|r| r.fire_at);
        reminders
    }

    /// Only the reminder level predicates are applied here, this repo does
    /// not see meetings. The due reminders use case re-checks the state of
    /// the owning meeting for every selected reminder.
    async fn find_due(&self, now: i64, lookahead: i64, limit: i64) -> anyhow::Result<Vec<Reminder>> {
        let mut due = find_by(&self.reminders, |r| {
            r.fire_at <= now + lookahead && r.sent_at.is_none()
        });
        due.sort_by_key(|r| r.fire_at);
        due.truncate(limit as usize);
        Ok(due)
    }

    async fn mark_sent(&self, reminder_id: &ID, sent_at: i64) -> anyhow::Result<()> {
        update_many(
            &self.reminders,
            |r| r.id == *reminder_id && r.sent_at.is_none(),
            |r| {
                r.sent_at = Some(sent_at);
                r.email_sent = true;
                r.push_sent = true;
                r.in_app_created = true;
            },
        );
        Ok(())
    }

    async fn delete_by_meeting(&self, meeting_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.reminders, |r| r.meeting_id == *meeting_id))
    }
}
