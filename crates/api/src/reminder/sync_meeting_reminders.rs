use crate::shared::usecase::UseCase;
use huddle_domain::{Meeting, Reminder, ID};
use huddle_infra::HuddleContext;

/// Keeps the stored `Reminder` rows of a `Meeting` in sync with its start
/// time and configured lead times. Invoked by the meeting management
/// component whenever the timing or cancellation state of a `Meeting`
/// changes.
#[derive(Debug)]
pub struct SyncMeetingRemindersUseCase<'a> {
    pub request: SyncMeetingRemindersTrigger<'a>,
}

#[derive(Debug)]
pub enum SyncMeetingRemindersTrigger<'a> {
    /// The `Meeting` has been created, or updated with a new start time or
    /// lead time list
    MeetingScheduled(&'a Meeting),
    /// The `Meeting` has been cancelled or deleted
    MeetingCancelled(&'a ID),
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl<'a> UseCase for SyncMeetingRemindersUseCase<'a> {
    type Response = ();

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &HuddleContext) -> Result<Self::Response, Self::Errors> {
        match &self.request {
            SyncMeetingRemindersTrigger::MeetingScheduled(meeting) => {
                // Delete then insert so that rescheduling can never leave
                // duplicate or stale fire times behind
                ctx.repos
                    .reminders
                    .delete_by_meeting(&meeting.id)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;

                let mut lead_times: Vec<i64> = Vec::new();
                for lead_time in &meeting.reminder_lead_times {
                    if !lead_times.contains(lead_time) {
                        lead_times.push(*lead_time);
                    }
                }

                let reminders = lead_times
                    .into_iter()
                    .map(|lead_time| {
                        Reminder::new(meeting.id.clone(), meeting.start_ts, lead_time)
                    })
                    .collect::<Vec<_>>();

                ctx.repos
                    .reminders
                    .bulk_insert(&reminders)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
            }
            SyncMeetingRemindersTrigger::MeetingCancelled(meeting_id) => {
                ctx.repos
                    .reminders
                    .delete_by_meeting(meeting_id)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
            }
        }

        Ok(())
    }
}
