use crate::shared::usecase::UseCase;
use huddle_domain::{Meeting, Participant, Reminder, User};
use huddle_infra::HuddleContext;
use std::collections::HashMap;

/// Number of reminders processed per tick
pub const REMINDERS_BATCH_SIZE: i64 = 100;

/// Fetches the batch of `Reminder`s that fire within the next tick,
/// together with everything needed to notify about them
#[derive(Debug)]
pub struct GetDueRemindersUseCase {
    /// Will fetch reminders for this interval
    pub lookahead_millis: i64,
}

#[derive(Debug)]
pub struct DueReminder {
    pub reminder: Reminder,
    pub meeting: Meeting,
    pub organizer: Option<User>,
    /// Every `Participant` of the meeting with their linked `User`, if any
    pub participants: Vec<(Participant, Option<User>)>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetDueRemindersUseCase {
    type Response = Vec<DueReminder>;

    type Errors = UseCaseError;

    /// This will run every minute
    async fn execute(&mut self, ctx: &HuddleContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();

        let reminders = ctx
            .repos
            .reminders
            .find_due(now, self.lookahead_millis, REMINDERS_BATCH_SIZE)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let meeting_ids = reminders
            .iter()
            .map(|r| r.meeting_id.clone())
            .collect::<Vec<_>>();
        let meeting_lookup = ctx
            .repos
            .meetings
            .find_many(&meeting_ids)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .into_iter()
            .map(|m| (m.id.clone(), m))
            .collect::<HashMap<_, _>>();

        let mut due_reminders = Vec::with_capacity(reminders.len());
        for reminder in reminders {
            let meeting = match meeting_lookup.get(&reminder.meeting_id) {
                Some(meeting) => meeting.clone(),
                None => continue,
            };
            // A reminder for a cancelled or already started meeting is never
            // dispatched, even if a pending row is still around after
            // scheduler downtime
            if meeting.is_cancelled || meeting.has_started(now) {
                continue;
            }

            let participants = ctx.repos.participants.find_by_meeting(&meeting.id).await;
            let linked_user_ids = participants
                .iter()
                .filter_map(|p| p.user_id.clone())
                .collect::<Vec<_>>();
            let user_lookup = ctx
                .repos
                .users
                .find_many(&linked_user_ids)
                .await
                .map_err(|_| UseCaseError::StorageError)?
                .into_iter()
                .map(|u| (u.id.clone(), u))
                .collect::<HashMap<_, _>>();

            let organizer = ctx.repos.users.find(&meeting.owner_id).await;

            let participants = participants
                .into_iter()
                .map(|participant| {
                    let user = participant
                        .user_id
                        .as_ref()
                        .and_then(|user_id| user_lookup.get(user_id))
                        .cloned();
                    (participant, user)
                })
                .collect();

            due_reminders.push(DueReminder {
                reminder,
                meeting,
                organizer,
                participants,
            });
        }

        Ok(due_reminders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use huddle_infra::ISys;
    use std::sync::Arc;

    const NOW: i64 = 1613862000000; // Sun Feb 21 2021 00:00:00 CET
    const MINUTE: i64 = 60 * 1000;

    struct StaticTimeSys(i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    fn setup_ctx() -> HuddleContext {
        let mut ctx = HuddleContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(NOW));
        ctx
    }

    async fn insert_meeting(
        ctx: &HuddleContext,
        start_in_minutes: i64,
        lead_times: Vec<i64>,
    ) -> Meeting {
        let owner = User::new("owner@example.com", "Olav Organizer");
        ctx.repos.users.insert(&owner).await.unwrap();

        let mut meeting = Meeting::new(
            owner.id.clone(),
            "Standup",
            NOW + start_in_minutes * MINUTE,
            NOW + (start_in_minutes + 30) * MINUTE,
        );
        meeting.reminder_lead_times = lead_times.clone();
        ctx.repos.meetings.insert(&meeting).await.unwrap();

        let reminders = lead_times
            .iter()
            .map(|lead_time| Reminder::new(meeting.id.clone(), meeting.start_ts, *lead_time))
            .collect::<Vec<_>>();
        ctx.repos.reminders.bulk_insert(&reminders).await.unwrap();

        meeting
    }

    #[actix_web::test]
    async fn selects_only_reminders_due_within_the_lookahead() {
        let ctx = setup_ctx();
        // Starts in 16 minutes, so only the 15 minute reminder is due
        let meeting = insert_meeting(&ctx, 16, vec![15, 5]).await;

        let usecase = GetDueRemindersUseCase {
            lookahead_millis: MINUTE,
        };
        let due = execute(usecase, &ctx).await.unwrap();

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].meeting.id, meeting.id);
        assert_eq!(due[0].reminder.lead_time_minutes, 15);
    }

    #[actix_web::test]
    async fn excludes_reminders_of_cancelled_meetings() {
        let ctx = setup_ctx();
        let mut meeting = insert_meeting(&ctx, 16, vec![15]).await;
        meeting.is_cancelled = true;
        ctx.repos.meetings.save(&meeting).await.unwrap();

        let usecase = GetDueRemindersUseCase {
            lookahead_millis: MINUTE,
        };
        let due = execute(usecase, &ctx).await.unwrap();

        assert!(due.is_empty());
    }

    #[actix_web::test]
    async fn excludes_reminders_of_meetings_that_already_started() {
        let ctx = setup_ctx();
        // The meeting started five minutes ago but its reminder was never
        // dispatched, e.g. because the scheduler was down
        insert_meeting(&ctx, -5, vec![15]).await;

        let usecase = GetDueRemindersUseCase {
            lookahead_millis: MINUTE,
        };
        let due = execute(usecase, &ctx).await.unwrap();

        assert!(due.is_empty());
    }

    #[actix_web::test]
    async fn excludes_reminders_already_marked_sent() {
        let ctx = setup_ctx();
        let meeting = insert_meeting(&ctx, 10, vec![15]).await;
        let due = execute(
            GetDueRemindersUseCase {
                lookahead_millis: MINUTE,
            },
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(due.len(), 1);

        ctx.repos
            .reminders
            .mark_sent(&due[0].reminder.id, NOW)
            .await
            .unwrap();

        let due = execute(
            GetDueRemindersUseCase {
                lookahead_millis: MINUTE,
            },
            &ctx,
        )
        .await
        .unwrap();
        assert!(due.is_empty());
        // The meeting is untouched
        assert!(ctx.repos.meetings.find(&meeting.id).await.is_some());
    }

    #[actix_web::test]
    async fn resolves_participants_linked_users_and_organizer() {
        let ctx = setup_ctx();
        let meeting = insert_meeting(&ctx, 14, vec![15]).await;

        let linked_user = User::new("linked@example.com", "Linda Linked");
        ctx.repos.users.insert(&linked_user).await.unwrap();

        let mut linked = Participant::new(meeting.id.clone(), "linked@example.com");
        linked.user_id = Some(linked_user.id.clone());
        ctx.repos.participants.insert(&linked).await.unwrap();

        let unlinked = Participant::new(meeting.id.clone(), "guest@example.com");
        ctx.repos.participants.insert(&unlinked).await.unwrap();

        let usecase = GetDueRemindersUseCase {
            lookahead_millis: MINUTE,
        };
        let due = execute(usecase, &ctx).await.unwrap();

        assert_eq!(due.len(), 1);
        let due = &due[0];
        assert_eq!(due.organizer.as_ref().unwrap().full_name, "Olav Organizer");
        assert_eq!(due.participants.len(), 2);

        let linked_entry = due
            .participants
            .iter()
            .find(|(p, _)| p.email == "linked@example.com")
            .unwrap();
        assert_eq!(
            linked_entry.1.as_ref().unwrap().id,
            linked_user.id
        );
        let unlinked_entry = due
            .participants
            .iter()
            .find(|(p, _)| p.email == "guest@example.com")
            .unwrap();
        assert!(unlinked_entry.1.is_none());
    }
}
