use super::get_due_reminders::DueReminder;
use crate::shared::usecase::UseCase;
use huddle_domain::{format_lead_time, Notification, NotificationPreference, NotificationType};
use huddle_infra::{HuddleContext, MeetingReminderEmail, PushMessage};
use tracing::error;

/// Fans reminder notifications out to every eligible `Participant` of the
/// meetings in the batch and marks each `Reminder` as sent afterwards
#[derive(Debug)]
pub struct SendMeetingRemindersUseCase {
    pub batch: Vec<DueReminder>,
}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for SendMeetingRemindersUseCase {
    type Response = ();

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &HuddleContext) -> Result<Self::Response, Self::Errors> {
        for due in &self.batch {
            if let Err(e) = dispatch_reminder(due, ctx).await {
                error!(
                    "Failed to process reminder {} for meeting {}: {:?}. Continuing with the next reminder.",
                    due.reminder.id, due.meeting.id, e
                );
            }
        }

        Ok(())
    }
}

async fn dispatch_reminder(due: &DueReminder, ctx: &HuddleContext) -> anyhow::Result<()> {
    let meeting = &due.meeting;
    let message = format!(
        "\"{}\" starts in {}",
        meeting.title,
        format_lead_time(due.reminder.lead_time_minutes)
    );
    let participant_emails = due
        .participants
        .iter()
        .map(|(participant, _)| participant.email.clone())
        .collect::<Vec<_>>();
    let organizer_name = due
        .organizer
        .as_ref()
        .map(|organizer| organizer.full_name.clone())
        .unwrap_or_default();

    for (_participant, user) in &due.participants {
        // Participants without a user account cannot be notified on any
        // channel, their row is left untouched
        let user = match user {
            Some(user) => user,
            None => continue,
        };

        let preference = ctx
            .repos
            .notification_preferences
            .find_by_user(&user.id)
            .await
            .unwrap_or_else(|| NotificationPreference::all_enabled(user.id.clone()));

        if preference.in_app_enabled {
            let notification = Notification::new(
                user.id.clone(),
                NotificationType::MeetingReminder,
                "Meeting Reminder",
                &message,
                Some(meeting.id.clone()),
                ctx.sys.get_timestamp_millis(),
            );
            if let Err(e) = ctx.repos.notifications.insert(&notification).await {
                error!(
                    "Failed to create reminder notification for user {}: {:?}",
                    user.id, e
                );
            }
        }

        if preference.email_enabled {
            let email = MeetingReminderEmail {
                meeting_title: meeting.title.clone(),
                meeting_description: meeting.description.clone(),
                start_ts: meeting.start_ts,
                end_ts: meeting.end_ts,
                timezone: meeting.timezone,
                video_link: meeting.video_link.clone(),
                organizer_name: organizer_name.clone(),
                participant_emails: participant_emails.clone(),
                lead_time_minutes: due.reminder.lead_time_minutes,
            };
            if let Err(e) = ctx.mailer.send(&user.email, &email).await {
                error!("Failed to send reminder email to {}: {:?}", user.email, e);
            }
        }

        if preference.push_enabled {
            let push_message = PushMessage {
                title: "Meeting Reminder".into(),
                body: message.clone(),
                data: serde_json::json!({ "meetingId": meeting.id.as_string() }),
            };
            if let Err(e) = ctx.push.send(&user.id, &push_message).await {
                error!(
                    "Failed to send reminder push notification to user {}: {:?}",
                    user.id, e
                );
            }
        }
    }

    // The completion flags record that dispatch was attempted for every
    // participant, not that every channel delivered
    ctx.repos
        .reminders
        .mark_sent(&due.reminder.id, ctx.sys.get_timestamp_millis())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::get_due_reminders::GetDueRemindersUseCase;
    use crate::shared::usecase::execute;
    use huddle_domain::{Meeting, Participant, Reminder, User, ID};
    use huddle_infra::{IMailer, IPushNotifier, ISys};
    use std::sync::{Arc, Mutex};

    const NOW: i64 = 1613862000000; // Sun Feb 21 2021 00:00:00 CET
    const MINUTE: i64 = 60 * 1000;

    struct StaticTimeSys(i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    #[derive(Default)]
    struct RecordingMailer {
        sent_to: Mutex<Vec<String>>,
        fail_for: Option<String>,
    }

    #[async_trait::async_trait]
    impl IMailer for RecordingMailer {
        async fn send(&self, to: &str, _email: &MeetingReminderEmail) -> anyhow::Result<()> {
            if self.fail_for.as_deref() == Some(to) {
                anyhow::bail!("SMTP transport unavailable");
            }
            self.sent_to.lock().unwrap().push(to.into());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingPushNotifier {
        sent_to: Mutex<Vec<ID>>,
    }

    #[async_trait::async_trait]
    impl IPushNotifier for RecordingPushNotifier {
        async fn send(&self, user_id: &ID, _message: &PushMessage) -> anyhow::Result<()> {
            self.sent_to.lock().unwrap().push(user_id.clone());
            Ok(())
        }
    }

    struct TestContext {
        ctx: HuddleContext,
        mailer: Arc<RecordingMailer>,
        push: Arc<RecordingPushNotifier>,
    }

    fn setup() -> TestContext {
        setup_with_mailer(RecordingMailer::default())
    }

    fn setup_with_mailer(mailer: RecordingMailer) -> TestContext {
        let mut ctx = HuddleContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(NOW));
        let mailer = Arc::new(mailer);
        let push = Arc::new(RecordingPushNotifier::default());
        ctx.mailer = mailer.clone();
        ctx.push = push.clone();
        TestContext { ctx, mailer, push }
    }

    async fn insert_meeting(ctx: &HuddleContext, lead_times: Vec<i64>) -> Meeting {
        let owner = User::new("owner@example.com", "Olav Organizer");
        ctx.repos.users.insert(&owner).await.unwrap();

        // Starts in 16 minutes so that only a 15 minute reminder is due
        let mut meeting = Meeting::new(
            owner.id.clone(),
            "Quarterly planning",
            NOW + 16 * MINUTE,
            NOW + 76 * MINUTE,
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

    async fn insert_linked_participant(ctx: &HuddleContext, meeting: &Meeting, email: &str) -> User {
        let user = User::new(email, email);
        ctx.repos.users.insert(&user).await.unwrap();
        let mut participant = Participant::new(meeting.id.clone(), email);
        participant.user_id = Some(user.id.clone());
        ctx.repos.participants.insert(&participant).await.unwrap();
        user
    }

    async fn run_tick(ctx: &HuddleContext) {
        let batch = execute(
            GetDueRemindersUseCase {
                lookahead_millis: MINUTE,
            },
            ctx,
        )
        .await
        .unwrap();
        execute(SendMeetingRemindersUseCase { batch }, ctx)
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn dispatches_due_reminder_and_leaves_later_one_pending() {
        let test_ctx = setup();
        let ctx = &test_ctx.ctx;
        let meeting = insert_meeting(ctx, vec![15, 5]).await;
        let user = insert_linked_participant(ctx, &meeting, "ola@example.com").await;

        run_tick(ctx).await;

        // All three channels were attempted
        let notifications = ctx.repos.notifications.find_by_user(&user.id).await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, "Meeting Reminder");
        assert_eq!(
            notifications[0].message,
            "\"Quarterly planning\" starts in 15 minutes"
        );
        assert_eq!(notifications[0].meeting_id, Some(meeting.id.clone()));
        assert_eq!(
            *test_ctx.mailer.sent_to.lock().unwrap(),
            vec!["ola@example.com".to_string()]
        );
        assert_eq!(*test_ctx.push.sent_to.lock().unwrap(), vec![user.id.clone()]);

        // The 15 minute reminder is sent, the 5 minute one remains pending
        let reminders = ctx.repos.reminders.find_by_meeting(&meeting.id).await;
        assert_eq!(reminders.len(), 2);
        let sent = reminders
            .iter()
            .find(|r| r.lead_time_minutes == 15)
            .unwrap();
        assert_eq!(sent.sent_at, Some(NOW));
        assert!(sent.email_sent && sent.push_sent && sent.in_app_created);
        let pending = reminders.iter().find(|r| r.lead_time_minutes == 5).unwrap();
        assert!(pending.is_pending());

        // A second tick does not dispatch the same reminder again
        run_tick(ctx).await;
        assert_eq!(ctx.repos.notifications.find_by_user(&user.id).await.len(), 1);
        assert_eq!(test_ctx.mailer.sent_to.lock().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn channel_failure_does_not_block_other_participants() {
        let test_ctx = setup_with_mailer(RecordingMailer {
            sent_to: Mutex::new(vec![]),
            fail_for: Some("ola@example.com".into()),
        });
        let ctx = &test_ctx.ctx;
        let meeting = insert_meeting(ctx, vec![15]).await;
        let failing_user = insert_linked_participant(ctx, &meeting, "ola@example.com").await;
        let other_user = insert_linked_participant(ctx, &meeting, "kari@example.com").await;

        run_tick(ctx).await;

        // The failing email did not prevent the other channels for the same
        // participant
        assert_eq!(
            ctx.repos
                .notifications
                .find_by_user(&failing_user.id)
                .await
                .len(),
            1
        );
        let pushed_to = test_ctx.push.sent_to.lock().unwrap().clone();
        assert!(pushed_to.contains(&failing_user.id));

        // And the other participant got everything
        assert_eq!(
            *test_ctx.mailer.sent_to.lock().unwrap(),
            vec!["kari@example.com".to_string()]
        );
        assert!(pushed_to.contains(&other_user.id));
        assert_eq!(
            ctx.repos
                .notifications
                .find_by_user(&other_user.id)
                .await
                .len(),
            1
        );

        // The reminder is still marked fully sent
        let reminders = ctx.repos.reminders.find_by_meeting(&meeting.id).await;
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].sent_at, Some(NOW));
        assert!(reminders[0].email_sent && reminders[0].push_sent && reminders[0].in_app_created);
    }

    #[actix_web::test]
    async fn participants_without_account_are_skipped() {
        let test_ctx = setup();
        let ctx = &test_ctx.ctx;
        let meeting = insert_meeting(ctx, vec![15]).await;
        let participant = Participant::new(meeting.id.clone(), "guest@example.com");
        ctx.repos.participants.insert(&participant).await.unwrap();

        run_tick(ctx).await;

        assert!(test_ctx.mailer.sent_to.lock().unwrap().is_empty());
        assert!(test_ctx.push.sent_to.lock().unwrap().is_empty());

        // The participant row survives and the reminder is still marked sent
        assert_eq!(
            ctx.repos.participants.find_by_meeting(&meeting.id).await.len(),
            1
        );
        let reminders = ctx.repos.reminders.find_by_meeting(&meeting.id).await;
        assert_eq!(reminders[0].sent_at, Some(NOW));
    }

    #[actix_web::test]
    async fn respects_channel_preferences() {
        let test_ctx = setup();
        let ctx = &test_ctx.ctx;
        let meeting = insert_meeting(ctx, vec![15]).await;
        let user = insert_linked_participant(ctx, &meeting, "ola@example.com").await;

        let mut preference = NotificationPreference::all_enabled(user.id.clone());
        preference.push_enabled = false;
        ctx.repos
            .notification_preferences
            .upsert(&preference)
            .await
            .unwrap();

        run_tick(ctx).await;

        // Push is suppressed while email and in-app proceed
        assert!(test_ctx.push.sent_to.lock().unwrap().is_empty());
        assert_eq!(
            *test_ctx.mailer.sent_to.lock().unwrap(),
            vec!["ola@example.com".to_string()]
        );
        assert_eq!(ctx.repos.notifications.find_by_user(&user.id).await.len(), 1);
    }

    #[actix_web::test]
    async fn missing_preference_row_enables_all_channels() {
        let test_ctx = setup();
        let ctx = &test_ctx.ctx;
        let meeting = insert_meeting(ctx, vec![15]).await;
        let user = insert_linked_participant(ctx, &meeting, "ola@example.com").await;
        assert!(ctx
            .repos
            .notification_preferences
            .find_by_user(&user.id)
            .await
            .is_none());

        run_tick(ctx).await;

        assert_eq!(test_ctx.mailer.sent_to.lock().unwrap().len(), 1);
        assert_eq!(test_ctx.push.sent_to.lock().unwrap().len(), 1);
        assert_eq!(ctx.repos.notifications.find_by_user(&user.id).await.len(), 1);
    }
}
