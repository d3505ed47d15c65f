use super::IReminderRepo;
use crate::repos::shared::repo::DeleteResult;
use huddle_domain::{Reminder, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    meeting_uid: Uuid,
    lead_time_minutes: i64,
    fire_at: i64,
    email_sent: bool,
    push_sent: bool,
    in_app_created: bool,
    sent_at: Option<i64>,
}

impl Into<Reminder> for ReminderRaw {
    fn into(self) -> Reminder {
        Reminder {
            id: self.reminder_uid.into(),
            meeting_id: self.meeting_uid.into(),
            lead_time_minutes: self.lead_time_minutes,
            fire_at: self.fire_at,
            email_sent: self.email_sent,
            push_sent: self.push_sent,
            in_app_created: self.in_app_created,
            sent_at: self.sent_at,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn bulk_insert(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        for reminder in reminders {
            sqlx::query(
                r#"
            INSERT INTO reminders
            (reminder_uid, meeting_uid, lead_time_minutes, fire_at, email_sent, push_sent, in_app_created, sent_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
            )
            .bind(reminder.id.inner_ref())
            .bind(reminder.meeting_id.inner_ref())
            .bind(reminder.lead_time_minutes)
            .bind(reminder.fire_at)
            .bind(reminder.email_sent)
            .bind(reminder.push_sent)
            .bind(reminder.in_app_created)
            .bind(reminder.sent_at)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    async fn find_by_meeting(&self, meeting_id: &ID) -> Vec<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.meeting_uid = $1
            ORDER BY r.fire_at
            "#,
        )
        .bind(meeting_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|reminder| reminder.into())
        .collect()
    }

    async fn find_due(&self, now: i64, lookahead: i64, limit: i64) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT r.* FROM reminders AS r
            INNER JOIN meetings AS m ON m.meeting_uid = r.meeting_uid
            WHERE r.fire_at <= $1
            AND r.sent_at IS NULL
            AND m.is_cancelled = FALSE
            AND m.start_ts > $2
            ORDER BY r.fire_at
            LIMIT $3
            "#,
        )
        .bind(now + lookahead)
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|reminder| reminder.into()).collect())
    }

    async fn mark_sent(&self, reminder_id: &ID, sent_at: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET sent_at = $2,
            email_sent = TRUE,
            push_sent = TRUE,
            in_app_created = TRUE
            WHERE reminder_uid = $1 AND sent_at IS NULL
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(sent_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_by_meeting(&self, meeting_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM reminders AS r
            WHERE r.meeting_uid = $1
            "#,
        )
        .bind(meeting_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
