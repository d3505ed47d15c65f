use super::IMeetingRepo;
use huddle_domain::{Meeting, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresMeetingRepo {
    pool: PgPool,
}

impl PostgresMeetingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MeetingRaw {
    meeting_uid: Uuid,
    owner_uid: Uuid,
    title: String,
    description: String,
    start_ts: i64,
    end_ts: i64,
    timezone: String,
    video_link: Option<String>,
    is_cancelled: bool,
    reminder_lead_times: Vec<i64>,
}

impl Into<Meeting> for MeetingRaw {
    fn into(self) -> Meeting {
        Meeting {
            id: self.meeting_uid.into(),
            owner_id: self.owner_uid.into(),
            title: self.title,
            description: self.description,
            start_ts: self.start_ts,
            end_ts: self.end_ts,
            timezone: self.timezone.parse().unwrap_or(chrono_tz::UTC),
            video_link: self.video_link,
            is_cancelled: self.is_cancelled,
            reminder_lead_times: self.reminder_lead_times,
        }
    }
}

#[async_trait::async_trait]
impl IMeetingRepo for PostgresMeetingRepo {
    async fn insert(&self, meeting: &Meeting) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO meetings
            (meeting_uid, owner_uid, title, description, start_ts, end_ts, timezone, video_link, is_cancelled, reminder_lead_times)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(meeting.id.inner_ref())
        .bind(meeting.owner_id.inner_ref())
        .bind(&meeting.title)
        .bind(&meeting.description)
        .bind(meeting.start_ts)
        .bind(meeting.end_ts)
        .bind(meeting.timezone.name())
        .bind(&meeting.video_link)
        .bind(meeting.is_cancelled)
        .bind(&meeting.reminder_lead_times)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, meeting: &Meeting) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE meetings
            SET title = $2,
            description = $3,
            start_ts = $4,
            end_ts = $5,
            timezone = $6,
            video_link = $7,
            is_cancelled = $8,
            reminder_lead_times = $9
            WHERE meeting_uid = $1
            "#,
        )
        .bind(meeting.id.inner_ref())
        .bind(&meeting.title)
        .bind(&meeting.description)
        .bind(meeting.start_ts)
        .bind(meeting.end_ts)
        .bind(meeting.timezone.name())
        .bind(&meeting.video_link)
        .bind(meeting.is_cancelled)
        .bind(&meeting.reminder_lead_times)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, meeting_id: &ID) -> Option<Meeting> {
        sqlx::query_as::<_, MeetingRaw>(
            r#"
            SELECT * FROM meetings AS m
            WHERE m.meeting_uid = $1
            "#,
        )
        .bind(meeting_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|meeting| meeting.into())
    }

    async fn find_many(&self, meeting_ids: &[ID]) -> anyhow::Result<Vec<Meeting>> {
        let ids = meeting_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();

        let meetings = sqlx::query_as::<_, MeetingRaw>(
            r#"
            SELECT * FROM meetings AS m
            WHERE m.meeting_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(meetings.into_iter().map(|meeting| meeting.into()).collect())
    }
}
