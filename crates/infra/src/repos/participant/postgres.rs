use super::IParticipantRepo;
use crate::repos::shared::repo::DeleteResult;
use huddle_domain::{Participant, ParticipantStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresParticipantRepo {
    pool: PgPool,
}

impl PostgresParticipantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ParticipantRaw {
    participant_uid: Uuid,
    meeting_uid: Uuid,
    email: String,
    user_uid: Option<Uuid>,
    status: String,
}

impl Into<Participant> for ParticipantRaw {
    fn into(self) -> Participant {
        Participant {
            id: self.participant_uid.into(),
            meeting_id: self.meeting_uid.into(),
            email: self.email,
            user_id: self.user_uid.map(|uid| uid.into()),
            status: self
                .status
                .parse()
                .unwrap_or(ParticipantStatus::Invited),
        }
    }
}

#[async_trait::async_trait]
impl IParticipantRepo for PostgresParticipantRepo {
    async fn insert(&self, participant: &Participant) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO participants
            (participant_uid, meeting_uid, email, user_uid, status)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(participant.id.inner_ref())
        .bind(participant.meeting_id.inner_ref())
        .bind(&participant.email)
        .bind(participant.user_id.as_ref().map(|id| *id.inner_ref()))
        .bind(participant.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_meeting(&self, meeting_id: &ID) -> Vec<Participant> {
        sqlx::query_as::<_, ParticipantRaw>(
            r#"
            SELECT * FROM participants AS p
            WHERE p.meeting_uid = $1
            "#,
        )
        .bind(meeting_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|participant| participant.into())
        .collect()
    }

    async fn delete_by_meeting(&self, meeting_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM participants AS p
            WHERE p.meeting_uid = $1
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
