use super::ISessionRepo;
use crate::repos::shared::repo::DeleteResult;
use huddle_domain::Session;
use sqlx::PgPool;

pub struct PostgresSessionRepo {
    pool: PgPool,
}

impl PostgresSessionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ISessionRepo for PostgresSessionRepo {
    async fn insert(&self, session: &Session) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions
            (session_uid, user_uid, refresh_token, expires_at)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(session.id.inner_ref())
        .bind(session.user_id.inner_ref())
        .bind(&session.refresh_token)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_expired(&self, now: i64) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM sessions AS s
            WHERE s.expires_at <= $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
