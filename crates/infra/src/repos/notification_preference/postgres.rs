use super::INotificationPreferenceRepo;
use huddle_domain::{NotificationPreference, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresNotificationPreferenceRepo {
    pool: PgPool,
}

impl PostgresNotificationPreferenceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationPreferenceRaw {
    user_uid: Uuid,
    email_enabled: bool,
    push_enabled: bool,
    in_app_enabled: bool,
}

impl Into<NotificationPreference> for NotificationPreferenceRaw {
    fn into(self) -> NotificationPreference {
        NotificationPreference {
            user_id: self.user_uid.into(),
            email_enabled: self.email_enabled,
            push_enabled: self.push_enabled,
            in_app_enabled: self.in_app_enabled,
        }
    }
}

#[async_trait::async_trait]
impl INotificationPreferenceRepo for PostgresNotificationPreferenceRepo {
    async fn find_by_user(&self, user_id: &ID) -> Option<NotificationPreference> {
        sqlx::query_as::<_, NotificationPreferenceRaw>(
            r#"
            SELECT * FROM notification_preferences AS np
            WHERE np.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|preference| preference.into())
    }

    async fn upsert(&self, preference: &NotificationPreference) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notification_preferences
            (user_uid, email_enabled, push_enabled, in_app_enabled)
            VALUES($1, $2, $3, $4)
            ON CONFLICT (user_uid) DO UPDATE
            SET email_enabled = $2,
            push_enabled = $3,
            in_app_enabled = $4
            "#,
        )
        .bind(preference.user_id.inner_ref())
        .bind(preference.email_enabled)
        .bind(preference.push_enabled)
        .bind(preference.in_app_enabled)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
