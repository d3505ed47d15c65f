use super::INotificationRepo;
use huddle_domain::{Notification, NotificationType, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    user_uid: Uuid,
    notification_type: String,
    title: String,
    message: String,
    is_read: bool,
    meeting_uid: Option<Uuid>,
    created_at: i64,
}

impl Into<Notification> for NotificationRaw {
    fn into(self) -> Notification {
        Notification {
            id: self.notification_uid.into(),
            user_id: self.user_uid.into(),
            notification_type: self
                .notification_type
                .parse()
                .unwrap_or(NotificationType::MeetingReminder),
            title: self.title,
            message: self.message,
            is_read: self.is_read,
            meeting_id: self.meeting_uid.map(|uid| uid.into()),
            created_at: self.created_at,
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications
            (notification_uid, user_uid, notification_type, title, message, is_read, meeting_uid, created_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.user_id.inner_ref())
        .bind(notification.notification_type.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.is_read)
        .bind(notification.meeting_id.as_ref().map(|id| *id.inner_ref()))
        .bind(notification.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Notification> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.user_uid = $1
            ORDER BY n.created_at DESC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|notification| notification.into())
        .collect()
    }
}
