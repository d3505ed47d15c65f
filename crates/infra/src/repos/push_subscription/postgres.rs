use super::IPushSubscriptionRepo;
use huddle_domain::{PushSubscription, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresPushSubscriptionRepo {
    pool: PgPool,
}

impl PostgresPushSubscriptionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PushSubscriptionRaw {
    push_subscription_uid: Uuid,
    user_uid: Uuid,
    endpoint: String,
    p256dh: String,
    auth: String,
}

impl Into<PushSubscription> for PushSubscriptionRaw {
    fn into(self) -> PushSubscription {
        PushSubscription {
            id: self.push_subscription_uid.into(),
            user_id: self.user_uid.into(),
            endpoint: self.endpoint,
            p256dh: self.p256dh,
            auth: self.auth,
        }
    }
}

#[async_trait::async_trait]
impl IPushSubscriptionRepo for PostgresPushSubscriptionRepo {
    async fn insert(&self, subscription: &PushSubscription) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO push_subscriptions
            (push_subscription_uid, user_uid, endpoint, p256dh, auth)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(subscription.id.inner_ref())
        .bind(subscription.user_id.inner_ref())
        .bind(&subscription.endpoint)
        .bind(&subscription.p256dh)
        .bind(&subscription.auth)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<PushSubscription> {
        sqlx::query_as::<_, PushSubscriptionRaw>(
            r#"
            SELECT * FROM push_subscriptions AS ps
            WHERE ps.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|subscription| subscription.into())
        .collect()
    }

    async fn delete(&self, subscription_id: &ID) -> Option<PushSubscription> {
        sqlx::query_as::<_, PushSubscriptionRaw>(
            r#"
            DELETE FROM push_subscriptions AS ps
            WHERE ps.push_subscription_uid = $1
            RETURNING *
            "#,
        )
        .bind(subscription_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|subscription| subscription.into())
    }
}
