mod meeting;
mod notification;
mod notification_preference;
mod participant;
mod push_subscription;
mod reminder;
mod session;
mod shared;
mod user;

use meeting::{IMeetingRepo, InMemoryMeetingRepo, PostgresMeetingRepo};
use notification::{INotificationRepo, InMemoryNotificationRepo, PostgresNotificationRepo};
use notification_preference::{
    INotificationPreferenceRepo, InMemoryNotificationPreferenceRepo,
    PostgresNotificationPreferenceRepo,
};
use participant::{IParticipantRepo, InMemoryParticipantRepo, PostgresParticipantRepo};
use push_subscription::{InMemoryPushSubscriptionRepo, PostgresPushSubscriptionRepo};
use reminder::{IReminderRepo, InMemoryReminderRepo, PostgresReminderRepo};
use session::{ISessionRepo, InMemorySessionRepo, PostgresSessionRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo};

pub use push_subscription::IPushSubscriptionRepo;
pub use shared::repo::DeleteResult;

#[derive(Clone)]
pub struct Repos {
    pub meetings: Arc<dyn IMeetingRepo>,
    pub participants: Arc<dyn IParticipantRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
    pub notification_preferences: Arc<dyn INotificationPreferenceRepo>,
    pub push_subscriptions: Arc<dyn IPushSubscriptionRepo>,
    pub sessions: Arc<dyn ISessionRepo>,
    pub users: Arc<dyn IUserRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        // This is needed to make sure that db is ready when opening server
        info!("DB CHECKING CONNECTION ...");
        sqlx::query("SELECT 1").execute(&pool).await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            meetings: Arc::new(PostgresMeetingRepo::new(pool.clone())),
            participants: Arc::new(PostgresParticipantRepo::new(pool.clone())),
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepo::new(pool.clone())),
            notification_preferences: Arc::new(PostgresNotificationPreferenceRepo::new(
                pool.clone(),
            )),
            push_subscriptions: Arc::new(PostgresPushSubscriptionRepo::new(pool.clone())),
            sessions: Arc::new(PostgresSessionRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            meetings: Arc::new(InMemoryMeetingRepo::new()),
            participants: Arc::new(InMemoryParticipantRepo::new()),
            reminders: Arc::new(InMemoryReminderRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
            notification_preferences: Arc::new(InMemoryNotificationPreferenceRepo::new()),
            push_subscriptions: Arc::new(InMemoryPushSubscriptionRepo::new()),
            sessions: Arc::new(InMemorySessionRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
        }
    }
}
