use crate::config::PushConfig;
use crate::repos::IPushSubscriptionRepo;
use huddle_domain::{PushSubscription, ID};
use reqwest::StatusCode;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// A hanging push relay must not stall the reminder job, a slow delivery
/// counts as a channel failure
const PUSH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Serialize)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    /// Opaque payload forwarded to the client, e.g. the meeting id so the
    /// frontend can link to it
    pub data: serde_json::Value,
}

#[async_trait::async_trait]
pub trait IPushNotifier: Send + Sync {
    async fn send(&self, user_id: &ID, message: &PushMessage) -> anyhow::Result<()>;
}

enum DeliveryResult {
    Delivered,
    /// The provider reported that the endpoint no longer exists
    Gone,
    Failed(String),
}

/// Delivers Web Push notifications through an HTTP relay. Every registered
/// subscription of the user is attempted independently and subscriptions
/// reported gone by the provider are removed.
pub struct RelayPushNotifier {
    client: reqwest::Client,
    config: Option<PushConfig>,
    subscriptions: Arc<dyn IPushSubscriptionRepo>,
}

impl RelayPushNotifier {
    pub fn new(config: Option<PushConfig>, subscriptions: Arc<dyn IPushSubscriptionRepo>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(PUSH_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            config,
            subscriptions,
        }
    }

    async fn deliver(
        &self,
        config: &PushConfig,
        subscription: &PushSubscription,
        message: &PushMessage,
    ) -> DeliveryResult {
        let body = serde_json::json!({
            "endpoint": subscription.endpoint,
            "keys": {
                "p256dh": subscription.p256dh,
                "auth": subscription.auth,
            },
            "payload": message,
        });

        match self
            .client
            .post(&config.api_url)
            .bearer_auth(&config.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(res) if res.status() == StatusCode::GONE || res.status() == StatusCode::NOT_FOUND => {
                DeliveryResult::Gone
            }
            Ok(res) if res.status().is_success() => DeliveryResult::Delivered,
            Ok(res) => DeliveryResult::Failed(format!(
                "Push relay responded with status: {}",
                res.status()
            )),
            Err(e) => DeliveryResult::Failed(format!("{:?}", e)),
        }
    }
}

#[async_trait::async_trait]
impl IPushNotifier for RelayPushNotifier {
    async fn send(&self, user_id: &ID, message: &PushMessage) -> anyhow::Result<()> {
        let config = match &self.config {
            Some(config) => config,
            None => {
                info!(
                    "Push is not configured. Would have sent push notification \"{}\" to user {}.",
                    message.title, user_id
                );
                return Ok(());
            }
        };

        let subscriptions = self.subscriptions.find_by_user(user_id).await;
        for subscription in subscriptions {
            match self.deliver(config, &subscription, message).await {
                DeliveryResult::Delivered => {}
                DeliveryResult::Gone => {
                    warn!(
                        "Push endpoint for user {} is gone. Removing push subscription {}.",
                        user_id, subscription.id
                    );
                    self.subscriptions.delete(&subscription.id).await;
                }
                DeliveryResult::Failed(e) => {
                    error!(
                        "Failed to deliver push notification to endpoint of user {}: {}",
                        user_id, e
                    );
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::Repos;

    #[tokio::test]
    async fn unconfigured_notifier_is_a_noop() {
        let repos = Repos::create_inmemory();
        let notifier = RelayPushNotifier::new(None, repos.push_subscriptions.clone());
        let message = PushMessage {
            title: "Meeting Reminder".into(),
            body: "Standup starts in 5 minutes".into(),
            data: serde_json::json!({ "meetingId": ID::new().as_string() }),
        };
        assert!(notifier.send(&ID::new(), &message).await.is_ok());
    }
}
