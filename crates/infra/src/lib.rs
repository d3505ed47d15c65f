mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, PushConfig, SmtpConfig};
use repos::Repos;
pub use repos::DeleteResult;
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct HuddleContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn IMailer>,
    pub push: Arc<dyn IPushNotifier>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl HuddleContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let mailer = Arc::new(SmtpMailer::new(config.smtp.clone()));
        let push = Arc::new(RelayPushNotifier::new(
            config.push.clone(),
            repos.push_subscriptions.clone(),
        ));
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            mailer,
            push,
        }
    }

    /// Context backed by inmemory repositories and unconfigured channel
    /// senders, used for testing
    pub fn create_inmemory() -> Self {
        let repos = Repos::create_inmemory();
        let mailer = Arc::new(SmtpMailer::new(None));
        let push = Arc::new(RelayPushNotifier::new(
            None,
            repos.push_subscriptions.clone(),
        ));
        Self {
            repos,
            config: Config {
                port: 0,
                smtp: None,
                push: None,
            },
            sys: Arc::new(RealSys {}),
            mailer,
            push,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> HuddleContext {
    HuddleContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
