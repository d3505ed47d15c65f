use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Address reminder emails are sent from
    pub from_address: String,
}

#[derive(Debug, Clone)]
pub struct PushConfig {
    /// Base url of the push relay that performs the Web Push protocol
    pub api_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// SMTP credentials. When absent the mailer only logs the emails it
    /// would have sent.
    pub smtp: Option<SmtpConfig>,
    /// Push relay credentials. When absent the push notifier only logs the
    /// pushes it would have sent.
    pub push: Option<PushConfig>,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        Self {
            port,
            smtp: Self::smtp_config(),
            push: Self::push_config(),
        }
    }

    fn smtp_config() -> Option<SmtpConfig> {
        let host = match std::env::var("SMTP_HOST") {
            Ok(host) => host,
            Err(_) => {
                info!("Did not find SMTP_HOST environment variable. Reminder emails will be logged instead of sent.");
                return None;
            }
        };
        let username = match std::env::var("SMTP_USERNAME") {
            Ok(username) => username,
            Err(_) => {
                warn!("SMTP_HOST is set but SMTP_USERNAME is missing. Reminder emails will be logged instead of sent.");
                return None;
            }
        };
        let password = match std::env::var("SMTP_PASSWORD") {
            Ok(password) => password,
            Err(_) => {
                warn!("SMTP_HOST is set but SMTP_PASSWORD is missing. Reminder emails will be logged instead of sent.");
                return None;
            }
        };
        let default_smtp_port = 587;
        let port = match std::env::var("SMTP_PORT") {
            Ok(port) => match port.parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given SMTP_PORT: {} is not valid, falling back to the default port: {}.",
                        port, default_smtp_port
                    );
                    default_smtp_port
                }
            },
            Err(_) => default_smtp_port,
        };
        let from_address = std::env::var("SMTP_FROM_ADDRESS").unwrap_or_else(|_| username.clone());

        Some(SmtpConfig {
            host,
            port,
            username,
            password,
            from_address,
        })
    }

    fn push_config() -> Option<PushConfig> {
        let api_url = match std::env::var("PUSH_API_URL") {
            Ok(api_url) => api_url,
            Err(_) => {
                info!("Did not find PUSH_API_URL environment variable. Push notifications will be logged instead of sent.");
                return None;
            }
        };
        let api_key = match std::env::var("PUSH_API_KEY") {
            Ok(api_key) => api_key,
            Err(_) => {
                warn!("PUSH_API_URL is set but PUSH_API_KEY is missing. Push notifications will be logged instead of sent.");
                return None;
            }
        };

        Some(PushConfig { api_url, api_key })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
