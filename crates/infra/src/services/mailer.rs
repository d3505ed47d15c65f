use crate::config::SmtpConfig;
use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use huddle_domain::format_lead_time;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use tracing::{info, warn};

/// A hanging SMTP connection must not stall the reminder job, a slow send
/// counts as a channel failure
const SMTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Everything needed to compose a reminder email for one `Meeting`
#[derive(Debug, Clone)]
pub struct MeetingReminderEmail {
    pub meeting_title: String,
    pub meeting_description: String,
    pub start_ts: i64,
    pub end_ts: i64,
    pub timezone: Tz,
    pub video_link: Option<String>,
    pub organizer_name: String,
    pub participant_emails: Vec<String>,
    pub lead_time_minutes: i64,
}

impl MeetingReminderEmail {
    pub fn subject(&self) -> String {
        format!(
            "Reminder: {} starts in {}",
            self.meeting_title,
            format_lead_time(self.lead_time_minutes)
        )
    }

    pub fn render_html(&self) -> String {
        let mut html = format!(
            "<h2>Meeting Reminder</h2><p><strong>{}</strong> starts in {}.</p><p>{} &ndash; {} ({})</p>",
            self.meeting_title,
            format_lead_time(self.lead_time_minutes),
            self.format_ts(self.start_ts),
            self.format_ts(self.end_ts),
            self.timezone.name(),
        );
        if !self.meeting_description.is_empty() {
            html.push_str(&format!("<p>{}</p>", self.meeting_description));
        }
        if let Some(video_link) = &self.video_link {
            html.push_str(&format!(
                "<p>Join: <a href=\"{0}\">{0}</a></p>",
                video_link
            ));
        }
        if !self.organizer_name.is_empty() {
            html.push_str(&format!("<p>Organized by {}</p>", self.organizer_name));
        }
        if !self.participant_emails.is_empty() {
            html.push_str(&format!(
                "<p>Participants: {}</p>",
                self.participant_emails.join(", ")
            ));
        }
        html
    }

    fn format_ts(&self, ts: i64) -> String {
        Utc.timestamp_millis_opt(ts)
            .single()
            .unwrap_or_default()
            .with_timezone(&self.timezone)
            .format("%A, %B %-d %Y at %H:%M")
            .to_string()
    }
}

#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send(&self, to: &str, email: &MeetingReminderEmail) -> anyhow::Result<()>;
}

pub struct SmtpMailer {
    transport: Option<(AsyncSmtpTransport<Tokio1Executor>, Mailbox)>,
}

impl SmtpMailer {
    pub fn new(config: Option<SmtpConfig>) -> Self {
        Self {
            transport: config.and_then(Self::build_transport),
        }
    }

    fn build_transport(
        config: SmtpConfig,
    ) -> Option<(AsyncSmtpTransport<Tokio1Executor>, Mailbox)> {
        let from = match config.from_address.parse::<Mailbox>() {
            Ok(from) => from,
            Err(e) => {
                warn!(
                    "Invalid SMTP_FROM_ADDRESS: {}: {:?}. Reminder emails will be logged instead of sent.",
                    config.from_address, e
                );
                return None;
            }
        };
        let transport = match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host) {
            Ok(builder) => builder
                .port(config.port)
                .credentials(Credentials::new(config.username, config.password))
                .timeout(Some(SMTP_TIMEOUT))
                .build(),
            Err(e) => {
                warn!(
                    "Invalid SMTP configuration: {:?}. Reminder emails will be logged instead of sent.",
                    e
                );
                return None;
            }
        };
        Some((transport, from))
    }
}

#[async_trait::async_trait]
impl IMailer for SmtpMailer {
    async fn send(&self, to: &str, email: &MeetingReminderEmail) -> anyhow::Result<()> {
        let (transport, from) = match &self.transport {
            Some(transport) => transport,
            None => {
                info!(
                    "SMTP is not configured. Would have sent reminder email for \"{}\" to {}.",
                    email.meeting_title, to
                );
                return Ok(());
            }
        };

        let message = Message::builder()
            .from(from.clone())
            .to(to.parse()?)
            .subject(email.subject())
            .header(ContentType::TEXT_HTML)
            .body(email.render_html())?;

        transport.send(message).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_factory() -> MeetingReminderEmail {
        MeetingReminderEmail {
            meeting_title: "Quarterly planning".into(),
            meeting_description: "Agenda in the doc".into(),
            start_ts: 1613862000000, // Sun Feb 21 2021 00:00:00 CET
            end_ts: 1613865600000,
            timezone: chrono_tz::Europe::Oslo,
            video_link: Some("https://meet.example.com/abc".into()),
            organizer_name: "Kari Nordmann".into(),
            participant_emails: vec!["ola@example.com".into(), "kari@example.com".into()],
            lead_time_minutes: 15,
        }
    }

    #[test]
    fn renders_subject_with_lead_time() {
        let email = email_factory();
        assert_eq!(
            email.subject(),
            "Reminder: Quarterly planning starts in 15 minutes"
        );
    }

    #[test]
    fn renders_full_meeting_detail() {
        let email = email_factory();
        let html = email.render_html();
        assert!(html.contains("Quarterly planning"));
        assert!(html.contains("starts in 15 minutes"));
        assert!(html.contains("Agenda in the doc"));
        assert!(html.contains("https://meet.example.com/abc"));
        assert!(html.contains("Organized by Kari Nordmann"));
        assert!(html.contains("ola@example.com, kari@example.com"));
        assert!(html.contains("Europe/Oslo"));
    }

    #[test]
    fn skips_empty_sections() {
        let mut email = email_factory();
        email.meeting_description = String::new();
        email.video_link = None;
        email.organizer_name = String::new();
        email.participant_emails = vec![];
        let html = email.render_html();
        assert!(!html.contains("Join:"));
        assert!(!html.contains("Organized by"));
        assert!(!html.contains("Participants:"));
    }

    #[tokio::test]
    async fn unconfigured_mailer_is_a_noop() {
        let mailer = SmtpMailer::new(None);
        assert!(mailer
            .send("ola@example.com", &email_factory())
            .await
            .is_ok());
    }
}
