mod mailer;
mod push;

pub use mailer::{IMailer, MeetingReminderEmail, SmtpMailer};
pub use push::{IPushNotifier, PushMessage, RelayPushNotifier};
