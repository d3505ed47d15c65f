mod meeting;
mod notification;
mod notification_preference;
mod participant;
mod push_subscription;
mod reminder;
mod session;
mod shared;
mod user;

pub use meeting::Meeting;
pub use notification::{Notification, NotificationType};
pub use notification_preference::NotificationPreference;
pub use participant::{Participant, ParticipantStatus};
pub use push_subscription::PushSubscription;
pub use reminder::{format_lead_time, Reminder};
pub use session::Session;
pub use shared::entity::{Entity, ID};
pub use user::User;
