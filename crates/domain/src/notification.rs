use crate::shared::entity::{Entity, ID};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    MeetingReminder,
    MeetingInvitation,
    MeetingUpdated,
    MeetingCancelled,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MeetingReminder => "meeting_reminder",
            Self::MeetingInvitation => "meeting_invitation",
            Self::MeetingUpdated => "meeting_updated",
            Self::MeetingCancelled => "meeting_cancelled",
        }
    }
}

impl FromStr for NotificationType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meeting_reminder" => Ok(Self::MeetingReminder),
            "meeting_invitation" => Ok(Self::MeetingInvitation),
            "meeting_updated" => Ok(Self::MeetingUpdated),
            "meeting_cancelled" => Ok(Self::MeetingCancelled),
            _ => Err(()),
        }
    }
}

/// An in-app `Notification` shown to a `User`. References its `Meeting`
/// weakly, the reference is nulled if the `Meeting` is later deleted.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: ID,
    pub user_id: ID,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub meeting_id: Option<ID>,
    pub created_at: i64,
}

impl Notification {
    pub fn new(
        user_id: ID,
        notification_type: NotificationType,
        title: &str,
        message: &str,
        meeting_id: Option<ID>,
        created_at: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id,
            notification_type,
            title: title.into(),
            message: message.into(),
            is_read: false,
            meeting_id,
            created_at,
        }
    }
}

impl Entity for Notification {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
