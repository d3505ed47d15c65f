use crate::shared::entity::{Entity, ID};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantStatus {
    Invited,
    Accepted,
    Declined,
    Tentative,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invited => "invited",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Tentative => "tentative",
        }
    }
}

impl FromStr for ParticipantStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invited" => Ok(Self::Invited),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            "tentative" => Ok(Self::Tentative),
            _ => Err(()),
        }
    }
}

/// Membership of one email address in one `Meeting`. The email is the
/// identity, `user_id` is only set when the address belongs to a registered
/// `User`.
#[derive(Debug, Clone)]
pub struct Participant {
    pub id: ID,
    pub meeting_id: ID,
    pub email: String,
    pub user_id: Option<ID>,
    pub status: ParticipantStatus,
}

impl Participant {
    pub fn new(meeting_id: ID, email: &str) -> Self {
        Self {
            id: Default::default(),
            meeting_id,
            email: email.into(),
            user_id: None,
            status: ParticipantStatus::Invited,
        }
    }
}

impl Entity for Participant {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
