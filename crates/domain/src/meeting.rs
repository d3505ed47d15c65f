use crate::shared::entity::{Entity, ID};
use chrono_tz::{Tz, UTC};

/// A scheduled `Meeting` between an organizer and a set of `Participant`s
#[derive(Debug, Clone)]
pub struct Meeting {
    pub id: ID,
    /// The `User` that organizes this `Meeting`
    pub owner_id: ID,
    pub title: String,
    pub description: String,
    pub start_ts: i64,
    pub end_ts: i64,
    pub timezone: Tz,
    pub video_link: Option<String>,
    /// Cancellation is terminal, no reminders fire for a cancelled `Meeting`
    pub is_cancelled: bool,
    /// Minutes before `start_ts` at which a `Reminder` should fire
    pub reminder_lead_times: Vec<i64>,
}

impl Meeting {
    pub fn new(owner_id: ID, title: &str, start_ts: i64, end_ts: i64) -> Self {
        Self {
            id: Default::default(),
            owner_id,
            title: title.into(),
            description: String::new(),
            start_ts,
            end_ts,
            timezone: UTC,
            video_link: None,
            is_cancelled: false,
            reminder_lead_times: vec![15],
        }
    }

    pub fn has_started(&self, now: i64) -> bool {
        self.start_ts <= now
    }

    pub fn duration_millis(&self) -> i64 {
        self.end_ts - self.start_ts
    }

    pub fn set_timezone(&mut self, timezone: &str) -> bool {
        match timezone.parse::<Tz>() {
            Ok(tzid) => {
                self.timezone = tzid;
                true
            }
            Err(_) => false,
        }
    }
}

impl Entity for Meeting {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_start() {
        let meeting = Meeting::new(Default::default(), "Standup", 1000, 2000);
        assert!(!meeting.has_started(999));
        assert!(meeting.has_started(1000));
        assert!(meeting.has_started(1001));
        assert_eq!(meeting.duration_millis(), 1000);
    }

    #[test]
    fn set_timezone_rejects_invalid_tzid() {
        let mut meeting = Meeting::new(Default::default(), "Standup", 0, 0);
        assert!(meeting.set_timezone("Europe/Oslo"));
        assert_eq!(meeting.timezone, chrono_tz::Europe::Oslo);
        assert!(!meeting.set_timezone("Not/AZone"));
        assert_eq!(meeting.timezone, chrono_tz::Europe::Oslo);
    }
}
