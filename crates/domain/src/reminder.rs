use crate::shared::entity::{Entity, ID};

/// A `Reminder` represents a specific time before the start of a `Meeting`
/// at which its `Participant`s should be notified.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `Meeting` this `Reminder` is associated with
    pub meeting_id: ID,
    /// Minutes before `Meeting::start_ts` at which this `Reminder` fires
    pub lead_time_minutes: i64,
    /// The timestamp at which the notifications should go out.
    /// Always `Meeting::start_ts - lead_time_minutes` in millis.
    pub fire_at: i64,
    pub email_sent: bool,
    pub push_sent: bool,
    pub in_app_created: bool,
    /// Set once dispatch for this `Reminder` has been attempted for every
    /// eligible `Participant`. A `Reminder` with `sent_at` set is never
    /// processed again.
    pub sent_at: Option<i64>,
}

impl Reminder {
    pub fn new(meeting_id: ID, meeting_start_ts: i64, lead_time_minutes: i64) -> Self {
        Self {
            id: Default::default(),
            meeting_id,
            lead_time_minutes,
            fire_at: meeting_start_ts - lead_time_minutes * 60 * 1000,
            email_sent: false,
            push_sent: false,
            in_app_created: false,
            sent_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.sent_at.is_none()
    }
}

impl Entity for Reminder {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// Human readable rendering of a reminder lead time, used in notification
/// copy, e.g. "15 minutes", "2 hours" or "1 day"
pub fn format_lead_time(minutes: i64) -> String {
    const MINUTES_IN_HOUR: i64 = 60;
    const MINUTES_IN_DAY: i64 = 24 * 60;

    if minutes >= MINUTES_IN_DAY && minutes % MINUTES_IN_DAY == 0 {
        match minutes / MINUTES_IN_DAY {
            1 => "1 day".into(),
            days => format!("{} days", days),
        }
    } else if minutes >= MINUTES_IN_HOUR && minutes % MINUTES_IN_HOUR == 0 {
        match minutes / MINUTES_IN_HOUR {
            1 => "1 hour".into(),
            hours => format!("{} hours", hours),
        }
    } else if minutes == 1 {
        "1 minute".into()
    } else {
        format!("{} minutes", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_fire_time_from_lead_time() {
        let meeting_id = ID::new();
        let start_ts = 1000 * 60 * 60; // one hour
        let reminder = Reminder::new(meeting_id.clone(), start_ts, 15);
        assert_eq!(reminder.meeting_id, meeting_id);
        assert_eq!(reminder.fire_at, start_ts - 15 * 60 * 1000);
        assert!(reminder.is_pending());
        assert!(!reminder.email_sent);
        assert!(!reminder.push_sent);
        assert!(!reminder.in_app_created);
    }

    #[test]
    fn formats_lead_times() {
        assert_eq!(format_lead_time(1), "1 minute");
        assert_eq!(format_lead_time(5), "5 minutes");
        assert_eq!(format_lead_time(45), "45 minutes");
        assert_eq!(format_lead_time(60), "1 hour");
        assert_eq!(format_lead_time(120), "2 hours");
        assert_eq!(format_lead_time(90), "90 minutes");
        assert_eq!(format_lead_time(24 * 60), "1 day");
        assert_eq!(format_lead_time(48 * 60), "2 days");
    }
}
