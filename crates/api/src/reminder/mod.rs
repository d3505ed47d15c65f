pub mod get_due_reminders;
pub mod send_meeting_reminders;
pub mod sync_meeting_reminders;
