use crate::{
    reminder::{
        get_due_reminders::GetDueRemindersUseCase,
        send_meeting_reminders::SendMeetingRemindersUseCase,
    },
    session::cleanup_expired_sessions::CleanupExpiredSessionsUseCase,
    shared::usecase::execute,
};
use actix_web::rt::time::{interval, sleep_until, Instant};
use huddle_infra::HuddleContext;
use std::time::Duration;

/// How often the send reminders job runs and also how far ahead it looks
/// for due reminders
pub const SEND_REMINDERS_INTERVAL_MILLIS: i64 = 60 * 1000;

const SESSION_CLEANUP_INTERVAL_SECS: u64 = 60 * 60;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

pub fn start_send_reminders_job(ctx: HuddleContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(send_reminders(context));
        }
    });
}

async fn send_reminders(context: HuddleContext) {
    let usecase = GetDueRemindersUseCase {
        lookahead_millis: SEND_REMINDERS_INTERVAL_MILLIS,
    };
    let batch = match execute(usecase, &context).await {
        Ok(batch) => batch,
        // The tick is aborted, nothing was written yet and the next timer
        // fire retries naturally
        Err(_) => return,
    };
    if batch.is_empty() {
        return;
    }

    let usecase = SendMeetingRemindersUseCase { batch };
    let _ = execute(usecase, &context).await;
}

pub fn start_session_cleanup_job(ctx: HuddleContext) {
    actix_web::rt::spawn(async move {
        let mut hourly_interval = interval(Duration::from_secs(SESSION_CLEANUP_INTERVAL_SECS));
        loop {
            hourly_interval.tick().await;
            let _ = execute(CleanupExpiredSessionsUseCase {}, &ctx).await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }
}
