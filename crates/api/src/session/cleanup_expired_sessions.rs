use crate::shared::usecase::UseCase;
use huddle_infra::HuddleContext;
use tracing::info;

/// Deletes session rows whose refresh token expiry has passed. The sessions
/// themselves are owned by the auth component, this service only performs
/// the periodic cleanup.
#[derive(Debug)]
pub struct CleanupExpiredSessionsUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CleanupExpiredSessionsUseCase {
    type Response = i64;

    type Errors = UseCaseError;

    /// This will run every hour
    async fn execute(&mut self, ctx: &HuddleContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();
        let res = ctx
            .repos
            .sessions
            .delete_expired(now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if res.deleted_count > 0 {
            info!("Deleted {} expired sessions", res.deleted_count);
        }

        Ok(res.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use huddle_domain::{Session, User};
    use huddle_infra::ISys;
    use std::sync::Arc;

    const NOW: i64 = 1613862000000;
    const HOUR: i64 = 60 * 60 * 1000;

    struct StaticTimeSys(i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    #[actix_web::test]
    async fn deletes_only_expired_sessions() {
        let mut ctx = HuddleContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(NOW));

        let user = User::new("ola@example.com", "Ola Nordmann");
        ctx.repos.users.insert(&user).await.unwrap();
        let expired = Session::new(user.id.clone(), "expired-token", NOW - HOUR);
        let expiring_now = Session::new(user.id.clone(), "expiring-token", NOW);
        let live = Session::new(user.id.clone(), "live-token", NOW + HOUR);
        for session in [&expired, &expiring_now, &live] {
            ctx.repos.sessions.insert(session).await.unwrap();
        }

        let deleted = execute(CleanupExpiredSessionsUseCase {}, &ctx).await.unwrap();
        assert_eq!(deleted, 2);

        // The live session survives, a second run deletes nothing
        let deleted = execute(CleanupExpiredSessionsUseCase {}, &ctx).await.unwrap();
        assert_eq!(deleted, 0);
    }
}
