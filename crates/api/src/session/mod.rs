pub mod cleanup_expired_sessions;
