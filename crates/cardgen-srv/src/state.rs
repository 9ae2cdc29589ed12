//! Shared request state.

use std::net::IpAddr;
use std::num::NonZeroU32;
use std::sync::Arc;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use crate::config::ServerConfig;
use crate::SrvError;

/// State handed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    /// Server settings
    pub config: Arc<ServerConfig>,
    /// Per-IP request limiter
    pub limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
}

impl AppState {
    /// Build state from a validated configuration.
    pub fn new(config: ServerConfig) -> crate::Result<Self> {
        config.validate()?;
        let per_minute = NonZeroU32::new(config.rate_limit_per_minute).ok_or_else(|| {
            SrvError::Config("rate_limit_per_minute must be at least 1".into())
        })?;

        Ok(Self {
            config: Arc::new(config),
            limiter: Arc::new(RateLimiter::keyed(Quota::per_minute(per_minute))),
        })
    }

    /// Forget clients whose quota has fully replenished. Returns the number
    /// of clients still tracked.
    pub fn prune_limiter(&self) -> usize {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        self.limiter.len()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("listen", &self.config.listen)
            .field("rate_limit_per_minute", &self.config.rate_limit_per_minute)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::time::Duration;

    fn state() -> AppState {
        AppState::new(ServerConfig::default().with_token("t")).unwrap()
    }

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn test_prune_keeps_recent_clients() {
        let state = state();
        for last in 1..=3 {
            assert!(state.limiter.check_key(&ip(last)).is_ok());
        }

        assert_eq!(state.prune_limiter(), 3);
    }

    #[test]
    fn test_prune_drops_replenished_clients() {
        let quota = Quota::with_period(Duration::from_millis(5)).unwrap();
        let state = AppState {
            limiter: Arc::new(RateLimiter::keyed(quota)),
            ..state()
        };
        for last in 1..=50 {
            assert!(state.limiter.check_key(&ip(last)).is_ok());
        }
        assert_eq!(state.limiter.len(), 50);

        std::thread::sleep(Duration::from_millis(50));

        assert_eq!(state.prune_limiter(), 0);
        assert!(state.limiter.check_key(&ip(1)).is_ok());
    }
}
