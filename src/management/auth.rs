use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{Error, Res, types::IssuedToken};

/// Tokens are treated as expired this long before their real expiry.
pub const SAFETY_MARGIN_SECS: i64 = 60;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Performs the credential exchange that yields a fresh token.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch_token(&self) -> Res<IssuedToken>;
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Process-wide cache for the service bearer token.
///
/// The lock is held across check, refresh and store, so concurrent callers
/// that all find the token stale trigger a single exchange.
pub struct TokenManager {
    source: Arc<dyn TokenSource>,
    clock: Arc<dyn Clock>,
    token: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self::with_clock(source, Arc::new(SystemClock))
    }

    pub fn with_clock(source: Arc<dyn TokenSource>, clock: Arc<dyn Clock>) -> Self {
        TokenManager {
            source,
            clock,
            token: Mutex::new(None),
        }
    }

    pub async fn get_valid_token(&self) -> Res<String> {
        let mut token = self.token.lock().await;

        if let Some(cached) = token.as_ref() {
            if self.clock.now() < cached.expires_at {
                return Ok(cached.access_token.clone());
            }
            debug!("cached token expired, refreshing");
        }

        let issued = self.source.fetch_token().await?;
        let expires_at = expiry_after(self.clock.now(), issued.expires_in).ok_or_else(|| {
            Error::UpstreamAuth {
                status: 200,
                details: format!("token lifetime out of range: expires_in={}", issued.expires_in),
            }
        })?;
        info!(expires_in = issued.expires_in, "obtained service token");

        let access_token = issued.access_token.clone();
        *token = Some(CachedToken {
            access_token: issued.access_token,
            expires_at,
        });
        Ok(access_token)
    }

    /// Drops the cached token; the next call performs a fresh exchange.
    pub async fn invalidate(&self) {
        *self.token.lock().await = None;
    }
}

/// Instant at which a token issued at `now` stops being reused, or `None`
/// when the lifetime cannot be represented.
fn expiry_after(now: DateTime<Utc>, expires_in: u64) -> Option<DateTime<Utc>> {
    let secs = i64::try_from(expires_in).ok()?;
    let ttl = Duration::try_seconds(secs.saturating_sub(SAFETY_MARGIN_SECS))?;
    now.checked_add_signed(ttl)
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex as StdMutex,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    struct FakeClock(StdMutex<DateTime<Utc>>);

    impl FakeClock {
        fn new() -> Arc<Self> {
            Arc::new(FakeClock(StdMutex::new(Utc::now())))
        }

        fn advance(&self, secs: i64) {
            let mut now = self.0.lock().unwrap();
            *now = *now + Duration::seconds(secs);
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    struct CountingSource {
        calls: AtomicUsize,
        expires_in: u64,
    }

    impl CountingSource {
        fn new(expires_in: u64) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                expires_in,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TokenSource for CountingSource {
        async fn fetch_token(&self) -> Res<IssuedToken> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(IssuedToken {
                access_token: format!("token-{n}"),
                expires_in: self.expires_in,
            })
        }
    }

    struct UnconfiguredSource;

    #[async_trait]
    impl TokenSource for UnconfiguredSource {
        async fn fetch_token(&self) -> Res<IssuedToken> {
            Err(Error::Config {
                missing: vec!["SPOTIFY_CLIENT_ID"],
            })
        }
    }

    #[tokio::test]
    async fn token_is_reused_before_expiry() {
        let clock = FakeClock::new();
        let source = CountingSource::new(3600);
        let manager = TokenManager::with_clock(source.clone(), clock.clone());

        assert_eq!(manager.get_valid_token().await.unwrap(), "token-1");
        clock.advance(1800);
        assert_eq!(manager.get_valid_token().await.unwrap(), "token-1");
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn expired_token_triggers_exactly_one_refresh() {
        let clock = FakeClock::new();
        let source = CountingSource::new(3600);
        let manager = TokenManager::with_clock(source.clone(), clock.clone());

        manager.get_valid_token().await.unwrap();
        clock.advance(3600);
        assert_eq!(manager.get_valid_token().await.unwrap(), "token-2");
        assert_eq!(manager.get_valid_token().await.unwrap(), "token-2");
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn safety_margin_refreshes_early() {
        let clock = FakeClock::new();
        let source = CountingSource::new(3600);
        let manager = TokenManager::with_clock(source.clone(), clock.clone());

        manager.get_valid_token().await.unwrap();
        clock.advance(3600 - SAFETY_MARGIN_SECS - 1);
        manager.get_valid_token().await.unwrap();
        assert_eq!(source.calls(), 1);

        clock.advance(1);
        manager.get_valid_token().await.unwrap();
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn concurrent_stale_access_refreshes_once() {
        let source = CountingSource::new(3600);
        let manager = Arc::new(TokenManager::with_clock(source.clone(), FakeClock::new()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let manager = Arc::clone(&manager);
                tokio::spawn(async move { manager.get_valid_token().await.unwrap() })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap(), "token-1");
        }
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_refresh() {
        let source = CountingSource::new(3600);
        let manager = TokenManager::with_clock(source.clone(), FakeClock::new());

        manager.get_valid_token().await.unwrap();
        manager.invalidate().await;
        assert_eq!(manager.get_valid_token().await.unwrap(), "token-2");
    }

    #[tokio::test]
    async fn oversized_lifetime_is_an_auth_error() {
        for expires_in in [100_000_000_000_000, u64::MAX] {
            let source = CountingSource::new(expires_in);
            let manager = TokenManager::new(source.clone());

            match manager.get_valid_token().await {
                Err(Error::UpstreamAuth { details, .. }) => {
                    assert!(details.contains("expires_in"))
                }
                other => panic!("unexpected result for {expires_in}: {:?}", other),
            }
            // nothing was cached, so the next call exchanges again
            assert!(manager.get_valid_token().await.is_err());
            assert_eq!(source.calls(), 2);
        }
    }

    #[test]
    fn expiry_subtracts_margin_once() {
        let now = Utc::now();
        assert_eq!(
            expiry_after(now, 3600),
            Some(now + Duration::seconds(3600 - SAFETY_MARGIN_SECS))
        );
        assert_eq!(expiry_after(now, u64::MAX), None);
    }

    #[tokio::test]
    async fn source_errors_propagate() {
        let manager = TokenManager::new(Arc::new(UnconfiguredSource));
        let err = manager.get_valid_token().await.unwrap_err();
        assert!(err.needs_setup());
    }
}
