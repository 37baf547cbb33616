//! In-memory notice store using moka

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::{DomainError, Notice, NoticeStore, SessionId};

/// Configuration for the in-memory notice store
#[derive(Debug, Clone)]
pub struct NoticeStoreConfig {
    /// Maximum number of pending notices (one per session)
    pub max_capacity: u64,
    /// Lifetime ceiling of an undelivered notice
    pub ttl: Duration,
}

impl Default for NoticeStoreConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl NoticeStoreConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Notice stored in moka
#[derive(Debug, Clone)]
struct PendingNotice {
    notice: Notice,
    expires_at: Instant,
}

/// Pending notices keyed by session token
///
/// Entries expire after the configured TTL even when never delivered.
#[derive(Debug)]
pub struct InMemoryNoticeStore {
    cache: MokaCache<String, PendingNotice>,
    ttl: Duration,
}

impl InMemoryNoticeStore {
    pub fn new() -> Self {
        Self::with_config(NoticeStoreConfig::default())
    }

    pub fn with_config(config: NoticeStoreConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.ttl)
            .build();

        Self {
            cache,
            ttl: config.ttl,
        }
    }
}

impl Default for InMemoryNoticeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NoticeStore for InMemoryNoticeStore {
    async fn put(&self, session: &SessionId, notice: Notice) -> Result<(), DomainError> {
        let pending = PendingNotice {
            notice,
            expires_at: Instant::now() + self.ttl,
        };

        self.cache.insert(session.as_str().to_string(), pending).await;
        Ok(())
    }

    async fn take(&self, session: &SessionId) -> Result<Option<Notice>, DomainError> {
        // remove() may hand back an entry moka has not evicted yet
        let notice = self
            .cache
            .remove(session.as_str())
            .await
            .filter(|pending| Instant::now() < pending.expires_at)
            .map(|pending| pending.notice);

        Ok(notice)
    }
}
