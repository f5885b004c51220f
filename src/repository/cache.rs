//! Time-bounded in-memory cache in front of a [`CustomerSource`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::{Mutex, OnceCell, RwLock};

use crate::domain::customer::CustomerRecord;
use crate::repository::CustomerSource;

/// Source of the current time for expiry checks.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Cache key for a source url.
pub fn cache_key(url: &str) -> String {
    format!("customers.remote.{:x}", md5::compute(url))
}

#[derive(Debug)]
struct CacheEntry {
    records: Arc<Vec<CustomerRecord>>,
    expires_at: DateTime<Utc>,
}

type Snapshot = Option<Arc<Vec<CustomerRecord>>>;

/// Outcome of one outbound fetch, shared by every caller that missed while
/// it was running.
type Refill = Arc<OnceCell<Snapshot>>;

/// Caches datasets per source url for a caller-supplied TTL.
///
/// Snapshots are stored behind an `Arc` and replaced whole, so readers never
/// observe a partially refreshed dataset. Concurrent misses on the same url
/// join a single in-flight fetch and all receive its outcome, including a
/// failure. Misses on different urls never wait on each other. Failed
/// fetches are never stored.
#[derive(Debug)]
pub struct DatasetCache<S, C = SystemClock> {
    source: S,
    clock: C,
    entries: RwLock<HashMap<String, CacheEntry>>,
    refills: Mutex<HashMap<String, Refill>>,
}

impl<S> DatasetCache<S, SystemClock> {
    pub fn new(source: S) -> Self {
        Self::with_clock(source, SystemClock)
    }
}

impl<S, C> DatasetCache<S, C> {
    pub fn with_clock(source: S, clock: C) -> Self {
        Self {
            source,
            clock,
            entries: RwLock::new(HashMap::new()),
            refills: Mutex::new(HashMap::new()),
        }
    }
}

impl<S, C> DatasetCache<S, C>
where
    S: CustomerSource,
    C: Clock,
{
    /// Returns the dataset for `url`, fetching it when absent or expired.
    ///
    /// A `ttl` (seconds) of zero or less bypasses the cache entirely.
    pub async fn get(&self, url: &str, ttl: i64) -> Snapshot {
        if ttl <= 0 {
            return self.source.fetch(url).await.map(Arc::new);
        }

        let key = cache_key(url);
        if let Some(records) = self.lookup(&key).await {
            return Some(records);
        }

        let refill = self.join_refill(&key).await;
        let outcome = refill
            .get_or_init(|| self.fetch_and_store(url, &key, ttl))
            .await
            .clone();

        let mut refills = self.refills.lock().await;
        if refills
            .get(&key)
            .is_some_and(|current| Arc::ptr_eq(current, &refill))
        {
            refills.remove(&key);
        }

        outcome
    }

    /// Returns the running refill for `key`, or registers a new one.
    ///
    /// A finished refill left behind by a cancelled caller is replaced.
    async fn join_refill(&self, key: &str) -> Refill {
        let mut refills = self.refills.lock().await;
        match refills.get(key) {
            Some(refill) if !refill.initialized() => Arc::clone(refill),
            _ => {
                let refill = Refill::default();
                refills.insert(key.to_string(), Arc::clone(&refill));
                refill
            }
        }
    }

    async fn fetch_and_store(&self, url: &str, key: &str, ttl: i64) -> Snapshot {
        if let Some(records) = self.lookup(key).await {
            log::debug!("Customer dataset refreshed by a concurrent request");
            return Some(records);
        }

        let records = Arc::new(self.source.fetch(url).await?);

        let now = self.clock.now();
        let expires_at = TimeDelta::try_seconds(ttl)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        log::info!(
            "Cached {} customer records until {expires_at}",
            records.len()
        );

        self.entries.write().await.insert(
            key.to_string(),
            CacheEntry {
                records: Arc::clone(&records),
                expires_at,
            },
        );

        Some(records)
    }

    async fn lookup(&self, key: &str) -> Snapshot {
        let now = self.clock.now();
        self.entries
            .read()
            .await
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| Arc::clone(&entry.records))
    }
}
