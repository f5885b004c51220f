use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::customer::CustomerRecord;
use crate::repository::cache::DatasetCache;
use crate::repository::errors::FetchResult;
use crate::repository::remote::HttpCustomerSource;

pub mod cache;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod remote;

/// Produces the raw customer list for a source url.
///
/// Implementations absorb every failure and report it as `None`.
pub trait CustomerSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Option<Vec<CustomerRecord>>> + Send;
}

/// Read access to the current customer dataset.
pub trait CustomerReader {
    fn load_customers(&self) -> impl Future<Output = Option<Arc<Vec<CustomerRecord>>>> + Send;
}

/// Customer dataset served from the configured remote url through the cache.
#[derive(Debug, Clone)]
pub struct RemoteRepository {
    cache: Arc<DatasetCache<HttpCustomerSource>>,
    source_url: String,
    cache_ttl: i64,
}

impl RemoteRepository {
    /// `cache_ttl` is in seconds; zero or less disables caching.
    pub fn new(
        source_url: impl Into<String>,
        cache_ttl: i64,
        fetch_timeout: Duration,
    ) -> FetchResult<Self> {
        let source = HttpCustomerSource::new(fetch_timeout)?;
        Ok(Self {
            cache: Arc::new(DatasetCache::new(source)),
            source_url: source_url.into(),
            cache_ttl,
        })
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn cache_ttl(&self) -> i64 {
        self.cache_ttl
    }
}

impl CustomerReader for RemoteRepository {
    async fn load_customers(&self) -> Option<Arc<Vec<CustomerRecord>>> {
        self.cache.get(&self.source_url, self.cache_ttl).await
    }
}
