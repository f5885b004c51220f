//! Mock implementations for isolating the cache in tests.

use chrono::{DateTime, Utc};
use mockall::mock;

use crate::repository::cache::Clock;

mock! {
    pub Clock {}

    impl Clock for Clock {
        fn now(&self) -> DateTime<Utc>;
    }
}
