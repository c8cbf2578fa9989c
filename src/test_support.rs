//! Shared helpers for unit tests.

use chrono::{DateTime, Duration, Local, Utc};
use mockable::Clock;
use std::sync::RwLock;

/// Clock frozen at a chosen instant that tests can move forward.
#[derive(Debug)]
pub(crate) struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub(crate) const fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub(crate) fn advance(&self, by: Duration) {
        let mut now = self.now.write().expect("clock lock poisoned");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.read().expect("clock lock poisoned")
    }
}
