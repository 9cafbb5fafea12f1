//! Time-bounded value cache
//!
//! Holds one value together with the instant it was fetched. The clock is
//! passed in by the caller, which keeps expiry testable.

use chrono::{DateTime, Duration, Utc};

/// Default lifetime of a cached value
pub const DEFAULT_TTL_SECS: i64 = 120;

#[derive(Debug, Clone)]
pub struct TtlCache<T> {
    entry: Option<(T, DateTime<Utc>)>,
    ttl: Duration,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { entry: None, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Whether a value is cached and younger than the TTL at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match &self.entry {
            Some((_, fetched_at)) => now - *fetched_at < self.ttl,
            None => false,
        }
    }

    /// The cached value if it is still fresh at `now`
    pub fn get(&self, now: DateTime<Utc>) -> Option<&T> {
        if self.is_fresh(now) {
            self.entry.as_ref().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// The cached value regardless of age
    pub fn get_stale(&self) -> Option<&T> {
        self.entry.as_ref().map(|(value, _)| value)
    }

    /// Return the cached value, calling `refresh` first if it has expired
    ///
    /// If `refresh` fails the error is returned and the previous value, stale
    /// or not, is left in place for [`get_stale`](Self::get_stale).
    pub fn get_or_refresh<E, F>(&mut self, now: DateTime<Utc>, refresh: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let entry = match self.entry.take() {
            Some((value, fetched_at)) if now - fetched_at < self.ttl => (value, fetched_at),
            stale => match refresh() {
                Ok(value) => (value, now),
                Err(e) => {
                    self.entry = stale;
                    return Err(e);
                }
            },
        };

        Ok(&self.entry.insert(entry).0)
    }

    /// Drop the cached value so the next lookup refreshes
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

impl<T> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TTL_SECS))
    }
}
