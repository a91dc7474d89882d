use std::time::Duration;

/// Configuration for a timed cache
#[derive(Clone, Debug)]
pub struct TimedCacheConfig {
    /// How long entries stay valid
    pub ttl: Duration,
    /// Maximum number of entries kept
    pub capacity: usize,
}

impl Default for TimedCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            capacity: 1024,
        }
    }
}
