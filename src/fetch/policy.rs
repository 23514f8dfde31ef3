//! Fetch policy: staleness, scheduled refetch and retry backoff

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// A result younger than this is served from cache on refresh requests
    pub stale_time: Duration,
    /// Unconditional refetch period; None disables scheduled refetch
    pub refetch_interval: Option<Duration>,
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Upper bound for any retry delay
    pub max_delay: Duration,
    /// Refetch immediately when the host reports a reconnect
    pub refetch_on_reconnect: bool,
}

impl FetchPolicy {
    /// Delay before retry `attempt` (0-indexed): `min(base * 2^attempt, max)`
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Whether a result `age` old should be refetched on a refresh request
    pub fn is_stale(&self, age: Duration) -> bool {
        age >= self.stale_time
    }

    pub fn with_refetch_interval(mut self, interval: Option<Duration>) -> Self {
        self.refetch_interval = interval;
        self
    }

    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    pub fn with_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            stale_time: Duration::ZERO,
            refetch_interval: None,
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            refetch_on_reconnect: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_doubles_then_caps() {
        let policy = FetchPolicy::default();
        let delays: Vec<u64> = (0..7)
            .map(|i| policy.retry_delay(i).as_millis() as u64)
            .collect();
        assert_eq!(delays, vec![1000, 2000, 4000, 8000, 16000, 30000, 30000]);
    }

    #[test]
    fn test_retry_delay_huge_attempt_does_not_overflow() {
        let policy = FetchPolicy::default();
        assert_eq!(policy.retry_delay(64), Duration::from_secs(30));
        assert_eq!(policy.retry_delay(u32::MAX), Duration::from_secs(30));
    }

    #[test]
    fn test_staleness_window() {
        let policy = FetchPolicy::default().with_stale_time(Duration::from_secs(25));
        assert!(!policy.is_stale(Duration::from_secs(10)));
        assert!(policy.is_stale(Duration::from_secs(25)));

        // Zero stale time: every refresh goes to the network
        assert!(FetchPolicy::default().is_stale(Duration::ZERO));
    }
}
