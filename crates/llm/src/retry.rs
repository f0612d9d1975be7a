//! Retry policy for generation calls.
//!
//! Backend failures are treated as transient: the caller re-issues the
//! request after an exponentially growing pause until the attempt budget
//! is spent. The policy only computes delays; sleeping and giving up are
//! the caller's business.

use std::time::Duration;

/// Attempt budget and backoff shape for backend calls.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// Pause before the second attempt.
    pub initial_delay: Duration,
    /// Ceiling on the pause between attempts.
    pub max_delay: Duration,
    /// Growth factor applied after every failed attempt.
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Grow `current` by the configured factor, clamped to `max_delay`.
    pub fn next_delay(&self, current: Duration) -> Duration {
        let grown = current.as_millis() as f64 * self.multiplier;
        Duration::from_millis(grown as u64).min(self.max_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_grows_by_the_multiplier() {
        let config = RetryConfig {
            multiplier: 3.0,
            max_delay: Duration::from_secs(60),
            ..Default::default()
        };
        assert_eq!(config.next_delay(Duration::from_secs(2)), Duration::from_secs(6));
    }

    #[test]
    fn delay_never_exceeds_the_ceiling() {
        let config = RetryConfig {
            max_delay: Duration::from_secs(10),
            ..Default::default()
        };
        assert_eq!(config.next_delay(Duration::from_secs(8)), Duration::from_secs(10));
        assert_eq!(config.next_delay(Duration::from_secs(10)), Duration::from_secs(10));
    }

    #[test]
    fn default_sequence_is_doubling_then_clamped() {
        let config = RetryConfig::default();
        let mut delay = config.initial_delay;
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(delay.as_secs());
            delay = config.next_delay(delay);
        }
        assert_eq!(seen, [1, 2, 4, 8, 16, 30]);
    }
}
