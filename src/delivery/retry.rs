//! Bounded retry schedule for tab delivery

use std::time::Duration;

use crate::config::{MAX_TRIES, TRIES_TIMEOUT_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay before every retry
    Fixed,
    /// Delay doubles after each failure, capped at `max_interval`
    Exponential { max_interval: Duration },
}

/// How many attempts a notification gets and how far apart they are
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_tries: u32,
    pub interval: Duration,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_tries: MAX_TRIES,
            interval: Duration::from_millis(TRIES_TIMEOUT_MS),
            backoff: Backoff::Fixed,
        }
    }
}

impl RetryPolicy {
    /// Whether attempt number `tries_count` (1-based) may run
    pub fn allows(&self, tries_count: u32) -> bool {
        tries_count <= self.max_tries
    }

    /// Delay between failed attempt `tries_count` and the next one
    pub fn delay_after(&self, tries_count: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.interval,
            Backoff::Exponential { max_interval } => {
                let exponent = tries_count.saturating_sub(1).min(31);
                self.interval
                    .checked_mul(1u32 << exponent)
                    .map_or(max_interval, |delay| delay.min(max_interval))
            }
        }
    }

    /// Longest time a notification can stay pending before being dropped
    pub fn total_window(&self) -> Duration {
        (1..=self.max_tries).map(|tries| self.delay_after(tries)).sum()
    }
}

/// State of one in-flight notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAttempt<M> {
    pub tries_count: u32,
    pub message: M,
}

impl<M> DeliveryAttempt<M> {
    pub fn first(message: M) -> Self {
        Self {
            tries_count: 1,
            message,
        }
    }

    /// The following attempt, or `None` once the counter cannot go higher
    pub fn next(self) -> Option<Self> {
        Some(Self {
            tries_count: self.tries_count.checked_add(1)?,
            message: self.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn exponential(max_secs: u64) -> RetryPolicy {
        RetryPolicy {
            max_tries: 10,
            interval: Duration::from_secs(1),
            backoff: Backoff::Exponential {
                max_interval: Duration::from_secs(max_secs),
            },
        }
    }

    #[rstest]
    #[case(1, true)]
    #[case(500, true)]
    #[case(501, false)]
    fn default_policy_allows_500_tries(#[case] tries: u32, #[case] expected: bool) {
        assert_eq!(RetryPolicy::default().allows(tries), expected);
    }

    #[test]
    fn fixed_backoff_waits_five_seconds_every_time() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_after(1), Duration::from_secs(5));
        assert_eq!(policy.delay_after(499), Duration::from_secs(5));
    }

    #[test]
    fn default_policy_window_is_about_41_minutes() {
        assert_eq!(RetryPolicy::default().total_window(), Duration::from_secs(2500));
    }

    #[rstest]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(4, 8)]
    #[case(6, 30)] // 32s capped
    #[case(40, 30)] // no overflow
    fn exponential_backoff_doubles_up_to_cap(#[case] tries: u32, #[case] expected_secs: u64) {
        assert_eq!(
            exponential(30).delay_after(tries),
            Duration::from_secs(expected_secs)
        );
    }

    #[test]
    fn zero_max_tries_allows_nothing() {
        let policy = RetryPolicy {
            max_tries: 0,
            ..RetryPolicy::default()
        };

        assert!(!policy.allows(1));
        assert_eq!(policy.total_window(), Duration::ZERO);
    }

    #[test]
    fn attempt_counter_increments_by_one() {
        let attempt = DeliveryAttempt::first("payload");
        assert_eq!(attempt.tries_count, 1);

        let attempt = attempt.next().and_then(DeliveryAttempt::next);
        assert_eq!(
            attempt,
            Some(DeliveryAttempt {
                tries_count: 3,
                message: "payload"
            })
        );
    }

    #[test]
    fn attempt_counter_stops_at_u32_max() {
        let last = DeliveryAttempt {
            tries_count: u32::MAX,
            message: "payload",
        };

        assert!(RetryPolicy {
            max_tries: u32::MAX,
            ..RetryPolicy::default()
        }
        .allows(last.tries_count));
        assert_eq!(last.next(), None);
    }
}
