//! Bounded fixed-interval retry.
//!
//! The loop itself is synchronous; waiting goes through [`Sleeper`] so callers
//! can substitute a recording implementation instead of blocking.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Blocks the current thread between attempts.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeps on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// How a bounded retry ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    Succeeded { attempts: u32 },
    Exhausted { attempts: u32 },
}

impl RetryOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, RetryOutcome::Succeeded { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            RetryOutcome::Succeeded { attempts } | RetryOutcome::Exhausted { attempts } => {
                *attempts
            }
        }
    }
}

/// Retry up to `max_attempts` times with a constant pause between attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedRetry {
    pub max_attempts: u32,
    /// Pause between attempts (in milliseconds for serde).
    pub delay_ms: u64,
}

impl Default for FixedRetry {
    /// Ten attempts, fifteen seconds apart.
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay_ms: 15_000,
        }
    }
}

impl FixedRetry {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Calls `attempt` (with the 1-based attempt number) until it returns
    /// `Ok(true)` or attempts run out. An `Err` aborts the loop immediately.
    /// There is no pause after the last attempt.
    pub fn run<E>(
        &self,
        sleeper: &dyn Sleeper,
        mut attempt: impl FnMut(u32) -> Result<bool, E>,
    ) -> Result<RetryOutcome, E> {
        for n in 1..=self.max_attempts {
            if attempt(n)? {
                return Ok(RetryOutcome::Succeeded { attempts: n });
            }
            if n < self.max_attempts {
                debug!(attempt = n, delay_ms = self.delay_ms, "attempt failed, waiting");
                sleeper.sleep(self.delay());
            }
        }
        Ok(RetryOutcome::Exhausted {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::convert::Infallible;

    use super::*;

    #[derive(Default)]
    struct RecordingSleeper {
        slept: RefCell<Vec<Duration>>,
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.slept.borrow_mut().push(duration);
        }
    }

    #[test]
    fn test_default_policy() {
        let p = FixedRetry::default();
        assert_eq!(p.max_attempts, 10);
        assert_eq!(p.delay(), Duration::from_secs(15));
    }

    #[test]
    fn test_success_on_first_attempt_never_sleeps() {
        let sleeper = RecordingSleeper::default();
        let outcome = FixedRetry::default()
            .run(&sleeper, |_| Ok::<_, Infallible>(true))
            .unwrap();
        assert_eq!(outcome, RetryOutcome::Succeeded { attempts: 1 });
        assert!(sleeper.slept.borrow().is_empty());
    }

    #[test]
    fn test_stops_right_after_success_on_last_attempt() {
        let sleeper = RecordingSleeper::default();
        let mut calls = 0;
        let outcome = FixedRetry::default()
            .run(&sleeper, |n| {
                calls += 1;
                Ok::<_, Infallible>(n == 10)
            })
            .unwrap();
        assert_eq!(outcome, RetryOutcome::Succeeded { attempts: 10 });
        assert_eq!(calls, 10);
        assert_eq!(sleeper.slept.borrow().len(), 9);
    }

    #[test]
    fn test_exhausted() {
        let sleeper = RecordingSleeper::default();
        let policy = FixedRetry {
            max_attempts: 3,
            delay_ms: 5,
        };
        let outcome = policy.run(&sleeper, |_| Ok::<_, Infallible>(false)).unwrap();
        assert_eq!(outcome, RetryOutcome::Exhausted { attempts: 3 });
        assert!(!outcome.succeeded());
        assert_eq!(
            *sleeper.slept.borrow(),
            vec![Duration::from_millis(5), Duration::from_millis(5)]
        );
    }

    #[test]
    fn test_error_aborts_loop() {
        let sleeper = RecordingSleeper::default();
        let mut calls = 0;
        let result = FixedRetry::default().run(&sleeper, |_| {
            calls += 1;
            Err::<bool, _>("bad url")
        });
        assert_eq!(result, Err("bad url"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_zero_attempts() {
        let sleeper = RecordingSleeper::default();
        let policy = FixedRetry {
            max_attempts: 0,
            delay_ms: 0,
        };
        let outcome = policy.run(&sleeper, |_| Ok::<_, Infallible>(true)).unwrap();
        assert_eq!(outcome.attempts(), 0);
        assert!(!outcome.succeeded());
    }
}
