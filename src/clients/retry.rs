//! Retry policy and backoff arithmetic for the HTTP client.
//!
//! The client retries rate-limited (429) and server-error (5xx, except 501)
//! responses, plus connection and timeout failures. Waits grow
//! exponentially from `min_wait`, carry a random jitter of up to one
//! `min_wait`, and are capped at `max_wait`. A rate-limited response that
//! names its own wait (`Retry-After` or `X-RateLimit-Reset`) is honoured,
//! up to [`RetryPolicy::MAX_HINT`].

use std::time::Duration;

use rand::Rng;

use crate::clients::http_response::HttpResponse;
use crate::error::ConfigError;

/// Bounded exponential-backoff retry policy.
///
/// # Example
///
/// ```rust
/// use scalr_api::clients::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(
///     Duration::from_millis(100),
///     Duration::from_millis(400),
///     5,
/// ).unwrap();
///
/// // Without jitter the waits double until they hit the cap.
/// assert_eq!(policy.backoff(0, 0.0), Duration::from_millis(100));
/// assert_eq!(policy.backoff(1, 0.0), Duration::from_millis(200));
/// assert_eq!(policy.backoff(5, 0.0), Duration::from_millis(400));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    min_wait: Duration,
    max_wait: Duration,
    max_retries: u32,
}

impl RetryPolicy {
    /// Default lower bound for a single wait.
    pub const DEFAULT_MIN_WAIT: Duration = Duration::from_millis(100);
    /// Default upper bound for a single wait.
    pub const DEFAULT_MAX_WAIT: Duration = Duration::from_millis(400);
    /// Default number of retries after the first attempt.
    pub const DEFAULT_MAX_RETRIES: u32 = 30;
    /// Longest server-requested wait that is honoured.
    pub const MAX_HINT: Duration = Duration::from_secs(600);

    /// Creates a new retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRetryPolicy`] if `min_wait` is zero or
    /// greater than `max_wait`.
    pub fn new(
        min_wait: Duration,
        max_wait: Duration,
        max_retries: u32,
    ) -> Result<Self, ConfigError> {
        if min_wait.is_zero() {
            return Err(ConfigError::InvalidRetryPolicy {
                reason: "min_wait must be greater than zero".to_string(),
            });
        }
        if min_wait > max_wait {
            return Err(ConfigError::InvalidRetryPolicy {
                reason: format!("min_wait ({min_wait:?}) exceeds max_wait ({max_wait:?})"),
            });
        }
        Ok(Self {
            min_wait,
            max_wait,
            max_retries,
        })
    }

    /// A policy that never retries.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            min_wait: Self::DEFAULT_MIN_WAIT,
            max_wait: Self::DEFAULT_MAX_WAIT,
            max_retries: 0,
        }
    }

    /// Returns a copy of this policy with a different retry budget.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Lower bound for a single wait.
    #[must_use]
    pub const fn min_wait(&self) -> Duration {
        self.min_wait
    }

    /// Upper bound for a single computed wait.
    #[must_use]
    pub const fn max_wait(&self) -> Duration {
        self.max_wait
    }

    /// Number of retries after the first attempt.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Computes the wait before retry number `attempt` (zero-based).
    ///
    /// The wait is `min_wait * 2^attempt + jitter * min_wait`, capped at
    /// `max_wait`. `jitter` is clamped into `[0, 1]`; NaN counts as zero.
    #[must_use]
    pub fn backoff(&self, attempt: u32, jitter: f64) -> Duration {
        let jitter = if jitter.is_nan() {
            Duration::ZERO
        } else {
            self.min_wait.mul_f64(jitter.clamp(0.0, 1.0))
        };
        let base = self
            .min_wait
            .saturating_mul(2u32.saturating_pow(attempt.min(31)));
        base.saturating_add(jitter).min(self.max_wait)
    }

    /// Computes the wait before retry number `attempt`, given the response
    /// that triggered it (if any).
    ///
    /// Rate-limited responses that carry a wait hint are honoured, capped at
    /// [`MAX_HINT`](Self::MAX_HINT); everything else uses
    /// [`backoff`](Self::backoff) with a random jitter.
    #[must_use]
    pub fn delay_for(&self, attempt: u32, response: Option<&HttpResponse>) -> Duration {
        if let Some(hint) = response
            .filter(|r| r.code == 429)
            .and_then(HttpResponse::retry_after)
        {
            return hint.min(Self::MAX_HINT);
        }
        let jitter: f64 = rand::thread_rng().gen();
        self.backoff(attempt, jitter)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            min_wait: Self::DEFAULT_MIN_WAIT,
            max_wait: Self::DEFAULT_MAX_WAIT,
            max_retries: Self::DEFAULT_MAX_RETRIES,
        }
    }
}

/// Returns `true` if a response with this status should be retried.
///
/// 429 and every 5xx except 501 (Not Implemented) are considered transient.
#[must_use]
pub const fn is_retryable_status(code: u16) -> bool {
    code == 429 || (code >= 500 && code <= 599 && code != 501)
}

/// Returns `true` if a transport failure should be retried.
#[must_use]
pub fn is_retryable_transport(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn policy() -> RetryPolicy {
        RetryPolicy::new(Duration::from_millis(100), Duration::from_millis(400), 3).unwrap()
    }

    #[test]
    fn test_default_policy_values() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.min_wait(), Duration::from_millis(100));
        assert_eq!(policy.max_wait(), Duration::from_millis(400));
        assert_eq!(policy.max_retries(), 30);
    }

    #[test]
    fn test_new_rejects_inverted_bounds() {
        let result = RetryPolicy::new(Duration::from_secs(2), Duration::from_secs(1), 3);
        assert!(matches!(result, Err(ConfigError::InvalidRetryPolicy { .. })));

        let result = RetryPolicy::new(Duration::ZERO, Duration::from_secs(1), 3);
        assert!(matches!(result, Err(ConfigError::InvalidRetryPolicy { .. })));
    }

    #[test]
    fn test_backoff_doubles_until_capped() {
        let policy = policy();
        assert_eq!(policy.backoff(0, 0.0), Duration::from_millis(100));
        assert_eq!(policy.backoff(1, 0.0), Duration::from_millis(200));
        assert_eq!(policy.backoff(2, 0.0), Duration::from_millis(400));
        assert_eq!(policy.backoff(3, 0.0), Duration::from_millis(400));
        assert_eq!(policy.backoff(u32::MAX, 0.0), Duration::from_millis(400));
    }

    #[test]
    fn test_backoff_adds_jitter_within_one_min_wait() {
        let policy = policy();
        assert_eq!(policy.backoff(0, 0.5), Duration::from_millis(150));
        assert_eq!(policy.backoff(1, 1.0), Duration::from_millis(300));
        // Out-of-range jitter is clamped.
        assert_eq!(policy.backoff(0, 7.0), Duration::from_millis(200));
        assert_eq!(policy.backoff(0, -1.0), Duration::from_millis(100));
    }

    #[test]
    fn test_delay_for_is_bounded() {
        let policy = policy();
        for attempt in 0..10 {
            let delay = policy.delay_for(attempt, None);
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= Duration::from_millis(400));
        }
    }

    #[test]
    fn test_delay_for_honours_retry_after_on_429() {
        let policy = policy();
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["2".to_string()]);
        let response = HttpResponse::new(429, headers.clone(), json!({}));
        assert_eq!(policy.delay_for(0, Some(&response)), Duration::from_secs(2));

        // A 503 with Retry-After still uses the computed backoff.
        let response = HttpResponse::new(503, headers, json!({}));
        assert!(policy.delay_for(0, Some(&response)) <= Duration::from_millis(400));
    }

    #[test]
    fn test_delay_for_caps_and_ignores_oversized_hints() {
        let policy = policy();
        let response_with = |value: &str| {
            let mut headers = HashMap::new();
            headers.insert("retry-after".to_string(), vec![value.to_string()]);
            HttpResponse::new(429, headers, json!({}))
        };

        let response = response_with("86400");
        assert_eq!(policy.delay_for(0, Some(&response)), RetryPolicy::MAX_HINT);

        // Too large for a Duration: fall back to the computed backoff.
        let response = response_with("1e20");
        assert!(policy.delay_for(0, Some(&response)) <= Duration::from_millis(400));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(429));
        assert!(is_retryable_status(500));
        assert!(is_retryable_status(502));
        assert!(is_retryable_status(503));
        assert!(!is_retryable_status(501));
        assert!(!is_retryable_status(404));
        assert!(!is_retryable_status(422));
        assert!(!is_retryable_status(200));
    }

    #[test]
    fn test_disabled_policy() {
        assert_eq!(RetryPolicy::disabled().max_retries(), 0);
        assert_eq!(policy().with_max_retries(9).max_retries(), 9);
    }
}
