use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Tracked emails above which a new failure first sweeps expired entries.
const PRUNE_THRESHOLD: usize = 1024;

/// Per-email login brute force limiter over a fixed window.
pub struct LoginRateLimiter {
    /// email -> (failed_count, window_start)
    entries: DashMap<String, (u32, Instant)>,
    max_failures: u32,
    window: Duration,
}

impl LoginRateLimiter {
    pub fn new(max_failures: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            max_failures,
            window,
        }
    }

    /// Check if a login attempt is allowed. Returns the seconds until the
    /// window resets when it is not. Does not count the attempt; call
    /// `record_failure()` on a bad password.
    pub fn check(&self, email: &str) -> Result<(), u64> {
        let now = Instant::now();
        let Some(entry) = self.entries.get(&email.to_lowercase()) else {
            return Ok(());
        };
        let (count, start) = *entry.value();

        let elapsed = now.duration_since(start);
        if elapsed > self.window || count < self.max_failures {
            return Ok(());
        }
        Err(self.window.saturating_sub(elapsed).as_secs().max(1))
    }

    pub fn record_failure(&self, email: &str) {
        let key = email.to_lowercase();
        if self.entries.len() >= PRUNE_THRESHOLD && !self.entries.contains_key(&key) {
            self.cleanup(self.window);
        }

        let now = Instant::now();
        let mut entry = self.entries.entry(key).or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.duration_since(*start) > self.window {
            *count = 1;
            *start = now;
        } else {
            *count += 1;
        }
    }

    /// Forget failures after a successful login.
    pub fn reset(&self, email: &str) {
        self.entries.remove(&email.to_lowercase());
    }

    pub fn cleanup(&self, max_age: Duration) {
        let now = Instant::now();
        self.entries.retain(|_, (_, start)| now.duration_since(*start) < max_age);
    }
}

impl Default for LoginRateLimiter {
    /// 5 failures per 15 minutes.
    fn default() -> Self {
        Self::new(5, Duration::from_secs(15 * 60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_after_max_failures() {
        let limiter = LoginRateLimiter::new(2, Duration::from_secs(60));
        assert!(limiter.check("a@test.com").is_ok());
        limiter.record_failure("a@test.com");
        assert!(limiter.check("a@test.com").is_ok());
        limiter.record_failure("A@Test.com");
        assert!(limiter.check("a@test.com").is_err());
        assert!(limiter.check("b@test.com").is_ok());
    }

    #[test]
    fn reset_clears_failures() {
        let limiter = LoginRateLimiter::new(1, Duration::from_secs(60));
        limiter.record_failure("a@test.com");
        assert!(limiter.check("a@test.com").is_err());
        limiter.reset("a@test.com");
        assert!(limiter.check("a@test.com").is_ok());
    }

    #[test]
    fn window_expiry_allows_again() {
        let limiter = LoginRateLimiter::new(1, Duration::ZERO);
        limiter.record_failure("a@test.com");
        std::thread::sleep(Duration::from_millis(5));
        assert!(limiter.check("a@test.com").is_ok());
    }

    #[test]
    fn cleanup_drops_expired_windows() {
        let limiter = LoginRateLimiter::new(5, Duration::from_secs(60));
        limiter.record_failure("a@test.com");
        limiter.cleanup(Duration::from_secs(60));
        assert_eq!(limiter.entries.len(), 1);
        limiter.cleanup(Duration::ZERO);
        assert!(limiter.entries.is_empty());
    }

    #[test]
    fn failures_for_many_emails_stay_bounded() {
        let limiter = LoginRateLimiter::new(5, Duration::ZERO);
        for i in 0..PRUNE_THRESHOLD * 3 {
            limiter.record_failure(&format!("user{i}@test.com"));
        }
        assert!(limiter.entries.len() <= PRUNE_THRESHOLD);
    }
}
