//! Login rate limiting: a fixed-window counter keyed by (client address,
//! email). The store sits behind a trait so a single-instance deployment can
//! use the in-memory map while multi-instance deployments plug in a shared
//! store, without touching the login handler.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Counter store consulted on every login attempt.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Record an attempt for `key`. Returns false once the window's budget
    /// is exhausted.
    async fn check(&self, key: &str) -> bool;

    /// Clear the counter for `key` (called after a successful login).
    async fn reset(&self, key: &str);
}

/// Rate-limit key for a login attempt. The caller never learns whether the
/// email exists; the key just scopes the counter.
pub fn login_key(client_addr: &str, email: &str) -> String {
    format!("{}:{}", client_addr, email.to_ascii_lowercase())
}

struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window counter held in process memory.
pub struct InMemoryRateLimitStore {
    max_attempts: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl InMemoryRateLimitStore {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// From the API config (login_max_attempts / login_window_secs).
    pub fn from_config() -> Self {
        let api = &crate::config::config().api;
        Self::new(api.login_max_attempts, Duration::from_secs(api.login_window_secs))
    }

    fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        // Drop every elapsed window so keys from failed logins do not
        // accumulate; this also restarts the window for the current key.
        windows.retain(|_, w| now.duration_since(w.started) < self.window);

        let window = windows.entry(key.to_string()).or_insert(Window { started: now, count: 0 });
        window.count += 1;
        window.count <= self.max_attempts
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    async fn reset(&self, key: &str) {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        windows.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_up_to_threshold_within_window() {
        let store = InMemoryRateLimitStore::new(3, Duration::from_secs(60));
        let key = login_key("203.0.113.9", "ana@example.com");

        assert!(store.check(&key).await);
        assert!(store.check(&key).await);
        assert!(store.check(&key).await);
        assert!(!store.check(&key).await);
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let store = InMemoryRateLimitStore::new(1, Duration::from_secs(60));
        assert!(store.check(&login_key("203.0.113.9", "ana@example.com")).await);
        assert!(store.check(&login_key("203.0.113.9", "rui@example.com")).await);
        assert!(store.check(&login_key("198.51.100.4", "ana@example.com")).await);
    }

    #[tokio::test]
    async fn reset_clears_the_counter() {
        let store = InMemoryRateLimitStore::new(1, Duration::from_secs(60));
        let key = login_key("203.0.113.9", "ana@example.com");

        assert!(store.check(&key).await);
        assert!(!store.check(&key).await);
        store.reset(&key).await;
        assert!(store.check(&key).await);
    }

    #[test]
    fn counter_restarts_after_the_window() {
        let store = InMemoryRateLimitStore::new(1, Duration::from_millis(50));
        let key = login_key("203.0.113.9", "ana@example.com");
        let start = Instant::now();

        assert!(store.check_at(&key, start));
        assert!(!store.check_at(&key, start + Duration::from_millis(10)));
        // Next window
        assert!(store.check_at(&key, start + Duration::from_millis(60)));
    }

    #[test]
    fn elapsed_windows_are_swept_from_the_map() {
        let store = InMemoryRateLimitStore::new(1, Duration::from_millis(50));
        let start = Instant::now();

        store.check_at(&login_key("10.0.0.1", "a@example.com"), start);
        store.check_at(&login_key("10.0.0.2", "b@example.com"), start);
        assert_eq!(store.windows.lock().unwrap().len(), 2);

        // A later attempt removes every elapsed window, not just its own key
        store.check_at(
            &login_key("10.0.0.3", "c@example.com"),
            start + Duration::from_millis(60),
        );
        assert_eq!(store.windows.lock().unwrap().len(), 1);
    }

    #[test]
    fn key_normalizes_email_case() {
        assert_eq!(
            login_key("10.0.0.1", "Ana@Example.com"),
            login_key("10.0.0.1", "ana@example.com")
        );
    }
}
