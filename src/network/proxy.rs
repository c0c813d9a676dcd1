use std::sync::atomic::{AtomicUsize, Ordering};

// * Environment variable holding a comma-separated proxy list
const PROXY_LIST_ENV: &str = "PALPITEIRO_PROXIES";

// * Manages the rotation of egress proxies. An empty pool means every
// * request goes out directly.
pub struct EgressPool {
    proxies: Vec<String>,
    cursor: AtomicUsize,
}

impl EgressPool {
    pub fn new(proxies: Vec<String>) -> Self {
        Self {
            proxies,
            cursor: AtomicUsize::new(0),
        }
    }

    // * Direct-only pool, no proxying.
    pub fn direct() -> Self {
        Self::new(Vec::new())
    }

    // * Builds the pool from PALPITEIRO_PROXIES ("http://user:pass@ip:port,...").
    pub fn from_env() -> Self {
        let proxies = std::env::var(PROXY_LIST_ENV)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        Self::new(proxies)
    }

    pub fn is_direct(&self) -> bool {
        self.proxies.is_empty()
    }

    // * Next proxy in rotation, or None when running direct.
    pub fn next(&self) -> Option<String> {
        if self.proxies.is_empty() {
            return None;
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.proxies.len();
        Some(self.proxies[idx].clone())
    }
}
