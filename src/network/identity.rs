use reqwest::header::{HeaderMap, HeaderValue};
use std::sync::atomic::{AtomicUsize, Ordering};

// * IdentityProfile defines the browser characteristics presented upstream.
pub struct IdentityProfile {
    pub user_agent: &'static str,
    pub accept_language: &'static str,
    pub sec_ch_ua: Option<&'static str>,
    pub sec_ch_ua_platform: Option<&'static str>,
}

// * Small rotation set. Result sites are low-defense but throttle repeat
// * visitors, so consecutive attempts should not present the same identity.
static PROFILES: [IdentityProfile; 3] = [
    IdentityProfile {
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        accept_language: "pt-BR,pt;q=0.9,en;q=0.8",
        sec_ch_ua: Some(r#""Chromium";v="120", "Google Chrome";v="120", "Not_A Brand";v="99""#),
        sec_ch_ua_platform: Some(r#""Windows""#),
    },
    IdentityProfile {
        user_agent: "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
        accept_language: "pt-BR,pt;q=0.8,en-US;q=0.5",
        sec_ch_ua: None,
        sec_ch_ua_platform: None,
    },
    IdentityProfile {
        user_agent: "Mozilla/5.0 (Linux; Android 13; SM-A515F) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Mobile Safari/537.36",
        accept_language: "pt-BR,pt;q=0.9",
        sec_ch_ua: Some(r#""Chromium";v="119", "Google Chrome";v="119", "Not?A_Brand";v="24""#),
        sec_ch_ua_platform: Some(r#""Android""#),
    },
];

impl IdentityProfile {
    // * Applies the configured profile to a mutable HeaderMap.
    pub fn apply_to_headers(&self, headers: &mut HeaderMap) {
        headers.insert("User-Agent", HeaderValue::from_static(self.user_agent));
        headers.insert("Accept-Language", HeaderValue::from_static(self.accept_language));
        if let Some(ua_hint) = self.sec_ch_ua {
            headers.insert("sec-ch-ua", HeaderValue::from_static(ua_hint));
            headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
        }
        if let Some(platform) = self.sec_ch_ua_platform {
            headers.insert("sec-ch-ua-platform", HeaderValue::from_static(platform));
        }
        headers.insert("Upgrade-Insecure-Requests", HeaderValue::from_static("1"));
    }
}

// * Round-robin over the static profile set.
pub struct IdentityPool {
    cursor: AtomicUsize,
}

impl IdentityPool {
    pub fn new() -> Self {
        Self {
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn next(&self) -> &'static IdentityProfile {
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % PROFILES.len();
        &PROFILES[idx]
    }
}

impl Default for IdentityPool {
    fn default() -> Self {
        Self::new()
    }
}
