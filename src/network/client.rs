use crate::config::constants::{FETCH_TIMEOUT_MS, MIN_BODY_BYTES};
use crate::network::errors::FetchError;
use crate::network::identity::IdentityProfile;
use regex::Regex;
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::sync::LazyLock;
use std::time::Duration;

// * Interstitials served with HTTP 200 that are not real result pages
static BAN_TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(Just a moment|Attention Required|Security Check|Access Denied|Cloudflare|Captcha)")
        .expect("! CRITICAL: Failed to compile Soft Ban Regex")
});

// * The HTTP engine for one fetch attempt.
pub struct PageClient {
    inner: Client,
}

impl PageClient {
    // * Builds a client presenting the given identity.
    // * @param proxy_url - Optional proxy URL (e.g., "http://user:pass@ip:port")
    pub fn new(proxy_url: Option<&str>, identity: &IdentityProfile) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        identity.apply_to_headers(&mut headers);

        let mut builder = Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_millis(FETCH_TIMEOUT_MS));

        // * Apply Proxy if provided
        if let Some(url) = proxy_url {
            builder = builder.proxy(reqwest::Proxy::all(url)?);
        }

        Ok(Self {
            inner: builder.build()?,
        })
    }

    // * Fetches a URL and validates the response against soft-ban rules.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.inner.get(url).send().await?;
        let status = resp.status();

        if status.as_u16() == 403 || status.as_u16() == 429 {
            return Err(FetchError::HardBan(status.as_u16()));
        }

        if !status.is_success() {
            return Err(FetchError::Http(resp.error_for_status().unwrap_err()));
        }

        let body = resp.text().await?;

        // ! Result pages are small but never this small; a short body is a
        // ! parked domain or an error shell
        if body.len() < MIN_BODY_BYTES {
            return Err(FetchError::EmptyResponse(body.len()));
        }

        detect_soft_ban(&body)?;

        Ok(body)
    }
}

fn detect_soft_ban(body: &str) -> Result<(), FetchError> {
    if let Some(cap) = BAN_TITLE_REGEX.find(body) {
        return Err(FetchError::SoftBan(format!("Title Trigger: {}", cap.as_str())));
    }

    let signatures = ["captcha-delivery", "cf-turnstile", "datadome", "challenge-platform"];
    for sig in signatures {
        if body.contains(sig) {
            return Err(FetchError::SoftBan(format!("Body Trigger: {}", sig)));
        }
    }

    Ok(())
}
