// * The page-retrieval boundary. The failover controller only ever talks to
// * this trait, so tests can script fetch outcomes without sockets.

use std::future::Future;
use std::pin::Pin;

use crate::network::client::PageClient;
use crate::network::errors::FetchError;
use crate::network::identity::IdentityPool;
use crate::network::proxy::EgressPool;
use crate::network::throttle::HostThrottle;

pub type AsyncFetch = Pin<Box<dyn Future<Output = Result<String, FetchError>> + Send>>;

/// Contract for retrieving one document. One call is one attempt: no retry
/// loops behind this seam, the caller owns failover.
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> AsyncFetch;
}

// * Production fetcher: paces per host, rotates identity and egress, then
// * performs a single validated GET.
pub struct LivePageFetcher {
    identities: IdentityPool,
    egress: EgressPool,
    throttle: HostThrottle,
}

impl LivePageFetcher {
    pub fn new() -> Self {
        Self {
            identities: IdentityPool::new(),
            egress: EgressPool::from_env(),
            throttle: HostThrottle::new(),
        }
    }

    pub fn with_egress(egress: EgressPool) -> Self {
        Self {
            identities: IdentityPool::new(),
            egress,
            throttle: HostThrottle::new(),
        }
    }
}

impl Default for LivePageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher for LivePageFetcher {
    fn fetch(&self, url: &str) -> AsyncFetch {
        let url = url.to_string();
        let throttle = self.throttle.clone();
        let identity = self.identities.next();
        let proxy = self.egress.next();

        Box::pin(async move {
            throttle.acquire(&url).await;
            let client = PageClient::new(proxy.as_deref(), identity)?;
            client.fetch(&url).await
        })
    }
}

impl<T: PageFetcher + ?Sized> PageFetcher for std::sync::Arc<T> {
    fn fetch(&self, url: &str) -> AsyncFetch {
        (**self).fetch(url)
    }
}
