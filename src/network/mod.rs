// * Network layer: identity rotation, egress pooling, per-host pacing and
// * the single-attempt page fetch boundary driven by the failover controller.

pub mod client;
pub mod errors;
pub mod fetcher;
pub mod identity;
pub mod proxy;
pub mod throttle;

// * Re-exports for convenient access
pub use client::PageClient;
pub use errors::{FailureKind, FetchError};
pub use fetcher::{AsyncFetch, LivePageFetcher, PageFetcher};
pub use identity::{IdentityPool, IdentityProfile};
pub use proxy::EgressPool;
pub use throttle::HostThrottle;
