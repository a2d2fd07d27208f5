pub mod cache;
pub mod ci;
pub mod client;
pub mod endpoint;
pub mod facade;
pub mod http;
pub mod paginator;
pub mod rate_limit;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ClassroomClient;
pub use endpoint::{Endpoint, Query};
pub use http::HttpTransport;
pub use paginator::{Paginator, MAX_PER_PAGE};
pub use rate_limit::RateLimitStatus;
pub use transport::{ApiResponse, Transport};
