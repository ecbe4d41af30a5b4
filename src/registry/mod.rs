//! Package metadata fetching from the npms.io registry service.

mod client;
mod types;

pub use client::{DEFAULT_API_URL, FetchMetadata, Npms};
#[cfg(test)]
pub use client::MockFetchMetadata;
pub use types::{PackageMetadata, RawMetadata};
