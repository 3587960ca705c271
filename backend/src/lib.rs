//! Photography backend: photo upload, listing and the gallery site

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// S3 photo object storage
pub mod photo_bucket;

/// HTTP routes
#[allow(missing_docs)]
pub mod routes;

/// HTTP server
pub mod server;

/// Shared handler state
pub mod state;

/// Configuration, errors and extractors
pub mod types;
