//! Storage services for the photography pipeline
//!
//! This crate provides the pieces shared between the photo API and the registration
//! worker: the photo record table, the S3 object-created notification format and the
//! SQS queue those notifications are delivered through.

#![deny(clippy::all, clippy::pedantic, clippy::nursery, missing_docs)]

pub mod events;
pub mod photo_record;
pub mod queue;

/// In-memory stand-ins for the AWS-backed stores
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
