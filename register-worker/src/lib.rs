//! Registration worker: turns photo bucket creation events into photo records

#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]

pub mod consumer;
pub mod health;
pub mod registration;
pub mod types;
