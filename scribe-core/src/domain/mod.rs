//! Core domain types
//!
//! Read-only snapshots of backend state: jobs and the service catalog.

pub mod catalog;
pub mod job;
