//! Data Transfer Objects for the backend API
//!
//! Request bodies and response envelopes that are not domain entities on
//! their own.

pub mod auth;
pub mod job;
