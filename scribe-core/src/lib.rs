//! Scribe Core
//!
//! Core types and pure logic for the Scribe transcription client.
//!
//! This crate contains:
//! - Domain types: jobs and service catalog metadata
//! - DTOs: request and response bodies of the backend API
//! - Session: the explicit credential threaded through requests
//! - Pure helpers: password strength, remaining-time estimates, formatting
//!   and client-side validation

pub mod domain;
pub mod dto;
pub mod estimate;
pub mod format;
pub mod password;
pub mod session;
pub mod time;
pub mod validation;

pub use session::Session;
