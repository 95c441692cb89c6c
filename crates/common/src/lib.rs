//! Common utilities and types shared across Parley components.

#![warn(clippy::pedantic)]

/// Module for JWT utilities (bearer extraction, claims, size limits)
pub mod jwt;

/// Module for secret types that prevent accidental logging
pub mod secret;
