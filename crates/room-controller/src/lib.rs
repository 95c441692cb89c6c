//! Room Controller
//!
//! Control plane for the Parley meeting-room application. Owns the meeting
//! session lifecycle and the participant authorization model: meeting
//! creation, joins, host designation, and the host-gated recording and
//! consent operations. Media transport is out of scope; this service only
//! governs the permission state around it.

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
pub mod store;
