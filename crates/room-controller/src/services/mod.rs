//! Business services for the Room Controller.
//!
//! `lifecycle` drives meeting creation, joins, and departures; `authorization`
//! gates the host-only operations. Both run their check-then-act sequences
//! inside the session store's per-meeting critical section.

pub mod authorization;
pub mod lifecycle;
