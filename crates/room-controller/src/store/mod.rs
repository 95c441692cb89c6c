//! In-memory authoritative state.
//!
//! The session store owns every meeting and participant record; the user
//! directory owns every account. Nothing else retains a durable copy.
//! Process restart loses all state, which is acceptable for this reference
//! core only; a production deployment swaps these for a durable store with
//! per-row atomic updates.

mod meetings;
mod users;

pub use meetings::{MeetingSeed, SessionStore};
pub use users::UserDirectory;

use crate::errors::RcError;
use thiserror::Error;

/// Store-level lookup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Meeting not found")]
    MeetingNotFound,

    #[error("Participant not found")]
    ParticipantNotFound,
}

impl From<StoreError> for RcError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MeetingNotFound => RcError::NotFound("Meeting not found".to_string()),
            StoreError::ParticipantNotFound => {
                RcError::NotFound("Participant not found".to_string())
            }
        }
    }
}
