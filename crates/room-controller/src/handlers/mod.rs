//! HTTP handlers for the Room Controller.

pub mod auth_handler;
pub mod health;
pub mod meetings;

pub use auth_handler::{login, register};
pub use health::health_check;
pub use meetings::{
    check_meeting_exists, create_meeting, join_meeting, leave_meeting, list_meetings,
    set_participant_consent, toggle_recording,
};
