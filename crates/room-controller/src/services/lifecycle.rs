//! Meeting lifecycle: create, join, existence probe, departure, listing.
//!
//! Host assignment is strictly order-of-first-successful-join: the creator
//! is host by construction (first and only participant), and a joiner only
//! gets the host flag when the roster is empty at the moment their join is
//! accepted. Host status is never transferred on departure.

use crate::errors::RcError;
use crate::models::{
    Identity, Meeting, MeetingStatus, Participant, DEFAULT_MAX_PARTICIPANTS,
    DEFAULT_MEETING_TITLE,
};
use crate::store::{MeetingSeed, SessionStore};
use chrono::Utc;
use uuid::Uuid;

/// Create a meeting with the caller as its sole participant and host.
pub async fn create(store: &SessionStore, identity: &Identity, title: Option<String>) -> Meeting {
    let title = match title.map(|t| t.trim().to_string()) {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_MEETING_TITLE.to_string(),
    };

    let now = Utc::now();
    let creator = Participant::joining(identity, true, now);

    let meeting = store
        .create(MeetingSeed {
            title,
            status: MeetingStatus::Active,
            is_recording: false,
            participants: vec![creator],
            start_time: now,
            max_participants: DEFAULT_MAX_PARTICIPANTS,
            host_id: identity.user_id,
        })
        .await;

    tracing::info!(
        target: "rc.services.lifecycle",
        meeting_id = %meeting.id,
        user_id = %identity.user_id,
        "Meeting created"
    );

    meeting
}

/// Join a meeting, returning the updated meeting view.
///
/// Rejoining is idempotent: a caller already on the roster gets the current
/// state back unchanged. The read-check-append sequence runs under the
/// per-meeting lock, so concurrent first joins cannot both claim the host
/// flag.
///
/// # Errors
///
/// `RcError::NotFound` when the meeting id does not resolve.
pub async fn join(
    store: &SessionStore,
    identity: &Identity,
    meeting_id: Uuid,
) -> Result<Meeting, RcError> {
    let joined = store
        .with_meeting(meeting_id, |meeting| {
            if meeting.participant(identity.user_id).is_some() {
                return (meeting.clone(), false);
            }

            let participant =
                Participant::joining(identity, meeting.participants.is_empty(), Utc::now());
            meeting.participants.push(participant);
            (meeting.clone(), true)
        })
        .await;

    match joined {
        None => Err(RcError::NotFound("Meeting not found".to_string())),
        Some((meeting, newly_joined)) => {
            if newly_joined {
                tracing::info!(
                    target: "rc.services.lifecycle",
                    meeting_id = %meeting_id,
                    user_id = %identity.user_id,
                    participant_count = meeting.participants.len(),
                    "User joined meeting"
                );
            }
            Ok(meeting)
        }
    }
}

/// Read-only existence probe.
///
/// Never mutates state and does not require the caller to be a participant;
/// clients call this before navigating to a meeting page.
pub async fn check_exists(store: &SessionStore, meeting_id: Uuid) -> bool {
    store.contains(meeting_id).await
}

/// Mark the caller as departed, retaining their record.
///
/// Sets `left_at`; the participant is never purged. Host status is NOT
/// reassigned, so a meeting can end up with no present host.
///
/// # Errors
///
/// - `RcError::NotFound` when the meeting id does not resolve
/// - `RcError::NotAuthorized` when the caller is not on the roster
pub async fn leave(
    store: &SessionStore,
    identity: &Identity,
    meeting_id: Uuid,
) -> Result<Meeting, RcError> {
    let result = store
        .with_meeting(meeting_id, |meeting| {
            let Some(participant) = meeting.participant_mut(identity.user_id) else {
                return Err(RcError::NotAuthorized(
                    "Not a participant of this meeting".to_string(),
                ));
            };
            participant.left_at = Some(Utc::now());
            Ok(meeting.clone())
        })
        .await;

    match result {
        None => Err(RcError::NotFound("Meeting not found".to_string())),
        Some(outcome) => {
            let meeting = outcome?;
            tracing::info!(
                target: "rc.services.lifecycle",
                meeting_id = %meeting_id,
                user_id = %identity.user_id,
                "User left meeting"
            );
            Ok(meeting)
        }
    }
}

/// All meetings the caller appears in, oldest first.
pub async fn list_for(store: &SessionStore, identity: &Identity) -> Vec<Meeting> {
    store.list_by_participant(identity.user_id).await
}
