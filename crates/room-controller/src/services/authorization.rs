//! Authorization engine for meeting actions.
//!
//! Every mutating action other than create/join requires the caller to
//! resolve to a participant of the target meeting; host-restricted actions
//! additionally require that participant's `is_host` flag. Authorization
//! never branches on the presentational `role` tag.
//!
//! The gate functions are pure so they can run inside the session store's
//! per-meeting critical section, keeping check and mutation atomic.

use crate::errors::RcError;
use crate::models::{Identity, Meeting, Participant};
use crate::store::SessionStore;
use uuid::Uuid;

/// Resolve the caller to a participant of the meeting.
///
/// # Errors
///
/// `RcError::NotAuthorized` when the caller is not on the roster.
pub fn require_participant(meeting: &Meeting, user_id: Uuid) -> Result<&Participant, RcError> {
    meeting.participant(user_id).ok_or_else(|| {
        RcError::NotAuthorized("Not a participant of this meeting".to_string())
    })
}

/// Resolve the caller to the meeting's host.
///
/// # Errors
///
/// - `RcError::NotAuthorized` when the caller is not a participant
/// - `RcError::HostRequired` when the caller is a participant without the
///   host flag
pub fn require_host(meeting: &Meeting, user_id: Uuid) -> Result<&Participant, RcError> {
    let participant = require_participant(meeting, user_id)?;
    if !participant.is_host {
        return Err(RcError::HostRequired(
            "Only the host can perform this action".to_string(),
        ));
    }
    Ok(participant)
}

/// Flip the meeting's recording flag. Host only.
///
/// Returns the NEW value. This is a toggle, not a set: two calls in
/// immediate succession restore the original state, so callers must read
/// the returned value rather than assume direction.
///
/// # Errors
///
/// `NotFound`, `NotAuthorized`, or `HostRequired` per the gate rules.
pub async fn toggle_recording(
    store: &SessionStore,
    identity: &Identity,
    meeting_id: Uuid,
) -> Result<bool, RcError> {
    let outcome: Option<Result<bool, RcError>> = store
        .with_meeting(meeting_id, |meeting| {
            require_host(meeting, identity.user_id)?;
            meeting.is_recording = !meeting.is_recording;
            Ok(meeting.is_recording)
        })
        .await;

    match outcome {
        None => Err(RcError::NotFound("Meeting not found".to_string())),
        Some(result) => {
            let is_recording = result?;
            tracing::info!(
                target: "rc.services.authorization",
                meeting_id = %meeting_id,
                user_id = %identity.user_id,
                is_recording = is_recording,
                "Recording toggled"
            );
            Ok(is_recording)
        }
    }
}

/// Set the recording consent flag on a named participant. Host only.
///
/// The host may revoke their own consent; the target id is not
/// special-cased.
///
/// # Errors
///
/// `NotFound` (meeting or target participant), `NotAuthorized`, or
/// `HostRequired` per the gate rules.
pub async fn set_participant_consent(
    store: &SessionStore,
    identity: &Identity,
    meeting_id: Uuid,
    target_participant_id: Uuid,
    allowed: bool,
) -> Result<(), RcError> {
    let outcome = store
        .with_meeting(meeting_id, |meeting| {
            require_host(meeting, identity.user_id)?;

            let Some(target) = meeting.participant_mut(target_participant_id) else {
                return Err(RcError::NotFound("Participant not found".to_string()));
            };
            target.is_recording_allowed = allowed;
            Ok(())
        })
        .await;

    match outcome {
        None => Err(RcError::NotFound("Meeting not found".to_string())),
        Some(result) => {
            result?;
            tracing::info!(
                target: "rc.services.authorization",
                meeting_id = %meeting_id,
                user_id = %identity.user_id,
                target_participant_id = %target_participant_id,
                allowed = allowed,
                "Participant recording consent updated"
            );
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::services::lifecycle;

    fn identity(email: &str) -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            email: email.to_string(),
        }
    }

    async fn two_person_meeting(
        store: &SessionStore,
    ) -> (Identity, Identity, Uuid) {
        let host = identity("host@example.com");
        let guest = identity("guest@example.com");
        let meeting = lifecycle::create(store, &host, None).await;
        lifecycle::join(store, &guest, meeting.id).await.unwrap();
        (host, guest, meeting.id)
    }

    #[tokio::test]
    async fn test_require_participant_rejects_stranger() {
        let store = SessionStore::new();
        let host = identity("host@example.com");
        let meeting = lifecycle::create(&store, &host, None).await;

        let result = require_participant(&meeting, Uuid::new_v4());
        assert!(matches!(result, Err(RcError::NotAuthorized(_))));
    }

    #[tokio::test]
    async fn test_require_host_distinguishes_guest_from_stranger() {
        let store = SessionStore::new();
        let (_host, guest, meeting_id) = two_person_meeting(&store).await;
        let meeting = store.get_by_id(meeting_id).await.unwrap();

        // Guest is a participant, so the failure is HostRequired
        assert!(matches!(
            require_host(&meeting, guest.user_id),
            Err(RcError::HostRequired(_))
        ));
        // Stranger is not a participant at all
        assert!(matches!(
            require_host(&meeting, Uuid::new_v4()),
            Err(RcError::NotAuthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_authorization_ignores_role_tag() {
        // Flip the display role on the guest; authorization must still
        // branch on is_host alone
        let store = SessionStore::new();
        let (_host, guest, meeting_id) = two_person_meeting(&store).await;

        store
            .with_meeting(meeting_id, |meeting| {
                let p = meeting.participant_mut(guest.user_id).unwrap();
                p.role = crate::models::ParticipantRole::Host;
            })
            .await
            .unwrap();

        let result = toggle_recording(&store, &guest, meeting_id).await;
        assert!(matches!(result, Err(RcError::HostRequired(_))));
    }

    #[tokio::test]
    async fn test_toggle_recording_by_host() {
        let store = SessionStore::new();
        let (host, _guest, meeting_id) = two_person_meeting(&store).await;

        let on = toggle_recording(&store, &host, meeting_id).await.unwrap();
        assert!(on);

        // Toggling again restores the original state
        let off = toggle_recording(&store, &host, meeting_id).await.unwrap();
        assert!(!off);
    }

    #[tokio::test]
    async fn test_toggle_recording_by_guest_fails_without_mutation() {
        let store = SessionStore::new();
        let (host, guest, meeting_id) = two_person_meeting(&store).await;

        toggle_recording(&store, &host, meeting_id).await.unwrap();

        let result = toggle_recording(&store, &guest, meeting_id).await;
        assert!(matches!(result, Err(RcError::HostRequired(_))));

        // State unchanged by the rejected call
        let meeting = store.get_by_id(meeting_id).await.unwrap();
        assert!(meeting.is_recording);
    }

    #[tokio::test]
    async fn test_toggle_recording_unknown_meeting() {
        let store = SessionStore::new();
        let result = toggle_recording(&store, &identity("a@b.c"), Uuid::new_v4()).await;
        assert!(matches!(result, Err(RcError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_consent_by_host() {
        let store = SessionStore::new();
        let (host, guest, meeting_id) = two_person_meeting(&store).await;

        set_participant_consent(&store, &host, meeting_id, guest.user_id, false)
            .await
            .unwrap();

        let meeting = store.get_by_id(meeting_id).await.unwrap();
        assert!(!meeting.participant(guest.user_id).unwrap().is_recording_allowed);
    }

    #[tokio::test]
    async fn test_host_may_revoke_own_consent() {
        let store = SessionStore::new();
        let (host, _guest, meeting_id) = two_person_meeting(&store).await;

        set_participant_consent(&store, &host, meeting_id, host.user_id, false)
            .await
            .unwrap();

        let meeting = store.get_by_id(meeting_id).await.unwrap();
        assert!(!meeting.participant(host.user_id).unwrap().is_recording_allowed);
    }

    #[tokio::test]
    async fn test_set_consent_by_guest_fails() {
        let store = SessionStore::new();
        let (host, guest, meeting_id) = two_person_meeting(&store).await;

        let result =
            set_participant_consent(&store, &guest, meeting_id, host.user_id, false).await;
        assert!(matches!(result, Err(RcError::HostRequired(_))));

        // Target untouched
        let meeting = store.get_by_id(meeting_id).await.unwrap();
        assert!(meeting.participant(host.user_id).unwrap().is_recording_allowed);
    }

    #[tokio::test]
    async fn test_set_consent_unknown_target() {
        let store = SessionStore::new();
        let (host, _guest, meeting_id) = two_person_meeting(&store).await;

        let result =
            set_participant_consent(&store, &host, meeting_id, Uuid::new_v4(), false).await;
        assert!(matches!(result, Err(RcError::NotFound(_))));
    }
}
