//! Meeting handlers for the Room Controller.
//!
//! Implements the authenticated meeting surface:
//!
//! - `POST /v1/meetings` - Create a meeting (caller becomes host)
//! - `GET /v1/meetings` - List the caller's meetings
//! - `GET /v1/meetings/{id}/exists` - Existence probe
//! - `POST /v1/meetings/{id}/join` - Join (idempotent)
//! - `POST /v1/meetings/{id}/leave` - Depart (record retained)
//! - `POST /v1/meetings/{id}/recording/toggle` - Toggle recording (host only)
//! - `PATCH /v1/meetings/{id}/participants/{pid}/consent` - Set consent (host only)
//!
//! Every handler receives the verified [`Identity`] the auth middleware
//! placed in request extensions; no handler touches the raw credential.

use crate::errors::RcError;
use crate::models::{
    ConsentRequest, CreateMeetingRequest, CreateMeetingResponse, ExistsResponse, Identity,
    MeetingListResponse, MeetingView, RecordingResponse, SuccessResponse,
};
use crate::routes::AppState;
use crate::services::{authorization, lifecycle};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Handler for POST /v1/meetings
///
/// Creates an active meeting with the caller as its sole participant and
/// host. The body is optional; a missing or empty title falls back to the
/// default placeholder.
#[instrument(skip(state, identity, request), name = "rc.handlers.create_meeting")]
pub async fn create_meeting(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    request: Option<Json<CreateMeetingRequest>>,
) -> Result<Json<CreateMeetingResponse>, RcError> {
    let title = request.and_then(|Json(r)| r.title);

    let meeting = lifecycle::create(&state.store, &identity, title).await;

    Ok(Json(CreateMeetingResponse {
        room_id: meeting.id,
        meeting,
    }))
}

/// Handler for GET /v1/meetings
///
/// Lists every meeting where the caller appears in the roster, including
/// meetings they have since left.
#[instrument(skip(state, identity), name = "rc.handlers.list_meetings")]
pub async fn list_meetings(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<MeetingListResponse>, RcError> {
    let meetings = lifecycle::list_for(&state.store, &identity).await;
    Ok(Json(MeetingListResponse { meetings }))
}

/// Handler for GET /v1/meetings/{id}/exists
///
/// Read-only probe used before navigation. Requires authentication but not
/// membership, and never creates or mutates a record.
#[instrument(skip(state, _identity), fields(meeting_id = %meeting_id))]
pub async fn check_meeting_exists(
    State(state): State<Arc<AppState>>,
    Extension(_identity): Extension<Identity>,
    Path(meeting_id): Path<Uuid>,
) -> Result<Json<ExistsResponse>, RcError> {
    let exists = lifecycle::check_exists(&state.store, meeting_id).await;
    Ok(Json(ExistsResponse { exists }))
}

/// Handler for POST /v1/meetings/{id}/join
///
/// # Response
///
/// - 200 OK: Full meeting record (unchanged on rejoin)
/// - 404 Not Found: Meeting does not exist
#[instrument(skip(state, identity), fields(meeting_id = %meeting_id))]
pub async fn join_meeting(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(meeting_id): Path<Uuid>,
) -> Result<Json<MeetingView>, RcError> {
    let meeting = lifecycle::join(&state.store, &identity, meeting_id).await?;
    Ok(Json(MeetingView { meeting }))
}

/// Handler for POST /v1/meetings/{id}/leave
///
/// Marks the caller departed. The participant record stays on the roster
/// with `leftAt` set; host status is not reassigned.
#[instrument(skip(state, identity), fields(meeting_id = %meeting_id))]
pub async fn leave_meeting(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(meeting_id): Path<Uuid>,
) -> Result<Json<MeetingView>, RcError> {
    let meeting = lifecycle::leave(&state.store, &identity, meeting_id).await?;
    Ok(Json(MeetingView { meeting }))
}

/// Handler for POST /v1/meetings/{id}/recording/toggle
///
/// Host only. Returns the NEW recording state; callers must read it rather
/// than assume direction.
///
/// # Response
///
/// - 200 OK: `{"isRecording": <new value>}`
/// - 403 Forbidden: `NOT_AUTHORIZED` (not a participant) or
///   `HOST_REQUIRED` (participant without the host flag)
/// - 404 Not Found: Meeting does not exist
#[instrument(skip(state, identity), fields(meeting_id = %meeting_id))]
pub async fn toggle_recording(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(meeting_id): Path<Uuid>,
) -> Result<Json<RecordingResponse>, RcError> {
    let is_recording =
        authorization::toggle_recording(&state.store, &identity, meeting_id).await?;
    Ok(Json(RecordingResponse { is_recording }))
}

/// Handler for PATCH /v1/meetings/{id}/participants/{pid}/consent
///
/// Host only. Sets the recording consent flag on the named participant.
/// The host's own record is not special-cased; self-revocation is allowed.
#[instrument(
    skip(state, identity, request),
    fields(meeting_id = %meeting_id, participant_id = %participant_id)
)]
pub async fn set_participant_consent(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path((meeting_id, participant_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<ConsentRequest>,
) -> Result<Json<SuccessResponse>, RcError> {
    authorization::set_participant_consent(
        &state.store,
        &identity,
        meeting_id,
        participant_id,
        request.is_recording_allowed,
    )
    .await?;

    Ok(Json(SuccessResponse { success: true }))
}
