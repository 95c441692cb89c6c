//! Room Controller models.
//!
//! Core meeting/participant records plus the request and response types of
//! the HTTP surface. Wire format is camelCase JSON, matching what the
//! browser client consumes.

use chrono::{DateTime, Utc};
use common::secret::SecretString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default meeting title when the creator supplies none.
pub const DEFAULT_MEETING_TITLE: &str = "Untitled Meeting";

/// Default participant capacity for new meetings.
///
/// Informational only; joins are not rejected when the roster reaches it.
pub const DEFAULT_MAX_PARTICIPANTS: i32 = 10;

/// Meeting status enumeration.
///
/// Represents the lifecycle state of a meeting. The only transition the
/// controller performs is `Active -> Ended`; `Scheduled` exists in the data
/// model but nothing currently produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    /// Meeting is scheduled but not yet active.
    Scheduled,

    /// Meeting is currently in progress.
    Active,

    /// Meeting has ended.
    Ended,
}

impl MeetingStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Scheduled => "scheduled",
            MeetingStatus::Active => "active",
            MeetingStatus::Ended => "ended",
        }
    }
}

/// Presentational participant role.
///
/// This tag drives display only. Authorization decisions branch on
/// [`Participant::is_host`], never on this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Host,
    Guest,
    Producer,
}

/// A verified caller identity, produced by token verification.
///
/// Handlers receive this from the auth middleware; no component below the
/// middleware ever sees the raw credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Authenticated user id.
    pub user_id: Uuid,

    /// Email the credential was issued for. Doubles as the display name
    /// for participant records.
    pub email: String,
}

/// A user's membership record within one meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Equal to the owning user's id; one record per user per meeting.
    pub id: Uuid,

    /// Display name (derived from the user's email; not unique).
    pub name: String,

    /// Presentational role tag.
    pub role: ParticipantRole,

    /// Per-participant recording consent, host-controlled.
    pub is_recording_allowed: bool,

    /// Presentational media state, not authorization-relevant.
    pub is_muted: bool,

    /// Presentational media state, not authorization-relevant.
    pub is_video_off: bool,

    /// Authoritative flag for host-only actions.
    pub is_host: bool,

    /// When the participant's join was accepted.
    pub joined_at: DateTime<Utc>,

    /// Set when the participant departs; the record is retained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_at: Option<DateTime<Utc>>,
}

impl Participant {
    /// Build a participant record for a join accepted at `joined_at`.
    ///
    /// The first accepted join gets the host flag and role; everyone after
    /// is a guest. Recording consent defaults to allowed.
    #[must_use]
    pub fn joining(identity: &Identity, is_first: bool, joined_at: DateTime<Utc>) -> Self {
        Self {
            id: identity.user_id,
            name: identity.email.clone(),
            role: if is_first {
                ParticipantRole::Host
            } else {
                ParticipantRole::Guest
            },
            is_recording_allowed: true,
            is_muted: false,
            is_video_off: false,
            is_host: is_first,
            joined_at,
            left_at: None,
        }
    }
}

/// A bounded collaboration session with a participant roster and a
/// recording flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    /// Unique meeting identifier, stable for the meeting lifetime.
    pub id: Uuid,

    /// Display title.
    pub title: String,

    /// Lifecycle state.
    pub status: MeetingStatus,

    /// Whether recording is currently on. Toggled only by the host.
    pub is_recording: bool,

    /// Roster in join order. Join order determines host assignment.
    pub participants: Vec<Participant>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// When the meeting started.
    pub start_time: DateTime<Utc>,

    /// When the meeting ended, if it has.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,

    /// Informational capacity bound; not enforced as a hard limit.
    pub max_participants: i32,

    /// User id of the creator.
    pub host_id: Uuid,
}

impl Meeting {
    /// Look up a participant by user id.
    #[must_use]
    pub fn participant(&self, user_id: Uuid) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == user_id)
    }

    /// Mutable participant lookup by user id.
    pub fn participant_mut(&mut self, user_id: Uuid) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == user_id)
    }
}

/// Partial update applied to a stored meeting.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct MeetingPatch {
    pub title: Option<String>,
    pub status: Option<MeetingStatus>,
    pub is_recording: Option<bool>,
    pub end_time: Option<DateTime<Utc>>,
}

/// Partial update applied to a stored participant.
#[derive(Debug, Clone, Default)]
pub struct ParticipantPatch {
    pub is_recording_allowed: Option<bool>,
    pub is_muted: Option<bool>,
    pub is_video_off: Option<bool>,
    pub left_at: Option<DateTime<Utc>>,
}

/// A registered user account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// bcrypt hash; the plaintext never leaves the registration/login path.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Maximum accepted display name length.
pub const MAX_NAME_LENGTH: usize = 100;

/// Request body for `POST /v1/auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: SecretString,
    pub name: String,
}

impl RegisterRequest {
    /// Validate the registration fields.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message when a field is empty, the email
    /// has no `@`, or the name exceeds [`MAX_NAME_LENGTH`].
    pub fn validate(&self) -> Result<(), String> {
        use common::secret::ExposeSecret;

        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err("A valid email address is required".to_string());
        }
        if self.password.expose_secret().is_empty() {
            return Err("A password is required".to_string());
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err("A display name is required".to_string());
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(format!(
                "Display name must be at most {MAX_NAME_LENGTH} characters"
            ));
        }
        Ok(())
    }
}

/// Request body for `POST /v1/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
}

/// Public view of a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// Response for register and login: a fresh credential plus the account.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

/// Request body for `POST /v1/meetings`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateMeetingRequest {
    /// Display title; defaults to [`DEFAULT_MEETING_TITLE`] when absent.
    pub title: Option<String>,
}

/// Response for `POST /v1/meetings`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeetingResponse {
    pub room_id: Uuid,
    pub meeting: Meeting,
}

/// Response for `GET /v1/meetings`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MeetingListResponse {
    pub meetings: Vec<Meeting>,
}

/// Response for `GET /v1/meetings/{id}/exists`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

/// Response for join and leave: the full updated meeting view.
#[derive(Debug, Serialize, Deserialize)]
pub struct MeetingView {
    pub meeting: Meeting,
}

/// Response for `POST /v1/meetings/{id}/recording/toggle`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingResponse {
    /// The new state. Callers must read this rather than assume direction;
    /// the operation is a toggle, not a set.
    pub is_recording: bool,
}

/// Request body for the per-participant consent update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRequest {
    pub is_recording_allowed: bool,
}

/// Generic success acknowledgement.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Health check response for `GET /v1/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service health status ("healthy").
    pub status: String,

    /// Service identifier.
    pub service: String,
}
