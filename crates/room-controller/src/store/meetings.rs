//! In-memory meeting table with per-meeting serialization.
//!
//! Each meeting lives behind its own `Mutex`, so every read-modify-write
//! sequence on one meeting is atomic with respect to other operations on
//! the same meeting id, and operations on different meetings never block
//! one another. The outer map lock is held only long enough to clone the
//! per-meeting handle, never across an `.await` on a meeting lock.

use super::StoreError;
use crate::models::{Meeting, MeetingPatch, MeetingStatus, Participant, ParticipantPatch};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Everything a caller supplies to create a meeting.
///
/// The store assigns the id and creation timestamp itself.
#[derive(Debug, Clone)]
pub struct MeetingSeed {
    pub title: String,
    pub status: MeetingStatus,
    pub is_recording: bool,
    pub participants: Vec<Participant>,
    pub start_time: DateTime<Utc>,
    pub max_participants: i32,
    pub host_id: Uuid,
}

/// Authoritative in-memory meeting table, keyed by meeting id.
#[derive(Default)]
pub struct SessionStore {
    meetings: RwLock<HashMap<Uuid, Arc<Mutex<Meeting>>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new meeting, assigning a fresh unique id and stamping
    /// `created_at`. Returns the stored record.
    pub async fn create(&self, seed: MeetingSeed) -> Meeting {
        let meeting = Meeting {
            id: Uuid::new_v4(),
            title: seed.title,
            status: seed.status,
            is_recording: seed.is_recording,
            participants: seed.participants,
            created_at: Utc::now(),
            start_time: seed.start_time,
            end_time: None,
            max_participants: seed.max_participants,
            host_id: seed.host_id,
        };

        let mut meetings = self.meetings.write().await;
        meetings.insert(meeting.id, Arc::new(Mutex::new(meeting.clone())));

        tracing::debug!(
            target: "rc.store",
            meeting_id = %meeting.id,
            "Meeting created"
        );

        meeting
    }

    /// Snapshot of a meeting's current state.
    pub async fn get_by_id(&self, id: Uuid) -> Option<Meeting> {
        let handle = self.handle(id).await?;
        let meeting = handle.lock().await;
        Some(meeting.clone())
    }

    /// All meetings where `user_id` appears in the roster, oldest first.
    ///
    /// Departed participants (with `left_at` set) still count; a user's
    /// meeting history survives their departure.
    pub async fn list_by_participant(&self, user_id: Uuid) -> Vec<Meeting> {
        let handles: Vec<Arc<Mutex<Meeting>>> = {
            let meetings = self.meetings.read().await;
            meetings.values().cloned().collect()
        };

        let mut result = Vec::new();
        for handle in handles {
            let meeting = handle.lock().await;
            if meeting.participant(user_id).is_some() {
                result.push(meeting.clone());
            }
        }

        result.sort_by_key(|m| m.created_at);
        result
    }

    /// Merge a partial field set into a stored meeting.
    ///
    /// Returns the updated record, or `None` if the id is absent.
    pub async fn update(&self, id: Uuid, patch: MeetingPatch) -> Option<Meeting> {
        self.with_meeting(id, |meeting| {
            if let Some(title) = patch.title {
                meeting.title = title;
            }
            if let Some(status) = patch.status {
                meeting.status = status;
            }
            if let Some(is_recording) = patch.is_recording {
                meeting.is_recording = is_recording;
            }
            if let Some(end_time) = patch.end_time {
                meeting.end_time = Some(end_time);
            }
            meeting.clone()
        })
        .await
    }

    /// Insert a participant unless one with the same id already exists.
    ///
    /// The duplicate case is a no-op that still reports success, which
    /// makes join idempotent at the store level.
    ///
    /// # Errors
    ///
    /// `StoreError::MeetingNotFound` if the meeting id is absent.
    pub async fn upsert_participant(
        &self,
        meeting_id: Uuid,
        participant: Participant,
    ) -> Result<(), StoreError> {
        self.with_meeting(meeting_id, |meeting| {
            if meeting.participant(participant.id).is_none() {
                meeting.participants.push(participant);
            }
        })
        .await
        .ok_or(StoreError::MeetingNotFound)
    }

    /// Merge fields into an existing participant record.
    ///
    /// # Errors
    ///
    /// `StoreError::MeetingNotFound` or `StoreError::ParticipantNotFound`
    /// when either id fails to resolve.
    pub async fn update_participant(
        &self,
        meeting_id: Uuid,
        participant_id: Uuid,
        patch: ParticipantPatch,
    ) -> Result<(), StoreError> {
        self.with_meeting(meeting_id, |meeting| {
            let Some(participant) = meeting.participant_mut(participant_id) else {
                return Err(StoreError::ParticipantNotFound);
            };

            if let Some(allowed) = patch.is_recording_allowed {
                participant.is_recording_allowed = allowed;
            }
            if let Some(muted) = patch.is_muted {
                participant.is_muted = muted;
            }
            if let Some(video_off) = patch.is_video_off {
                participant.is_video_off = video_off;
            }
            if let Some(left_at) = patch.left_at {
                participant.left_at = Some(left_at);
            }
            Ok(())
        })
        .await
        .ok_or(StoreError::MeetingNotFound)?
    }

    /// Run `f` against a meeting under its per-meeting lock.
    ///
    /// This is the serialization point required by the lifecycle and
    /// authorization code: any check-then-act sequence passed in as a
    /// single closure executes atomically for that meeting id.
    pub async fn with_meeting<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Meeting) -> T,
    ) -> Option<T> {
        let handle = self.handle(id).await?;
        let mut meeting = handle.lock().await;
        Some(f(&mut meeting))
    }

    /// Whether a meeting id resolves. Never mutates state.
    pub async fn contains(&self, id: Uuid) -> bool {
        let meetings = self.meetings.read().await;
        meetings.contains_key(&id)
    }

    async fn handle(&self, id: Uuid) -> Option<Arc<Mutex<Meeting>>> {
        let meetings = self.meetings.read().await;
        meetings.get(&id).cloned()
    }
}
