use crate::auth::gate::MeetingAdmin;
use crate::errors::AppError;
use crate::models::participant::normalize_code;
use crate::models::{MeetingParticipant, ParticipantStatus, ParticipantWithMember};
use crate::services::participant::attach_members;
use crate::store::Store;

/// `meeting.attendance.checkIn`: mark the participant holding `code` as attended.
/// Checking in twice is a no-op.
pub async fn check_in(
    store: &dyn Store,
    access: &MeetingAdmin,
    code: &str,
) -> Result<MeetingParticipant, AppError> {
    let code = normalize_code(code)?;
    let participant = store
        .find_participant_by_code(&access.meeting().id, &code)
        .await?
        .ok_or(AppError::NotFound)?;

    if participant.status == ParticipantStatus::Attended {
        return Ok(participant);
    }
    store
        .set_participant_status(&participant.key(), ParticipantStatus::Attended)
        .await
}

/// `meeting.attendance.list`: participants already checked in.
pub async fn list(
    store: &dyn Store,
    access: &MeetingAdmin,
) -> Result<Vec<ParticipantWithMember>, AppError> {
    let attended = store
        .find_participants(&access.meeting().id)
        .await?
        .into_iter()
        .filter(|p| p.status == ParticipantStatus::Attended)
        .collect();
    attach_members(store, access, attended).await
}
