use std::collections::{HashMap, HashSet};

use crate::auth::gate::{MeetingAdmin, MeetingMember};
use crate::errors::AppError;
use crate::models::{
    MeetingParticipant, MemberIds, MemberWithUser, ParticipantKey, ParticipantWithMember,
    RosterChange, RosterEntry, RosterOp,
};
use crate::store::Store;

/// `meeting.participant.getRoster`: every organization member, each with
/// its enrollment in this meeting (zero or one record).
pub async fn get_roster(store: &dyn Store, access: &MeetingAdmin) -> Result<Vec<RosterEntry>, AppError> {
    let members = store
        .find_members_with_user(&access.organization().id)
        .await?;
    let mut enrolled: HashMap<String, MeetingParticipant> = store
        .find_participants(&access.meeting().id)
        .await?
        .into_iter()
        .map(|p| (p.member_user_id.clone(), p))
        .collect();

    Ok(members
        .into_iter()
        .map(|member| {
            let meetings = enrolled.remove(&member.user_id).into_iter().collect();
            RosterEntry { member, meetings }
        })
        .collect())
}

/// `meeting.participant.list`: enrolled participants with member and user attached.
pub async fn list(
    store: &dyn Store,
    access: &MeetingAdmin,
) -> Result<Vec<ParticipantWithMember>, AppError> {
    let participants = store.find_participants(&access.meeting().id).await?;
    attach_members(store, access, participants).await
}

/// Join participant rows with their organization member and user profile.
/// Rows whose member has vanished are dropped.
pub(crate) async fn attach_members(
    store: &dyn Store,
    access: &MeetingAdmin,
    participants: Vec<MeetingParticipant>,
) -> Result<Vec<ParticipantWithMember>, AppError> {
    let members: HashMap<String, MemberWithUser> = store
        .find_members_with_user(&access.organization().id)
        .await?
        .into_iter()
        .map(|m| (m.user_id.clone(), m))
        .collect();

    Ok(participants
        .into_iter()
        .filter_map(|participant| {
            members
                .get(&participant.member_user_id)
                .cloned()
                .map(|member| ParticipantWithMember { participant, member })
        })
        .collect())
}

/// Build the reconciliation batch for `members` against the enrolled set.
///
/// Toggle semantics: an id that is not enrolled is created, an id that is
/// enrolled is deleted. Enrolled ids absent from the input are left alone.
/// The enrolled set is a snapshot, so a duplicated id yields the same op
/// twice and the batch fails as a whole.
pub fn plan_roster_batch(
    access: &MeetingAdmin,
    enrolled: &HashSet<String>,
    members: &MemberIds,
) -> Vec<RosterOp> {
    let meeting_id = &access.meeting().id;
    let organization_id = &access.organization().id;

    members
        .iter()
        .map(|user_id| {
            if enrolled.contains(user_id) {
                RosterOp::Delete(ParticipantKey {
                    meeting_id: meeting_id.clone(),
                    member_organization_id: organization_id.clone(),
                    member_user_id: user_id.to_string(),
                })
            } else {
                RosterOp::Create(MeetingParticipant::register(meeting_id, organization_id, user_id))
            }
        })
        .collect()
}

/// `meeting.participant.update`: toggle enrollment for each submitted id, atomically.
pub async fn update(
    store: &dyn Store,
    access: &MeetingAdmin,
    members: &MemberIds,
) -> Result<Vec<RosterChange>, AppError> {
    let enrolled: HashSet<String> = store
        .find_participants(&access.meeting().id)
        .await?
        .into_iter()
        .map(|p| p.member_user_id)
        .collect();

    let ops = plan_roster_batch(access, &enrolled, members);
    store.apply_roster_batch(&ops).await
}

/// `meeting.participant.register`: enroll the caller. A second call is a `Conflict`.
pub async fn register(store: &dyn Store, access: &MeetingMember) -> Result<MeetingParticipant, AppError> {
    let participant = MeetingParticipant::register(
        &access.meeting().id,
        &access.organization().id,
        access.user_id(),
    );
    store.create_participant(&participant).await
}
