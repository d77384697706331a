use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Store;
use crate::errors::AppError;
use crate::models::{
    Meeting, MemberWithUser, MeetingParticipant, Organization, OrganizationMember,
    ParticipantKey, ParticipantStatus, RosterAction, RosterChange, RosterOp, User,
};

#[derive(Debug, Default, Clone)]
struct MemoryState {
    users: HashMap<String, User>,
    organizations: Vec<Organization>,
    members: Vec<OrganizationMember>,
    meetings: Vec<Meeting>,
    participants: Vec<MeetingParticipant>,
}

impl MemoryState {
    fn has_member(&self, organization_id: &str, user_id: &str) -> bool {
        self.members
            .iter()
            .any(|m| m.organization_id == organization_id && m.user_id == user_id)
    }

    fn position(&self, key: &ParticipantKey) -> Option<usize> {
        self.participants.iter().position(|p| {
            p.meeting_id == key.meeting_id
                && p.member_organization_id == key.member_organization_id
                && p.member_user_id == key.member_user_id
        })
    }

    fn insert_participant(
        &mut self,
        participant: &MeetingParticipant,
    ) -> Result<MeetingParticipant, AppError> {
        if !self.meetings.iter().any(|m| m.id == participant.meeting_id) {
            return Err(AppError::NotFound);
        }
        if !self.has_member(&participant.member_organization_id, &participant.member_user_id) {
            return Err(AppError::NotFound);
        }
        if self.position(&participant.key()).is_some() {
            return Err(AppError::Conflict(format!(
                "user {} is already a participant of meeting {}",
                participant.member_user_id, participant.meeting_id
            )));
        }
        self.participants.push(participant.clone());
        Ok(participant.clone())
    }

    fn remove_participant(&mut self, key: &ParticipantKey) -> Result<MeetingParticipant, AppError> {
        let idx = self.position(key).ok_or(AppError::NotFound)?;
        Ok(self.participants.remove(idx))
    }
}

/// In-process `Store`. State lives behind one mutex, so every call is atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.state().organizations.is_empty())
    }

    async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        self.state().users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn create_organization(&self, org: &Organization) -> Result<(), AppError> {
        let mut state = self.state();
        if state
            .organizations
            .iter()
            .any(|o| o.id == org.id || o.slug == org.slug)
        {
            return Err(AppError::Conflict(format!("organization '{}' already exists", org.slug)));
        }
        state.organizations.push(org.clone());
        Ok(())
    }

    async fn add_member(&self, member: &OrganizationMember) -> Result<(), AppError> {
        let mut state = self.state();
        if !state.organizations.iter().any(|o| o.id == member.organization_id)
            || !state.users.contains_key(&member.user_id)
        {
            return Err(AppError::NotFound);
        }
        if state.has_member(&member.organization_id, &member.user_id) {
            return Err(AppError::Conflict(format!(
                "user {} is already a member of organization {}",
                member.user_id, member.organization_id
            )));
        }
        state.members.push(member.clone());
        Ok(())
    }

    async fn find_organization_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Organization>, AppError> {
        Ok(self
            .state()
            .organizations
            .iter()
            .find(|o| o.slug == slug)
            .cloned())
    }

    async fn find_member(
        &self,
        organization_id: &str,
        user_id: &str,
    ) -> Result<Option<OrganizationMember>, AppError> {
        Ok(self
            .state()
            .members
            .iter()
            .find(|m| m.organization_id == organization_id && m.user_id == user_id)
            .cloned())
    }

    async fn find_members_with_user(
        &self,
        organization_id: &str,
    ) -> Result<Vec<MemberWithUser>, AppError> {
        let state = self.state();
        let mut members: Vec<MemberWithUser> = state
            .members
            .iter()
            .filter(|m| m.organization_id == organization_id)
            .filter_map(|m| {
                state.users.get(&m.user_id).map(|user| MemberWithUser {
                    organization_id: m.organization_id.clone(),
                    user_id: m.user_id.clone(),
                    role: m.role,
                    user: user.clone(),
                })
            })
            .collect();
        members.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(members)
    }

    async fn count_meetings_with_slug(
        &self,
        organization_slug: &str,
        slug: &str,
    ) -> Result<i64, AppError> {
        let count = self
            .state()
            .meetings
            .iter()
            .filter(|m| m.organization_slug == organization_slug && m.slug == slug)
            .count();
        Ok(count as i64)
    }

    async fn create_meeting(&self, meeting: &Meeting) -> Result<Meeting, AppError> {
        let mut state = self.state();
        if !state
            .organizations
            .iter()
            .any(|o| o.slug == meeting.organization_slug)
        {
            return Err(AppError::NotFound);
        }
        if state.meetings.iter().any(|m| {
            m.id == meeting.id
                || (m.organization_slug == meeting.organization_slug && m.slug == meeting.slug)
        }) {
            return Err(AppError::Conflict(format!(
                "meeting slug '{}' is already taken",
                meeting.slug
            )));
        }
        state.meetings.push(meeting.clone());
        Ok(meeting.clone())
    }

    async fn find_meeting(
        &self,
        organization_slug: &str,
        slug: &str,
    ) -> Result<Option<Meeting>, AppError> {
        Ok(self
            .state()
            .meetings
            .iter()
            .find(|m| m.organization_slug == organization_slug && m.slug == slug)
            .cloned())
    }

    async fn find_meetings_by_org(
        &self,
        organization_slug: &str,
    ) -> Result<Vec<Meeting>, AppError> {
        Ok(self
            .state()
            .meetings
            .iter()
            .filter(|m| m.organization_slug == organization_slug)
            .cloned()
            .collect())
    }

    async fn find_visible_meetings(
        &self,
        organization_slug: &str,
        user_id: &str,
    ) -> Result<Vec<Meeting>, AppError> {
        let state = self.state();
        Ok(state
            .meetings
            .iter()
            .filter(|m| m.organization_slug == organization_slug)
            .filter(|m| {
                m.is_public
                    || state
                        .participants
                        .iter()
                        .any(|p| p.meeting_id == m.id && p.member_user_id == user_id)
            })
            .cloned()
            .collect())
    }

    async fn set_meeting_public(
        &self,
        meeting_id: &str,
        is_public: bool,
    ) -> Result<Meeting, AppError> {
        let mut state = self.state();
        let meeting = state
            .meetings
            .iter_mut()
            .find(|m| m.id == meeting_id)
            .ok_or(AppError::NotFound)?;
        meeting.is_public = is_public;
        Ok(meeting.clone())
    }

    async fn find_participant(
        &self,
        key: &ParticipantKey,
    ) -> Result<Option<MeetingParticipant>, AppError> {
        let state = self.state();
        Ok(state.position(key).map(|idx| state.participants[idx].clone()))
    }

    async fn find_participants(
        &self,
        meeting_id: &str,
    ) -> Result<Vec<MeetingParticipant>, AppError> {
        Ok(self
            .state()
            .participants
            .iter()
            .filter(|p| p.meeting_id == meeting_id)
            .cloned()
            .collect())
    }

    async fn find_participant_by_code(
        &self,
        meeting_id: &str,
        code: &str,
    ) -> Result<Option<MeetingParticipant>, AppError> {
        Ok(self
            .state()
            .participants
            .iter()
            .find(|p| p.meeting_id == meeting_id && p.code == code)
            .cloned())
    }

    async fn create_participant(
        &self,
        participant: &MeetingParticipant,
    ) -> Result<MeetingParticipant, AppError> {
        self.state().insert_participant(participant)
    }

    async fn set_participant_status(
        &self,
        key: &ParticipantKey,
        status: ParticipantStatus,
    ) -> Result<MeetingParticipant, AppError> {
        let mut state = self.state();
        let idx = state.position(key).ok_or(AppError::NotFound)?;
        state.participants[idx].status = status;
        Ok(state.participants[idx].clone())
    }

    async fn apply_roster_batch(&self, ops: &[RosterOp]) -> Result<Vec<RosterChange>, AppError> {
        let mut state = self.state();
        // Work on a copy; the guard's state is only replaced once every op succeeded.
        let mut draft = state.clone();
        let mut changes = Vec::with_capacity(ops.len());
        for op in ops {
            let change = match op {
                RosterOp::Create(participant) => RosterChange {
                    action: RosterAction::Created,
                    participant: draft.insert_participant(participant)?,
                },
                RosterOp::Delete(key) => RosterChange {
                    action: RosterAction::Deleted,
                    participant: draft.remove_participant(key)?,
                },
            };
            changes.push(change);
        }
        *state = draft;
        Ok(changes)
    }
}
