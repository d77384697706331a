//! Persistence seam for organizations, meetings and participants.
//!
//! Handlers and services only see `dyn Store`. `PgStore` backs it with
//! PostgreSQL; `MemoryStore` keeps everything in process and is what the
//! test suite runs against.
//!
//! Both implementations enforce the same constraints:
//! - meeting slugs are unique per organization (`Conflict`)
//! - participant composite keys are unique (`Conflict`)
//! - participants must reference an existing organization member (`NotFound`)
//! - `apply_roster_batch` applies all operations or none

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{
    Meeting, MemberWithUser, MeetingParticipant, Organization, OrganizationMember,
    ParticipantKey, ParticipantStatus, RosterChange, RosterOp, User,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync + 'static {
    // --- directory ---------------------------------------------------------

    /// True when no organization exists yet.
    async fn is_empty(&self) -> Result<bool, AppError>;
    async fn upsert_user(&self, user: &User) -> Result<(), AppError>;
    async fn create_organization(&self, org: &Organization) -> Result<(), AppError>;
    async fn add_member(&self, member: &OrganizationMember) -> Result<(), AppError>;
    async fn find_organization_by_slug(&self, slug: &str)
    -> Result<Option<Organization>, AppError>;
    async fn find_member(
        &self,
        organization_id: &str,
        user_id: &str,
    ) -> Result<Option<OrganizationMember>, AppError>;
    /// Every member of the organization with its user profile, ordered by user id.
    async fn find_members_with_user(
        &self,
        organization_id: &str,
    ) -> Result<Vec<MemberWithUser>, AppError>;

    // --- meetings ----------------------------------------------------------

    async fn count_meetings_with_slug(
        &self,
        organization_slug: &str,
        slug: &str,
    ) -> Result<i64, AppError>;
    async fn create_meeting(&self, meeting: &Meeting) -> Result<Meeting, AppError>;
    async fn find_meeting(
        &self,
        organization_slug: &str,
        slug: &str,
    ) -> Result<Option<Meeting>, AppError>;
    /// All meetings of an organization, oldest first.
    async fn find_meetings_by_org(&self, organization_slug: &str)
    -> Result<Vec<Meeting>, AppError>;
    /// Meetings of an organization that are public or have `user_id` enrolled, oldest first.
    async fn find_visible_meetings(
        &self,
        organization_slug: &str,
        user_id: &str,
    ) -> Result<Vec<Meeting>, AppError>;
    async fn set_meeting_public(&self, meeting_id: &str, is_public: bool)
    -> Result<Meeting, AppError>;

    // --- participants ------------------------------------------------------

    async fn find_participant(
        &self,
        key: &ParticipantKey,
    ) -> Result<Option<MeetingParticipant>, AppError>;
    /// Participants of a meeting in enrollment order.
    async fn find_participants(&self, meeting_id: &str)
    -> Result<Vec<MeetingParticipant>, AppError>;
    async fn find_participant_by_code(
        &self,
        meeting_id: &str,
        code: &str,
    ) -> Result<Option<MeetingParticipant>, AppError>;
    async fn create_participant(
        &self,
        participant: &MeetingParticipant,
    ) -> Result<MeetingParticipant, AppError>;
    async fn set_participant_status(
        &self,
        key: &ParticipantKey,
        status: ParticipantStatus,
    ) -> Result<MeetingParticipant, AppError>;
    /// Apply creates and deletes as one atomic unit. A delete of a row that
    /// does not exist fails with `NotFound` and rolls back the whole batch.
    async fn apply_roster_batch(&self, ops: &[RosterOp]) -> Result<Vec<RosterChange>, AppError>;
}
