//! Organization and meeting access gates.
//!
//! Each gate takes the caller and a resource reference (organization slug,
//! or organization slug + meeting slug), resolves the records, checks the
//! caller's relationship, and hands back a typed grant. Services accept only
//! the grant type their operation needs, so a handler cannot run an admin
//! operation behind a member check.
//!
//! | gate              | grant            | granted when                                   |
//! |-------------------|------------------|------------------------------------------------|
//! | `org_member`      | `OrgMember`      | caller belongs to the organization             |
//! | `org_admin`       | `OrgAdmin`       | caller's role is `ADMIN`                       |
//! | `meeting_member`  | `MeetingMember`  | admin, enrolled participant, or public meeting |
//! | `meeting_admin`   | `MeetingAdmin`   | caller's role is `ADMIN`                       |
//!
//! Unknown organization or meeting → `AppError::NotFound`.
//! Missing membership or insufficient role → `AppError::Unauthorized`.

use std::ops::Deref;

use crate::auth::session::Caller;
use crate::errors::AppError;
use crate::models::{Meeting, Organization, OrganizationMember, ParticipantKey};
use crate::store::Store;

/// Caller verified as a member of `organization`.
#[derive(Debug, Clone)]
pub struct OrgMember {
    user_id: String,
    organization: Organization,
    member: OrganizationMember,
}

impl OrgMember {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn organization(&self) -> &Organization {
        &self.organization
    }

    pub fn member(&self) -> &OrganizationMember {
        &self.member
    }

    pub fn is_admin(&self) -> bool {
        self.member.is_admin()
    }

    /// Key of the caller's own participant row in `meeting`.
    pub fn participant_key(&self, meeting: &Meeting) -> ParticipantKey {
        ParticipantKey {
            meeting_id: meeting.id.clone(),
            member_organization_id: self.organization.id.clone(),
            member_user_id: self.user_id.clone(),
        }
    }
}

/// Caller verified as an organization admin.
#[derive(Debug, Clone)]
pub struct OrgAdmin(OrgMember);

impl Deref for OrgAdmin {
    type Target = OrgMember;

    fn deref(&self) -> &OrgMember {
        &self.0
    }
}

/// Caller allowed to see `meeting`.
#[derive(Debug, Clone)]
pub struct MeetingMember {
    org: OrgMember,
    meeting: Meeting,
}

impl MeetingMember {
    pub fn meeting(&self) -> &Meeting {
        &self.meeting
    }
}

impl Deref for MeetingMember {
    type Target = OrgMember;

    fn deref(&self) -> &OrgMember {
        &self.org
    }
}

/// Organization admin acting on `meeting`.
#[derive(Debug, Clone)]
pub struct MeetingAdmin {
    org: OrgMember,
    meeting: Meeting,
}

impl MeetingAdmin {
    pub fn meeting(&self) -> &Meeting {
        &self.meeting
    }
}

impl Deref for MeetingAdmin {
    type Target = OrgMember;

    fn deref(&self) -> &OrgMember {
        &self.org
    }
}

pub async fn org_member(
    store: &dyn Store,
    caller: &Caller,
    org_slug: &str,
) -> Result<OrgMember, AppError> {
    let organization = store
        .find_organization_by_slug(org_slug)
        .await?
        .ok_or(AppError::NotFound)?;
    let member = store
        .find_member(&organization.id, &caller.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized(format!("not a member of '{org_slug}'")))?;
    Ok(OrgMember {
        user_id: caller.user_id.clone(),
        organization,
        member,
    })
}

pub async fn org_admin(
    store: &dyn Store,
    caller: &Caller,
    org_slug: &str,
) -> Result<OrgAdmin, AppError> {
    let member = org_member(store, caller, org_slug).await?;
    if !member.is_admin() {
        return Err(AppError::Unauthorized(format!("admin role required in '{org_slug}'")));
    }
    Ok(OrgAdmin(member))
}

async fn resolve_meeting(
    store: &dyn Store,
    org: &OrgMember,
    meeting_slug: &str,
) -> Result<Meeting, AppError> {
    store
        .find_meeting(&org.organization.slug, meeting_slug)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn meeting_member(
    store: &dyn Store,
    caller: &Caller,
    org_slug: &str,
    meeting_slug: &str,
) -> Result<MeetingMember, AppError> {
    let org = org_member(store, caller, org_slug).await?;
    let meeting = resolve_meeting(store, &org, meeting_slug).await?;

    let allowed = org.is_admin()
        || meeting.is_public
        || store
            .find_participant(&org.participant_key(&meeting))
            .await?
            .is_some();
    if !allowed {
        return Err(AppError::Unauthorized(format!(
            "meeting '{meeting_slug}' is private"
        )));
    }
    Ok(MeetingMember { org, meeting })
}

pub async fn meeting_admin(
    store: &dyn Store,
    caller: &Caller,
    org_slug: &str,
    meeting_slug: &str,
) -> Result<MeetingAdmin, AppError> {
    let OrgAdmin(org) = org_admin(store, caller, org_slug).await?;
    let meeting = resolve_meeting(store, &org, meeting_slug).await?;
    Ok(MeetingAdmin { org, meeting })
}
