use chrono::Utc;

use crate::auth::gate::{MeetingAdmin, MeetingMember, OrgAdmin, OrgMember};
use crate::errors::AppError;
use crate::models::ids::generate_id;
use crate::models::meeting::disambiguate_slug;
use crate::models::{Meeting, MeetingName, MeetingView};
use crate::store::Store;

/// `meeting.create`: new private meeting in the admin's organization.
///
/// The slug suffix counts existing meetings with the same base slug in this
/// organization only. If a suffixed slug is itself already taken the store
/// reports `Conflict`.
pub async fn create(
    store: &dyn Store,
    access: &OrgAdmin,
    name: &MeetingName,
) -> Result<Meeting, AppError> {
    let org_slug = &access.organization().slug;
    let existing = store.count_meetings_with_slug(org_slug, name.slug()).await?;

    let meeting = Meeting {
        id: generate_id(),
        name: name.name().to_string(),
        slug: disambiguate_slug(name.slug(), existing),
        organization_slug: org_slug.clone(),
        is_public: false,
        created_at: Utc::now(),
    };
    store.create_meeting(&meeting).await
}

/// `meeting.list`: everything for admins; otherwise enrolled or public meetings.
pub async fn list(store: &dyn Store, access: &OrgMember) -> Result<Vec<Meeting>, AppError> {
    let org_slug = &access.organization().slug;
    if access.is_admin() {
        store.find_meetings_by_org(org_slug).await
    } else {
        store.find_visible_meetings(org_slug, access.user_id()).await
    }
}

/// `meeting.get`: the meeting plus the caller's enrollment (`None` if not enrolled).
pub async fn get(store: &dyn Store, access: &MeetingMember) -> Result<MeetingView, AppError> {
    let meeting = access.meeting().clone();
    let participant = store
        .find_participant(&access.participant_key(&meeting))
        .await?;
    Ok(MeetingView { meeting, participant })
}

/// `meeting.toggleAccess`: flip public/private.
pub async fn toggle_access(store: &dyn Store, access: &MeetingAdmin) -> Result<Meeting, AppError> {
    let meeting = access.meeting();
    store.set_meeting_public(&meeting.id, !meeting.is_public).await
}
