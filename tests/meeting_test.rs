//! Meeting service tests: create, list, get, toggleAccess.

mod common;

use std::collections::HashSet;

use common::*;
use orgmeet::auth::gate;
use orgmeet::errors::AppError;
use orgmeet::models::{MeetingName, MemberIds};
use orgmeet::services::meeting as meeting_service;
use orgmeet::services::participant as participant_service;

// --- create ---

#[tokio::test]
async fn test_create_meeting_derives_slug() {
    let db = setup_test_store().await;
    let meeting = create_meeting(db.store(), "Team Standup").await;

    assert_eq!(meeting.slug, "teamstandup");
    assert_eq!(meeting.name, "Team Standup");
    assert_eq!(meeting.organization_slug, ORG);
    assert!(!meeting.is_public, "new meetings start private");
}

#[tokio::test]
async fn test_create_meeting_appends_collision_count() {
    let db = setup_test_store().await;
    let store = db.store();

    let first = create_meeting(store, "Team Standup").await;
    let second = create_meeting(store, "Team Standup").await;

    assert_eq!(first.slug, "teamstandup");
    assert_eq!(second.slug, "teamstandup1");
}

#[tokio::test]
async fn test_suffixed_slug_collision_is_a_conflict() {
    let db = setup_test_store().await;
    let store = db.store();
    create_meeting(store, "Team Standup").await;
    create_meeting(store, "Team Standup").await;

    // Still only one meeting with the bare slug, so the suffix is 1 again.
    let access = org_admin(store, ORG, ADMIN_ID).await;
    let name = MeetingName::parse("team standup").unwrap();
    let result = meeting_service::create(store, &access, &name).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_slug_collision_is_scoped_to_organization() {
    let db = setup_test_store().await;
    let store = db.store();
    create_meeting(store, "Team Standup").await;

    let globex_admin = org_admin(store, OTHER_ORG, OUTSIDER_ID).await;
    let name = MeetingName::parse("Team Standup").unwrap();
    let meeting = meeting_service::create(store, &globex_admin, &name).await.unwrap();

    assert_eq!(meeting.slug, "teamstandup");
    assert_eq!(meeting.organization_slug, OTHER_ORG);
}

#[tokio::test]
async fn test_create_requires_org_admin() {
    let db = setup_test_store().await;
    let result = gate::org_admin(db.store(), &caller(MEMBER_ID), ORG).await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

// --- list ---

#[tokio::test]
async fn test_list_for_admin_returns_every_meeting() {
    let db = setup_test_store().await;
    let store = db.store();
    create_meeting(store, "Private One").await;
    create_public_meeting(store, "Public One").await;

    let access = gate::org_member(store, &caller(ADMIN_ID), ORG).await.unwrap();
    let meetings = meeting_service::list(store, &access).await.unwrap();

    let slugs: Vec<_> = meetings.iter().map(|m| m.slug.as_str()).collect();
    assert_eq!(slugs, vec!["privateone", "publicone"]);
}

#[tokio::test]
async fn test_list_for_member_returns_enrolled_and_public_only() {
    let db = setup_test_store().await;
    let store = db.store();
    let enrolled = create_meeting(store, "Enrolled Private").await;
    create_meeting(store, "Hidden Private").await;
    create_public_meeting(store, "Open Forum").await;

    let admin = meeting_admin(store, &enrolled).await;
    let ids = MemberIds::parse(vec![MEMBER_ID.to_string()]).unwrap();
    participant_service::update(store, &admin, &ids).await.unwrap();

    let access = gate::org_member(store, &caller(MEMBER_ID), ORG).await.unwrap();
    let slugs: HashSet<String> = meeting_service::list(store, &access)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.slug)
        .collect();

    let expected: HashSet<String> =
        ["enrolledprivate", "openforum"].iter().map(|s| s.to_string()).collect();
    assert_eq!(slugs, expected);
}

#[tokio::test]
async fn test_list_never_crosses_organizations() {
    let db = setup_test_store().await;
    let store = db.store();
    create_public_meeting(store, "Open Forum").await;

    let access = gate::org_member(store, &caller(OUTSIDER_ID), OTHER_ORG).await.unwrap();
    let meetings = meeting_service::list(store, &access).await.unwrap();
    assert!(meetings.is_empty());
}

// --- get ---

#[tokio::test]
async fn test_get_public_meeting_without_enrollment_has_null_participant() {
    let db = setup_test_store().await;
    let store = db.store();
    let meeting = create_public_meeting(store, "Open Forum").await;

    let access = meeting_member(store, &meeting, MEMBER_ID).await;
    let view = meeting_service::get(store, &access).await.unwrap();

    assert_eq!(view.meeting.id, meeting.id);
    assert!(view.participant.is_none());

    let json = serde_json::to_value(&view).unwrap();
    assert!(json["participant"].is_null());
    assert_eq!(json["slug"], "openforum");
}

#[tokio::test]
async fn test_get_returns_callers_participant_record() {
    let db = setup_test_store().await;
    let store = db.store();
    let meeting = create_meeting(store, "Board Sync").await;
    let admin = meeting_admin(store, &meeting).await;
    let ids = MemberIds::parse(vec![MEMBER_ID.to_string()]).unwrap();
    participant_service::update(store, &admin, &ids).await.unwrap();

    let access = meeting_member(store, &meeting, MEMBER_ID).await;
    let view = meeting_service::get(store, &access).await.unwrap();

    let participant = view.participant.expect("caller is enrolled");
    assert_eq!(participant.member_user_id, MEMBER_ID);
    assert_eq!(participant.meeting_id, meeting.id);
}

// --- toggleAccess ---

#[tokio::test]
async fn test_toggle_access_flips_visibility() {
    let db = setup_test_store().await;
    let store = db.store();
    let meeting = create_meeting(store, "Board Sync").await;

    let access = meeting_admin(store, &meeting).await;
    let toggled = meeting_service::toggle_access(store, &access).await.unwrap();
    assert!(toggled.is_public);

    // The grant carries the meeting as it was when resolved, so re-resolve.
    let access = meeting_admin(store, &toggled).await;
    let toggled_back = meeting_service::toggle_access(store, &access).await.unwrap();
    assert!(!toggled_back.is_public);
}

#[tokio::test]
async fn test_toggle_access_requires_meeting_admin() {
    let db = setup_test_store().await;
    let store = db.store();
    let meeting = create_public_meeting(store, "Open Forum").await;

    let result = gate::meeting_admin(store, &caller(MEMBER_ID), ORG, &meeting.slug).await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}
