//! Shared test infrastructure for service and gate tests.
//!
//! `setup_test_store()` returns an in-memory store seeded with two
//! organizations:
//! - `acme`: ADMIN_ID (admin), MEMBER_ID, OTHER_MEMBER_ID
//! - `globex`: OUTSIDER_ID (admin)
#![allow(dead_code)]

use std::sync::Arc;

use orgmeet::auth::gate::{self, MeetingAdmin, MeetingMember, OrgAdmin};
use orgmeet::auth::session::Caller;
use orgmeet::db::import_seed;
use orgmeet::models::seed::{MemberSeed, OrganizationSeed, SeedPayload};
use orgmeet::models::{Meeting, MeetingName, MemberRole, User};
use orgmeet::services::meeting as meeting_service;
use orgmeet::store::{MemoryStore, Store};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ORG: &str = "acme";
pub const OTHER_ORG: &str = "globex";

pub const ADMIN_ID: &str = "cadmin000000000000000001";
pub const MEMBER_ID: &str = "cmember00000000000000001";
pub const OTHER_MEMBER_ID: &str = "cmember00000000000000002";
pub const OUTSIDER_ID: &str = "coutsider000000000000001";

// ============================================================================
// STORE SETUP
// ============================================================================

pub struct TestStore {
    store: Arc<MemoryStore>,
}

impl TestStore {
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Handle suitable for `web::Data::from`.
    pub fn shared(&self) -> Arc<dyn Store> {
        self.store.clone()
    }
}

fn user(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        name: Some(name.to_string()),
        email: Some(format!("{}@example.com", name.to_lowercase())),
    }
}

fn member(org: &str, user_id: &str, role: MemberRole) -> MemberSeed {
    MemberSeed {
        organization: org.to_string(),
        user_id: user_id.to_string(),
        role,
    }
}

pub fn seed_payload() -> SeedPayload {
    SeedPayload {
        users: vec![
            user(ADMIN_ID, "Ada"),
            user(MEMBER_ID, "Ben"),
            user(OTHER_MEMBER_ID, "Cleo"),
            user(OUTSIDER_ID, "Olga"),
        ],
        organizations: vec![
            OrganizationSeed { id: None, slug: ORG.to_string(), name: "Acme".to_string() },
            OrganizationSeed { id: None, slug: OTHER_ORG.to_string(), name: "Globex".to_string() },
        ],
        members: vec![
            member(ORG, ADMIN_ID, MemberRole::Admin),
            member(ORG, MEMBER_ID, MemberRole::Member),
            member(ORG, OTHER_MEMBER_ID, MemberRole::Member),
            member(OTHER_ORG, OUTSIDER_ID, MemberRole::Admin),
        ],
    }
}

/// In-memory store with the two seeded organizations.
pub async fn setup_test_store() -> TestStore {
    let store = Arc::new(MemoryStore::new());
    let result = import_seed(store.as_ref(), &seed_payload()).await;
    assert!(result.errors.is_empty(), "seed errors: {:?}", result.errors);
    TestStore { store }
}

// ============================================================================
// HELPERS
// ============================================================================

pub fn caller(user_id: &str) -> Caller {
    Caller::new(user_id)
}

pub async fn org_admin(store: &dyn Store, org: &str, user_id: &str) -> OrgAdmin {
    gate::org_admin(store, &caller(user_id), org)
        .await
        .expect("org admin gate")
}

pub async fn meeting_admin(store: &dyn Store, meeting: &Meeting) -> MeetingAdmin {
    gate::meeting_admin(store, &caller(ADMIN_ID), ORG, &meeting.slug)
        .await
        .expect("meeting admin gate")
}

pub async fn meeting_member(store: &dyn Store, meeting: &Meeting, user_id: &str) -> MeetingMember {
    gate::meeting_member(store, &caller(user_id), ORG, &meeting.slug)
        .await
        .expect("meeting member gate")
}

/// Create a private meeting in `acme` as the admin.
pub async fn create_meeting(store: &dyn Store, name: &str) -> Meeting {
    let access = org_admin(store, ORG, ADMIN_ID).await;
    let name = MeetingName::parse(name).expect("valid meeting name");
    meeting_service::create(store, &access, &name)
        .await
        .expect("create meeting")
}

/// Create a meeting in `acme` and make it public.
pub async fn create_public_meeting(store: &dyn Store, name: &str) -> Meeting {
    let meeting = create_meeting(store, name).await;
    let access = meeting_admin(store, &meeting).await;
    meeting_service::toggle_access(store, &access)
        .await
        .expect("toggle access")
}
