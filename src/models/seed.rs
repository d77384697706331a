use serde::{Deserialize, Serialize};

use super::organization::MemberRole;
use super::user::User;

/// Bootstrap data for an empty store: users, organizations and memberships.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedPayload {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub organizations: Vec<OrganizationSeed>,
    #[serde(default)]
    pub members: Vec<MemberSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationSeed {
    /// Generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub slug: String,
    pub name: String,
}

/// Memberships reference organizations by slug, not id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSeed {
    pub organization: String,
    pub user_id: String,
    #[serde(default)]
    pub role: MemberRole,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedResult {
    pub created: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}
