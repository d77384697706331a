use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberRole {
    Admin,
    #[default]
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Admin => "ADMIN",
            MemberRole::Member => "MEMBER",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything other than `ADMIN` is a regular member.
impl FromStr for MemberRole {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ADMIN" => MemberRole::Admin,
            _ => MemberRole::Member,
        })
    }
}

/// Join row between an organization and a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationMember {
    pub organization_id: String,
    pub user_id: String,
    #[serde(default)]
    pub role: MemberRole,
}

impl OrganizationMember {
    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }
}

/// Member with the user profile attached, for roster and participant views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberWithUser {
    pub organization_id: String,
    pub user_id: String,
    pub role: MemberRole,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_admin_and_falls_back_to_member() {
        assert_eq!("ADMIN".parse::<MemberRole>().unwrap(), MemberRole::Admin);
        assert_eq!("MEMBER".parse::<MemberRole>().unwrap(), MemberRole::Member);
        assert_eq!("admin".parse::<MemberRole>().unwrap(), MemberRole::Member);
    }

    #[test]
    fn role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&MemberRole::Admin).unwrap(), "\"ADMIN\"");
    }
}
