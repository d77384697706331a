use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;
use super::ids::is_valid_id;
use super::organization::MemberWithUser;

/// Number of random bytes behind a participant code (two hex chars each).
pub const CODE_BYTES: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParticipantStatus {
    #[default]
    Registered,
    Attended,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Registered => "REGISTERED",
            ParticipantStatus::Attended => "ATTENDED",
        }
    }
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipantStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REGISTERED" => Ok(ParticipantStatus::Registered),
            "ATTENDED" => Ok(ParticipantStatus::Attended),
            other => Err(AppError::Validation(format!("Unknown participant status '{other}'"))),
        }
    }
}

/// Composite key of a participant row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantKey {
    pub meeting_id: String,
    pub member_organization_id: String,
    pub member_user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingParticipant {
    pub meeting_id: String,
    pub member_organization_id: String,
    pub member_user_id: String,
    pub code: String,
    pub status: ParticipantStatus,
    pub created_at: DateTime<Utc>,
}

impl MeetingParticipant {
    /// Fresh `REGISTERED` enrollment with a new random code.
    pub fn register(meeting_id: &str, organization_id: &str, user_id: &str) -> Self {
        Self {
            meeting_id: meeting_id.to_string(),
            member_organization_id: organization_id.to_string(),
            member_user_id: user_id.to_string(),
            code: generate_code(),
            status: ParticipantStatus::Registered,
            created_at: Utc::now(),
        }
    }

    pub fn key(&self) -> ParticipantKey {
        ParticipantKey {
            meeting_id: self.meeting_id.clone(),
            member_organization_id: self.member_organization_id.clone(),
            member_user_id: self.member_user_id.clone(),
        }
    }
}

/// Organization member annotated with its enrollment in one meeting.
#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    #[serde(flatten)]
    pub member: MemberWithUser,
    /// Zero or one record, scoped to the meeting being viewed.
    pub meetings: Vec<MeetingParticipant>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantWithMember {
    #[serde(flatten)]
    pub participant: MeetingParticipant,
    pub member: MemberWithUser,
}

/// One step of a roster reconciliation batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterOp {
    Create(MeetingParticipant),
    Delete(ParticipantKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterAction {
    Created,
    Deleted,
}

/// Outcome of one applied `RosterOp`, carrying the affected record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterChange {
    pub action: RosterAction,
    pub participant: MeetingParticipant,
}

/// User ids submitted for roster reconciliation, all in valid id format.
/// Order and duplicates are preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberIds(Vec<String>);

impl MemberIds {
    pub fn parse(ids: Vec<String>) -> Result<Self, AppError> {
        if let Some(bad) = ids.iter().find(|id| !is_valid_id(id)) {
            return Err(AppError::Validation(format!("Invalid member id '{bad}'")));
        }
        Ok(Self(ids))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Short code for manual entry at check-in. Uniqueness is not enforced.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; CODE_BYTES] = rng.random();
    hex::encode(bytes)
}

/// Trim and lower-case a submitted code, rejecting anything that could not
/// have come from `generate_code`.
pub fn normalize_code(raw: &str) -> Result<String, AppError> {
    let code = raw.trim().to_ascii_lowercase();
    if code.len() != CODE_BYTES * 2 || !code.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AppError::Validation(format!(
            "Participant code must be {} hex characters",
            CODE_BYTES * 2
        )));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_six_lowercase_hex_chars() {
        for _ in 0..64 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn register_starts_registered() {
        let p = MeetingParticipant::register("cmeeting01", "corg00001", "cuser0001");
        assert_eq!(p.status, ParticipantStatus::Registered);
        assert_eq!(p.code.len(), 6);
        assert_eq!(p.key().member_user_id, "cuser0001");
    }

    #[test]
    fn normalize_code_accepts_mixed_case_with_whitespace() {
        assert_eq!(normalize_code("  A1B2C3 ").unwrap(), "a1b2c3");
    }

    #[test]
    fn normalize_code_rejects_bad_input() {
        assert!(normalize_code("").is_err());
        assert!(normalize_code("a1b2c").is_err());
        assert!(normalize_code("a1b2c3d4").is_err());
        assert!(normalize_code("zzzzzz").is_err());
    }

    #[test]
    fn member_ids_reject_any_malformed_entry() {
        let ids = vec!["cabcdefgh1".to_string(), "u1".to_string()];
        assert!(matches!(MemberIds::parse(ids), Err(AppError::Validation(_))));
    }

    #[test]
    fn member_ids_keep_duplicates_in_order() {
        let ids = vec!["cabcdefgh1".to_string(), "cabcdefgh1".to_string()];
        let parsed = MemberIds::parse(ids).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.iter().collect::<Vec<_>>(), vec!["cabcdefgh1", "cabcdefgh1"]);
    }

    #[test]
    fn status_round_trips_through_text() {
        assert_eq!("ATTENDED".parse::<ParticipantStatus>().unwrap(), ParticipantStatus::Attended);
        assert!("GONE".parse::<ParticipantStatus>().is_err());
    }
}
