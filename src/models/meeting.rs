use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use super::participant::MeetingParticipant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub organization_slug: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// A meeting together with the caller's own enrollment, if any.
#[derive(Debug, Clone, Serialize)]
pub struct MeetingView {
    #[serde(flatten)]
    pub meeting: Meeting,
    pub participant: Option<MeetingParticipant>,
}

/// A meeting name that is non-empty and yields a non-empty slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingName {
    name: String,
    slug: String,
}

impl MeetingName {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if raw.trim().is_empty() {
            return Err(AppError::Validation("Meeting name is required".to_string()));
        }
        let slug = slugify(raw);
        if slug.is_empty() {
            return Err(AppError::Validation(
                "Meeting name must contain at least one letter or digit".to_string(),
            ));
        }
        Ok(Self { name: raw.to_string(), slug })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base slug, before any collision suffix.
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

/// Lower-case, drop spaces, then drop everything except ASCII word characters and `-`.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| *c != ' ')
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Append the number of meetings already using `base`, when there are any.
pub fn disambiguate_slug(base: &str, existing: i64) -> String {
    if existing > 0 {
        format!("{base}{existing}")
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_strips_spaces_and_case() {
        assert_eq!(slugify("Team Standup"), "teamstandup");
    }

    #[test]
    fn slugify_keeps_hyphens_and_underscores() {
        assert_eq!(slugify("Q3 Kick-off_2026!"), "q3kick-off_2026");
    }

    #[test]
    fn slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Réunion générale"), "runiongnrale");
    }

    #[test]
    fn collision_suffix_is_existing_count() {
        assert_eq!(disambiguate_slug("teamstandup", 0), "teamstandup");
        assert_eq!(disambiguate_slug("teamstandup", 1), "teamstandup1");
        assert_eq!(disambiguate_slug("teamstandup", 3), "teamstandup3");
    }

    #[test]
    fn name_must_not_be_blank() {
        assert!(matches!(MeetingName::parse(""), Err(AppError::Validation(_))));
        assert!(matches!(MeetingName::parse("   "), Err(AppError::Validation(_))));
    }

    #[test]
    fn name_must_produce_a_slug() {
        assert!(matches!(MeetingName::parse("!!! ???"), Err(AppError::Validation(_))));
    }

    #[test]
    fn parsed_name_keeps_original_text() {
        let name = MeetingName::parse("Team Standup").unwrap();
        assert_eq!(name.name(), "Team Standup");
        assert_eq!(name.slug(), "teamstandup");
    }
}
