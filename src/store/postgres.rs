use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use super::Store;
use crate::errors::AppError;
use crate::models::{
    Meeting, MemberRole, MemberWithUser, MeetingParticipant, Organization, OrganizationMember,
    ParticipantKey, ParticipantStatus, RosterAction, RosterChange, RosterOp, User,
};

const MEETING_COLUMNS: &str = "id, name, slug, organization_slug, is_public, created_at";
const PARTICIPANT_COLUMNS: &str =
    "meeting_id, member_organization_id, member_user_id, code, status, created_at";

#[derive(sqlx::FromRow)]
struct MeetingRow {
    id: String,
    name: String,
    slug: String,
    organization_slug: String,
    is_public: bool,
    created_at: DateTime<Utc>,
}

impl From<MeetingRow> for Meeting {
    fn from(row: MeetingRow) -> Self {
        Meeting {
            id: row.id,
            name: row.name,
            slug: row.slug,
            organization_slug: row.organization_slug,
            is_public: row.is_public,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ParticipantRow {
    meeting_id: String,
    member_organization_id: String,
    member_user_id: String,
    code: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ParticipantRow> for MeetingParticipant {
    type Error = AppError;

    fn try_from(row: ParticipantRow) -> Result<Self, Self::Error> {
        Ok(MeetingParticipant {
            meeting_id: row.meeting_id,
            member_organization_id: row.member_organization_id,
            member_user_id: row.member_user_id,
            code: row.code,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

fn to_participants(rows: Vec<ParticipantRow>) -> Result<Vec<MeetingParticipant>, AppError> {
    rows.into_iter().map(MeetingParticipant::try_from).collect()
}

/// `Store` backed by PostgreSQL through a shared `PgPool`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert_participant(
        tx: &mut Transaction<'_, Postgres>,
        p: &MeetingParticipant,
    ) -> Result<MeetingParticipant, AppError> {
        let sql = format!(
            "INSERT INTO meeting_participants \
                 (meeting_id, member_organization_id, member_user_id, code, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {PARTICIPANT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ParticipantRow>(&sql)
            .bind(&p.meeting_id)
            .bind(&p.member_organization_id)
            .bind(&p.member_user_id)
            .bind(&p.code)
            .bind(p.status.as_str())
            .bind(p.created_at)
            .fetch_one(&mut **tx)
            .await?;
        row.try_into()
    }

    async fn delete_participant(
        tx: &mut Transaction<'_, Postgres>,
        key: &ParticipantKey,
    ) -> Result<MeetingParticipant, AppError> {
        let sql = format!(
            "DELETE FROM meeting_participants \
             WHERE meeting_id = $1 AND member_organization_id = $2 AND member_user_id = $3 \
             RETURNING {PARTICIPANT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ParticipantRow>(&sql)
            .bind(&key.meeting_id)
            .bind(&key.member_organization_id)
            .bind(&key.member_user_id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or(AppError::NotFound)?;
        row.try_into()
    }
}

#[async_trait]
impl Store for PgStore {
    async fn is_empty(&self) -> Result<bool, AppError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM organizations")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0 == 0)
    }

    async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO users (id, name, email) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, email = EXCLUDED.email",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn create_organization(&self, org: &Organization) -> Result<(), AppError> {
        sqlx::query("INSERT INTO organizations (id, slug, name, created_at) VALUES ($1, $2, $3, $4)")
            .bind(&org.id)
            .bind(&org.slug)
            .bind(&org.name)
            .bind(org.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn add_member(&self, member: &OrganizationMember) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO organization_members (organization_id, user_id, role) VALUES ($1, $2, $3)",
        )
        .bind(&member.organization_id)
        .bind(&member.user_id)
        .bind(member.role.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_organization_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Organization>, AppError> {
        let row: Option<(String, String, String, DateTime<Utc>)> = sqlx::query_as(
            "SELECT id, slug, name, created_at FROM organizations WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(id, slug, name, created_at)| Organization { id, slug, name, created_at }))
    }

    async fn find_member(
        &self,
        organization_id: &str,
        user_id: &str,
    ) -> Result<Option<OrganizationMember>, AppError> {
        let row: Option<(String, String, String)> = sqlx::query_as(
            "SELECT organization_id, user_id, role FROM organization_members \
             WHERE organization_id = $1 AND user_id = $2",
        )
        .bind(organization_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(organization_id, user_id, role)| OrganizationMember {
            organization_id,
            user_id,
            role: role.parse().unwrap_or_default(),
        }))
    }

    async fn find_members_with_user(
        &self,
        organization_id: &str,
    ) -> Result<Vec<MemberWithUser>, AppError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            organization_id: String,
            user_id: String,
            role: String,
            name: Option<String>,
            email: Option<String>,
        }

        let rows = sqlx::query_as::<_, Row>(
            "SELECT om.organization_id, om.user_id, om.role, u.name, u.email \
             FROM organization_members om \
             JOIN users u ON u.id = om.user_id \
             WHERE om.organization_id = $1 \
             ORDER BY om.user_id",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| MemberWithUser {
                organization_id: row.organization_id,
                role: row.role.parse::<MemberRole>().unwrap_or_default(),
                user: User {
                    id: row.user_id.clone(),
                    name: row.name,
                    email: row.email,
                },
                user_id: row.user_id,
            })
            .collect())
    }

    async fn count_meetings_with_slug(
        &self,
        organization_slug: &str,
        slug: &str,
    ) -> Result<i64, AppError> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM meetings WHERE organization_slug = $1 AND slug = $2",
        )
        .bind(organization_slug)
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
    }

    async fn create_meeting(&self, meeting: &Meeting) -> Result<Meeting, AppError> {
        let sql = format!(
            "INSERT INTO meetings (id, name, slug, organization_slug, is_public, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {MEETING_COLUMNS}"
        );
        let row = sqlx::query_as::<_, MeetingRow>(&sql)
            .bind(&meeting.id)
            .bind(&meeting.name)
            .bind(&meeting.slug)
            .bind(&meeting.organization_slug)
            .bind(meeting.is_public)
            .bind(meeting.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn find_meeting(
        &self,
        organization_slug: &str,
        slug: &str,
    ) -> Result<Option<Meeting>, AppError> {
        let sql = format!(
            "SELECT {MEETING_COLUMNS} FROM meetings WHERE organization_slug = $1 AND slug = $2"
        );
        let row = sqlx::query_as::<_, MeetingRow>(&sql)
            .bind(organization_slug)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Meeting::from))
    }

    async fn find_meetings_by_org(
        &self,
        organization_slug: &str,
    ) -> Result<Vec<Meeting>, AppError> {
        let sql = format!(
            "SELECT {MEETING_COLUMNS} FROM meetings WHERE organization_slug = $1 \
             ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, MeetingRow>(&sql)
            .bind(organization_slug)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Meeting::from).collect())
    }

    async fn find_visible_meetings(
        &self,
        organization_slug: &str,
        user_id: &str,
    ) -> Result<Vec<Meeting>, AppError> {
        let sql = format!(
            "SELECT {MEETING_COLUMNS} FROM meetings m \
             WHERE m.organization_slug = $1 \
               AND (m.is_public OR EXISTS ( \
                   SELECT 1 FROM meeting_participants p \
                   WHERE p.meeting_id = m.id AND p.member_user_id = $2)) \
             ORDER BY m.created_at, m.id"
        );
        let rows = sqlx::query_as::<_, MeetingRow>(&sql)
            .bind(organization_slug)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Meeting::from).collect())
    }

    async fn set_meeting_public(
        &self,
        meeting_id: &str,
        is_public: bool,
    ) -> Result<Meeting, AppError> {
        let sql = format!(
            "UPDATE meetings SET is_public = $2 WHERE id = $1 RETURNING {MEETING_COLUMNS}"
        );
        let row = sqlx::query_as::<_, MeetingRow>(&sql)
            .bind(meeting_id)
            .bind(is_public)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(row.into())
    }

    async fn find_participant(
        &self,
        key: &ParticipantKey,
    ) -> Result<Option<MeetingParticipant>, AppError> {
        let sql = format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM meeting_participants \
             WHERE meeting_id = $1 AND member_organization_id = $2 AND member_user_id = $3"
        );
        let row = sqlx::query_as::<_, ParticipantRow>(&sql)
            .bind(&key.meeting_id)
            .bind(&key.member_organization_id)
            .bind(&key.member_user_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(MeetingParticipant::try_from).transpose()
    }

    async fn find_participants(
        &self,
        meeting_id: &str,
    ) -> Result<Vec<MeetingParticipant>, AppError> {
        let sql = format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM meeting_participants WHERE meeting_id = $1 \
             ORDER BY created_at, member_user_id"
        );
        let rows = sqlx::query_as::<_, ParticipantRow>(&sql)
            .bind(meeting_id)
            .fetch_all(&self.pool)
            .await?;
        to_participants(rows)
    }

    async fn find_participant_by_code(
        &self,
        meeting_id: &str,
        code: &str,
    ) -> Result<Option<MeetingParticipant>, AppError> {
        let sql = format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM meeting_participants \
             WHERE meeting_id = $1 AND code = $2 \
             ORDER BY created_at LIMIT 1"
        );
        let row = sqlx::query_as::<_, ParticipantRow>(&sql)
            .bind(meeting_id)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        row.map(MeetingParticipant::try_from).transpose()
    }

    async fn create_participant(
        &self,
        participant: &MeetingParticipant,
    ) -> Result<MeetingParticipant, AppError> {
        let mut tx = self.pool.begin().await?;
        let created = Self::insert_participant(&mut tx, participant).await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn set_participant_status(
        &self,
        key: &ParticipantKey,
        status: ParticipantStatus,
    ) -> Result<MeetingParticipant, AppError> {
        let sql = format!(
            "UPDATE meeting_participants SET status = $4 \
             WHERE meeting_id = $1 AND member_organization_id = $2 AND member_user_id = $3 \
             RETURNING {PARTICIPANT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ParticipantRow>(&sql)
            .bind(&key.meeting_id)
            .bind(&key.member_organization_id)
            .bind(&key.member_user_id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)?;
        row.try_into()
    }

    async fn apply_roster_batch(&self, ops: &[RosterOp]) -> Result<Vec<RosterChange>, AppError> {
        // Dropping `tx` on an early return rolls the batch back.
        let mut tx = self.pool.begin().await?;
        let mut changes = Vec::with_capacity(ops.len());
        for op in ops {
            let change = match op {
                RosterOp::Create(participant) => RosterChange {
                    action: RosterAction::Created,
                    participant: Self::insert_participant(&mut tx, participant).await?,
                },
                RosterOp::Delete(key) => RosterChange {
                    action: RosterAction::Deleted,
                    participant: Self::delete_participant(&mut tx, key).await?,
                },
            };
            changes.push(change);
        }
        tx.commit().await?;
        Ok(changes)
    }
}
