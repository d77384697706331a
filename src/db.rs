use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::errors::AppError;
use crate::models::ids::generate_id;
use crate::models::seed::{SeedPayload, SeedResult};
use crate::models::{Organization, OrganizationMember};
use crate::store::Store;

pub async fn init_pool(database_url: &str) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Import users, organizations and memberships. Rows that already exist are
/// counted as skipped; other failures are collected and do not stop the import.
pub async fn import_seed(store: &dyn Store, payload: &SeedPayload) -> SeedResult {
    let mut result = SeedResult::default();

    for user in &payload.users {
        match store.upsert_user(user).await {
            Ok(()) => result.created += 1,
            Err(e) => result.errors.push(format!("user {}: {e}", user.id)),
        }
    }

    for org in &payload.organizations {
        let organization = Organization {
            id: org.id.clone().unwrap_or_else(generate_id),
            slug: org.slug.clone(),
            name: org.name.clone(),
            created_at: chrono::Utc::now(),
        };
        match store.create_organization(&organization).await {
            Ok(()) => result.created += 1,
            Err(AppError::Conflict(_)) => result.skipped += 1,
            Err(e) => result.errors.push(format!("organization {}: {e}", org.slug)),
        }
    }

    for member in &payload.members {
        let org = match store.find_organization_by_slug(&member.organization).await {
            Ok(Some(org)) => org,
            Ok(None) => {
                result
                    .errors
                    .push(format!("member {}: unknown organization {}", member.user_id, member.organization));
                continue;
            }
            Err(e) => {
                result.errors.push(format!("member {}: {e}", member.user_id));
                continue;
            }
        };
        let row = OrganizationMember {
            organization_id: org.id,
            user_id: member.user_id.clone(),
            role: member.role,
        };
        match store.add_member(&row).await {
            Ok(()) => result.created += 1,
            Err(AppError::Conflict(_)) => result.skipped += 1,
            Err(e) => result.errors.push(format!("member {}: {e}", member.user_id)),
        }
    }

    result
}

/// Seed an empty store from a JSON file. A non-empty store is left alone.
pub async fn seed_from_file(store: &dyn Store, path: &str) -> Result<(), AppError> {
    if !store.is_empty().await? {
        log::info!("Store already has organizations, skipping seed from {path}");
        return Ok(());
    }

    let json = std::fs::read_to_string(path)
        .map_err(|e| AppError::Validation(format!("cannot read seed file {path}: {e}")))?;
    let payload: SeedPayload = serde_json::from_str(&json)
        .map_err(|e| AppError::Validation(format!("bad seed JSON in {path}: {e}")))?;

    let result = import_seed(store, &payload).await;
    for err in &result.errors {
        log::warn!("Seed: {err}");
    }
    log::info!(
        "Seed from {path}: created={}, skipped={}, errors={}",
        result.created,
        result.skipped,
        result.errors.len()
    );
    Ok(())
}
