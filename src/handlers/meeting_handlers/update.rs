use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::gate;
use crate::auth::session::require_caller;
use crate::errors::AppError;
use crate::services::meeting as meeting_service;
use crate::store::Store;

/// POST /api/orgs/{org}/meetings/{meeting}/toggle-access: `meeting.toggleAccess`.
pub async fn toggle_access(
    store: web::Data<dyn Store>,
    session: Session,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let caller = require_caller(&session)?;
    let (org_slug, meeting_slug) = path.into_inner();
    let access = gate::meeting_admin(store.get_ref(), &caller, &org_slug, &meeting_slug).await?;
    let meeting = meeting_service::toggle_access(store.get_ref(), &access).await?;

    log::info!(
        "meeting.toggleAccess: {}/{} is now {}",
        org_slug,
        meeting.slug,
        if meeting.is_public { "public" } else { "private" }
    );
    Ok(HttpResponse::Ok().json(meeting))
}
