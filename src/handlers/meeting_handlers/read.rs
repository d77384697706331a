use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::gate;
use crate::auth::session::require_caller;
use crate::errors::AppError;
use crate::services::meeting as meeting_service;
use crate::store::Store;

/// GET /api/orgs/{org}/meetings/{meeting}: `meeting.get`.
///
/// `participant` is `null` when the caller views a meeting they are not enrolled in.
pub async fn detail(
    store: web::Data<dyn Store>,
    session: Session,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let caller = require_caller(&session)?;
    let (org_slug, meeting_slug) = path.into_inner();
    let access = gate::meeting_member(store.get_ref(), &caller, &org_slug, &meeting_slug).await?;
    let view = meeting_service::get(store.get_ref(), &access).await?;
    Ok(HttpResponse::Ok().json(view))
}
