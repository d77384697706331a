use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::gate;
use crate::auth::session::require_caller;
use crate::errors::AppError;
use crate::services::meeting as meeting_service;
use crate::store::Store;

/// GET /api/orgs/{org}/meetings: `meeting.list`.
pub async fn list(
    store: web::Data<dyn Store>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let caller = require_caller(&session)?;
    let access = gate::org_member(store.get_ref(), &caller, &path).await?;
    let meetings = meeting_service::list(store.get_ref(), &access).await?;
    Ok(HttpResponse::Ok().json(meetings))
}
