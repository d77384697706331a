//! Meeting creation.

use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::gate;
use crate::auth::session::require_caller;
use crate::errors::AppError;
use crate::models::MeetingName;
use crate::services::meeting as meeting_service;
use crate::store::Store;

use super::forms::CreateMeetingInput;

/// POST /api/orgs/{org}/meetings: `meeting.create`, org admins only.
pub async fn create(
    store: web::Data<dyn Store>,
    session: Session,
    path: web::Path<String>,
    body: web::Json<CreateMeetingInput>,
) -> Result<HttpResponse, AppError> {
    let caller = require_caller(&session)?;
    let name = MeetingName::parse(&body.name)?;

    let org_slug = path.into_inner();
    let access = gate::org_admin(store.get_ref(), &caller, &org_slug).await?;
    let meeting = meeting_service::create(store.get_ref(), &access, &name).await?;

    log::info!(
        "meeting.create: {} created '{}' in {}",
        caller.user_id,
        meeting.slug,
        org_slug
    );
    Ok(HttpResponse::Created().json(meeting))
}
