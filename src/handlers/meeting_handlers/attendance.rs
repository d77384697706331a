use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::gate;
use crate::auth::session::require_caller;
use crate::errors::AppError;
use crate::services::attendance as attendance_service;
use crate::store::Store;

use super::forms::CheckInInput;

/// POST …/attendance: `meeting.attendance.checkIn` by participant code.
pub async fn check_in(
    store: web::Data<dyn Store>,
    session: Session,
    path: web::Path<(String, String)>,
    body: web::Json<CheckInInput>,
) -> Result<HttpResponse, AppError> {
    let caller = require_caller(&session)?;
    let (org_slug, meeting_slug) = path.into_inner();
    let access = gate::meeting_admin(store.get_ref(), &caller, &org_slug, &meeting_slug).await?;
    let participant = attendance_service::check_in(store.get_ref(), &access, &body.code).await?;

    log::info!(
        "meeting.attendance.checkIn: {} checked in to {}/{}",
        participant.member_user_id,
        org_slug,
        meeting_slug
    );
    Ok(HttpResponse::Ok().json(participant))
}

/// GET …/attendance: `meeting.attendance.list`.
pub async fn list(
    store: web::Data<dyn Store>,
    session: Session,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let caller = require_caller(&session)?;
    let (org_slug, meeting_slug) = path.into_inner();
    let access = gate::meeting_admin(store.get_ref(), &caller, &org_slug, &meeting_slug).await?;
    let attendees = attendance_service::list(store.get_ref(), &access).await?;
    Ok(HttpResponse::Ok().json(attendees))
}
