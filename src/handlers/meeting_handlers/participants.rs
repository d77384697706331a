//! Roster procedures under `meeting.participant`.

use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::gate;
use crate::auth::session::require_caller;
use crate::errors::AppError;
use crate::models::MemberIds;
use crate::services::participant as participant_service;
use crate::store::Store;

use super::forms::UpdateParticipantsInput;

/// GET …/participants/roster: `meeting.participant.getRoster`.
pub async fn roster(
    store: web::Data<dyn Store>,
    session: Session,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let caller = require_caller(&session)?;
    let (org_slug, meeting_slug) = path.into_inner();
    let access = gate::meeting_admin(store.get_ref(), &caller, &org_slug, &meeting_slug).await?;
    let entries = participant_service::get_roster(store.get_ref(), &access).await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// GET …/participants: `meeting.participant.list`.
pub async fn list(
    store: web::Data<dyn Store>,
    session: Session,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let caller = require_caller(&session)?;
    let (org_slug, meeting_slug) = path.into_inner();
    let access = gate::meeting_admin(store.get_ref(), &caller, &org_slug, &meeting_slug).await?;
    let participants = participant_service::list(store.get_ref(), &access).await?;
    Ok(HttpResponse::Ok().json(participants))
}

/// POST …/participants: `meeting.participant.update`.
///
/// Ids are validated before any lookup; the toggle batch is all-or-nothing.
pub async fn update(
    store: web::Data<dyn Store>,
    session: Session,
    path: web::Path<(String, String)>,
    body: web::Json<UpdateParticipantsInput>,
) -> Result<HttpResponse, AppError> {
    let caller = require_caller(&session)?;
    let members = MemberIds::parse(body.into_inner().members)?;

    let (org_slug, meeting_slug) = path.into_inner();
    let access = gate::meeting_admin(store.get_ref(), &caller, &org_slug, &meeting_slug).await?;
    let changes = participant_service::update(store.get_ref(), &access, &members).await?;

    log::info!(
        "meeting.participant.update: {} applied {} roster change(s) to {}/{}",
        caller.user_id,
        changes.len(),
        org_slug,
        meeting_slug
    );
    Ok(HttpResponse::Ok().json(changes))
}

/// POST …/participants/register: `meeting.participant.register`.
pub async fn register(
    store: web::Data<dyn Store>,
    session: Session,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let caller = require_caller(&session)?;
    let (org_slug, meeting_slug) = path.into_inner();
    let access = gate::meeting_member(store.get_ref(), &caller, &org_slug, &meeting_slug).await?;
    let participant = participant_service::register(store.get_ref(), &access).await?;

    log::info!(
        "meeting.participant.register: {} joined {}/{}",
        caller.user_id,
        org_slug,
        meeting_slug
    );
    Ok(HttpResponse::Created().json(participant))
}
