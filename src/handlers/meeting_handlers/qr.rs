use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::auth::gate;
use crate::auth::session::require_caller;
use crate::errors::{render, AppError};
use crate::qr::{render_svg, DisplayContext};
use crate::store::Store;
use crate::templates_structs::QrDialogTemplate;

/// Path of the meeting page the dialog links to.
pub fn meeting_page_path(org_slug: &str, meeting_slug: &str) -> String {
    format!("/orgs/{org_slug}/meetings/{meeting_slug}")
}

/// GET /orgs/{org}/meetings/{meeting}/qr: QR dialog fragment for the meeting page.
pub async fn dialog(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    session: Session,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let caller = require_caller(&session)?;
    let (org_slug, meeting_slug) = path.into_inner();
    let access = gate::meeting_member(store.get_ref(), &caller, &org_slug, &meeting_slug).await?;

    let display = DisplayContext::new(
        req.connection_info().host(),
        meeting_page_path(&org_slug, &access.meeting().slug),
    );
    let payload = display.payload();

    render(QrDialogTemplate {
        meeting_name: access.meeting().name.clone(),
        svg: render_svg(&payload)?,
        payload,
    })
}
