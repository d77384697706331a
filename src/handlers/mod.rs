pub mod meeting_handlers;

use actix_web::{middleware::from_fn, web};

use crate::auth::middleware::{require_auth, require_json_content_type};

/// Register every route. Shared by `main` and the HTTP tests.
///
/// `/api/orgs/{org}/meetings/...` carries the JSON procedures; the QR dialog
/// is an HTML fragment outside `/api`. Both require a signed-in caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    use meeting_handlers as mh;

    cfg.service(
        web::scope("/api/orgs/{org}/meetings")
            .wrap(from_fn(require_json_content_type))
            .wrap(from_fn(require_auth))
            .route("", web::get().to(mh::list))
            .route("", web::post().to(mh::create))
            .route("/{meeting}", web::get().to(mh::detail))
            .route("/{meeting}/toggle-access", web::post().to(mh::toggle_access))
            .route("/{meeting}/participants", web::get().to(mh::participants::list))
            .route("/{meeting}/participants", web::post().to(mh::participants::update))
            .route("/{meeting}/participants/roster", web::get().to(mh::participants::roster))
            .route("/{meeting}/participants/register", web::post().to(mh::participants::register))
            .route("/{meeting}/attendance", web::get().to(mh::attendance::list))
            .route("/{meeting}/attendance", web::post().to(mh::attendance::check_in)),
    );
    cfg.service(
        web::scope("/orgs/{org}/meetings")
            .wrap(from_fn(require_auth))
            .route("/{meeting}/qr", web::get().to(mh::qr::dialog)),
    );
}
