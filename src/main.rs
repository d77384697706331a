use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, middleware, web};

use orgmeet::config::AppConfig;
use orgmeet::db;
use orgmeet::handlers;
use orgmeet::store::{MemoryStore, PgStore, Store};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let pool = db::init_pool(url).await.map_err(std::io::Error::other)?;
            db::run_migrations(&pool).await.map_err(std::io::Error::other)?;
            log::info!("Using PostgreSQL store");
            Arc::new(PgStore::new(pool))
        }
        None => {
            log::warn!("No DATABASE_URL set, using in-memory store (data lost on restart)");
            Arc::new(MemoryStore::new())
        }
    };

    if let Some(path) = &config.seed_file {
        if let Err(e) = db::seed_from_file(store.as_ref(), path).await {
            log::error!("Seeding failed: {e}");
        }
    }

    let secret_key = config.session_key();

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::from(store.clone()))
            .configure(handlers::configure)
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound()
                    .json(serde_json::json!({ "error": "Not found" }))
            }))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
