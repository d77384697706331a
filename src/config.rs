use actix_web::cookie::Key;
use std::env;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
/// `Key::from` panics below this many bytes.
const MIN_SESSION_KEY_LEN: usize = 64;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// `None` runs the service on the in-memory store.
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub session_key: Option<String>,
    pub seed_file: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        AppConfig {
            database_url: non_empty(env::var("DATABASE_URL").ok()),
            bind_addr: non_empty(env::var("BIND_ADDR").ok())
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            session_key: non_empty(env::var("SESSION_KEY").ok()),
            seed_file: non_empty(env::var("SEED_FILE").ok()),
        }
    }

    /// Cookie signing key. Falls back to a random key, which logs everyone
    /// out on restart.
    pub fn session_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= MIN_SESSION_KEY_LEN => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!(
                    "SESSION_KEY too short ({} bytes, need {MIN_SESSION_KEY_LEN}+), generating random key",
                    val.len()
                );
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
