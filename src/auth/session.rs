use actix_session::Session;
use crate::errors::AppError;

/// Session key written by the identity provider.
pub const USER_ID_KEY: &str = "user_id";

/// The authenticated user behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
}

impl Caller {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into() }
    }
}

pub fn get_user_id(session: &Session) -> Option<String> {
    session.get::<String>(USER_ID_KEY).unwrap_or(None)
}

/// Resolve the caller; returns Err(AppError::Session) when nobody is signed in.
pub fn require_caller(session: &Session) -> Result<Caller, AppError> {
    get_user_id(session)
        .map(Caller::new)
        .ok_or_else(|| AppError::Session("Not authenticated".to_string()))
}
