//! Request bodies for meeting procedures.

#[derive(Debug, serde::Deserialize)]
pub struct CreateMeetingInput {
    pub name: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct UpdateParticipantsInput {
    pub members: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct CheckInInput {
    pub code: String,
}
