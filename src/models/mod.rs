pub mod ids;
pub mod meeting;
pub mod organization;
pub mod participant;
pub mod seed;
pub mod user;

pub use meeting::{Meeting, MeetingName, MeetingView};
pub use organization::{MemberRole, MemberWithUser, Organization, OrganizationMember};
pub use participant::{
    MeetingParticipant, MemberIds, ParticipantKey, ParticipantStatus, ParticipantWithMember,
    RosterAction, RosterChange, RosterEntry, RosterOp,
};
pub use user::User;
