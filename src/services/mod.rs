//! Meeting, roster and attendance operations.
//!
//! Every operation takes the grant produced by its access gate, so the
//! authorization check has already happened by the time one runs.

pub mod attendance;
pub mod meeting;
pub mod participant;
