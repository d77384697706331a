//! Meeting handlers, one per procedure.
//!
//! - `create.rs`, `list.rs`, `read.rs`, `update.rs`: `meeting.*`
//! - `participants.rs`: `meeting.participant.*`
//! - `attendance.rs`: `meeting.attendance.*`
//! - `qr.rs`: HTML QR dialog
//! - `forms.rs`: request bodies

pub mod attendance;
pub mod create;
pub mod forms;
pub mod list;
pub mod participants;
pub mod qr;
pub mod read;
pub mod update;

pub use create::create;
pub use list::list;
pub use read::detail;
pub use update::toggle_access;
