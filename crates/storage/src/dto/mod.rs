pub mod event;
pub mod member;
pub mod summary;

pub use event::{CreateEventRequest, GrantAttendanceRequest};
pub use member::{CreateMemberRequest, RosterRow};
pub use summary::{CounterDrift, DeleteEventSummary, DeleteMemberSummary, ImportSummary};
