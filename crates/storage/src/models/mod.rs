pub mod attendance;
pub mod event;
pub mod member;

pub use attendance::EventAttendance;
pub use event::Event;
pub use member::Member;
