pub mod attendance;
pub mod event;
pub mod member;

pub use attendance::AttendanceRepository;
pub use event::EventRepository;
pub use member::MemberRepository;
