pub mod changes;
pub mod event;
pub mod faculty;
pub mod pending_event_update;
pub mod pending_faculty_update;
pub mod proposal_status;
pub mod user;

pub use event::Entity as Event;
pub use faculty::Entity as Faculty;
pub use pending_event_update::Entity as PendingEventUpdate;
pub use pending_faculty_update::Entity as PendingFacultyUpdate;
pub use user::Entity as User;
