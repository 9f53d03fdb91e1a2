pub mod m202505290001_create_users;
pub mod m202510010001_create_faculty;
pub mod m202510010002_create_events;
pub mod m202510010003_create_pending_faculty_updates;
pub mod m202510010004_create_pending_event_updates;

mod pending_updates;
