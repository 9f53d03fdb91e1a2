pub mod event;
pub mod faculty;
pub mod proposal;
pub mod user;
