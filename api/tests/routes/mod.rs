mod events;
mod faculty;
mod me;
