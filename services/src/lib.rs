//! Review workflow for community-submitted faculty and event changes.
//!
//! Users propose additions and updates; each proposal stores a field-level
//! diff and counts against a per-user daily quota. Administrators approve or
//! reject pending proposals, which applies or discards the diff and notifies
//! the submitter.

pub mod diff;
pub mod domain;
pub mod error;
pub mod event;
pub mod faculty;
pub mod quota;
pub mod review;

pub use domain::{Proposal, ProposalKind, ReviewDomain};
pub use error::ReviewError;
pub use event::{EventDomain, EventPayload};
pub use faculty::{FacultyDomain, FacultyPayload};
pub use review::ReviewService;
