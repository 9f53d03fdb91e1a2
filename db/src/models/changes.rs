//! Typed field-level change sets stored in the `changes` column of the
//! pending-update tables.
//!
//! Each change set has one optional slot per editable field. An absent slot
//! means "unchanged"; absent slots are skipped when serialising, so the stored
//! JSON only names the fields that actually changed:
//!
//! ```json
//! { "title": { "old": "Old Title", "new": "New Title" } }
//! ```

use chrono::NaiveDate;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use super::event::EventCategory;

/// One field's transition. `old` is `None` for additions, or when the record
/// had no value for an optional field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange<T> {
    pub old: Option<T>,
    pub new: T,
}

impl<T> FieldChange<T> {
    pub fn added(new: T) -> Self {
        Self { old: None, new }
    }

    pub fn replaced(old: Option<T>, new: T) -> Self {
        Self { old, new }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct FacultyChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldChange<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<FieldChange<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cabin: Option<FieldChange<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<FieldChange<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<FieldChange<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<FieldChange<String>>,
}

impl FacultyChanges {
    /// Names of the fields carried by this change set, in declaration order.
    pub fn fields(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_some()),
            ("email", self.email.is_some()),
            ("cabin", self.cabin.is_some()),
            ("department", self.department.is_some()),
            ("designation", self.designation.is_some()),
            ("phone", self.phone.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct EventChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<FieldChange<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<FieldChange<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<FieldChange<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<FieldChange<EventCategory>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<FieldChange<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<FieldChange<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<FieldChange<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_link: Option<FieldChange<String>>,
}

impl EventChanges {
    pub fn fields(&self) -> Vec<&'static str> {
        [
            ("title", self.title.is_some()),
            ("date", self.date.is_some()),
            ("venue", self.venue.is_some()),
            ("category", self.category.is_some()),
            ("contact_email", self.contact_email.is_some()),
            ("description", self.description.is_some()),
            ("organizer", self.organizer.is_some()),
            ("registration_link", self.registration_link.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}
