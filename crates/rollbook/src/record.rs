//! Core record types for rollbook.
//!
//! This module defines the student record itself plus the small enums that
//! describe how records are reordered and edited.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::validate;

/// Key used when reordering the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Roll number, ascending.
    RollNumber,
    /// Name, ascending, case-insensitive.
    Name,
    /// Age, ascending.
    Age,
    /// CGPA, descending (highest first).
    CgpaDescending,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RollNumber => write!(f, "roll number"),
            Self::Name => write!(f, "name"),
            Self::Age => write!(f, "age"),
            Self::CgpaDescending => write!(f, "CGPA"),
        }
    }
}

impl SortKey {
    /// Stably reorder `students` in place by this key.
    ///
    /// All four orderings are stable, so records that compare equal keep
    /// their prior relative order.
    pub fn apply(self, students: &mut [Student]) {
        match self {
            Self::RollNumber => students.sort_by_key(|s| s.roll_number),
            Self::Name => students.sort_by_key(|s| s.name.to_lowercase()),
            Self::Age => students.sort_by_key(|s| s.age),
            Self::CgpaDescending => students.sort_by(|a, b| b.cgpa.total_cmp(&a.cgpa)),
        }
    }
}

/// A single student record.
///
/// Field order matters: serde serializes fields in declaration order, and
/// the CSV export header mirrors it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Positive identifier, unique within the collection at insertion time.
    pub roll_number: u32,

    /// Student name, letters and spaces only.
    pub name: String,

    /// Age in years.
    pub age: u32,

    /// Cumulative grade point average on a 0.0-4.0 scale.
    pub cgpa: f64,
}

impl Student {
    /// Create a new record from raw field values.
    ///
    /// The constructor does not validate; call [`Student::validate`] (the
    /// store's add path does) before trusting the record.
    #[must_use]
    pub fn new(roll_number: u32, name: impl Into<String>, age: u32, cgpa: f64) -> Self {
        Self {
            roll_number,
            name: name.into(),
            age,
            cgpa,
        }
    }

    /// Check every field against its rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] naming the first field that fails.
    pub fn validate(&self) -> Result<()> {
        if !validate::validate_roll_number(self.roll_number) {
            return Err(Error::invalid_field("roll number", "must be positive"));
        }
        if !validate::validate_name(&self.name) {
            return Err(Error::invalid_field(
                "name",
                "only letters and spaces are allowed",
            ));
        }
        if !validate::validate_age(self.age) {
            return Err(Error::invalid_field(
                "age",
                format!(
                    "must be between {} and {}",
                    validate::MIN_AGE,
                    validate::MAX_AGE
                ),
            ));
        }
        if !validate::validate_cgpa(self.cgpa) {
            return Err(Error::invalid_field(
                "cgpa",
                format!(
                    "must be between {:.1} and {:.1}",
                    validate::MIN_CGPA,
                    validate::MAX_CGPA
                ),
            ));
        }
        Ok(())
    }

    /// Case-insensitive substring match against the name.
    #[must_use]
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// A single-field edit applied to an existing record.
///
/// The roll number is the record's identity and cannot be updated.
#[derive(Debug, Clone, PartialEq)]
pub enum StudentUpdate {
    /// Replace the name.
    Name(String),
    /// Replace the age.
    Age(u32),
    /// Replace the CGPA.
    Cgpa(f64),
}

impl StudentUpdate {
    /// The name of the field this update touches.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Age(_) => "age",
            Self::Cgpa(_) => "cgpa",
        }
    }
}
