//! Storage layer for rollbook.
//!
//! The whole collection of student records lives in memory as a `Vec` and is
//! rewritten to a JSON file, together with a timestamped backup snapshot,
//! after every mutation. There is no index and no incremental persistence;
//! linear scans are the query plan.

pub mod stats;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::record::{SortKey, Student, StudentUpdate};
use stats::Statistics;

/// Timestamp format for backup file names; lexicographic order is
/// chronological order.
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Prefix and suffix of every backup snapshot file name.
const BACKUP_PREFIX: &str = "students_backup_";
const BACKUP_SUFFIX: &str = ".json";

/// Storage engine for student records.
///
/// Provides whole-file JSON persistence with:
/// - Record insertion with duplicate roll number rejection
/// - Linear-scan lookup by roll number, name substring, and value ranges
/// - In-place single-field updates and stable sorting
/// - A backup snapshot on every save, with optional retention pruning
#[derive(Debug)]
pub struct RecordStore {
    /// Path to the primary JSON data file.
    path: PathBuf,
    /// Directory receiving one snapshot per save.
    backup_dir: PathBuf,
    /// Snapshots to retain; 0 keeps every snapshot.
    max_backups: usize,
    /// The in-memory collection, in insertion order unless sorted.
    students: Vec<Student>,
}

impl RecordStore {
    /// Open a store backed by the given data file and backup directory.
    ///
    /// Creates the data file's parent directory if needed. A missing data
    /// file yields an empty collection; an unreadable or corrupt one is
    /// reported and also yields an empty collection (the previous backup
    /// snapshots remain on disk, untouched).
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn open(path: impl AsRef<Path>, backup_dir: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let backup_dir = backup_dir.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let students = load_students(&path);
        info!(
            "loaded {} student record(s) from {}",
            students.len(),
            path.display()
        );

        Ok(Self {
            path,
            backup_dir,
            max_backups: 0,
            students,
        })
    }

    /// Set how many backup snapshots to retain (0 keeps all).
    #[must_use]
    pub fn with_max_backups(mut self, max_backups: usize) -> Self {
        self.max_backups = max_backups;
        self
    }

    /// Get the path to the primary data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the backup directory path.
    #[must_use]
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Number of records in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Check whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// The full collection, in its current order.
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Check whether a roll number is already taken.
    #[must_use]
    pub fn contains_roll(&self, roll_number: u32) -> bool {
        self.students
            .iter()
            .any(|s| s.roll_number == roll_number)
    }

    /// Add a validated record to the collection and save.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] if a field fails validation,
    /// [`Error::DuplicateRollNumber`] if the roll number is taken, or a
    /// write error if saving fails (the record stays in memory).
    pub fn add(&mut self, student: Student) -> Result<()> {
        student.validate()?;
        if self.contains_roll(student.roll_number) {
            return Err(Error::DuplicateRollNumber {
                roll_number: student.roll_number,
            });
        }

        debug!("adding student with roll number {}", student.roll_number);
        self.students.push(student);
        self.save()
    }

    /// Find a record by roll number.
    #[must_use]
    pub fn find_by_roll(&self, roll_number: u32) -> Option<&Student> {
        self.students.iter().find(|s| s.roll_number == roll_number)
    }

    /// Find records whose name contains `needle`, case-insensitively.
    #[must_use]
    pub fn find_by_name(&self, needle: &str) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| s.name_contains(needle))
            .collect()
    }

    /// Find records whose age falls in `[min_age, max_age]`.
    #[must_use]
    pub fn find_by_age_range(&self, min_age: u32, max_age: u32) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| s.age >= min_age && s.age <= max_age)
            .collect()
    }

    /// Find records whose CGPA falls in `[min_cgpa, max_cgpa]`.
    #[must_use]
    pub fn find_by_cgpa_range(&self, min_cgpa: f64, max_cgpa: f64) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| s.cgpa >= min_cgpa && s.cgpa <= max_cgpa)
            .collect()
    }

    /// Apply a single-field update to the record with this roll number,
    /// re-validating the new value, then save.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] if the new value fails validation,
    /// [`Error::RecordNotFound`] if no record has this roll number, or a
    /// write error if saving fails.
    pub fn update(&mut self, roll_number: u32, update: StudentUpdate) -> Result<()> {
        validate_update(&update)?;

        let student = self
            .students
            .iter_mut()
            .find(|s| s.roll_number == roll_number)
            .ok_or(Error::RecordNotFound { roll_number })?;

        match update {
            StudentUpdate::Name(name) => student.name = name,
            StudentUpdate::Age(age) => student.age = age,
            StudentUpdate::Cgpa(cgpa) => student.cgpa = cgpa,
        }

        debug!("updated student with roll number {roll_number}");
        self.save()
    }

    /// Remove the record with this roll number, if present, and save.
    ///
    /// Returns `true` if a record was removed, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns a write error if saving fails.
    pub fn delete(&mut self, roll_number: u32) -> Result<bool> {
        let Some(index) = self
            .students
            .iter()
            .position(|s| s.roll_number == roll_number)
        else {
            return Ok(false);
        };

        self.students.remove(index);
        debug!("deleted student with roll number {roll_number}");
        self.save()?;
        Ok(true)
    }

    /// Stably reorder the collection by `key` and save.
    ///
    /// # Errors
    ///
    /// Returns a write error if saving fails.
    pub fn sort(&mut self, key: SortKey) -> Result<()> {
        key.apply(&mut self.students);
        debug!("sorted collection by {key}");
        self.save()
    }

    /// Export the collection as CSV to `path`.
    ///
    /// The header row is the four field names in declaration order, one row
    /// per record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NothingToExport`] for an empty collection (no file
    /// is created), or a CSV/write error if writing fails.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        if self.students.is_empty() {
            return Err(Error::NothingToExport);
        }

        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)?;
        for student in &self.students {
            writer.serialize(student)?;
        }
        writer.flush()?;

        info!(
            "exported {} student record(s) to {}",
            self.students.len(),
            path.display()
        );
        Ok(())
    }

    /// Compute statistics over the collection.
    ///
    /// Returns `None` when the collection is empty.
    #[must_use]
    pub fn stats(&self) -> Option<Statistics> {
        Statistics::compute(&self.students)
    }

    /// Write the full collection to the primary file, then drop an
    /// identical backup snapshot in the backup directory.
    ///
    /// The backup directory is created on first use. When a retention limit
    /// is set, the oldest snapshots beyond it are pruned afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be written or the backup
    /// directory cannot be created.
    pub fn save(&self) -> Result<()> {
        let json = to_pretty_json(&self.students)?;

        fs::write(&self.path, &json).map_err(|source| Error::DataFileWrite {
            path: self.path.clone(),
            source,
        })?;

        if !self.backup_dir.exists() {
            fs::create_dir_all(&self.backup_dir).map_err(|source| Error::DirectoryCreate {
                path: self.backup_dir.clone(),
                source,
            })?;
        }

        let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT);
        let backup_path = self
            .backup_dir
            .join(format!("{BACKUP_PREFIX}{timestamp}{BACKUP_SUFFIX}"));
        fs::write(&backup_path, &json).map_err(|source| Error::DataFileWrite {
            path: backup_path.clone(),
            source,
        })?;

        debug!(
            "saved {} student record(s), snapshot {}",
            self.students.len(),
            backup_path.display()
        );

        if self.max_backups > 0 {
            self.prune_backups()?;
        }
        Ok(())
    }

    /// Delete the oldest backup snapshots beyond the retention limit.
    ///
    /// Snapshot names embed a sortable timestamp, so sorting file names is
    /// sorting by age.
    fn prune_backups(&self) -> Result<()> {
        let mut snapshots: Vec<PathBuf> = fs::read_dir(&self.backup_dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| {
                        name.starts_with(BACKUP_PREFIX) && name.ends_with(BACKUP_SUFFIX)
                    })
            })
            .collect();

        if snapshots.len() <= self.max_backups {
            return Ok(());
        }

        snapshots.sort();
        let excess = snapshots.len() - self.max_backups;
        for path in &snapshots[..excess] {
            fs::remove_file(path)?;
        }
        info!("pruned {excess} old backup snapshot(s)");
        Ok(())
    }
}

/// Read the collection from disk, degrading to an empty collection when the
/// file is missing, unreadable, or corrupt.
fn load_students(path: &Path) -> Vec<Student> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            warn!("failed to read {}: {err}", path.display());
            return Vec::new();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(students) => students,
        Err(err) => {
            warn!("failed to parse {}: {err}", path.display());
            Vec::new()
        }
    }
}

/// Check an update's new value against the field rules.
fn validate_update(update: &StudentUpdate) -> Result<()> {
    use crate::validate;

    let ok = match update {
        StudentUpdate::Name(name) => validate::validate_name(name),
        StudentUpdate::Age(age) => validate::validate_age(*age),
        StudentUpdate::Cgpa(cgpa) => validate::validate_cgpa(*cgpa),
    };
    if ok {
        Ok(())
    } else {
        Err(Error::invalid_field(update.field(), "value out of range"))
    }
}

/// Serialize the collection pretty-printed with 4-space indentation.
fn to_pretty_json(students: &[Student]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    students.serialize(&mut serializer)?;
    Ok(buf)
}
