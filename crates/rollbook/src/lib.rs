//! `rollbook` - a terminal record manager for student data
//!
//! This library provides the JSON-backed record store, the validation rules,
//! collection statistics, and the interactive menu session used by the
//! `rollbook` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod store;
pub mod ui;
pub mod validate;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{SortKey, Student, StudentUpdate};
pub use store::stats::Statistics;
pub use store::RecordStore;
