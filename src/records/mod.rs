// ABOUTME: Employee record module for sigsync
// ABOUTME: Exports the typed user record and the row normalizer that builds it

pub mod error;
pub mod normalizer;
pub mod record;

pub use error::{RecordError, Result};
pub use normalizer::normalize;
pub use record::{RawRow, UserRecord, FIELDS};
