// ABOUTME: Converts raw spreadsheet rows into validated user records
// ABOUTME: Applies the all-or-nothing batch policy: the first bad row aborts the run

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use super::error::{RecordError, Result};
use super::record::{RawRow, UserRecord, FIELDS};

static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^\d{3}-\d{3}-\d{4}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Normalize every row after the header into a [`UserRecord`].
///
/// `rows` must still include the header. Returns the records in sheet order,
/// or the error for the first row that fails validation.
pub fn normalize(rows: &[RawRow], domain: &str) -> Result<Vec<UserRecord>> {
    let (_header, data) = rows.split_first().ok_or(RecordError::MissingHeader)?;
    let domain = domain.trim().trim_start_matches('@');

    let mut records = Vec::with_capacity(data.len());
    for (index, cells) in data.iter().enumerate() {
        // Sheet rows are 1-based and row 1 is the header
        let row = index + 2;
        records.push(parse_row(row, cells, domain)?);
    }

    debug!("Normalized {} rows for domain {}", records.len(), domain);
    Ok(records)
}

fn parse_row(row: usize, cells: &RawRow, domain: &str) -> Result<UserRecord> {
    if cells.len() > FIELDS.len() {
        return Err(RecordError::TooManyColumns {
            row,
            found: cells.len(),
            expected: FIELDS.len(),
        });
    }

    let cell = |position: usize| -> String {
        cells
            .get(position)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    };

    let email = cell(0);
    let name = cell(1);
    let title = cell(2);
    let phone = cell(3);
    let pronouns = cell(4);

    if !is_domain_address(&email, domain) {
        return Err(RecordError::InvalidEmail {
            row,
            email,
            domain: domain.to_string(),
        });
    }

    if name.is_empty() {
        return Err(RecordError::MissingName { row });
    }

    let phone = if phone.is_empty() {
        None
    } else if phone_regex().is_match(&phone) {
        Some(phone)
    } else {
        return Err(RecordError::InvalidPhone { row, phone });
    };

    Ok(UserRecord::new(email, name, title, phone, pronouns))
}

/// True when `email` is `<local>@<domain>` and the local part is safe to use
/// as a file name inside the output directory
fn is_domain_address(email: &str, domain: &str) -> bool {
    let Some(local) = email
        .strip_suffix(domain)
        .and_then(|rest| rest.strip_suffix('@'))
    else {
        return false;
    };

    !local.is_empty() && !local.starts_with('.') && !local.contains(['/', '\\'])
}
