// ABOUTME: Typed employee record produced from one spreadsheet row
// ABOUTME: Holds the fixed signature fields plus the dotted phone derived at construction

use serde::Serialize;

/// Column order of the employee sheet. The header row is expected to match,
/// but only the position of each cell is used.
pub const FIELDS: [&str; 5] = ["email", "name", "title", "phone", "pronouns"];

/// One row of cells as returned by the spreadsheet.
pub type RawRow = Vec<String>;

/// A validated employee. Built only by [`crate::records::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    email: String,
    name: String,
    title: String,
    phone_hyphenated: Option<String>,
    phone_dotted: Option<String>,
    pronouns: String,
}

impl UserRecord {
    /// Assemble a record from already validated values.
    pub(crate) fn new(
        email: String,
        name: String,
        title: String,
        phone_hyphenated: Option<String>,
        pronouns: String,
    ) -> Self {
        let phone_dotted = phone_hyphenated.as_ref().map(|p| p.replace('-', "."));
        Self {
            email,
            name,
            title,
            phone_hyphenated,
            phone_dotted,
            pronouns,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn phone_hyphenated(&self) -> Option<&str> {
        self.phone_hyphenated.as_deref()
    }

    pub fn phone_dotted(&self) -> Option<&str> {
        self.phone_dotted.as_deref()
    }

    pub fn pronouns(&self) -> &str {
        &self.pronouns
    }

    /// Name of the signature file rendered for this record
    pub fn signature_file_name(&self) -> String {
        format!("{}.html", self.email)
    }

    /// Convert to the JSON object handed to the template engine
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
