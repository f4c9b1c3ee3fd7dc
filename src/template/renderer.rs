// ABOUTME: Signature renderer that turns user records into HTML files
// ABOUTME: Writes one {email}.html per record into the output directory, overwriting old files

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use super::engine::TemplateEngine;
use super::error::{Result, TemplateError};
use crate::records::UserRecord;

/// A rendered signature and the file name it is written under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSignature {
    pub email: String,
    pub file_name: String,
    pub html: String,
}

impl RenderedSignature {
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}

pub struct SignatureRenderer {
    engine: TemplateEngine,
}

impl SignatureRenderer {
    /// Compile a signature template from text
    pub fn from_template(template: &str) -> Result<Self> {
        let mut engine = TemplateEngine::new();
        engine.register_signature(template)?;
        Ok(Self { engine })
    }

    /// Read and compile a signature template from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let template = std::fs::read_to_string(path).map_err(|source| TemplateError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "Loaded signature template {} ({} bytes)",
            path.display(),
            template.len()
        );
        Self::from_template(&template)
    }

    pub fn render(&self, record: &UserRecord) -> Result<RenderedSignature> {
        let context = record.to_json()?;
        let html = self.engine.render_signature(&context)?;

        Ok(RenderedSignature {
            email: record.email().to_string(),
            file_name: record.signature_file_name(),
            html,
        })
    }

    /// Render every record and write it into `output_dir`.
    ///
    /// Stops at the first render or write failure. Files written before the
    /// failure are left in place.
    pub async fn write_all(
        &self,
        records: &[UserRecord],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(records.len());

        for record in records {
            let signature = self.render(record)?;
            let path = signature.path_in(output_dir);

            fs::write(&path, &signature.html)
                .await
                .map_err(|source| TemplateError::WriteError {
                    path: path.clone(),
                    source,
                })?;

            debug!(
                "Wrote signature for {} to {} ({} bytes)",
                signature.email,
                path.display(),
                signature.html.len()
            );
            written.push(path);
        }

        info!(
            "Rendered {} signatures into {}",
            written.len(),
            output_dir.display()
        );
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(email: &str, name: &str) -> UserRecord {
        UserRecord::new(
            email.to_string(),
            name.to_string(),
            "Engineer".to_string(),
            Some("123-456-7890".to_string()),
            "they/them".to_string(),
        )
    }

    #[test]
    fn test_render_name_and_email() {
        let renderer = SignatureRenderer::from_template("{{name}} <{{email}}>").unwrap();
        let signature = renderer.render(&record("jo@example.com", "Jo Lee")).unwrap();

        assert_eq!(signature.html, "Jo Lee <jo@example.com>");
        assert_eq!(signature.file_name, "jo@example.com.html");
        assert_eq!(signature.email, "jo@example.com");
    }

    #[test]
    fn test_render_derived_phone() {
        let renderer =
            SignatureRenderer::from_template("{{phone_hyphenated}} / {{phone_dotted}}").unwrap();
        let signature = renderer.render(&record("jo@example.com", "Jo Lee")).unwrap();

        assert_eq!(signature.html, "123-456-7890 / 123.456.7890");
    }

    #[tokio::test]
    async fn test_write_all_creates_one_file_per_record() {
        let temp_dir = TempDir::new().unwrap();
        let renderer = SignatureRenderer::from_template("<p>{{name}}</p>").unwrap();
        let records = vec![record("a@corp.com", "Ann"), record("b@corp.com", "Bob")];

        let written = renderer.write_all(&records, temp_dir.path()).await.unwrap();

        assert_eq!(written.len(), 2);
        let ann = std::fs::read_to_string(temp_dir.path().join("a@corp.com.html")).unwrap();
        let bob = std::fs::read_to_string(temp_dir.path().join("b@corp.com.html")).unwrap();
        assert_eq!(ann, "<p>Ann</p>");
        assert_eq!(bob, "<p>Bob</p>");
    }

    #[tokio::test]
    async fn test_write_all_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let existing = temp_dir.path().join("a@corp.com.html");
        std::fs::write(&existing, "stale signature that is much longer").unwrap();

        let renderer = SignatureRenderer::from_template("{{name}}").unwrap();
        renderer
            .write_all(&[record("a@corp.com", "Ann")], temp_dir.path())
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(existing).unwrap(), "Ann");
    }

    #[tokio::test]
    async fn test_write_all_fails_without_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        let renderer = SignatureRenderer::from_template("{{name}}").unwrap();

        let result = renderer
            .write_all(&[record("a@corp.com", "Ann")], &missing)
            .await;

        assert!(matches!(result, Err(TemplateError::WriteError { .. })));
    }

    #[test]
    fn test_from_missing_file() {
        let result = SignatureRenderer::from_file(Path::new("/nonexistent/signature.hbs"));
        assert!(matches!(result, Err(TemplateError::ReadError { .. })));
    }
}
