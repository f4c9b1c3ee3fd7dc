// ABOUTME: Handlebars engine configured for HTML signature rendering
// ABOUTME: Compiles the signature template once and renders it against record contexts

use handlebars::Handlebars;
use serde_json::Value as JsonValue;

use super::error::{Result, TemplateError};
use super::helpers;

const SIGNATURE_TEMPLATE: &str = "signature";

#[derive(Clone)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with all built-in helpers
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();

        // Fields the template names but the record lacks render as empty
        handlebars.set_strict_mode(false);
        handlebars.set_dev_mode(false);

        helpers::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Compile and register the signature template, replacing any previous one
    pub fn register_signature(&mut self, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(SIGNATURE_TEMPLATE, template)
            .map_err(|e| TemplateError::SyntaxError(e.to_string()))
    }

    pub fn has_signature(&self) -> bool {
        self.handlebars.has_template(SIGNATURE_TEMPLATE)
    }

    /// Render the registered signature template
    pub fn render_signature(&self, context: &JsonValue) -> Result<String> {
        self.handlebars
            .render(SIGNATURE_TEMPLATE, context)
            .map_err(TemplateError::RenderError)
    }

    /// Render an ad-hoc template string with the given context
    pub fn render_template(&self, template: &str, context: &JsonValue) -> Result<String> {
        self.handlebars
            .render_template(template, context)
            .map_err(TemplateError::RenderError)
    }

    /// Validate template syntax without rendering
    pub fn validate_template(&self, template: &str) -> Result<()> {
        match handlebars::Template::compile(template) {
            Ok(_) => Ok(()),
            Err(e) => Err(TemplateError::SyntaxError(e.to_string())),
        }
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
