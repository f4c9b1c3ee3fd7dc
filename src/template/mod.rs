// ABOUTME: Template module for sigsync
// ABOUTME: Provides the Handlebars engine and the renderer that writes one signature per user

pub mod engine;
pub mod error;
pub mod helpers;
pub mod renderer;

pub use engine::TemplateEngine;
pub use error::{Result, TemplateError};
pub use renderer::{RenderedSignature, SignatureRenderer};
