// ABOUTME: Error type for a whole signature run
// ABOUTME: Wraps the stage errors so the first failure can be reported with its origin

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Row source error: {0}")]
    SourceError(#[from] crate::source::SourceError),

    #[error("Invalid employee data: {0}")]
    RecordError(#[from] crate::records::RecordError),

    #[error("Signature rendering error: {0}")]
    TemplateError(#[from] crate::template::TemplateError),

    #[error("Push error: {0}")]
    PushError(#[from] crate::push::PushError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
