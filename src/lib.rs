// paper-builder: Assemble an academic paper's sections and export them as LaTeX

pub mod form;
pub mod latex;
pub mod layout;
pub mod schema;

use thiserror::Error;

pub use form::PaperForm;
pub use latex::{
    escape_latex, export, generate, generate_with, DocumentDate, GeneratorOptions, DEFAULT_AUTHOR,
    DEFAULT_OUTPUT,
};
pub use layout::{resolve_layout, resolve_layout_name, Arrangement, StructureMode};
pub use schema::{
    guidance_for, guidance_for_name, template_for, template_for_name, BaseSection, SectionGuidance,
    SectionKey,
};

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to read draft file: {0}")]
    DraftError(String),
    #[error("Unknown section: {0}")]
    SectionError(String),
    #[error("Failed to read section file: {0}")]
    SectionFileError(String),
    #[error("Unknown structure mode: {0}")]
    ModeError(String),
    #[error("Invalid assignment '{0}', expected KEY=VALUE")]
    AssignmentError(String),
    #[error("Invalid date format: {0}")]
    DateError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
