//! # resume-forge – paginated PDF resumes
//!
//! This crate lays structured resume data out on A4 pages in one of four
//! designs and renders the result as PDF. The pipeline stages are:
//!
//! 1. **Model** – resume data, deserializable from JSON ([`model`])
//! 2. **Measure & wrap** – text width and word wrapping ([`fonts`])
//! 3. **Layout** – walk the sections with the design's geometry ([`layout`], [`design`])
//! 4. **Paginate** – per-column cursors and page chrome ([`pagination`])
//! 5. **Render** – emit PDF bytes via printpdf ([`render`])
//!
//! The layout step produces a [`layout_config::DocumentLayout`], a
//! serializable record of every draw call, which is what tests inspect.

pub mod dates;
pub mod design;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod layout_config;
pub mod model;
pub mod pagination;
pub mod pipeline;
pub mod render;
pub mod templates;

// Re-exports for convenience
pub use design::DesignVariant;
pub use error::{ResumeError, Result};
pub use model::ResumeData;
pub use pipeline::{generate_pdf, generate_resume_pdf, PipelineConfig, ResumePdf};
