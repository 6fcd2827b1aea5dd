//! Pipeline – ties together layout and rendering into a single function
//! call.

use crate::design::DesignVariant;
use crate::error::Result;
use crate::fonts::{HeuristicMetrics, TextMeasure, AVERAGE_CHAR_WIDTH};
use crate::layout::layout_resume;
use crate::layout_config::DocumentLayout;
use crate::model::ResumeData;
use crate::render::render_pdf;

/// Configuration for the PDF generation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Document title embedded in the PDF metadata. Defaults to
    /// `"<full name> - Resume"`, or `"Resume"` without a name.
    pub title: Option<String>,
    /// Average glyph width as a fraction of the font size (default: 0.6).
    pub char_width_factor: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            title: None,
            char_width_factor: AVERAGE_CHAR_WIDTH,
        }
    }
}

impl PipelineConfig {
    pub fn title_for(&self, data: &ResumeData) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        match data.personal_info.name() {
            Some(name) => format!("{name} - Resume"),
            None => "Resume".to_string(),
        }
    }
}

/// A rendered resume: PDF bytes plus the layout they were drawn from.
#[derive(Debug, Clone)]
pub struct ResumePdf {
    pub bytes: Vec<u8>,
    pub layout: DocumentLayout,
}

impl ResumePdf {
    pub const MIME_TYPE: &'static str = "application/pdf";

    pub fn mime_type(&self) -> &'static str {
        Self::MIME_TYPE
    }

    pub fn page_count(&self) -> usize {
        self.layout.page_count()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Full pipeline with a design selector string. Unknown selectors fall back
/// to the default design instead of failing.
pub fn generate_resume_pdf(data: &ResumeData, design: &str) -> Result<ResumePdf> {
    generate_pdf(
        data,
        DesignVariant::from_selector(design),
        &PipelineConfig::default(),
    )
}

/// Full pipeline: resume data → PDF bytes, measuring text heuristically.
pub fn generate_pdf(
    data: &ResumeData,
    design: DesignVariant,
    config: &PipelineConfig,
) -> Result<ResumePdf> {
    let metrics = HeuristicMetrics::new(config.char_width_factor);
    generate_pdf_with_metrics(data, design, config, &metrics)
}

/// Full pipeline with caller-supplied text measurement.
pub fn generate_pdf_with_metrics(
    data: &ResumeData,
    design: DesignVariant,
    config: &PipelineConfig,
    measure: &dyn TextMeasure,
) -> Result<ResumePdf> {
    let layout = layout_resume(data, design, &config.title_for(data), measure);
    let bytes = render_pdf(&layout)?;
    log::info!(
        "Rendered {} resume: {} page(s), {} bytes",
        design,
        layout.page_count(),
        bytes.len()
    );
    Ok(ResumePdf { bytes, layout })
}

/// Generate only the layout (no PDF rendering) – useful for testing.
pub fn compute_layout(
    data: &ResumeData,
    design: DesignVariant,
    config: &PipelineConfig,
) -> DocumentLayout {
    let metrics = HeuristicMetrics::new(config.char_width_factor);
    layout_resume(data, design, &config.title_for(data), &metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PersonalInfo;

    #[test]
    fn pipeline_basic() {
        let data = ResumeData {
            personal_info: PersonalInfo {
                full_name: "Jane Doe".into(),
                ..Default::default()
            },
            summary: "Engineer.".into(),
            ..Default::default()
        };
        let pdf = generate_pdf(&data, DesignVariant::Classic, &PipelineConfig::default()).unwrap();
        assert_eq!(&pdf.bytes[0..5], b"%PDF-");
        assert_eq!(pdf.mime_type(), "application/pdf");
        assert_eq!(pdf.layout.title, "Jane Doe - Resume");
        assert_eq!(pdf.page_count(), 1);
    }

    #[test]
    fn explicit_title_wins() {
        let config = PipelineConfig {
            title: Some("CV".into()),
            ..PipelineConfig::default()
        };
        assert_eq!(config.title_for(&ResumeData::default()), "CV");
        assert_eq!(
            PipelineConfig::default().title_for(&ResumeData::default()),
            "Resume"
        );
    }
}
