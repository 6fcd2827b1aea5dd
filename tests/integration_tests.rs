//! Integration tests for the resume pipeline.
//!
//! These tests validate:
//! - Word wrapping stays inside its width and is stable under re-wrapping
//! - Nothing is drawn below the bottom margin, on any page
//! - Sidebar backgrounds are repeated on continuation pages, including
//!   pages only the sidebar column flows onto
//! - Date formatting, design fallback and deterministic layout
//! - PDF output exists and has valid format

use resume_forge::design::{DesignVariant, Geometry};
use resume_forge::fonts::{
    estimated_width, split_sentences, wrap_text, FontFace, HeuristicMetrics, TextMeasure,
};
use resume_forge::layout_config::{DocumentLayout, DrawOp};
use resume_forge::model::{Education, Experience, ResumeData};
use resume_forge::pipeline::{compute_layout, generate_pdf, generate_resume_pdf, PipelineConfig};
use resume_forge::templates;
use sha2::{Digest, Sha256};

// =====================================================================
// Helper
// =====================================================================

fn default_config() -> PipelineConfig {
    PipelineConfig::default()
}

fn assert_valid_pdf(bytes: &[u8]) {
    assert!(bytes.len() > 100, "PDF too small: {} bytes", bytes.len());
    assert_eq!(&bytes[0..5], b"%PDF-", "Missing PDF header");
}

/// (text, x, y, size, face) of every text op on every page.
fn text_ops(layout: &DocumentLayout) -> Vec<(usize, String, f32, f32, f32, FontFace)> {
    layout
        .pages
        .iter()
        .flat_map(|page| {
            page.ops.iter().filter_map(move |op| match op {
                DrawOp::Text {
                    text,
                    x,
                    y,
                    size,
                    face,
                    ..
                } => Some((page.page_index, text.clone(), *x, *y, *size, *face)),
                _ => None,
            })
        })
        .collect()
}

fn layout_hash(layout: &DocumentLayout) -> Vec<u8> {
    Sha256::digest(layout.to_json().as_bytes()).to_vec()
}

/// Whether a page carries a full-height fill starting at the left edge, as
/// the sidebar designs draw on every page.
fn has_full_height_sidebar(ops: &[DrawOp], page_height: f32) -> bool {
    ops.iter().any(|op| {
        matches!(op, DrawOp::Rect { x, y, height, .. }
            if *x == 0.0 && *y == 0.0 && (*height - page_height).abs() < 0.01)
    })
}

/// Lowest y an op draws at, or `None` for full-page backgrounds.
fn content_floor(op: &DrawOp, page_height: f32) -> Option<f32> {
    match op {
        DrawOp::Rect { height, .. } if (*height - page_height).abs() < 0.01 => None,
        DrawOp::Rect { y, .. } | DrawOp::Text { y, .. } => Some(*y),
        DrawOp::Line { from, to, .. } => Some(from.1.min(to.1)),
        DrawOp::Circle { center, radius, .. } => Some(center.1 - radius),
    }
}

fn assert_within_bottom_margin(layout: &DocumentLayout, bottom_margin: f32, label: &str) {
    for page in &layout.pages {
        for op in &page.ops {
            if let Some(y) = content_floor(op, layout.page_height_pt) {
                assert!(
                    y >= bottom_margin,
                    "{label}: {op:?} on page {} reaches y={y}, below the margin",
                    page.page_index
                );
            }
        }
    }
}

/// Zero out the trailer `/ID` strings, which printpdf generates afresh for
/// every saved document.
fn mask_document_ids(bytes: &[u8]) -> Vec<u8> {
    let mut out = bytes.to_vec();
    let mut from = 0;
    while let Some(pos) = out[from..].windows(3).position(|w| w == b"/ID") {
        let start = from + pos + 3;
        let end = out[start..]
            .iter()
            .position(|b| *b == b']')
            .map_or(out.len(), |p| start + p);
        out[start..end].fill(b'0');
        from = end;
    }
    out
}

/// Skills and education only: both land in the sidebar of the split designs.
fn sidebar_heavy_resume() -> ResumeData {
    let mut data = templates::many_skills_resume(600);
    data.education = (1..=40)
        .map(|i| Education {
            degree: format!("Certificate {i}"),
            institution: "Open University".into(),
            year: "2012".into(),
            grade: String::new(),
        })
        .collect();
    data
}

// =====================================================================
// Text wrapper properties
// =====================================================================

const PROSE: &str = "Designed and operated a multi-region event ingestion platform \
    handling two billion messages per day while keeping the on-call load low \
    and the cost per message flat year over year. Internationalization \
    supercalifragilisticexpialidocious pneumonoultramicroscopicsilicovolcanoconiosis.";

#[test]
fn rewrapping_wrapped_text_is_stable() {
    let metrics = HeuristicMetrics::default();
    for width in [60.0, 120.0, 250.0, 480.0] {
        let lines = wrap_text(PROSE, width, 10.0, FontFace::Regular, &metrics);
        let again = wrap_text(&lines.join(" "), width, 10.0, FontFace::Regular, &metrics);
        assert_eq!(lines, again, "re-wrap changed lines at width {width}");
    }
}

#[test]
fn wrapped_lines_fit_unless_single_word() {
    let metrics = HeuristicMetrics::default();
    for width in [60.0, 120.0, 250.0] {
        for line in wrap_text(PROSE, width, 10.0, FontFace::Regular, &metrics) {
            let fits = estimated_width(&line, 10.0) <= width;
            let single_word = line.split_whitespace().count() == 1;
            assert!(fits || single_word, "line {line:?} overflows {width}");
        }
    }
}

#[test]
fn wrapping_keeps_every_word_in_order() {
    let metrics = HeuristicMetrics::default();
    let lines = wrap_text(PROSE, 100.0, 10.0, FontFace::Regular, &metrics);
    let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
    let original: Vec<&str> = PROSE.split_whitespace().collect();
    assert_eq!(rejoined, original);
}

// =====================================================================
// Pagination properties
// =====================================================================

#[test]
fn nothing_drawn_below_bottom_margin() {
    let heavy = templates::long_description_resume(120);
    for variant in DesignVariant::ALL {
        let geo = Geometry::for_variant(variant);
        let layout = compute_layout(&heavy, variant, &default_config());
        assert!(layout.page_count() >= 2, "{variant} should paginate");
        assert_within_bottom_margin(&layout, geo.bottom_margin, variant.as_str());
        for (page, text, _, y, _, _) in text_ops(&layout) {
            assert!(
                y <= layout.page_height_pt,
                "{variant}: {text:?} on page {page} is above the page"
            );
        }
    }
}

#[test]
fn oversized_identity_block_paginates() {
    let mut data = templates::sample_resume();
    data.personal_info.full_name = "Verylongname ".repeat(120);
    data.experience[0].position = "Principal ".repeat(80);
    for variant in DesignVariant::ALL {
        let geo = Geometry::for_variant(variant);
        let layout = compute_layout(&data, variant, &default_config());
        assert!(layout.page_count() >= 2, "{variant} should paginate");
        assert_within_bottom_margin(&layout, geo.bottom_margin, variant.as_str());
        let words: usize = layout
            .all_text()
            .iter()
            .map(|t| t.matches("Verylongname").count())
            .sum();
        assert_eq!(words, 120, "{variant} lost part of the name");
    }
}

#[test]
fn sidebar_column_paginates_on_its_own() {
    let data = sidebar_heavy_resume();
    for variant in [DesignVariant::ModernTwoColumn, DesignVariant::ModernMinimal] {
        let geo = Geometry::for_variant(variant);
        let column = geo.sidebar.unwrap().column;
        let layout = compute_layout(&data, variant, &default_config());
        assert!(layout.page_count() >= 3, "{variant} sidebar should span pages");
        assert_within_bottom_margin(&layout, geo.bottom_margin, variant.as_str());

        for page in &layout.pages {
            assert!(
                has_full_height_sidebar(&page.ops, layout.page_height_pt),
                "{variant}: page {} lacks its sidebar",
                page.page_index
            );
            assert!(matches!(page.ops.first(), Some(DrawOp::Rect { .. })));
        }

        let ops = text_ops(&layout);
        let last_page = layout.page_count() - 1;
        assert!(ops
            .iter()
            .any(|(page, _, x, ..)| *page == last_page && *x == column.x));
        // the main column holds nothing but the sidebar still flowed
        assert!(ops.iter().all(|(_, _, x, ..)| *x < geo.main.x));
        let skills: usize = ops
            .iter()
            .map(|(_, text, ..)| text.matches("Skill ").count())
            .sum();
        assert_eq!(skills, 600);
        let certificates = ops
            .iter()
            .filter(|(_, text, ..)| text.starts_with("Certificate "))
            .count();
        assert_eq!(certificates, 40);
    }
}

#[test]
fn sidebar_is_redrawn_on_every_page() {
    let heavy = templates::long_description_resume(150);
    for variant in [DesignVariant::ModernTwoColumn, DesignVariant::ModernMinimal] {
        let layout = compute_layout(&heavy, variant, &default_config());
        assert!(layout.page_count() >= 2);
        for page in &layout.pages {
            assert!(
                has_full_height_sidebar(&page.ops, layout.page_height_pt),
                "{variant}: page {} lacks its sidebar",
                page.page_index
            );
            // chrome is drawn before any text so it stays in the background
            assert!(matches!(page.ops.first(), Some(DrawOp::Rect { .. })));
        }
    }
}

#[test]
fn minimal_redraws_both_backgrounds() {
    let heavy = templates::long_description_resume(150);
    let layout = compute_layout(&heavy, DesignVariant::ModernMinimal, &default_config());
    for page in layout.pages.iter().skip(1) {
        let fills = page
            .ops
            .iter()
            .filter(|op| {
                matches!(op, DrawOp::Rect { y, height, .. }
                    if *y == 0.0 && (*height - layout.page_height_pt).abs() < 0.01)
            })
            .count();
        assert_eq!(fills, 2, "page {} should carry both fills", page.page_index);
    }
}

#[test]
fn modern_continuation_pages_get_a_header_bar() {
    let heavy = templates::long_description_resume(120);
    let layout = compute_layout(&heavy, DesignVariant::ModernSidebar, &default_config());
    assert!(layout.page_count() >= 2);
    for page in layout.pages.iter().skip(1) {
        let bar = page.ops.iter().any(|op| {
            matches!(op, DrawOp::Rect { y, height, .. }
                if (*y + *height - layout.page_height_pt).abs() < 0.01)
        });
        assert!(bar, "page {} lacks the header bar", page.page_index);
    }
}

// =====================================================================
// Concrete scenarios
// =====================================================================

#[test]
fn empty_resume_classic_is_one_page_without_sections() {
    let layout = compute_layout(&ResumeData::default(), DesignVariant::Classic, &default_config());
    assert_eq!(layout.page_count(), 1);
    let text = layout.all_text();
    for title in ["PROFESSIONAL SUMMARY", "EXPERIENCE", "EDUCATION", "SKILLS"] {
        assert!(!text.contains(&title), "unexpected section {title}");
    }
    let pdf = generate_pdf(
        &ResumeData::default(),
        DesignVariant::Classic,
        &default_config(),
    )
    .unwrap();
    assert_valid_pdf(&pdf.bytes);
}

#[test]
fn long_description_spans_pages_without_losing_sentences() {
    // 50 sentences of 10 words: a 500-word paragraph
    let data = templates::long_description_resume(50);
    let expected: Vec<String> = split_sentences(&data.experience[0].description)
        .iter()
        .flat_map(|s| s.split_whitespace().map(String::from).collect::<Vec<_>>())
        .collect();

    for variant in [DesignVariant::Classic, DesignVariant::ModernSidebar] {
        let geo = Geometry::for_variant(variant);
        let layout = compute_layout(&data, variant, &default_config());
        assert!(layout.page_count() >= 2, "{variant} should span two pages");

        let bullet_x = geo.main.x + geo.bullet_indent;
        let ops = text_ops(&layout);
        let words: Vec<String> = ops
            .iter()
            .filter(|(_, _, x, _, _, _)| (*x - bullet_x).abs() < 0.01)
            .flat_map(|(_, text, _, _, _, _)| {
                text.split_whitespace().map(String::from).collect::<Vec<_>>()
            })
            .collect();
        assert_eq!(words, expected, "{variant} lost or duplicated bullet text");

        let bullets = ops.iter().filter(|(_, text, ..)| text == "\u{2022}").count();
        assert_eq!(bullets, 50);
        let pages_with_bullets: std::collections::BTreeSet<usize> = ops
            .iter()
            .filter(|(_, text, ..)| text == "\u{2022}")
            .map(|(page, ..)| *page)
            .collect();
        assert!(pages_with_bullets.len() >= 2);
    }
}

#[test]
fn current_position_ends_with_present() {
    let mut data = templates::sample_resume();
    data.experience[0] = Experience {
        position: "Engineer".into(),
        company: "Acme".into(),
        start_date: "2020-02".into(),
        end_date: "2099-12".into(),
        is_current: true,
        description: String::new(),
    };
    for variant in DesignVariant::ALL {
        let layout = compute_layout(&data, variant, &default_config());
        let text = layout.all_text();
        assert!(
            text.iter().any(|t| *t == "Feb 2020 - Present"),
            "{variant}: missing Present range"
        );
        assert!(!text.iter().any(|t| t.contains("Dec 2099")));
    }
}

#[test]
fn unknown_design_falls_back_to_modern_sidebar() {
    let data = templates::sample_resume();
    let pdf = generate_resume_pdf(&data, "bogus-unknown-value").unwrap();
    assert_valid_pdf(&pdf.bytes);
    let expected = compute_layout(&data, DesignVariant::ModernSidebar, &default_config());
    assert_eq!(pdf.layout, expected);
}

#[test]
fn many_skills_wrap_inside_the_sidebar() {
    let data = templates::many_skills_resume(40);
    let geo = Geometry::for_variant(DesignVariant::ModernTwoColumn);
    let column = geo.sidebar.unwrap().column;
    let metrics = HeuristicMetrics::default();

    let layout = compute_layout(&data, DesignVariant::ModernTwoColumn, &default_config());
    let rows: Vec<_> = text_ops(&layout)
        .into_iter()
        .filter(|(_, text, ..)| text.starts_with("Skill "))
        .collect();
    assert!(rows.len() > 1, "skills should wrap into several rows");

    let mut seen = 0;
    for (_, text, x, _, size, face) in &rows {
        assert_eq!(*x, column.x);
        let right = x + metrics.text_width(text, *size, *face);
        assert!(right <= column.right() + 0.01, "{text:?} crosses the column edge");
        seen += text.matches("Skill ").count();
    }
    assert_eq!(seen, 40);
}

// =====================================================================
// Determinism and output
// =====================================================================

#[test]
fn layout_is_deterministic() {
    // The layout fully determines the drawn content.
    let data = templates::sample_resume();
    for variant in DesignVariant::ALL {
        let first = compute_layout(&data, variant, &default_config());
        let second = compute_layout(&data, variant, &default_config());
        assert_eq!(layout_hash(&first), layout_hash(&second));
    }
}

#[test]
fn pdf_bytes_differ_only_in_document_id() {
    // printpdf writes a fresh trailer /ID pair for each saved document;
    // everything else is reproducible.
    let data = templates::sample_resume();
    for variant in DesignVariant::ALL {
        let first = generate_pdf(&data, variant, &default_config()).unwrap();
        let second = generate_pdf(&data, variant, &default_config()).unwrap();
        assert_eq!(first.bytes.len(), second.bytes.len());
        assert_eq!(
            mask_document_ids(&first.bytes),
            mask_document_ids(&second.bytes),
            "{variant} output varies beyond the document id"
        );
    }
}

#[test]
fn all_designs_render_successfully() {
    let data = templates::sample_resume();
    for variant in DesignVariant::ALL {
        let pdf = generate_pdf(&data, variant, &default_config()).unwrap();
        assert_valid_pdf(&pdf.bytes);
        assert_eq!(pdf.page_count(), 1, "{variant} sample should fit one page");
        assert_eq!(pdf.mime_type(), "application/pdf");
    }
}

#[test]
fn layout_json_roundtrip() {
    let layout = compute_layout(
        &templates::sample_resume(),
        DesignVariant::ModernMinimal,
        &default_config(),
    );
    let parsed = DocumentLayout::from_json(&layout.to_json()).unwrap();
    assert_eq!(parsed, layout);
}

#[test]
fn resume_json_input_renders() {
    let json = r#"{
        "personalInfo": { "fullName": "Jo Park", "email": "jo@example.com" },
        "summary": "Product designer.",
        "experience": [{
            "position": "Designer", "company": "Studio", "startDate": "2019-09",
            "endDate": "garbage", "isCurrent": false, "description": "Drew things. Shipped them!"
        }],
        "skills": ["Figma"]
    }"#;
    let data = ResumeData::from_json(json).unwrap();
    let pdf = generate_pdf(&data, DesignVariant::Classic, &default_config()).unwrap();
    assert_valid_pdf(&pdf.bytes);
    // malformed end dates are shown as written
    assert!(pdf.layout.all_text().contains(&"Sep 2019 - garbage"));
}

#[test]
fn text_stays_inside_main_column() {
    let data = templates::sample_resume();
    let metrics = HeuristicMetrics::default();
    for variant in DesignVariant::ALL {
        let geo = Geometry::for_variant(variant);
        let layout = compute_layout(&data, variant, &default_config());
        for (_, text, x, _, size, face) in text_ops(&layout) {
            if x < geo.main.x - 0.01 {
                continue;
            }
            let right = x + metrics.text_width(&text, size, face);
            assert!(
                right <= geo.main.right() + 0.01,
                "{variant}: {text:?} ends at {right}, past {}",
                geo.main.right()
            );
        }
    }
}
