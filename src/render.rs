//! PDF renderer – takes a [`DocumentLayout`] and produces PDF bytes using
//! `printpdf` (v0.8 ops-based API).

use printpdf::*;

use crate::error::{ResumeError, Result};
use crate::fonts::FontFace;
use crate::layout_config::{DocumentLayout, DrawOp, RgbColor};

/// Points to millimetres.
const PT_TO_MM: f32 = 0.352778;

/// Segments used to approximate a circle outline.
const CIRCLE_SEGMENTS: usize = 32;

/// The two faces a resume is drawn with, resolved once per render.
#[derive(Debug, Clone, Copy)]
pub struct FontSet {
    pub regular: BuiltinFont,
    pub bold: BuiltinFont,
}

impl FontSet {
    /// The standard 14 fonts need no font program in the file, so embedding
    /// amounts to choosing the two faces.
    pub fn embed() -> Self {
        Self {
            regular: BuiltinFont::Helvetica,
            bold: BuiltinFont::HelveticaBold,
        }
    }

    pub fn get(&self, face: FontFace) -> BuiltinFont {
        match face {
            FontFace::Regular => self.regular,
            FontFace::Bold => self.bold,
        }
    }
}

/// Render a DocumentLayout into PDF bytes.
///
/// Fails without producing any bytes when the layout has no pages or a draw
/// op carries a non-finite number.
pub fn render_pdf(layout: &DocumentLayout) -> Result<Vec<u8>> {
    if layout.pages.is_empty() {
        return Err(ResumeError::EmptyDocument);
    }
    validate(layout)?;

    let page_w = Mm(layout.page_width_pt * PT_TO_MM);
    let page_h = Mm(layout.page_height_pt * PT_TO_MM);

    let mut doc = PdfDocument::new(&layout.title);
    let fonts = FontSet::embed();

    let pages: Vec<PdfPage> = layout
        .pages
        .iter()
        .map(|page_layout| {
            let mut ops = Vec::new();
            for op in &page_layout.ops {
                render_op(&mut ops, op, &fonts);
            }
            PdfPage::new(page_w, page_h, ops)
        })
        .collect();

    doc.with_pages(pages);
    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        log::warn!("printpdf reported {} warning(s) while saving", warnings.len());
    }

    Ok(bytes)
}

fn validate(layout: &DocumentLayout) -> Result<()> {
    if !(layout.page_width_pt.is_finite() && layout.page_height_pt.is_finite()) {
        return Err(ResumeError::InvalidGeometry {
            page: 0,
            detail: "page size is not finite".to_string(),
        });
    }
    for page in &layout.pages {
        for op in &page.ops {
            if op.scalars().iter().any(|v| !v.is_finite()) {
                return Err(ResumeError::InvalidGeometry {
                    page: page.page_index,
                    detail: format!("non-finite value in {op:?}"),
                });
            }
        }
    }
    Ok(())
}

fn pdf_color(color: &RgbColor) -> Color {
    Color::Rgb(Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
        icc_profile: None,
    })
}

fn point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

fn fill_polygon(ops: &mut Vec<Op>, points: Vec<LinePoint>, fill: &RgbColor) {
    ops.push(Op::SetFillColor {
        col: pdf_color(fill),
    });
    ops.push(Op::DrawPolygon {
        polygon: Polygon {
            rings: vec![PolygonRing { points }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        },
    });
}

/// Convert one layout op into PDF ops. The layout already uses PDF
/// coordinates (origin bottom-left), so no flipping is needed.
fn render_op(ops: &mut Vec<Op>, op: &DrawOp, fonts: &FontSet) {
    match op {
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => {
            let (x1, y1, x2, y2) = (*x, *y, x + width, y + height);
            fill_polygon(
                ops,
                vec![point(x1, y1), point(x2, y1), point(x2, y2), point(x1, y2)],
                fill,
            );
        }
        DrawOp::Circle {
            center,
            radius,
            fill,
        } => {
            let points = (0..CIRCLE_SEGMENTS)
                .map(|i| {
                    let angle = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
                    point(
                        center.0 + radius * angle.cos(),
                        center.1 + radius * angle.sin(),
                    )
                })
                .collect();
            fill_polygon(ops, points, fill);
        }
        DrawOp::Line {
            from,
            to,
            thickness,
            color,
        } => {
            ops.push(Op::SetOutlineColor {
                col: pdf_color(color),
            });
            ops.push(Op::SetOutlineThickness { pt: Pt(*thickness) });
            ops.push(Op::DrawLine {
                line: Line {
                    points: vec![point(from.0, from.1), point(to.0, to.1)],
                    is_closed: false,
                },
            });
        }
        DrawOp::Text {
            text,
            x,
            y,
            size,
            face,
            color,
        } => {
            let font = fonts.get(*face);
            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor {
                pos: Point { x: Pt(*x), y: Pt(*y) },
            });
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(*size),
                font,
            });
            ops.push(Op::SetFillColor {
                col: pdf_color(color),
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(to_winlatin(text))],
                font,
            });
            ops.push(Op::EndTextSection);
        }
    }
}

/// Convert a UTF-8 string to raw Windows-1252 bytes then wrap in a String so
/// printpdf writes the bytes unchanged into the PDF stream (builtin fonts use
/// WinAnsiEncoding, so each glyph is one byte 0x00–0xFF).
fn to_winlatin(s: &str) -> String {
    let bytes: Vec<u8> = s
        .chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80, // euro
            '\u{2026}' => 0x85, // ellipsis
            '\u{2018}' => 0x91, // left single quote
            '\u{2019}' => 0x92, // right single quote
            '\u{201C}' => 0x93, // left double quote
            '\u{201D}' => 0x94, // right double quote
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en-dash
            '\u{2014}' => 0x97, // em-dash
            '\u{00A0}' => 0x20, // non-breaking space -> space
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect();
    // SAFETY: intentionally non-UTF-8 for 0x80-0x9F range; printpdf passes
    // these bytes straight to the PDF stream, decoded by WinAnsiEncoding.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}
