//! Layout config – the intermediate representation between layout
//! computation and PDF rendering. This is the "frozen" structure that encodes
//! exactly what is drawn on each page.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner of
//! the page. Text `y` values are baselines.

use serde::{Deserialize, Serialize};

use crate::fonts::FontFace;

/// A4 width in points (210 mm).
pub const A4_WIDTH_PT: f32 = 595.28;
/// A4 height in points (297 mm).
pub const A4_HEIGHT_PT: f32 = 841.89;

/// An opaque RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RgbColor {
    pub const BLACK: Self = Self::hex(0x000000);
    pub const WHITE: Self = Self::hex(0xFFFFFF);

    /// Build a colour from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as f32 / 255.0,
            g: ((rgb >> 8) & 0xFF) as f32 / 255.0,
            b: (rgb & 0xFF) as f32 / 255.0,
        }
    }
}

/// One drawing call recorded on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        /// Baseline.
        y: f32,
        size: f32,
        face: FontFace,
        color: RgbColor,
    },
    /// Filled rectangle; (`x`, `y`) is the bottom-left corner.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: RgbColor,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        thickness: f32,
        color: RgbColor,
    },
    /// Filled circle.
    Circle {
        center: (f32, f32),
        radius: f32,
        fill: RgbColor,
    },
}

impl DrawOp {
    /// All numbers the op carries, for validation.
    pub fn scalars(&self) -> Vec<f32> {
        match self {
            DrawOp::Text { x, y, size, .. } => vec![*x, *y, *size],
            DrawOp::Rect {
                x, y, width, height, ..
            } => vec![*x, *y, *width, *height],
            DrawOp::Line {
                from, to, thickness, ..
            } => vec![from.0, from.1, to.0, to.1, *thickness],
            DrawOp::Circle { center, radius, .. } => vec![center.0, center.1, *radius],
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// One page of content, in drawing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub page_index: usize,
    pub ops: Vec<DrawOp>,
}

impl PageLayout {
    pub fn new(page_index: usize) -> Self {
        Self {
            page_index,
            ops: Vec::new(),
        }
    }

    pub fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        face: FontFace,
        color: RgbColor,
    ) {
        if text.is_empty() {
            return;
        }
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            size,
            face,
            color,
        });
    }

    pub fn draw_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, fill: RgbColor) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
        });
    }

    pub fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), thickness: f32, color: RgbColor) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            thickness,
            color,
        });
    }

    pub fn draw_circle(&mut self, center: (f32, f32), radius: f32, fill: RgbColor) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            fill,
        });
    }

    /// Text ops on this page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Text { .. }))
    }
}

/// A complete document layout ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLayout {
    /// Document title embedded in the PDF metadata.
    #[serde(default = "DocumentLayout::default_title")]
    pub title: String,
    /// Width of each page in PDF points (1 pt = 1/72 inch).
    pub page_width_pt: f32,
    /// Height of each page in PDF points.
    pub page_height_pt: f32,
    /// Ordered list of pages.
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    /// Create an empty A4 layout.
    pub fn a4(title: &str) -> Self {
        Self {
            title: title.to_string(),
            page_width_pt: A4_WIDTH_PT,
            page_height_pt: A4_HEIGHT_PT,
            pages: Vec::new(),
        }
    }

    fn default_title() -> String {
        "Resume".to_string()
    }

    /// Append a blank page and return its index.
    pub fn add_page(&mut self) -> usize {
        let index = self.pages.len();
        self.pages.push(PageLayout::new(index));
        index
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every text string in the document, page by page.
    pub fn all_text(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|page| page.ops.iter().filter_map(DrawOp::text))
            .collect()
    }

    /// Serialise to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
