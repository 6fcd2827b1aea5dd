//! Font faces, text measurement and word wrapping.
//!
//! The renderer uses the two builtin PDF faces (Helvetica and
//! Helvetica-Bold), which carry no metrics of their own. Layout therefore
//! measures text through the [`TextMeasure`] trait. The default
//! [`HeuristicMetrics`] uses an average character width; [`TtfMetrics`]
//! sums real glyph advances from a metric-compatible TrueType face (for
//! example Liberation Sans) when one is supplied.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Average glyph width as a fraction of the font size. An
/// approximation: wide glyphs (`W`) are underestimated and narrow ones
/// (`i`) overestimated.
pub const AVERAGE_CHAR_WIDTH: f32 = 0.6;

/// The two faces embedded in every rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFace {
    Regular,
    Bold,
}

/// Measures the advance width of a run of text, in points.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_size: f32, face: FontFace) -> f32;
}

/// Width estimate used by the default metrics: `chars × size × 0.6`.
pub fn estimated_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVERAGE_CHAR_WIDTH
}

/// Character-count based measurement. Both faces share one factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicMetrics {
    pub char_width_factor: f32,
}

impl HeuristicMetrics {
    pub fn new(char_width_factor: f32) -> Self {
        Self { char_width_factor }
    }
}

impl Default for HeuristicMetrics {
    fn default() -> Self {
        Self::new(AVERAGE_CHAR_WIDTH)
    }
}

impl TextMeasure for HeuristicMetrics {
    fn text_width(&self, text: &str, font_size: f32, _face: FontFace) -> f32 {
        text.chars().count() as f32 * font_size * self.char_width_factor
    }
}

/// A loaded font face with the metrics measurement needs.
#[derive(Clone)]
struct FontData {
    /// Raw font bytes (kept alive for ttf-parser's zero-copy API).
    bytes: Vec<u8>,
    units_per_em: f32,
}

impl FontData {
    fn load(bytes: Vec<u8>) -> Result<Self> {
        let face = ttf_parser::Face::parse(&bytes, 0)?;
        Ok(Self {
            units_per_em: face.units_per_em() as f32,
            bytes,
        })
    }
}

/// Glyph-advance measurement from TrueType faces.
///
/// Without a bold face, bold text is measured with the regular face.
#[derive(Clone)]
pub struct TtfMetrics {
    regular: FontData,
    bold: Option<FontData>,
}

impl TtfMetrics {
    pub fn from_bytes(regular: Vec<u8>, bold: Option<Vec<u8>>) -> Result<Self> {
        let regular = FontData::load(regular)?;
        let bold = bold.map(FontData::load).transpose()?;
        log::debug!(
            "Loaded metrics font ({} units/em, bold face: {})",
            regular.units_per_em,
            bold.is_some()
        );
        Ok(Self { regular, bold })
    }

    fn data(&self, face: FontFace) -> &FontData {
        match face {
            FontFace::Bold => self.bold.as_ref().unwrap_or(&self.regular),
            FontFace::Regular => &self.regular,
        }
    }
}

impl TextMeasure for TtfMetrics {
    fn text_width(&self, text: &str, font_size: f32, face: FontFace) -> f32 {
        let data = self.data(face);
        let Ok(parsed) = ttf_parser::Face::parse(&data.bytes, 0) else {
            return estimated_width(text, font_size);
        };
        let scale = font_size / data.units_per_em;
        text.chars()
            .map(|ch| match parsed.glyph_index(ch) {
                Some(gid) => parsed.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale,
                // Fallback for missing glyph
                None => font_size * 0.5,
            })
            .sum()
    }
}

/// Word-wrap `text` to fit within `max_width` points.
///
/// Words are separated on whitespace and added greedily while the measured
/// line stays within `max_width`. A single word wider than `max_width` is
/// emitted on its own line, unsplit. Blank input yields no lines.
pub fn wrap_text(
    text: &str,
    max_width: f32,
    font_size: f32,
    face: FontFace,
    measure: &dyn TextMeasure,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line.push_str(word);
            continue;
        }
        let candidate = format!("{current_line} {word}");
        if measure.text_width(&candidate, font_size, face) <= max_width {
            current_line = candidate;
        } else {
            lines.push(std::mem::replace(&mut current_line, word.to_string()));
        }
    }
    if !current_line.is_empty() {
        lines.push(current_line);
    }
    lines
}

/// Split a description into sentences on `.`, `!` and `?`.
///
/// Terminators stay attached to their sentence and runs of them (`...`,
/// `?!`) are kept together. Line breaks also end a sentence, so pasted
/// bullet lists survive. Blank pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\n' || ch == '\r' {
            push_sentence(&mut sentences, &mut current);
            continue;
        }
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            while let Some(&next) = chars.peek() {
                if !matches!(next, '.' | '!' | '?') {
                    break;
                }
                current.push(next);
                chars.next();
            }
            push_sentence(&mut sentences, &mut current);
        }
    }
    push_sentence(&mut sentences, &mut current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let sentence = current.trim();
    if !sentence.is_empty() && !sentence.chars().all(|c| matches!(c, '.' | '!' | '?')) {
        sentences.push(sentence.to_string());
    }
    current.clear();
}

/// Flow whole items into rows joined by `separator`.
///
/// Items are never split between rows; an item that is wider than a row on
/// its own is word-wrapped with [`wrap_text`] and occupies its own rows.
pub fn pack_rows(
    items: &[&str],
    separator: &str,
    max_width: f32,
    font_size: f32,
    face: FontFace,
    measure: &dyn TextMeasure,
) -> Vec<String> {
    let mut rows: Vec<String> = Vec::new();
    let mut current_row = String::new();

    for item in items {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        if measure.text_width(item, font_size, face) > max_width {
            if !current_row.is_empty() {
                rows.push(std::mem::take(&mut current_row));
            }
            rows.extend(wrap_text(item, max_width, font_size, face, measure));
            continue;
        }
        if current_row.is_empty() {
            current_row.push_str(item);
            continue;
        }
        let candidate = format!("{current_row}{separator}{item}");
        if measure.text_width(&candidate, font_size, face) <= max_width {
            current_row = candidate;
        } else {
            rows.push(std::mem::replace(&mut current_row, item.to_string()));
        }
    }
    if !current_row.is_empty() {
        rows.push(current_row);
    }
    rows
}
