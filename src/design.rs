//! Design variants and the geometry each one lays a resume out with.
//!
//! All four designs share one section walker ([`crate::layout`]); what
//! differs between them lives in a [`Geometry`] value: column positions,
//! palette, header treatment, separators and pagination thresholds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout_config::{DrawOp, RgbColor, A4_HEIGHT_PT, A4_WIDTH_PT};
use crate::pagination::{PageChrome, Thresholds};

/// The closed set of resume designs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum DesignVariant {
    /// Single column with a centered identity block.
    Classic,
    /// Single column under a coloured header band.
    #[default]
    ModernSidebar,
    /// Dark full-height sidebar beside the main content.
    ModernTwoColumn,
    /// Two-tone beige/cream columns with a photo placeholder.
    ModernMinimal,
}

impl DesignVariant {
    pub const ALL: [DesignVariant; 4] = [
        DesignVariant::Classic,
        DesignVariant::ModernSidebar,
        DesignVariant::ModernTwoColumn,
        DesignVariant::ModernMinimal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DesignVariant::Classic => "classic",
            DesignVariant::ModernSidebar => "modern-sidebar",
            DesignVariant::ModernTwoColumn => "modern-two-column",
            DesignVariant::ModernMinimal => "modern-minimal",
        }
    }

    /// Strict lookup of a selector or one of its short aliases.
    pub fn parse(selector: &str) -> Option<Self> {
        match selector.trim().to_ascii_lowercase().as_str() {
            "classic" => Some(DesignVariant::Classic),
            "modern-sidebar" | "modern" => Some(DesignVariant::ModernSidebar),
            "modern-two-column" | "sidebar" | "two-column" => Some(DesignVariant::ModernTwoColumn),
            "modern-minimal" | "minimal" => Some(DesignVariant::ModernMinimal),
            _ => None,
        }
    }

    /// Lookup that never fails: unknown selectors render with the default
    /// design.
    pub fn from_selector(selector: &str) -> Self {
        Self::parse(selector).unwrap_or_else(|| {
            let fallback = Self::default();
            log::warn!("Unknown design {selector:?}, falling back to {fallback}");
            fallback
        })
    }
}

impl fmt::Display for DesignVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DesignVariant {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_selector(s))
    }
}

impl From<String> for DesignVariant {
    fn from(selector: String) -> Self {
        Self::from_selector(&selector)
    }
}

/// Which column a section is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Main,
    Sidebar,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    /// Left edge of the text area.
    pub x: f32,
    pub width: f32,
}

impl ColumnSpec {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Text colours of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ink {
    pub title: RgbColor,
    pub text: RgbColor,
    pub muted: RgbColor,
    pub rule: RgbColor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarSpec {
    /// Width of the filled sidebar band, from the left page edge.
    pub band_width: f32,
    pub fill: RgbColor,
    pub column: ColumnSpec,
    pub ink: Ink,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoSpec {
    pub radius: f32,
    pub fill: RgbColor,
    pub initials: RgbColor,
}

/// How the name and contact details are presented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderStyle {
    /// Centered over the main column, with a rule beneath.
    Centered,
    /// Inside a full-width coloured band at the top of the first page.
    Band {
        fill: RgbColor,
        text: RgbColor,
        min_height: f32,
    },
    /// At the top of the sidebar column.
    Sidebar {
        photo: Option<PhotoSpec>,
        centered: bool,
    },
}

/// Line drawn under Experience and Education titles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Separator {
    Rule { thickness: f32 },
    /// A dashed look made of small dots.
    Dots { radius: f32, spacing: f32 },
}

/// Font sizes, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typography {
    pub name: f32,
    pub section_title: f32,
    pub headline: f32,
    pub body: f32,
    /// Secondary lines and sidebar text.
    pub meta: f32,
    /// Line advance as a multiple of the font size.
    pub line_height: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            name: 22.0,
            section_title: 12.0,
            headline: 11.0,
            body: 10.0,
            meta: 9.0,
            line_height: 1.4,
        }
    }
}

/// Column assignment of the four content sections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub summary: Slot,
    pub experience: Slot,
    pub education: Slot,
    pub skills: Slot,
}

impl Placement {
    const SINGLE: Placement = Placement {
        summary: Slot::Main,
        experience: Slot::Main,
        education: Slot::Main,
        skills: Slot::Main,
    };

    const SPLIT: Placement = Placement {
        summary: Slot::Main,
        experience: Slot::Main,
        education: Slot::Sidebar,
        skills: Slot::Sidebar,
    };
}

/// Everything that distinguishes one design from another.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub variant: DesignVariant,
    pub page_width: f32,
    pub page_height: f32,
    pub main: ColumnSpec,
    pub main_ink: Ink,
    pub sidebar: Option<SidebarSpec>,
    /// Background of the content area, drawn on every page.
    pub content_fill: Option<RgbColor>,
    /// Accent strip at the top of continuation pages: (height, colour).
    pub continuation_bar: Option<(f32, RgbColor)>,
    pub header: HeaderStyle,
    pub separator: Separator,
    pub typography: Typography,
    pub placement: Placement,
    pub thresholds: Thresholds,
    pub top_margin: f32,
    pub bottom_margin: f32,
    /// Advance from a section title to its first line.
    pub title_gap: f32,
    pub entry_gap: f32,
    pub section_gap: f32,
    /// Indent of bullet text from the column edge.
    pub bullet_indent: f32,
    pub skill_separator: &'static str,
}

const CLASSIC_INK: Ink = Ink {
    title: RgbColor::hex(0x1A1A1A),
    text: RgbColor::hex(0x333333),
    muted: RgbColor::hex(0x666666),
    rule: RgbColor::hex(0x999999),
};

const MODERN_ACCENT: RgbColor = RgbColor::hex(0x2B6CB0);

const MODERN_INK: Ink = Ink {
    title: MODERN_ACCENT,
    text: RgbColor::hex(0x2D3748),
    muted: RgbColor::hex(0x718096),
    rule: RgbColor::hex(0xBEE3F8),
};

const SLATE_INK: Ink = Ink {
    title: RgbColor::hex(0x2D3748),
    text: RgbColor::hex(0x2D3748),
    muted: RgbColor::hex(0x718096),
    rule: RgbColor::hex(0xCBD5E0),
};

const SLATE_SIDEBAR_INK: Ink = Ink {
    title: RgbColor::WHITE,
    text: RgbColor::hex(0xE2E8F0),
    muted: RgbColor::hex(0xA0AEC0),
    rule: RgbColor::hex(0x4A5568),
};

const EARTH_INK: Ink = Ink {
    title: RgbColor::hex(0x5C4B3B),
    text: RgbColor::hex(0x3E3A36),
    muted: RgbColor::hex(0x8A7F73),
    rule: RgbColor::hex(0xC8B8A6),
};

impl Geometry {
    pub fn for_variant(variant: DesignVariant) -> Self {
        let page_width = A4_WIDTH_PT;
        let page_height = A4_HEIGHT_PT;
        let full_width = ColumnSpec {
            x: 50.0,
            width: page_width - 100.0,
        };
        let base = Geometry {
            variant,
            page_width,
            page_height,
            main: full_width,
            main_ink: CLASSIC_INK,
            sidebar: None,
            content_fill: None,
            continuation_bar: None,
            header: HeaderStyle::Centered,
            separator: Separator::Rule { thickness: 0.75 },
            typography: Typography::default(),
            placement: Placement::SINGLE,
            thresholds: Thresholds {
                section_title: 60.0,
                entry_header: 50.0,
                bullet_block: 30.0,
            },
            top_margin: 50.0,
            bottom_margin: 50.0,
            title_gap: 14.0,
            entry_gap: 10.0,
            section_gap: 14.0,
            bullet_indent: 12.0,
            skill_separator: "  \u{2022}  ",
        };

        match variant {
            DesignVariant::Classic => base,
            DesignVariant::ModernSidebar => Geometry {
                main_ink: MODERN_INK,
                continuation_bar: Some((10.0, MODERN_ACCENT)),
                header: HeaderStyle::Band {
                    fill: MODERN_ACCENT,
                    text: RgbColor::WHITE,
                    min_height: 80.0,
                },
                separator: Separator::Rule { thickness: 1.0 },
                typography: Typography {
                    name: 24.0,
                    ..Typography::default()
                },
                thresholds: Thresholds {
                    section_title: 80.0,
                    entry_header: 60.0,
                    bullet_block: 30.0,
                },
                entry_gap: 12.0,
                ..base
            },
            DesignVariant::ModernTwoColumn => {
                let band_width = page_width * 0.33;
                let main_x = band_width + 25.0;
                Geometry {
                    main: ColumnSpec {
                        x: main_x,
                        width: page_width - main_x - 30.0,
                    },
                    main_ink: SLATE_INK,
                    sidebar: Some(SidebarSpec {
                        band_width,
                        fill: RgbColor::hex(0x2D3748),
                        column: ColumnSpec {
                            x: 20.0,
                            width: band_width - 40.0,
                        },
                        ink: SLATE_SIDEBAR_INK,
                    }),
                    header: HeaderStyle::Sidebar {
                        photo: None,
                        centered: false,
                    },
                    placement: Placement::SPLIT,
                    thresholds: Thresholds {
                        section_title: 100.0,
                        entry_header: 80.0,
                        bullet_block: 30.0,
                    },
                    top_margin: 40.0,
                    entry_gap: 14.0,
                    ..base
                }
            }
            DesignVariant::ModernMinimal => {
                let band_width = page_width * 0.35;
                let main_x = band_width + 25.0;
                Geometry {
                    main: ColumnSpec {
                        x: main_x,
                        width: page_width - main_x - 32.0,
                    },
                    main_ink: EARTH_INK,
                    sidebar: Some(SidebarSpec {
                        band_width,
                        fill: RgbColor::hex(0xF3EDE4),
                        column: ColumnSpec {
                            x: 22.0,
                            width: band_width - 44.0,
                        },
                        ink: EARTH_INK,
                    }),
                    content_fill: Some(RgbColor::hex(0xFDFBF7)),
                    header: HeaderStyle::Sidebar {
                        photo: Some(PhotoSpec {
                            radius: 42.0,
                            fill: RgbColor::hex(0xD9CBB8),
                            initials: RgbColor::WHITE,
                        }),
                        centered: true,
                    },
                    separator: Separator::Dots {
                        radius: 0.8,
                        spacing: 4.0,
                    },
                    placement: Placement::SPLIT,
                    thresholds: Thresholds {
                        section_title: 150.0,
                        entry_header: 90.0,
                        bullet_block: 30.0,
                    },
                    top_margin: 40.0,
                    entry_gap: 15.0,
                    ..base
                }
            }
        }
    }

    pub fn column(&self, slot: Slot) -> (ColumnSpec, Ink) {
        match (slot, &self.sidebar) {
            (Slot::Sidebar, Some(sidebar)) => (sidebar.column, sidebar.ink),
            _ => (self.main, self.main_ink),
        }
    }

    /// Decorations re-drawn on each page this design allocates.
    pub fn chrome(&self) -> PageChrome {
        let mut chrome = PageChrome::default();
        if let Some(sidebar) = &self.sidebar {
            chrome.every_page.push(DrawOp::Rect {
                x: 0.0,
                y: 0.0,
                width: sidebar.band_width,
                height: self.page_height,
                fill: sidebar.fill,
            });
        }
        if let Some(fill) = self.content_fill {
            let x = self.sidebar.map(|s| s.band_width).unwrap_or(0.0);
            chrome.every_page.push(DrawOp::Rect {
                x,
                y: 0.0,
                width: self.page_width - x,
                height: self.page_height,
                fill,
            });
        }
        if let Some((height, fill)) = self.continuation_bar {
            chrome.continuation.push(DrawOp::Rect {
                x: 0.0,
                y: self.page_height - height,
                width: self.page_width,
                height,
                fill,
            });
        }
        chrome
    }
}
