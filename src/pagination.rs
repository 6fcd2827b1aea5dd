//! Pagination – tracks where the next line goes and allocates pages.
//!
//! Handles:
//! - Per-column vertical cursors that carry their own page index
//! - Low-water marks that push a block to the next page before drawing
//! - Re-drawing per-page chrome (sidebar fills, header bars) on new pages
//!
//! Pagination is greedy: a section is started wherever the cursor is and
//! continues on the next page when it runs out of room.

use crate::layout_config::{DocumentLayout, DrawOp, PageLayout};

/// Minimum room, in points above the bottom margin, required before
/// starting each kind of block. Below that the block starts on the next
/// page instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// A section title plus at least its first line.
    pub section_title: f32,
    /// An entry headline plus its secondary line.
    pub entry_header: f32,
    /// The first line of a bullet.
    pub bullet_block: f32,
}

/// Decorations owned by a design variant rather than by the content.
///
/// Every page is an independent surface, so these are re-issued, before any
/// content, each time a page is allocated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageChrome {
    /// Drawn on every page, the first included.
    pub every_page: Vec<DrawOp>,
    /// Drawn on pages after the first only.
    pub continuation: Vec<DrawOp>,
}

/// Position of the next line in one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    /// Index of the page this column is drawing on.
    pub page: usize,
    /// Baseline of the next line, in points from the bottom of the page.
    pub y: f32,
}

impl Cursor {
    pub fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }
}

/// Mutable state of one render: the pages produced so far and the chrome
/// to stamp on new ones.
pub struct RenderContext {
    layout: DocumentLayout,
    chrome: PageChrome,
    /// Top margin of continuation pages.
    top_margin: f32,
    bottom_margin: f32,
}

impl RenderContext {
    /// Start an A4 document with its first page already allocated.
    pub fn new(title: &str, chrome: PageChrome, top_margin: f32, bottom_margin: f32) -> Self {
        let mut ctx = Self {
            layout: DocumentLayout::a4(title),
            chrome,
            top_margin,
            bottom_margin,
        };
        ctx.allocate_page();
        ctx
    }

    pub fn page_width(&self) -> f32 {
        self.layout.page_width_pt
    }

    pub fn page_height(&self) -> f32 {
        self.layout.page_height_pt
    }

    pub fn bottom_margin(&self) -> f32 {
        self.bottom_margin
    }

    /// Baseline a cursor is reset to on a continuation page.
    pub fn continuation_top(&self) -> f32 {
        self.page_height() - self.top_margin
    }

    /// A cursor on the first page at `y`.
    pub fn first_page_cursor(&self, y: f32) -> Cursor {
        Cursor { page: 0, y }
    }

    /// Make sure `need` points fit between the cursor and the bottom margin,
    /// moving the cursor to the next page when they do not. Returns whether
    /// the cursor moved.
    pub fn ensure_space(&mut self, cursor: &mut Cursor, need: f32) -> bool {
        if cursor.y - need >= self.bottom_margin {
            return false;
        }
        self.next_page(cursor);
        true
    }

    /// Move the cursor to the top of the following page, allocating pages
    /// as needed.
    pub fn next_page(&mut self, cursor: &mut Cursor) {
        cursor.page += 1;
        while self.layout.pages.len() <= cursor.page {
            self.allocate_page();
        }
        cursor.y = self.continuation_top();
    }

    fn allocate_page(&mut self) -> usize {
        let index = self.layout.add_page();
        let page = &mut self.layout.pages[index];
        page.ops.extend(self.chrome.every_page.iter().cloned());
        if index > 0 {
            page.ops.extend(self.chrome.continuation.iter().cloned());
        }
        log::debug!("Allocated page {}", index + 1);
        index
    }

    /// The page the cursor is drawing on.
    pub fn page(&mut self, cursor: &Cursor) -> &mut PageLayout {
        // Cursors are only moved by `next_page`, which allocates first.
        let last = self.layout.pages.len() - 1;
        &mut self.layout.pages[cursor.page.min(last)]
    }

    pub fn page_count(&self) -> usize {
        self.layout.pages.len()
    }

    pub fn finish(self) -> DocumentLayout {
        self.layout
    }
}
