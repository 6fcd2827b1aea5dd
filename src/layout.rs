//! Layout engine – walks a resume section by section and positions every
//! line on the pages of a [`DocumentLayout`].
//!
//! One algorithm serves all designs. The walk order is fixed (identity,
//! summary, experience, education, skills); the [`Geometry`] of the chosen
//! design decides columns, colours, header treatment and pagination
//! thresholds.

use crate::dates::date_range;
use crate::design::{ColumnSpec, DesignVariant, Geometry, HeaderStyle, Ink, Separator, Slot};
use crate::fonts::{pack_rows, split_sentences, wrap_text, FontFace, TextMeasure};
use crate::layout_config::{DocumentLayout, RgbColor};
use crate::model::{non_blank, Education, Experience, ResumeData};
use crate::pagination::{Cursor, RenderContext};

const BULLET: &str = "\u{2022}";
const CONTACT_SEPARATOR: &str = "  |  ";
/// Smallest headline width worth keeping beside a right-aligned date.
const MIN_HEADLINE_SHARE: f32 = 0.4;
/// Space between the last band line and the band's bottom edge.
const BAND_PADDING: f32 = 16.0;

/// An identity line waiting to be placed: text, font size, face.
type HeaderLine = (String, f32, FontFace);

/// Lay out `data` with `design` and return the finished pages.
pub fn layout_resume(
    data: &ResumeData,
    design: DesignVariant,
    title: &str,
    measure: &dyn TextMeasure,
) -> DocumentLayout {
    let geometry = Geometry::for_variant(design);
    let walker = SectionWalker::new(&geometry, measure, title);
    let layout = walker.run(data);
    log::debug!(
        "Laid out {} design on {} page(s)",
        design,
        layout.page_count()
    );
    layout
}

/// A column being filled, with its own cursor.
struct Column {
    slot: Slot,
    spec: ColumnSpec,
    ink: Ink,
    cursor: Cursor,
}

#[derive(Clone, Copy)]
enum Section {
    Summary,
    Experience,
    Education,
    Skills,
}

impl Section {
    const ORDER: [Section; 4] = [
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
    ];

    fn title(self) -> &'static str {
        match self {
            Section::Summary => "Professional Summary",
            Section::Experience => "Experience",
            Section::Education => "Education",
            Section::Skills => "Skills",
        }
    }

    /// Experience and Education titles carry a separator line.
    fn has_separator(self) -> bool {
        matches!(self, Section::Experience | Section::Education)
    }
}

struct SectionWalker<'a> {
    geo: &'a Geometry,
    measure: &'a dyn TextMeasure,
    ctx: RenderContext,
}

impl<'a> SectionWalker<'a> {
    fn new(geo: &'a Geometry, measure: &'a dyn TextMeasure, title: &str) -> Self {
        let ctx = RenderContext::new(title, geo.chrome(), geo.top_margin, geo.bottom_margin);
        Self { geo, measure, ctx }
    }

    fn run(mut self, data: &ResumeData) -> DocumentLayout {
        let (mut main, mut sidebar) = self.header(data);

        for section in Section::ORDER {
            if !section_has_content(section, data) {
                continue;
            }
            let slot = match section {
                Section::Summary => self.geo.placement.summary,
                Section::Experience => self.geo.placement.experience,
                Section::Education => self.geo.placement.education,
                Section::Skills => self.geo.placement.skills,
            };
            let column = match (slot, sidebar.as_mut()) {
                (Slot::Sidebar, Some(side)) => side,
                _ => &mut main,
            };
            self.section(column, section, data);
        }

        self.ctx.finish()
    }

    fn column(&self, slot: Slot, y: f32) -> Column {
        let (spec, ink) = self.geo.column(slot);
        Column {
            slot,
            spec,
            ink,
            cursor: self.ctx.first_page_cursor(y),
        }
    }

    fn line_height(&self, size: f32) -> f32 {
        size * self.geo.typography.line_height
    }

    fn width(&self, text: &str, size: f32, face: FontFace) -> f32 {
        self.measure.text_width(text, size, face)
    }

    /// Body text size of a column: sidebars use the smaller meta size.
    fn body_size(&self, col: &Column) -> f32 {
        match col.slot {
            Slot::Main => self.geo.typography.body,
            Slot::Sidebar => self.geo.typography.meta,
        }
    }

    // -----------------------------------------------------------------------
    // Drawing primitives. Every text draw goes through `line`, which pages
    // before drawing, so nothing lands below the bottom margin.
    // -----------------------------------------------------------------------

    fn line(
        &mut self,
        col: &mut Column,
        text: &str,
        x: f32,
        size: f32,
        face: FontFace,
        color: RgbColor,
    ) {
        let line_height = self.line_height(size);
        self.ctx.ensure_space(&mut col.cursor, line_height);
        self.ctx
            .page(&col.cursor)
            .draw_text(text, x, col.cursor.y, size, face, color);
        col.cursor.advance(line_height);
    }

    /// A line centered on the column.
    fn centered_line(
        &mut self,
        col: &mut Column,
        text: &str,
        size: f32,
        face: FontFace,
        color: RgbColor,
    ) {
        let width = self.width(text, size, face);
        let x = col.spec.x + ((col.spec.width - width) / 2.0).max(0.0);
        self.line(col, text, x, size, face, color);
    }

    fn paragraph(
        &mut self,
        col: &mut Column,
        text: &str,
        size: f32,
        face: FontFace,
        color: RgbColor,
    ) {
        for line in wrap_text(text, col.spec.width, size, face, self.measure) {
            let x = col.spec.x;
            self.line(col, &line, x, size, face, color);
        }
    }

    fn separator(&mut self, col: &Column, y: f32) {
        let (x1, x2) = (col.spec.x, col.spec.right());
        let color = col.ink.rule;
        let page = self.ctx.page(&col.cursor);
        match self.geo.separator {
            Separator::Rule { thickness } => page.draw_line((x1, y), (x2, y), thickness, color),
            Separator::Dots { radius, spacing } => {
                let mut x = x1 + radius;
                while x + radius <= x2 {
                    page.draw_circle((x, y), radius, color);
                    x += spacing;
                }
            }
        }
    }

    fn section_title(&mut self, col: &mut Column, title: &str, with_separator: bool) {
        let size = self.geo.typography.section_title;
        self.ctx
            .ensure_space(&mut col.cursor, self.geo.thresholds.section_title);
        let y = col.cursor.y;
        self.ctx.page(&col.cursor).draw_text(
            &title.to_uppercase(),
            col.spec.x,
            y,
            size,
            FontFace::Bold,
            col.ink.title,
        );
        col.cursor.advance(self.geo.title_gap);
        if with_separator {
            self.separator(col, y - 5.0);
            col.cursor.advance(4.0);
        }
    }

    // -----------------------------------------------------------------------
    // Identity block
    // -----------------------------------------------------------------------

    /// Draw the identity block and return the main and sidebar columns with
    /// their cursors placed under it.
    fn header(&mut self, data: &ResumeData) -> (Column, Option<Column>) {
        let top = self.geo.page_height - self.geo.top_margin;
        let header = self.geo.header;
        match header {
            HeaderStyle::Centered => {
                let mut main = self.column(Slot::Main, top - self.geo.typography.name * 0.8);
                self.centered_header(&mut main, data);
                (main, None)
            }
            HeaderStyle::Band {
                fill,
                text,
                min_height,
            } => {
                let (bottom, overflow) = self.band_header(data, fill, text, min_height);
                let mut main = self.column(Slot::Main, bottom - 30.0);
                for (line, size, face) in overflow {
                    let color = match face {
                        FontFace::Bold => main.ink.title,
                        FontFace::Regular => main.ink.text,
                    };
                    let x = main.spec.x;
                    self.line(&mut main, &line, x, size, face, color);
                }
                (main, None)
            }
            HeaderStyle::Sidebar { .. } => {
                let main = self.column(Slot::Main, top - self.geo.typography.section_title);
                let mut side = self.column(Slot::Sidebar, top);
                self.sidebar_header(&mut side, data);
                (main, Some(side))
            }
        }
    }

    fn centered_header(&mut self, col: &mut Column, data: &ResumeData) {
        let typo = self.geo.typography;
        let ink = col.ink;
        if let Some(name) = data.personal_info.name() {
            for line in wrap_text(name, col.spec.width, typo.name, FontFace::Bold, self.measure) {
                self.centered_line(col, &line, typo.name, FontFace::Bold, ink.title);
            }
        }
        let contacts = data.personal_info.contact_items();
        let rows = pack_rows(
            &contacts,
            CONTACT_SEPARATOR,
            col.spec.width,
            typo.meta,
            FontFace::Regular,
            self.measure,
        );
        for row in rows {
            self.centered_line(col, &row, typo.meta, FontFace::Regular, ink.muted);
        }
        let rule_y = col.cursor.y + typo.meta * 0.4;
        self.ctx.page(&col.cursor).draw_line(
            (col.spec.x, rule_y),
            (col.spec.right(), rule_y),
            1.0,
            ink.rule,
        );
        col.cursor.advance(self.geo.section_gap + typo.section_title * 0.5);
    }

    /// Returns the y of the band's bottom edge and the identity lines that
    /// did not fit in the band. The band never extends below the bottom
    /// margin; leftover lines continue in the main column.
    fn band_header(
        &mut self,
        data: &ResumeData,
        fill: RgbColor,
        text: RgbColor,
        min_height: f32,
    ) -> (f32, Vec<HeaderLine>) {
        let typo = self.geo.typography;
        let spec = self.geo.main;
        let info = &data.personal_info;

        let mut lines: Vec<HeaderLine> = Vec::new();
        if let Some(name) = info.name() {
            for line in wrap_text(name, spec.width, typo.name, FontFace::Bold, self.measure) {
                lines.push((line, typo.name, FontFace::Bold));
            }
        }
        if let Some(headline) = data.headline() {
            let size = typo.headline;
            for line in wrap_text(headline, spec.width, size, FontFace::Regular, self.measure) {
                lines.push((line, size, FontFace::Regular));
            }
        }
        let contacts = info.contact_items();
        for row in pack_rows(
            &contacts,
            CONTACT_SEPARATOR,
            spec.width,
            typo.meta,
            FontFace::Regular,
            self.measure,
        ) {
            lines.push((row, typo.meta, FontFace::Regular));
        }

        let page_height = self.geo.page_height;
        let floor = self.geo.bottom_margin + BAND_PADDING;
        let mut baseline = page_height - 24.0;
        let mut placed = Vec::with_capacity(lines.len());
        let mut overflow = Vec::new();
        for (i, (line, size, face)) in lines.into_iter().enumerate() {
            let next = baseline - if i == 0 { size * 0.8 } else { self.line_height(size) };
            if !overflow.is_empty() || next < floor {
                overflow.push((line, size, face));
                continue;
            }
            baseline = next;
            placed.push((line, baseline, size, face));
        }
        let last_baseline = placed.last().map(|p| p.1).unwrap_or(page_height);
        let height = (page_height - last_baseline + BAND_PADDING).max(min_height);
        if !overflow.is_empty() {
            log::debug!("{} identity line(s) continue below the band", overflow.len());
        }

        let page_width = self.geo.page_width;
        let page = self.ctx.page(&Cursor { page: 0, y: 0.0 });
        page.draw_rectangle(0.0, page_height - height, page_width, height, fill);
        for (line, y, size, face) in placed {
            page.draw_text(&line, spec.x, y, size, face, text);
        }
        (page_height - height, overflow)
    }

    fn sidebar_header(&mut self, col: &mut Column, data: &ResumeData) {
        let HeaderStyle::Sidebar { photo, centered } = self.geo.header else {
            return;
        };
        let typo = self.geo.typography;
        let ink = col.ink;
        let info = &data.personal_info;

        if let Some(photo) = photo {
            let cx = col.spec.x + col.spec.width / 2.0;
            let cy = col.cursor.y - photo.radius;
            let initials = info.initials();
            let initials_size = photo.radius * 0.6;
            let initials_width = self.width(&initials, initials_size, FontFace::Bold);
            let page = self.ctx.page(&col.cursor);
            page.draw_circle((cx, cy), photo.radius, photo.fill);
            page.draw_text(
                &initials,
                cx - initials_width / 2.0,
                cy - initials_size * 0.35,
                initials_size,
                FontFace::Bold,
                photo.initials,
            );
            col.cursor.advance(photo.radius * 2.0 + 14.0);
        }

        let name_size = typo.name * 0.85;
        col.cursor.advance(name_size * 0.8);
        if let Some(name) = info.name() {
            for line in wrap_text(name, col.spec.width, name_size, FontFace::Bold, self.measure) {
                self.identity_line(col, &line, name_size, FontFace::Bold, ink.title, centered);
            }
        }
        if let Some(headline) = data.headline() {
            let width = col.spec.width;
            for line in wrap_text(headline, width, typo.meta, FontFace::Regular, self.measure) {
                self.identity_line(col, &line, typo.meta, FontFace::Regular, ink.muted, centered);
            }
        }
        col.cursor.advance(self.geo.section_gap);

        let contacts = info.contact_items();
        if contacts.is_empty() {
            return;
        }
        self.section_title(col, "Contact", false);
        for item in contacts {
            self.paragraph(col, item, typo.meta, FontFace::Regular, ink.text);
        }
        col.cursor.advance(self.geo.section_gap);
    }

    fn identity_line(
        &mut self,
        col: &mut Column,
        text: &str,
        size: f32,
        face: FontFace,
        color: RgbColor,
        centered: bool,
    ) {
        if centered {
            self.centered_line(col, text, size, face, color);
        } else {
            let x = col.spec.x;
            self.line(col, text, x, size, face, color);
        }
    }

    // -----------------------------------------------------------------------
    // Content sections
    // -----------------------------------------------------------------------

    fn section(&mut self, col: &mut Column, section: Section, data: &ResumeData) {
        self.section_title(col, section.title(), section.has_separator());
        match section {
            Section::Summary => {
                if let Some(summary) = data.summary_text() {
                    let size = self.body_size(col);
                    let color = col.ink.text;
                    self.paragraph(col, summary, size, FontFace::Regular, color);
                }
            }
            Section::Experience => {
                for entry in data.experience.iter().filter(|e| e.has_content()) {
                    self.experience_entry(col, entry);
                }
            }
            Section::Education => {
                for entry in data.education.iter().filter(|e| e.has_content()) {
                    self.education_entry(col, entry);
                }
            }
            Section::Skills => self.skills(col, &data.skill_list()),
        }
        col.cursor.advance(self.geo.section_gap);
    }

    fn experience_entry(&mut self, col: &mut Column, entry: &Experience) {
        self.ctx
            .ensure_space(&mut col.cursor, self.geo.thresholds.entry_header);
        let dates = date_range(&entry.start_date, &entry.end_date, entry.is_current);
        self.entry_heading(col, non_blank(&entry.position), &dates);

        if let Some(company) = non_blank(&entry.company) {
            let color = col.ink.muted;
            self.paragraph(col, company, self.geo.typography.meta, FontFace::Regular, color);
        }
        for sentence in split_sentences(&entry.description) {
            self.bullet(col, &sentence);
        }
        col.cursor.advance(self.geo.entry_gap);
    }

    fn education_entry(&mut self, col: &mut Column, entry: &Education) {
        self.ctx
            .ensure_space(&mut col.cursor, self.geo.thresholds.entry_header);
        self.entry_heading(col, non_blank(&entry.degree), entry.year.trim());

        let details: Vec<&str> = [&entry.institution, &entry.grade]
            .into_iter()
            .filter_map(|field| non_blank(field))
            .collect();
        if !details.is_empty() {
            let color = col.ink.muted;
            let size = self.geo.typography.meta;
            self.paragraph(col, &details.join(" | "), size, FontFace::Regular, color);
        }
        col.cursor.advance(self.geo.entry_gap);
    }

    /// Bold headline with the date range. In the main column the date is
    /// right-aligned on the first headline row; elsewhere it gets a line of
    /// its own.
    fn entry_heading(&mut self, col: &mut Column, headline: Option<&str>, dates: &str) {
        let typo = self.geo.typography;
        let ink = col.ink;
        let size = match col.slot {
            Slot::Main => typo.headline,
            Slot::Sidebar => typo.body,
        };

        let date_width = self.width(dates, typo.meta, FontFace::Regular);
        let headline_width = col.spec.width - date_width - 12.0;
        let inline_date = col.slot == Slot::Main
            && !dates.is_empty()
            && headline.is_some()
            && headline_width >= col.spec.width * MIN_HEADLINE_SHARE;

        if inline_date {
            let lines = wrap_text(
                headline.unwrap_or_default(),
                headline_width,
                size,
                FontFace::Bold,
                self.measure,
            );
            for (i, line) in lines.iter().enumerate() {
                if i == 0 {
                    let line_height = self.line_height(size);
                    self.ctx.ensure_space(&mut col.cursor, line_height);
                    self.ctx.page(&col.cursor).draw_text(
                        dates,
                        col.spec.right() - date_width,
                        col.cursor.y,
                        typo.meta,
                        FontFace::Regular,
                        ink.muted,
                    );
                }
                let x = col.spec.x;
                self.line(col, line, x, size, FontFace::Bold, ink.text);
            }
            return;
        }

        if let Some(headline) = headline {
            self.paragraph(col, headline, size, FontFace::Bold, ink.text);
        }
        if !dates.is_empty() {
            self.paragraph(col, dates, typo.meta, FontFace::Regular, ink.muted);
        }
    }

    fn bullet(&mut self, col: &mut Column, sentence: &str) {
        let size = self.body_size(col);
        let indent = self.geo.bullet_indent;
        let lines = wrap_text(
            sentence,
            col.spec.width - indent,
            size,
            FontFace::Regular,
            self.measure,
        );
        if lines.is_empty() {
            return;
        }
        self.ctx
            .ensure_space(&mut col.cursor, self.geo.thresholds.bullet_block);
        let color = col.ink.text;
        for (i, line) in lines.iter().enumerate() {
            let line_height = self.line_height(size);
            self.ctx.ensure_space(&mut col.cursor, line_height);
            if i == 0 {
                self.ctx.page(&col.cursor).draw_text(
                    BULLET,
                    col.spec.x + 2.0,
                    col.cursor.y,
                    size,
                    FontFace::Regular,
                    col.ink.muted,
                );
            }
            let x = col.spec.x + indent;
            self.line(col, line, x, size, FontFace::Regular, color);
        }
    }

    fn skills(&mut self, col: &mut Column, skills: &[&str]) {
        let size = self.body_size(col);
        let rows = pack_rows(
            skills,
            self.geo.skill_separator,
            col.spec.width,
            size,
            FontFace::Regular,
            self.measure,
        );
        let color = col.ink.text;
        for row in rows {
            let x = col.spec.x;
            self.line(col, &row, x, size, FontFace::Regular, color);
        }
    }
}

fn section_has_content(section: Section, data: &ResumeData) -> bool {
    match section {
        Section::Summary => data.summary_text().is_some(),
        Section::Experience => data.experience.iter().any(Experience::has_content),
        Section::Education => data.education.iter().any(Education::has_content),
        Section::Skills => !data.skill_list().is_empty(),
    }
}
