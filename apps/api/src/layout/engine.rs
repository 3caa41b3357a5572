//! Fixed-layout render context: cursor tracking, line placement and page breaks.
//!
//! A `FixedLayout` is created per render call and owns all mutable layout state
//! (pages so far, cursor `y`). Nothing here is shared between renders; the only
//! shared inputs are the static font tables.

use serde::Serialize;
use tracing::debug;

use crate::errors::RenderError;
use crate::layout::font_metrics::{get_metrics, FontStyle};
use crate::layout::page::{PageGeometry, LINE_SPACING};
use crate::layout::wrap::{normalize_whitespace, wrap_text};

/// Space consumed above a section header.
const HEADER_GAP_ABOVE: f32 = 4.0;
/// Space consumed below a section header's rule.
const HEADER_GAP_BELOW: f32 = 8.0;
/// Rule sits this far above the cursor after the header line.
const RULE_OFFSET: f32 = 4.0;
const RULE_THICKNESS: f32 = 0.5;
const HEADER_SIZE: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// Options for a single `draw_text` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOptions {
    pub size: f32,
    pub bold: bool,
    pub italics: bool,
    pub indent: f32,
    /// Defaults to the page's usable width.
    pub max_width: Option<f32>,
    pub align: Align,
}

impl TextOptions {
    pub fn new(size: f32) -> Self {
        TextOptions {
            size,
            bold: false,
            italics: false,
            indent: 0.0,
            max_width: None,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italics(mut self) -> Self {
        self.italics = true;
        self
    }

    pub fn indent(mut self, indent: f32) -> Self {
        self.indent = indent;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }
}

/// One positioned drawing instruction. Coordinates are PDF points, origin bottom-left.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// `y` is the text baseline.
    Text {
        x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        text: String,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PagePlan {
    pub ops: Vec<DrawOp>,
}

impl PagePlan {
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Rule { .. } => None,
        })
    }
}

/// The finished layout: page geometry plus one instruction list per page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutPlan {
    pub geometry: PageGeometry,
    pub pages: Vec<PagePlan>,
}

impl LayoutPlan {
    /// All drawn text lines across pages, in drawing order.
    pub fn text_lines(&self) -> Vec<&str> {
        self.pages.iter().flat_map(|p| p.text_lines()).collect()
    }
}

pub struct FixedLayout {
    geometry: PageGeometry,
    pages: Vec<PagePlan>,
    y: f32,
}

impl FixedLayout {
    /// Starts a render with one empty page and the cursor at the top margin.
    pub fn new(geometry: PageGeometry) -> Self {
        FixedLayout {
            geometry,
            pages: vec![PagePlan::default()],
            y: geometry.top_y(),
        }
    }

    #[cfg(test)]
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn new_page(&mut self) {
        self.pages.push(PagePlan::default());
        self.y = self.geometry.top_y();
        debug!(page = self.pages.len(), "page break");
    }

    /// Moves the cursor down without drawing.
    pub fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    fn push(&mut self, op: DrawOp) {
        // `pages` starts non-empty and only grows.
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    /// Word-wraps `text` and places each line, breaking pages as needed.
    ///
    /// Empty text yields no lines, so nothing is drawn and the cursor stays put
    /// (an absent contact line or summary leaves no blank 12pt gap).
    pub fn draw_text(&mut self, text: &str, options: TextOptions) -> Result<(), RenderError> {
        let text = normalize_whitespace(text);
        let style = FontStyle::select(options.bold, options.italics);
        let metrics = get_metrics(style);
        let usable_width = self.geometry.usable_width();
        let max_width = options.max_width.unwrap_or(usable_width);

        for line in wrap_text(&text, metrics, options.size, max_width)? {
            if self.y < self.geometry.margin_bottom + LINE_SPACING {
                self.new_page();
            }
            let x = match options.align {
                Align::Left => self.geometry.margin_left + options.indent,
                Align::Center => self.geometry.margin_left + (usable_width - line.width) / 2.0,
            };
            let y = self.y;
            self.push(DrawOp::Text {
                x,
                y,
                size: options.size,
                style,
                text: line.text,
            });
            self.y -= LINE_SPACING;
        }
        Ok(())
    }

    /// Draws a full-width rule at height `y`.
    pub fn draw_rule(&mut self, y: f32) {
        let x1 = self.geometry.margin_left;
        let x2 = self.geometry.width - self.geometry.margin_right;
        self.push(DrawOp::Rule {
            x1,
            x2,
            y,
            thickness: RULE_THICKNESS,
        });
    }

    /// Bold title with a rule beneath it. Breaks the page first unless there is room
    /// for the header plus a couple of body lines.
    pub fn section_header(&mut self, title: &str) -> Result<(), RenderError> {
        self.y -= HEADER_GAP_ABOVE;
        if self.y < self.geometry.margin_bottom + 3.0 * LINE_SPACING {
            self.new_page();
        }
        self.draw_text(title, TextOptions::new(HEADER_SIZE).bold())?;
        self.draw_rule(self.y + RULE_OFFSET);
        self.y -= HEADER_GAP_BELOW;
        Ok(())
    }

    pub fn finish(self) -> LayoutPlan {
        LayoutPlan {
            geometry: self.geometry,
            pages: self.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_page() -> PageGeometry {
        PageGeometry {
            width: 300.0,
            height: 120.0,
            margin_top: 10.0,
            margin_bottom: 10.0,
            margin_left: 20.0,
            margin_right: 20.0,
        }
    }

    #[test]
    fn test_draw_text_advances_cursor_per_line() {
        let mut layout = FixedLayout::new(PageGeometry::a4());
        let start = layout.y();
        layout.draw_text("One line", TextOptions::new(11.0)).unwrap();
        assert!((start - layout.y() - LINE_SPACING).abs() < 1e-4);
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let mut layout = FixedLayout::new(PageGeometry::a4());
        let start = layout.y();
        layout.draw_text("", TextOptions::new(11.0)).unwrap();
        assert_eq!(layout.y(), start);
        assert!(layout.finish().pages[0].ops.is_empty());
    }

    #[test]
    fn test_left_aligned_line_starts_at_margin_plus_indent() {
        let geometry = PageGeometry::a4();
        let mut layout = FixedLayout::new(geometry);
        layout
            .draw_text("Bullet", TextOptions::new(10.0).indent(15.0))
            .unwrap();
        let plan = layout.finish();
        match &plan.pages[0].ops[0] {
            DrawOp::Text { x, y, .. } => {
                assert!((x - (geometry.margin_left + 15.0)).abs() < 1e-4);
                assert!((y - geometry.top_y()).abs() < 1e-4);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_centered_line_is_centered_in_usable_width() {
        let geometry = PageGeometry::a4();
        let mut layout = FixedLayout::new(geometry);
        layout
            .draw_text("Ada Lovelace", TextOptions::new(16.0).bold().centered())
            .unwrap();
        let width = get_metrics(FontStyle::Bold)
            .measure_str("Ada Lovelace", 16.0)
            .unwrap();
        let plan = layout.finish();
        match &plan.pages[0].ops[0] {
            DrawOp::Text { x, style, .. } => {
                let expected = geometry.margin_left + (geometry.usable_width() - width) / 2.0;
                assert!((x - expected).abs() < 1e-3);
                assert_eq!(*style, FontStyle::Bold);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_overflow_allocates_new_page_and_respects_bottom_margin() {
        let geometry = small_page();
        let mut layout = FixedLayout::new(geometry);
        for i in 0..30 {
            layout
                .draw_text(&format!("Line {i}"), TextOptions::new(10.0))
                .unwrap();
        }
        let plan = layout.finish();
        assert!(plan.pages.len() > 1);
        for page in &plan.pages {
            for op in &page.ops {
                if let DrawOp::Text { y, .. } = op {
                    assert!(*y >= geometry.margin_bottom, "line drawn at y={y}");
                }
            }
        }
        assert_eq!(plan.text_lines().len(), 30);
    }

    #[test]
    fn test_section_header_draws_rule_below_title() {
        let geometry = PageGeometry::a4();
        let mut layout = FixedLayout::new(geometry);
        layout.section_header("SUMMARY").unwrap();
        let after = layout.y();
        let plan = layout.finish();
        let ops = &plan.pages[0].ops;
        assert_eq!(ops.len(), 2);
        let title_y = geometry.top_y() - HEADER_GAP_ABOVE;
        match (&ops[0], &ops[1]) {
            (DrawOp::Text { y: ty, text, .. }, DrawOp::Rule { y: ry, x1, x2, .. }) => {
                assert_eq!(text, "SUMMARY");
                assert!((ty - title_y).abs() < 1e-4);
                assert!((ry - (title_y - LINE_SPACING + RULE_OFFSET)).abs() < 1e-4);
                assert!((x2 - x1 - geometry.usable_width()).abs() < 1e-3);
            }
            other => panic!("unexpected ops {other:?}"),
        }
        assert!((after - (title_y - LINE_SPACING - HEADER_GAP_BELOW)).abs() < 1e-4);
    }

    #[test]
    fn test_section_header_near_bottom_breaks_page() {
        let geometry = small_page();
        let mut layout = FixedLayout::new(geometry);
        // top_y = 110; six lines bring y to 38, the header gap to 34 < 10 + 36.
        for _ in 0..6 {
            layout.draw_text("filler", TextOptions::new(10.0)).unwrap();
        }
        layout.section_header("EDUCATION").unwrap();
        let plan = layout.finish();
        assert_eq!(plan.pages.len(), 2);
        assert_eq!(plan.pages[1].text_lines().next(), Some("EDUCATION"));
    }
}
