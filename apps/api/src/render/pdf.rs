//! Fixed-layout renderer: lays the resume out on A4 pages and serializes them to PDF.
//!
//! `layout_resume` walks the sections and produces a `LayoutPlan` (positioned draw
//! operations per page). `write_pdf` turns that plan into bytes with `pdf-writer`,
//! using the standard Helvetica faces with WinAnsi encoding so no font is embedded.
//! Nothing in the output depends on time or randomness; the same document always
//! produces the same bytes.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};
use tracing::debug;

use crate::errors::RenderError;
use crate::layout::{
    get_metrics, DrawOp, FixedLayout, FontStyle, LayoutPlan, PageGeometry, TextOptions,
};
use crate::models::ResumeDocument;
use crate::render::sections::{self, Section};

const NAME_SIZE: f32 = 16.0;
const CONTACT_SIZE: f32 = 10.0;
const BODY_SIZE: f32 = 11.0;
const BULLET_SIZE: f32 = 10.0;
const BULLET_INDENT: f32 = 15.0;
const BULLET_PREFIX: &str = "•  ";
/// Gap after each experience or project entry.
const ENTRY_GAP: f32 = 4.0;

/// Renders the document to PDF bytes.
pub fn render_pdf(doc: &ResumeDocument, geometry: PageGeometry) -> Result<Vec<u8>, RenderError> {
    let plan = layout_resume(doc, geometry)?;
    write_pdf(&plan)
}

/// Lays the document out into positioned draw operations, one list per page.
pub fn layout_resume(
    doc: &ResumeDocument,
    geometry: PageGeometry,
) -> Result<LayoutPlan, RenderError> {
    let mut layout = FixedLayout::new(geometry);

    layout.draw_text(&doc.name, TextOptions::new(NAME_SIZE).bold().centered())?;
    layout.draw_text(
        &sections::contact_line(&doc.contact),
        TextOptions::new(CONTACT_SIZE).centered(),
    )?;

    for section in Section::ORDER {
        layout.section_header(section.title())?;
        draw_section_body(&mut layout, doc, section)?;
    }

    let plan = layout.finish();
    debug!(
        pages = plan.pages.len(),
        lines = plan.text_lines().len(),
        "resume laid out"
    );
    Ok(plan)
}

fn draw_section_body(
    layout: &mut FixedLayout,
    doc: &ResumeDocument,
    section: Section,
) -> Result<(), RenderError> {
    match section {
        Section::Summary => layout.draw_text(&doc.summary, TextOptions::new(BODY_SIZE))?,
        Section::Experience => {
            for entry in &doc.experience {
                layout.draw_text(
                    &sections::experience_heading(entry),
                    TextOptions::new(BODY_SIZE).bold(),
                )?;
                layout.draw_text(
                    &sections::experience_subheading(entry),
                    TextOptions::new(BODY_SIZE).italics(),
                )?;
                draw_bullets(layout, &entry.highlights)?;
                layout.advance(ENTRY_GAP);
            }
        }
        Section::TechnicalSkills => {
            for skill in &doc.skills {
                layout.draw_text(&sections::skill_line(skill), TextOptions::new(BODY_SIZE))?;
            }
        }
        Section::Projects => {
            for project in &doc.projects {
                layout.draw_text(
                    &sections::project_heading(project),
                    TextOptions::new(BODY_SIZE).bold(),
                )?;
                draw_bullets(layout, &project.highlights)?;
                layout.advance(ENTRY_GAP);
            }
        }
        Section::Education => {
            for entry in &doc.education {
                layout.draw_text(
                    &sections::education_heading(entry),
                    TextOptions::new(BODY_SIZE).bold(),
                )?;
                layout.draw_text(
                    &sections::education_subheading(entry),
                    TextOptions::new(BODY_SIZE).italics(),
                )?;
            }
        }
        Section::Certificates => draw_bullets(layout, &doc.certificates)?,
    }
    Ok(())
}

fn draw_bullets(layout: &mut FixedLayout, items: &[String]) -> Result<(), RenderError> {
    for item in items {
        layout.draw_text(
            &format!("{BULLET_PREFIX}{item}"),
            TextOptions::new(BULLET_SIZE).indent(BULLET_INDENT),
        )?;
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// PDF serialization
// ────────────────────────────────────────────────────────────────────────────

const CATALOG_ID: i32 = 1;
const PAGE_TREE_ID: i32 = 2;
/// Font objects take ids 3..=5; page and content objects follow in pairs.
const FIRST_FONT_ID: i32 = 3;
const FIRST_PAGE_ID: i32 = FIRST_FONT_ID + FontStyle::ALL.len() as i32;

fn font_ref(style: FontStyle) -> Ref {
    let offset = FontStyle::ALL
        .iter()
        .position(|s| *s == style)
        .unwrap_or_default() as i32;
    Ref::new(FIRST_FONT_ID + offset)
}

/// Serializes a layout plan to a single PDF buffer.
pub fn write_pdf(plan: &LayoutPlan) -> Result<Vec<u8>, RenderError> {
    let mut pdf = Pdf::new();
    let catalog_id = Ref::new(CATALOG_ID);
    let page_tree_id = Ref::new(PAGE_TREE_ID);
    let page_count = plan.pages.len();
    let page_ids: Vec<Ref> = (0..page_count)
        .map(|i| Ref::new(FIRST_PAGE_ID + 2 * i as i32))
        .collect();

    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(page_count as i32);

    for style in FontStyle::ALL {
        let metrics = get_metrics(style);
        pdf.type1_font(font_ref(style))
            .base_font(Name(metrics.base_font.as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let media_box = Rect::new(0.0, 0.0, plan.geometry.width, plan.geometry.height);
    for (page_plan, page_id) in plan.pages.iter().zip(&page_ids) {
        let content_id = Ref::new(page_id.get() + 1);

        let mut page = pdf.page(*page_id);
        page.media_box(media_box);
        page.parent(page_tree_id);
        page.contents(content_id);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            for style in FontStyle::ALL {
                let name = get_metrics(style).resource_name;
                fonts.pair(Name(name.as_bytes()), font_ref(style));
            }
        }
        page.finish();

        let content = page_content(&page_plan.ops)?;
        pdf.stream(content_id, &content);
    }

    let bytes = pdf.finish();
    debug!(pages = page_count, bytes = bytes.len(), "pdf serialized");
    Ok(bytes)
}

fn page_content(ops: &[DrawOp]) -> Result<Vec<u8>, RenderError> {
    let mut content = Content::new();
    for op in ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                style,
                text,
            } => {
                let metrics = get_metrics(*style);
                let encoded = metrics.encode(text)?;
                content.begin_text();
                content.set_font(Name(metrics.resource_name.as_bytes()), *size);
                content.next_line(*x, *y);
                content.show(Str(&encoded));
                content.end_text();
            }
            DrawOp::Rule {
                x1,
                x2,
                y,
                thickness,
            } => {
                content.set_line_width(*thickness);
                content.move_to(*x1, *y);
                content.line_to(*x2, *y);
                content.stroke();
            }
        }
    }
    Ok(content.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::page::LINE_SPACING;
    use crate::models::{Contact, Education, Experience, Project, SkillCategory};

    fn full_resume() -> ResumeDocument {
        ResumeDocument {
            name: "Ada Lovelace".into(),
            contact: Contact {
                email: Some("ada@example.com".into()),
                location: Some("London".into()),
                ..Default::default()
            },
            summary: "Engineer focused on analytical engines and the programs that run on them."
                .into(),
            skills: vec![SkillCategory {
                category: "Languages".into(),
                skills: vec!["Rust".into(), "Go".into()],
            }],
            experience: vec![Experience {
                company: "Analytical Engines Ltd".into(),
                title: "Lead Programmer".into(),
                location: "London".into(),
                start: "1842".into(),
                end: "1843".into(),
                highlights: vec![
                    "Wrote the first published algorithm for a computing machine".into(),
                    "Translated and annotated Menabrea's memoir".into(),
                ],
            }],
            education: vec![Education {
                program: "Mathematics".into(),
                school: "Private tutoring".into(),
                location: "London".into(),
                start: "1829".into(),
                end: "1835".into(),
            }],
            projects: vec![Project {
                title: "Note G".into(),
                tech: vec!["Difference Engine".into()],
                highlights: vec!["Computed Bernoulli numbers".into()],
            }],
            certificates: vec!["Royal Society reading access".into()],
        }
    }

    fn header_positions(lines: &[&str]) -> Vec<usize> {
        Section::ORDER
            .iter()
            .map(|s| {
                lines
                    .iter()
                    .position(|l| *l == s.title())
                    .unwrap_or_else(|| panic!("missing header {}", s.title()))
            })
            .collect()
    }

    #[test]
    fn test_render_is_byte_identical_across_runs() {
        let doc = full_resume();
        let first = render_pdf(&doc, PageGeometry::a4()).unwrap();
        let second = render_pdf(&doc, PageGeometry::a4()).unwrap();
        assert!(first.starts_with(b"%PDF-"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_six_headers_in_fixed_order() {
        let plan = layout_resume(&full_resume(), PageGeometry::a4()).unwrap();
        let lines = plan.text_lines();
        let positions = header_positions(&lines);
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
        assert_eq!(lines[0], "Ada Lovelace");
        assert_eq!(lines[1], "London | ada@example.com");
    }

    #[test]
    fn test_body_lines_follow_layout_rules() {
        let plan = layout_resume(&full_resume(), PageGeometry::a4()).unwrap();
        let lines = plan.text_lines();
        assert!(lines.contains(&"Analytical Engines Ltd (1842 – 1843)"));
        assert!(lines.contains(&"Lead Programmer — London"));
        assert!(lines.contains(&"Languages: Rust, Go"));
        assert!(lines.contains(&"Note G | Tech: Difference Engine"));
        assert!(lines.contains(&"Mathematics (1829 – 1835)"));
        assert!(lines.contains(&"•  Royal Society reading access"));

        let bullet_style = plan.pages[0].ops.iter().find_map(|op| match op {
            DrawOp::Text { text, x, size, .. } if text.starts_with("•  Wrote") => Some((*x, *size)),
            _ => None,
        });
        let (x, size) = bullet_style.unwrap();
        assert!((x - (plan.geometry.margin_left + BULLET_INDENT)).abs() < 1e-4);
        assert_eq!(size, BULLET_SIZE);
    }

    #[test]
    fn test_empty_certificates_keep_header_and_rule() {
        let mut doc = full_resume();
        doc.certificates.clear();
        let plan = layout_resume(&doc, PageGeometry::a4()).unwrap();
        let ops: Vec<&DrawOp> = plan.pages.iter().flat_map(|p| &p.ops).collect();
        let header = ops
            .iter()
            .position(|op| matches!(op, DrawOp::Text { text, .. } if text == "CERTIFICATES"))
            .unwrap();
        assert!(matches!(ops[header + 1], DrawOp::Rule { .. }));
        assert_eq!(ops.len(), header + 2, "no body lines after the last header");
    }

    #[test]
    fn test_empty_document_still_renders_every_header() {
        let plan = layout_resume(&ResumeDocument::default(), PageGeometry::a4()).unwrap();
        let lines = plan.text_lines();
        assert_eq!(lines.len(), 6);
        header_positions(&lines);
        let rules = plan.pages[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rule { .. }))
            .count();
        assert_eq!(rules, 6);
    }

    #[test]
    fn test_long_resume_paginates_within_margins() {
        let mut doc = full_resume();
        doc.experience = (0..20)
            .map(|i| Experience {
                company: format!("Company {i}"),
                title: "Engineer".into(),
                location: "Remote".into(),
                start: "2020".into(),
                end: "2021".into(),
                highlights: vec![
                    "Shipped a feature that touched every layer of the stack and needed a \
                     fairly long description to explain properly"
                        .into();
                    4
                ],
            })
            .collect();
        let geometry = PageGeometry::a4();
        let plan = layout_resume(&doc, geometry).unwrap();
        assert!(plan.pages.len() > 1);
        for page in &plan.pages {
            for op in &page.ops {
                if let DrawOp::Text { y, .. } = op {
                    assert!(*y >= geometry.margin_bottom + LINE_SPACING - 1e-3);
                }
            }
        }

        let bytes = write_pdf(&plan).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains(&format!("/Count {}", plan.pages.len())));
    }

    #[test]
    fn test_unencodable_text_fails_whole_render() {
        let mut doc = full_resume();
        doc.summary = "Ships 🚀 fast".into();
        let err = render_pdf(&doc, PageGeometry::a4()).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedGlyph { ch: '🚀', .. }));
    }

    #[test]
    fn test_control_characters_lay_out_as_spaces() {
        let mut doc = full_resume();
        doc.summary = "Team lead\u{000C}page two\u{0008}".into();
        let plan = layout_resume(&doc, PageGeometry::a4()).unwrap();
        assert!(plan.text_lines().contains(&"Team lead page two "));
        assert!(render_pdf(&doc, PageGeometry::a4()).is_ok());
    }

    #[test]
    fn test_pdf_declares_a4_media_box_and_fonts() {
        let bytes = render_pdf(&full_resume(), PageGeometry::a4()).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/MediaBox"));
        assert!(text.contains("595.28") && text.contains("841.89"));
        assert!(text.contains("/BaseFont /Helvetica-Bold"));
        assert!(text.contains("/Encoding /WinAnsiEncoding"));
    }
}
