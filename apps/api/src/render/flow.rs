//! Flow-layout renderer: resume → paragraphs of styled runs.
//!
//! No wrapping or pagination happens here; the word processor reflows the text.
//! Two-column lines (label left, date or location right) are two runs separated by
//! a tab, aligned by one right tab stop at the full text width.

use serde::Serialize;

use crate::layout::wrap::normalize_whitespace;
use crate::models::{Education, Experience, Project, ResumeDocument};
use crate::render::sections::{self, Section};

/// Twentieths of a point per inch.
const TWIPS_PER_INCH: f32 = 1440.0;

/// A4 in twips.
const PAGE_WIDTH_TWIPS: u32 = 11906;
const PAGE_HEIGHT_TWIPS: u32 = 16838;

const NAME_SIZE: u32 = 32;
const CONTACT_SIZE: u32 = 20;
const HEADER_SIZE: u32 = 24;
const BODY_SIZE: u32 = 22;
const BULLET_SIZE: u32 = 20;

const HEADER_SPACING_BEFORE: u32 = 200;
const HEADER_SPACING_AFTER: u32 = 80;
const ENTRY_SPACING_BEFORE: u32 = 80;

fn inches_to_twips(inches: f32) -> u32 {
    (inches * TWIPS_PER_INCH).round() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMargins {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl PageMargins {
    /// 0.4 in top/bottom, 0.76 in left/right.
    pub fn resume() -> Self {
        PageMargins {
            top: inches_to_twips(0.4),
            bottom: inches_to_twips(0.4),
            left: inches_to_twips(0.76),
            right: inches_to_twips(0.76),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

/// A text run. `size` is in half-points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italics: bool,
    pub size: u32,
    /// Emit a tab character before the text.
    pub tab_before: bool,
}

impl Run {
    /// Control characters in `text` become spaces.
    pub fn new(text: impl Into<String>, size: u32) -> Self {
        Run {
            text: normalize_whitespace(&text.into()),
            bold: false,
            italics: false,
            size,
            tab_before: false,
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

    pub fn after_tab(mut self) -> Self {
        self.tab_before = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Alignment,
    pub spacing_before: u32,
    pub spacing_after: u32,
    pub border_bottom: bool,
    /// Bullet list level, when the paragraph is a list item.
    pub bullet_level: Option<u8>,
    /// Right-aligned tab stop position in twips.
    pub right_tab: Option<u32>,
}

impl Paragraph {
    #[cfg(test)]
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .map(|r| {
                if r.tab_before {
                    format!("\t{}", r.text)
                } else {
                    r.text.clone()
                }
            })
            .collect()
    }
}

/// One section's worth of paragraphs plus page setup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowDocument {
    pub page_width: u32,
    pub page_height: u32,
    pub margins: PageMargins,
    pub paragraphs: Vec<Paragraph>,
}

impl FlowDocument {
    /// Text width between the margins; also the position of the right tab stop.
    pub fn max_line_width(&self) -> u32 {
        self.page_width - self.margins.left - self.margins.right
    }
}

/// Builds the paragraph structure for a resume.
pub fn build_flow(doc: &ResumeDocument) -> FlowDocument {
    let mut builder = FlowBuilder::new();

    builder.push(Paragraph {
        runs: vec![Run::new(&doc.name, NAME_SIZE).bold()],
        alignment: Alignment::Center,
        ..Default::default()
    });
    builder.push(Paragraph {
        runs: vec![Run::new(sections::contact_line(&doc.contact), CONTACT_SIZE)],
        alignment: Alignment::Center,
        ..Default::default()
    });

    for section in Section::ORDER {
        builder.section_header(section.title());
        match section {
            Section::Summary => {
                if !doc.summary.is_empty() {
                    builder.push(Paragraph {
                        runs: vec![Run::new(&doc.summary, BODY_SIZE)],
                        ..Default::default()
                    });
                }
            }
            Section::Experience => doc.experience.iter().for_each(|e| builder.experience(e)),
            Section::TechnicalSkills => {
                for skill in &doc.skills {
                    builder.push(Paragraph {
                        runs: vec![
                            Run::new(format!("{}: ", skill.category), BODY_SIZE).bold(),
                            Run::new(skill.skills.join(", "), BODY_SIZE),
                        ],
                        ..Default::default()
                    });
                }
            }
            Section::Projects => doc.projects.iter().for_each(|p| builder.project(p)),
            Section::Education => doc.education.iter().for_each(|e| builder.education(e)),
            Section::Certificates => builder.bullets(&doc.certificates),
        }
    }

    builder.finish()
}

struct FlowBuilder {
    doc: FlowDocument,
}

impl FlowBuilder {
    fn new() -> Self {
        FlowBuilder {
            doc: FlowDocument {
                page_width: PAGE_WIDTH_TWIPS,
                page_height: PAGE_HEIGHT_TWIPS,
                margins: PageMargins::resume(),
                paragraphs: Vec::new(),
            },
        }
    }

    fn push(&mut self, paragraph: Paragraph) {
        self.doc.paragraphs.push(paragraph);
    }

    fn section_header(&mut self, title: &str) {
        self.push(Paragraph {
            runs: vec![Run::new(title, HEADER_SIZE).bold()],
            spacing_before: HEADER_SPACING_BEFORE,
            spacing_after: HEADER_SPACING_AFTER,
            border_bottom: true,
            ..Default::default()
        });
    }

    /// Label on the left, `right` pushed to the right margin by the tab stop.
    fn two_column(&mut self, left: Run, right: Run, spacing_before: u32) {
        let tab = self.doc.max_line_width();
        self.push(Paragraph {
            runs: vec![left, right.after_tab()],
            spacing_before,
            right_tab: Some(tab),
            ..Default::default()
        });
    }

    fn bullets(&mut self, items: &[String]) {
        for item in items {
            self.push(Paragraph {
                runs: vec![Run::new(item, BULLET_SIZE)],
                bullet_level: Some(0),
                ..Default::default()
            });
        }
    }

    fn experience(&mut self, entry: &Experience) {
        self.two_column(
            Run::new(&entry.company, BODY_SIZE).bold(),
            Run::new(sections::date_range(&entry.start, &entry.end), BODY_SIZE),
            ENTRY_SPACING_BEFORE,
        );
        self.two_column(
            Run::new(&entry.title, BODY_SIZE).italics(),
            Run::new(&entry.location, BODY_SIZE).italics(),
            0,
        );
        self.bullets(&entry.highlights);
    }

    fn project(&mut self, project: &Project) {
        self.two_column(
            Run::new(&project.title, BODY_SIZE).bold(),
            Run::new(format!("Tech: {}", project.tech.join(", ")), BODY_SIZE).italics(),
            ENTRY_SPACING_BEFORE,
        );
        self.bullets(&project.highlights);
    }

    fn education(&mut self, entry: &Education) {
        self.two_column(
            Run::new(&entry.program, BODY_SIZE).bold(),
            Run::new(sections::date_range(&entry.start, &entry.end), BODY_SIZE),
            ENTRY_SPACING_BEFORE,
        );
        self.two_column(
            Run::new(&entry.school, BODY_SIZE).italics(),
            Run::new(&entry.location, BODY_SIZE).italics(),
            0,
        );
    }

    fn finish(self) -> FlowDocument {
        self.doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Contact, SkillCategory};

    fn sample() -> ResumeDocument {
        ResumeDocument {
            name: "Grace Hopper".into(),
            contact: Contact {
                email: Some("grace@example.com".into()),
                ..Default::default()
            },
            summary: "Compiler pioneer.".into(),
            skills: vec![SkillCategory {
                category: "Languages".into(),
                skills: vec!["COBOL".into(), "FLOW-MATIC".into()],
            }],
            experience: vec![Experience {
                company: "US Navy".into(),
                title: "Rear Admiral".into(),
                location: "Washington".into(),
                start: "1943".into(),
                end: "1986".into(),
                highlights: vec!["Popularized the term debugging".into()],
            }],
            education: vec![Education {
                program: "PhD Mathematics".into(),
                school: "Yale".into(),
                location: "New Haven".into(),
                start: "1930".into(),
                end: "1934".into(),
            }],
            projects: vec![Project {
                title: "A-0".into(),
                tech: vec!["UNIVAC I".into()],
                highlights: vec![],
            }],
            certificates: vec!["Defense Distinguished Service Medal".into()],
        }
    }

    fn headers(flow: &FlowDocument) -> Vec<String> {
        flow.paragraphs
            .iter()
            .filter(|p| p.border_bottom)
            .map(|p| p.plain_text())
            .collect()
    }

    #[test]
    fn test_margins_in_twips() {
        let margins = PageMargins::resume();
        assert_eq!(margins.top, 576);
        assert_eq!(margins.bottom, 576);
        assert_eq!(margins.left, 1094);
        assert_eq!(margins.right, 1094);
    }

    #[test]
    fn test_section_headers_in_fixed_order() {
        let flow = build_flow(&sample());
        assert_eq!(
            headers(&flow),
            vec![
                "SUMMARY",
                "EXPERIENCE",
                "TECHNICAL SKILLS",
                "PROJECTS",
                "EDUCATION",
                "CERTIFICATES"
            ]
        );
        let header = flow.paragraphs.iter().find(|p| p.border_bottom).unwrap();
        assert!(header.runs[0].bold);
        assert_eq!(header.runs[0].size, 24);
        assert!(header.spacing_before > 0);
    }

    #[test]
    fn test_two_column_lines_use_tab_and_right_stop() {
        let flow = build_flow(&sample());
        let company = flow
            .paragraphs
            .iter()
            .find(|p| p.plain_text().starts_with("US Navy"))
            .unwrap();
        assert_eq!(company.plain_text(), "US Navy\t1943 – 1986");
        assert_eq!(company.right_tab, Some(flow.max_line_width()));
        assert_eq!(flow.max_line_width(), 11906 - 2 * 1094);

        let texts: Vec<String> = flow.paragraphs.iter().map(|p| p.plain_text()).collect();
        assert!(texts.contains(&"Rear Admiral\tWashington".to_string()));
        assert!(texts.contains(&"PhD Mathematics\t1930 – 1934".to_string()));
        assert!(texts.contains(&"Yale\tNew Haven".to_string()));
        assert!(texts.contains(&"A-0\tTech: UNIVAC I".to_string()));
        assert!(texts.contains(&"Languages: COBOL, FLOW-MATIC".to_string()));
    }

    #[test]
    fn test_highlights_are_level_zero_bullets() {
        let flow = build_flow(&sample());
        let bullets: Vec<String> = flow
            .paragraphs
            .iter()
            .filter(|p| p.bullet_level == Some(0))
            .map(|p| p.plain_text())
            .collect();
        assert_eq!(
            bullets,
            vec![
                "Popularized the term debugging",
                "Defense Distinguished Service Medal"
            ]
        );
    }

    #[test]
    fn test_empty_certificates_emit_only_header() {
        let mut doc = sample();
        doc.certificates.clear();
        let flow = build_flow(&doc);
        let last = flow.paragraphs.last().unwrap();
        assert!(last.border_bottom);
        assert_eq!(last.plain_text(), "CERTIFICATES");
    }

    #[test]
    fn test_entry_without_highlights_renders_no_bullets() {
        let doc = ResumeDocument {
            experience: vec![Experience {
                company: "Acme".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let flow = build_flow(&doc);
        assert!(flow.paragraphs.iter().all(|p| p.bullet_level.is_none()));
    }

    #[test]
    fn test_name_and_contact_are_centered() {
        let flow = build_flow(&sample());
        assert_eq!(flow.paragraphs[0].alignment, Alignment::Center);
        assert_eq!(flow.paragraphs[0].runs[0].size, 32);
        assert_eq!(flow.paragraphs[1].plain_text(), "grace@example.com");
    }
}
