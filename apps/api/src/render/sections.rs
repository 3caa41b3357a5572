//! Section ordering and line composition shared by both renderers.
//!
//! Only pure text helpers live here; each renderer keeps its own layout state.

use crate::models::{Contact, Education, Experience, Project, ResumeDocument, SkillCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    Experience,
    TechnicalSkills,
    Projects,
    Education,
    Certificates,
}

impl Section {
    /// Render order. Every section is emitted, even when its body is empty.
    pub const ORDER: [Section; 6] = [
        Section::Summary,
        Section::Experience,
        Section::TechnicalSkills,
        Section::Projects,
        Section::Education,
        Section::Certificates,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Summary => "SUMMARY",
            Section::Experience => "EXPERIENCE",
            Section::TechnicalSkills => "TECHNICAL SKILLS",
            Section::Projects => "PROJECTS",
            Section::Education => "EDUCATION",
            Section::Certificates => "CERTIFICATES",
        }
    }
}

pub const CONTACT_SEPARATOR: &str = " | ";

pub fn contact_line(contact: &Contact) -> String {
    contact.present_fields().join(CONTACT_SEPARATOR)
}

pub fn date_range(start: &str, end: &str) -> String {
    format!("{start} – {end}")
}

pub fn skill_line(skill: &SkillCategory) -> String {
    format!("{}: {}", skill.category, skill.skills.join(", "))
}

pub fn experience_heading(entry: &Experience) -> String {
    format!("{} ({})", entry.company, date_range(&entry.start, &entry.end))
}

pub fn experience_subheading(entry: &Experience) -> String {
    format!("{} — {}", entry.title, entry.location)
}

pub fn project_heading(project: &Project) -> String {
    format!("{} | Tech: {}", project.title, project.tech.join(", "))
}

pub fn education_heading(entry: &Education) -> String {
    format!("{} ({})", entry.program, date_range(&entry.start, &entry.end))
}

pub fn education_subheading(entry: &Education) -> String {
    format!("{} — {}", entry.school, entry.location)
}

/// Export file name: `{first name token}_resume.{ext}`, reduced to a header-safe charset.
pub fn export_file_name(doc: &ResumeDocument, ext: &str) -> String {
    let stem: String = doc
        .first_name_token()
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect();
    if stem.is_empty() {
        format!("resume.{ext}")
    } else {
        format!("{stem}_resume.{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_line_filters_and_orders_fields() {
        let contact = Contact {
            email: Some("a@b.com".into()),
            github: Some("gh/x".into()),
            ..Default::default()
        };
        assert_eq!(contact_line(&contact), "a@b.com | gh/x");
    }

    #[test]
    fn test_contact_line_full_order() {
        let contact = Contact {
            email: Some("e".into()),
            phone: Some("p".into()),
            location: Some("l".into()),
            website: Some("w".into()),
            github: Some("g".into()),
            linkedin: Some("in".into()),
        };
        assert_eq!(contact_line(&contact), "l | e | w | p | g | in");
    }

    #[test]
    fn test_contact_line_empty_when_no_fields() {
        assert_eq!(contact_line(&Contact::default()), "");
    }

    #[test]
    fn test_headings() {
        let exp = Experience {
            company: "Acme".into(),
            title: "Engineer".into(),
            location: "Remote".into(),
            start: "2021".into(),
            end: "Present".into(),
            highlights: vec![],
        };
        assert_eq!(experience_heading(&exp), "Acme (2021 – Present)");
        assert_eq!(experience_subheading(&exp), "Engineer — Remote");

        let project = Project {
            title: "Tailor".into(),
            tech: vec!["Rust".into(), "axum".into()],
            highlights: vec![],
        };
        assert_eq!(project_heading(&project), "Tailor | Tech: Rust, axum");
    }

    #[test]
    fn test_missing_fields_render_as_blank() {
        let exp = Experience::default();
        assert_eq!(experience_heading(&exp), " ( – )");
        assert_eq!(education_subheading(&Education::default()), " — ");
    }

    #[test]
    fn test_export_file_name() {
        let doc = ResumeDocument {
            name: "Grace Hopper".into(),
            ..Default::default()
        };
        assert_eq!(export_file_name(&doc, "pdf"), "Grace_resume.pdf");
        assert_eq!(
            export_file_name(&ResumeDocument::default(), "docx"),
            "resume.docx"
        );
    }

    #[test]
    fn test_section_order() {
        let titles: Vec<&str> = Section::ORDER.iter().map(|s| s.title()).collect();
        assert_eq!(
            titles,
            vec![
                "SUMMARY",
                "EXPERIENCE",
                "TECHNICAL SKILLS",
                "PROJECTS",
                "EDUCATION",
                "CERTIFICATES"
            ]
        );
    }
}
