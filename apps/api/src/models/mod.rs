pub mod de;
pub mod resume;

pub use resume::{Contact, Education, Experience, Project, ResumeDocument, SkillCategory};
