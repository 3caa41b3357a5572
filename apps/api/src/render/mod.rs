// Renderers: fixed-layout PDF and flow-layout DOCX.
// Both walk the same section order but keep independent state; a render is one
// synchronous call that returns a complete buffer or an error.

pub mod docx;
pub mod flow;
pub mod pdf;
pub mod sections;

pub use docx::{render_docx, DOCX_CONTENT_TYPE};
pub use pdf::{layout_resume, render_pdf};
pub use sections::export_file_name;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
