// Fixed-layout engine: font metrics, greedy word-wrap, cursor and page-break tracking.
// Pure and synchronous; callers on the async runtime run it inside spawn_blocking.

pub mod engine;
pub mod font_metrics;
pub mod page;
pub mod wrap;

pub use engine::{DrawOp, FixedLayout, LayoutPlan, TextOptions};
pub use font_metrics::{get_metrics, FontStyle};
pub use page::PageGeometry;
