//! Page geometry for the fixed-layout renderer.

use serde::{Deserialize, Serialize};

/// Vertical advance per emitted line, independent of font size.
pub const LINE_SPACING: f32 = 12.0;

const POINTS_PER_CM: f32 = 72.0 / 2.54;

pub fn cm_to_pt(cm: f32) -> f32 {
    cm * POINTS_PER_CM
}

/// Page size and margins in PDF points. Origin is bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl PageGeometry {
    /// Portrait A4 with 1 cm top/bottom and 1.9 cm left/right margins.
    pub fn a4() -> Self {
        PageGeometry {
            width: 595.28,
            height: 841.89,
            margin_top: cm_to_pt(1.0),
            margin_bottom: cm_to_pt(1.0),
            margin_left: cm_to_pt(1.9),
            margin_right: cm_to_pt(1.9),
        }
    }

    /// Wrap budget for a full-width line.
    pub fn usable_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Cursor position at the top of a fresh page.
    pub fn top_y(&self) -> f32 {
        self.height - self.margin_top
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::a4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_usable_width() {
        let page = PageGeometry::a4();
        // 595.28 - 2 × 53.858
        assert!((page.usable_width() - 487.56).abs() < 0.01, "got {}", page.usable_width());
    }

    #[test]
    fn test_a4_top_y() {
        let page = PageGeometry::a4();
        assert!((page.top_y() - 813.54).abs() < 0.01, "got {}", page.top_y());
    }
}
