//! Static glyph-width tables for the three PDF base fonts used by the fixed-layout renderer.
//!
//! Widths are the Adobe AFM advance widths in 1/1000 em, so a string measures
//! `sum(widths) / 1000 × font_size` points. The PDF renderer references the
//! standard Type 1 faces (Helvetica, Helvetica-Bold, Helvetica-Oblique) with
//! WinAnsi encoding, so the measurable character set is exactly the set the
//! renderer can encode: anything outside WinAnsi is a backend failure.
//!
//! ASCII tables cover 0x20..=0x7E (95 printable characters), index = `(char as usize) - 32`.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::errors::RenderError;

// ────────────────────────────────────────────────────────────────────────────
// Font style
// ────────────────────────────────────────────────────────────────────────────

/// One of the three faces a text draw can use. Combined bold+italic is not available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

impl FontStyle {
    /// Picks the face for a draw request. Italic wins over bold when both are set.
    pub fn select(bold: bool, italics: bool) -> Self {
        if italics {
            FontStyle::Italic
        } else if bold {
            FontStyle::Bold
        } else {
            FontStyle::Regular
        }
    }

    pub const ALL: [FontStyle; 3] = [FontStyle::Regular, FontStyle::Bold, FontStyle::Italic];
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one base font.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    /// PostScript name written into the PDF font dictionary.
    pub base_font: &'static str,
    /// Resource name the page content stream refers to.
    pub resource_name: &'static str,
    widths: [u16; 95],
    /// Widths for the WinAnsi typographic characters in 0x80..=0x9F.
    typographic: &'static [(char, u8, u16)],
    /// Fallback width for Latin-1 symbols without an ASCII base letter.
    pub average_char_width: u16,
}

impl FontMetricTable {
    /// Returns the WinAnsi byte and advance width for a character, or `None` if the
    /// character cannot be drawn with this font.
    pub fn glyph(&self, ch: char) -> Option<(u8, u16)> {
        let code = ch as u32;
        match code {
            0x20..=0x7E => Some((code as u8, self.widths[code as usize - 32])),
            // No-break space measures like a space.
            0xA0 => Some((0xA0, self.widths[0])),
            0xA1..=0xFF => Some((code as u8, self.latin1_width(ch))),
            _ => self
                .typographic
                .iter()
                .find(|(c, _, _)| *c == ch)
                .map(|(_, byte, width)| (*byte, *width)),
        }
    }

    /// Latin-1 letters take the width of their base letter (é → e); symbols use the average.
    fn latin1_width(&self, ch: char) -> u16 {
        match ch.nfd().next() {
            Some(base) if base != ch && (' '..='~').contains(&base) => {
                self.widths[base as usize - 32]
            }
            _ => self.average_char_width,
        }
    }

    /// Measures the rendered width of a string in points at `size`.
    pub fn measure_str(&self, s: &str, size: f32) -> Result<f32, RenderError> {
        let mut units: u32 = 0;
        for ch in s.chars() {
            let (_, width) = self.glyph(ch).ok_or(RenderError::UnsupportedGlyph {
                ch,
                font: self.base_font,
            })?;
            units += u32::from(width);
        }
        Ok(units as f32 / 1000.0 * size)
    }

    /// Encodes a string to WinAnsi bytes for a PDF text-showing operator.
    pub fn encode(&self, s: &str) -> Result<Vec<u8>, RenderError> {
        s.chars()
            .map(|ch| {
                self.glyph(ch)
                    .map(|(byte, _)| byte)
                    .ok_or(RenderError::UnsupportedGlyph {
                        ch,
                        font: self.base_font,
                    })
            })
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica and Helvetica-Oblique share advance widths.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // sp  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0   1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :   ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A   B    C    D    E    F    G    H    I    J    K    L    M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N   O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [   \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a   b    c    d    e    f    g    h    i    j    k    l    m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n   o    p    q    r    s    t    u    v    w    x    y    z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {   |    }    ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    // sp  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0   1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :   ;    <    =    >    ?    @
    333, 333, 584, 584, 584, 611, 975,
    // A   B    C    D    E    F    G    H    I    J    K    L    M
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    // N   O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [   \    ]    ^    _    `
    333, 278, 333, 584, 556, 333,
    // a   b    c    d    e    f    g    h    i    j    k    l    m
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    // n   o    p    q    r    s    t    u    v    w    x    y    z
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // {   |    }    ~
    389, 280, 389, 584,
];

/// (character, WinAnsi byte, width)
const HELVETICA_TYPOGRAPHIC: &[(char, u8, u16)] = &[
    ('€', 0x80, 556),
    ('‚', 0x82, 222),
    ('„', 0x84, 333),
    ('…', 0x85, 1000),
    ('‘', 0x91, 222),
    ('’', 0x92, 222),
    ('“', 0x93, 333),
    ('”', 0x94, 333),
    ('•', 0x95, 350),
    ('–', 0x96, 556),
    ('—', 0x97, 1000),
    ('™', 0x99, 1000),
];

const HELVETICA_BOLD_TYPOGRAPHIC: &[(char, u8, u16)] = &[
    ('€', 0x80, 556),
    ('‚', 0x82, 278),
    ('„', 0x84, 500),
    ('…', 0x85, 1000),
    ('‘', 0x91, 278),
    ('’', 0x92, 278),
    ('“', 0x93, 500),
    ('”', 0x94, 500),
    ('•', 0x95, 350),
    ('–', 0x96, 556),
    ('—', 0x97, 1000),
    ('™', 0x99, 1000),
];

static HELVETICA: FontMetricTable = FontMetricTable {
    base_font: "Helvetica",
    resource_name: "F1",
    widths: HELVETICA_WIDTHS,
    typographic: HELVETICA_TYPOGRAPHIC,
    average_char_width: 556,
};

static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    base_font: "Helvetica-Bold",
    resource_name: "F2",
    widths: HELVETICA_BOLD_WIDTHS,
    typographic: HELVETICA_BOLD_TYPOGRAPHIC,
    average_char_width: 584,
};

static HELVETICA_OBLIQUE: FontMetricTable = FontMetricTable {
    base_font: "Helvetica-Oblique",
    resource_name: "F3",
    widths: HELVETICA_WIDTHS,
    typographic: HELVETICA_TYPOGRAPHIC,
    average_char_width: 556,
};

/// Returns the static metric table for a font style.
pub fn get_metrics(style: FontStyle) -> &'static FontMetricTable {
    match style {
        FontStyle::Regular => &HELVETICA,
        FontStyle::Bold => &HELVETICA_BOLD,
        FontStyle::Italic => &HELVETICA_OBLIQUE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
