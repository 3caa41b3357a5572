//! Greedy word-wrap against a width budget.
//!
//! Tokens are split on single spaces, so runs of spaces survive as empty tokens and
//! rejoining the output lines with `" "` reproduces the input exactly.

use serde::Serialize;

use crate::errors::RenderError;
use crate::layout::font_metrics::FontMetricTable;

/// One output line and its measured width in points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrappedLine {
    pub text: String,
    pub width: f32,
}

/// Tabs, line breaks and the other ASCII control characters (form feed, backspace,
/// DEL, ...) inside a field are laid out as ordinary spaces. Neither WinAnsi nor XML 1.0
/// can carry the control characters.
pub fn normalize_whitespace(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_control() { ' ' } else { c })
        .collect()
}

/// Breaks `text` into lines no wider than `max_width` at `size` points.
///
/// A candidate line is `line + " " + token`; when it overflows, the accumulated line is
/// emitted without the token and the token starts the next line. The remainder is always
/// emitted, so non-empty input yields at least one line. A token wider than `max_width`
/// on its own still gets its own line. Empty input yields no lines.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size: f32,
    max_width: f32,
) -> Result<Vec<WrappedLine>, RenderError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut lines = Vec::new();
    // `None` until the first token lands, so a line made of one empty token still counts.
    let mut line: Option<String> = None;
    let mut line_width = 0.0_f32;

    for token in text.split(' ') {
        let candidate = match &line {
            Some(current) => format!("{current} {token}"),
            None => token.to_string(),
        };
        let candidate_width = metrics.measure_str(&candidate, size)?;

        match line.take() {
            Some(current) if candidate_width > max_width => {
                lines.push(WrappedLine {
                    text: current,
                    width: line_width,
                });
                line_width = metrics.measure_str(token, size)?;
                line = Some(token.to_string());
            }
            _ => {
                line = Some(candidate);
                line_width = candidate_width;
            }
        }
    }
    if let Some(text) = line {
        lines.push(WrappedLine {
            text,
            width: line_width,
        });
    }

    Ok(lines)
}
