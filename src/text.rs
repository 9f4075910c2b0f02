//! Label fitting for fixed-font node boxes.
//!
//! Widths are in pixels and lengths in characters. The metrics assume an average glyph
//! width of 11px and 30px of horizontal padding inside a box.

/// Horizontal padding inside a node box.
pub const BOX_PADDING: f64 = 30.0;
/// Average rendered glyph width.
pub const GLYPH_WIDTH: f64 = 11.0;
/// Characters held back from the three-line capacity to absorb line-break ambiguity.
pub const SAFETY_MARGIN: usize = 6;
/// Width of a fault node box before any expansion.
pub const DEFAULT_NODE_WIDTH: f64 = 200.0;
/// Label measured when a node has no name.
pub const PLACEHOLDER_LABEL: &str = "故障节点";

const MAX_LINES: usize = 3;
const MIN_CHARS_PER_LINE: usize = 6;

/// Pure functions sizing labels into boxes of at most three lines.
pub struct TextFitter;

impl TextFitter {
    /// Characters that fit on one line of a box `width` pixels wide.
    pub fn chars_per_line(width: f64) -> usize {
        let usable = width - BOX_PADDING;
        if usable <= 0.0 {
            return 0;
        }
        (usable / GLYPH_WIDTH).floor() as usize
    }

    /// Whether `label` fits in three lines of a box `width` pixels wide.
    pub fn fits_in_three_lines(label: &str, width: f64) -> bool {
        let capacity = Self::chars_per_line(width) * MAX_LINES;
        match capacity.checked_sub(SAFETY_MARGIN) {
            Some(limit) => char_len(label) <= limit,
            None => false,
        }
    }

    /// Smallest width keeping `label` within exactly three lines.
    pub fn required_width_for_three_lines(label: &str) -> f64 {
        let per_line = char_len(label).div_ceil(MAX_LINES) + 4;
        // padding on both sides plus 20px of border slack
        per_line as f64 * GLYPH_WIDTH + BOX_PADDING + 20.0
    }

    /// Rendered width of a node box for `label`, expanded when the label would not fit
    /// in three lines of the default width.
    pub fn node_width(label: &str) -> f64 {
        let label = if label.is_empty() {
            PLACEHOLDER_LABEL
        } else {
            label
        };
        if Self::fits_in_three_lines(label, DEFAULT_NODE_WIDTH) {
            DEFAULT_NODE_WIDTH
        } else {
            DEFAULT_NODE_WIDTH.max(Self::required_width_for_three_lines(label))
        }
    }

    /// Line capacity used when splitting a label for display. Never below six.
    pub fn max_chars_per_line(width: f64) -> usize {
        Self::chars_per_line(width).max(MIN_CHARS_PER_LINE)
    }

    /// Splits `label` into display lines of at most `max_chars` characters.
    ///
    /// Labels that fit in three lines are balanced into near-equal chunks; longer labels
    /// are cut greedily.
    pub fn split_lines(label: &str, max_chars: usize) -> Vec<String> {
        let len = char_len(label);
        if len <= max_chars {
            return vec![label.to_string()];
        }
        if len <= max_chars * MAX_LINES {
            return Self::balance_lines(label, MAX_LINES);
        }

        let chars: Vec<char> = label.chars().collect();
        chars
            .chunks(max_chars.max(1))
            .map(|chunk| chunk.iter().collect())
            .collect()
    }

    /// Splits `label` into `lines` chunks whose lengths differ by at most one, longer
    /// chunks first. Empty chunks are dropped.
    pub fn balance_lines(label: &str, lines: usize) -> Vec<String> {
        let chars: Vec<char> = label.chars().collect();
        let total = chars.len();
        if lines == 0 {
            return Vec::new();
        }
        let base = total / lines;
        let remainder = total % lines;

        let mut out = Vec::with_capacity(lines);
        let mut start = 0;
        for i in 0..lines {
            if start >= total {
                break;
            }
            let size = base + usize::from(i < remainder);
            let end = (start + size).min(total);
            if end > start {
                out.push(chars[start..end].iter().collect());
            }
            start = end;
        }
        out
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
