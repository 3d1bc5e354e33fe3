// Text styling, measurement and greedy line wrapping for the built-in
// Helvetica faces.

/// Points per millimetre conversion
const MM_PER_PT: f32 = 25.4 / 72.0;

/// Baseline-to-baseline distance as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Width used for characters outside the tables (in 1/1000 em)
const FALLBACK_WIDTH: u16 = 556;

pub fn pt_to_mm(pt: f32) -> f32 {
    pt * MM_PER_PT
}

/// Height of one line of text in mm.
pub fn line_height_mm(size_pt: f32) -> f32 {
    pt_to_mm(size_pt * LINE_HEIGHT_FACTOR)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Style carried by every text draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontStyle,
    pub size_pt: f32,
    pub align: Align,
}

impl TextStyle {
    pub fn centered(font: FontStyle, size_pt: f32) -> Self {
        Self { font, size_pt, align: Align::Center }
    }
}

// ============================================================================
// Measurement
// ============================================================================

pub trait TextMeasure {
    /// Advance width of `text` in mm.
    fn text_width(&self, text: &str, font: FontStyle, size_pt: f32) -> f32;

    /// Break `text` into lines no wider than `max_width` mm.
    ///
    /// Words are packed greedily; a word that is wider than a whole line on its
    /// own is split between characters.
    fn wrap(&self, text: &str, font: FontStyle, size_pt: f32, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if self.text_width(&candidate, font, size_pt) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if self.text_width(word, font, size_pt) <= max_width {
                current = word.to_string();
                continue;
            }

            // Overlong word (URLs rarely contain spaces)
            for ch in word.chars() {
                current.push(ch);
                if self.text_width(&current, font, size_pt) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                }
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// AFM advance widths of the standard Helvetica faces.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaMetrics;

impl HelveticaMetrics {
    fn char_width(ch: char, font: FontStyle) -> u16 {
        let code = ch as u32;
        if !(32..=126).contains(&code) {
            return FALLBACK_WIDTH;
        }
        let idx = (code - 32) as usize;
        match font {
            FontStyle::Regular => HELVETICA_WIDTHS[idx],
            FontStyle::Bold => HELVETICA_BOLD_WIDTHS[idx],
        }
    }
}

impl TextMeasure for HelveticaMetrics {
    fn text_width(&self, text: &str, font: FontStyle, size_pt: f32) -> f32 {
        let units: u32 = text.chars().map(|c| Self::char_width(c, font) as u32).sum();
        pt_to_mm(units as f32 / 1000.0 * size_pt)
    }
}

/// Helvetica widths for ASCII 32..=126
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,                               // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015,                                             // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,                // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,                // 'N'..'Z'
    278, 278, 278, 469, 556, 333,                                                   // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,                // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,                // 'n'..'z'
    334, 260, 334, 584,                                                             // '{'..'~'
];

/// Helvetica-Bold widths for ASCII 32..=126
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];
