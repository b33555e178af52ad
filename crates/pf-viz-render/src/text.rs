use crate::primitives::{FontWeight, TextStyle};

#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
}

/// Approximate per-character advance, as a fraction of the font size.
///
/// Rendering goes through system sans-serif fonts, so exact metrics are
/// not available at layout time. These ratios are close enough for
/// margin and legend sizing.
fn advance_ratio(ch: char) -> f64 {
    match ch {
        'i' | 'j' | 'l' | '\'' | '|' | '.' | ',' | ':' | ';' => 0.28,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' | ' ' => 0.35,
        'm' | 'w' | 'M' | 'W' => 0.85,
        'A'..='Z' => 0.68,
        '0'..='9' => 0.56,
        _ => 0.52,
    }
}

/// Estimate text extent in points for a sans-serif face.
pub fn measure_text(text: &str, size_pt: f64, weight: FontWeight) -> TextMetrics {
    let mut width: f64 = text.chars().map(advance_ratio).sum::<f64>() * size_pt;
    if weight == FontWeight::Bold {
        width *= 1.05;
    }
    TextMetrics { width, height: size_pt * 1.2, ascent: size_pt * 0.78 }
}

/// Measure text with a TextStyle.
pub fn measure_styled(text: &str, style: &TextStyle) -> TextMetrics {
    measure_text(text, style.size, style.weight)
}
