use kurbo::Rect;

use crate::render::{Color, Primitive, RenderFrame, TextHAlign, TextPrimitive};

pub(crate) const NO_DATA_TEXT: &str = "No data to display";
const NO_DATA_FONT_SIZE_PX: f64 = 14.0;

pub(crate) fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    // Keep this estimate deterministic and backend-independent.
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' => 0.34,
            '-' | '+' | '%' | '(' | ')' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

/// Top coordinate that vertically centers a line of text in `[top, top + height]`.
pub(crate) fn centered_text_top(top: f64, height: f64, font_size_px: f64) -> f64 {
    top + (height - font_size_px) * 0.5
}

/// Fixed "no data" message centered in `area`.
pub(crate) fn push_no_data_placeholder(frame: &mut RenderFrame, area: Rect) {
    frame.push(Primitive::Text(TextPrimitive::new(
        NO_DATA_TEXT,
        area.center().x,
        centered_text_top(area.y0, area.height(), NO_DATA_FONT_SIZE_PX),
        NO_DATA_FONT_SIZE_PX,
        Color::GRAY,
        TextHAlign::Center,
    )));
}

/// Truncates `text` with a trailing ellipsis so it fits `max_width`.
///
/// Returns an empty string when not even the ellipsis fits.
pub(crate) fn ellipsize(text: &str, font_size_px: f64, max_width: f64) -> String {
    if estimate_label_text_width_px(text, font_size_px) <= max_width {
        return text.to_owned();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let mut candidate: String = chars.iter().collect();
        candidate.push('…');
        if estimate_label_text_width_px(&candidate, font_size_px) <= max_width {
            return candidate;
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::{centered_text_top, ellipsize, estimate_label_text_width_px};

    #[test]
    fn short_text_is_kept() {
        assert_eq!(ellipsize("Sales", 16.0, 500.0), "Sales");
    }

    #[test]
    fn long_text_gets_an_ellipsis() {
        let title = ellipsize("A very long chart title indeed", 16.0, 120.0);
        assert!(title.ends_with('…'));
        assert!(estimate_label_text_width_px(&title, 16.0) <= 120.0);
    }

    #[test]
    fn nothing_fits_in_zero_width() {
        assert_eq!(ellipsize("Sales", 16.0, 0.0), "");
    }

    #[test]
    fn text_is_centered_in_its_band() {
        assert_eq!(centered_text_top(10.0, 48.0, 16.0), 26.0);
    }
}
