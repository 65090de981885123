const ELLIPSIS: char = '\u{2026}';

pub(super) fn char_width_factor(ch: char) -> f32 {
    // Rough proportional widths for a sans-serif stack, in ems.
    match ch {
        ' ' => 0.306,
        '.' | ',' | ':' | ';' | '|' | '!' | '\'' | '(' | ')' | '[' | ']' => 0.321,
        'i' | 'j' | 'l' | 'I' => 0.25,
        'f' | 't' | 'r' => 0.35,
        'm' | 'w' => 0.84,
        'M' | 'W' => 0.93,
        ch if ch.is_ascii_digit() => 0.556,
        ch if ch.is_ascii_uppercase() => 0.68,
        ch if ch.is_ascii_lowercase() => 0.56,
        ch if ch.is_ascii() => 0.5,
        // CJK and other wide glyphs.
        _ => 1.0,
    }
}

pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

/// Shortens `text` with a trailing ellipsis until it fits `max_width`.
pub fn fit_text(text: &str, max_width: f32, font_size: f32) -> String {
    if text_width(text, font_size) <= max_width {
        return text.to_string();
    }
    let budget = max_width - char_width_factor(ELLIPSIS) * font_size;
    if budget <= 0.0 {
        return String::new();
    }
    let mut width = 0.0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = char_width_factor(ch) * font_size;
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    let trimmed = out.trim_end();
    if trimmed.is_empty() {
        return String::new();
    }
    format!("{trimmed}{ELLIPSIS}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(fit_text("Auth", 200.0, 13.0), "Auth");
    }

    #[test]
    fn long_text_gets_an_ellipsis() {
        let fitted = fit_text("A very long roadmap item title", 80.0, 13.0);
        assert!(fitted.ends_with(ELLIPSIS));
        assert!(text_width(&fitted, 13.0) <= 80.0);
    }

    #[test]
    fn no_room_yields_empty() {
        assert_eq!(fit_text("Anything", 5.0, 13.0), "");
    }
}
