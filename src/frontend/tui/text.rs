//! Text helpers shared by the card, table and chart renderers.

use ratatui::{buffer::Buffer, layout::Rect, style::Style};

/// Greedy word wrap by character count. Words longer than `width` are
/// split. Always returns at least one (possibly empty) line.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > width && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }
    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Cut `text` to `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: u16) -> String {
    let width = usize::from(width);
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Write `text` at `(x, y)` clipped to `area`. Returns the column after
/// the last written character.
pub fn put(buf: &mut Buffer, area: Rect, x: u16, y: u16, text: &str, style: Style) -> u16 {
    let area = area.intersection(buf.area);
    if x < area.left() || y < area.top() || y >= area.bottom() || x >= area.right() {
        return x;
    }
    let max = usize::from(area.right() - x);
    let (end, _) = buf.set_stringn(x, y, text, max, style);
    end
}

/// Paint the background of every cell in `area`.
pub fn fill(buf: &mut Buffer, area: Rect, style: Style) {
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            buf[(x, y)].set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_breaks_on_words() {
        assert_eq!(
            wrap_text("La más baja en 19 años", 10),
            vec!["La más", "baja en 19", "años"]
        );
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_wrap_empty_text_is_one_line() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn test_truncate_marks_cut() {
        assert_eq!(truncate("Barranquilla", 6), "Barra…");
        assert_eq!(truncate("Cali", 6), "Cali");
        assert_eq!(truncate("Cali", 0), "");
    }

    #[test]
    fn test_put_clips_to_area() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        let area = Rect::new(0, 0, 4, 1);
        put(&mut buf, area, 1, 0, "Santiago", Style::default());
        assert_eq!(buf[(1, 0)].symbol(), "S");
        assert_eq!(buf[(3, 0)].symbol(), "n");
        assert_eq!(buf[(4, 0)].symbol(), " ");
    }
}
