use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    widgets::{Clear, Widget},
};

pub const POPUP_WIDTH: u16 = 36;
pub const POPUP_HEIGHT: u16 = 3;

/// 入力プロンプト（画面中央の小さな窓）
pub struct Popup<'a> {
    title: &'a str,
    input: &'a str,
}

impl<'a> Popup<'a> {
    pub fn new(title: &'a str, input: &'a str) -> Self {
        Self { title, input }
    }

    /// 画面中央の領域
    pub fn area(screen: Rect) -> Rect {
        let width = POPUP_WIDTH.min(screen.width);
        let height = POPUP_HEIGHT.min(screen.height);
        Rect {
            x: screen.x + (screen.width - width) / 2,
            y: screen.y + (screen.height - height) / 2,
            width,
            height,
        }
    }

    /// 入力欄で表示できる文字数
    fn input_width(area: Rect) -> usize {
        area.width.saturating_sub(2) as usize
    }

    /// 入力の末尾に端末カーソルを置く
    pub fn cursor_position(&self, area: Rect) -> Position {
        let shown = self.input.chars().count().min(Self::input_width(area).saturating_sub(1));
        Position::new(area.x + 1 + shown as u16, area.y + 1)
    }
}

impl Widget for Popup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let reversed = Style::default().add_modifier(Modifier::REVERSED);

        // 枠（反転表示の空白）
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let on_border = y == area.top() || y + 1 == area.bottom() || x == area.left() || x + 1 == area.right();
                if on_border {
                    buf[(x, y)].set_symbol(" ").set_style(reversed);
                }
            }
        }

        let width = Self::input_width(area);
        buf.set_stringn(area.x + 1, area.y, self.title, width, reversed);

        if area.height > 1 {
            // 入力が長い場合は末尾を表示
            let skip = self.input.chars().count().saturating_sub(width.saturating_sub(1));
            let visible: String = self.input.chars().skip(skip).collect();
            buf.set_stringn(area.x + 1, area.y + 1, &visible, width, Style::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_area() {
        let area = Popup::area(Rect::new(0, 0, 80, 24));
        assert_eq!(area, Rect::new(22, 10, 36, 3));

        let small = Popup::area(Rect::new(0, 0, 20, 2));
        assert_eq!(small, Rect::new(0, 0, 20, 2));
    }

    #[test]
    fn test_render_title_and_input() {
        let area = Rect::new(0, 0, 36, 3);
        let mut buf = Buffer::empty(area);
        let popup = Popup::new("Goto:", "0x20");
        assert_eq!(popup.cursor_position(area), Position::new(5, 1));
        popup.render(area, &mut buf);

        let title: String = (1..6).map(|x| buf[(x, 0)].symbol()).collect();
        assert_eq!(title, "Goto:");
        assert!(buf[(1, 0)].modifier.contains(Modifier::REVERSED));
        let input: String = (1..5).map(|x| buf[(x, 1)].symbol()).collect();
        assert_eq!(input, "0x20");
        assert!(!buf[(1, 1)].modifier.contains(Modifier::REVERSED));
    }
}
