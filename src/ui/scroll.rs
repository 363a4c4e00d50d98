/// 表示中の先頭行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollWindow {
    top_line: usize,
}

impl ScrollWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    pub fn reset(&mut self) {
        self.top_line = 0;
    }

    /// カーソル行が `[top_line, top_line + visible_rows)` に入るようにスクロール
    pub fn ensure_visible(&mut self, cursor_offset: usize, visible_rows: usize, bytes_per_line: usize) {
        let visible_rows = visible_rows.max(1);
        let cursor_line = cursor_offset / bytes_per_line.max(1);

        if cursor_line < self.top_line {
            self.top_line = cursor_line;
        } else if cursor_line >= self.top_line + visible_rows {
            self.top_line = cursor_line + 1 - visible_rows;
        }
    }

    /// 行番号 → 画面上の行（表示範囲外は None）
    pub fn screen_row(&self, line: usize, visible_rows: usize) -> Option<usize> {
        line.checked_sub(self.top_line).filter(|&row| row < visible_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_down_keeps_cursor_on_last_row() {
        let mut window = ScrollWindow::new();
        window.ensure_visible(16 * 10, 4, 16);
        assert_eq!(window.top_line(), 7);
        assert_eq!(window.screen_row(10, 4), Some(3));
    }

    #[test]
    fn test_scroll_up_to_cursor_line() {
        let mut window = ScrollWindow { top_line: 20 };
        window.ensure_visible(35, 4, 16);
        assert_eq!(window.top_line(), 2);
    }

    #[test]
    fn test_no_scroll_when_visible() {
        let mut window = ScrollWindow { top_line: 3 };
        window.ensure_visible(16 * 5, 4, 16);
        assert_eq!(window.top_line(), 3);
    }

    #[test]
    fn test_zero_rows_still_shows_cursor() {
        let mut window = ScrollWindow::new();
        window.ensure_visible(16 * 9, 0, 16);
        assert_eq!(window.top_line(), 9);
    }

    #[test]
    fn test_cursor_always_visible() {
        let mut window = ScrollWindow::new();
        for rows in 1..6 {
            for offset in [0, 5, 63, 200, 17, 1000, 3] {
                window.ensure_visible(offset, rows, 8);
                let line = offset / 8;
                assert!(window.top_line() <= line && line < window.top_line() + rows);
            }
        }
    }

    #[test]
    fn test_screen_row_outside_window() {
        let window = ScrollWindow { top_line: 5 };
        assert_eq!(window.screen_row(4, 3), None);
        assert_eq!(window.screen_row(8, 3), None);
        assert_eq!(window.screen_row(7, 3), Some(2));
    }
}
