use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    widgets::Widget,
};

use super::{LayoutMapper, ScrollWindow, SEPARATOR};
use crate::buffer::Cursor;

/// HEX/ASCII表示ウィジェット
///
/// 1行: `0x%08X | xx xx xx xx  ...  | ascii`
pub struct HexView<'a> {
    /// 表示するデータ
    data: &'a [u8],
    /// 座標の対応
    layout: LayoutMapper,
    /// 表示位置
    window: ScrollWindow,
    /// カーソル
    cursor: Cursor,
    /// ASCII欄を表示するか
    show_ascii: bool,
}

impl<'a> HexView<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            layout: LayoutMapper::default(),
            window: ScrollWindow::new(),
            cursor: Cursor::default(),
            show_ascii: false,
        }
    }

    pub fn layout(mut self, layout: LayoutMapper) -> Self {
        self.layout = layout;
        self
    }

    pub fn window(mut self, window: ScrollWindow) -> Self {
        self.window = window;
        self
    }

    pub fn cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn show_ascii(mut self, show: bool) -> Self {
        self.show_ascii = show;
        self
    }

    /// 端末カーソルを置く位置（表示範囲外なら None）
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        let (line, col) = self.layout.offset_to_row_col(self.cursor.offset(), self.cursor.half());
        let row = self.window.screen_row(line, area.height as usize)?;
        if col >= area.width as usize {
            return None;
        }
        Some(Position::new(area.x + col as u16, area.y + row as u16))
    }

    /// ASCII表示用の文字（表示できないバイトは '.'）
    fn printable(byte: u8) -> char {
        if (0x20..=0x7E).contains(&byte) { byte as char } else { '.' }
    }

    /// 1行分のデータを描画
    fn render_line(&self, line: usize, area: Rect, buf: &mut Buffer) {
        let start = self.layout.row_to_line_start_offset(line);
        let end = self.layout.line_end_offset(line, self.data.len());
        let y = area.y;
        let right = area.x + area.width;

        // 行ヘッダー
        let header = format!("0x{:08X}", start);
        buf.set_stringn(area.x, y, &header, area.width as usize, Style::default().add_modifier(Modifier::BOLD));
        let sep = format!(" {} ", SEPARATOR);
        let sep_x = area.x.saturating_add(header.len() as u16);
        if sep_x < right {
            buf.set_stringn(sep_x, y, &sep, (right - sep_x) as usize, Style::default());
        }

        // HEX表示
        for (x, byte) in self.data[start..end].iter().enumerate() {
            let col = area.x as usize + self.layout.hex_column(x);
            if col >= right as usize {
                break;
            }
            let hex = format!("{:02x}", byte);
            buf.set_stringn(col as u16, y, &hex, right as usize - col, Style::default());
        }

        if !self.show_ascii {
            return;
        }

        // ASCII表示
        let ascii_x = area.x as usize + self.layout.ascii_column();
        if ascii_x >= right as usize {
            return;
        }
        let gutter = format!("{} ", SEPARATOR);
        buf.set_stringn(ascii_x as u16, y, &gutter, right as usize - ascii_x, Style::default());

        for (x, &byte) in self.data[start..end].iter().enumerate() {
            let col = ascii_x + gutter.len() + x;
            if col >= right as usize {
                break;
            }
            let style = if start + x == self.cursor.offset() {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            buf.set_string(col as u16, y, Self::printable(byte).to_string(), style);
        }
    }
}

impl Widget for HexView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line_count = self.layout.line_count(self.data.len());
        for row in 0..area.height {
            let line = self.window.top_line() + row as usize;
            if line >= line_count {
                break;
            }
            let row_area = Rect {
                x: area.x,
                y: area.y + row,
                width: area.width,
                height: 1,
            };
            self.render_line(line, row_area, buf);
        }
    }
}
