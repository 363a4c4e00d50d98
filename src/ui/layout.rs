use crate::buffer::NibbleHalf;
use crate::config::ViewConfig;

/// 行ヘッダー "0x%08X" (10文字) + " | " の幅
pub const LEFT_MARGIN: usize = 13;

/// バッファ位置と画面座標の対応（状態を持たない）
///
/// 1バイトはHEX 2文字、`bytes_per_group` バイトごとに空白1文字が入る。
/// グループ区切りは行内の位置で決まるので、行幅がグループ幅の倍数でなくても
/// 描画とカーソル位置がずれない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMapper {
    bytes_per_line: usize,
    bytes_per_group: usize,
}

impl LayoutMapper {
    pub fn new(bytes_per_line: usize, bytes_per_group: usize) -> Self {
        let bytes_per_line = bytes_per_line.max(1);
        Self {
            bytes_per_line,
            bytes_per_group: bytes_per_group.clamp(1, bytes_per_line),
        }
    }

    pub fn from_config(config: &ViewConfig) -> Self {
        Self::new(config.bytes_per_line(), config.bytes_per_group())
    }

    pub fn bytes_per_line(&self) -> usize {
        self.bytes_per_line
    }

    pub fn bytes_per_group(&self) -> usize {
        self.bytes_per_group
    }

    /// 行内位置 x のバイトのHEX列（上位ニブル）
    pub fn hex_column(&self, x: usize) -> usize {
        x * 2 + x / self.bytes_per_group + LEFT_MARGIN
    }

    /// オフセット → (行, 列)
    pub fn offset_to_row_col(&self, offset: usize, half: NibbleHalf) -> (usize, usize) {
        let x = offset % self.bytes_per_line;
        (self.line_of(offset), self.hex_column(x) + half.column_adjust())
    }

    /// (行, 列) → オフセット。HEX欄の外や区切り空白は None
    pub fn row_col_to_offset(&self, row: usize, col: usize) -> Option<(usize, NibbleHalf)> {
        let rel = col.checked_sub(LEFT_MARGIN)?;
        let group_width = self.bytes_per_group * 2 + 1;
        let group = rel / group_width;
        let within = rel % group_width;
        if within == self.bytes_per_group * 2 {
            return None;
        }
        let x = group * self.bytes_per_group + within / 2;
        if x >= self.bytes_per_line {
            return None;
        }
        let half = if within % 2 == 0 { NibbleHalf::High } else { NibbleHalf::Low };
        Some((self.row_to_line_start_offset(row) + x, half))
    }

    pub fn row_to_line_start_offset(&self, row: usize) -> usize {
        row * self.bytes_per_line
    }

    /// 行末オフセット（排他的）
    pub fn line_end_offset(&self, row: usize, len: usize) -> usize {
        len.min((row + 1) * self.bytes_per_line)
    }

    pub fn line_of(&self, offset: usize) -> usize {
        offset / self.bytes_per_line
    }

    pub fn line_count(&self, len: usize) -> usize {
        len.div_ceil(self.bytes_per_line)
    }

    /// このバイトの前にグループ区切りの空白が入るか
    pub fn starts_group(&self, x: usize) -> bool {
        x != 0 && x % self.bytes_per_group == 0
    }

    /// ASCII欄（区切り "| "）の開始列
    pub fn ascii_column(&self) -> usize {
        LEFT_MARGIN + self.bytes_per_line * 2 + (self.bytes_per_line - 1) / self.bytes_per_group + 1
    }
}

impl Default for LayoutMapper {
    fn default() -> Self {
        Self::from_config(&ViewConfig::default())
    }
}
