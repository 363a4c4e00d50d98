use super::{BufferError, Document};

/// 次のHEX入力が書き換えるニブル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NibbleHalf {
    #[default]
    High,
    Low,
}

impl NibbleHalf {
    /// 画面上の列補正（下位ニブル編集中は1文字右）
    pub fn column_adjust(self) -> usize {
        match self {
            NibbleHalf::High => 0,
            NibbleHalf::Low => 1,
        }
    }
}

/// カーソル（バイト位置 + ニブル選択）
///
/// 位置は常に `[0, len - 1]` に収まる。移動系はすべてバッファ長を受け取る。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    offset: usize,
    half: NibbleHalf,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn half(&self) -> NibbleHalf {
        self.half
    }

    /// 先頭・上位ニブルに戻す（リサイズ後）
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn last(len: usize) -> usize {
        len.saturating_sub(1)
    }

    pub fn move_left(&mut self) {
        self.offset = self.offset.saturating_sub(1);
        self.half = NibbleHalf::High;
    }

    pub fn move_right(&mut self, len: usize) {
        self.offset = (self.offset + 1).min(Self::last(len));
        self.half = NibbleHalf::High;
    }

    pub fn move_up(&mut self, bytes_per_line: usize) {
        self.offset = self.offset.saturating_sub(bytes_per_line);
        self.half = NibbleHalf::High;
    }

    pub fn move_down(&mut self, bytes_per_line: usize, len: usize) {
        self.offset = self.offset.saturating_add(bytes_per_line).min(Self::last(len));
        self.half = NibbleHalf::High;
    }

    /// 指定位置へジャンプ（末尾にクランプ）
    pub fn jump_to(&mut self, offset: usize, len: usize) {
        self.offset = offset.min(Self::last(len));
        self.half = NibbleHalf::High;
    }

    /// HEX 1桁を書き込む
    ///
    /// 上位ニブルを書いた後は同じバイトの下位ニブルへ、下位ニブルを書いた後は
    /// 次のバイトへ進む。1バイトの編集にはちょうど2回の入力が必要。
    pub fn write_nibble(&mut self, doc: &mut Document, digit: u8) -> Result<(), BufferError> {
        let digit = digit & 0x0F;
        let byte = doc.read_byte(self.offset)?;
        match self.half {
            NibbleHalf::High => {
                doc.set(self.offset, (byte & 0x0F) | (digit << 4))?;
                self.half = NibbleHalf::Low;
            }
            NibbleHalf::Low => {
                doc.set(self.offset, (byte & 0xF0) | digit)?;
                self.move_right(doc.len());
            }
        }
        Ok(())
    }

    /// 1バイトをそのまま書き込み、右へ進む
    pub fn write_ascii_byte(&mut self, doc: &mut Document, value: u8) -> Result<(), BufferError> {
        doc.set(self.offset, value)?;
        self.move_right(doc.len());
        Ok(())
    }

    /// 左へ移動してそのバイトを0にする
    pub fn backspace_ascii(&mut self, doc: &mut Document) -> Result<(), BufferError> {
        self.move_left();
        doc.set(self.offset, 0)
    }
}
