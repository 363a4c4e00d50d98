mod state;

pub use state::{App, editor_rows};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::buffer::BufferError;

/// 編集モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// HEX入力（ニブル単位）
    #[default]
    Binary,
    /// 文字をそのままバイトとして入力
    Ascii,
}

/// プロンプトの種類（1行入力を待つコマンド）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Resize,
    Goto,
    /// 埋めるバイト値の入力
    BatchValue,
    /// 埋める個数の入力（値は入力済み）
    BatchCount(u8),
    /// 終了前の保存確認
    SaveOnQuit,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            PromptKind::Resize => "Resize Buffer to:",
            PromptKind::Goto => "Goto:",
            PromptKind::BatchValue => "Batch Insert Character Value:",
            PromptKind::BatchCount(_) => "Number to Insert:",
            PromptKind::SaveOnQuit => "Buffer is modified. Save? [Y/n]",
        }
    }
}

/// 入力中のプロンプト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
        }
    }
}

/// コマンド実行時のエラー（ステータス行に表示される）
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Error: invalid number")]
    InvalidSize,
    #[error("Error: invalid number")]
    InvalidOffset,
    #[error("Error: {0}")]
    InvalidValue(&'static str),
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// アプリケーションアクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// 保存確認なしで終了 (C-c)
    ForceQuit,
    Save,

    // カーソル移動
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,

    // プロンプト付きコマンド
    StartResize,
    StartGoto,
    StartBatchInsert,

    // モード切替
    EnterAscii,
    ExitAscii,

    // 編集
    InputHex(u8),
    InputAscii(u8),
    Backspace,

    None,
}

impl Action {
    /// キー入力をアクションに変換（モードごとに解釈が変わる）
    pub fn from_key(key: KeyEvent, mode: EditMode) -> Self {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match (key.code, ctrl, alt) {
            (KeyCode::Char('c'), true, false) => return Action::ForceQuit,
            (_, true, _) | (_, _, true) => return Action::None,
            (KeyCode::Up, ..) => return Action::CursorUp,
            (KeyCode::Down, ..) => return Action::CursorDown,
            (KeyCode::Left, ..) => return Action::CursorLeft,
            (KeyCode::Right, ..) => return Action::CursorRight,
            _ => {}
        }

        match mode {
            EditMode::Binary => match key.code {
                KeyCode::Char('Q') => Action::Quit,
                KeyCode::Char('S') => Action::Save,
                KeyCode::Char('G') => Action::StartGoto,
                KeyCode::Char('R') => Action::StartResize,
                KeyCode::Char('A') => Action::EnterAscii,
                KeyCode::Char('B') => Action::StartBatchInsert,
                // 大文字は上のコマンドと衝突するので小文字のみ
                KeyCode::Char(c @ ('0'..='9' | 'a'..='f')) => {
                    c.to_digit(16).map_or(Action::None, |d| Action::InputHex(d as u8))
                }
                _ => Action::None,
            },
            EditMode::Ascii => match key.code {
                KeyCode::End => Action::ExitAscii,
                KeyCode::Backspace => Action::Backspace,
                KeyCode::Char(c @ ' '..='~') => Action::InputAscii(c as u8),
                _ => Action::None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_hex_digits_map_to_values() {
        assert_eq!(Action::from_key(key(KeyCode::Char('0')), EditMode::Binary), Action::InputHex(0));
        assert_eq!(Action::from_key(key(KeyCode::Char('9')), EditMode::Binary), Action::InputHex(9));
        assert_eq!(Action::from_key(key(KeyCode::Char('a')), EditMode::Binary), Action::InputHex(10));
        assert_eq!(Action::from_key(key(KeyCode::Char('f')), EditMode::Binary), Action::InputHex(15));
        assert_eq!(Action::from_key(key(KeyCode::Char('g')), EditMode::Binary), Action::None);
    }

    #[test]
    fn test_binary_commands() {
        let shifted = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT);
        assert_eq!(Action::from_key(shifted('Q'), EditMode::Binary), Action::Quit);
        assert_eq!(Action::from_key(shifted('S'), EditMode::Binary), Action::Save);
        assert_eq!(Action::from_key(shifted('G'), EditMode::Binary), Action::StartGoto);
        assert_eq!(Action::from_key(shifted('R'), EditMode::Binary), Action::StartResize);
        assert_eq!(Action::from_key(shifted('A'), EditMode::Binary), Action::EnterAscii);
        assert_eq!(Action::from_key(shifted('B'), EditMode::Binary), Action::StartBatchInsert);
        assert_eq!(Action::from_key(key(KeyCode::End), EditMode::Binary), Action::None);
    }

    #[test]
    fn test_ascii_mode_keys() {
        assert_eq!(Action::from_key(key(KeyCode::Char('Q')), EditMode::Ascii), Action::InputAscii(b'Q'));
        assert_eq!(Action::from_key(key(KeyCode::Char('3')), EditMode::Ascii), Action::InputAscii(b'3'));
        assert_eq!(Action::from_key(key(KeyCode::End), EditMode::Ascii), Action::ExitAscii);
        assert_eq!(Action::from_key(key(KeyCode::Backspace), EditMode::Ascii), Action::Backspace);
        assert_eq!(Action::from_key(key(KeyCode::Char('é')), EditMode::Ascii), Action::None);
    }

    #[test]
    fn test_arrows_and_ctrl_c_in_both_modes() {
        for mode in [EditMode::Binary, EditMode::Ascii] {
            assert_eq!(Action::from_key(key(KeyCode::Up), mode), Action::CursorUp);
            assert_eq!(Action::from_key(key(KeyCode::Right), mode), Action::CursorRight);
            let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
            assert_eq!(Action::from_key(ctrl_c, mode), Action::ForceQuit);
            let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
            assert_eq!(Action::from_key(ctrl_a, mode), Action::None);
        }
    }
}
