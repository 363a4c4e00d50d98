use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, warn};

use super::{Action, CommandError, EditMode, Prompt, PromptKind};
use crate::buffer::{BufferError, Cursor, Document};
use crate::config::ViewConfig;
use crate::number::parse_int;
use crate::ui::{HexView, LayoutMapper, Popup, ScrollWindow, POPUP_WIDTH};
use crate::{PROG_NAME, VERSION};

/// タイトル行 + ステータス2行 + コマンド一覧
const CHROME_ROWS: u16 = 4;

/// 最初の描画で端末サイズが分かるまで仮定する行数
const INITIAL_TERMINAL_ROWS: u16 = 24;

const COMMANDS_HELP: &str = "Commands: 'Q'uit 'S'ave 'G'oto 'R'esize 'A'scii_mode 'B'atch_insert";

/// 端末の行数からエディタ部分の行数を求める
pub fn editor_rows(terminal_rows: u16) -> usize {
    terminal_rows.saturating_sub(CHROME_ROWS).max(1) as usize
}

/// 編集セッションの状態
///
/// バッファ、カーソル、スクロール位置、モード、プロンプトをまとめて所有する。
/// 入力はすべて [`App::handle_key`] を通り、描画は [`App::draw`] で行う。
#[derive(Debug)]
pub struct App {
    /// 編集中のドキュメント
    document: Document,
    /// カーソル位置
    cursor: Cursor,
    /// 表示開始行
    window: ScrollWindow,
    /// 座標の対応
    layout: LayoutMapper,
    /// ASCII欄を表示するか
    show_ascii: bool,
    /// 表示可能な行数
    visible_rows: usize,
    /// 入力モード
    mode: EditMode,
    /// 入力中のプロンプト
    prompt: Option<Prompt>,
    /// ステータスメッセージ（直前のコマンドの結果）
    status: String,
    /// 終了フラグ
    should_quit: bool,
}

impl App {
    /// 新しいアプリケーションを作成
    pub fn new(document: Document, config: ViewConfig) -> Self {
        Self {
            document,
            cursor: Cursor::new(),
            window: ScrollWindow::new(),
            layout: LayoutMapper::from_config(&config),
            show_ascii: config.show_ascii(),
            visible_rows: editor_rows(INITIAL_TERMINAL_ROWS),
            mode: EditMode::Binary,
            prompt: None,
            status: String::new(),
            should_quit: false,
        }
    }

    /// ファイルを開く（存在しなければ新規バッファ）
    pub fn open(path: impl Into<PathBuf>, config: ViewConfig) -> Result<Self, BufferError> {
        Ok(Self::new(Document::open(path)?, config))
    }

    /// 終了すべきかどうか
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// 変更されているかどうか
    pub fn is_modified(&self) -> bool {
        self.document.is_modified()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn window(&self) -> ScrollWindow {
        self.window
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// 端末サイズが変わったとき（行数からエディタ部分を再計算）
    pub fn on_viewport_resized(&mut self, rows: u16, cols: u16) {
        self.visible_rows = editor_rows(rows);
        debug!(rows, cols, visible_rows = self.visible_rows, "viewport resized");
        self.ensure_cursor_visible();
    }

    /// カーソル位置が表示範囲内になるようにスクロール
    fn ensure_cursor_visible(&mut self) {
        self.window
            .ensure_visible(self.cursor.offset(), self.visible_rows, self.layout.bytes_per_line());
    }

    /// イベントを1つ待って処理
    pub fn handle_event(&mut self) -> Result<()> {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(cols, rows) => self.on_viewport_resized(rows, cols),
            _ => {}
        }
        Ok(())
    }

    /// キー入力を処理
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
        } else {
            let action = Action::from_key(key, self.mode);
            self.execute(action);
        }
        self.ensure_cursor_visible();
    }

    /// アクションを実行
    pub fn execute(&mut self, action: Action) {
        let len = self.document.len();
        let bytes_per_line = self.layout.bytes_per_line();

        match action {
            Action::Quit => {
                if self.document.is_modified() {
                    self.open_prompt(PromptKind::SaveOnQuit);
                } else {
                    self.should_quit = true;
                }
            }
            Action::ForceQuit => {
                info!("interrupted, quitting without saving");
                self.should_quit = true;
            }
            Action::Save => {
                self.save();
            }
            Action::CursorUp => self.cursor.move_up(bytes_per_line),
            Action::CursorDown => self.cursor.move_down(bytes_per_line, len),
            Action::CursorLeft => self.cursor.move_left(),
            Action::CursorRight => self.cursor.move_right(len),
            Action::StartResize => self.open_prompt(PromptKind::Resize),
            Action::StartGoto => self.open_prompt(PromptKind::Goto),
            Action::StartBatchInsert => self.open_prompt(PromptKind::BatchValue),
            Action::EnterAscii => {
                self.mode = EditMode::Ascii;
                self.cursor.jump_to(self.cursor.offset(), len);
                self.status = "ASCII mode enabled. Press END to disable.".to_string();
                debug!("ascii mode on");
            }
            Action::ExitAscii => {
                self.mode = EditMode::Binary;
                self.status = "ASCII mode disabled.".to_string();
                debug!("ascii mode off");
            }
            Action::InputHex(digit) => {
                let result = self.cursor.write_nibble(&mut self.document, digit);
                self.report(result.map_err(CommandError::from));
            }
            Action::InputAscii(byte) => {
                let result = self.cursor.write_ascii_byte(&mut self.document, byte);
                self.report(result.map_err(CommandError::from));
            }
            Action::Backspace => {
                let result = self.cursor.backspace_ascii(&mut self.document);
                self.report(result.map_err(CommandError::from));
            }
            Action::None => {}
        }
    }

    /// 失敗したコマンドをステータスに表示（状態は変えない）
    fn report(&mut self, result: Result<(), CommandError>) {
        if let Err(e) = result {
            warn!(error = %e, "command rejected");
            self.status = e.to_string();
        }
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        debug!(?kind, "prompt opened");
        self.prompt = Some(Prompt::new(kind));
    }

    /// プロンプト入力中のキー処理（通常のキー割り当ては止まる）
    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            // C-c はプロンプト中でも終了
            KeyCode::Char('c') if ctrl => self.execute(Action::ForceQuit),
            KeyCode::Enter => self.submit_prompt(),
            KeyCode::Backspace => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.input.pop();
                }
            }
            KeyCode::Char(ch) if !ctrl => {
                // 入力欄の幅まで
                if let Some(prompt) = self.prompt.as_mut() {
                    if prompt.input.chars().count() < (POPUP_WIDTH - 2) as usize {
                        prompt.input.push(ch);
                    }
                }
            }
            _ => {}
        }
    }

    /// プロンプト入力を実行
    fn submit_prompt(&mut self) {
        let Some(Prompt { kind, input }) = self.prompt.take() else {
            return;
        };
        debug!(?kind, input = %input, "prompt submitted");

        let result = match kind {
            PromptKind::Resize => self.resize(&input),
            PromptKind::Goto => self.goto(&input),
            PromptKind::BatchValue => self.batch_value(&input),
            PromptKind::BatchCount(value) => self.batch_fill(value, &input),
            PromptKind::SaveOnQuit => {
                self.confirm_quit(&input);
                Ok(())
            }
        };
        self.report(result);
    }

    /// resize コマンド: バッファのサイズを変更してカーソルを先頭へ戻す
    fn resize(&mut self, input: &str) -> Result<(), CommandError> {
        let size = parse_int(input)
            .filter(|&n| n > 0)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(CommandError::InvalidSize)?;

        self.document.resize(size)?;
        self.cursor.reset();
        self.window.reset();
        info!(size, "buffer resized");
        self.status = format!("Buffer resized to 0x{:X} / {}", size, size);
        Ok(())
    }

    /// goto コマンド: 指定位置へ移動（末尾にクランプ）
    fn goto(&mut self, input: &str) -> Result<(), CommandError> {
        let target = parse_int(input)
            .filter(|&n| n >= 0)
            .ok_or(CommandError::InvalidOffset)?;
        let target = usize::try_from(target).unwrap_or(usize::MAX);

        self.cursor.jump_to(target, self.document.len());
        self.status = "Moved cursor".to_string();
        Ok(())
    }

    /// batch insert の1段目: 埋める値
    fn batch_value(&mut self, input: &str) -> Result<(), CommandError> {
        if input.trim().is_empty() {
            return Err(CommandError::InvalidValue("Empty string."));
        }
        let value = parse_int(input)
            .and_then(|n| u8::try_from(n).ok())
            .ok_or(CommandError::InvalidValue("Bad character value."))?;

        self.open_prompt(PromptKind::BatchCount(value));
        Ok(())
    }

    /// batch insert の2段目: カーソル位置から count バイトを埋める
    fn batch_fill(&mut self, value: u8, input: &str) -> Result<(), CommandError> {
        if input.trim().is_empty() {
            return Err(CommandError::InvalidValue("Empty string."));
        }
        let count = parse_int(input)
            .filter(|&n| n >= 0)
            .ok_or(CommandError::InvalidValue("Bad value."))?;
        let count = usize::try_from(count).unwrap_or(usize::MAX);

        let offset = self.cursor.offset();
        let written = self.document.fill_range(offset, value, count);
        // バイト単位の書き込みなので上位ニブルから
        self.cursor.jump_to(offset, self.document.len());
        debug!(offset, value, written, "batch insert");
        self.status = format!("Character 0x{:02x} inserted", value);
        Ok(())
    }

    /// 保存確認への応答（n 以外は保存）
    fn confirm_quit(&mut self, answer: &str) {
        let skip_save = matches!(answer.trim_start().chars().next(), Some('n' | 'N'));
        if skip_save {
            info!("quitting without saving");
            self.should_quit = true;
        } else if self.save() {
            self.should_quit = true;
        }
    }

    /// 保存（結果はステータスに表示）
    fn save(&mut self) -> bool {
        let name = self
            .document
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        match self.document.save() {
            Ok(()) => {
                self.status = format!("Buffer saved to {}", name);
                true
            }
            Err(e) => {
                warn!(error = %e, path = %name, "save failed");
                self.status = format!("Error: Couldn't save to {}", name);
                false
            }
        }
    }

    /// UIを描画
    pub fn draw(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // タイトル
                Constraint::Min(1),    // エディタ
                Constraint::Length(2), // ステータス
                Constraint::Length(1), // コマンド一覧
            ])
            .split(size);

        self.visible_rows = (layout[1].height as usize).max(1);
        self.ensure_cursor_visible();

        let reversed = Style::default().add_modifier(Modifier::REVERSED);

        // タイトル
        let filename = self
            .document
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "[New]".to_string());
        let modified = if self.document.is_modified() { " [+]" } else { "" };
        let title = format!("   {} v{} - {}{}", PROG_NAME, VERSION, filename, modified);
        frame.render_widget(Paragraph::new(title).style(reversed), layout[0]);

        // HEXビュー
        let hex_view = HexView::new(self.document.data())
            .layout(self.layout)
            .window(self.window)
            .cursor(self.cursor)
            .show_ascii(self.show_ascii);
        let cursor_position = hex_view.cursor_position(layout[1]);
        frame.render_widget(hex_view, layout[1]);

        // ステータス
        let offset = self.cursor.offset();
        let len = self.document.len();
        let mode = match self.mode {
            EditMode::Binary => "",
            EditMode::Ascii => " [ASCII]",
        };
        let status = vec![
            Line::from(format!(
                " Position: 0x{:X} / {} of 0x{:X} / {} bytes{}",
                offset, offset, len, len, mode
            )),
            Line::from(format!(" Status  : {}", self.status)),
        ];
        frame.render_widget(Paragraph::new(status).style(reversed), layout[2]);
        frame.render_widget(Paragraph::new(format!(" {}", COMMANDS_HELP)).style(reversed), layout[3]);

        // プロンプト
        if let Some(prompt) = &self.prompt {
            let area = Popup::area(size);
            let popup = Popup::new(prompt.kind.title(), &prompt.input);
            frame.set_cursor_position(popup.cursor_position(area));
            frame.render_widget(popup, area);
        } else if let Some(position) = cursor_position {
            frame.set_cursor_position(position);
        }
    }
}
