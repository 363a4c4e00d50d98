use std::fs::File;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute, queue,
    terminal::{
        disable_raw_mode, enable_raw_mode, BeginSynchronizedUpdate, EndSynchronizedUpdate,
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use binny::app::App;
use binny::config::{ViewConfig, BYTES_PER_GROUP_DEFAULT, BYTES_PER_LINE_DEFAULT};
use binny::number::parse_positive;

const AFTER_HELP: &str = "\
Commands (issued with shift-<command key>):
  Q    quit - Exit the program
  S    save - Save the buffer to the file
  G    goto - Jump to a position in the buffer
  R    resize - Resize the current buffer
  A    ascii_mode - Type characters as bytes, END to leave
  B    batch_insert - Insert a value repeatedly";

/// A simple in-place binary editor
#[derive(Parser, Debug)]
#[command(name = "binny")]
#[command(author, version, about, long_about = None, after_help = AFTER_HELP)]
struct Args {
    /// File to edit (created on save if it does not exist)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Bytes displayed per line
    #[arg(short = 'l', long, value_name = "BYTES", default_value_t = BYTES_PER_LINE_DEFAULT, value_parser = parse_positive)]
    bytes_per_line: usize,

    /// Byte grouping (clamped to bytes per line)
    #[arg(short = 'g', long, value_name = "BYTES", default_value_t = BYTES_PER_GROUP_DEFAULT, value_parser = parse_positive)]
    bytes_per_group: usize,

    /// Show ASCII next to the hex bytes
    #[arg(short = 'a', long)]
    ascii: bool,

    /// Write log output to this file (filter with RUST_LOG)
    #[arg(long, value_name = "LOG_FILE")]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 画面を壊さないようにログはファイルにのみ出力
    if let Some(ref path) = args.log {
        init_logging(path)?;
    }

    let config = ViewConfig::new(args.bytes_per_line, args.bytes_per_group, args.ascii)?;

    // 端末を初期化する前に読み込む（読み込み失敗は起動エラー）
    let app = App::open(&args.file, config)
        .with_context(|| format!("Couldn't read {}", args.file.display()))?;

    // ターミナルの初期化
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // アプリケーションの実行
    let result = run_app(&mut terminal, app, &args.file);

    // ターミナルの後処理
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "session aborted");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// ログ出力を設定
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Couldn't create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("binny=info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Couldn't install logger: {}", e))?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App, file: &Path) -> Result<()> {
    // ウィンドウタイトルを設定
    execute!(terminal.backend_mut(), SetTitle(format!("binny - {}", file.display())))?;

    let size = terminal.size()?;
    app.on_viewport_resized(size.height, size.width);

    // メインループ
    loop {
        // Synchronized Update: 描画のちらつきを防止
        queue!(terminal.backend_mut(), BeginSynchronizedUpdate)?;
        terminal.draw(|f| app.draw(f))?;
        queue!(terminal.backend_mut(), EndSynchronizedUpdate)?;
        terminal.backend_mut().flush()?;

        app.handle_event()?;

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
