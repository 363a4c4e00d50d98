use std::fs;

use binny::app::App;
use binny::buffer::NibbleHalf;
use binny::config::ViewConfig;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_str(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

fn submit(app: &mut App, text: &str) {
    type_str(app, text);
    press(app, KeyCode::Enter);
}

#[test]
fn test_edit_and_save_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.bin");
    fs::write(&path, vec![0u8; 32]).unwrap();

    let mut app = App::open(&path, ViewConfig::default()).unwrap();
    assert!(!app.is_modified());

    type_str(&mut app, "41");
    assert_eq!(app.cursor().offset(), 1);
    assert_eq!(app.cursor().half(), NibbleHalf::High);

    press(&mut app, KeyCode::Char('S'));
    assert!(!app.is_modified());
    assert!(app.status().starts_with("Buffer saved to"));

    let on_disk = fs::read(&path).unwrap();
    assert_eq!(on_disk.len(), 32);
    assert_eq!(on_disk[0], 0x41);
}

#[test]
fn test_missing_file_starts_with_default_buffer() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("new.bin");

    let mut app = App::open(&path, ViewConfig::default()).unwrap();
    assert_eq!(app.document().data(), &[0u8; 16]);
    assert!(app.is_modified());

    press(&mut app, KeyCode::Char('Q'));
    submit(&mut app, "y");
    assert!(app.should_quit());
    assert_eq!(fs::read(&path).unwrap(), vec![0u8; 16]);
}

#[test]
fn test_resize_then_save_truncates_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.bin");
    fs::write(&path, (0u8..32).collect::<Vec<_>>()).unwrap();

    let mut app = App::open(&path, ViewConfig::default()).unwrap();
    press(&mut app, KeyCode::Char('G'));
    submit(&mut app, "20");
    press(&mut app, KeyCode::Char('R'));
    submit(&mut app, "8");
    assert_eq!(app.document().len(), 8);
    assert_eq!(app.cursor().offset(), 0);

    press(&mut app, KeyCode::Char('S'));
    assert_eq!(fs::read(&path).unwrap(), (0u8..8).collect::<Vec<_>>());
}

#[test]
fn test_quit_without_saving_keeps_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.bin");
    fs::write(&path, b"original").unwrap();

    let mut app = App::open(&path, ViewConfig::default()).unwrap();
    press(&mut app, KeyCode::Char('A'));
    type_str(&mut app, "CHANGED!");
    press(&mut app, KeyCode::End);
    press(&mut app, KeyCode::Char('Q'));
    submit(&mut app, "n");

    assert!(app.should_quit());
    assert_eq!(fs::read(&path).unwrap(), b"original");
}

#[test]
fn test_save_failure_keeps_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no-such-dir").join("data.bin");

    let mut app = App::open(&path, ViewConfig::default()).unwrap();
    press(&mut app, KeyCode::Char('S'));
    assert!(app.is_modified());
    assert!(app.status().starts_with("Error: Couldn't save to"));

    // 終了時の保存に失敗したら終了しない
    press(&mut app, KeyCode::Char('Q'));
    submit(&mut app, "Y");
    assert!(!app.should_quit());
    assert!(app.is_modified());
}

#[test]
fn test_open_directory_is_fatal() {
    let dir = TempDir::new().unwrap();
    assert!(App::open(dir.path(), ViewConfig::default()).is_err());
}

#[test]
fn test_batch_insert_is_clipped_at_end() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.bin");
    fs::write(&path, vec![0u8; 10]).unwrap();

    let mut app = App::open(&path, ViewConfig::new(4, 2, true).unwrap()).unwrap();
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    assert_eq!(app.cursor().offset(), 8);
    press(&mut app, KeyCode::Char('B'));
    submit(&mut app, "255");
    submit(&mut app, "1000");

    press(&mut app, KeyCode::Char('S'));
    let on_disk = fs::read(&path).unwrap();
    assert_eq!(on_disk.len(), 10);
    assert_eq!(&on_disk[8..], &[0xFF, 0xFF]);
    assert!(on_disk[..8].iter().all(|&b| b == 0));
}
