//! binny - A simple in-place binary editor
//!
//! This library holds the editing core (byte buffer, cursor, layout, scrolling,
//! input state machine) and the ratatui widgets used by the `binny` binary.

pub mod app;
pub mod buffer;
pub mod config;
pub mod number;
pub mod ui;

pub const PROG_NAME: &str = "binny";
pub const VERSION: &str = "1.1";
