mod hex_view;
mod layout;
mod popup;
mod scroll;

pub use hex_view::HexView;
pub use layout::{LayoutMapper, LEFT_MARGIN};
pub use popup::{Popup, POPUP_HEIGHT, POPUP_WIDTH};
pub use scroll::ScrollWindow;

/// ASCII欄の区切り文字
pub const SEPARATOR: char = '|';
