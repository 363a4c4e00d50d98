use thiserror::Error;

/// デフォルトの1行あたりのバイト数
pub const BYTES_PER_LINE_DEFAULT: usize = 0x10;
/// デフォルトのグループ幅
pub const BYTES_PER_GROUP_DEFAULT: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("bytes per line must be greater than 0")]
    ZeroBytesPerLine,
    #[error("bytes per group must be greater than 0")]
    ZeroBytesPerGroup,
}

/// 表示設定（起動時に一度だけ決まる）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewConfig {
    bytes_per_line: usize,
    bytes_per_group: usize,
    show_ascii: bool,
}

impl ViewConfig {
    /// 設定を検証して作成（グループ幅は1行のバイト数を超えない）
    pub fn new(bytes_per_line: usize, bytes_per_group: usize, show_ascii: bool) -> Result<Self, ConfigError> {
        if bytes_per_line == 0 {
            return Err(ConfigError::ZeroBytesPerLine);
        }
        if bytes_per_group == 0 {
            return Err(ConfigError::ZeroBytesPerGroup);
        }
        Ok(Self {
            bytes_per_line,
            bytes_per_group: bytes_per_group.min(bytes_per_line),
            show_ascii,
        })
    }

    pub fn bytes_per_line(&self) -> usize {
        self.bytes_per_line
    }

    pub fn bytes_per_group(&self) -> usize {
        self.bytes_per_group
    }

    pub fn show_ascii(&self) -> bool {
        self.show_ascii
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            bytes_per_line: BYTES_PER_LINE_DEFAULT,
            bytes_per_group: BYTES_PER_GROUP_DEFAULT,
            show_ascii: false,
        }
    }
}
