use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::BufferError;

/// 新規ファイルのバッファサイズ
pub const NEW_FILE_SIZE: usize = 0x10;

/// 編集対象のバイト列
#[derive(Debug)]
pub struct Document {
    /// ファイルパス
    path: Option<PathBuf>,
    /// バッファデータ
    data: Vec<u8>,
    /// 変更フラグ（ディスク上の内容と異なる）
    modified: bool,
}

impl Document {
    /// バイト列から作成
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            path: None,
            data,
            modified: false,
        }
    }

    /// ゼロ埋めの新規バッファ（まだディスクに存在しないので変更扱い）
    pub fn new_empty(size: usize) -> Result<Self, BufferError> {
        if size == 0 {
            return Err(BufferError::InvalidSize(size));
        }
        Ok(Self {
            path: None,
            data: vec![0; size],
            modified: true,
        })
    }

    /// ファイルから読み込み
    /// ファイルが存在しなければ新規バッファを作る
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, BufferError> {
        let path = path.into();
        let mut doc = match File::open(&path) {
            Ok(mut file) => {
                let mut data = Vec::new();
                file.read_to_end(&mut data)?;
                info!(path = %path.display(), len = data.len(), "loaded file");
                Self::from_bytes(data)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "file not found, starting new buffer");
                Self::new_empty(NEW_FILE_SIZE)?
            }
            Err(e) => return Err(e.into()),
        };
        doc.path = Some(path);
        Ok(doc)
    }

    /// ファイルに保存（切り詰めて全体を書き直す）
    /// 失敗した場合は変更フラグを維持する
    pub fn save(&mut self) -> Result<(), BufferError> {
        let path = self.path.as_ref().ok_or(BufferError::NoPath)?;
        let mut file = File::create(path)?;
        file.write_all(&self.data)?;
        file.flush()?;
        self.modified = false;
        info!(path = %path.display(), len = self.data.len(), "saved buffer");
        Ok(())
    }

    /// サイズ変更（重なる部分は保持、増えた部分はゼロ埋め）
    pub fn resize(&mut self, new_size: usize) -> Result<(), BufferError> {
        if new_size == 0 {
            return Err(BufferError::InvalidSize(new_size));
        }
        let old_len = self.data.len();
        if new_size > old_len {
            self.data
                .try_reserve_exact(new_size - old_len)
                .map_err(|_| BufferError::OutOfMemory(new_size))?;
        }
        self.data.resize(new_size, 0);
        self.modified = true;
        debug!(old_len, new_size, "resized buffer");
        Ok(())
    }

    /// データの長さを取得
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// データが空かどうか
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 指定位置のバイトを取得
    pub fn get(&self, pos: usize) -> Option<u8> {
        self.data.get(pos).copied()
    }

    /// 指定位置のバイトを取得（範囲外はエラー）
    pub fn read_byte(&self, pos: usize) -> Result<u8, BufferError> {
        self.get(pos).ok_or(BufferError::OutOfBounds {
            offset: pos,
            len: self.data.len(),
        })
    }

    /// 指定位置のバイトを設定
    pub fn set(&mut self, pos: usize, value: u8) -> Result<(), BufferError> {
        let len = self.data.len();
        let byte = self
            .data
            .get_mut(pos)
            .ok_or(BufferError::OutOfBounds { offset: pos, len })?;
        *byte = value;
        self.modified = true;
        Ok(())
    }

    /// start から count バイトを value で埋める（末尾を超えない）
    /// 戻り値: 書き込んだバイト数
    pub fn fill_range(&mut self, start: usize, value: u8, count: usize) -> usize {
        let len = self.data.len();
        let start = start.min(len);
        let end = start.saturating_add(count).min(len);
        self.data[start..end].fill(value);
        let written = end - start;
        if written > 0 {
            self.modified = true;
        }
        written
    }

    /// 変更されているかどうか
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// ファイルパスを取得
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// 生データへの参照を取得
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
