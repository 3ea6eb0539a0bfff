//! Error types
//!
//! Semua kegagalan per-call dikembalikan langsung ke caller.
//! Kombinasi tipe yang tidak didukung sudah ditolak oleh compiler,
//! jadi tidak punya variant di sini.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("buffer too small: layout needs {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("layout mismatch: expected `{expected}`, found `{found}`")]
    LayoutMismatch { expected: String, found: String },

    #[error("invalid discriminant {value} for enum `{ty}`")]
    InvalidDiscriminant { ty: &'static str, value: i128 },

    #[error("record index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("record file is full (capacity {capacity} records)")]
    StorageFull { capacity: usize },

    #[error("corrupt record file header: {0}")]
    CorruptHeader(&'static str),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Pastikan `buf` minimal `needed` bytes.
#[inline(always)]
pub(crate) fn ensure_len(buf: &[u8], needed: usize) -> Result<()> {
    if buf.len() < needed {
        return Err(Error::BufferTooSmall {
            needed,
            actual: buf.len(),
        });
    }
    Ok(())
}
