//! Memory-Mapped Record File
//!
//! File berisi header kecil lalu record back-to-back dengan layout dari
//! satu type list. Data section bisa dibuka langsung dari numpy:
//!
//! ```text
//! np.memmap(path, dtype=<tag string>, offset=<data offset>, shape=(len,))
//! ```
//!
//! Layout file:
//! ┌──────────────────────────────────────────────────────────┐
//! │ RawHeader (44 bytes, native byte order)                  │
//! ├──────────────────────────────────────────────────────────┤
//! │ Tag string (utf-8, tag_len bytes)                        │
//! ├──────────────────────────────────────────────────────────┤
//! │ Padding sampai kelipatan 64                              │
//! ├──────────────────────────────────────────────────────────┤
//! │ Record 0 │ Record 1 │ ...  (capacity * record size)      │
//! └──────────────────────────────────────────────────────────┘

use std::fs::OpenOptions;
use std::marker::PhantomData;
use std::path::Path;

use log::{debug, warn};
use memmap2::{MmapMut, MmapOptions};

use crate::engine::{deserialize, serialize_into};
use crate::error::{Error, Result};
use crate::layout::{arith, TypeList};

/// magic, version, record_size, capacity, len, data_offset, tag_len
type RawHeader = (u64, u32, u32, u64, u64, u64, u32);

const RAW_HEADER_SIZE: usize = <RawHeader as TypeList>::SIZE;
const LEN_OFFSET: usize = arith::offset_of(<RawHeader as TypeList>::SIZES, 4);

const MAGIC: u64 = 0x314B_4341_5058_4946; // "FIXPACK1" little-endian
const VERSION: u32 = 1;
const DATA_ALIGN: usize = 64;

/// File record dengan type list `L`, di-mmap read/write.
pub struct RecordFile<L: TypeList> {
    mmap: MmapMut,
    capacity: usize,
    len: usize,
    data_offset: usize,
    tag: String,
    _types: PhantomData<fn() -> L>,
}

impl<L: TypeList> RecordFile<L> {
    const NON_EMPTY: () = assert!(L::LEN > 0, "a record needs at least one field");

    /// Membuat file baru (file lama ditimpa) dengan kapasitas `capacity` record.
    ///
    /// Record tanpa field ditolak saat compile:
    ///
    /// ```compile_fail
    /// let file = fixpack::RecordFile::<()>::create("empty.pack", 1);
    /// assert!(file.is_err());
    /// ```
    pub fn create<P: AsRef<Path>>(path: P, capacity: usize) -> Result<Self> {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;

        let path = path.as_ref();
        let tag = L::tag_string();
        let data_offset = align_up(RAW_HEADER_SIZE + tag.len(), DATA_ALIGN);
        let total_size = capacity
            .checked_mul(L::SIZE)
            .and_then(|n| n.checked_add(data_offset))
            .ok_or(Error::StorageFull { capacity })?;

        // Header dihitung sebelum file disentuh
        let header: RawHeader = (
            MAGIC,
            VERSION,
            to_u32(L::SIZE)?,
            capacity as u64,
            0,
            data_offset as u64,
            to_u32(tag.len())?,
        );

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.set_len(total_size as u64)?;

        // SAFETY: file dibuka read/write dan panjangnya sudah di-set
        let mut mmap = unsafe { MmapOptions::new().len(total_size).map_mut(&file)? };

        serialize_into(&mut mmap[..RAW_HEADER_SIZE], header)?;
        mmap[RAW_HEADER_SIZE..RAW_HEADER_SIZE + tag.len()].copy_from_slice(tag.as_bytes());

        debug!(
            "created record file {} (dtype={}, capacity={}, data_offset={})",
            path.display(),
            tag,
            capacity,
            data_offset
        );

        Ok(Self {
            mmap,
            capacity,
            len: 0,
            data_offset,
            tag,
            _types: PhantomData,
        })
    }

    /// Membuka file yang sudah ada. Layout di header harus sama dengan `L`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;

        let path = path.as_ref();
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let file_len = to_usize(file.metadata()?.len())?;

        if file_len < RAW_HEADER_SIZE {
            return Err(Error::CorruptHeader("file shorter than header"));
        }

        // SAFETY: file dibuka read/write, mmap sepanjang isi file
        let mmap = unsafe { MmapOptions::new().len(file_len).map_mut(&file)? };

        let (magic, version, record_size, capacity, len, data_offset, tag_len) =
            deserialize::<RawHeader>(&mmap)?;

        if magic != MAGIC {
            return Err(Error::CorruptHeader("bad magic"));
        }
        if version != VERSION {
            return Err(Error::CorruptHeader("unsupported version"));
        }

        let capacity = to_usize(capacity)?;
        let len = to_usize(len)?;
        let data_offset = to_usize(data_offset)?;
        let tag_end = RAW_HEADER_SIZE + tag_len as usize;

        if tag_end > data_offset || data_offset > file_len {
            return Err(Error::CorruptHeader("tag overruns data section"));
        }

        let tag = std::str::from_utf8(&mmap[RAW_HEADER_SIZE..tag_end])
            .map_err(|_| Error::CorruptHeader("tag is not utf-8"))?
            .to_owned();

        let expected = L::tag_string();
        if tag != expected || record_size as usize != L::SIZE {
            warn!(
                "layout mismatch in {}: expected {}, found {}",
                path.display(),
                expected,
                tag
            );
            return Err(Error::LayoutMismatch {
                expected,
                found: tag,
            });
        }

        let data_len = capacity
            .checked_mul(L::SIZE)
            .ok_or(Error::CorruptHeader("capacity overflows"))?;
        data_offset
            .checked_add(data_len)
            .filter(|&end| end <= file_len)
            .ok_or(Error::CorruptHeader("file truncated"))?;
        if len > capacity {
            return Err(Error::CorruptHeader("len exceeds capacity"));
        }

        debug!(
            "opened record file {} (dtype={}, len={}/{})",
            path.display(),
            tag,
            len,
            capacity
        );

        Ok(Self {
            mmap,
            capacity,
            len,
            data_offset,
            tag,
            _types: PhantomData,
        })
    }

    /// Append satu record.
    ///
    /// Returns index record, atau `StorageFull` jika kapasitas habis.
    pub fn push(&mut self, values: L) -> Result<usize> {
        if self.len == self.capacity {
            return Err(Error::StorageFull {
                capacity: self.capacity,
            });
        }

        let index = self.len;
        let start = self.data_offset + index * L::SIZE;
        values.store(&mut self.mmap[start..start + L::SIZE]);

        self.len += 1;
        serialize_into(&mut self.mmap[LEN_OFFSET..], (self.len as u64,))?;

        Ok(index)
    }

    /// Decode record ke-`index`
    pub fn get(&self, index: usize) -> Result<L> {
        let bytes = self.record_bytes(index).ok_or(Error::OutOfRange {
            index,
            len: self.len,
        })?;
        L::load(bytes)
    }

    /// Bytes mentah record ke-`index` (zero-copy)
    #[inline(always)]
    pub fn record_bytes(&self, index: usize) -> Option<&[u8]> {
        if index >= self.len {
            return None;
        }
        let start = self.data_offset + index * L::SIZE;
        Some(&self.mmap[start..start + L::SIZE])
    }

    /// Semua record yang sudah ditulis, back-to-back
    #[inline(always)]
    pub fn data(&self) -> &[u8] {
        &self.mmap[self.data_offset..self.data_offset + self.len * L::SIZE]
    }

    /// Iterasi semua record berurutan
    pub fn iter(&self) -> impl Iterator<Item = Result<L>> + '_ {
        self.data().chunks_exact(L::SIZE).map(L::load)
    }

    /// Flush perubahan ke disk
    pub fn flush(&self) -> Result<()> {
        self.mmap.flush()?;
        Ok(())
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Offset data section dari awal file (untuk `np.memmap(offset=...)`)
    #[inline(always)]
    pub fn data_offset(&self) -> usize {
        self.data_offset
    }

    /// numpy dtype string yang tersimpan di header
    #[inline(always)]
    pub fn tag_string(&self) -> &str {
        &self.tag
    }
}

#[inline(always)]
const fn align_up(n: usize, align: usize) -> usize {
    (n + align - 1) / align * align
}

fn to_u32(n: usize) -> Result<u32> {
    u32::try_from(n).map_err(|_| Error::CorruptHeader("value does not fit in u32"))
}

fn to_usize(n: u64) -> Result<usize> {
    usize::try_from(n).map_err(|_| Error::CorruptHeader("value does not fit in usize"))
}
