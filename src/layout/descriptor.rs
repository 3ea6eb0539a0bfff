//! Runtime Layout Descriptor
//!
//! Versi runtime dari type list: daftar (size, tag) plus offset map yang
//! dihitung sekali. Dipakai untuk inspeksi layout dan untuk konsumen buffer
//! eksternal yang tidak tahu tipe Rust-nya.

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use super::{tag, Field, TypeList};

/// Pasangan (byte size, tag) untuk satu tipe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Descriptor {
    size: usize,
    tag: Cow<'static, str>,
}

impl Descriptor {
    pub fn new(size: usize, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            size,
            tag: tag.into(),
        }
    }

    /// Descriptor untuk satu [`Field`].
    pub fn of<T: Field>() -> Self {
        Self::new(T::SIZE, T::tag())
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// Type list + offset map yang sudah dihitung.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    descriptors: Vec<Descriptor>,
    offsets: Vec<usize>,
    size: usize,
}

impl Layout {
    /// Layout dari sebuah type list
    pub fn of<L: TypeList>() -> Self {
        let descriptors = L::descriptors();

        let mut offsets = Vec::with_capacity(descriptors.len());
        let mut size = 0;
        for desc in &descriptors {
            offsets.push(size);
            size += desc.size;
        }
        debug_assert_eq!(size, L::SIZE);

        Self {
            descriptors,
            offsets,
            size,
        }
    }

    /// Total ukuran buffer
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Jumlah elemen
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Offset elemen ke-`k`, `None` jika di luar range
    #[inline(always)]
    pub fn offset(&self, k: usize) -> Option<usize> {
        self.offsets.get(k).copied()
    }

    /// Range byte elemen ke-`k` di dalam buffer
    pub fn range(&self, k: usize) -> Option<Range<usize>> {
        let start = self.offset(k)?;
        Some(start..start + self.descriptors[k].size)
    }

    /// Ukuran `m` elemen terakhir
    pub fn tail_size(&self, m: usize) -> usize {
        let start = self.len().saturating_sub(m);
        self.size - self.offsets.get(start).copied().unwrap_or(self.size)
    }

    #[inline(always)]
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// Iterasi (descriptor, offset) sesuai urutan type list
    pub fn iter(&self) -> impl Iterator<Item = (&Descriptor, usize)> + '_ {
        self.descriptors.iter().zip(self.offsets.iter().copied())
    }

    pub fn tag_string(&self) -> String {
        tag::join(self.descriptors.iter().map(Descriptor::tag))
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag_string())
    }
}
