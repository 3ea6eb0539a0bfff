//! Fixed-Layout Serializer
//!
//! Buffer dialokasikan sekali saat `new()` dengan ukuran tepat `L::SIZE`.
//! Tidak ada alokasi di `serialize`, buffer lama langsung ditimpa.

use std::fmt;
use std::marker::PhantomData;

use crate::error::Result;
use crate::layout::{Layout, Slots, TypeList};

/// Serializer dengan type list `L` dan buffer milik sendiri.
///
/// ```
/// use fixpack::Serializer;
///
/// let mut s = Serializer::<(i32, f64, u32)>::new();
/// assert_eq!(s.size(), 16);
/// assert_eq!(s.tag_string(), "i4,f8,u4");
///
/// let mut copy = [0u8; 16];
/// copy.copy_from_slice(s.serialize((1, 1.123, 5)));
///
/// let (i, f, t) = Serializer::<(i32, f64, u32)>::deserialize(&copy).unwrap();
/// assert_eq!((i, f, t), (1, 1.123, 5));
/// ```
pub struct Serializer<L: TypeList> {
    buffer: Box<[u8]>,
    _types: PhantomData<fn() -> L>,
}

impl<L: TypeList> Serializer<L> {
    const NON_EMPTY: () = assert!(L::LEN > 0, "a serializer needs at least one field");

    /// Ukuran buffer, tersedia tanpa instance
    pub const SIZE: usize = L::SIZE;

    /// Membuat serializer dengan buffer zero-initialized.
    ///
    /// Type list kosong ditolak saat compile:
    ///
    /// ```compile_fail
    /// let s = fixpack::Serializer::<()>::new();
    /// assert_eq!(s.size(), 0);
    /// ```
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;

        Self {
            buffer: vec![0u8; L::SIZE].into_boxed_slice(),
            _types: PhantomData,
        }
    }

    /// Tulis nilai ke buffer internal.
    ///
    /// Returns slice ke buffer. Isi sebelumnya ditimpa.
    #[inline(always)]
    pub fn serialize(&mut self, values: L) -> &[u8] {
        values.store(&mut self.buffer);
        &self.buffer
    }

    /// Decode isi buffer internal.
    #[inline(always)]
    pub fn read(&self) -> Result<L> {
        L::load(&self.buffer)
    }

    /// Reset buffer ke nol
    #[inline(always)]
    pub fn reset(&mut self) {
        self.buffer.fill(0);
    }

    /// Decode `buf` dengan type list `L`. Tidak butuh instance.
    #[inline(always)]
    pub fn deserialize(buf: &[u8]) -> Result<L> {
        L::load(buf)
    }

    /// Decode `buf` ke dalam receiver. Receiver tidak disentuh jika gagal.
    #[inline(always)]
    pub fn deserialize_into<S>(buf: &[u8], slots: S) -> Result<()>
    where
        S: Slots<List = L>,
    {
        super::deserialize_into(buf, slots)
    }

    /// Tulis nilai ke buffer milik caller.
    #[inline(always)]
    pub fn serialize_into(buf: &mut [u8], values: L) -> Result<usize> {
        super::serialize_into(buf, values)
    }

    /// Ukuran buffer internal
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Buffer internal (read-only)
    #[inline(always)]
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Pointer ke buffer internal. Jangan dipakai untuk menulis.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const u8 {
        self.buffer.as_ptr()
    }

    /// numpy dtype string untuk type list ini
    #[inline(always)]
    pub fn tag_string(&self) -> String {
        L::tag_string()
    }

    pub fn layout(&self) -> Layout {
        Layout::of::<L>()
    }
}

impl<L: TypeList> Default for Serializer<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: TypeList> Clone for Serializer<L> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            _types: PhantomData,
        }
    }
}

impl<L: TypeList> AsRef<[u8]> for Serializer<L> {
    fn as_ref(&self) -> &[u8] {
        &self.buffer
    }
}

impl<L: TypeList> fmt::Debug for Serializer<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Serializer")
            .field("layout", &L::tag_string())
            .field("size", &self.buffer.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    type Sample = (i32, f64, u32);

    #[test]
    fn test_concrete_scenario() {
        let mut s = Serializer::<Sample>::new();
        assert_eq!(Serializer::<Sample>::SIZE, 16);
        assert_eq!(s.size(), 16);
        assert_eq!(s.tag_string(), "i4,f8,u4");

        let data = s.serialize((1, 1.123, 5));
        assert_eq!(i32::from_ne_bytes(data[0..4].try_into().unwrap()), 1);
        assert_eq!(f64::from_ne_bytes(data[4..12].try_into().unwrap()), 1.123);
        assert_eq!(u32::from_ne_bytes(data[12..16].try_into().unwrap()), 5);

        let copy = data.to_vec();
        let (mut j, mut k, mut t) = (0i32, 0f64, 0u32);
        Serializer::<Sample>::deserialize_into(&copy, (&mut j, &mut k, &mut t)).unwrap();
        assert_eq!((j, k, t), (1, 1.123, 5));
    }

    #[test]
    fn test_new_buffer_is_zeroed() {
        let s = Serializer::<(u64, [u8; 3])>::new();
        assert_eq!(s.data(), &[0u8; 11]);
        assert_eq!(s.read().unwrap(), (0, [0; 3]));
    }

    #[test]
    fn test_serialize_overwrites() {
        let mut s = Serializer::<(u16, u16)>::new();
        s.serialize((1, 2));
        s.serialize((3, 4));
        assert_eq!(s.read().unwrap(), (3, 4));

        s.reset();
        assert_eq!(s.read().unwrap(), (0, 0));
    }

    #[test]
    fn test_buffer_isolation() {
        let mut a = Serializer::<Sample>::new();
        let mut b = Serializer::<Sample>::new();
        a.serialize((1, 2.0, 3));
        b.serialize((4, 5.0, 6));
        assert_eq!(a.read().unwrap(), (1, 2.0, 3));

        let mut c = a.clone();
        c.serialize((7, 8.0, 9));
        assert_eq!(a.read().unwrap(), (1, 2.0, 3));
        assert_eq!(b.read().unwrap(), (4, 5.0, 6));
        assert_ne!(a.as_ptr(), c.as_ptr());
    }

    #[test]
    fn test_deserialize_short_buffer() {
        let err = Serializer::<Sample>::deserialize(&[0u8; 12]).unwrap_err();
        assert!(matches!(err, Error::BufferTooSmall { needed: 16, actual: 12 }));
    }

    #[test]
    fn test_layout_matches_type_list() {
        let s = Serializer::<Sample>::new();
        let layout = s.layout();
        assert_eq!(layout.size(), s.size());
        assert_eq!(layout.to_string(), s.tag_string());
        assert_eq!(s.as_ref().len(), 16);
    }
}
