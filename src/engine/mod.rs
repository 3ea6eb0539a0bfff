//! Engine Layer: Serialize / Deserialize
//!
//! Prinsip desain:
//! - Pre-allocated: `Serializer` punya buffer dengan ukuran tepat
//! - Stateless read: deserialize cukup dengan type list, tanpa instance
//! - Checked: buffer yang terlalu kecil menjadi `Error::BufferTooSmall`

mod serializer;

pub use serializer::Serializer;

use crate::error::{ensure_len, Result};
use crate::layout::{tag, Slots, TypeList};

/// Tulis `values` ke awal `buf`.
///
/// Returns jumlah bytes yang ditulis (`L::SIZE`). Byte setelahnya tidak disentuh.
#[inline(always)]
pub fn serialize_into<L: TypeList>(buf: &mut [u8], values: L) -> Result<usize> {
    ensure_len(buf, L::SIZE)?;
    values.store(&mut buf[..L::SIZE]);
    Ok(L::SIZE)
}

/// Decode awal `buf` sebagai type list `L`.
///
/// Hanya ukuran yang dicek. Bytes yang ditulis dengan urutan tipe berbeda
/// akan terbaca sebagai nilai yang salah.
#[inline(always)]
pub fn deserialize<L: TypeList>(buf: &[u8]) -> Result<L> {
    L::load(buf)
}

/// Decode `buf` ke receiver. Semua elemen di-decode dulu, baru ditulis.
#[inline(always)]
pub fn deserialize_into<S: Slots>(buf: &[u8], slots: S) -> Result<()> {
    let values = <S::List as TypeList>::load(buf)?;
    slots.assign(values);
    Ok(())
}

/// Total ukuran type list
#[inline(always)]
pub const fn size_of<L: TypeList>() -> usize {
    L::SIZE
}

/// numpy dtype string untuk type list, tanpa instance
#[inline(always)]
pub fn tag_string<L: TypeList>() -> String {
    tag::tag_string::<L>()
}
