//! Type List dan Receiver Slots
//!
//! Type list = tuple dari [`Field`]. Ukuran dan offset tiap elemen
//! dihitung saat compile dari `SIZES`.
//!
//! Layout `(i32, f64, u32)`:
//! ┌──────────┬──────────────────┬──────────┐
//! │ i32 @0   │ f64 @4           │ u32 @12  │  = 16 bytes
//! └──────────┴──────────────────┴──────────┘

use std::borrow::Cow;

use super::arith;
use super::{tag, Descriptor, Field};
use crate::error::{ensure_len, Result};

/// Urutan tipe tetap yang menentukan layout buffer.
///
/// Hanya tuple dari [`Field`] yang menjadi type list. Tipe tanpa ukuran
/// tetap tidak lolos compile:
///
/// ```compile_fail
/// let n = fixpack::size_of::<(u8, String)>();
/// assert_eq!(n, 1);
/// ```
///
/// ```compile_fail
/// let tag = fixpack::tag_string::<(u8, char)>();
/// assert_eq!(tag, "u1");
/// ```
pub trait TypeList: Copy + Sized {
    /// Ukuran tiap elemen, urut sesuai posisi
    const SIZES: &'static [usize];

    /// Jumlah elemen
    const LEN: usize = Self::SIZES.len();

    /// Total ukuran buffer dalam bytes
    const SIZE: usize = {
        assert!(
            arith::all_nonzero(Self::SIZES),
            "zero-sized types cannot be packed"
        );
        arith::total_size(Self::SIZES)
    };

    /// Tag tiap elemen
    fn tags() -> Vec<Cow<'static, str>>;

    /// Tulis semua nilai berurutan ke `dst[..SIZE]`.
    ///
    /// # Panics
    /// Panic jika `dst` lebih kecil dari `SIZE`. Caller publik memakai
    /// [`serialize_into`](crate::serialize_into) yang mengecek dulu.
    fn store(&self, dst: &mut [u8]);

    /// Baca semua nilai dari `src`. Error jika `src` kurang dari `SIZE`.
    fn load(src: &[u8]) -> Result<Self>;

    /// Offset elemen ke-`k`
    #[inline(always)]
    fn offset(k: usize) -> usize {
        arith::offset_of(Self::SIZES, k)
    }

    /// Ukuran `m` elemen terakhir
    #[inline(always)]
    fn tail_size(m: usize) -> usize {
        arith::tail_size(Self::SIZES, m)
    }

    fn descriptors() -> Vec<Descriptor> {
        Self::SIZES
            .iter()
            .zip(Self::tags())
            .map(|(&size, tag)| Descriptor::new(size, tag))
            .collect()
    }

    #[inline(always)]
    fn tag_string() -> String {
        tag::join(Self::tags())
    }
}

/// Tuple dari `&mut T` yang menerima hasil deserialize.
pub trait Slots {
    type List: TypeList;

    fn assign(self, values: Self::List);
}

macro_rules! impl_type_list {
    ($($idx:tt: $T:ident),*) => {
        impl<$($T: Field),*> TypeList for ($($T,)*) {
            const SIZES: &'static [usize] = &[$(<$T as Field>::SIZE),*];

            fn tags() -> Vec<Cow<'static, str>> {
                vec![$(<$T as Field>::tag()),*]
            }

            #[inline(always)]
            #[allow(unused_variables, unused_mut, unused_assignments)]
            fn store(&self, dst: &mut [u8]) {
                let mut pos = 0;
                $(
                    let end = pos + <$T as Field>::SIZE;
                    self.$idx.store(&mut dst[pos..end]);
                    pos = end;
                )*
            }

            #[inline(always)]
            #[allow(unused_variables, unused_mut, unused_assignments)]
            fn load(src: &[u8]) -> Result<Self> {
                ensure_len(src, Self::SIZE)?;
                let mut pos = 0;
                Ok(($(
                    {
                        let end = pos + <$T as Field>::SIZE;
                        let value = <$T as Field>::load(&src[pos..end])?;
                        pos = end;
                        value
                    },
                )*))
            }
        }
    };
}

macro_rules! impl_slots {
    ($($idx:tt: $T:ident),+) => {
        impl<'a, $($T: Field),+> Slots for ($(&'a mut $T,)+) {
            type List = ($($T,)+);

            #[inline(always)]
            fn assign(self, values: Self::List) {
                $( *self.$idx = values.$idx; )+
            }
        }
    };
}

impl_type_list!();

macro_rules! impl_all {
    ($($idx:tt: $T:ident),+) => {
        impl_type_list!($($idx: $T),+);
        impl_slots!($($idx: $T),+);
    };
}

impl_all!(0: P0);
impl_all!(0: P0, 1: P1);
impl_all!(0: P0, 1: P1, 2: P2);
impl_all!(0: P0, 1: P1, 2: P2, 3: P3);
impl_all!(0: P0, 1: P1, 2: P2, 3: P3, 4: P4);
impl_all!(0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5);
impl_all!(0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5, 6: P6);
impl_all!(0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5, 6: P6, 7: P7);
impl_all!(0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5, 6: P6, 7: P7, 8: P8);
impl_all!(0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5, 6: P6, 7: P7, 8: P8, 9: P9);
impl_all!(0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5, 6: P6, 7: P7, 8: P8, 9: P9, 10: P10);
impl_all!(0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5, 6: P6, 7: P7, 8: P8, 9: P9, 10: P10, 11: P11);

/// Satu receiver tanpa tuple.
impl<'a, T: Field> Slots for &'a mut T {
    type List = (T,);

    #[inline(always)]
    fn assign(self, values: Self::List) {
        *self = values.0;
    }
}
