//! Fixed-Size Field Types
//!
//! Satu `Field` = satu tipe dengan ukuran byte tetap, diketahui saat compile.
//! Nilai ditulis apa adanya (native byte order), tanpa padding.
//!
//! | tipe                    | tag            |
//! |-------------------------|----------------|
//! | `bool`                  | `?`            |
//! | `u8` / `u16` / `u32` / `u64` | `u1` / `u2` / `u4` / `u8` |
//! | `i8` / `i16` / `i32` / `i64` | `i1` / `i2` / `i4` / `i8` |
//! | `f32` / `f64`           | `f4` / `f8`    |
//! | `[T; N]`                | `(N,)T`        |
//!
//! Tipe lain tidak punya impl, jadi ditolak oleh compiler.

use std::borrow::Cow;
use std::mem;

use crate::error::{ensure_len, Error, Result};

/// Tipe nilai dengan representasi byte berukuran tetap.
///
/// `SIZE` wajib > 0. `store` dan `load` menerima slice minimal `SIZE` bytes;
/// pengecekan panjang dilakukan di level [`TypeList`](super::TypeList).
pub trait Field: Copy + Sized {
    /// Ukuran dalam bytes
    const SIZE: usize;
    /// Tag scalar dasar (untuk array: tag elemennya)
    const TAG: &'static str;

    /// Dimensi sub-array, kosong untuk scalar.
    #[inline(always)]
    fn shape(dims: &mut Vec<usize>) {
        let _ = dims;
    }

    /// Tag lengkap, termasuk shape dalam format numpy `(2,3)i4`.
    fn tag() -> Cow<'static, str> {
        let mut dims = Vec::new();
        Self::shape(&mut dims);
        if dims.is_empty() {
            return Cow::Borrowed(Self::TAG);
        }

        let mut out = String::from("(");
        for (i, dim) in dims.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&dim.to_string());
        }
        if dims.len() == 1 {
            out.push(',');
        }
        out.push(')');
        out.push_str(Self::TAG);
        Cow::Owned(out)
    }

    /// Tulis bytes nilai ke `dst[..SIZE]`.
    fn store(&self, dst: &mut [u8]);

    /// Baca nilai dari `src[..SIZE]`.
    fn load(src: &[u8]) -> Result<Self>;
}

#[inline(always)]
fn bytes<const N: usize>(src: &[u8]) -> Result<[u8; N]> {
    src.get(..N)
        .and_then(|s| s.try_into().ok())
        .ok_or(Error::BufferTooSmall {
            needed: N,
            actual: src.len(),
        })
}

macro_rules! impl_scalar {
    ($($ty:ty => $tag:literal),* $(,)?) => {$(
        impl Field for $ty {
            const SIZE: usize = mem::size_of::<$ty>();
            const TAG: &'static str = $tag;

            #[inline(always)]
            fn store(&self, dst: &mut [u8]) {
                dst[..Self::SIZE].copy_from_slice(&self.to_ne_bytes());
            }

            #[inline(always)]
            fn load(src: &[u8]) -> Result<Self> {
                Ok(<$ty>::from_ne_bytes(bytes(src)?))
            }
        }
    )*};
}

impl_scalar! {
    u8 => "u1",
    u16 => "u2",
    u32 => "u4",
    u64 => "u8",
    i8 => "i1",
    i16 => "i2",
    i32 => "i4",
    i64 => "i8",
    f32 => "f4",
    f64 => "f8",
}

impl Field for bool {
    const SIZE: usize = 1;
    const TAG: &'static str = "?";

    #[inline(always)]
    fn store(&self, dst: &mut [u8]) {
        dst[0] = *self as u8;
    }

    /// Byte non-zero dibaca sebagai `true`.
    #[inline(always)]
    fn load(src: &[u8]) -> Result<Self> {
        src.first().map(|b| *b != 0).ok_or(Error::BufferTooSmall {
            needed: 1,
            actual: 0,
        })
    }
}

/// Array `[T; N]` dengan `N > 0`. Array kosong ditolak saat compile:
///
/// ```compile_fail
/// let n = fixpack::size_of::<(u8, [u32; 0])>();
/// assert_eq!(n, 1);
/// ```
impl<T: Field, const N: usize> Field for [T; N] {
    const SIZE: usize = {
        assert!(N > 0, "zero-length arrays have no byte representation");
        N * T::SIZE
    };
    const TAG: &'static str = T::TAG;

    fn shape(dims: &mut Vec<usize>) {
        dims.push(N);
        T::shape(dims);
    }

    #[inline(always)]
    fn store(&self, dst: &mut [u8]) {
        for (item, chunk) in self
            .iter()
            .zip(dst[..Self::SIZE].chunks_exact_mut(T::SIZE))
        {
            item.store(chunk);
        }
    }

    fn load(src: &[u8]) -> Result<Self> {
        ensure_len(src, Self::SIZE)?;
        let src = &src[..Self::SIZE];

        // N > 0 dijamin oleh SIZE
        let mut out = [T::load(src)?; N];
        for (slot, chunk) in out.iter_mut().zip(src.chunks_exact(T::SIZE)).skip(1) {
            *slot = T::load(chunk)?;
        }
        Ok(out)
    }
}

/// Deklarasi enum dengan representasi integer yang bisa dipakai sebagai [`Field`].
///
/// Enum mendapat ukuran dan tag dari integer dasarnya. Macro ini juga
/// men-derive `Clone, Copy, PartialEq, Eq` dan membuat `from_repr`/`to_repr`.
///
/// ```
/// fixpack::field_enum! {
///     #[derive(Debug)]
///     pub enum Phase: u32 {
///         Idle = 0,
///         Running = 1,
///     }
/// }
///
/// use fixpack::Field;
/// assert_eq!(Phase::tag(), "u4");
/// assert_eq!(Phase::from_repr(1), Some(Phase::Running));
/// ```
#[macro_export]
macro_rules! field_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr($repr)]
        #[derive(Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant = $value ),+
        }

        impl $name {
            #[inline(always)]
            pub fn from_repr(v: $repr) -> ::core::option::Option<Self> {
                $(
                    if v == Self::$variant as $repr {
                        return ::core::option::Option::Some(Self::$variant);
                    }
                )+
                ::core::option::Option::None
            }

            #[inline(always)]
            pub const fn to_repr(self) -> $repr {
                self as $repr
            }
        }

        impl $crate::Field for $name {
            const SIZE: usize = <$repr as $crate::Field>::SIZE;
            const TAG: &'static str = <$repr as $crate::Field>::TAG;

            #[inline(always)]
            fn store(&self, dst: &mut [u8]) {
                <$repr as $crate::Field>::store(&self.to_repr(), dst)
            }

            fn load(src: &[u8]) -> $crate::Result<Self> {
                let raw = <$repr as $crate::Field>::load(src)?;
                Self::from_repr(raw).ok_or($crate::Error::InvalidDiscriminant {
                    ty: ::core::stringify!($name),
                    value: raw as i128,
                })
            }
        }
    };
}
