//! Tag Derivation
//!
//! Tag string = tag tiap elemen digabung dengan `,`, urutan sama dengan
//! type list. Format ini bisa langsung dipakai sebagai numpy dtype:
//!
//! ```text
//! (i32, f64, u32)  ->  "i4,f8,u4"
//! np.frombuffer(buf, dtype="i4,f8,u4")
//! ```

use std::borrow::Cow;

use super::{Field, TypeList};

/// Tag untuk satu tipe.
#[inline(always)]
pub fn tag_of<T: Field>() -> Cow<'static, str> {
    T::tag()
}

/// Tag string untuk sebuah type list. List kosong = `""`.
#[inline(always)]
pub fn tag_string<L: TypeList>() -> String {
    join(L::tags())
}

/// Gabungkan tag dengan `,` tanpa separator di akhir.
pub fn join<I, S>(tags: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, tag) in tags.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(tag.as_ref());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        assert_eq!(join(Vec::<&str>::new()), "");
        assert_eq!(join(["u4"]), "u4");
        assert_eq!(join(["i4", "f8", "u4"]), "i4,f8,u4");
    }

    #[test]
    fn test_tag_string() {
        assert_eq!(tag_string::<()>(), "");
        assert_eq!(tag_string::<(u32,)>(), "u4");
        assert_eq!(tag_string::<(i32, f64, u32)>(), "i4,f8,u4");
        assert_eq!(tag_string::<(bool, [u8; 4], i64)>(), "?,(4,)u1,i8");
    }

    #[test]
    fn test_tag_of() {
        assert_eq!(tag_of::<f32>(), "f4");
        assert_eq!(tag_of::<[[u64; 2]; 2]>(), "(2,2)u8");
    }
}
