//! Layout Layer: Type List, Offset Map, Tag Derivation
//!
//! Prinsip desain:
//! - Fixed-size only: setiap tipe punya ukuran tetap > 0
//! - No padding: elemen ditulis back-to-back sesuai urutan
//! - Compile-time: ukuran dan offset dihitung oleh compiler

pub mod arith;
mod descriptor;
mod field;
mod list;
pub mod tag;

pub use descriptor::{Descriptor, Layout};
pub use field::Field;
pub use list::{Slots, TypeList};
