//! fixpack - Fixed-Layout Binary Packing
//!
//! Arsitektur:
//! - Layout: ukuran dan offset tiap field dihitung saat compile
//! - Engine: serialize/deserialize ke buffer tanpa padding
//! - Tags: numpy dtype string dari type list yang sama
//! - Storage: record file berbasis mmap yang bisa dibuka dari numpy
//!
//! ```
//! use fixpack::{deserialize, Serializer};
//!
//! let mut s = Serializer::<(i32, f64, u32)>::new();
//! let bytes = s.serialize((1, 1.123, 5)).to_vec();
//!
//! assert_eq!(s.tag_string(), "i4,f8,u4");
//! assert_eq!(deserialize::<(i32, f64, u32)>(&bytes).unwrap(), (1, 1.123, 5));
//! ```

pub mod engine;
mod error;
pub mod layout;
pub mod storage;

pub use engine::{deserialize, deserialize_into, serialize_into, size_of, tag_string, Serializer};
pub use error::{Error, Result};
pub use layout::{Descriptor, Field, Layout, Slots, TypeList};
pub use storage::RecordFile;
