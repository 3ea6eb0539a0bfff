//! Storage Layer: Persisted Record Buffers
//!
//! Prinsip desain:
//! - Zero-Copy: record dibaca langsung dari mmap region
//! - Self-describing: tag string disimpan di header dan dicek saat open
//! - numpy-friendly: data section aligned 64 bytes, tanpa framing per record

mod record_file;

pub use record_file::RecordFile;
