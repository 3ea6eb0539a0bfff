//! Record file persistence dan validasi layout
//!
//! Usage:
//!   cargo test --test record_file

use std::fs::{self, OpenOptions};
use std::io::{Seek, SeekFrom, Write};

use fixpack::{Error, RecordFile};

type Sample = (i32, f64, u32);

#[test]
fn records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("persist.pack");

    {
        let mut file = RecordFile::<Sample>::create(&path, 8).unwrap();
        for n in 0..5 {
            file.push((n, n as f64 * 1.5, n as u32 * 2)).unwrap();
        }
        file.flush().unwrap();
    }

    let file = RecordFile::<Sample>::open(&path).unwrap();
    assert_eq!(file.len(), 5);
    assert_eq!(file.capacity(), 8);
    assert_eq!(file.tag_string(), "i4,f8,u4");

    let records: Vec<Sample> = file.iter().collect::<Result<_, _>>().unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(records[3], (3, 4.5, 6));
}

#[test]
fn reopened_file_keeps_appending() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("append.pack");

    {
        let mut file = RecordFile::<(u16, bool)>::create(&path, 4).unwrap();
        file.push((1, true)).unwrap();
    }

    {
        let mut file = RecordFile::<(u16, bool)>::open(&path).unwrap();
        assert_eq!(file.push((2, false)).unwrap(), 1);
    }

    let file = RecordFile::<(u16, bool)>::open(&path).unwrap();
    assert_eq!(file.len(), 2);
    assert_eq!(file.get(0).unwrap(), (1, true));
    assert_eq!(file.get(1).unwrap(), (2, false));
}

#[test]
fn data_section_is_plain_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.pack");

    let mut file = RecordFile::<Sample>::create(&path, 2).unwrap();
    file.push((1, 1.123, 5)).unwrap();
    file.flush().unwrap();

    let raw = fs::read(&path).unwrap();
    let offset = file.data_offset();
    assert_eq!(offset % 64, 0);
    assert_eq!(raw.len(), offset + 2 * 16);
    assert_eq!(&raw[offset..offset + 16], file.data());
    assert_eq!(&raw[offset..offset + 4], &1i32.to_ne_bytes());
}

#[test]
fn open_with_other_layout_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mismatch.pack");

    RecordFile::<Sample>::create(&path, 1).unwrap();

    match RecordFile::<(u32, f64, i32)>::open(&path) {
        Err(Error::LayoutMismatch { expected, found }) => {
            assert_eq!(expected, "u4,f8,i4");
            assert_eq!(found, "i4,f8,u4");
        }
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("layout mismatch not detected"),
    }
}

#[test]
fn open_rejects_bad_magic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.pack");
    fs::write(&path, vec![0x42u8; 128]).unwrap();

    assert!(matches!(
        RecordFile::<Sample>::open(&path),
        Err(Error::CorruptHeader("bad magic"))
    ));
}

#[test]
fn open_rejects_short_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.pack");
    fs::write(&path, [0u8; 10]).unwrap();

    assert!(matches!(
        RecordFile::<Sample>::open(&path),
        Err(Error::CorruptHeader(_))
    ));
}

#[test]
fn open_rejects_truncated_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truncated.pack");

    let data_offset = {
        let file = RecordFile::<Sample>::create(&path, 10).unwrap();
        file.data_offset()
    };

    let f = OpenOptions::new().write(true).open(&path).unwrap();
    f.set_len((data_offset + 16) as u64).unwrap();

    assert!(matches!(
        RecordFile::<Sample>::open(&path),
        Err(Error::CorruptHeader("file truncated"))
    ));
}

#[test]
fn open_rejects_corrupt_len() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("len.pack");
    RecordFile::<Sample>::create(&path, 2).unwrap();

    // len field: setelah magic(8) + version(4) + record_size(4) + capacity(8)
    let mut f = OpenOptions::new().write(true).open(&path).unwrap();
    f.seek(SeekFrom::Start(24)).unwrap();
    f.write_all(&99u64.to_ne_bytes()).unwrap();
    drop(f);

    assert!(matches!(
        RecordFile::<Sample>::open(&path),
        Err(Error::CorruptHeader("len exceeds capacity"))
    ));
}

#[test]
fn open_rejects_overflowing_capacity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capacity.pack");
    RecordFile::<(u8,)>::create(&path, 1).unwrap();

    // capacity field: setelah magic(8) + version(4) + record_size(4)
    let mut f = OpenOptions::new().write(true).open(&path).unwrap();
    f.seek(SeekFrom::Start(16)).unwrap();
    f.write_all(&u64::MAX.to_ne_bytes()).unwrap();
    drop(f);

    assert!(matches!(
        RecordFile::<(u8,)>::open(&path),
        Err(Error::CorruptHeader(_))
    ));
    assert!(matches!(
        RecordFile::<(u64,)>::open(&path),
        Err(Error::LayoutMismatch { .. })
    ));
}

#[cfg(target_pointer_width = "64")]
#[test]
fn failed_create_keeps_existing_file() {
    // record 4 GiB: record_size tidak muat di header u32
    type Huge = ([[u8; 65536]; 65536],);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keep.pack");
    fs::write(&path, b"existing data").unwrap();

    assert!(matches!(
        RecordFile::<Huge>::create(&path, 0),
        Err(Error::CorruptHeader(_))
    ));
    assert_eq!(fs::read(&path).unwrap(), b"existing data");
}

#[test]
fn open_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.pack");

    assert!(matches!(
        RecordFile::<Sample>::open(&path),
        Err(Error::Io(_))
    ));
}
