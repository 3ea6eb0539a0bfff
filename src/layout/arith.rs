//! Type-List Arithmetic
//!
//! Semua fungsi `const`, jadi untuk type list yang diketahui saat compile
//! hasilnya dihitung oleh compiler.

/// Jumlah ukuran semua elemen. List kosong = 0.
#[inline(always)]
pub const fn total_size(sizes: &[usize]) -> usize {
    let mut sum = 0;
    let mut i = 0;
    while i < sizes.len() {
        sum += sizes[i];
        i += 1;
    }
    sum
}

/// Ukuran `m` elemen terakhir. `m` lebih besar dari panjang list = seluruh list.
#[inline(always)]
pub const fn tail_size(sizes: &[usize], m: usize) -> usize {
    let mut i = sizes.len().saturating_sub(m);
    let mut sum = 0;
    while i < sizes.len() {
        sum += sizes[i];
        i += 1;
    }
    sum
}

/// Offset elemen ke-`k`: total dikurangi ukuran tail yang dimulai di `k`.
///
/// `k >= len` menghasilkan total size (posisi tepat setelah elemen terakhir).
#[inline(always)]
pub const fn offset_of(sizes: &[usize], k: usize) -> usize {
    total_size(sizes) - tail_size(sizes, sizes.len().saturating_sub(k))
}

/// `true` jika tidak ada elemen berukuran nol.
#[inline(always)]
pub const fn all_nonzero(sizes: &[usize]) -> bool {
    let mut i = 0;
    while i < sizes.len() {
        if sizes[i] == 0 {
            return false;
        }
        i += 1;
    }
    true
}
