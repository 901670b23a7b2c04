//! PJW string hash (Aho, Sethi & Ullman, "Compilers", Fig. 7.35).

/// Default number of buckets. Prime, so keys sharing a suffix pattern
/// spread across the table instead of clustering.
pub const DEFAULT_BUCKET_COUNT: usize = 65537;

const HIGH_NIBBLE: u32 = 0xF000_0000;

/// Classic `hashpjw` over raw bytes. Bytes are read as unsigned.
#[inline]
pub fn hashpjw(bytes: &[u8]) -> u32 {
    let mut h: u32 = 0;
    for &b in bytes {
        h = (h << 4).wrapping_add(u32::from(b));
        let g = h & HIGH_NIBBLE;
        if g != 0 {
            h ^= g >> 24;
            h ^= g;
        }
    }
    h
}

/// Bucket a key lands in for a table with `bucket_count` buckets.
///
/// `bucket_count` must be non-zero; `TableConfig` guarantees that.
#[inline]
pub fn bucket_index(bytes: &[u8], bucket_count: usize) -> usize {
    debug_assert!(bucket_count > 0);
    (hashpjw(bytes) as usize) % bucket_count
}
