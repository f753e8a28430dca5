//! Hashing utilities

const FNV_OFFSET_BASIS: u32 = 0x811c9dc5;
const FNV_PRIME: u32 = 0x01000193;

/// 32-bit FNV-1a over the raw bytes of `s`
pub fn fnv1a(s: &str) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in s.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// FNV-1a of the ASCII-lowercased string (how bin `hash` fields are keyed)
pub fn fnv1a_lower(s: &str) -> u32 {
    fnv1a(&s.to_ascii_lowercase())
}
