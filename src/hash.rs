//! Key hashing for `OpenAddressingMap`
//!
//! The map does not go through `std::hash::Hasher`: it needs a hash that is a pure function
//! of the key's characters, so that `str`, `String` and friends land on the same start slot.
//! Keys opt in through the [`KeyHash`] capability.

use std::borrow::Cow;

/// Initial state of the djb2 hash
const DJB2_SEED: u32 = 5381;

/// Folds one code unit into a running djb2 state (`hash * 33 + unit`, wrapping at 32 bits)
#[inline]
const fn fold(hash: u32, unit: u32) -> u32 {
    (hash << 5).wrapping_add(hash).wrapping_add(unit)
}

/// Hashes a string with djb2 over its UTF-16 code units.
///
/// For ASCII input the code units are the bytes of the string.
///
/// ```rust
/// use openmap::djb2;
///
/// assert_eq!(djb2(""), 5381);
/// assert_eq!(djb2("a"), 5381 * 33 + 97);
/// ```
#[must_use]
pub fn djb2(s: &str) -> u32 {
    s.encode_utf16().fold(DJB2_SEED, |hash, unit| fold(hash, u32::from(unit)))
}

/// Hashes raw bytes with djb2
#[must_use]
pub fn djb2_bytes(bytes: &[u8]) -> u32 {
    bytes.iter().fold(DJB2_SEED, |hash, &byte| fold(hash, u32::from(byte)))
}

/// Capability for types that can be used as keys of an `OpenAddressingMap`.
///
/// Implementations must be consistent with `Eq`: equal keys hash equally. Types that are
/// `Borrow`ed from one another (`String` and `str`) must also agree.
pub trait KeyHash {
    /// Returns the 32-bit hash of the key
    fn key_hash(&self) -> u32;
}

impl KeyHash for str {
    fn key_hash(&self) -> u32 {
        djb2(self)
    }
}

impl KeyHash for String {
    fn key_hash(&self) -> u32 {
        djb2(self)
    }
}

impl KeyHash for Box<str> {
    fn key_hash(&self) -> u32 {
        djb2(self)
    }
}

impl KeyHash for Cow<'_, str> {
    fn key_hash(&self) -> u32 {
        djb2(self)
    }
}

impl KeyHash for char {
    fn key_hash(&self) -> u32 {
        let mut buf = [0_u16; 2];
        self.encode_utf16(&mut buf)
            .iter()
            .fold(DJB2_SEED, |hash, &unit| fold(hash, u32::from(unit)))
    }
}

impl<T: KeyHash + ?Sized> KeyHash for &T {
    fn key_hash(&self) -> u32 {
        (**self).key_hash()
    }
}

/// Implements `KeyHash` for integer types by hashing their little-endian bytes
macro_rules! impl_key_hash_for_ints {
    ($($ty:ty),* $(,)?) => {
        $(
            impl KeyHash for $ty {
                fn key_hash(&self) -> u32 {
                    djb2_bytes(&self.to_le_bytes())
                }
            }
        )*
    };
}

impl_key_hash_for_ints!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_djb2_known_values() {
        assert_eq!(djb2(""), 5381);
        assert_eq!(djb2("a"), 177_670);
        assert_eq!(djb2("ab"), 5_863_208);
    }

    #[test]
    fn test_djb2_wraps_at_32_bits() {
        // long enough to overflow many times over
        let long = "the quick brown fox jumps over the lazy dog".repeat(8);
        let expected = long
            .bytes()
            .fold(5381_u64, |h, b| (h * 33 + u64::from(b)) & u64::from(u32::MAX));
        assert_eq!(u64::from(djb2(&long)), expected);
    }

    #[test]
    fn test_djb2_uses_utf16_units() {
        // U+00E9 is a single UTF-16 unit but two UTF-8 bytes
        assert_eq!(djb2("\u{e9}"), 5381 * 33 + 0xe9);
        assert_ne!(djb2("\u{e9}"), djb2_bytes("\u{e9}".as_bytes()));
    }

    #[test]
    fn test_string_like_keys_agree() {
        let owned = String::from("Hobbit");
        let boxed: Box<str> = "Hobbit".into();
        let cow: Cow<'_, str> = Cow::Borrowed("Hobbit");

        assert_eq!(owned.key_hash(), "Hobbit".key_hash());
        assert_eq!(boxed.key_hash(), "Hobbit".key_hash());
        assert_eq!(cow.key_hash(), "Hobbit".key_hash());
        assert_eq!((&owned).key_hash(), owned.key_hash());
    }

    #[test]
    fn test_char_matches_single_char_string() {
        assert_eq!('x'.key_hash(), "x".key_hash());
        assert_eq!('\u{1f980}'.key_hash(), "\u{1f980}".key_hash());
    }

    #[test]
    fn test_integer_keys() {
        assert_eq!(7_u32.key_hash(), djb2_bytes(&[7, 0, 0, 0]));
        assert_ne!(1_u64.key_hash(), 2_u64.key_hash());
    }
}
