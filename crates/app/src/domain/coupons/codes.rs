//! Coupon code generation.

use rand::{Rng, seq::SliceRandom};

/// Number of characters in a generated coupon code.
pub const COUPON_CODE_LENGTH: usize = 6;

const COUPON_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Draw a random code of uppercase letters and digits.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..COUPON_CODE_LENGTH)
        .filter_map(|_| COUPON_CODE_ALPHABET.choose(rng))
        .map(|&byte| char::from(byte))
        .collect()
}

/// Normalise a user-supplied code; blank input means "no coupon".
pub fn normalize_code(code: Option<&str>) -> Option<String> {
    code.map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
}
