//! Polynomial-style string hash used by every collision strategy.
//!
//! Each character contributes `(code * z^i) mod m`, the terms are summed and
//! the sum is reduced once more. This is not Horner's scheme: the per-term
//! reduction changes the result and is part of the observable table layout.

/// Hash `key` with `multiplier` into `[0, modulus)`.
///
/// Character codes are Unicode scalar values. The running power of the
/// multiplier is kept reduced modulo `modulus`, which leaves every term
/// unchanged while keeping the arithmetic inside `u128`.
pub fn poly_hash(key: &str, multiplier: u64, modulus: usize) -> usize {
    debug_assert!(modulus > 0, "modulus must be positive");
    let m = modulus as u128;
    let z = u128::from(multiplier) % m;
    let mut power = 1 % m;
    let mut sum: u128 = 0;
    for ch in key.chars() {
        let code = u128::from(u32::from(ch));
        sum += (code * power) % m;
        power = power * z % m;
    }
    (sum % m) as usize
}

/// Primary slot and probe step for double hashing.
///
/// `h2 = c2 - (poly_hash(key, z2, capacity) mod c2)`, so the step always
/// lies in `[1, c2]`.
pub fn double_hash(key: &str, z1: u64, z2: u64, c2: u64, capacity: usize) -> (usize, usize) {
    debug_assert!(c2 > 0, "step modulus must be positive");
    let h1 = poly_hash(key, z1, capacity);
    let secondary = poly_hash(key, z2, capacity) as u64;
    let h2 = c2 - (secondary % c2);
    (h1, h2 as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Straightforward big-integer reference: term-wise reduction, then sum.
    fn reference(key: &str, z: u64, m: usize) -> usize {
        let m = m as u128;
        let mut sum = 0u128;
        for (i, ch) in key.chars().enumerate() {
            let mut p = 1u128;
            for _ in 0..i {
                p = p * u128::from(z) % m;
            }
            sum += u128::from(u32::from(ch)) * p % m;
        }
        (sum % m) as usize
    }

    #[test]
    fn matches_term_wise_reduction() {
        // "ab" with z=31, m=7: 97 % 7 = 6, (98 * 31) % 7 = 0 -> 6
        assert_eq!(poly_hash("ab", 31, 7), 6);
        // "cat" with z=31, m=7: 99%7=1, 97*31%7=4, 116*961%7=1 -> 6
        assert_eq!(poly_hash("cat", 31, 7), 6);
        for key in ["", "a", "dog", "bird", "hello world", "ünïcödé"] {
            for m in [1, 2, 3, 7, 11, 97, 1_000_003] {
                assert_eq!(poly_hash(key, 31, m), reference(key, 31, m), "{key} mod {m}");
            }
        }
    }

    #[test]
    fn empty_key_hashes_to_zero() {
        assert_eq!(poly_hash("", 31, 13), 0);
    }

    #[test]
    fn huge_multiplier_does_not_overflow() {
        let key = "a fairly long key with many characters to raise the exponent";
        let h = poly_hash(key, u64::MAX, usize::MAX);
        assert!(h < usize::MAX);
        assert_eq!(poly_hash(key, u64::MAX, 101), reference(key, u64::MAX, 101));
    }

    #[test]
    fn zero_multiplier_only_counts_first_character() {
        assert_eq!(poly_hash("abc", 0, 1000), 97);
    }

    #[test]
    fn double_hash_step_is_never_zero() {
        for c2 in 1..12u64 {
            for key in ["", "x", "cat", "dog", "bird", "zebra"] {
                for cap in [1, 3, 7, 13] {
                    let (h1, h2) = double_hash(key, 31, 37, c2, cap);
                    assert!(h1 < cap);
                    assert!((1..=c2 as usize).contains(&h2), "h2={h2} c2={c2}");
                }
            }
        }
    }
}
