//! Constant-time byte comparison and selection.
//!
//! The FO transform compares the received ciphertext against the
//! re-encryption and selects between the real and the rejection key. Both
//! steps must not branch or short-circuit on the outcome.

use core::hint::black_box;

/// Folded XOR-OR equality over whole slices. Returns 1 when `a == b`,
/// 0 otherwise. Slices must have equal length.
#[inline]
#[must_use]
pub(crate) fn ct_eq(a: &[u8], b: &[u8]) -> u8 {
    debug_assert_eq!(a.len(), b.len());
    let mut acc = 0u8;
    for (&x, &y) in a.iter().zip(b.iter()) {
        acc |= x ^ y;
    }
    // The barrier keeps the accumulator opaque so the loop cannot be
    // rewritten into an early-exit compare.
    let acc = u16::from(black_box(acc));
    (acc.wrapping_sub(1) >> 15) as u8
}

/// Overwrite `dst` with `src` when `cond` is 1; leave it untouched when 0.
/// `cond` must be exactly 0 or 1.
#[inline]
pub(crate) fn ct_select(dst: &mut [u8], src: &[u8], cond: u8) {
    debug_assert_eq!(dst.len(), src.len());
    debug_assert!(cond <= 1);
    let mask = black_box(cond).wrapping_neg(); // 0x00 or 0xFF
    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d ^= mask & (*d ^ s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_on_equal_slices() {
        assert_eq!(ct_eq(&[0u8; 1088], &[0u8; 1088]), 1);
        assert_eq!(ct_eq(&[], &[]), 1);
    }

    #[test]
    fn eq_detects_single_bit_anywhere() {
        let a = [0x5Au8; 64];
        for i in 0..64 {
            for bit in 0..8 {
                let mut b = a;
                b[i] ^= 1 << bit;
                assert_eq!(ct_eq(&a, &b), 0, "flip at byte {i} bit {bit}");
            }
        }
    }

    #[test]
    fn select_keeps_dst_when_cond_zero() {
        let mut dst = [0x11u8; 32];
        ct_select(&mut dst, &[0x22; 32], 0);
        assert_eq!(dst, [0x11; 32]);
    }

    #[test]
    fn select_copies_src_when_cond_one() {
        let mut dst = [0x11u8; 32];
        ct_select(&mut dst, &[0x22; 32], 1);
        assert_eq!(dst, [0x22; 32]);
    }
}
