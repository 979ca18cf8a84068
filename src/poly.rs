//! The two polynomial domains: `RingElement` (coefficient form, `R_q`) and
//! `NttElement` (NTT form, `T_q`).
//!
//! Both wrap 256 reduced coefficients, but they are deliberately distinct
//! types: adding a ring element to an NTT element is a bug, and the only
//! domain crossings are the by-value [`RingElement::ntt`] and
//! [`NttElement::inverse_ntt`]. The operations that are meaningful in both
//! domains -- coefficient-wise addition and subtraction, and the lossless
//! 12-bit encoding -- are written once against the sealed [`Element`] trait.

use core::ops;

use zeroize::Zeroize;

use crate::compress::CompressWidth;
use crate::error::KemError;
use crate::field;
use crate::ntt;
use crate::params::{N, POLY_BYTES, Q};

mod sealed {
    pub trait Sealed {}
}

/// Operations shared by both polynomial domains.
pub(crate) trait Element: sealed::Sealed + Sized {
    fn from_coeffs(coeffs: [u16; N]) -> Self;
    fn coeffs(&self) -> &[u16; N];
    fn coeffs_mut(&mut self) -> &mut [u16; N];

    fn zero() -> Self {
        Self::from_coeffs([0; N])
    }
}

/// Polynomial in coefficient form over `R_q = Z_q[X]/(X^256 + 1)`.
#[derive(Clone, Copy)]
pub(crate) struct RingElement([u16; N]);

/// Polynomial in the NTT domain: 128 residues modulo `X^2 - gamma_i`, pair
/// `(c_2i, c_2i+1)` holding the residue for the i-th quadratic.
#[derive(Clone, Copy)]
pub(crate) struct NttElement([u16; N]);

impl sealed::Sealed for RingElement {}
impl sealed::Sealed for NttElement {}

impl Element for RingElement {
    fn from_coeffs(coeffs: [u16; N]) -> Self {
        Self(coeffs)
    }

    fn coeffs(&self) -> &[u16; N] {
        &self.0
    }

    fn coeffs_mut(&mut self) -> &mut [u16; N] {
        &mut self.0
    }
}

impl Element for NttElement {
    fn from_coeffs(coeffs: [u16; N]) -> Self {
        Self(coeffs)
    }

    fn coeffs(&self) -> &[u16; N] {
        &self.0
    }

    fn coeffs_mut(&mut self) -> &mut [u16; N] {
        &mut self.0
    }
}

/// ByteEncode_12: two coefficients packed little-endian into three bytes.
/// Lossless over reduced coefficients; works in either domain.
pub(crate) fn byte_encode<T: Element>(f: &T, out: &mut [u8]) {
    debug_assert!(out.len() >= POLY_BYTES);
    let a = f.coeffs();
    for i in 0..N / 2 {
        let t0 = a[2 * i];
        let t1 = a[2 * i + 1];
        out[3 * i] = t0 as u8;
        out[3 * i + 1] = ((t0 >> 8) | (t1 << 4)) as u8;
        out[3 * i + 2] = (t1 >> 4) as u8;
    }
}

/// ByteDecode_12: inverse of [`byte_encode`]. Rejects any 12-bit value
/// `>= q`, which is what makes the encapsulation-key modulus check cheap.
pub(crate) fn byte_decode<T: Element>(b: &[u8]) -> Result<T, KemError> {
    debug_assert!(b.len() >= POLY_BYTES);
    let mut f = T::zero();
    let r = f.coeffs_mut();
    for i in 0..N / 2 {
        let d1 = u16::from(b[3 * i]) | ((u16::from(b[3 * i + 1]) & 0x0F) << 8);
        let d2 = (u16::from(b[3 * i + 1]) >> 4) | (u16::from(b[3 * i + 2]) << 4);
        if d1 >= Q || d2 >= Q {
            return Err(KemError::InvalidKey);
        }
        r[2 * i] = d1;
        r[2 * i + 1] = d2;
    }
    Ok(f)
}

fn add_into<T: Element>(dst: &mut T, src: &T) {
    for (d, &s) in dst.coeffs_mut().iter_mut().zip(src.coeffs()) {
        *d = field::add(*d, s);
    }
}

impl RingElement {
    /// Consuming forward NTT.
    #[must_use]
    pub(crate) fn ntt(mut self) -> NttElement {
        ntt::forward(&mut self.0);
        NttElement(self.0)
    }

    /// Compress every coefficient to `W::D` bits and pack into `out`.
    pub(crate) fn compress<W: CompressWidth>(&self, out: &mut [u8]) {
        W::encode(self, out);
    }

    /// Unpack `W::D`-bit values from `b` and decompress into `[0, q)`.
    #[must_use]
    pub(crate) fn decompress<W: CompressWidth>(b: &[u8]) -> Self {
        W::decode(b)
    }
}

impl NttElement {
    /// Consuming inverse NTT.
    #[must_use]
    pub(crate) fn inverse_ntt(mut self) -> RingElement {
        ntt::inverse(&mut self.0);
        RingElement(self.0)
    }

    /// Product in the NTT domain (128 degree-1 multiplications).
    #[must_use]
    pub(crate) fn basemul(&self, other: &Self) -> Self {
        Self(ntt::basemul(&self.0, &other.0))
    }
}

impl ops::AddAssign<&Self> for RingElement {
    fn add_assign(&mut self, rhs: &Self) {
        add_into(self, rhs);
    }
}

impl ops::AddAssign<&Self> for NttElement {
    fn add_assign(&mut self, rhs: &Self) {
        add_into(self, rhs);
    }
}

impl ops::Sub<&RingElement> for &RingElement {
    type Output = RingElement;

    fn sub(self, rhs: &RingElement) -> RingElement {
        let mut out = RingElement::zero();
        for (r, (&a, &b)) in out
            .0
            .iter_mut()
            .zip(self.coeffs().iter().zip(rhs.coeffs()))
        {
            *r = field::sub(a, b);
        }
        out
    }
}

impl core::fmt::Debug for RingElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RingElement")
            .field("coeffs[..4]", &&self.0[..4])
            .finish_non_exhaustive()
    }
}

impl core::fmt::Debug for NttElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NttElement")
            .field("coeffs[..4]", &&self.0[..4])
            .finish_non_exhaustive()
    }
}

impl Zeroize for RingElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Zeroize for NttElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_encode_decode_roundtrip() {
        let mut f = NttElement::zero();
        for (i, c) in f.coeffs_mut().iter_mut().enumerate() {
            *c = (i as u16 * 13) % Q;
        }
        let mut buf = [0u8; POLY_BYTES];
        byte_encode(&f, &mut buf);
        let g: NttElement = byte_decode(&buf).expect("valid encoding");
        assert_eq!(f.coeffs(), g.coeffs());
    }

    #[test]
    fn byte_decode_rejects_out_of_range() {
        // Encode q itself into the first 12-bit slot: bytes (q & 0xFF, q >> 8).
        let mut buf = [0u8; POLY_BYTES];
        buf[0] = (Q & 0xFF) as u8;
        buf[1] = (Q >> 8) as u8;
        let result: Result<NttElement, _> = byte_decode(&buf);
        assert_eq!(result.unwrap_err(), KemError::InvalidKey);

        // q - 1 in the same slot is fine.
        buf[0] = ((Q - 1) & 0xFF) as u8;
        buf[1] = ((Q - 1) >> 8) as u8;
        let result: Result<NttElement, _> = byte_decode(&buf);
        assert!(result.is_ok());
    }

    #[test]
    fn byte_decode_rejects_high_nibble_slot() {
        // Out-of-range value in the second coefficient of a pair.
        let mut buf = [0u8; POLY_BYTES];
        buf[1] = 0x10; // d2 low nibble
        buf[2] = 0xFF; // d2 = 0xFF1 = 4081 >= q
        let result: Result<RingElement, _> = byte_decode(&buf);
        assert_eq!(result.unwrap_err(), KemError::InvalidKey);
    }

    #[test]
    fn add_sub_inverse() {
        let mut a = RingElement::zero();
        let mut b = RingElement::zero();
        for i in 0..N {
            a.coeffs_mut()[i] = (i as u16 * 3) % Q;
            b.coeffs_mut()[i] = ((N - i) as u16 * 5) % Q;
        }
        let mut sum = a;
        sum += &b;
        let back = &sum - &b;
        assert_eq!(back.coeffs(), a.coeffs());
    }

    #[test]
    fn ntt_inverse_ntt_roundtrip() {
        let mut f = RingElement::zero();
        for (i, c) in f.coeffs_mut().iter_mut().enumerate() {
            *c = (i as u16 * 19 + 1) % Q;
        }
        let original = *f.coeffs();
        let back = f.ntt().inverse_ntt();
        assert_eq!(*back.coeffs(), original);
    }
}
