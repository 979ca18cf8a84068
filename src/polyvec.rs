//! Rank-3 module vectors and the public matrix.

use core::ops;

use zeroize::Zeroize;

use crate::compress::CompressWidth;
use crate::error::KemError;
use crate::poly::{byte_decode, byte_encode, Element, NttElement, RingElement};
use crate::params::{K, POLY_BYTES};

/// A vector of `K` ring elements in coefficient form.
#[derive(Clone)]
pub(crate) struct Vector([RingElement; K]);

/// A vector of `K` elements in the NTT domain.
#[derive(Clone, Debug)]
pub(crate) struct NttVector([NttElement; K]);

/// The `K x K` public matrix, stored as rows of NTT elements.
pub(crate) struct NttMatrix([NttVector; K]);

impl Vector {
    #[must_use]
    pub(crate) fn zero() -> Self {
        Self([RingElement::zero(); K])
    }

    #[must_use]
    pub(crate) fn ntt(self) -> NttVector {
        NttVector(self.0.map(RingElement::ntt))
    }

    pub(crate) fn polys_mut(&mut self) -> &mut [RingElement; K] {
        &mut self.0
    }

    /// Compress each element at width `W` and pack them back to back.
    pub(crate) fn compress<W: CompressWidth>(&self, out: &mut [u8]) {
        for (i, p) in self.0.iter().enumerate() {
            p.compress::<W>(&mut out[i * W::POLY_BYTES..(i + 1) * W::POLY_BYTES]);
        }
    }

    #[must_use]
    pub(crate) fn decompress<W: CompressWidth>(b: &[u8]) -> Self {
        let mut v = Self::zero();
        for (i, p) in v.0.iter_mut().enumerate() {
            *p = RingElement::decompress::<W>(
                &b[i * W::POLY_BYTES..(i + 1) * W::POLY_BYTES],
            );
        }
        v
    }
}

impl NttVector {
    #[must_use]
    pub(crate) fn zero() -> Self {
        Self([NttElement::zero(); K])
    }

    #[must_use]
    pub(crate) fn inverse_ntt(self) -> Vector {
        Vector(self.0.map(NttElement::inverse_ntt))
    }

    pub(crate) fn polys_mut(&mut self) -> &mut [NttElement; K] {
        &mut self.0
    }

    /// `sum_i self_i * other_i` in the NTT domain.
    #[must_use]
    pub(crate) fn inner_product(&self, other: &Self) -> NttElement {
        let mut acc = self.0[0].basemul(&other.0[0]);
        for i in 1..K {
            acc += &self.0[i].basemul(&other.0[i]);
        }
        acc
    }

    /// `ByteEncode_12` of each element, concatenated (`K * 384` bytes).
    pub(crate) fn to_bytes(&self, out: &mut [u8]) {
        for (i, p) in self.0.iter().enumerate() {
            byte_encode(p, &mut out[i * POLY_BYTES..(i + 1) * POLY_BYTES]);
        }
    }

    /// Decode `K * 384` bytes, rejecting out-of-range coefficients.
    pub(crate) fn from_bytes(b: &[u8]) -> Result<Self, KemError> {
        let mut v = Self::zero();
        for (i, p) in v.0.iter_mut().enumerate() {
            *p = byte_decode(&b[i * POLY_BYTES..(i + 1) * POLY_BYTES])?;
        }
        Ok(v)
    }
}

impl NttMatrix {
    #[must_use]
    pub(crate) fn zero() -> Self {
        Self(core::array::from_fn(|_| NttVector::zero()))
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [NttVector; K] {
        &mut self.0
    }

    /// Matrix-vector product, row by row.
    #[must_use]
    pub(crate) fn mul_vec(&self, v: &NttVector) -> NttVector {
        let mut out = NttVector::zero();
        for (r, row) in out.0.iter_mut().zip(self.0.iter()) {
            *r = row.inner_product(v);
        }
        out
    }
}

impl ops::AddAssign<&Self> for Vector {
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
    }
}

impl ops::AddAssign<&Self> for NttVector {
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
    }
}

impl Zeroize for NttVector {
    fn zeroize(&mut self) {
        for p in &mut self.0 {
            p.zeroize();
        }
    }
}
