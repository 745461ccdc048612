//! Rank-`K` vectors and matrices of ring elements.
//!
//! The time/NTT domain split of [`poly`](super::poly) carries over:
//! [`Vector`] holds standard-form polynomials, [`NttVector`] holds NTT-form
//! ones, and [`NttMatrix`] only ever holds NTT-form rows (the public matrix
//! is sampled directly in that domain).

use core::ops;

use zeroize::Zeroize;

use super::POLYBYTES;
use super::compress::CompressWidth;
use super::poly::{NttPolynomial, Polynomial};

/// A vector of `K` polynomials in standard (coefficient) form.
#[derive(Clone)]
pub struct Vector<const K: usize> {
    pub(crate) polys: [Polynomial; K],
}

/// A vector of `K` polynomials in NTT domain.
#[derive(Clone)]
pub struct NttVector<const K: usize> {
    pub(crate) polys: [NttPolynomial; K],
}

impl<const K: usize> Vector<K> {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            polys: [Polynomial::zero(); K],
        }
    }

    /// Forward NTT on every component.
    #[must_use]
    pub fn ntt(self) -> NttVector<K> {
        let polys = self.polys.map(Polynomial::ntt);
        NttVector { polys }
    }

    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    /// Compress every component with `D` bits per coefficient.
    pub fn compress<D: CompressWidth>(&self, r: &mut [u8]) {
        for (i, p) in self.polys.iter().enumerate() {
            p.compress::<D>(&mut r[i * D::POLY_BYTES..(i + 1) * D::POLY_BYTES]);
        }
    }

    /// Decompress every component from `D`-bit values.
    #[must_use]
    pub fn decompress<D: CompressWidth>(a: &[u8]) -> Self {
        let mut v = Self::zero();
        for (i, p) in v.polys.iter_mut().enumerate() {
            *p = Polynomial::decompress::<D>(&a[i * D::POLY_BYTES..(i + 1) * D::POLY_BYTES]);
        }
        v
    }

    #[must_use]
    pub const fn polys(&self) -> &[Polynomial; K] {
        &self.polys
    }

    #[must_use]
    pub fn polys_mut(&mut self) -> &mut [Polynomial; K] {
        &mut self.polys
    }
}

impl<const K: usize> NttVector<K> {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            polys: [NttPolynomial::zero(); K],
        }
    }

    /// Inverse NTT on every component.
    #[must_use]
    pub fn ntt_inverse(self) -> Vector<K> {
        let polys = self.polys.map(NttPolynomial::ntt_inverse);
        Vector { polys }
    }

    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    /// `sum_i(self[i] * other[i])` in the NTT domain, reduced.
    #[must_use]
    pub fn inner_product(&self, other: &Self) -> NttPolynomial {
        let mut acc = self.polys[0].basemul(&other.polys[0]);
        for i in 1..K {
            acc += &self.polys[i].basemul(&other.polys[i]);
        }
        acc.reduce();
        acc
    }

    /// Serialize to `K * 384` bytes (12-bit packing).
    pub fn to_bytes(&self, r: &mut [u8]) {
        for (i, p) in self.polys.iter().enumerate() {
            p.to_bytes(&mut r[i * POLYBYTES..(i + 1) * POLYBYTES]);
        }
    }

    #[must_use]
    pub fn from_bytes(a: &[u8]) -> Self {
        let mut v = Self::zero();
        for (i, p) in v.polys.iter_mut().enumerate() {
            *p = NttPolynomial::from_bytes(&a[i * POLYBYTES..(i + 1) * POLYBYTES]);
        }
        v
    }

    #[must_use]
    pub const fn polys(&self) -> &[NttPolynomial; K] {
        &self.polys
    }

    #[must_use]
    pub fn polys_mut(&mut self) -> &mut [NttPolynomial; K] {
        &mut self.polys
    }
}

/// K x K matrix of NTT-domain polynomials (the expanded public matrix).
pub struct NttMatrix<const K: usize> {
    pub(crate) rows: [NttVector<K>; K],
}

impl<const K: usize> NttMatrix<K> {
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self {
            rows: core::array::from_fn(|_| NttVector::zero()),
        }
    }

    /// `A * v` with a Montgomery-domain conversion on each result row, so
    /// the basemul factor `R^{-1}` is cancelled without an inverse NTT.
    #[must_use]
    pub fn mul_vec_tomont(&self, v: &NttVector<K>) -> NttVector<K> {
        let mut result = NttVector::zero();
        for (r_poly, a_row) in result.polys.iter_mut().zip(self.rows.iter()) {
            *r_poly = a_row.inner_product(v);
            r_poly.to_mont();
        }
        result
    }

    /// `A * v`, leaving the basemul factor for a later inverse NTT.
    #[must_use]
    pub fn mul_vec(&self, v: &NttVector<K>) -> NttVector<K> {
        let mut result = NttVector::zero();
        for (r_poly, a_row) in result.polys.iter_mut().zip(self.rows.iter()) {
            *r_poly = a_row.inner_product(v);
        }
        result
    }

    #[must_use]
    pub const fn rows(&self) -> &[NttVector<K>; K] {
        &self.rows
    }

    #[must_use]
    pub fn rows_mut(&mut self) -> &mut [NttVector<K>; K] {
        &mut self.rows
    }
}

impl<'b, const K: usize> ops::Add<&'b Vector<K>> for &Vector<K> {
    type Output = Vector<K>;
    fn add(self, rhs: &'b Vector<K>) -> Vector<K> {
        let mut r = Vector::zero();
        for i in 0..K {
            r.polys[i] = &self.polys[i] + &rhs.polys[i];
        }
        r
    }
}

impl<'b, const K: usize> ops::Sub<&'b Vector<K>> for &Vector<K> {
    type Output = Vector<K>;
    fn sub(self, rhs: &'b Vector<K>) -> Vector<K> {
        let mut r = Vector::zero();
        for i in 0..K {
            r.polys[i] = &self.polys[i] - &rhs.polys[i];
        }
        r
    }
}

impl<const K: usize> ops::AddAssign<&Self> for Vector<K> {
    fn add_assign(&mut self, rhs: &Self) {
        for i in 0..K {
            self.polys[i] += &rhs.polys[i];
        }
    }
}

impl<const K: usize> ops::AddAssign<&Self> for NttVector<K> {
    fn add_assign(&mut self, rhs: &Self) {
        for i in 0..K {
            self.polys[i] += &rhs.polys[i];
        }
    }
}

impl<const K: usize> Default for Vector<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const K: usize> Default for NttVector<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const K: usize> Zeroize for Vector<K> {
    fn zeroize(&mut self) {
        for p in &mut self.polys {
            p.zeroize();
        }
    }
}

impl<const K: usize> Zeroize for NttVector<K> {
    fn zeroize(&mut self) {
        for p in &mut self.polys {
            p.zeroize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{N, Q};

    #[test]
    fn tobytes_frombytes_roundtrip() {
        let mut v = NttVector::<3>::zero();
        for k in 0..3 {
            for i in 0..N {
                v.polys[k].0[i] = ((k * N + i) as i16 * 7) % (Q - 1);
            }
        }
        let mut buf = [0u8; 3 * POLYBYTES];
        v.to_bytes(&mut buf);
        let v2 = NttVector::<3>::from_bytes(&buf);
        for k in 0..3 {
            assert_eq!(v.polys[k].0, v2.polys[k].0, "poly {k} mismatch");
        }
    }

    #[test]
    fn add_zero_identity() {
        let mut v = Vector::<2>::zero();
        v.polys[0].0[0] = 42;
        v.polys[1].0[255] = 100;
        let zero = Vector::<2>::zero();
        let result = &v + &zero;
        assert_eq!(result.polys[0].0[0], 42);
        assert_eq!(result.polys[1].0[255], 100);
    }

    #[test]
    fn add_sub_inverse() {
        let mut a = Vector::<3>::zero();
        let mut b = Vector::<3>::zero();
        for k in 0..3 {
            for i in 0..N {
                a.polys[k].0[i] = ((k + i) as i16 * 3) % Q;
                b.polys[k].0[i] = ((k * i) as i16 * 5) % Q;
            }
        }
        let sum = &a + &b;
        let recovered = &sum - &b;
        for k in 0..3 {
            assert_eq!(a.polys[k].0, recovered.polys[k].0, "poly {k} mismatch");
        }
    }

    #[test]
    fn inner_product_bilinear_in_zero() {
        let mut a = NttVector::<2>::zero();
        for i in 0..N {
            a.polys[0].0[i] = (i as i16 * 3) % Q;
            a.polys[1].0[i] = (i as i16 * 5) % Q;
        }
        let zero = NttVector::<2>::zero();
        let p = a.inner_product(&zero);
        assert!(p.coeffs().iter().all(|&c| c == 0));
    }

    #[test]
    fn zeroize_clears_coefficients() {
        let mut v = Vector::<2>::zero();
        v.polys[0].0[7] = 1234;
        v.zeroize();
        assert!(v.polys.iter().all(|p| p.coeffs().iter().all(|&c| c == 0)));
    }
}
