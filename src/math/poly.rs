//! Ring-element types: [`Polynomial`] (time domain) and [`NttPolynomial`]
//! (NTT domain).
//!
//! The two domains are separate types, so a pointwise product can only be
//! formed between NTT-domain elements and the transforms are the only way to
//! cross between them: `ntt()` consumes a `Polynomial`, `ntt_inverse()`
//! consumes an `NttPolynomial`. Addition is defined in both domains.

use core::ops;

use zeroize::Zeroize;

use super::{N, Q, SYMBYTES};
use super::compress::CompressWidth;
use super::encode;
use super::ntt;
use super::reduce::{barrett_reduce, fqmul, montgomery_reduce, R2};
use super::sample::CbdWidth;

/// Polynomial in standard (coefficient) form over `R_q = Z_q[X]/(X^256 + 1)`.
#[derive(Clone, Copy)]
pub struct Polynomial(pub(crate) [i16; N]);

/// Polynomial in NTT (bit-reversed) domain.
#[derive(Clone, Copy)]
pub struct NttPolynomial(pub(crate) [i16; N]);

impl Polynomial {
    /// The zero polynomial.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0i16; N])
    }

    /// Consuming forward NTT transform.
    #[must_use]
    pub fn ntt(mut self) -> NttPolynomial {
        ntt::forward_ntt(&mut self.0);
        NttPolynomial(self.0)
    }

    /// Barrett-reduce every coefficient to the canonical range [0, q).
    pub fn reduce(&mut self) {
        for c in self.0.iter_mut() {
            *c = barrett_reduce(*c);
        }
    }

    /// Multiply every coefficient by `s` modulo q.
    pub fn scalar_mul(&mut self, s: i16) {
        // Lift the scalar into the Montgomery domain once, so each
        // per-coefficient product lands back in plain representation.
        let s_mont = montgomery_reduce((s as i32) * R2);
        for c in self.0.iter_mut() {
            *c = fqmul(*c, s_mont);
        }
    }

    /// Largest centred coefficient magnitude, `max_i |c_i|` with coefficients
    /// taken in `(-q/2, q/2]`.
    #[must_use]
    pub fn inf_norm(&self) -> i16 {
        let mut max = 0i16;
        for &c in &self.0 {
            let v = barrett_reduce(c);
            let over = (Q / 2 - v) >> 15; // all-ones when v > q/2
            let centred = v - (over & Q);
            let sign = centred >> 15;
            let abs = (centred ^ sign) - sign;
            max = if abs > max { abs } else { max };
        }
        max
    }

    /// Compress to `D` bits per coefficient and write to `r`.
    pub fn compress<D: CompressWidth>(&self, r: &mut [u8]) {
        D::compress_poly(r, &self.0);
    }

    /// Decompress from a buffer of `D`-bit values.
    #[must_use]
    pub fn decompress<D: CompressWidth>(a: &[u8]) -> Self {
        let mut p = Self::zero();
        D::decompress_poly(&mut p.0, a);
        p
    }

    /// Decode a 32-byte message into a polynomial, one bit per coefficient.
    #[must_use]
    pub fn from_message(msg: &[u8; SYMBYTES]) -> Self {
        let mut p = Self::zero();
        encode::message_to_coeffs(&mut p.0, msg);
        p
    }

    /// Encode the polynomial back to a 32-byte message.
    #[must_use]
    pub fn to_message(&self) -> [u8; SYMBYTES] {
        let mut msg = [0u8; SYMBYTES];
        encode::coeffs_to_message(&mut msg, &self.0);
        msg
    }

    /// Sample a noise polynomial from a PRF output buffer via the sealed
    /// [`CbdWidth`] trait.
    #[must_use]
    pub fn sample_cbd<Eta: CbdWidth>(buf: &[u8]) -> Self {
        let mut p = Self::zero();
        Eta::sample(&mut p.0, buf);
        p
    }

    #[must_use]
    pub const fn coeffs(&self) -> &[i16; N] {
        &self.0
    }

    #[must_use]
    pub fn coeffs_mut(&mut self) -> &mut [i16; N] {
        &mut self.0
    }
}

impl NttPolynomial {
    /// The zero polynomial.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0i16; N])
    }

    /// Consuming inverse NTT; the result carries a Montgomery factor that a
    /// preceding [`basemul`](Self::basemul) chain cancels.
    #[must_use]
    pub fn ntt_inverse(mut self) -> Polynomial {
        ntt::inverse_ntt(&mut self.0);
        Polynomial(self.0)
    }

    /// Barrett-reduce every coefficient to the canonical range [0, q).
    pub fn reduce(&mut self) {
        for c in self.0.iter_mut() {
            *c = barrett_reduce(*c);
        }
    }

    /// Multiply every coefficient by `R = 2^{16} mod q`, converting to the
    /// Montgomery domain.
    pub fn to_mont(&mut self) {
        for c in self.0.iter_mut() {
            *c = montgomery_reduce((*c as i32) * R2);
        }
    }

    /// Pointwise product in the NTT domain: 128 degree-1 multiplications in
    /// the quadratic extensions `Z_q[X]/(X^2 - zeta_i)` with the paired
    /// twiddle negated.
    #[must_use]
    pub fn basemul(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..N / 4 {
            let zeta = ntt::ZETAS[64 + i];
            ntt::basemul(
                (&mut r.0[4 * i..4 * i + 2]).try_into().expect("chunk of 2"),
                (&self.0[4 * i..4 * i + 2]).try_into().expect("chunk of 2"),
                (&other.0[4 * i..4 * i + 2]).try_into().expect("chunk of 2"),
                zeta,
            );
            ntt::basemul(
                (&mut r.0[4 * i + 2..4 * i + 4]).try_into().expect("chunk of 2"),
                (&self.0[4 * i + 2..4 * i + 4]).try_into().expect("chunk of 2"),
                (&other.0[4 * i + 2..4 * i + 4]).try_into().expect("chunk of 2"),
                -zeta,
            );
        }
        r
    }

    /// Serialize to 384 bytes (12-bit packing).
    pub fn to_bytes(&self, r: &mut [u8]) {
        encode::coeffs_to_bytes(r, &self.0);
    }

    /// Deserialize from 384 bytes (12-bit unpacking).
    #[must_use]
    pub fn from_bytes(a: &[u8]) -> Self {
        let mut p = Self::zero();
        encode::bytes_to_coeffs(&mut p.0, a);
        p
    }

    #[must_use]
    pub const fn coeffs(&self) -> &[i16; N] {
        &self.0
    }

    #[must_use]
    pub fn coeffs_mut(&mut self) -> &mut [i16; N] {
        &mut self.0
    }
}

/// Ring multiplication through the transform: both operands move to the NTT
/// domain, multiply pointwise, and come back.
pub fn ring_mul(a: &Polynomial, b: &Polynomial) -> Polynomial {
    let mut r = a.ntt().basemul(&b.ntt()).ntt_inverse();
    // Undo the Montgomery factor left by the inverse transform.
    for c in r.0.iter_mut() {
        *c = barrett_reduce(fqmul(*c, 1));
    }
    r
}

impl From<[i16; N]> for Polynomial {
    #[inline]
    fn from(coeffs: [i16; N]) -> Self {
        Self(coeffs)
    }
}

impl Default for Polynomial {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl Default for NttPolynomial {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl Zeroize for Polynomial {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Zeroize for NttPolynomial {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl core::fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Polynomial")
            .field("coeffs[..4]", &&self.0[..4])
            .finish_non_exhaustive()
    }
}

impl core::fmt::Debug for NttPolynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NttPolynomial")
            .field("coeffs[..4]", &&self.0[..4])
            .finish_non_exhaustive()
    }
}

impl<'b> ops::Add<&'b Polynomial> for &Polynomial {
    type Output = Polynomial;
    #[inline]
    fn add(self, rhs: &'b Polynomial) -> Polynomial {
        let mut r = Polynomial::zero();
        for i in 0..N {
            r.0[i] = self.0[i] + rhs.0[i];
        }
        r
    }
}

impl<'b> ops::Sub<&'b Polynomial> for &Polynomial {
    type Output = Polynomial;
    #[inline]
    fn sub(self, rhs: &'b Polynomial) -> Polynomial {
        let mut r = Polynomial::zero();
        for i in 0..N {
            r.0[i] = self.0[i] - rhs.0[i];
        }
        r
    }
}

impl ops::Neg for &Polynomial {
    type Output = Polynomial;
    #[inline]
    fn neg(self) -> Polynomial {
        let mut r = Polynomial::zero();
        for i in 0..N {
            r.0[i] = barrett_reduce(-self.0[i]);
        }
        r
    }
}

impl ops::AddAssign<&Self> for Polynomial {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        for i in 0..N {
            self.0[i] += rhs.0[i];
        }
    }
}

impl ops::SubAssign<&Self> for Polynomial {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        for i in 0..N {
            self.0[i] -= rhs.0[i];
        }
    }
}

impl<'b> ops::Add<&'b NttPolynomial> for &NttPolynomial {
    type Output = NttPolynomial;
    #[inline]
    fn add(self, rhs: &'b NttPolynomial) -> NttPolynomial {
        let mut r = NttPolynomial::zero();
        for i in 0..N {
            r.0[i] = self.0[i] + rhs.0[i];
        }
        r
    }
}

impl ops::AddAssign<&Self> for NttPolynomial {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        for i in 0..N {
            self.0[i] += rhs.0[i];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub_inverse() {
        let mut a = Polynomial::zero();
        let mut b = Polynomial::zero();
        for i in 0..N {
            a.0[i] = (i as i16) % Q;
            b.0[i] = ((N - i) as i16) % Q;
        }
        let sum = &a + &b;
        let recovered = &sum - &b;
        assert_eq!(a.0, recovered.0);
    }

    #[test]
    fn negate_is_additive_inverse() {
        let mut a = Polynomial::zero();
        for i in 0..N {
            a.0[i] = (i as i16 * 31) % Q;
        }
        let mut sum = &a + &(-&a);
        sum.reduce();
        assert!(sum.0.iter().all(|&c| c == 0));
    }

    #[test]
    fn scalar_mul_matches_repeated_addition() {
        let mut a = Polynomial::zero();
        for i in 0..N {
            a.0[i] = (i as i16 * 7) % Q;
        }
        let mut tripled = a;
        tripled.scalar_mul(3);
        tripled.reduce();

        let mut expected = &(&a + &a) + &a;
        expected.reduce();
        assert_eq!(tripled.0, expected.0);
    }

    #[test]
    fn inf_norm_centred() {
        let mut a = Polynomial::zero();
        a.0[0] = 3; // centred: 3
        a.0[1] = Q - 2; // centred: -2
        assert_eq!(a.inf_norm(), 3);

        a.0[2] = Q / 2; // centred: 1664, the maximum magnitude
        assert_eq!(a.inf_norm(), Q / 2);
    }

    #[test]
    fn inf_norm_of_zero() {
        assert_eq!(Polynomial::zero().inf_norm(), 0);
    }

    #[test]
    fn msg_roundtrip() {
        let msg: [u8; SYMBYTES] = core::array::from_fn(|i| (i * 37) as u8);
        let p = Polynomial::from_message(&msg);
        let recovered = p.to_message();
        assert_eq!(msg, recovered);
    }

    #[test]
    fn ring_mul_identity() {
        let mut a = Polynomial::zero();
        for i in 0..N {
            a.0[i] = (i as i16 * 13) % Q;
        }
        let mut one = Polynomial::zero();
        one.0[0] = 1;

        let mut got = ring_mul(&a, &one);
        got.reduce();
        let mut expected = a;
        expected.reduce();
        assert_eq!(got.0, expected.0);
    }
}
