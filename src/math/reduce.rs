//! Montgomery and Barrett modular reduction for the ring modulus q = 3329.
//!
//! Montgomery keeps butterfly products in a compact signed range; Barrett
//! normalises to the canonical interval [0, q) at serialisation boundaries.
//! All reductions are branch-free.

use super::Q;

/// q^{-1} mod 2^{16}, as a signed 16-bit value (Montgomery inverse).
pub const QINV: i16 = -3327;

/// 2^{32} mod q, used to lift values into the Montgomery domain.
pub const R2: i32 = ((1u64 << 32) % (Q as u64)) as i32;

/// Montgomery reduction: computes `a * R^{-1} mod q` where R = 2^{16}.
///
/// Input: `a` in `{-q*2^{15}, ..., q*2^{15} - 1}`. Output: `r` in
/// `{-q+1, ..., q-1}` with `r = a*R^{-1} (mod q)`.
#[inline]
#[must_use]
pub const fn montgomery_reduce(a: i32) -> i16 {
    let t = (a as i16).wrapping_mul(QINV);
    ((a - (t as i32) * (Q as i32)) >> 16) as i16
}

/// Barrett reduction to the canonical representative in [0, q).
///
/// Valid for any `i16` input; the final masked add folds the centred
/// remainder into the non-negative range without a branch.
#[inline]
#[must_use]
pub const fn barrett_reduce(a: i16) -> i16 {
    const V: i32 = ((1i32 << 26) + (Q as i32) / 2) / (Q as i32); // 20159
    let t = ((V * (a as i32) + (1 << 25)) >> 26) as i16;
    // The true remainder always fits in i16, so wrapping arithmetic is exact.
    let r = a.wrapping_sub(t.wrapping_mul(Q));
    r + ((r >> 15) & Q)
}

/// Masked conditional subtraction: `a - q` if `a >= q`, else `a`.
#[inline]
#[must_use]
pub const fn cond_sub_q(a: i16) -> i16 {
    let t = a - Q;
    t + ((t >> 15) & Q)
}

/// Masked conditional addition: `a + q` if `a < 0`, else `a`, as unsigned.
#[inline]
#[must_use]
pub const fn cond_add_q(a: i16) -> u16 {
    (a as u16).wrapping_add(((a >> 15) as u16) & (Q as u16))
}

/// Field multiplication followed by Montgomery reduction: `a*b*R^{-1} mod q`.
#[inline]
#[must_use]
pub const fn fqmul(a: i16, b: i16) -> i16 {
    montgomery_reduce((a as i32) * (b as i32))
}
