//! Extendable-output function adapters and the domain-separation map.
//!
//! Two sponge configurations back everything in the scheme:
//!
//! | Name       | Primitive | Used for |
//! |------------|-----------|----------|
//! | [`Xof128`] | SHAKE-128 | uniform matrix expansion |
//! | [`Xof256`] | SHAKE-256 | noise PRF, seed splits, hashing, KDF |
//!
//! Wherever one seed feeds several derivations, each derivation absorbs a
//! single distinguishing byte after the seed material. The complete tag map
//! lives in the `DS_*` constants below; matrix expansion absorbs
//! `rho || j || i` with no tag.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake256};
use zeroize::Zeroize;

use crate::math::SYMBYTES;

/// Seed split in key generation: `(rho, sigma, z) = XOF256(d || DS)`.
const DS_KEYGEN_SPLIT: u8 = 0x00;
/// Session split in encapsulation: `(k_bar, r) = XOF256(m || H(pk) || DS)`.
const DS_ENCAPS_SPLIT: u8 = 0x01;
/// Noise PRF for secret vectors (s in key generation, r in encryption).
pub(crate) const DS_SECRET_NOISE: u8 = 0x02;
/// Noise PRF for error terms (e, e1, e2).
pub(crate) const DS_ERROR_NOISE: u8 = 0x03;
/// Final key derivation from an accept/reject candidate and H(ct).
const DS_KDF: u8 = 0x04;

/// SHAKE-128 context: absorb, then squeeze. Used for matrix expansion.
#[derive(Default)]
pub struct Xof128(Shake128);

/// SHAKE-256 context: absorb, then squeeze. Used everywhere a 256-bit
/// security margin is required.
#[derive(Default)]
pub struct Xof256(Shake256);

impl Xof128 {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    /// Finalize the absorb phase; the returned reader squeezes any length.
    #[must_use]
    pub fn squeeze(self) -> impl XofReader {
        self.0.finalize_xof()
    }
}

impl Xof256 {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    /// Finalize the absorb phase; the returned reader squeezes any length.
    #[must_use]
    pub fn squeeze(self) -> impl XofReader {
        self.0.finalize_xof()
    }
}

/// `H(input)`: XOF256 squeezed to 32 bytes. Applied to public keys,
/// ciphertexts, and fresh entropy; none of those are reused seeds, so no
/// tag is absorbed.
#[must_use]
pub fn hash_h(input: &[u8]) -> [u8; SYMBYTES] {
    let mut xof = Xof256::new();
    xof.absorb(input);
    let mut out = [0u8; SYMBYTES];
    xof.squeeze().read(&mut out);
    out
}

/// Key-generation seed split: one 32-byte seed expands to the matrix seed
/// `rho`, the noise seed `sigma`, and the implicit-rejection secret `z`.
#[must_use]
pub(crate) fn expand_keygen_seed(
    d: &[u8; SYMBYTES],
) -> ([u8; SYMBYTES], [u8; SYMBYTES], [u8; SYMBYTES]) {
    let mut xof = Xof256::new();
    xof.absorb(d);
    xof.absorb(&[DS_KEYGEN_SPLIT]);
    let mut buf = [0u8; 3 * SYMBYTES];
    xof.squeeze().read(&mut buf);

    let mut rho = [0u8; SYMBYTES];
    let mut sigma = [0u8; SYMBYTES];
    let mut z = [0u8; SYMBYTES];
    rho.copy_from_slice(&buf[..SYMBYTES]);
    sigma.copy_from_slice(&buf[SYMBYTES..2 * SYMBYTES]);
    z.copy_from_slice(&buf[2 * SYMBYTES..]);
    buf.zeroize();
    (rho, sigma, z)
}

/// Session split shared by encapsulation and the decapsulation re-encrypt:
/// `(k_bar, r) = XOF256(m || h_pk || tag)`.
#[must_use]
pub(crate) fn derive_session(
    m: &[u8; SYMBYTES],
    h_pk: &[u8; SYMBYTES],
) -> ([u8; SYMBYTES], [u8; SYMBYTES]) {
    let mut xof = Xof256::new();
    xof.absorb(m);
    xof.absorb(h_pk);
    xof.absorb(&[DS_ENCAPS_SPLIT]);
    let mut buf = [0u8; 2 * SYMBYTES];
    xof.squeeze().read(&mut buf);

    let mut k_bar = [0u8; SYMBYTES];
    let mut coins = [0u8; SYMBYTES];
    k_bar.copy_from_slice(&buf[..SYMBYTES]);
    coins.copy_from_slice(&buf[SYMBYTES..]);
    buf.zeroize();
    (k_bar, coins)
}

/// Noise PRF: `XOF256(seed || tag || nonce)` squeezed into `output`.
///
/// `tag` is [`DS_SECRET_NOISE`] or [`DS_ERROR_NOISE`]; `nonce` is the
/// per-polynomial counter.
pub(crate) fn prf(seed: &[u8; SYMBYTES], tag: u8, nonce: u8, output: &mut [u8]) {
    let mut xof = Xof256::new();
    xof.absorb(seed);
    xof.absorb(&[tag, nonce]);
    xof.squeeze().read(output);
}

/// Final key derivation: `XOF256(k || h_ct || tag)` squeezed to 32 bytes.
///
/// The accept path passes `k = k_bar`; implicit rejection passes `k = z`.
#[must_use]
pub(crate) fn kdf(k: &[u8; SYMBYTES], h_ct: &[u8; SYMBYTES]) -> [u8; SYMBYTES] {
    let mut xof = Xof256::new();
    xof.absorb(k);
    xof.absorb(h_ct);
    xof.absorb(&[DS_KDF]);
    let mut out = [0u8; SYMBYTES];
    xof.squeeze().read(&mut out);
    out
}

/// Matrix-expansion XOF: absorbs `rho || x || y` and returns the reader the
/// rejection sampler squeezes. Entry (i, j) of the matrix passes
/// `(x, y) = (j, i)`; the transposed matrix swaps them.
#[must_use]
pub(crate) fn matrix_xof(rho: &[u8; SYMBYTES], x: u8, y: u8) -> impl XofReader {
    let mut xof = Xof128::new();
    xof.absorb(rho);
    xof.absorb(&[x, y]);
    xof.squeeze()
}
