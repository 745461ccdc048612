//! Parameter-set definitions.
//!
//! The sealed [`KemParams`] trait encodes each security level at the type
//! level, including associated types for the rank-dependent algebra
//! (vectors, matrices) and the noise/compression widths. This removes every
//! runtime `match k { ... }` from the hot path. [`SecurityLevel`] is the
//! runtime companion for name lookup and size queries.

use core::str::FromStr;

use zeroize::Zeroize;

pub use crate::math::{N, POLYBYTES, Q, SYMBYTES};
use crate::error::KemError;
use crate::hash::{self, DS_ERROR_NOISE, DS_SECRET_NOISE};
use crate::math::compress::{self, CompressWidth, CompressWidthParams};
use crate::math::poly::{NttPolynomial, Polynomial};
use crate::math::polyvec::{NttMatrix, NttVector, Vector};
use crate::math::sample::{self, CbdWidth};

/// Shared-secret length in bytes.
pub const SSBYTES: usize = 32;

/// Fixed-size byte storage for keys and ciphertexts.
pub trait ByteArray:
    AsRef<[u8]> + AsMut<[u8]> + Clone + core::fmt::Debug + Zeroize + Send + Sync + 'static
{
    const LEN: usize;
    fn zeroed() -> Self;
}

impl<const SIZE: usize> ByteArray for [u8; SIZE] {
    const LEN: usize = SIZE;

    #[inline]
    fn zeroed() -> Self {
        [0u8; SIZE]
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A KEM parameter set. Sealed -- only implemented for [`Level1`],
/// [`Level3`], [`Level5`].
pub trait KemParams: sealed::Sealed + 'static {
    /// Module rank.
    const K: usize;

    type Eta1: CbdWidth;
    type Eta2: CbdWidth;
    type Du: CompressWidth;
    type Dv: CompressWidth;

    const POLYVEC_BYTES: usize;
    const POLY_COMPRESSED_BYTES: usize;
    const POLYVEC_COMPRESSED_BYTES: usize;
    const CPA_PK_BYTES: usize;
    const CPA_SK_BYTES: usize;
    const PK_BYTES: usize;
    const SK_BYTES: usize;
    const CT_BYTES: usize;

    type PkArray: ByteArray;
    type SkArray: ByteArray;
    type CtArray: ByteArray;

    type NttVec: Clone + Zeroize;
    type Vec: Clone + Zeroize;
    type Matrix;

    // -- Rank-dependent algebra (monomorphized per level) --------------------

    /// Expand the public matrix from `rho`; `transposed` swaps the XOF index
    /// order, yielding the transpose used by encryption.
    fn expand_matrix(rho: &[u8; SYMBYTES], transposed: bool) -> Self::Matrix;

    /// Sample a secret vector (eta1, secret-noise domain) directly into NTT
    /// form, advancing `nonce` once per polynomial.
    fn sample_secret_ntt(seed: &[u8; SYMBYTES], nonce: &mut u8) -> Self::NttVec;

    /// Sample an error vector (eta1, error-noise domain) into NTT form.
    fn sample_error_ntt(seed: &[u8; SYMBYTES], nonce: &mut u8) -> Self::NttVec;

    /// Sample an error vector (eta2, error-noise domain) in standard form.
    fn sample_error_vec(seed: &[u8; SYMBYTES], nonce: &mut u8) -> Self::Vec;

    /// Sample the single trailing error polynomial (eta2, error-noise domain).
    fn sample_error_poly(seed: &[u8; SYMBYTES], nonce: u8) -> Polynomial;

    fn ntt_vec_from_bytes(bytes: &[u8]) -> Self::NttVec;
    fn ntt_vec_to_bytes(v: &Self::NttVec, out: &mut [u8]);
    fn vec_compress(v: &Self::Vec, out: &mut [u8]);
    fn vec_decompress(bytes: &[u8]) -> Self::Vec;

    /// `A * v` with Montgomery correction (key generation).
    fn mat_mul_vec_tomont(a: &Self::Matrix, v: &Self::NttVec) -> Self::NttVec;
    /// `A * v` feeding a subsequent inverse NTT (encryption).
    fn mat_mul_vec(a: &Self::Matrix, v: &Self::NttVec) -> Self::NttVec;
    fn inner_product(a: &Self::NttVec, b: &Self::NttVec) -> NttPolynomial;

    fn ntt_vec(v: Self::Vec) -> Self::NttVec;
    fn inv_ntt_vec(v: Self::NttVec) -> Self::Vec;
    fn add_assign_ntt_vecs(a: &mut Self::NttVec, b: &Self::NttVec);
    fn add_assign_vecs(a: &mut Self::Vec, b: &Self::Vec);
    fn reduce_ntt_vec(v: &mut Self::NttVec);
    fn reduce_vec(v: &mut Self::Vec);
}

// -- Macro to implement KemParams for each rank ------------------------------

macro_rules! impl_kem_params {
    (
        $name:ident, K = $K:literal,
        Eta1 = $Eta1:ty, Eta2 = $Eta2:ty,
        Du = $Du:ty, Dv = $Dv:ty,
        PK_BYTES = $pkb:literal,
        SK_BYTES = $skb:literal,
        CT_BYTES = $ctb:literal
    ) => {
        impl sealed::Sealed for $name {}

        impl KemParams for $name {
            const K: usize = $K;
            type Eta1 = $Eta1;
            type Eta2 = $Eta2;
            type Du = $Du;
            type Dv = $Dv;

            const POLYVEC_BYTES: usize = $K * POLYBYTES;
            const POLY_COMPRESSED_BYTES: usize = <$Dv as CompressWidthParams>::POLY_BYTES;
            const POLYVEC_COMPRESSED_BYTES: usize = $K * <$Du as CompressWidthParams>::POLY_BYTES;
            const CPA_PK_BYTES: usize = Self::POLYVEC_BYTES + SYMBYTES;
            const CPA_SK_BYTES: usize = Self::POLYVEC_BYTES;
            const PK_BYTES: usize = $pkb;
            const SK_BYTES: usize = $skb;
            const CT_BYTES: usize = $ctb;

            type PkArray = [u8; $pkb];
            type SkArray = [u8; $skb];
            type CtArray = [u8; $ctb];

            type NttVec = NttVector<$K>;
            type Vec = Vector<$K>;
            type Matrix = NttMatrix<$K>;

            fn expand_matrix(rho: &[u8; SYMBYTES], transposed: bool) -> Self::Matrix {
                expand_matrix_inner::<$K>(rho, transposed)
            }

            fn sample_secret_ntt(seed: &[u8; SYMBYTES], nonce: &mut u8) -> Self::NttVec {
                sample_noise_ntt::<$Eta1, $K>(seed, DS_SECRET_NOISE, nonce)
            }

            fn sample_error_ntt(seed: &[u8; SYMBYTES], nonce: &mut u8) -> Self::NttVec {
                sample_noise_ntt::<$Eta1, $K>(seed, DS_ERROR_NOISE, nonce)
            }

            fn sample_error_vec(seed: &[u8; SYMBYTES], nonce: &mut u8) -> Self::Vec {
                sample_noise_std::<$Eta2, $K>(seed, DS_ERROR_NOISE, nonce)
            }

            fn sample_error_poly(seed: &[u8; SYMBYTES], nonce: u8) -> Polynomial {
                sample_noise_poly::<$Eta2>(seed, DS_ERROR_NOISE, nonce)
            }

            fn ntt_vec_from_bytes(bytes: &[u8]) -> Self::NttVec {
                NttVector::<$K>::from_bytes(bytes)
            }

            fn ntt_vec_to_bytes(v: &Self::NttVec, out: &mut [u8]) {
                v.to_bytes(out);
            }

            fn vec_compress(v: &Self::Vec, out: &mut [u8]) {
                v.compress::<$Du>(out);
            }

            fn vec_decompress(bytes: &[u8]) -> Self::Vec {
                Vector::<$K>::decompress::<$Du>(bytes)
            }

            fn mat_mul_vec_tomont(a: &Self::Matrix, v: &Self::NttVec) -> Self::NttVec {
                a.mul_vec_tomont(v)
            }

            fn mat_mul_vec(a: &Self::Matrix, v: &Self::NttVec) -> Self::NttVec {
                a.mul_vec(v)
            }

            fn inner_product(a: &Self::NttVec, b: &Self::NttVec) -> NttPolynomial {
                a.inner_product(b)
            }

            fn ntt_vec(v: Self::Vec) -> Self::NttVec {
                v.ntt()
            }

            fn inv_ntt_vec(v: Self::NttVec) -> Self::Vec {
                v.ntt_inverse()
            }

            fn add_assign_ntt_vecs(a: &mut Self::NttVec, b: &Self::NttVec) {
                *a += b;
            }

            fn add_assign_vecs(a: &mut Self::Vec, b: &Self::Vec) {
                *a += b;
            }

            fn reduce_ntt_vec(v: &mut Self::NttVec) {
                v.reduce();
            }

            fn reduce_vec(v: &mut Self::Vec) {
                v.reduce();
            }
        }
    };
}

// -- Helper functions used by the macro impls --------------------------------

fn expand_matrix_inner<const K: usize>(rho: &[u8; SYMBYTES], transposed: bool) -> NttMatrix<K> {
    use sha3::digest::XofReader;
    let mut a = NttMatrix::<K>::zero();
    for (i, a_row) in a.rows_mut().iter_mut().enumerate() {
        for (j, poly) in a_row.polys_mut().iter_mut().enumerate() {
            let (x, y) = if transposed {
                (i as u8, j as u8)
            } else {
                (j as u8, i as u8)
            };
            let mut xof = hash::matrix_xof(rho, x, y);
            sample::reject_uniform(poly.coeffs_mut(), |buf| xof.read(buf));
        }
    }
    a
}

/// Largest CBD buffer across the supported widths (eta = 3).
const MAX_CBD_BYTES: usize = 192;

fn sample_noise_poly<Eta: CbdWidth>(seed: &[u8; SYMBYTES], tag: u8, nonce: u8) -> Polynomial {
    let mut buf = [0u8; MAX_CBD_BYTES];
    hash::prf(seed, tag, nonce, &mut buf[..Eta::BUF_BYTES]);
    let p = Polynomial::sample_cbd::<Eta>(&buf[..Eta::BUF_BYTES]);
    buf.zeroize();
    p
}

fn sample_noise_ntt<Eta: CbdWidth, const K: usize>(
    seed: &[u8; SYMBYTES],
    tag: u8,
    nonce: &mut u8,
) -> NttVector<K> {
    let mut v = NttVector::<K>::zero();
    for p in v.polys_mut() {
        *p = sample_noise_poly::<Eta>(seed, tag, *nonce).ntt();
        *nonce += 1;
    }
    v
}

fn sample_noise_std<Eta: CbdWidth, const K: usize>(
    seed: &[u8; SYMBYTES],
    tag: u8,
    nonce: &mut u8,
) -> Vector<K> {
    let mut v = Vector::<K>::zero();
    for p in v.polys_mut() {
        *p = sample_noise_poly::<Eta>(seed, tag, *nonce);
        *nonce += 1;
    }
    v
}

// -- Parameter-set marker types ----------------------------------------------

/// Security level 1 (k = 2, 128-bit target).
#[derive(Debug, Clone, Copy)]
pub struct Level1;

/// Security level 3 (k = 3, 192-bit target).
#[derive(Debug, Clone, Copy)]
pub struct Level3;

/// Security level 5 (k = 4, 256-bit target).
#[derive(Debug, Clone, Copy)]
pub struct Level5;

impl_kem_params!(
    Level1,
    K = 2,
    Eta1 = sample::Eta3,
    Eta2 = sample::Eta2,
    Du = compress::D10,
    Dv = compress::D4,
    PK_BYTES = 800,
    SK_BYTES = 1632,
    CT_BYTES = 768
);

impl_kem_params!(
    Level3,
    K = 3,
    Eta1 = sample::Eta2,
    Eta2 = sample::Eta2,
    Du = compress::D10,
    Dv = compress::D4,
    PK_BYTES = 1184,
    SK_BYTES = 2400,
    CT_BYTES = 1088
);

impl_kem_params!(
    Level5,
    K = 4,
    Eta1 = sample::Eta2,
    Eta2 = sample::Eta2,
    Du = compress::D11,
    Dv = compress::D5,
    PK_BYTES = 1568,
    SK_BYTES = 3168,
    CT_BYTES = 1568
);

const _: () = {
    macro_rules! check_params {
        ($t:ty) => {
            assert!(<$t>::POLYVEC_BYTES == <$t>::K * POLYBYTES);
            assert!(<$t>::CPA_PK_BYTES == <$t>::POLYVEC_BYTES + SYMBYTES);
            assert!(<$t>::CPA_SK_BYTES == <$t>::POLYVEC_BYTES);
            assert!(<$t>::PK_BYTES == <$t>::CPA_PK_BYTES);
            assert!(<$t>::SK_BYTES == <$t>::CPA_SK_BYTES + <$t>::PK_BYTES + 2 * SYMBYTES);
            assert!(
                <$t>::CT_BYTES
                    == <$t>::POLYVEC_COMPRESSED_BYTES + <$t>::POLY_COMPRESSED_BYTES
            );
        };
    }
    check_params!(Level1);
    check_params!(Level3);
    check_params!(Level5);

    assert!(Level1::PK_BYTES == 800);
    assert!(Level1::SK_BYTES == 1632);
    assert!(Level1::CT_BYTES == 768);
    assert!(Level3::PK_BYTES == 1184);
    assert!(Level3::SK_BYTES == 2400);
    assert!(Level3::CT_BYTES == 1088);
    assert!(Level5::PK_BYTES == 1568);
    assert!(Level5::SK_BYTES == 3168);
    assert!(Level5::CT_BYTES == 1568);
};

// -- Runtime level lookup ----------------------------------------------------

/// Runtime handle on a parameter set: name lookup and size queries without a
/// type parameter. Unknown names surface the configuration error at
/// construction, never at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityLevel {
    L1,
    L3,
    L5,
}

impl SecurityLevel {
    /// All defined levels, in ascending strength.
    pub const ALL: [SecurityLevel; 3] = [Self::L1, Self::L3, Self::L5];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::L1 => "L1",
            Self::L3 => "L3",
            Self::L5 => "L5",
        }
    }

    /// Module rank k.
    #[must_use]
    pub const fn rank(self) -> usize {
        match self {
            Self::L1 => Level1::K,
            Self::L3 => Level3::K,
            Self::L5 => Level5::K,
        }
    }

    #[must_use]
    pub const fn public_key_bytes(self) -> usize {
        match self {
            Self::L1 => Level1::PK_BYTES,
            Self::L3 => Level3::PK_BYTES,
            Self::L5 => Level5::PK_BYTES,
        }
    }

    #[must_use]
    pub const fn secret_key_bytes(self) -> usize {
        match self {
            Self::L1 => Level1::SK_BYTES,
            Self::L3 => Level3::SK_BYTES,
            Self::L5 => Level5::SK_BYTES,
        }
    }

    #[must_use]
    pub const fn ciphertext_bytes(self) -> usize {
        match self {
            Self::L1 => Level1::CT_BYTES,
            Self::L3 => Level3::CT_BYTES,
            Self::L5 => Level5::CT_BYTES,
        }
    }

    #[must_use]
    pub const fn shared_secret_bytes(self) -> usize {
        SSBYTES
    }
}

impl FromStr for SecurityLevel {
    type Err = KemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L1" | "l1" => Ok(Self::L1),
            "L3" | "l3" => Ok(Self::L3),
            "L5" | "l5" => Ok(Self::L5),
            other => Err(KemError::UnknownSecurityLevel(other.to_string())),
        }
    }
}
