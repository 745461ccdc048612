//! IND-CCA key encapsulation: the Fujisaki-Okamoto wrapper over the CPA
//! scheme, with implicit rejection.
//!
//! Decapsulation re-encrypts the recovered message and compares against the
//! received ciphertext in constant time; on mismatch it returns a key
//! derived from the per-key secret `z` instead of an error, so the caller
//! learns nothing about validity from the call itself.

use rand_core::{TryCryptoRng, TryRngCore};
use zeroize::Zeroize;

use crate::ct;
use crate::error::KemError;
use crate::hash;
use crate::params::{ByteArray, KemParams, SYMBYTES};
use crate::pke;
use crate::types::{Ciphertext, PublicKey, SecretKey, SharedSecret};

/// Deterministic key generation from a single 32-byte seed.
///
/// The seed expands to the matrix seed, the noise seed, and the
/// implicit-rejection secret `z`; the secret key stores
/// `pack12(s_hat) || pk || H(pk) || z`.
#[must_use]
pub fn keypair_derand<P: KemParams>(seed: &[u8; SYMBYTES]) -> (PublicKey<P>, SecretKey<P>) {
    let (rho, mut sigma, mut z) = hash::expand_keygen_seed(seed);

    let mut pk_arr = P::PkArray::zeroed();
    let mut sk_arr = P::SkArray::zeroed();
    {
        let pk = pk_arr.as_mut();
        let sk = sk_arr.as_mut();

        pke::cpa_keypair::<P>(&mut pk[..P::CPA_PK_BYTES], &mut sk[..P::CPA_SK_BYTES], &rho, &sigma);

        sk[P::CPA_SK_BYTES..P::CPA_SK_BYTES + P::PK_BYTES].copy_from_slice(&pk[..P::PK_BYTES]);
        let h_pk = hash::hash_h(&pk[..P::PK_BYTES]);
        sk[P::SK_BYTES - 2 * SYMBYTES..P::SK_BYTES - SYMBYTES].copy_from_slice(&h_pk);
        sk[P::SK_BYTES - SYMBYTES..P::SK_BYTES].copy_from_slice(&z);
    }

    sigma.zeroize();
    z.zeroize();

    (PublicKey { bytes: pk_arr }, SecretKey { bytes: sk_arr })
}

/// Randomized key generation. The only entry point for host entropy besides
/// [`encapsulate`]; a failing source surfaces as [`KemError::EntropyFailure`].
pub fn keypair<P: KemParams>(
    rng: &mut impl TryCryptoRng,
) -> Result<(PublicKey<P>, SecretKey<P>), KemError> {
    let mut seed = [0u8; SYMBYTES];
    rng.try_fill_bytes(&mut seed)
        .map_err(|_| KemError::EntropyFailure)?;
    let pair = keypair_derand::<P>(&seed);
    seed.zeroize();
    Ok(pair)
}

/// Deterministic encapsulation from an explicit 32-byte coin.
///
/// The coin is whitened through `H` before use, so a biased caller value
/// cannot reach the session derivation directly.
#[must_use]
pub fn encapsulate_derand<P: KemParams>(
    pk: &PublicKey<P>,
    coins: &[u8; SYMBYTES],
) -> (Ciphertext<P>, SharedSecret) {
    let mut m = hash::hash_h(coins);
    let h_pk = hash::hash_h(pk.as_bytes());
    let (mut k_bar, mut r) = hash::derive_session(&m, &h_pk);

    let mut ct_arr = P::CtArray::zeroed();
    pke::cpa_encrypt::<P>(ct_arr.as_mut(), &m, pk.as_bytes(), &r);

    let h_ct = hash::hash_h(ct_arr.as_ref());
    let key = hash::kdf(&k_bar, &h_ct);

    m.zeroize();
    k_bar.zeroize();
    r.zeroize();

    (Ciphertext { bytes: ct_arr }, SharedSecret { bytes: key })
}

/// Randomized encapsulation against `pk`.
pub fn encapsulate<P: KemParams>(
    pk: &PublicKey<P>,
    rng: &mut impl TryCryptoRng,
) -> Result<(Ciphertext<P>, SharedSecret), KemError> {
    let mut coins = [0u8; SYMBYTES];
    rng.try_fill_bytes(&mut coins)
        .map_err(|_| KemError::EntropyFailure)?;
    let out = encapsulate_derand::<P>(pk, &coins);
    coins.zeroize();
    Ok(out)
}

/// Decapsulation with implicit rejection. Never errors: a tampered
/// ciphertext yields a deterministic pseudorandom key derived from `z`.
#[must_use]
pub fn decapsulate<P: KemParams>(ct: &Ciphertext<P>, sk: &SecretKey<P>) -> SharedSecret {
    let sk_bytes = sk.as_bytes();
    let ct_bytes = ct.as_bytes();

    // sk layout: (cpa_sk || pk || H(pk) || z)
    let cpa_sk = &sk_bytes[..P::CPA_SK_BYTES];
    let pk_bytes = &sk_bytes[P::CPA_SK_BYTES..P::CPA_SK_BYTES + P::PK_BYTES];
    let h_pk: &[u8; SYMBYTES] = sk_bytes[P::SK_BYTES - 2 * SYMBYTES..P::SK_BYTES - SYMBYTES]
        .first_chunk()
        .expect("sk layout guarantees a 32-byte hash");
    let z: &[u8; SYMBYTES] = sk_bytes[P::SK_BYTES - SYMBYTES..P::SK_BYTES]
        .first_chunk()
        .expect("sk layout guarantees a 32-byte rejection secret");

    let mut m_prime = pke::cpa_decrypt::<P>(ct_bytes, cpa_sk);
    let (mut k_bar, mut r_prime) = hash::derive_session(&m_prime, h_pk);

    // Re-encrypt into a stack buffer sized for the largest parameter set.
    const MAX_CT: usize = 1568;
    let mut ct_prime = [0u8; MAX_CT];
    pke::cpa_encrypt::<P>(&mut ct_prime[..P::CT_BYTES], &m_prime, pk_bytes, &r_prime);

    let fail = ct::ct_verify(ct_bytes, &ct_prime[..P::CT_BYTES]);

    let h_ct = hash::hash_h(ct_bytes);
    let mut k_ok = hash::kdf(&k_bar, &h_ct);
    let mut key = hash::kdf(z, &h_ct);
    ct::ct_cmov(&mut key, &k_ok, 1 - fail);

    m_prime.zeroize();
    k_bar.zeroize();
    r_prime.zeroize();
    ct_prime.zeroize();
    k_ok.zeroize();

    SharedSecret { bytes: key }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Level1, Level3, Level5};

    fn roundtrip<P: KemParams>() {
        let (pk, sk) = keypair_derand::<P>(&[42u8; SYMBYTES]);
        let (ct, ss_enc) = encapsulate_derand::<P>(&pk, &[7u8; SYMBYTES]);
        let ss_dec = decapsulate::<P>(&ct, &sk);
        assert_eq!(ss_enc.as_bytes(), ss_dec.as_bytes());
    }

    #[test]
    fn roundtrip_level1() {
        roundtrip::<Level1>();
    }

    #[test]
    fn roundtrip_level3() {
        roundtrip::<Level3>();
    }

    #[test]
    fn roundtrip_level5() {
        roundtrip::<Level5>();
    }

    #[test]
    fn zero_seed_is_valid() {
        let (pk, sk) = keypair_derand::<Level1>(&[0u8; SYMBYTES]);
        let (ct, ss_enc) = encapsulate_derand::<Level1>(&pk, &[0u8; SYMBYTES]);
        let ss_dec = decapsulate::<Level1>(&ct, &sk);
        assert_eq!(ss_enc.as_bytes(), ss_dec.as_bytes());
    }

    #[test]
    fn shared_secret_is_whitened_not_the_coin() {
        // The coin value must never appear as the derived key material.
        let (pk, _sk) = keypair_derand::<Level1>(&[3u8; SYMBYTES]);
        let coins = [0x11u8; SYMBYTES];
        let (_ct, ss) = encapsulate_derand::<Level1>(&pk, &coins);
        assert_ne!(ss.as_bytes(), &coins[..]);
    }
}
