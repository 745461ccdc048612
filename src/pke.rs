//! IND-CPA public-key encryption -- the inner scheme the KEM wraps.
//!
//! Keys and ciphertexts move through this module as byte slices; the caller
//! (the KEM layer) owns the surrounding layout. All operations are
//! deterministic in their seed inputs, and every secret-bearing intermediate
//! is zeroized before return.

use zeroize::Zeroize;

use crate::math::poly::Polynomial;
use crate::params::{KemParams, SYMBYTES};

/// Key generation from the matrix seed `rho` and noise seed `sigma`.
///
/// Writes `pack12(t_hat) || rho` into `pk` and `pack12(s_hat)` into `sk`.
pub(crate) fn cpa_keypair<P: KemParams>(
    pk: &mut [u8],
    sk: &mut [u8],
    rho: &[u8; SYMBYTES],
    sigma: &[u8; SYMBYTES],
) {
    let a = P::expand_matrix(rho, false);

    let mut nonce: u8 = 0;
    let mut s_hat = P::sample_secret_ntt(sigma, &mut nonce);
    let mut e_hat = P::sample_error_ntt(sigma, &mut nonce);
    P::reduce_ntt_vec(&mut s_hat);

    // t = A * s + e, entirely in the NTT domain.
    let mut t_hat = P::mat_mul_vec_tomont(&a, &s_hat);
    P::add_assign_ntt_vecs(&mut t_hat, &e_hat);
    P::reduce_ntt_vec(&mut t_hat);

    P::ntt_vec_to_bytes(&t_hat, &mut pk[..P::POLYVEC_BYTES]);
    pk[P::POLYVEC_BYTES..P::CPA_PK_BYTES].copy_from_slice(rho);
    P::ntt_vec_to_bytes(&s_hat, &mut sk[..P::CPA_SK_BYTES]);

    s_hat.zeroize();
    e_hat.zeroize();
}

/// Encrypt the 32-byte message `m` under `pk` with the coin seed `coins`.
///
/// Writes `compress_du(u) || compress_dv(v)` into `ct`.
pub(crate) fn cpa_encrypt<P: KemParams>(
    ct: &mut [u8],
    m: &[u8; SYMBYTES],
    pk: &[u8],
    coins: &[u8; SYMBYTES],
) {
    let t_hat = P::ntt_vec_from_bytes(&pk[..P::POLYVEC_BYTES]);
    let rho: &[u8; SYMBYTES] = pk[P::POLYVEC_BYTES..P::CPA_PK_BYTES]
        .first_chunk()
        .expect("pk layout guarantees a 32-byte matrix seed");
    let at = P::expand_matrix(rho, true);

    let mut nonce: u8 = 0;
    let mut r_hat = P::sample_secret_ntt(coins, &mut nonce);
    let mut e1 = P::sample_error_vec(coins, &mut nonce);
    let mut e2 = P::sample_error_poly(coins, nonce);

    // u = A^T * r + e1
    let mut u = P::inv_ntt_vec(P::mat_mul_vec(&at, &r_hat));
    P::add_assign_vecs(&mut u, &e1);

    // v = t^T * r + e2 + encode(m)
    let mut v = P::inner_product(&t_hat, &r_hat).ntt_inverse();
    v += &e2;
    let mut m_poly = Polynomial::from_message(m);
    v += &m_poly;

    P::reduce_vec(&mut u);
    v.reduce();

    P::vec_compress(&u, &mut ct[..P::POLYVEC_COMPRESSED_BYTES]);
    v.compress::<P::Dv>(&mut ct[P::POLYVEC_COMPRESSED_BYTES..P::CT_BYTES]);

    r_hat.zeroize();
    e1.zeroize();
    e2.zeroize();
    m_poly.zeroize();
    v.zeroize();
}

/// Decrypt `ct` with the packed secret vector in `sk`, returning the
/// 32-byte message.
pub(crate) fn cpa_decrypt<P: KemParams>(ct: &[u8], sk: &[u8]) -> [u8; SYMBYTES] {
    let u = P::vec_decompress(&ct[..P::POLYVEC_COMPRESSED_BYTES]);
    let v = Polynomial::decompress::<P::Dv>(&ct[P::POLYVEC_COMPRESSED_BYTES..P::CT_BYTES]);
    let mut s_hat = P::ntt_vec_from_bytes(&sk[..P::CPA_SK_BYTES]);

    // m' = v - s^T * u
    let u_hat = P::ntt_vec(u);
    let mut su = P::inner_product(&s_hat, &u_hat).ntt_inverse();
    let mut m_poly = &v - &su;
    m_poly.reduce();
    let m = m_poly.to_message();

    s_hat.zeroize();
    su.zeroize();
    m_poly.zeroize();
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash;
    use crate::params::{Level1, Level3, Level5};

    fn cpa_roundtrip<P: KemParams>() {
        let (rho, sigma, _z) = hash::expand_keygen_seed(&[42u8; SYMBYTES]);
        let mut pk = vec![0u8; P::CPA_PK_BYTES];
        let mut sk = vec![0u8; P::CPA_SK_BYTES];
        cpa_keypair::<P>(&mut pk, &mut sk, &rho, &sigma);

        let msg = [0xAB; SYMBYTES];
        let coins = [7u8; SYMBYTES];
        let mut ct = vec![0u8; P::CT_BYTES];
        cpa_encrypt::<P>(&mut ct, &msg, &pk, &coins);

        let recovered = cpa_decrypt::<P>(&ct, &sk);
        assert_eq!(msg, recovered, "CPA roundtrip failed");
    }

    #[test]
    fn cpa_roundtrip_level1() {
        cpa_roundtrip::<Level1>();
    }

    #[test]
    fn cpa_roundtrip_level3() {
        cpa_roundtrip::<Level3>();
    }

    #[test]
    fn cpa_roundtrip_level5() {
        cpa_roundtrip::<Level5>();
    }

    fn cpa_many_messages<P: KemParams>() {
        let (rho, sigma, _z) = hash::expand_keygen_seed(&[1u8; SYMBYTES]);
        let mut pk = vec![0u8; P::CPA_PK_BYTES];
        let mut sk = vec![0u8; P::CPA_SK_BYTES];
        cpa_keypair::<P>(&mut pk, &mut sk, &rho, &sigma);

        for trial in 0u8..16 {
            let msg: [u8; SYMBYTES] =
                core::array::from_fn(|i| (i as u8).wrapping_mul(trial).wrapping_add(trial));
            let coins: [u8; SYMBYTES] = core::array::from_fn(|i| (i as u8) ^ trial.wrapping_mul(91));
            let mut ct = vec![0u8; P::CT_BYTES];
            cpa_encrypt::<P>(&mut ct, &msg, &pk, &coins);
            let recovered = cpa_decrypt::<P>(&ct, &sk);
            assert_eq!(msg, recovered, "trial {trial} failed");
        }
    }

    #[test]
    fn cpa_many_messages_level1() {
        cpa_many_messages::<Level1>();
    }

    #[test]
    fn cpa_many_messages_level5() {
        cpa_many_messages::<Level5>();
    }

    #[test]
    fn ciphertexts_differ_per_coin() {
        let (rho, sigma, _z) = hash::expand_keygen_seed(&[2u8; SYMBYTES]);
        let mut pk = vec![0u8; Level1::CPA_PK_BYTES];
        let mut sk = vec![0u8; Level1::CPA_SK_BYTES];
        cpa_keypair::<Level1>(&mut pk, &mut sk, &rho, &sigma);

        let msg = [0x5A; SYMBYTES];
        let mut ct1 = vec![0u8; Level1::CT_BYTES];
        let mut ct2 = vec![0u8; Level1::CT_BYTES];
        cpa_encrypt::<Level1>(&mut ct1, &msg, &pk, &[1u8; SYMBYTES]);
        cpa_encrypt::<Level1>(&mut ct2, &msg, &pk, &[2u8; SYMBYTES]);
        assert_ne!(ct1, ct2, "distinct coins must randomize the ciphertext");
    }
}
