//! `mlwe-kem` -- a module-lattice key encapsulation mechanism over
//! `Z_q[x]/(x^256 + 1)`.
//!
//! The crate layers an IND-CPA public-key encryption scheme on top of an
//! NTT-based polynomial ring, then applies a Fujisaki-Okamoto transform with
//! implicit rejection to obtain IND-CCA encapsulation and decapsulation.
//! Three parameter sets are provided ([`Level1`], [`Level3`], [`Level5`]),
//! all sharing n = 256 and q = 3329.
//!
//! # Design principles
//!
//! - **No `unsafe`** -- enforced by `#![deny(unsafe_code)]`.
//! - **Determinism where it matters**: every operation is reproducible from
//!   its explicit seeds; host entropy enters only through the `keypair` /
//!   `encapsulate` call-site seeds.
//! - **Constant-time discipline** for everything secret-dependent:
//!   reductions, decoding, ciphertext comparison, and key selection.
//! - **RAII zeroization** of secret material via the `zeroize` crate.
//!
//! # Example
//!
//! ```
//! use mlwe_kem::{decapsulate, encapsulate_derand, keypair_derand, Level3};
//!
//! let (pk, sk) = keypair_derand::<Level3>(&[7u8; 32]);
//! let (ct, key_sender) = encapsulate_derand::<Level3>(&pk, &[9u8; 32]);
//! let key_receiver = decapsulate::<Level3>(&ct, &sk);
//! assert_eq!(key_sender.as_bytes(), key_receiver.as_bytes());
//! ```

#![deny(unsafe_code)]

pub mod ct;
pub mod error;
pub mod hash;
pub mod kem;
pub mod math;
pub mod params;
pub mod pke;
pub mod types;

// Re-export the public API surface.
pub use error::KemError;
pub use kem::{decapsulate, encapsulate, encapsulate_derand, keypair, keypair_derand};
pub use params::{KemParams, Level1, Level3, Level5, SecurityLevel};
pub use types::{Ciphertext, PublicKey, SecretKey, SharedSecret};
