//! Polynomial-ring arithmetic over `R_q = Z_q[X]/(X^256 + 1)`.
//!
//! Sub-modules cover modular reduction, the Number-Theoretic Transform,
//! polynomial and polynomial-vector types, deterministic sampling, byte-level
//! packing, and lossy compression. Everything here is scalar and
//! allocation-free.

pub mod compress;
pub mod encode;
pub mod ntt;
pub mod poly;
pub mod polyvec;
pub mod reduce;
pub mod sample;

/// Polynomial ring degree.
pub const N: usize = 256;

/// Field modulus.
pub const Q: i16 = 3329;

/// Size in bytes of hashes, seeds, and shared secrets.
pub const SYMBYTES: usize = 32;

/// Size in bytes of a serialised polynomial (12 bits x 256 / 8).
pub const POLYBYTES: usize = 384;
