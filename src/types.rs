//! Key, ciphertext, and shared-secret newtypes.
//!
//! Secret-bearing types zeroize on drop and debug-print redacted. The
//! `try_from_bytes` parsers reject wrong-length input before any algebra
//! runs, so a ciphertext from one parameter set can never reach the
//! decapsulation of another.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::KemError;
use crate::params::{ByteArray, KemParams, SSBYTES};

/// Public (encapsulation) key: packed `t_hat` followed by the matrix seed.
pub struct PublicKey<P: KemParams> {
    pub(crate) bytes: P::PkArray,
}

impl<P: KemParams> PublicKey<P> {
    /// Wrap an existing byte array as a public key.
    #[inline]
    pub fn from_bytes(bytes: P::PkArray) -> Self {
        Self { bytes }
    }

    /// Parse from a byte slice, rejecting wrong lengths.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, KemError> {
        if bytes.len() != P::PK_BYTES {
            return Err(KemError::LengthMismatch {
                object: "public key",
                expected: P::PK_BYTES,
                actual: bytes.len(),
            });
        }
        let mut arr = P::PkArray::zeroed();
        arr.as_mut().copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// View the key as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    /// Consume the wrapper and return the inner byte array.
    #[inline]
    pub fn into_bytes(self) -> P::PkArray {
        self.bytes
    }
}

impl<P: KemParams> AsRef<[u8]> for PublicKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: KemParams> Clone for PublicKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: KemParams> core::fmt::Debug for PublicKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PublicKey")
            .field("len", &P::PK_BYTES)
            .finish_non_exhaustive()
    }
}

/// Secret (decapsulation) key: packed `s_hat`, the public key, `H(pk)`, and
/// the implicit-rejection secret `z`. Zeroized on drop.
pub struct SecretKey<P: KemParams> {
    pub(crate) bytes: P::SkArray,
}

impl<P: KemParams> SecretKey<P> {
    /// Wrap an existing byte array as a secret key.
    #[inline]
    pub fn from_bytes(bytes: P::SkArray) -> Self {
        Self { bytes }
    }

    /// Parse from a byte slice, rejecting wrong lengths.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, KemError> {
        if bytes.len() != P::SK_BYTES {
            return Err(KemError::LengthMismatch {
                object: "secret key",
                expected: P::SK_BYTES,
                actual: bytes.len(),
            });
        }
        let mut arr = P::SkArray::zeroed();
        arr.as_mut().copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// View the key as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: KemParams> AsRef<[u8]> for SecretKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: KemParams> Clone for SecretKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: KemParams> Zeroize for SecretKey<P> {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl<P: KemParams> Drop for SecretKey<P> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<P: KemParams> core::fmt::Debug for SecretKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// Ciphertext: compressed `u` followed by compressed `v`.
pub struct Ciphertext<P: KemParams> {
    pub(crate) bytes: P::CtArray,
}

impl<P: KemParams> Ciphertext<P> {
    /// Wrap an existing byte array as a ciphertext.
    #[inline]
    pub fn from_bytes(bytes: P::CtArray) -> Self {
        Self { bytes }
    }

    /// Parse from a byte slice, rejecting wrong lengths.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, KemError> {
        if bytes.len() != P::CT_BYTES {
            return Err(KemError::LengthMismatch {
                object: "ciphertext",
                expected: P::CT_BYTES,
                actual: bytes.len(),
            });
        }
        let mut arr = P::CtArray::zeroed();
        arr.as_mut().copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// View the ciphertext as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    /// Consume the wrapper and return the inner byte array.
    #[inline]
    pub fn into_bytes(self) -> P::CtArray {
        self.bytes
    }
}

impl<P: KemParams> AsRef<[u8]> for Ciphertext<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: KemParams> Clone for Ciphertext<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: KemParams> core::fmt::Debug for Ciphertext<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ciphertext")
            .field("len", &P::CT_BYTES)
            .finish_non_exhaustive()
    }
}

/// Shared secret (always 32 bytes). Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    pub(crate) bytes: [u8; SSBYTES],
}

impl SharedSecret {
    /// Wrap a raw 32-byte array as a shared secret.
    #[inline]
    pub fn from_bytes(bytes: [u8; SSBYTES]) -> Self {
        Self { bytes }
    }

    /// View the secret as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for SharedSecret {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}
