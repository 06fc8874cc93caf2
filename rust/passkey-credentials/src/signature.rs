//! ECDSA P-256 signature normalization.
//!
//! Authenticators return ECDSA signatures DER-encoded:
//!
//! ```text
//! 0x30 len                  SEQUENCE
//!   0x02 len r_bytes        INTEGER r
//!   0x02 len s_bytes        INTEGER s
//! ```
//!
//! Soroban's `secp256r1_verify` host function instead takes the 64-byte
//! `r || s` form and only accepts the low-S member of the `(r, s)` /
//! `(r, n - s)` pair. [`normalize_der_signature`] converts the former into
//! the latter.

use crate::CredentialError;
use p256::elliptic_curve::scalar::IsHigh;
use passkey_encoding::be_bytes_to_uint;

/// Size of a [`CompactSignature`] in bytes.
pub const COMPACT_SIGNATURE_SIZE: usize = 64;

/// Width of a P-256 scalar in bytes.
const SCALAR_SIZE: usize = 32;

const SEQUENCE_TAG: u8 = 0x30;
const INTEGER_TAG: u8 = 0x02;

/// Long-form length marker for a single length byte.
const LONG_FORM_ONE_BYTE: u8 = 0x81;

/// A canonical `r || s` P-256 signature with `s` in the lower half of the
/// curve order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompactSignature([u8; COMPACT_SIGNATURE_SIZE]);

impl CompactSignature {
    /// The full 64 bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; COMPACT_SIGNATURE_SIZE] {
        &self.0
    }

    /// The 32-byte big-endian `r` component.
    #[must_use]
    pub fn r(&self) -> &[u8] {
        &self.0[..SCALAR_SIZE]
    }

    /// The 32-byte big-endian `s` component.
    #[must_use]
    pub fn s(&self) -> &[u8] {
        &self.0[SCALAR_SIZE..]
    }

    /// Whether `s <= (n - 1) / 2`.
    ///
    /// Always true for values produced by [`normalize_der_signature`].
    #[must_use]
    pub fn is_low_s(&self) -> bool {
        match self.to_ecdsa() {
            Ok(signature) => !bool::from(signature.s().as_ref().is_high()),
            Err(_) => false,
        }
    }

    /// Convert into a `p256` signature for verification.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::MalformedSignature`] if either scalar is
    /// zero or not below the curve order.
    pub fn to_ecdsa(&self) -> Result<p256::ecdsa::Signature, CredentialError> {
        p256::ecdsa::Signature::from_slice(&self.0)
            .map_err(|error| CredentialError::MalformedSignature(error.to_string()))
    }
}

impl TryFrom<&[u8]> for CompactSignature {
    type Error = CredentialError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; COMPACT_SIGNATURE_SIZE] =
            value
                .try_into()
                .map_err(|_| CredentialError::InvalidSignatureLength {
                    length: value.len(),
                })?;
        Ok(Self(bytes))
    }
}

impl From<CompactSignature> for [u8; COMPACT_SIGNATURE_SIZE] {
    fn from(value: CompactSignature) -> Self {
        value.0
    }
}

impl AsRef<[u8]> for CompactSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for CompactSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompactSignature({})", passkey_encoding::bytes_to_hex(&self.0))
    }
}

/// Convert a DER-encoded P-256 ECDSA signature into its canonical compact
/// form.
///
/// Both scalars are widened to 32 bytes (absorbing DER's sign padding), then
/// `s` is replaced by `n - s` when it lies in the upper half of the order.
/// The two members of a signature's malleability pair therefore normalize to
/// the same bytes.
///
/// # Errors
///
/// Returns [`CredentialError::MalformedSignature`] for any tag mismatch,
/// truncation, inconsistent length, trailing data, oversized integer, or a
/// scalar that is zero or not below the curve order.
pub fn normalize_der_signature(der: &[u8]) -> Result<CompactSignature, CredentialError> {
    let mut outer = DerReader::new(der);
    let sequence = outer.read_element(SEQUENCE_TAG, "sequence")?;
    outer.finish("signature")?;

    let mut inner = DerReader::new(sequence);
    let r = inner.read_element(INTEGER_TAG, "r")?;
    let s = inner.read_element(INTEGER_TAG, "s")?;
    inner.finish("sequence")?;

    let r: [u8; SCALAR_SIZE] = be_bytes_to_uint(r).map_err(|error| malformed(format!("r: {error}")))?;
    let s: [u8; SCALAR_SIZE] = be_bytes_to_uint(s).map_err(|error| malformed(format!("s: {error}")))?;

    let signature = p256::ecdsa::Signature::from_scalars(r, s)
        .map_err(|_| malformed("scalar is zero or exceeds the curve order"))?;
    let canonical = match signature.normalize_s() {
        Some(low) => {
            tracing::trace!("folded high-S signature into the lower half of the order");
            low
        }
        None => signature,
    };

    let mut compact = [0u8; COMPACT_SIGNATURE_SIZE];
    compact.copy_from_slice(&canonical.to_bytes());
    Ok(CompactSignature(compact))
}

fn malformed(reason: impl Into<String>) -> CredentialError {
    CredentialError::MalformedSignature(reason.into())
}

/// A minimal reader over the tag-length-value grammar used by ECDSA
/// signatures.
struct DerReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> DerReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    fn read_byte(&mut self, what: &str) -> Result<u8, CredentialError> {
        let byte = *self
            .bytes
            .get(self.position)
            .ok_or_else(|| malformed(format!("truncated before {what}")))?;
        self.position += 1;
        Ok(byte)
    }

    /// Short form (`0x00..=0x7f`) or one-byte long form (`0x81 nn`).
    fn read_length(&mut self, what: &str) -> Result<usize, CredentialError> {
        match self.read_byte(what)? {
            short if short < 0x80 => Ok(usize::from(short)),
            LONG_FORM_ONE_BYTE => Ok(usize::from(self.read_byte(what)?)),
            other => Err(malformed(format!(
                "unsupported length encoding 0x{other:02x} for {what}"
            ))),
        }
    }

    fn read_element(&mut self, tag: u8, what: &str) -> Result<&'a [u8], CredentialError> {
        let found = self.read_byte(what)?;
        if found != tag {
            return Err(malformed(format!(
                "expected tag 0x{tag:02x} for {what}, found 0x{found:02x}"
            )));
        }

        let length = self.read_length(what)?;
        let end = self
            .position
            .checked_add(length)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| malformed(format!("{what} length {length} exceeds the buffer")))?;

        let value = &self.bytes[self.position..end];
        self.position = end;
        Ok(value)
    }

    fn finish(&self, what: &str) -> Result<(), CredentialError> {
        let trailing = self.bytes.len() - self.position;
        if trailing == 0 {
            Ok(())
        } else {
            Err(malformed(format!("{trailing} trailing bytes after {what}")))
        }
    }
}
