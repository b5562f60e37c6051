//! BER-encoded bit strings.
//!
//! This is a private module. Its public items are re-exported by the parent.

use bytes::Bytes;


//------------ BitString -----------------------------------------------------

/// A bit string value.
///
/// The value keeps the content octets of the bit string exactly as they
/// were decoded, so it is re-encoded unchanged.
///
/// # Unused bits
///
/// In BER, the first content octet of a primitive bit string gives the
/// number of unused bits in the last octet. This type does not interpret
/// that octet: [`to_u128`][Self::to_u128] treats the whole content,
/// including the leading octet, as one unsigned big-endian integer. For
/// bit strings with padding this number is not the value of the bits. Use
/// [`as_slice`][Self::as_slice] if you need the exact bit semantics.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct BitString(Bytes);

impl BitString {
    /// Creates a bit string from its content octets.
    pub fn new(content: Bytes) -> Self {
        BitString(content)
    }

    /// Returns the content octets.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns the content octets as a bytes value.
    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    /// Returns the length of the content in octets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the content is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the content read as an unsigned big-endian integer.
    ///
    /// Returns `None` if the value doesn’t fit into a `u128`. Leading zero
    /// octets don’t count towards that limit. Larger values, such as the
    /// content of an RSA public key, are only available losslessly through
    /// [`as_slice`][Self::as_slice].
    pub fn to_u128(&self) -> Option<u128> {
        let mut res = 0u128;
        for &octet in self.0.iter() {
            if res > (u128::MAX >> 8) {
                return None
            }
            res = (res << 8) | u128::from(octet);
        }
        Some(res)
    }
}


//--- From and AsRef

impl From<Bytes> for BitString {
    fn from(content: Bytes) -> Self {
        Self::new(content)
    }
}

impl From<Vec<u8>> for BitString {
    fn from(content: Vec<u8>) -> Self {
        Self::new(content.into())
    }
}

impl AsRef<[u8]> for BitString {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn whole_content_as_integer() {
        let bits = BitString::from(vec![0x00, 0x01, 0x00]);
        assert_eq!(bits.to_u128(), Some(0x0100));
        assert_eq!(bits.len(), 3);

        // The unused bits octet is part of the integer.
        let bits = BitString::from(vec![0x07, 0x80]);
        assert_eq!(bits.to_u128(), Some(0x0780));

        assert_eq!(BitString::from(Vec::new()).to_u128(), Some(0));
        assert_eq!(BitString::from(vec![0x01; 17]).to_u128(), None);
        let mut padded = vec![0u8; 4];
        padded.extend_from_slice(&[0xFF; 16]);
        assert_eq!(BitString::from(padded).to_u128(), Some(u128::MAX));
    }
}
