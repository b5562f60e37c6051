//! The encoding rules accepted when decoding.
//!
//! This is a private module. Its public items are re-exported by the parent.

use crate::decode::{DecodeError, Decoder, IntoSource};
use crate::node::Node;


//------------ Mode ----------------------------------------------------------

/// The set of encoding rules data is decoded under.
///
/// Values are always encoded in definite length form with minimal length
/// octets unless they were decoded from an indefinite length form or
/// explicitly marked as such. The mode only affects what is accepted when
/// decoding.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Basic Encoding Rules.
    ///
    /// These are the most flexible rules, allowing alternative encodings
    /// for lengths as well as indefinite length values.
    #[default]
    Ber,

    /// Distinguished Encoding Rules.
    ///
    /// These rules always employ definite length values and require the
    /// shortest possible encoding of the length octets.
    Der,
}

impl Mode {
    /// Returns whether the mode is restricted to a canonical encoding.
    pub fn is_restricted(self) -> bool {
        matches!(self, Mode::Der)
    }

    /// Returns whether indefinite length constructed values are allowed.
    pub fn allows_indefinite(self) -> bool {
        matches!(self, Mode::Ber)
    }

    /// Decodes a single value from `source` under the rules of this mode.
    ///
    /// This is a shortcut for creating a [`Decoder`] with default settings
    /// and decoding with it.
    pub fn decode(
        self, source: impl IntoSource
    ) -> Result<Node, DecodeError> {
        Decoder::new(self).decode(source)
    }
}


//============ Tests =========================================================
