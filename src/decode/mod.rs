//! Decoding BER encoded data into a tree of values.
//!
//! The [`Decoder`] reads the identifier and length octets of a value,
//! looks up how to interpret the content in its [`Registry`], and decodes
//! the content, descending into constructed values. Data is taken from a
//! [`Source`], a forward-only cursor over a fully materialized buffer.
//!
//! [`Registry`]: crate::Registry

pub use self::decoder::Decoder;
pub use self::error::{DecodeError, ErrorKind, ReadError};
pub use self::source::{IntoSource, Pos, Source};

mod decoder;
mod error;
mod source;
