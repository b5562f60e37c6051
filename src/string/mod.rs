//! Strings and string-like values.
//!
//! This module contains the [`BitString`] type for BIT STRING values and
//! the [`Charset`] of the restricted character string types. OCTET STRING
//! values are kept as plain mutable bytes in a [`Value`].
//!
//! [`Value`]: crate::Value

pub use self::bit::BitString;
pub use self::restricted::Charset;

mod bit;
mod restricted;
