/* Copyright 2021-2022 Danny McClanahan */
/* SPDX-License-Identifier: AGPL-3.0-only */

//! Test support for suites that compare protobuf messages against literal byte arrays.
//!
//! This crate re-exports the byte-array helpers of [protobytes_low_level], and adds a set of
//! [fixture](fixtures) messages covering each way serialization may succeed or be refused, plus
//! [assertions] which report mismatches as errors with both arrays spelled out.
//!
//!```
//! # fn main() -> Result<(), protobytes::error::Error> {
//! use protobytes::{assertions::*, fixtures::*, SerializedBytes};
//!
//! assert_encodes_to(&TestRequiredInt::new(5), &[0x08, 0x05])?;
//! assert_eq!(TestEmpty {}.serialized_bytes()?, Vec::<u8>::new());
//!
//! let failure = assert_encode_fails(&TestEnvelope::default())?;
//! assert_eq!(failure.missing_field(), Some("kind"));
//! # Ok(())
//! # }
//!```

/* Turn all warnings into errors! */
/* #![deny(warnings)] */
/* Warn for missing docs in general, and hard require crate-level docs. */
/* #![warn(missing_docs)] */
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]
/* Make all doctests fail if they produce any warnings. */
#![doc(test(attr(deny(warnings))))]
/* Enable all clippy lints except for many of the pedantic ones. It's a shame this needs to be
 * copied and pasted across crates, but there doesn't appear to be a way to include inner attributes
 * from a common source. */
#![deny(
  clippy::all,
  clippy::default_trait_access,
  clippy::expl_impl_clone_on_copy,
  clippy::if_not_else,
  clippy::needless_continue,
  clippy::unseparated_literal_suffix,
  clippy::used_underscore_binding
)]
/* It is often more clear to show that nothing is being moved. */
#![allow(clippy::match_ref_pats)]
/* Subjective style. */
#![allow(
  clippy::len_without_is_empty,
  clippy::redundant_field_names,
  clippy::too_many_arguments
)]
/* Default isn't as big a deal as people seem to think it is. */
#![allow(clippy::new_without_default, clippy::new_ret_no_self)]

pub mod assertions;
pub mod error;
pub mod fixtures;

pub use protobytes_low_level::{
  error::ProtobufCodingFailure, message, serde, DecodingOptions, EncodingOptions, Message,
  SerializedBytes, MAX_MESSAGE_SIZE,
};

pub use protobytes_low_level as low_level;
