/* Copyright 2021 Danny McClanahan */
/* SPDX-License-Identifier: AGPL-3.0-only */

//! This crate layers a fallible serialization capability over [prost] messages, and offers the
//! byte-array helpers that test suites migrating between protobuf runtime APIs lean on.
//!
//! The wire format itself is entirely [prost]'s. What this crate adds is:
//! - [Message], which lets a type refuse to serialize when its schema's presence rules are broken
//!   (an absent required sub-message, an unset oneof), and enforces a size limit;
//! - [SerializedBytes], which returns the serialized stream as an owned `Vec<u8>`;
//! - [serde], which pairs a domain type with the protobuf struct it travels as.
//!
//!```
//! # fn main() -> Result<(), protobytes_low_level::error::Error> {
//! use protobytes_low_level::{error::ProtobufCodingFailure, message, EncodingOptions, Message,
//!                            SerializedBytes};
//!
//! #[derive(Clone, PartialEq, prost::Message)]
//! struct Greeting {
//!   #[prost(string, optional, tag = "1")]
//!   name: Option<String>,
//! }
//!
//! impl Message for Greeting {
//!   fn check_initialized(&self) -> Result<(), ProtobufCodingFailure> {
//!     match self.name {
//!       Some(_) => Ok(()),
//!       None => Err(message::require_present("name", self)),
//!     }
//!   }
//! }
//!
//! let greeting = Greeting { name: Some("hi".to_string()) };
//! assert_eq!(greeting.serialized_bytes()?, vec![0x0a, 0x02, b'h', b'i']);
//!
//! // An absent required field is refused, unless partial encoding was asked for.
//! let empty = Greeting::default();
//! assert_eq!(empty.serialized_bytes().unwrap_err().missing_field(), Some("name"));
//! assert!(empty.serialized_bytes_with(&EncodingOptions::partial())?.is_empty());
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

pub mod array;
pub mod error;
pub mod message;
pub mod options;
pub mod serde;
mod util;

pub use array::SerializedBytes;
pub use error::{Error, ProtobufCodingFailure};
pub use message::Message;
pub use options::{DecodingOptions, EncodingOptions, MAX_MESSAGE_SIZE};
