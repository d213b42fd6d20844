/* Copyright 2021 Danny McClanahan */
/* SPDX-License-Identifier: AGPL-3.0-only */

//! Serialize and parse messages via plain byte arrays.
//!
//! [Message::serialized_data] hands back a [bytes::Bytes]. Test suites written against an API that
//! returned owned arrays can call [SerializedBytes::serialized_bytes] instead and keep comparing
//! against `vec![...]` literals.
//!
//!```
//! # fn main() -> Result<(), protobytes_low_level::error::Error> {
//! use protobytes_low_level::{Message, SerializedBytes};
//!
//! #[derive(Clone, PartialEq, prost::Message)]
//! struct Single {
//!   #[prost(int32, required, tag = "1")]
//!   a: i32,
//! }
//! impl Message for Single {}
//!
//! let bytes: Vec<u8> = Single { a: 5 }.serialized_bytes()?;
//! assert_eq!(bytes, vec![8, 5]);
//! assert_eq!(Single::from_serialized_bytes(&bytes)?, Single { a: 5 });
//! # Ok(())
//! # }
//!```

use crate::error::Error;
use crate::message::Message;
use crate::options::{DecodingOptions, EncodingOptions};

/// Byte-array forms of [Message::serialized_data] and [Message::from_serialized_data].
///
/// Implemented for every [Message]. The conversion never adds a failure of its own: any error
/// comes straight from the underlying capability.
pub trait SerializedBytes: Message {
  fn serialized_bytes(&self) -> Result<Vec<u8>, Error> {
    self.serialized_bytes_with(&EncodingOptions::default())
  }

  fn serialized_bytes_with(&self, options: &EncodingOptions) -> Result<Vec<u8>, Error> {
    Ok(self.serialized_data_with(options)?.to_vec())
  }

  fn from_serialized_bytes(bytes: &[u8]) -> Result<Self, Error> {
    Self::from_serialized_data(bytes)
  }

  fn from_serialized_bytes_with(bytes: &[u8], options: &DecodingOptions) -> Result<Self, Error> {
    Self::from_serialized_data_with(bytes, options)
  }
}

impl<M: Message> SerializedBytes for M {}

#[cfg(test)]
pub mod test {
  use super::*;
  use crate::message::proptest_strategies::*;

  use proptest::prelude::*;

  #[test]
  fn empty_message_gives_empty_array() {
    assert_eq!(Empty {}.serialized_bytes().unwrap(), Vec::<u8>::new());
  }

  #[test]
  fn small_required_field_gives_two_bytes() {
    assert_eq!(RequiredInt { a: 5 }.serialized_bytes().unwrap(), vec![0x08, 0x05]);
  }

  #[test]
  fn negative_int32_is_sign_extended() {
    let bytes = RequiredInt { a: -1 }.serialized_bytes().unwrap();
    assert_eq!(bytes.len(), 11);
    assert_eq!(bytes[0], 0x08);
    assert_eq!(bytes[10], 0x01);
  }

  #[test]
  fn failures_are_forwarded_unchanged() {
    let envelope = Envelope::default();
    let from_data = envelope.serialized_data().unwrap_err().to_string();
    let from_bytes = envelope.serialized_bytes().unwrap_err().to_string();
    assert_eq!(from_data, from_bytes);
  }

  #[test]
  fn options_are_forwarded() {
    let envelope = Envelope::default();
    assert_eq!(
      envelope
        .serialized_bytes_with(&EncodingOptions::partial())
        .unwrap(),
      Vec::<u8>::new()
    );
    assert!(Envelope::from_serialized_bytes(&[]).is_err());
    assert_eq!(
      Envelope::from_serialized_bytes_with(&[], &DecodingOptions::partial()).unwrap(),
      envelope
    );
  }

  proptest! {
    #[test]
    fn test_bytes_match_data(envelope in generate_envelope()) {
      match (envelope.serialized_data(), envelope.serialized_bytes()) {
        (Ok(data), Ok(bytes)) => {
          prop_assert_eq!(bytes.len(), data.len());
          prop_assert_eq!(&bytes[..], data.as_ref());
        }
        (Err(e1), Err(e2)) => {
          prop_assert_eq!(e1.to_string(), e2.to_string());
        }
        (x, y) => prop_assert!(false, "mismatched results: {:?} vs {:?}", x, y),
      }
    }

    #[test]
    fn test_idempotent(envelope in generate_envelope()) {
      let opts = EncodingOptions::partial();
      prop_assert_eq!(
        envelope.serialized_bytes_with(&opts).unwrap(),
        envelope.serialized_bytes_with(&opts).unwrap()
      );
    }

    #[test]
    fn test_required_int_round_trip(message in generate_required_int()) {
      let bytes = message.serialized_bytes().unwrap();
      prop_assert_eq!(RequiredInt::from_serialized_bytes(&bytes).unwrap(), message);
    }
  }
}
