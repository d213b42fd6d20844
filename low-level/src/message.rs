/* Copyright 2021-2022 Danny McClanahan */
/* SPDX-License-Identifier: AGPL-3.0-only */

//! The fallible serialization capability layered over [prost::Message].
//!
//! [prost] will encode any message it is handed. Schemas often carry presence rules that the
//! generated structs cannot express (a proto2 `required` sub-message becomes an [Option], a oneof
//! that must be chosen is also an [Option]), so [Message] lets a type report those violations and
//! refuses to serialize or parse such a message unless asked to be partial.

use crate::error::{Error, ProtobufCodingFailure};
use crate::options::{DecodingOptions, EncodingOptions};
use crate::util::encode_proto_message;

use bytes::Bytes;
use log::{debug, trace};

use std::any;

/// A protobuf message which can be serialized to and parsed from its canonical byte stream.
///
/// Implementing this for a [prost] struct only requires overriding [Self::check_initialized] if the
/// schema has presence rules; every other method is provided.
pub trait Message: prost::Message + Default {
  /// Verify that every field this message's schema requires is present.
  ///
  /// Implementations report the first absent field as
  /// [ProtobufCodingFailure::OptionalFieldAbsent], recursing into sub-messages and prefixing the
  /// field path with the name of the containing field (see [field_path]).
  fn check_initialized(&self) -> Result<(), ProtobufCodingFailure> {
    Ok(())
  }

  fn is_initialized(&self) -> bool {
    self.check_initialized().is_ok()
  }

  /// Produce the serialized byte stream of this message with [EncodingOptions::default].
  fn serialized_data(&self) -> Result<Bytes, Error> {
    self.serialized_data_with(&EncodingOptions::default())
  }

  fn serialized_data_with(&self, options: &EncodingOptions) -> Result<Bytes, Error> {
    if !options.partial {
      self.check_initialized().map_err(|e| {
        debug!("refusing to encode uninitialized {}: {}", type_name::<Self>(), e);
        Error::ProtobufEncodingError(e)
      })?;
    }
    let data = encode_proto_message(self, options.max_size).map_err(|e| {
      debug!("failed to encode {}: {}", type_name::<Self>(), e);
      Error::ProtobufEncodingError(e)
    })?;
    trace!("encoded {} into {} bytes", type_name::<Self>(), data.len());
    Ok(data)
  }

  /// Parse a message from `data` with [DecodingOptions::default].
  fn from_serialized_data(data: &[u8]) -> Result<Self, Error> {
    Self::from_serialized_data_with(data, &DecodingOptions::default())
  }

  fn from_serialized_data_with(data: &[u8], options: &DecodingOptions) -> Result<Self, Error> {
    if data.len() > options.max_size {
      return Err(Error::ProtobufDecodingError(
        ProtobufCodingFailure::TooLarge {
          size: data.len(),
          limit: options.max_size,
        },
      ));
    }
    let message = <Self as prost::Message>::decode(data).map_err(|e| {
      debug!("failed to decode {}: {}", type_name::<Self>(), e);
      Error::ProtobufDecodingError(e.into())
    })?;
    if !options.partial {
      message
        .check_initialized()
        .map_err(Error::ProtobufDecodingError)?;
    }
    trace!("decoded {} from {} bytes", type_name::<Self>(), data.len());
    Ok(message)
  }
}

fn type_name<T: ?Sized>() -> &'static str {
  let full = any::type_name::<T>();
  full.rsplit("::").next().unwrap_or(full)
}

/// Check that an optional sub-message named `field` is both present and itself initialized.
///
/// This is the building block for [Message::check_initialized] implementations:
///```
/// use protobytes_low_level::{error::ProtobufCodingFailure, message::{self, Message}};
///
/// #[derive(Clone, PartialEq, prost::Message)]
/// struct Leaf {
///   #[prost(int32, required, tag = "1")]
///   value: i32,
/// }
/// impl Message for Leaf {}
///
/// #[derive(Clone, PartialEq, prost::Message)]
/// struct Holder {
///   #[prost(message, optional, tag = "1")]
///   leaf: Option<Leaf>,
/// }
/// impl Message for Holder {
///   fn check_initialized(&self) -> Result<(), ProtobufCodingFailure> {
///     message::require_message("leaf", &self.leaf, self)
///   }
/// }
///
/// assert!(!Holder::default().is_initialized());
/// assert!(Holder { leaf: Some(Leaf { value: 3 }) }.is_initialized());
///```
pub fn require_message<M, P>(
  field: &str,
  value: &Option<M>,
  parent: &P,
) -> Result<(), ProtobufCodingFailure>
where
  M: Message,
  P: std::fmt::Debug,
{
  match value {
    Some(inner) => inner.check_initialized().map_err(|e| field_path(field, e)),
    None => Err(require_present(field, parent)),
  }
}

/// Check an optional sub-message named `field` only if it is present.
pub fn check_optional_message<M: Message>(
  field: &str,
  value: &Option<M>,
) -> Result<(), ProtobufCodingFailure> {
  match value {
    Some(inner) => inner.check_initialized().map_err(|e| field_path(field, e)),
    None => Ok(()),
  }
}

/// The failure for a required field or oneof named `field` which was absent from `parent`.
pub fn require_present<P: std::fmt::Debug>(field: &str, parent: &P) -> ProtobufCodingFailure {
  ProtobufCodingFailure::OptionalFieldAbsent(field.to_string(), format!("{:?}", parent))
}

/// Prefix the path of an absent field reported by a sub-message with the containing field's name.
pub fn field_path(field: &str, e: ProtobufCodingFailure) -> ProtobufCodingFailure {
  match e {
    ProtobufCodingFailure::OptionalFieldAbsent(inner, debug) => {
      ProtobufCodingFailure::OptionalFieldAbsent(format!("{}.{}", field, inner), debug)
    }
    e => e,
  }
}

impl<M: Message> Message for Box<M> {
  fn check_initialized(&self) -> Result<(), ProtobufCodingFailure> {
    (**self).check_initialized()
  }
}


#[cfg(test)]
pub mod test {
  use super::{proptest_strategies::*, *};

  use proptest::prelude::*;

  #[test]
  fn empty_message_serializes_to_nothing() {
    assert!(Empty {}.serialized_data().unwrap().is_empty());
  }

  #[test]
  fn required_int_serializes_canonically() {
    let data = RequiredInt { a: 5 }.serialized_data().unwrap();
    assert_eq!(data.as_ref(), &[0x08, 0x05]);
  }

  #[test]
  fn missing_child_is_reported() {
    let envelope = Envelope {
      child: None,
      kind: Some(Kind::Text("hi".to_string())),
    };
    let e = envelope.serialized_data().unwrap_err();
    assert!(e.is_encoding());
    assert_eq!(e.missing_field(), Some("child"));
  }

  #[test]
  fn unset_oneof_is_reported() {
    let envelope = Envelope {
      child: Some(RequiredInt { a: 1 }),
      kind: None,
    };
    assert_eq!(
      envelope.serialized_data().unwrap_err().missing_field(),
      Some("kind")
    );
  }

  #[test]
  fn nested_field_paths_are_prefixed() {
    let outer = Outer {
      envelope: Some(Envelope::default()),
    };
    match outer.check_initialized() {
      Err(ProtobufCodingFailure::OptionalFieldAbsent(field, debug)) => {
        assert_eq!(field, "envelope.child");
        assert!(debug.starts_with("Envelope"));
      }
      x => panic!("unexpected result {:?}", x),
    }
    assert!(Outer::default().is_initialized());
  }

  #[test]
  fn partial_encoding_skips_the_check() {
    let envelope = Envelope::default();
    let data = envelope
      .serialized_data_with(&EncodingOptions::partial())
      .unwrap();
    assert!(data.is_empty());
    let e = Envelope::from_serialized_data(&data).unwrap_err();
    assert!(!e.is_encoding());
    assert_eq!(e.missing_field(), Some("child"));
    assert_eq!(
      Envelope::from_serialized_data_with(&data, &DecodingOptions::partial()).unwrap(),
      envelope
    );
  }

  #[test]
  fn size_limits_apply_both_ways() {
    let message = RequiredInt { a: 300 };
    let opts = EncodingOptions::default().with_max_size(2);
    match message.serialized_data_with(&opts) {
      Err(Error::ProtobufEncodingError(ProtobufCodingFailure::TooLarge { size: 3, limit: 2 })) => (),
      x => panic!("unexpected result {:?}", x),
    }
    let data = message.serialized_data().unwrap();
    let opts = DecodingOptions::default().with_max_size(2);
    match RequiredInt::from_serialized_data_with(&data, &opts) {
      Err(Error::ProtobufDecodingError(ProtobufCodingFailure::TooLarge { size: 3, limit: 2 })) => (),
      x => panic!("unexpected result {:?}", x),
    }
  }

  #[test]
  fn malformed_input_fails_to_decode() {
    /* A length-delimited field claiming more bytes than remain. */
    match Envelope::from_serialized_data(&[0x12, 0x05, b'a']) {
      Err(Error::ProtobufDecodingError(ProtobufCodingFailure::Decode(_))) => (),
      x => panic!("unexpected result {:?}", x),
    }
  }

  #[test]
  fn boxed_messages_delegate() {
    let boxed: Box<Envelope> = Box::new(Envelope::default());
    assert!(boxed.check_initialized().is_err());
    assert!(Box::new(RequiredInt { a: 0 }).is_initialized());
  }

  proptest! {
    #[test]
    fn test_serialized_data_matches_prost(envelope in generate_envelope()) {
      let mut expected = Vec::new();
      prost::Message::encode(&envelope, &mut expected).unwrap();
      let data = envelope.serialized_data_with(&EncodingOptions::partial()).unwrap();
      prop_assert_eq!(data.as_ref(), expected.as_slice());
    }

    #[test]
    fn test_round_trip(envelope in generate_envelope()) {
      match envelope.serialized_data() {
        Ok(data) => {
          prop_assert!(envelope.is_initialized());
          prop_assert_eq!(Envelope::from_serialized_data(&data).unwrap(), envelope);
        }
        Err(e) => {
          prop_assert!(!envelope.is_initialized());
          prop_assert!(e.missing_field().is_some());
        }
      }
    }
  }
}
