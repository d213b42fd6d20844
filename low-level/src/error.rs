/* Copyright 2021 Danny McClanahan */
/* SPDX-License-Identifier: AGPL-3.0-only */

//! Errors raised while turning a [Message](crate::message::Message) into bytes or back.

use displaydoc::Display;
use thiserror::Error;

/// Ways in which the protobuf runtime or the initialization check can refuse a message.
#[derive(Debug, Display, Error)]
pub enum ProtobufCodingFailure {
  /// field {0} was absent from message {1}
  OptionalFieldAbsent(String, String),
  /// message of {size} bytes exceeds the limit of {limit} bytes
  TooLarge { size: usize, limit: usize },
  /// protobuf encoding failed: {0}
  Encode(#[from] prost::EncodeError),
  /// protobuf decoding failed: {0}
  Decode(#[from] prost::DecodeError),
}

/// Top-level error type for this crate.
///
/// Failures are tagged with the direction they occurred in, so that a caller who only serializes
/// can match on [Error::ProtobufEncodingError] alone.
#[derive(Debug, Display, Error)]
pub enum Error {
  /// error encoding protobuf: {0}
  ProtobufEncodingError(ProtobufCodingFailure),
  /// error decoding protobuf: {0}
  ProtobufDecodingError(ProtobufCodingFailure),
}

impl Error {
  /// The underlying failure, regardless of direction.
  pub fn failure(&self) -> &ProtobufCodingFailure {
    match self {
      Self::ProtobufEncodingError(f) => f,
      Self::ProtobufDecodingError(f) => f,
    }
  }

  pub fn is_encoding(&self) -> bool {
    matches!(self, Self::ProtobufEncodingError(_))
  }

  /// The path of the absent field, if this error came from the initialization check.
  pub fn missing_field(&self) -> Option<&str> {
    match self.failure() {
      ProtobufCodingFailure::OptionalFieldAbsent(field, _) => Some(field.as_str()),
      _ => None,
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn display_includes_field_path() {
    let e = Error::ProtobufEncodingError(ProtobufCodingFailure::OptionalFieldAbsent(
      "next.child".to_string(),
      "TestNested { .. }".to_string(),
    ));
    assert_eq!(
      e.to_string(),
      "error encoding protobuf: field next.child was absent from message TestNested { .. }"
    );
    assert_eq!(e.missing_field(), Some("next.child"));
    assert!(e.is_encoding());
  }

  #[test]
  fn too_large_is_not_a_missing_field() {
    let e = Error::ProtobufDecodingError(ProtobufCodingFailure::TooLarge { size: 3, limit: 2 });
    assert_eq!(e.missing_field(), None);
    assert!(!e.is_encoding());
    assert_eq!(
      e.to_string(),
      "error decoding protobuf: message of 3 bytes exceeds the limit of 2 bytes"
    );
  }
}
