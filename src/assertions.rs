/* Copyright 2021 Danny McClanahan */
/* SPDX-License-Identifier: AGPL-3.0-only */

//! Checks for tests which compare messages against literal byte arrays.
//!
//! Each check returns a [Result] instead of panicking, so that it composes with `?` in tests that
//! return `Result` and with `prop_assert!` inside [proptest](https://docs.rs/proptest) blocks.

use protobytes_low_level::{error::Error as LibraryError, Message, SerializedBytes};

use displaydoc::Display;
use thiserror::Error;

#[derive(Debug, Display, Error)]
pub enum AssertionError {
  /// expected encoding {expected:?}, got {actual:?}
  EncodingMismatch { expected: Vec<u8>, actual: Vec<u8> },
  /// decoded {actual}, but expected {expected}
  DecodingMismatch { expected: String, actual: String },
  /// round trip through {bytes:?} turned {original} into {resurrected}
  RoundTripMismatch {
    bytes: Vec<u8>,
    original: String,
    resurrected: String,
  },
  /// expected encoding to fail, but it produced {0:?}
  UnexpectedSuccess(Vec<u8>),
  /// {0}
  Library(#[from] LibraryError),
}

/// Check that `message` serializes to exactly `expected`.
pub fn assert_encodes_to<M: Message>(message: &M, expected: &[u8]) -> Result<(), AssertionError> {
  let actual = message.serialized_bytes()?;
  if actual != expected {
    return Err(AssertionError::EncodingMismatch {
      expected: expected.to_vec(),
      actual,
    });
  }
  Ok(())
}

/// Check that `bytes` parses into a message equal to `expected`.
pub fn assert_decodes_to<M: Message + PartialEq>(
  bytes: &[u8],
  expected: &M,
) -> Result<(), AssertionError> {
  let actual = M::from_serialized_bytes(bytes)?;
  if &actual != expected {
    return Err(AssertionError::DecodingMismatch {
      expected: format!("{:?}", expected),
      actual: format!("{:?}", actual),
    });
  }
  Ok(())
}

/// Serialize `message`, parse it back, and check nothing changed. Returns the serialized bytes.
pub fn assert_round_trips<M: Message + PartialEq>(message: &M) -> Result<Vec<u8>, AssertionError> {
  let bytes = message.serialized_bytes()?;
  let resurrected = M::from_serialized_bytes(&bytes)?;
  if &resurrected != message {
    return Err(AssertionError::RoundTripMismatch {
      bytes,
      original: format!("{:?}", message),
      resurrected: format!("{:?}", resurrected),
    });
  }
  Ok(bytes)
}

/// Check that serializing `message` fails, returning the error it failed with.
pub fn assert_encode_fails<M: Message>(message: &M) -> Result<LibraryError, AssertionError> {
  match message.serialized_bytes() {
    Ok(bytes) => Err(AssertionError::UnexpectedSuccess(bytes)),
    Err(e) => Ok(e),
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::fixtures::*;

  #[test]
  fn matching_encoding_passes() -> Result<(), AssertionError> {
    assert_encodes_to(&TestRequiredInt::new(5), &[0x08, 0x05])?;
    assert_encodes_to(&TestEmpty {}, &[])?;
    assert_decodes_to(&[0x08, 0x05], &TestRequiredInt::new(5))?;
    Ok(())
  }

  #[test]
  fn mismatched_encoding_reports_both_arrays() {
    let e = assert_encodes_to(&TestRequiredInt::new(5), &[0x08, 0x06]).unwrap_err();
    assert_eq!(e.to_string(), "expected encoding [8, 6], got [8, 5]");
  }

  #[test]
  fn mismatched_decoding_is_reported() {
    match assert_decodes_to(&[0x08, 0x05], &TestRequiredInt::new(4)) {
      Err(AssertionError::DecodingMismatch { expected, actual }) => {
        assert!(expected.contains('4'));
        assert!(actual.contains('5'));
      }
      x => panic!("unexpected result {:?}", x),
    }
  }

  #[test]
  fn round_trip_returns_bytes() -> Result<(), AssertionError> {
    let bytes = assert_round_trips(&TestNested::chain(&[1, 2]))?;
    assert_eq!(
      bytes,
      vec![0x0a, 0x02, 0x08, 0x01, 0x12, 0x04, 0x0a, 0x02, 0x08, 0x02]
    );
    Ok(())
  }

  #[test]
  fn encode_failures_are_returned() -> Result<(), AssertionError> {
    let e = assert_encode_fails(&TestEnvelope::default())?;
    assert_eq!(e.missing_field(), Some("kind"));
    match assert_encode_fails(&TestEnvelope::text("")) {
      Err(AssertionError::UnexpectedSuccess(bytes)) => assert_eq!(bytes, vec![0x12, 0x00]),
      x => panic!("unexpected result {:?}", x),
    }
    Ok(())
  }

  #[test]
  fn library_errors_pass_through() {
    match assert_encodes_to(&TestNested::default(), &[]) {
      Err(AssertionError::Library(e)) => assert_eq!(e.missing_field(), Some("child")),
      x => panic!("unexpected result {:?}", x),
    }
  }
}
