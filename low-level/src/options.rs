/* Copyright 2021 Danny McClanahan */
/* SPDX-License-Identifier: AGPL-3.0-only */

//! Knobs for [Message::serialized_data_with](crate::message::Message::serialized_data_with) and
//! [Message::from_serialized_data_with](crate::message::Message::from_serialized_data_with).

/// The largest message the protobuf wire format can describe (2GiB - 1).
pub const MAX_MESSAGE_SIZE: usize = 0x7fff_ffff;

/// Options applied when producing a message's serialized bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EncodingOptions {
  /// Skip the initialization check, allowing absent required fields to be written.
  pub partial: bool,
  /// Refuse to encode messages whose encoded length exceeds this many bytes.
  pub max_size: usize,
}

impl Default for EncodingOptions {
  fn default() -> Self {
    Self {
      partial: false,
      max_size: MAX_MESSAGE_SIZE,
    }
  }
}

impl EncodingOptions {
  pub fn partial() -> Self {
    Self {
      partial: true,
      ..Self::default()
    }
  }

  pub fn with_max_size(self, max_size: usize) -> Self {
    Self { max_size, ..self }
  }
}

/// Options applied when parsing a message from serialized bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DecodingOptions {
  /// Accept messages which fail the initialization check.
  pub partial: bool,
  /// Refuse input longer than this many bytes before handing it to the decoder.
  pub max_size: usize,
}

impl Default for DecodingOptions {
  fn default() -> Self {
    Self {
      partial: false,
      max_size: MAX_MESSAGE_SIZE,
    }
  }
}

impl DecodingOptions {
  pub fn partial() -> Self {
    Self {
      partial: true,
      ..Self::default()
    }
  }

  pub fn with_max_size(self, max_size: usize) -> Self {
    Self { max_size, ..self }
  }
}
