/* Copyright 2021 Danny McClanahan */
/* SPDX-License-Identifier: AGPL-3.0-only */

use crate::error::Error;

use protobytes::{fixtures::FixtureKind, DecodingOptions, EncodingOptions, MAX_MESSAGE_SIZE};

use log::info;

pub enum Command {
  /// Re-serialize the input and print it as an array of byte values.
  Array(ArrayOptions),
  /// Report whether the input carries every field its schema requires.
  Check(FixtureKind),
}

pub struct ArrayOptions {
  pub kind: FixtureKind,
  pub partial: bool,
  pub max_size: usize,
}

impl ArrayOptions {
  pub fn new(kind: FixtureKind, partial: bool, max_size: Option<&str>) -> Result<Self, Error> {
    let max_size = match max_size {
      None => MAX_MESSAGE_SIZE,
      Some(s) => s
        .parse::<usize>()
        .map_err(|_| Error::InvalidMaxSize(s.to_string()))?,
    };
    Ok(Self {
      kind,
      partial,
      max_size,
    })
  }

  fn decoding(&self) -> DecodingOptions {
    DecodingOptions {
      partial: self.partial,
      max_size: self.max_size,
    }
  }

  fn encoding(&self) -> EncodingOptions {
    EncodingOptions {
      partial: self.partial,
      max_size: self.max_size,
    }
  }
}

/// Run `command` over the serialized message `input`, producing the line to print.
pub fn execute(command: &Command, input: &[u8]) -> Result<String, Error> {
  match command {
    Command::Array(options) => {
      info!("reading {} bytes as {}", input.len(), options.kind);
      let bytes = options
        .kind
        .array_form(input, &options.decoding(), &options.encoding())?;
      Ok(format_array(&bytes))
    }
    Command::Check(kind) => {
      info!("checking {} bytes as {}", input.len(), kind);
      Ok(match kind.missing_field(input)? {
        None => "initialized".to_string(),
        Some(field) => format!("missing: {}", field),
      })
    }
  }
}

/// Render `bytes` as a bracketed, comma-separated list of decimal values, e.g. `[8, 5]`.
pub fn format_array(bytes: &[u8]) -> String {
  format!("{:?}", bytes)
}
