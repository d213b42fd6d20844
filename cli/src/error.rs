/* Copyright 2021 Danny McClanahan */
/* SPDX-License-Identifier: AGPL-3.0-only */

use protobytes::error::Error as LibraryError;
use protobytes::low_level::error::Error as CodingError;

use displaydoc::Display;
use thiserror::Error;

use std::io;

#[derive(Debug, Display, Error)]
pub enum Error {
  /// protobytes error: {0}
  Library(#[from] LibraryError),
  /// {0}
  Coding(#[from] CodingError),
  /// i/o error: {0}
  Io(#[from] io::Error),
  /// --max-size must be a non-negative integer, got {0:?}
  InvalidMaxSize(String),
}
