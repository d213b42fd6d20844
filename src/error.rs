/* Copyright 2021 Danny McClanahan */
/* SPDX-License-Identifier: AGPL-3.0-only */

use protobytes_low_level::error::Error as LibraryError;

use displaydoc::Display;
use thiserror::Error;

#[derive(Debug, Display, Error)]
pub enum Error {
  /// protobuf error: {0}
  Library(#[from] LibraryError),
  /// assertion failed: {0}
  Assertion(#[from] crate::assertions::AssertionError),
  /// unknown fixture message type {0:?}
  UnknownFixture(String),
}
