/* Copyright 2021 Danny McClanahan */
/* SPDX-License-Identifier: AGPL-3.0-only */

use crate::error::ProtobufCodingFailure;

use bytes::{Bytes, BytesMut};
use prost::Message;

/// Encode `m` into a buffer sized to exactly [Message::encoded_len], refusing anything
/// larger than `max_size`.
pub fn encode_proto_message<M: Message>(
  m: &M,
  max_size: usize,
) -> Result<Bytes, ProtobufCodingFailure> {
  let size = m.encoded_len();
  if size > max_size {
    return Err(ProtobufCodingFailure::TooLarge {
      size,
      limit: max_size,
    });
  }
  let mut serialized = BytesMut::with_capacity(size);
  m.encode(&mut serialized)?;
  Ok(serialized.freeze())
}

#[cfg(test)]
mod test {
  use super::*;

  #[derive(Clone, PartialEq, Message)]
  struct Pair {
    #[prost(uint32, tag = "1")]
    left: u32,
    #[prost(string, tag = "2")]
    right: String,
  }

  #[test]
  fn buffer_matches_encoded_len() {
    let pair = Pair {
      left: 300,
      right: "ab".to_string(),
    };
    let bytes = encode_proto_message(&pair, usize::MAX).unwrap();
    assert_eq!(bytes.len(), pair.encoded_len());
    assert_eq!(bytes.as_ref(), &[0x08, 0xac, 0x02, 0x12, 0x02, b'a', b'b']);
  }

  #[test]
  fn limit_is_inclusive() {
    let pair = Pair {
      left: 1,
      right: String::new(),
    };
    assert_eq!(pair.encoded_len(), 2);
    assert!(encode_proto_message(&pair, 2).is_ok());
    match encode_proto_message(&pair, 1) {
      Err(ProtobufCodingFailure::TooLarge { size, limit }) => {
        assert_eq!((size, limit), (2, 1));
      }
      x => panic!("expected TooLarge, got {:?}", x),
    }
  }
}
