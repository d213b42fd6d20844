/* Copyright 2021 Danny McClanahan */
/* SPDX-License-Identifier: AGPL-3.0-only */

//! Serialization and deserialization (ser/de) of domain objects through a protobuf schema.
//!
//! A domain type `Source` is paired with the [prost] struct `Proto` describing its wire form. The
//! wrappers in [formats] pick the container the bytes are produced in.

pub use traits::*;
pub mod traits {
  use crate::error::Error;

  pub trait Schema {
    type Source;
  }

  pub trait SerializationFormat {
    type Read: ?Sized;
    type Written: Sized;
  }

  pub trait SerdeViaBase {
    type Fmt: SerializationFormat;
    type Medium: Schema;
  }

  pub trait Serializer: SerdeViaBase {
    fn serialize(self) -> Result<<Self::Fmt as SerializationFormat>::Written, Error>;
  }

  pub trait Deserializer: SerdeViaBase {
    fn deserialize(
      data: &<Self::Fmt as SerializationFormat>::Read,
    ) -> Result<<Self::Medium as Schema>::Source, Error>
    where
      Self: Sized;
  }

  pub trait SerdeVia: Serializer + Deserializer {}
}

pub use formats::{array::ByteArray, protobuf::Protobuf};
pub mod formats {
  use super::traits::*;
  use crate::error::Error;
  use crate::message::Message;

  use std::{convert::TryInto, marker::PhantomData};

  pub mod protobuf {
    use super::*;

    use bytes::Bytes;

    #[derive(Debug, Copy, Clone)]
    pub struct ProtobufFormat;

    impl SerializationFormat for ProtobufFormat {
      type Read = [u8];
      type Written = Bytes;
    }

    /// Write `Source` as the [Bytes] of its `Proto` message.
    #[derive(Debug, Copy, Clone)]
    pub struct Protobuf<Source, Proto>(pub Source, PhantomData<Proto>);

    impl<Source, Proto> Protobuf<Source, Proto> {
      pub fn new(source: Source) -> Self {
        Self(source, PhantomData)
      }
    }

    impl<Proto> SerdeViaBase for Protobuf<Proto::Source, Proto>
    where
      Proto: Schema,
    {
      type Fmt = ProtobufFormat;
      type Medium = Proto;
    }

    impl<Proto> Serializer for Protobuf<Proto::Source, Proto>
    where
      Proto: Schema + Message + From<Proto::Source>,
    {
      fn serialize(self) -> Result<Bytes, Error> {
        let proto_message: Proto = self.0.into();
        proto_message.serialized_data()
      }
    }

    impl<Proto> Deserializer for Protobuf<Proto::Source, Proto>
    where
      Proto: Schema + Message + TryInto<Proto::Source, Error = Error>,
    {
      fn deserialize(data: &[u8]) -> Result<Proto::Source, Error>
      where
        Self: Sized,
      {
        let proto_message = Proto::from_serialized_data(data)?;
        proto_message.try_into()
      }
    }

    impl<Proto> SerdeVia for Protobuf<Proto::Source, Proto> where
      Proto: Schema + Message + From<Proto::Source> + TryInto<Proto::Source, Error = Error>
    {
    }
  }

  pub mod array {
    use super::*;
    use crate::array::SerializedBytes;

    #[derive(Debug, Copy, Clone)]
    pub struct ByteArrayFormat;

    impl SerializationFormat for ByteArrayFormat {
      type Read = [u8];
      type Written = Vec<u8>;
    }

    /// Write `Source` as a byte array of its `Proto` message.
    #[derive(Debug, Copy, Clone)]
    pub struct ByteArray<Source, Proto>(pub Source, PhantomData<Proto>);

    impl<Source, Proto> ByteArray<Source, Proto> {
      pub fn new(source: Source) -> Self {
        Self(source, PhantomData)
      }
    }

    impl<Proto> SerdeViaBase for ByteArray<Proto::Source, Proto>
    where
      Proto: Schema,
    {
      type Fmt = ByteArrayFormat;
      type Medium = Proto;
    }

    impl<Proto> Serializer for ByteArray<Proto::Source, Proto>
    where
      Proto: Schema + Message + From<Proto::Source>,
    {
      fn serialize(self) -> Result<Vec<u8>, Error> {
        let proto_message: Proto = self.0.into();
        proto_message.serialized_bytes()
      }
    }

    impl<Proto> Deserializer for ByteArray<Proto::Source, Proto>
    where
      Proto: Schema + Message + TryInto<Proto::Source, Error = Error>,
    {
      fn deserialize(data: &[u8]) -> Result<Proto::Source, Error>
      where
        Self: Sized,
      {
        let proto_message = Proto::from_serialized_bytes(data)?;
        proto_message.try_into()
      }
    }

    impl<Proto> SerdeVia for ByteArray<Proto::Source, Proto> where
      Proto: Schema + Message + From<Proto::Source> + TryInto<Proto::Source, Error = Error>
    {
    }
  }
}
