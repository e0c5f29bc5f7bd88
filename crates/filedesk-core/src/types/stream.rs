//! Byte stream type used for file contents flowing to and from the backend.

use std::pin::Pin;

use bytes::Bytes;
use futures::Stream;

/// A stream of file content chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;
