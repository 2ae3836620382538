//! Blocking native messaging transport.
//!
//! A browser talks to its native host over the host's stdin/stdout, every
//! message framed as a little-endian `u32` byte length followed by that many
//! bytes of UTF-8 JSON.

pub mod message_codec;

use std::io::{self, Read, Stdin, Stdout, Write};

use bytes::BytesMut;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, trace};

pub use message_codec::NativeMessageCodec;

/// A decoded request body.
pub type Message = Map<String, Value>;

const READ_CHUNK: usize = 8 * 1024;

#[derive(Error, Debug)]
pub enum FramingError {
    #[error("Native messaging I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid JSON in message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// Nothing was written, the stream is still usable.
    #[error("Response too large: {0} bytes")]
    ResponseTooLarge(usize),
}

pub struct NativeMessenger<R, W> {
    reader: R,
    writer: W,
    codec: NativeMessageCodec,
    buffer: BytesMut,
}

impl NativeMessenger<Stdin, Stdout> {
    /// Messenger bound to the process's standard streams.
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<R: Read, W: Write> NativeMessenger<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_codec(reader, writer, NativeMessageCodec::default())
    }

    pub fn with_codec(reader: R, writer: W, codec: NativeMessageCodec) -> Self {
        Self {
            reader,
            writer,
            codec,
            buffer: BytesMut::new(),
        }
    }

    /// Blocks until a full message is read.
    ///
    /// Returns `Ok(None)` when the stream closes between messages. A stream
    /// that closes inside a frame is an `UnexpectedEof` error.
    pub fn read_message(&mut self) -> Result<Option<Message>, FramingError> {
        let frame = loop {
            if let Some(frame) = self.codec.decode(&mut self.buffer)? {
                break frame;
            }

            let mut chunk = [0u8; READ_CHUNK];
            let n = match self.reader.read(&mut chunk) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            if n == 0 {
                if self.buffer.is_empty() {
                    debug!("Input stream closed");
                    return Ok(None);
                }
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("Stream closed inside a frame ({} bytes pending)", self.buffer.len()),
                )
                .into());
            }
            self.buffer.extend_from_slice(&chunk[..n]);
        };

        trace!("Received frame of {} bytes", frame.len());
        let text = std::str::from_utf8(&frame)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        match serde_json::from_str(text)? {
            Value::Object(message) => Ok(Some(message)),
            other => Err(FramingError::NotAnObject(json_kind(&other))),
        }
    }

    /// Serializes `message`, writes it as a single frame and flushes.
    pub fn write_message<T: Serialize>(&mut self, message: &T) -> Result<(), FramingError> {
        let body = serde_json::to_vec(message)?;
        let size = body.len();
        let mut frame = BytesMut::new();
        self.codec.encode(body, &mut frame).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidInput => FramingError::ResponseTooLarge(size),
            _ => e.into(),
        })?;

        self.writer.write_all(&frame)?;
        self.writer.flush()?;
        trace!("Sent frame of {} bytes", frame.len());
        Ok(())
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
