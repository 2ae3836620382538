use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// Browsers accept messages of up to 64 MiB sent to a native host.
pub const MAX_INBOUND_FRAME: usize = 64 * 1024 * 1024;
/// Browsers drop messages larger than 1 MiB coming from a native host.
pub const MAX_OUTBOUND_FRAME: usize = 1024 * 1024;

const LENGTH_PREFIX: usize = 4;

/// Frame format: [length: u32 LE][data: bytes]
#[derive(Debug)]
pub struct NativeMessageCodec {
    max_inbound: usize,
    max_outbound: usize,
}

impl NativeMessageCodec {
    pub fn new(max_inbound: usize, max_outbound: usize) -> Self {
        Self {
            max_inbound,
            max_outbound,
        }
    }
}

impl Default for NativeMessageCodec {
    fn default() -> Self {
        Self::new(MAX_INBOUND_FRAME, MAX_OUTBOUND_FRAME)
    }
}

impl Decoder for NativeMessageCodec {
    type Item = BytesMut;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < LENGTH_PREFIX {
            return Ok(None);
        }

        let length = u32::from_le_bytes([src[0], src[1], src[2], src[3]]) as usize;

        if length > self.max_inbound {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Message too large: {} bytes", length),
            ));
        }

        if src.len() < LENGTH_PREFIX + length {
            src.reserve(LENGTH_PREFIX + length - src.len());
            return Ok(None);
        }

        src.advance(LENGTH_PREFIX);
        let data = src.split_to(length);
        Ok(Some(data))
    }
}

impl Encoder<Vec<u8>> for NativeMessageCodec {
    type Error = std::io::Error;

    fn encode(&mut self, item: Vec<u8>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if item.len() > self.max_outbound {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Response too large: {} bytes", item.len()),
            ));
        }

        let length = item.len() as u32;
        dst.reserve(LENGTH_PREFIX + item.len());
        dst.put_u32_le(length);
        dst.extend_from_slice(&item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waits_for_complete_frame() {
        let mut codec = NativeMessageCodec::default();
        let mut buf = BytesMut::from(&[5u8, 0, 0][..]);
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(&[0, b'h', b'e']);
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(b"llo!");
        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(&frame[..], b"hello");
        // bytes of the next frame stay buffered
        assert_eq!(&buf[..], b"!");
    }

    #[test]
    fn test_rejects_oversized_frame() {
        let mut codec = NativeMessageCodec::new(8, 8);
        let mut buf = BytesMut::from(&9u32.to_le_bytes()[..]);
        let err = codec.decode(&mut buf).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);

        let mut out = BytesMut::new();
        let err = codec.encode(vec![0; 9], &mut out).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
        assert!(out.is_empty());
    }

    #[test]
    fn test_encodes_little_endian_prefix() {
        let mut codec = NativeMessageCodec::default();
        let mut out = BytesMut::new();
        codec.encode(vec![b'x'; 258], &mut out).unwrap();
        assert_eq!(&out[..4], &[2, 1, 0, 0]);
        assert_eq!(out.len(), 4 + 258);
    }
}
