//! Length-prefixed, checksummed frames.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{WireError, WireResult};

/// Size of the frame header: payload length + payload checksum.
pub const FRAME_HEADER_SIZE: usize = 8;

/// Largest payload a peer may announce.
pub const MAX_FRAME_SIZE: usize = 64 * 1024;

/// A single framed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub payload: Bytes,
}

impl Frame {
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Appends the encoded frame to `buf`.
    pub fn encode(&self, buf: &mut BytesMut) {
        buf.reserve(FRAME_HEADER_SIZE + self.payload.len());
        buf.put_u32(self.payload.len() as u32);
        buf.put_u32(crc32fast::hash(&self.payload));
        buf.extend_from_slice(&self.payload);
    }

    /// Decodes one frame from the front of `buf`.
    ///
    /// Returns `Ok(None)` and leaves `buf` untouched if a complete frame is
    /// not yet available.
    pub fn decode(buf: &mut BytesMut) -> WireResult<Option<Frame>> {
        if buf.len() < FRAME_HEADER_SIZE {
            return Ok(None);
        }

        let length = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
        if length > MAX_FRAME_SIZE {
            return Err(WireError::FrameTooLarge {
                size: length,
                max: MAX_FRAME_SIZE,
            });
        }

        if buf.len() < FRAME_HEADER_SIZE + length {
            return Ok(None);
        }

        buf.advance(4);
        let expected = buf.get_u32();
        let payload = buf.split_to(length).freeze();

        let actual = crc32fast::hash(&payload);
        if actual != expected {
            return Err(WireError::ChecksumMismatch { expected, actual });
        }

        Ok(Some(Frame { payload }))
    }
}
