//! Sensor stream framing
//!
//! Frame format:
//! - HEADER (1 byte): 19
//! - LENGTH (1 byte): payload length (0-255)
//! - PAYLOAD (LENGTH bytes): packet ID followed by its data, repeated
//! - CHECKSUM (1 byte): chosen so that HEADER + LENGTH + PAYLOAD + CHECKSUM
//!   is 0 modulo 256
//!
//! The robot prints boot banners and charging messages on the same wire, so
//! the decoder discards anything that arrives between frames.

use heapless::Vec;

use crate::sensor::SensorPacket;

/// Frame synchronization byte
pub const STREAM_HEADER: u8 = 19;

/// Largest payload a frame can declare
pub const MAX_STREAM_PAYLOAD: usize = 255;

/// A frame that failed to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamError {
    /// Frame summed to a non-zero value
    ChecksumMismatch { sum: u8 },
}

/// A frame that could not be encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Checksum byte for a frame with the given payload
pub fn checksum(payload: &[u8]) -> u8 {
    let sum = payload
        .iter()
        .fold(STREAM_HEADER.wrapping_add(payload.len() as u8), |sum, &b| {
            sum.wrapping_add(b)
        });
    sum.wrapping_neg()
}

/// Encode a complete frame into a byte buffer
///
/// Returns the number of bytes written. The robot is the only producer of
/// these frames; this exists for simulators and tests.
pub fn encode_frame(payload: &[u8], buffer: &mut [u8]) -> Result<usize, EncodeError> {
    if payload.len() > MAX_STREAM_PAYLOAD {
        return Err(EncodeError::PayloadTooLarge);
    }

    let frame_len = payload.len() + 3; // HEADER + LENGTH + payload + CHECKSUM
    if buffer.len() < frame_len {
        return Err(EncodeError::BufferTooSmall);
    }

    buffer[0] = STREAM_HEADER;
    buffer[1] = payload.len() as u8;
    buffer[2..2 + payload.len()].copy_from_slice(payload);
    buffer[2 + payload.len()] = checksum(payload);

    Ok(frame_len)
}

/// A checksum-valid frame
///
/// Holds at most `N` payload bytes. When the robot sent more than that the
/// surplus was counted into the checksum but dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamPacket<const N: usize = MAX_STREAM_PAYLOAD> {
    len: u8,
    data: Vec<u8, N>,
}

impl<const N: usize> StreamPacket<N> {
    /// Payload length declared by the robot
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stored payload bytes, in wire order
    pub fn payload(&self) -> &[u8] {
        &self.data
    }

    /// Check if part of the payload was dropped for lack of room
    pub fn is_truncated(&self) -> bool {
        self.data.len() < self.len()
    }

    /// Iterate over the `(packet ID, data)` records of the payload
    ///
    /// Stops at the first unknown ID or a record cut short by truncation.
    pub fn records(&self) -> Records<'_> {
        Records {
            rest: self.payload(),
        }
    }
}

/// Iterator over the sensor records of a stream payload
#[derive(Debug, Clone)]
pub struct Records<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Records<'a> {
    type Item = (SensorPacket, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let (&id, tail) = self.rest.split_first()?;
        let packet = SensorPacket::from_byte(id)?;
        let len = packet.len();
        if tail.len() < len {
            self.rest = &[];
            return None;
        }
        let (data, rest) = tail.split_at(len);
        self.rest = rest;
        Some((packet, data))
    }
}

/// Parse position of the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollState {
    /// Discarding bytes until a HEADER
    Idle,
    /// Got HEADER, waiting for LENGTH
    WaitCount,
    /// Reading payload bytes
    WaitBytes,
    /// Waiting for CHECKSUM
    WaitChecksum,
}

/// Resumable state machine for the sensor stream
///
/// Partial frames live here between calls, so the caller can feed whatever
/// bytes a polling tick happened to receive.
#[derive(Debug, Clone)]
pub struct StreamDecoder<const N: usize = MAX_STREAM_PAYLOAD> {
    state: PollState,
    expected: u8,
    consumed: u8,
    checksum: u8,
    payload: Vec<u8, N>,
}

impl<const N: usize> Default for StreamDecoder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> StreamDecoder<N> {
    /// Create a new decoder
    pub fn new() -> Self {
        Self {
            state: PollState::Idle,
            expected: 0,
            consumed: 0,
            checksum: 0,
            payload: Vec::new(),
        }
    }

    /// Reset the decoder state, dropping any partial frame
    pub fn reset(&mut self) {
        self.state = PollState::Idle;
        self.expected = 0;
        self.consumed = 0;
        self.checksum = 0;
        self.payload.clear();
    }

    /// Current parse position
    pub fn state(&self) -> PollState {
        self.state
    }

    /// Check if the decoder is between frames
    pub fn is_idle(&self) -> bool {
        self.state == PollState::Idle
    }

    /// Feed a single byte to the decoder
    ///
    /// Returns `Ok(Some(packet))` when a frame completes with a valid
    /// checksum, `Ok(None)` when more bytes are needed, or
    /// `Err(ChecksumMismatch)` when a frame completes but fails the checksum.
    /// The decoder is back at [`PollState::Idle`] after either outcome.
    pub fn feed(&mut self, byte: u8) -> Result<Option<StreamPacket<N>>, StreamError> {
        match self.state {
            PollState::Idle => {
                if byte == STREAM_HEADER {
                    self.state = PollState::WaitCount;
                }
                // Anything else is banner or log text
                Ok(None)
            }
            PollState::WaitCount => {
                self.expected = byte;
                self.consumed = 0;
                self.checksum = STREAM_HEADER.wrapping_add(byte);
                self.payload.clear();
                self.state = if byte == 0 {
                    PollState::WaitChecksum
                } else {
                    PollState::WaitBytes
                };
                Ok(None)
            }
            PollState::WaitBytes => {
                self.checksum = self.checksum.wrapping_add(byte);
                // Bytes past capacity still count toward the checksum
                let _ = self.payload.push(byte);
                self.consumed += 1;
                if self.consumed == self.expected {
                    self.state = PollState::WaitChecksum;
                }
                Ok(None)
            }
            PollState::WaitChecksum => {
                let sum = self.checksum.wrapping_add(byte);
                self.state = PollState::Idle;

                if sum != 0 {
                    self.payload.clear();
                    return Err(StreamError::ChecksumMismatch { sum });
                }

                Ok(Some(StreamPacket {
                    len: self.expected,
                    data: core::mem::take(&mut self.payload),
                }))
            }
        }
    }

    /// Feed multiple bytes to the decoder
    ///
    /// Returns the first complete frame found, if any, and the number of
    /// bytes consumed. Bytes after a complete frame are not consumed.
    pub fn feed_bytes(
        &mut self,
        bytes: &[u8],
    ) -> (usize, Result<Option<StreamPacket<N>>, StreamError>) {
        for (i, &byte) in bytes.iter().enumerate() {
            match self.feed(byte) {
                Ok(None) => {}
                result => return (i + 1, result),
            }
        }
        (bytes.len(), Ok(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn frame(payload: &[u8]) -> std::vec::Vec<u8> {
        let mut buffer = [0u8; MAX_STREAM_PAYLOAD + 3];
        let len = encode_frame(payload, &mut buffer).unwrap();
        buffer[..len].to_vec()
    }

    #[test]
    fn test_checksum_zeroes_sum() {
        let bytes = frame(&[10, 20, 30]);
        let sum = bytes.iter().fold(0u8, |s, &b| s.wrapping_add(b));
        assert_eq!(sum, 0);
        assert_eq!(bytes, [19, 3, 10, 20, 30, 174]);
    }

    #[test]
    fn test_decode_simple_frame() {
        let mut decoder = StreamDecoder::<MAX_STREAM_PAYLOAD>::new();
        let (used, result) = decoder.feed_bytes(&frame(&[7, 0x03]));
        let packet = result.unwrap().unwrap();

        assert_eq!(used, 5);
        assert_eq!(packet.len(), 2);
        assert_eq!(packet.payload(), &[7, 0x03]);
        assert!(!packet.is_truncated());
        assert!(decoder.is_idle());
    }

    #[test]
    fn test_empty_frame() {
        let mut decoder = StreamDecoder::<16>::new();
        let (_, result) = decoder.feed_bytes(&[19, 0, 237]);
        let packet = result.unwrap().unwrap();
        assert!(packet.is_empty());
    }

    #[test]
    fn test_resumes_across_calls() {
        let bytes = frame(&[10, 20, 30]);

        let mut split = StreamDecoder::<16>::new();
        assert_eq!(split.feed_bytes(&bytes[..2]), (2, Ok(None)));
        assert_eq!(split.state(), PollState::WaitBytes);
        let (_, late) = split.feed_bytes(&bytes[2..]);

        let mut whole = StreamDecoder::<16>::new();
        let (_, early) = whole.feed_bytes(&bytes);

        assert_eq!(late.unwrap().unwrap(), early.unwrap().unwrap());
    }

    #[test]
    fn test_discards_banner_text() {
        let mut data = b"bl-start\r\nSTR730\r\n".to_vec();
        data.extend_from_slice(&frame(&[21, 2]));

        let mut decoder = StreamDecoder::<16>::new();
        let (_, result) = decoder.feed_bytes(&data);
        assert_eq!(result.unwrap().unwrap().payload(), &[21, 2]);
    }

    #[test]
    fn test_checksum_mismatch_resets() {
        let mut bytes = frame(&[1, 2, 3]);
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;

        let mut decoder = StreamDecoder::<16>::new();
        let (_, result) = decoder.feed_bytes(&bytes);
        assert!(matches!(result, Err(StreamError::ChecksumMismatch { .. })));
        assert!(decoder.is_idle());

        // Next good frame still decodes
        let (_, result) = decoder.feed_bytes(&frame(&[4]));
        assert_eq!(result.unwrap().unwrap().payload(), &[4]);
    }

    #[test]
    fn test_truncation_is_silent() {
        let payload = [1, 2, 3, 4, 5, 6];
        let mut decoder = StreamDecoder::<4>::new();
        let (_, result) = decoder.feed_bytes(&frame(&payload));
        let packet = result.unwrap().unwrap();

        assert_eq!(packet.len(), 6);
        assert_eq!(packet.payload(), &[1, 2, 3, 4]);
        assert!(packet.is_truncated());
    }

    #[test]
    fn test_bytes_after_frame_not_consumed() {
        let mut data = frame(&[9]);
        data.extend_from_slice(&frame(&[8]));

        let mut decoder = StreamDecoder::<16>::new();
        let (used, first) = decoder.feed_bytes(&data);
        assert_eq!(used, 4);
        assert_eq!(first.unwrap().unwrap().payload(), &[9]);

        let (_, second) = decoder.feed_bytes(&data[used..]);
        assert_eq!(second.unwrap().unwrap().payload(), &[8]);
    }

    #[test]
    fn test_records() {
        // Packet 7 (1 byte) then packet 22 voltage (2 bytes)
        let mut decoder = StreamDecoder::<16>::new();
        let (_, result) = decoder.feed_bytes(&frame(&[7, 0x01, 22, 0x3A, 0x98]));
        let packet = result.unwrap().unwrap();

        let mut records = packet.records();
        assert_eq!(
            records.next(),
            Some((SensorPacket::BumpsAndWheelDrops, &[0x01][..]))
        );
        assert_eq!(records.next(), Some((SensorPacket::Voltage, &[0x3A, 0x98][..])));
        assert_eq!(records.next(), None);
    }

    #[test]
    fn test_records_stop_on_short_record() {
        let mut decoder = StreamDecoder::<16>::new();
        let (_, result) = decoder.feed_bytes(&frame(&[22, 0x3A]));
        assert_eq!(result.unwrap().unwrap().records().count(), 0);
    }

    #[test]
    fn test_reset_drops_partial_frame() {
        let mut decoder = StreamDecoder::<16>::new();
        assert_eq!(decoder.feed_bytes(&[19, 5, 1, 2]), (4, Ok(None)));
        assert_eq!(decoder.state(), PollState::WaitBytes);
        decoder.reset();
        assert!(decoder.is_idle());
    }

    #[test]
    fn test_encode_errors() {
        let mut small = [0u8; 4];
        assert_eq!(
            encode_frame(&[1, 2], &mut small),
            Err(EncodeError::BufferTooSmall)
        );
        let big = [0u8; MAX_STREAM_PAYLOAD + 1];
        let mut buffer = [0u8; MAX_STREAM_PAYLOAD + 8];
        assert_eq!(
            encode_frame(&big, &mut buffer),
            Err(EncodeError::PayloadTooLarge)
        );
    }

    proptest! {
        #[test]
        fn prop_any_payload_is_recovered(payload in proptest::collection::vec(any::<u8>(), 0..=253)) {
            let mut decoder = StreamDecoder::<MAX_STREAM_PAYLOAD>::new();
            let (used, result) = decoder.feed_bytes(&frame(&payload));
            let packet = result.unwrap().unwrap();

            prop_assert_eq!(used, payload.len() + 3);
            prop_assert_eq!(packet.payload(), &payload[..]);
            prop_assert!(decoder.is_idle());
        }

        #[test]
        fn prop_single_byte_flip_is_rejected(
            payload in proptest::collection::vec(any::<u8>(), 1..=253),
            index in any::<prop::sample::Index>(),
            flip in 1..=255u8,
        ) {
            let mut bytes = frame(&payload);
            let i = 2 + index.index(payload.len());
            bytes[i] ^= flip;

            let mut decoder = StreamDecoder::<MAX_STREAM_PAYLOAD>::new();
            let (_, result) = decoder.feed_bytes(&bytes);
            let rejected = matches!(result, Err(StreamError::ChecksumMismatch { .. }));
            prop_assert!(rejected);
        }

        #[test]
        fn prop_split_feed_matches_whole(
            payload in proptest::collection::vec(any::<u8>(), 0..=64),
            split in any::<prop::sample::Index>(),
        ) {
            let bytes = frame(&payload);
            let at = split.index(bytes.len());

            let mut decoder = StreamDecoder::<MAX_STREAM_PAYLOAD>::new();
            let (used, first) = decoder.feed_bytes(&bytes[..at]);
            let packet = match first.unwrap() {
                Some(packet) => packet,
                None => {
                    prop_assert_eq!(used, at);
                    decoder.feed_bytes(&bytes[at..]).1.unwrap().unwrap()
                }
            };
            prop_assert_eq!(packet.payload(), &payload[..]);
        }
    }
}
