//! The poll tick
//!
//! The robot's output mixes free text (boot banner, debug echoes) with
//! binary stream frames. A frame always starts with byte 19, which never
//! begins a text line, so while no frame is in progress a 19 starts one and
//! anything else is text.

use embedded_hal::delay::DelayNs;
use roomba_hal::{ByteChannel, Clock, Instant, OutputPin};
use roomba_protocol::{PollState, StreamError, StreamPacket, STREAM_HEADER};

use super::OpenInterface;

/// Counters kept by [`OpenInterface::poll_once`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollStats {
    /// Stream packets accepted
    pub packets: u32,
    /// Stream packets dropped for a bad checksum
    pub checksum_errors: u32,
    /// Text lines seen
    pub lines: u32,
}

impl<C, P, K, D, const N: usize> OpenInterface<C, P, K, D, N>
where
    C: ByteChannel,
    P: OutputPin,
    K: Clock,
    D: DelayNs,
{
    /// Process whatever the robot has sent so far
    ///
    /// Returns as soon as a stream packet completes; bytes after it wait for
    /// the next tick. Never blocks on the link. When anything was received
    /// the wake line is pulsed first if a pulse is due.
    ///
    /// Text cut short by the start of a frame is dropped rather than joined
    /// to the text after the frame.
    pub fn poll_once(&mut self, now: Instant) -> Option<StreamPacket<N>> {
        if self.channel.available() == 0 {
            return None;
        }

        self.wake.poll(&mut self.wake_pin, &mut self.delay, now);

        while self.channel.available() > 0 {
            let byte = self.channel.read_byte();

            if self.decoder.is_idle() {
                if byte != STREAM_HEADER {
                    if let Some(line) = self.lines.feed(byte) {
                        debug!("robot: {}", core::str::from_utf8(line).unwrap_or("<binary>"));
                        self.stats.lines = self.stats.lines.wrapping_add(1);
                    }
                    continue;
                }
                // A frame ends any unterminated text
                if self.lines.pending() > 0 {
                    debug!("dropped {} bytes of unterminated text", self.lines.pending());
                    self.lines.clear();
                }
            }

            match self.decoder.feed(byte) {
                Ok(Some(packet)) => {
                    trace!("stream packet, {} bytes", packet.len());
                    self.stats.packets = self.stats.packets.wrapping_add(1);
                    return Some(packet);
                }
                Ok(None) => {}
                Err(StreamError::ChecksumMismatch { sum }) => {
                    warn!("stream checksum mismatch, sum {}", sum);
                    self.stats.checksum_errors = self.stats.checksum_errors.wrapping_add(1);
                }
            }
        }
        None
    }

    /// Where the stream decoder is within a frame
    pub fn stream_state(&self) -> PollState {
        self.decoder.state()
    }

    pub fn stats(&self) -> PollStats {
        self.stats
    }

    /// Bytes of an unterminated text line held over to the next tick
    pub fn pending_text(&self) -> usize {
        self.lines.pending()
    }
}
