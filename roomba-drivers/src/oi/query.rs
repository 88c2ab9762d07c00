//! Blocking queries
//!
//! Replies are read a byte at a time. Each byte gets the full read timeout,
//! measured from when the wait for that byte began, so a query for `n`
//! bytes never blocks for more than `n` timeouts.

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use roomba_hal::{ByteChannel, Clock, OutputPin};
use roomba_protocol::command::MAX_SCRIPT_LEN;
use roomba_protocol::{Command, SensorPacket};

use super::OpenInterface;
use crate::error::{OiError, ScriptRead};

/// Length of the largest sensor packet (group 100)
pub const MAX_SENSOR_LEN: usize = 80;

impl<C, P, K, D, const N: usize> OpenInterface<C, P, K, D, N>
where
    C: ByteChannel,
    P: OutputPin,
    K: Clock,
    D: DelayNs,
{
    /// Wait for one byte
    fn read_byte_timeout(&mut self) -> Result<u8, OiError> {
        let start = self.clock.now();
        while self.channel.available() == 0 {
            if self.clock.elapsed_since(start) >= self.read_timeout {
                warn!("read timed out after {} ms", self.read_timeout.to_millis());
                return Err(OiError::Timeout);
            }
        }
        Ok(self.channel.read_byte())
    }

    /// Fill `dest` from the link
    ///
    /// On timeout `dest` is partially written and should be ignored.
    pub fn read_exact(&mut self, dest: &mut [u8]) -> Result<(), OiError> {
        for slot in dest.iter_mut() {
            *slot = self.read_byte_timeout()?;
        }
        Ok(())
    }

    /// Query one sensor packet, reading `dest.len()` bytes of reply
    pub fn sensors(&mut self, packet: SensorPacket, dest: &mut [u8]) -> Result<(), OiError> {
        self.transmit(Command::Sensors(packet))?;
        self.read_exact(dest)
    }

    /// Query one sensor packet, reading as many bytes as that packet has
    pub fn read_sensor(&mut self, packet: SensorPacket) -> Result<Vec<u8, MAX_SENSOR_LEN>, OiError> {
        let mut buf = [0u8; MAX_SENSOR_LEN];
        let data = &mut buf[..packet.len()];
        self.sensors(packet, data)?;
        Ok(data.iter().copied().collect())
    }

    /// Query several sensor packets at once
    ///
    /// The reply is the packets' data back to back; `dest` must be sized to
    /// their total length.
    pub fn query_list(&mut self, packets: &[SensorPacket], dest: &mut [u8]) -> Result<(), OiError> {
        self.transmit(Command::QueryList(packets))?;
        self.read_exact(dest)
    }

    /// Read back the stored script
    ///
    /// Copies as much as fits in `dest` but always consumes the whole
    /// reply. A count over 100 is rejected before any script byte is read.
    pub fn get_script(&mut self, dest: &mut [u8]) -> Result<ScriptRead, OiError> {
        self.transmit(Command::ShowScript)?;

        let count = self.read_byte_timeout()?;
        if usize::from(count) > MAX_SCRIPT_LEN {
            warn!("robot reported script length {}", count);
            return Err(OiError::ProtocolViolation { count });
        }

        let mut stored = 0;
        for i in 0..usize::from(count) {
            let byte = self.read_byte_timeout()?;
            if let Some(slot) = dest.get_mut(i) {
                *slot = byte;
                stored += 1;
            }
        }
        Ok(ScriptRead { count, stored })
    }
}
