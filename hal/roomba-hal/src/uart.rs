//! Serial link abstraction
//!
//! The Open Interface is a half-duplex 8N1 link with no acknowledgement for
//! control commands, so writes are fire-and-forget and reads are polled a
//! byte at a time.

/// Bidirectional byte stream to the robot
///
/// Implementations own the physical link exclusively and perform no
/// internal locking.
pub trait ByteChannel {
    /// Open (or reopen) the link with the given configuration
    fn open(&mut self, config: UartConfig);

    /// Close the link
    fn close(&mut self);

    /// Queue a single byte for transmission
    fn write_byte(&mut self, byte: u8) {
        self.write_bytes(&[byte]);
    }

    /// Queue a buffer for transmission
    fn write_bytes(&mut self, data: &[u8]);

    /// Block until every queued byte has left the transmitter
    fn flush(&mut self);

    /// Number of received bytes waiting to be read
    fn available(&self) -> usize;

    /// Take the next received byte
    ///
    /// Only call this when [`available`](Self::available) is non-zero.
    fn read_byte(&mut self) -> u8;
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl UartConfig {
    /// 8N1 at the given rate, the only framing the Open Interface uses
    pub const fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::with_baudrate(115200)
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
