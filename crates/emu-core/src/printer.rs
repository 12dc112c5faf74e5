//! Printer driver interface.

use crate::PrinterError;

/// Which channel an open or close refers to.
///
/// The serial layer opens the printer once per session before any channel
/// is used, and closes it once after the last channel is gone. In between,
/// each `OPEN` with a secondary address opens a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// First open / last close of the device as a whole.
    Session,
    /// A logical channel selected by secondary address.
    Secondary(u8),
}

/// A printer driver.
///
/// The serial layer calls these after it has decoded LISTEN/TALK and the
/// secondary address, so the driver only ever sees data bytes.
pub trait PrinterDriver {
    /// Short driver name (e.g. `mps803`).
    fn name(&self) -> &'static str;

    /// A session or channel is being opened.
    fn open(&mut self, channel: Channel) -> Result<(), PrinterError>;

    /// A session or channel is being closed.
    fn close(&mut self, channel: Channel) -> Result<(), PrinterError>;

    /// Process one byte received on the given secondary address.
    fn putc(&mut self, secondary: u8, byte: u8) -> Result<(), PrinterError>;

    /// Read a status byte on the given secondary address.
    fn getc(&mut self, secondary: u8) -> Result<u8, PrinterError>;

    /// Flush any buffered output.
    fn flush(&mut self, secondary: u8) -> Result<(), PrinterError>;

    /// Eject the current page.
    fn formfeed(&mut self) -> Result<(), PrinterError>;
}
