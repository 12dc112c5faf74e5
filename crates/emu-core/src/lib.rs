//! Core traits and types for Commodore printer emulation.
//!
//! A printer is split in two halves. The driver interprets the bytes the
//! computer sends over the serial bus; the output device collects the dots
//! the driver emits and turns them into pages. Both halves talk through the
//! traits defined here, so any driver can print to any output.

mod error;
mod observable;
mod output;
mod printer;

pub use error::PrinterError;
pub use observable::{Observable, Value};
pub use output::{NamedColor, OutputParams, OutputSymbol, PrinterOutput};
pub use printer::{Channel, PrinterDriver};
