//! Headless Commodore MPS-803 printer.
//!
//! Feeds a byte stream to the emulated printer the way the serial layer
//! would (session open, channel open, data, channel close, session close)
//! and collects the printed pages.

pub mod config;
pub mod job;
pub mod petscii;
pub mod state;

pub use config::PrinterConfig;
pub use job::PrintJob;
