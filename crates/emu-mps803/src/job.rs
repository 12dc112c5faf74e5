//! A print job: one byte stream sent on one secondary address.

use emu_core::{Channel, PrinterDriver, PrinterError};
use log::debug;

/// Bytes to print and the channel to print them on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob {
    /// Secondary address (0 = graphics, 7 = business).
    pub secondary: u8,
    /// Raw bytes as the computer would send them.
    pub data: Vec<u8>,
    /// Eject the page once the data has been sent.
    pub formfeed: bool,
}

impl PrintJob {
    #[must_use]
    pub fn new(secondary: u8, data: Vec<u8>) -> Self {
        Self {
            secondary,
            data,
            formfeed: false,
        }
    }

    /// Drive a complete session: open, send every byte, close.
    pub fn run<D: PrinterDriver + ?Sized>(&self, driver: &mut D) -> Result<(), PrinterError> {
        debug!(
            "{}: {} bytes on secondary address {}",
            driver.name(),
            self.data.len(),
            self.secondary
        );
        driver.open(Channel::Session)?;
        driver.open(Channel::Secondary(self.secondary))?;
        for &byte in &self.data {
            driver.putc(self.secondary, byte)?;
        }
        driver.flush(self.secondary)?;
        driver.close(Channel::Secondary(self.secondary))?;
        if self.formfeed {
            driver.formfeed()?;
        }
        driver.close(Channel::Session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Driver that logs every call.
    #[derive(Default)]
    struct CallLog(Vec<String>);

    impl PrinterDriver for CallLog {
        fn name(&self) -> &'static str {
            "log"
        }

        fn open(&mut self, channel: Channel) -> Result<(), PrinterError> {
            self.0.push(format!("open {channel:?}"));
            Ok(())
        }

        fn close(&mut self, channel: Channel) -> Result<(), PrinterError> {
            self.0.push(format!("close {channel:?}"));
            Ok(())
        }

        fn putc(&mut self, secondary: u8, byte: u8) -> Result<(), PrinterError> {
            self.0.push(format!("putc {secondary} {byte}"));
            Ok(())
        }

        fn getc(&mut self, _secondary: u8) -> Result<u8, PrinterError> {
            Ok(0)
        }

        fn flush(&mut self, secondary: u8) -> Result<(), PrinterError> {
            self.0.push(format!("flush {secondary}"));
            Ok(())
        }

        fn formfeed(&mut self) -> Result<(), PrinterError> {
            self.0.push("formfeed".to_string());
            Ok(())
        }
    }

    #[test]
    fn call_order() {
        let mut driver = CallLog::default();
        let mut job = PrintJob::new(7, vec![65, 13]);
        job.formfeed = true;
        job.run(&mut driver).expect("run");
        assert_eq!(
            driver.0,
            vec![
                "open Session",
                "open Secondary(7)",
                "putc 7 65",
                "putc 7 13",
                "flush 7",
                "close Secondary(7)",
                "formfeed",
                "close Session",
            ]
        );
    }

    #[test]
    fn no_formfeed_by_default() {
        let mut driver = CallLog::default();
        PrintJob::new(0, Vec::new()).run(&mut driver).expect("run");
        assert!(!driver.0.iter().any(|c| c == "formfeed"));
    }
}
