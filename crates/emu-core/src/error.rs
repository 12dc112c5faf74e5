//! Errors shared by printer drivers and output devices.

use thiserror::Error;

/// Everything that can go wrong between the serial bus and the page.
#[derive(Debug, Error)]
pub enum PrinterError {
    /// A byte or page was sent to an output device that was never opened.
    #[error("output device is not open")]
    NotOpen,

    /// A ROM image has the wrong size.
    #[error("{name} ROM is {len} bytes, expected {expected}")]
    InvalidRom {
        name: &'static str,
        len: usize,
        expected: usize,
    },

    /// A palette file could not be parsed.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A completed page could not be encoded as an image.
    #[error("image encoding failed: {0}")]
    Encoding(String),

    /// Reading ROMs or writing pages failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_rom_message_names_sizes() {
        let err = PrinterError::InvalidRom {
            name: "MPS-803 charset",
            len: 12,
            expected: 3584,
        };
        assert_eq!(
            err.to_string(),
            "MPS-803 charset ROM is 12 bytes, expected 3584"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PrinterError = io.into();
        assert!(matches!(err, PrinterError::Io(_)));
        assert_eq!(err.to_string(), "missing");
    }
}
