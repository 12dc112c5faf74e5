//! Output device interface.

use crate::PrinterError;

/// One symbol in the dot stream a driver sends to its output device.
///
/// Drivers emit raster rows left to right: one `Black` or `White` per dot
/// column, then a `Newline`. Blank raster rows (line spacing) are bare
/// newlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSymbol {
    /// Ink.
    Black,
    /// Paper.
    White,
    /// End of the current raster row.
    Newline,
}

impl OutputSymbol {
    /// Palette index for a dot symbol (0 = ink, 1 = paper).
    ///
    /// Returns `None` for `Newline`.
    #[must_use]
    pub fn palette_index(self) -> Option<u8> {
        match self {
            OutputSymbol::Black => Some(0),
            OutputSymbol::White => Some(1),
            OutputSymbol::Newline => None,
        }
    }
}

/// A palette entry: display name and ARGB32 colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedColor {
    pub name: String,
    pub argb: u32,
}

/// Geometry and colours a driver requests when it opens its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputParams {
    /// Dots per raster row.
    pub max_col: u32,
    /// Raster rows per page.
    pub max_row: u32,
    /// Horizontal resolution in dots per inch.
    pub dpi_x: u32,
    /// Vertical resolution in dots per inch.
    pub dpi_y: u32,
    /// Colours indexed by `OutputSymbol::palette_index`.
    pub palette: Vec<NamedColor>,
}

/// A device that receives a driver's dot stream.
pub trait PrinterOutput {
    /// Prepare for a new print session.
    fn open(&mut self, params: &OutputParams) -> Result<(), PrinterError>;

    /// End the session, writing out a partly printed page.
    fn close(&mut self) -> Result<(), PrinterError>;

    /// Accept the next symbol of the dot stream.
    fn putc(&mut self, symbol: OutputSymbol) -> Result<(), PrinterError>;

    /// Status byte reported back to the computer (0 = ready).
    fn getc(&mut self) -> Result<u8, PrinterError>;

    /// Push buffered data to the backing store.
    fn flush(&mut self) -> Result<(), PrinterError>;

    /// Eject the current page.
    fn formfeed(&mut self) -> Result<(), PrinterError>;
}
