//! Commodore MPS-803 dot-matrix printer.
//!
//! The MPS-803 has a 7-dot print head and prints 480 dots per line. Bytes
//! are collected into a one-line head buffer which is emitted as seven
//! raster rows when the line ends. Character lines are spaced at 6 per
//! inch, bit-image lines at 9 per inch, so character lines get three extra
//! blank raster rows.
//!
//! Opening the printer with secondary address 0 selects the graphics
//! charset, secondary address 7 the business charset.
//!
//! # Control codes
//!
//! | Code | Effect                                                  |
//! |------|---------------------------------------------------------|
//! | 8    | Bit-image mode (bytes with bit 7 set are dot columns)   |
//! | 10   | Line feed: print the buffer                             |
//! | 13   | Carriage return: print, cancel reverse and quote mode   |
//! | 14   | Double width on, leave bit-image mode                   |
//! | 15   | Double width off, leave bit-image mode                  |
//! | 16   | Tab: two decimal digits give the character column       |
//! | 17   | Business charset until CR or 145                        |
//! | 18   | Reverse on                                              |
//! | 26   | Repeat: next byte is a count for the next bit-image byte |
//! | 27   | Escape: `27 16 hi lo` sets the head to a dot address    |
//! | 34   | Quote: control codes print as reversed glyphs           |
//! | 145  | Graphics charset until CR or 17                         |
//! | 146  | Reverse off                                             |

pub mod charset;

use emu_core::{
    Channel, NamedColor, Observable, OutputParams, OutputSymbol, PrinterDriver, PrinterError,
    PrinterOutput, Value,
};
use log::{debug, error, trace, warn};

pub use charset::Charset;
use charset::{BUSINESS_OFFSET, GLYPH_COLUMNS, GLYPH_ROWS};

/// Dots per printed line.
pub const PAGE_WIDTH_DOTS: usize = 480;
/// Character lines per page.
pub const PAGE_HEIGHT_CHARACTERS: u32 = 66;
/// Raster rows per page.
pub const PAGE_HEIGHT_DOTS: u32 = PAGE_HEIGHT_CHARACTERS * 10;
/// Horizontal resolution.
pub const DPI_X: u32 = 60;
/// Vertical resolution (differs from horizontal on the real printer).
pub const DPI_Y: u32 = 72;

/// Blank raster rows after a character line: 63 rows/inch at bit-image
/// spacing minus 42 at character spacing, spread over 9 lines.
const CHARACTER_LINE_GAP: usize = 3;

/// Secondary address that selects the business charset.
pub const SA_BUSINESS: u8 = 7;
/// Secondary address that selects the graphics charset.
pub const SA_GRAPHICS: u8 = 0;

/// MPS-803 printer driver.
pub struct Mps803<O> {
    charset: Charset,
    output: O,
    palette: Vec<NamedColor>,

    /// Head buffer: one column of 7 dots per horizontal dot position.
    line: [[bool; GLYPH_ROWS]; PAGE_WIDTH_DOTS],
    /// Current head position in dots. May run past the right margin.
    position: usize,
    /// Mode flags (`MODE_*`).
    mode: u8,
    /// Count for the next bit-image byte (0 = once).
    repeat_count: u8,
    /// Tab operand bytes still expected (0-2).
    tab_pending: u8,
    /// Tab operand bytes received so far.
    tab_operand: [u8; 2],
    /// Next byte starts a logical line.
    begin_line: bool,
    /// Secondary address of the previous byte.
    last_secondary: Option<u8>,
}

impl<O: PrinterOutput> Mps803<O> {
    /// Create a printer with the given character ROM, printing to `output`.
    #[must_use]
    pub fn new(charset: Charset, output: O) -> Self {
        Self {
            charset,
            output,
            palette: default_palette(),
            line: [[false; GLYPH_ROWS]; PAGE_WIDTH_DOTS],
            position: 0,
            mode: 0,
            repeat_count: 0,
            tab_pending: 0,
            tab_operand: [0; 2],
            begin_line: true,
            last_secondary: None,
        }
    }

    /// Replace the ink/paper colours passed to the output on session open.
    pub fn set_palette(&mut self, palette: Vec<NamedColor>) {
        self.palette = palette;
    }

    /// Clear the head buffer and all mode state.
    pub fn reset(&mut self) {
        self.clear_line();
        self.position = 0;
        self.mode = 0;
        self.repeat_count = 0;
        self.tab_pending = 0;
        self.tab_operand = [0; 2];
        self.begin_line = true;
        self.last_secondary = None;
    }

    #[must_use]
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Consume the printer and return its output device.
    pub fn into_output(self) -> O {
        self.output
    }

    /// Current head position in dots.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the business charset is selected.
    #[must_use]
    pub fn business_mode(&self) -> bool {
        self.mode & MODE_CURSOR_UP == 0
    }

    /// Geometry requested from the output device.
    #[must_use]
    pub fn output_params(&self) -> OutputParams {
        OutputParams {
            max_col: PAGE_WIDTH_DOTS as u32,
            max_row: PAGE_HEIGHT_DOTS,
            dpi_x: DPI_X,
            dpi_y: DPI_Y,
            palette: self.palette.clone(),
        }
    }

    fn set_mode(&mut self, flags: u8) {
        self.mode |= flags;
    }

    fn clear_mode(&mut self, flags: u8) {
        self.mode &= !flags;
    }

    fn has_mode(&self, flags: u8) -> bool {
        self.mode & flags != 0
    }

    fn select_charset_for(&mut self, secondary: u8) {
        if secondary == SA_BUSINESS {
            self.clear_mode(MODE_CURSOR_UP);
        } else {
            self.set_mode(MODE_CURSOR_UP);
        }
    }

    /// Run one byte through the printer's state machine.
    fn print_byte(&mut self, secondary: u8, byte: u8) -> Result<(), PrinterError> {
        if self.tab_pending > 0 {
            self.tab_operand[2 - self.tab_pending as usize] = byte;
            if self.tab_pending == 1 {
                self.position = if self.has_mode(MODE_ESCAPE) {
                    (usize::from(self.tab_operand[0]) << 8) | usize::from(self.tab_operand[1])
                } else {
                    parse_tab_column(&self.tab_operand) * GLYPH_COLUMNS
                };
                self.clear_mode(MODE_ESCAPE);
            }
            self.tab_pending -= 1;
            return Ok(());
        }

        if self.has_mode(MODE_ESCAPE) && byte != 16 {
            self.clear_mode(MODE_ESCAPE);
        }

        if self.has_mode(MODE_REPEAT) {
            self.repeat_count = byte;
            self.clear_mode(MODE_REPEAT);
            return Ok(());
        }

        if self.has_mode(MODE_BIT_IMAGE) && byte & 0x80 != 0 {
            return self.print_bit_image(byte);
        }

        // The charset implied by the secondary address is reapplied at the
        // start of each logical line and whenever the channel changes.
        if self.begin_line || self.last_secondary != Some(secondary) {
            self.select_charset_for(secondary);
        }
        self.begin_line = false;
        self.last_secondary = Some(secondary);

        // CR is honoured even in quote mode
        if byte == 13 {
            self.clear_mode(MODE_QUOTED | MODE_REVERSE);
            self.feed_line()?;
            self.begin_line = true;
            return Ok(());
        }

        if !self.has_mode(MODE_QUOTED) || self.has_mode(MODE_BIT_IMAGE) {
            match byte {
                8 => {
                    self.set_mode(MODE_BIT_IMAGE);
                    return Ok(());
                }
                10 => return self.feed_line(),
                14 => {
                    self.set_mode(MODE_DOUBLE_WIDTH);
                    self.clear_mode(MODE_BIT_IMAGE);
                    return Ok(());
                }
                15 => {
                    self.clear_mode(MODE_DOUBLE_WIDTH | MODE_BIT_IMAGE);
                    return Ok(());
                }
                16 => {
                    self.tab_pending = 2;
                    return Ok(());
                }
                17 => {
                    self.clear_mode(MODE_CURSOR_UP);
                    return Ok(());
                }
                145 => {
                    self.set_mode(MODE_CURSOR_UP);
                    return Ok(());
                }
                18 => {
                    self.set_mode(MODE_REVERSE);
                    return Ok(());
                }
                146 => {
                    self.clear_mode(MODE_REVERSE);
                    return Ok(());
                }
                26 => {
                    self.set_mode(MODE_REPEAT);
                    self.repeat_count = 1;
                    return Ok(());
                }
                27 => {
                    self.set_mode(MODE_ESCAPE);
                    return Ok(());
                }
                _ => {}
            }
        }

        if self.has_mode(MODE_BIT_IMAGE) {
            return Ok(());
        }

        if byte == 34 {
            self.mode ^= MODE_QUOTED;
        }

        if self.position >= PAGE_WIDTH_DOTS {
            self.feed_line()?;
        }

        if self.has_mode(MODE_QUOTED) {
            let visible = match byte {
                0x00..=0x1F => Some(byte + 0x40),
                0x80..=0x9F => Some(byte - 0x20),
                _ => None,
            };
            if let Some(glyph) = visible {
                self.set_mode(MODE_REVERSE);
                self.print_glyph(glyph);
                self.clear_mode(MODE_REVERSE);
                return Ok(());
            }
        }

        self.print_glyph(byte);
        Ok(())
    }

    /// Render one character into the head buffer and advance the head.
    fn print_glyph(&mut self, byte: u8) {
        let glyph = if self.has_mode(MODE_CURSOR_UP) {
            usize::from(byte)
        } else {
            usize::from(byte) + BUSINESS_OFFSET
        };
        let reverse = self.has_mode(MODE_REVERSE);
        let scale = if self.has_mode(MODE_DOUBLE_WIDTH) { 2 } else { 1 };

        let mut clipped = false;
        for row in 0..GLYPH_ROWS {
            for column in 0..GLYPH_COLUMNS {
                let dot = self.charset.dot(glyph, column, row) != reverse;
                for copy in 0..scale {
                    let x = self.position + column * scale + copy;
                    match self.line.get_mut(x) {
                        Some(head) => head[row] = dot,
                        None => clipped = true,
                    }
                }
            }
        }
        if clipped {
            error!("Printing beyond limit of {PAGE_WIDTH_DOTS} dots.");
        }

        self.position += GLYPH_COLUMNS * scale;
    }

    /// Print a bit-image column (bit 0 = top dot), repeated if requested.
    fn print_bit_image(&mut self, byte: u8) -> Result<(), PrinterError> {
        let count = self.repeat_count.max(1);
        for _ in 0..count {
            if self.position >= PAGE_WIDTH_DOTS {
                self.feed_line()?;
            }
            let column = &mut self.line[self.position];
            for (row, dot) in column.iter_mut().enumerate() {
                *dot = byte & (1 << row) != 0;
            }
            self.position += 1;
        }
        self.repeat_count = 0;
        Ok(())
    }

    /// Emit the head buffer, clear it and return the head to column 0.
    fn feed_line(&mut self) -> Result<(), PrinterError> {
        for row in 0..GLYPH_ROWS {
            for column in &self.line {
                let symbol = if column[row] {
                    OutputSymbol::Black
                } else {
                    OutputSymbol::White
                };
                self.output.putc(symbol)?;
            }
            self.output.putc(OutputSymbol::Newline)?;
        }

        if !self.has_mode(MODE_BIT_IMAGE) {
            for _ in 0..CHARACTER_LINE_GAP {
                self.output.putc(OutputSymbol::Newline)?;
            }
        }

        self.position = 0;
        self.clear_line();
        Ok(())
    }

    fn clear_line(&mut self) {
        for column in &mut self.line {
            *column = [false; GLYPH_ROWS];
        }
    }
}

impl<O: PrinterOutput> PrinterDriver for Mps803<O> {
    fn name(&self) -> &'static str {
        "mps803"
    }

    fn open(&mut self, channel: Channel) -> Result<(), PrinterError> {
        debug!("open {channel:?}");
        match channel {
            Channel::Session => {
                let params = self.output_params();
                self.output.open(&params)
            }
            Channel::Secondary(SA_GRAPHICS) => {
                self.set_mode(MODE_CURSOR_UP);
                Ok(())
            }
            Channel::Secondary(SA_BUSINESS) => {
                self.clear_mode(MODE_CURSOR_UP);
                Ok(())
            }
            Channel::Secondary(sa) => {
                warn!("Secondary address {sa} has no defined meaning on the MPS-803; ignored.");
                Ok(())
            }
        }
    }

    fn close(&mut self, channel: Channel) -> Result<(), PrinterError> {
        debug!("close {channel:?}");
        match channel {
            Channel::Session => self.output.close(),
            Channel::Secondary(_) => Ok(()),
        }
    }

    fn putc(&mut self, secondary: u8, byte: u8) -> Result<(), PrinterError> {
        trace!("putc({secondary}:${byte:02x})");
        self.print_byte(secondary, byte)
    }

    fn getc(&mut self, secondary: u8) -> Result<u8, PrinterError> {
        trace!("getc({secondary})");
        self.output.getc()
    }

    fn flush(&mut self, secondary: u8) -> Result<(), PrinterError> {
        trace!("flush({secondary})");
        self.output.flush()
    }

    fn formfeed(&mut self) -> Result<(), PrinterError> {
        trace!("formfeed");
        self.output.formfeed()
    }
}

impl<O> Observable for Mps803<O> {
    fn query(&self, path: &str) -> Option<Value> {
        let flag = |bit: u8| Some(Value::Bool(self.mode & bit != 0));
        match path {
            "head.position" => Some(u16::try_from(self.position).unwrap_or(u16::MAX).into()),
            "head.begin_line" => Some(self.begin_line.into()),
            "mode.charset" => Some(if self.mode & MODE_CURSOR_UP != 0 {
                "graphics".into()
            } else {
                "business".into()
            }),
            "mode.reverse" => flag(MODE_REVERSE),
            "mode.bit_image" => flag(MODE_BIT_IMAGE),
            "mode.double_width" => flag(MODE_DOUBLE_WIDTH),
            "mode.repeat" => flag(MODE_REPEAT),
            "mode.escape" => flag(MODE_ESCAPE),
            "mode.quoted" => flag(MODE_QUOTED),
            "repeat_count" => Some(self.repeat_count.into()),
            "tab_pending" => Some(self.tab_pending.into()),
            "last_secondary" => Some(self.last_secondary.into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "head.position",
            "head.begin_line",
            "mode.charset",
            "mode.reverse",
            "mode.bit_image",
            "mode.double_width",
            "mode.repeat",
            "mode.escape",
            "mode.quoted",
            "repeat_count",
            "tab_pending",
            "last_secondary",
        ]
    }
}

/// Black ink on white paper.
#[must_use]
pub fn default_palette() -> Vec<NamedColor> {
    vec![
        NamedColor {
            name: "Black".to_string(),
            argb: 0xFF00_0000,
        },
        NamedColor {
            name: "White".to_string(),
            argb: 0xFFFF_FFFF,
        },
    ]
}

/// Decode a two-digit tab operand the way the printer firmware does:
/// leading blanks, an optional sign, then decimal digits up to the first
/// non-digit. Negative columns clamp to 0.
fn parse_tab_column(operand: &[u8]) -> usize {
    let mut bytes = operand
        .iter()
        .copied()
        .skip_while(u8::is_ascii_whitespace)
        .peekable();
    let negative = match bytes.peek() {
        Some(b'-') => {
            bytes.next();
            true
        }
        Some(b'+') => {
            bytes.next();
            false
        }
        _ => false,
    };
    let value = bytes
        .take_while(u8::is_ascii_digit)
        .fold(0, |acc, digit| acc * 10 + usize::from(digit - b'0'));
    if negative { 0 } else { value }
}

// Mode flags
const MODE_REVERSE: u8 = 0x01;
/// Set = graphics charset, clear = business charset.
const MODE_CURSOR_UP: u8 = 0x02;
const MODE_BIT_IMAGE: u8 = 0x04;
const MODE_DOUBLE_WIDTH: u8 = 0x08;
const MODE_REPEAT: u8 = 0x10;
const MODE_ESCAPE: u8 = 0x20;
/// Odd number of quotes seen on this line.
const MODE_QUOTED: u8 = 0x40;
