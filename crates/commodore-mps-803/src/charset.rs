//! MPS-803 character generator ROM.
//!
//! The ROM holds 512 glyphs of 7 bytes each, one byte per dot row. The
//! graphics (upper case / graphics) set comes first, the business
//! (lower / upper case) set second. Bit 7 of a row byte is the leftmost
//! dot; only the six leftmost bits are printed.

use emu_core::PrinterError;

/// Glyphs in the ROM.
pub const GLYPH_COUNT: usize = 512;
/// Dot rows per glyph (the height of the print head).
pub const GLYPH_ROWS: usize = 7;
/// Dot columns printed per glyph.
pub const GLYPH_COLUMNS: usize = 6;
/// ROM image size in bytes.
pub const ROM_SIZE: usize = GLYPH_COUNT * GLYPH_ROWS;
/// Index of the first business-mode glyph.
pub const BUSINESS_OFFSET: usize = 256;

/// The printer's character generator.
#[derive(Clone)]
pub struct Charset {
    rom: Vec<u8>,
}

impl Charset {
    /// Wrap a ROM image. It must be exactly `ROM_SIZE` bytes.
    pub fn from_bytes(rom: &[u8]) -> Result<Self, PrinterError> {
        if rom.len() != ROM_SIZE {
            return Err(PrinterError::InvalidRom {
                name: "MPS-803 charset",
                len: rom.len(),
                expected: ROM_SIZE,
            });
        }
        Ok(Self { rom: rom.to_vec() })
    }

    /// Load a ROM image from disk.
    pub fn load(path: &std::path::Path) -> Result<Self, PrinterError> {
        let rom = std::fs::read(path)?;
        Self::from_bytes(&rom)
    }

    /// Whether the dot at `column`, `row` of `glyph` is inked.
    #[must_use]
    pub fn dot(&self, glyph: usize, column: usize, row: usize) -> bool {
        debug_assert!(glyph < GLYPH_COUNT && column < 8 && row < GLYPH_ROWS);
        self.rom[glyph * GLYPH_ROWS + row] & (0x80 >> column) != 0
    }

    /// The seven row bytes of a glyph.
    #[must_use]
    pub fn glyph(&self, glyph: usize) -> &[u8] {
        let start = glyph * GLYPH_ROWS;
        &self.rom[start..start + GLYPH_ROWS]
    }

    /// Render a glyph as seven lines of `*` and `.` (7 columns wide).
    #[must_use]
    pub fn render_glyph(&self, glyph: usize) -> String {
        let mut out = String::with_capacity(GLYPH_ROWS * 8);
        for row in 0..GLYPH_ROWS {
            for column in 0..7 {
                out.push(if self.dot(glyph, column, row) { '*' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_size() {
        let result = Charset::from_bytes(&[0; 4096]);
        assert!(matches!(
            result,
            Err(PrinterError::InvalidRom {
                len: 4096,
                expected: 3584,
                ..
            })
        ));
    }

    #[test]
    fn dot_reads_msb_first() {
        let mut rom = vec![0; ROM_SIZE];
        rom[0x41 * GLYPH_ROWS + 2] = 0b1000_0100;
        let cs = Charset::from_bytes(&rom).expect("valid size");
        assert!(cs.dot(0x41, 0, 2));
        assert!(!cs.dot(0x41, 1, 2));
        assert!(cs.dot(0x41, 5, 2));
        assert!(!cs.dot(0x41, 5, 3));
    }

    #[test]
    fn business_set_follows_graphics_set() {
        let mut rom = vec![0; ROM_SIZE];
        rom[(BUSINESS_OFFSET + 1) * GLYPH_ROWS] = 0xFF;
        let cs = Charset::from_bytes(&rom).expect("valid size");
        assert_eq!(cs.glyph(BUSINESS_OFFSET + 1)[0], 0xFF);
        assert_eq!(cs.glyph(1)[0], 0x00);
    }

    #[test]
    fn render_glyph_draws_rows() {
        let mut rom = vec![0; ROM_SIZE];
        rom[3 * GLYPH_ROWS] = 0xFC;
        let cs = Charset::from_bytes(&rom).expect("valid size");
        let art = cs.render_glyph(3);
        let lines: Vec<&str> = art.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "******.");
        assert_eq!(lines[1], ".......");
    }
}
