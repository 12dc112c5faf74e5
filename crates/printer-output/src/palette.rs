//! Printer palettes and the VICE `.vpl` palette file format.
//!
//! A `.vpl` file lists one colour per line as four hex fields:
//! red, green, blue and a dither value (ignored here). Lines starting with
//! `#` and blank lines are comments.
//!
//! ```text
//! # Black
//! 00 00 00 0
//! # White
//! FF FF FF F
//! ```

use std::path::Path;

use emu_core::{NamedColor, PrinterError};

/// An ordered set of named colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<NamedColor>,
}

impl Palette {
    /// Parse `.vpl` text. `names` gives both the expected entry count and
    /// the name attached to each entry.
    pub fn parse_vpl(text: &str, names: &[&str]) -> Result<Self, PrinterError> {
        let mut colors = Vec::with_capacity(names.len());

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 4 {
                return Err(PrinterError::InvalidPalette(format!(
                    "line {}: expected 4 fields, found {}",
                    line_no + 1,
                    fields.len()
                )));
            }

            let mut rgb = [0u8; 3];
            for (channel, field) in rgb.iter_mut().zip(&fields[..3]) {
                *channel = u8::from_str_radix(field, 16).map_err(|e| {
                    PrinterError::InvalidPalette(format!("line {}: {field}: {e}", line_no + 1))
                })?;
            }
            u8::from_str_radix(fields[3], 16)
                .ok()
                .filter(|&d| d <= 0x0F)
                .ok_or_else(|| {
                    PrinterError::InvalidPalette(format!(
                        "line {}: bad dither value {}",
                        line_no + 1,
                        fields[3]
                    ))
                })?;

            let Some(name) = names.get(colors.len()) else {
                return Err(PrinterError::InvalidPalette(format!(
                    "more than {} entries",
                    names.len()
                )));
            };
            colors.push(NamedColor {
                name: (*name).to_string(),
                argb: 0xFF00_0000
                    | (u32::from(rgb[0]) << 16)
                    | (u32::from(rgb[1]) << 8)
                    | u32::from(rgb[2]),
            });
        }

        if colors.len() != names.len() {
            return Err(PrinterError::InvalidPalette(format!(
                "expected {} entries, found {}",
                names.len(),
                colors.len()
            )));
        }
        Ok(Self { colors })
    }

    /// Load and parse a `.vpl` file.
    pub fn load_vpl(path: &Path, names: &[&str]) -> Result<Self, PrinterError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_vpl(&text, names)
    }

    #[must_use]
    pub fn colors(&self) -> &[NamedColor] {
        &self.colors
    }

    #[must_use]
    pub fn into_colors(self) -> Vec<NamedColor> {
        self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 2] = ["Black", "White"];

    #[test]
    fn parses_vice_palette() {
        let text = "#\n# VICE Palette file\n#\n\n# Black\n00 00 00 0\n# White\nff ff ff f\n";
        let palette = Palette::parse_vpl(text, &NAMES).expect("valid palette");
        assert_eq!(palette.colors()[0].name, "Black");
        assert_eq!(palette.colors()[0].argb, 0xFF00_0000);
        assert_eq!(palette.colors()[1].argb, 0xFFFF_FFFF);
    }

    #[test]
    fn tinted_paper() {
        let text = "20 10 08 0\nF0 E8 C0 3\n";
        let palette = Palette::parse_vpl(text, &NAMES).expect("valid palette");
        assert_eq!(palette.into_colors()[1].argb, 0xFFF0_E8C0);
    }

    #[test]
    fn rejects_wrong_entry_count() {
        let err = Palette::parse_vpl("00 00 00 0\n", &NAMES).expect_err("too few");
        assert!(err.to_string().contains("expected 2 entries, found 1"));

        let three = "00 00 00 0\n11 11 11 1\n22 22 22 2\n";
        assert!(Palette::parse_vpl(three, &NAMES).is_err());
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(Palette::parse_vpl("00 00 0\nff ff ff f\n", &NAMES).is_err());
        assert!(Palette::parse_vpl("zz 00 00 0\nff ff ff f\n", &NAMES).is_err());
        assert!(Palette::parse_vpl("00 00 00 10\nff ff ff f\n", &NAMES).is_err());
    }
}
