//! Page assembly from a dot stream.

use emu_core::{NamedColor, OutputSymbol};

/// Palette index of blank paper.
const PAPER: u8 = 1;

/// A completed page of palette indices, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Page {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Palette index at `x`, `y`.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Number of inked dots on the page.
    #[must_use]
    pub fn ink_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != PAPER).count()
    }

    /// Expand to RGBA bytes. Indices outside the palette print as white.
    #[must_use]
    pub fn to_rgba(&self, palette: &[NamedColor]) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() * 4);
        for &index in &self.pixels {
            let argb = palette
                .get(usize::from(index))
                .map_or(0xFFFF_FFFF, |c| c.argb);
            rgba.push(((argb >> 16) & 0xFF) as u8);
            rgba.push(((argb >> 8) & 0xFF) as u8);
            rgba.push((argb & 0xFF) as u8);
            rgba.push(0xFF);
        }
        rgba
    }
}

/// The page currently under the print head.
///
/// Dots fill the current raster row left to right; anything past the page
/// width is dropped. A newline moves to the next row, and once the last row
/// has been passed the page is complete.
pub struct PageRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    column: u32,
    row: u32,
    started: bool,
}

impl PageRaster {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![PAPER; (width * height) as usize],
            column: 0,
            row: 0,
            started: false,
        }
    }

    /// Current raster row.
    #[must_use]
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Whether anything has been printed since the page was started.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Place one symbol. Returns the page if this symbol completed it.
    pub fn put(&mut self, symbol: OutputSymbol) -> Option<Page> {
        self.started = true;
        match symbol.palette_index() {
            Some(index) => {
                if self.column < self.width {
                    self.pixels[(self.row * self.width + self.column) as usize] = index;
                }
                self.column = self.column.saturating_add(1);
                None
            }
            None => {
                self.column = 0;
                self.row += 1;
                if self.row >= self.height {
                    Some(self.finish())
                } else {
                    None
                }
            }
        }
    }

    /// Complete the page early (form feed, end of session). Returns `None`
    /// if nothing was printed on it.
    pub fn eject(&mut self) -> Option<Page> {
        if self.started {
            Some(self.finish())
        } else {
            None
        }
    }

    fn finish(&mut self) -> Page {
        let pixels = std::mem::replace(
            &mut self.pixels,
            vec![PAPER; (self.width * self.height) as usize],
        );
        self.column = 0;
        self.row = 0;
        self.started = false;
        Page {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}
