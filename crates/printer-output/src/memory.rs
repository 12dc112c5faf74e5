//! In-memory output device.

use emu_core::{OutputParams, OutputSymbol, PrinterError, PrinterOutput};

use crate::{Page, PageRaster};

/// Keeps every completed page in memory.
#[derive(Default)]
pub struct MemoryOutput {
    raster: Option<PageRaster>,
    params: Option<OutputParams>,
    pages: Vec<Page>,
}

impl MemoryOutput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages completed so far.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Parameters of the most recent session.
    #[must_use]
    pub fn params(&self) -> Option<&OutputParams> {
        self.params.as_ref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.raster.is_some()
    }
}

impl PrinterOutput for MemoryOutput {
    fn open(&mut self, params: &OutputParams) -> Result<(), PrinterError> {
        self.raster = Some(PageRaster::new(params.max_col, params.max_row));
        self.params = Some(params.clone());
        Ok(())
    }

    fn close(&mut self) -> Result<(), PrinterError> {
        if let Some(page) = self.raster.take().and_then(|mut r| r.eject()) {
            self.pages.push(page);
        }
        Ok(())
    }

    fn putc(&mut self, symbol: OutputSymbol) -> Result<(), PrinterError> {
        let raster = self.raster.as_mut().ok_or(PrinterError::NotOpen)?;
        if let Some(page) = raster.put(symbol) {
            self.pages.push(page);
        }
        Ok(())
    }

    fn getc(&mut self) -> Result<u8, PrinterError> {
        Ok(0)
    }

    fn flush(&mut self) -> Result<(), PrinterError> {
        Ok(())
    }

    fn formfeed(&mut self) -> Result<(), PrinterError> {
        let raster = self.raster.as_mut().ok_or(PrinterError::NotOpen)?;
        if let Some(page) = raster.eject() {
            self.pages.push(page);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(max_col: u32, max_row: u32) -> OutputParams {
        OutputParams {
            max_col,
            max_row,
            dpi_x: 60,
            dpi_y: 72,
            palette: Vec::new(),
        }
    }

    #[test]
    fn putc_before_open_fails() {
        let mut out = MemoryOutput::new();
        assert!(matches!(
            out.putc(OutputSymbol::Black),
            Err(PrinterError::NotOpen)
        ));
    }

    #[test]
    fn full_pages_are_collected() {
        let mut out = MemoryOutput::new();
        out.open(&params(2, 2)).expect("open");
        for _ in 0..5 {
            out.putc(OutputSymbol::Newline).expect("putc");
        }
        assert_eq!(out.pages().len(), 2);
        out.close().expect("close");
        assert_eq!(out.pages().len(), 3);
        assert!(!out.is_open());
    }

    #[test]
    fn formfeed_ejects_started_page_only() {
        let mut out = MemoryOutput::new();
        out.open(&params(4, 4)).expect("open");
        out.formfeed().expect("formfeed");
        assert!(out.pages().is_empty());
        out.putc(OutputSymbol::Black).expect("putc");
        out.formfeed().expect("formfeed");
        assert_eq!(out.pages().len(), 1);
        assert_eq!(out.pages()[0].ink_count(), 1);
        out.close().expect("close");
        assert_eq!(out.pages().len(), 1);
    }
}
