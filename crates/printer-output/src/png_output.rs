//! PNG page output.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use emu_core::{NamedColor, OutputParams, OutputSymbol, PrinterError, PrinterOutput};
use log::info;

use crate::{Page, PageRaster};

/// Writes every completed page to `<dir>/<prefix>-<NNN>.png`.
///
/// Page numbers keep counting across sessions, so reopening the printer
/// never overwrites earlier output.
pub struct PngOutput {
    dir: PathBuf,
    prefix: String,
    session: Option<(PageRaster, OutputParams)>,
    written: Vec<PathBuf>,
}

impl PngOutput {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            session: None,
            written: Vec::new(),
        }
    }

    /// Files written so far, oldest first.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn next_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}-{:03}.png", self.prefix, self.written.len() + 1))
    }

    fn save(&mut self, page: &Page, params: &OutputParams) -> Result<(), PrinterError> {
        let path = self.next_path();
        write_png(page, params.dpi_x, params.dpi_y, &params.palette, &path)?;
        info!("Page {} written to {}", self.written.len() + 1, path.display());
        self.written.push(path);
        Ok(())
    }
}

impl PrinterOutput for PngOutput {
    fn open(&mut self, params: &OutputParams) -> Result<(), PrinterError> {
        fs::create_dir_all(&self.dir)?;
        self.session = Some((
            PageRaster::new(params.max_col, params.max_row),
            params.clone(),
        ));
        Ok(())
    }

    fn close(&mut self) -> Result<(), PrinterError> {
        if let Some((mut raster, params)) = self.session.take() {
            if let Some(page) = raster.eject() {
                self.save(&page, &params)?;
            }
        }
        Ok(())
    }

    fn putc(&mut self, symbol: OutputSymbol) -> Result<(), PrinterError> {
        let (raster, params) = self.session.as_mut().ok_or(PrinterError::NotOpen)?;
        if let Some(page) = raster.put(symbol) {
            let params = params.clone();
            self.save(&page, &params)?;
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
        let (raster, params) = self.session.as_mut().ok_or(PrinterError::NotOpen)?;
        if let Some(page) = raster.eject() {
            let params = params.clone();
            self.save(&page, &params)?;
        }
        Ok(())
    }
}

/// Encode a page as an 8-bit RGBA PNG with its physical resolution.
pub fn write_png(
    page: &Page,
    dpi_x: u32,
    dpi_y: u32,
    palette: &[NamedColor],
    path: &Path,
) -> Result<(), PrinterError> {
    let file = fs::File::create(path)?;
    let w = BufWriter::new(file);
    let mut encoder = png::Encoder::new(w, page.width(), page.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: dots_per_meter(dpi_x),
        yppu: dots_per_meter(dpi_y),
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder
        .write_header()
        .map_err(|e| PrinterError::Encoding(e.to_string()))?;
    writer
        .write_image_data(&page.to_rgba(palette))
        .map_err(|e| PrinterError::Encoding(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| PrinterError::Encoding(e.to_string()))
}

fn dots_per_meter(dpi: u32) -> u32 {
    (dpi * 10_000 + 127) / 254
}
