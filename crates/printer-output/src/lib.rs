//! Output devices for emulated printers.
//!
//! A driver emits a stream of dots and newlines. [`PageRaster`] lays that
//! stream out on a fixed-size page; the output devices decide what happens
//! to a page once it is complete: [`MemoryOutput`] keeps it, [`PngOutput`]
//! writes it to disk.

mod memory;
pub mod page;
pub mod palette;
mod png_output;

pub use memory::MemoryOutput;
pub use page::{Page, PageRaster};
pub use palette::Palette;
pub use png_output::{PngOutput, write_png};
