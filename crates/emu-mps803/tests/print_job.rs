//! End-to-end print jobs: bytes in, pages out.

use commodore_mps_803::charset::{BUSINESS_OFFSET, GLYPH_ROWS, ROM_SIZE};
use commodore_mps_803::{Charset, Mps803, PAGE_HEIGHT_DOTS};
use emu_mps803::{PrintJob, petscii, state};
use printer_output::{MemoryOutput, PngOutput};

/// Graphics 'A' is a solid block, business 'A' a single column.
fn charset() -> Charset {
    let mut rom = vec![0; ROM_SIZE];
    for row in 0..GLYPH_ROWS {
        rom[0x41 * GLYPH_ROWS + row] = 0xFC;
        rom[(BUSINESS_OFFSET + 0x41) * GLYPH_ROWS + row] = 0x80;
    }
    Charset::from_bytes(&rom).expect("valid size")
}

fn print(job: &PrintJob) -> MemoryOutput {
    let mut printer = Mps803::new(charset(), MemoryOutput::new());
    job.run(&mut printer).expect("job runs");
    printer.into_output()
}

#[test]
fn short_job_yields_one_partial_page() {
    let out = print(&PrintJob::new(0, petscii::from_ascii("aaa\n")));
    assert_eq!(out.pages().len(), 1);
    assert_eq!(out.params().map(|p| (p.dpi_x, p.dpi_y)), Some((60, 72)));

    let page = &out.pages()[0];
    assert_eq!(page.width(), 480);
    assert_eq!(page.height(), PAGE_HEIGHT_DOTS);
    assert_eq!(page.ink_count(), 3 * 6 * 7);
    assert_eq!(page.pixel(0, 0), 0);
    assert_eq!(page.pixel(18, 0), 1);
}

#[test]
fn business_channel_prints_business_glyphs() {
    let out = print(&PrintJob::new(7, petscii::from_ascii("a\n")));
    assert_eq!(out.pages()[0].ink_count(), 7);
}

#[test]
fn sixty_six_lines_fill_a_page() {
    let full = print(&PrintJob::new(0, petscii::from_ascii(&"a\n".repeat(66))));
    assert_eq!(full.pages().len(), 1);

    let overflow = print(&PrintJob::new(0, petscii::from_ascii(&"a\n".repeat(67))));
    assert_eq!(overflow.pages().len(), 2);
    assert_eq!(overflow.pages()[1].ink_count(), 6 * 7);
}

#[test]
fn formfeed_ejects_before_close() {
    let mut job = PrintJob::new(0, petscii::from_ascii("a\n"));
    job.formfeed = true;
    let out = print(&job);
    // The form feed ejected the page; close had nothing left to flush
    assert_eq!(out.pages().len(), 1);
}

#[test]
fn bit_image_graphics_reach_the_page() {
    // Bit-image mode, repeat a full column 10 times, CR
    let job = PrintJob::new(0, vec![8, 26, 10, 0xFF, 13]);
    let out = print(&job);
    let page = &out.pages()[0];
    assert_eq!(page.ink_count(), 10 * 7);
    assert_eq!(page.pixel(9, 6), 0);
    assert_eq!(page.pixel(10, 0), 1);
}

#[test]
fn state_snapshot_after_job() {
    let mut printer = Mps803::new(charset(), MemoryOutput::new());
    PrintJob::new(7, vec![0x41, 0x41])
        .run(&mut printer)
        .expect("job runs");
    let snapshot = state::state_json(&printer);
    assert_eq!(snapshot["head.position"], 12);
    assert_eq!(snapshot["mode.charset"], "business");
    assert_eq!(snapshot["last_secondary"], 7);
}

#[test]
fn png_pages_on_disk() {
    let dir = std::env::temp_dir().join(format!("emu-mps803-job-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let mut printer = Mps803::new(charset(), PngOutput::new(&dir, "test"));
    PrintJob::new(0, petscii::from_ascii(&"a\n".repeat(70)))
        .run(&mut printer)
        .expect("job runs");

    let written = printer.output().written().to_vec();
    assert_eq!(written.len(), 2);
    assert!(written.iter().all(|p| p.is_file()));
    let _ = std::fs::remove_dir_all(&dir);
}
