//! ASCII to PETSCII for text typed on the command line.
//!
//! PETSCII swaps the cases relative to ASCII: unshifted letters ($41-$5A)
//! print as upper case in graphics mode and lower case in business mode,
//! shifted letters ($C1-$DA) as graphics symbols or upper case.

/// PETSCII carriage return.
pub const CR: u8 = 13;

/// Convert text to the bytes a C64 would send for it.
///
/// Lower-case ASCII becomes unshifted PETSCII, upper-case becomes shifted,
/// `\n` becomes CR. Other printable ASCII passes through unchanged and
/// anything outside ASCII becomes `?`.
#[must_use]
pub fn from_ascii(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            'a'..='z' => c as u8 - 0x20,
            'A'..='Z' => c as u8 + 0x80,
            '\n' => CR,
            c if c.is_ascii() => c as u8,
            _ => b'?',
        })
        .collect()
}
