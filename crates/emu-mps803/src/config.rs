//! Printer configuration: ROM and palette locations, output naming.

use std::error::Error;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File name of the character generator ROM in the `roms/` directory.
pub const CHARSET_ROM_NAME: &str = "mps803";
/// File name of the palette in the `roms/` directory, if present.
pub const PALETTE_NAME: &str = "mps803.vpl";

/// Configuration for a headless print job.
///
/// Every field is optional in the JSON file; missing fields take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrinterConfig {
    /// Character ROM (3,584 bytes). Defaults to `roms/mps803`.
    pub charset: Option<PathBuf>,
    /// VICE `.vpl` palette with Black and White entries.
    pub palette: Option<PathBuf>,
    /// Directory receiving the PNG pages.
    pub output_dir: PathBuf,
    /// Page file name prefix.
    pub prefix: String,
    /// Secondary address the job is sent on (0 = graphics, 7 = business).
    pub secondary_address: u8,
    /// Eject the last page with a form feed when the job ends.
    pub formfeed: bool,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            charset: None,
            palette: None,
            output_dir: PathBuf::from("."),
            prefix: "mps803".to_string(),
            secondary_address: 0,
            formfeed: false,
        }
    }
}

impl PrinterConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&text)?)
    }

    /// The charset ROM path, falling back to the `roms/` directory.
    #[must_use]
    pub fn charset_path(&self) -> PathBuf {
        self.charset
            .clone()
            .unwrap_or_else(|| find_roms_dir().join(CHARSET_ROM_NAME))
    }

    /// The palette path, falling back to `roms/mps803.vpl` when it exists.
    #[must_use]
    pub fn palette_path(&self) -> Option<PathBuf> {
        self.palette.clone().or_else(|| {
            let default = find_roms_dir().join(PALETTE_NAME);
            default.is_file().then_some(default)
        })
    }
}

/// Find the roms/ directory relative to the executable or current directory.
#[must_use]
pub fn find_roms_dir() -> PathBuf {
    // Walk up from target/debug or target/release to the workspace root
    if let Ok(exe) = std::env::current_exe() {
        let mut dir = exe.parent().map(Path::to_path_buf);
        for _ in 0..5 {
            if let Some(ref d) = dir {
                let roms = d.join("roms");
                if roms.is_dir() {
                    return roms;
                }
                dir = d.parent().map(Path::to_path_buf);
            }
        }
    }
    PathBuf::from("roms")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = PrinterConfig::from_json("{}").expect("valid json");
        assert_eq!(config, PrinterConfig::default());
        assert_eq!(config.prefix, "mps803");
        assert_eq!(config.secondary_address, 0);
    }

    #[test]
    fn fields_override_defaults() {
        let config = PrinterConfig::from_json(
            r#"{ "charset": "/tmp/cg.bin", "secondary_address": 7, "formfeed": true, "prefix": "listing" }"#,
        )
        .expect("valid json");
        assert_eq!(config.charset_path(), PathBuf::from("/tmp/cg.bin"));
        assert_eq!(config.secondary_address, 7);
        assert!(config.formfeed);
        assert_eq!(config.prefix, "listing");
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(PrinterConfig::from_json(r#"{ "colour": "red" }"#).is_err());
    }

    #[test]
    fn explicit_palette_wins() {
        let config = PrinterConfig {
            palette: Some(PathBuf::from("ink.vpl")),
            ..PrinterConfig::default()
        };
        assert_eq!(config.palette_path(), Some(PathBuf::from("ink.vpl")));
    }
}
