//! MPS-803 printer binary.
//!
//! Sends a file or a line of text to the emulated printer and writes the
//! printed pages as PNG images.

use std::path::PathBuf;
use std::process;

use commodore_mps_803::{Charset, Mps803, default_palette};
use emu_mps803::{PrintJob, PrinterConfig, petscii, state};
use log::{info, warn};
use printer_output::{Palette, PngOutput};

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

struct CliArgs {
    input: Option<PathBuf>,
    text: Option<String>,
    secondary: Option<u8>,
    config: Option<PathBuf>,
    charset: Option<PathBuf>,
    palette: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    prefix: Option<String>,
    formfeed: bool,
    dump_charset: bool,
    state: bool,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        input: None,
        text: None,
        secondary: None,
        config: None,
        charset: None,
        palette: None,
        output_dir: None,
        prefix: None,
        formfeed: false,
        dump_charset: false,
        state: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                cli.input = args.get(i).map(PathBuf::from);
            }
            "--text" => {
                i += 1;
                cli.text = args.get(i).cloned();
            }
            "--sa" => {
                i += 1;
                match args.get(i).map(|s| s.parse::<u8>()) {
                    Some(Ok(sa)) => cli.secondary = Some(sa),
                    _ => {
                        eprintln!("--sa needs a secondary address (0-255)");
                        process::exit(1);
                    }
                }
            }
            "--config" => {
                i += 1;
                cli.config = args.get(i).map(PathBuf::from);
            }
            "--charset" => {
                i += 1;
                cli.charset = args.get(i).map(PathBuf::from);
            }
            "--palette" => {
                i += 1;
                cli.palette = args.get(i).map(PathBuf::from);
            }
            "--output-dir" => {
                i += 1;
                cli.output_dir = args.get(i).map(PathBuf::from);
            }
            "--prefix" => {
                i += 1;
                cli.prefix = args.get(i).cloned();
            }
            "--formfeed" => {
                cli.formfeed = true;
            }
            "--dump-charset" => {
                cli.dump_charset = true;
            }
            "--state" => {
                cli.state = true;
            }
            "--help" | "-h" => {
                eprintln!("Usage: emu-mps803 [OPTIONS]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --input <file>       Raw bytes to send to the printer");
                eprintln!("  --text <text>        Text to print (use \\n for Return)");
                eprintln!("  --sa <n>             Secondary address: 0 graphics, 7 business [default: 0]");
                eprintln!("  --config <file>      JSON configuration file");
                eprintln!("  --charset <file>     Character ROM [default: roms/mps803]");
                eprintln!("  --palette <file>     VICE .vpl palette (Black, White)");
                eprintln!("  --output-dir <dir>   Directory for PNG pages [default: .]");
                eprintln!("  --prefix <name>      Page file name prefix [default: mps803]");
                eprintln!("  --formfeed           Eject the page when the job ends");
                eprintln!("  --dump-charset       Print every glyph of the character ROM");
                eprintln!("  --state              Print the final printer state as JSON");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

fn load_config(cli: &CliArgs) -> PrinterConfig {
    let mut config = match cli.config {
        Some(ref path) => match PrinterConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Cannot read config {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => PrinterConfig::default(),
    };

    if let Some(ref path) = cli.charset {
        config.charset = Some(path.clone());
    }
    if let Some(ref path) = cli.palette {
        config.palette = Some(path.clone());
    }
    if let Some(ref dir) = cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(ref prefix) = cli.prefix {
        config.prefix = prefix.clone();
    }
    if let Some(sa) = cli.secondary {
        config.secondary_address = sa;
    }
    config.formfeed |= cli.formfeed;
    config
}

fn load_charset(config: &PrinterConfig) -> Charset {
    let path = config.charset_path();
    match Charset::load(&path) {
        Ok(cs) => cs,
        Err(e) => {
            eprintln!("Cannot load MPS-803 charset at {}: {e}", path.display());
            eprintln!();
            eprintln!("Place the printer ROM in the roms/ directory:");
            eprintln!("  roms/mps803      (3584 bytes)");
            eprintln!("  roms/mps803.vpl  (optional palette)");
            process::exit(1);
        }
    }
}

fn load_job_data(cli: &CliArgs) -> Vec<u8> {
    if let Some(ref path) = cli.input {
        match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Failed to read {}: {e}", path.display());
                process::exit(1);
            }
        }
    } else if let Some(ref text) = cli.text {
        let text = text.replace("\\n", "\n");
        petscii::from_ascii(&text)
    } else {
        eprintln!("Nothing to print: use --input <file> or --text <text>");
        process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = parse_args();
    let config = load_config(&cli);
    let charset = load_charset(&config);

    if cli.dump_charset {
        for glyph in 0..commodore_mps_803::charset::GLYPH_COUNT {
            println!("{glyph}");
            print!("{}", charset.render_glyph(glyph));
        }
        return;
    }

    let mut job = PrintJob::new(config.secondary_address, load_job_data(&cli));
    job.formfeed = config.formfeed;

    let output = PngOutput::new(&config.output_dir, config.prefix.as_str());
    let mut printer = Mps803::new(charset, output);

    if let Some(path) = config.palette_path() {
        let names: Vec<String> = default_palette().into_iter().map(|c| c.name).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        match Palette::load_vpl(&path, &names) {
            Ok(palette) => printer.set_palette(palette.into_colors()),
            Err(e) => warn!("Cannot load palette {}: {e}; using black on white", path.display()),
        }
    }

    if let Err(e) = job.run(&mut printer) {
        eprintln!("Print error: {e}");
        process::exit(1);
    }

    if cli.state {
        let snapshot = state::state_json(&printer);
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).unwrap_or_default()
        );
    }

    let pages = printer.output().written().len();
    info!("{pages} page(s) written to {}", config.output_dir.display());
}
