//! Pack slide measurements into placement commands
//!
//! Reads a deck of measured slides as JSON and writes the packed slides as
//! JSON. A one-line summary per slide goes to stderr.
//!
//! Usage:
//!   cargo run --release --bin slide_pack -- deck.json
//!   cargo run --release --bin slide_pack -- deck.json -o packed.json --pretty
//!   cat deck.json | cargo run --release --bin slide_pack -- --config keynote.json

use slide_oxide::pipeline::{DeckInput, PackedSlide, PackerConfig, SlidePacker};
use slide_oxide::Result;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

struct PackArgs {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    pretty: bool,
}

impl PackArgs {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut output = None;
        let mut config = None;
        let mut pretty = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--output" | "-o" => {
                    i += 1;
                    if i < args.len() {
                        output = Some(PathBuf::from(&args[i]));
                    }
                },
                "--config" => {
                    i += 1;
                    if i < args.len() {
                        config = Some(PathBuf::from(&args[i]));
                    }
                },
                "--pretty" => {
                    pretty = true;
                },
                other if !other.starts_with('-') => {
                    input = Some(PathBuf::from(other));
                },
                other => {
                    eprintln!("Ignoring unknown option {}", other);
                },
            }
            i += 1;
        }

        Self {
            input,
            output,
            config,
            pretty,
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        },
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<PackerConfig> {
    match path {
        Some(path) => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
        None => Ok(PackerConfig::default()),
    }
}

fn print_summary(slides: &[PackedSlide]) {
    for (i, slide) in slides.iter().enumerate() {
        let r = &slide.report;
        eprintln!(
            "slide {}: {} measurements ({} dropped) -> {} commands, {} unresolved, {} overflowing",
            i + 1,
            r.measurements_in,
            r.measurements_dropped,
            slide.commands.len(),
            r.unresolved_collisions,
            r.overflowing
        );
    }
}

fn run(args: &PackArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let deck: DeckInput = serde_json::from_str(&read_input(args.input.as_ref())?)?;

    let packer = SlidePacker::try_with_config(config)?;
    let slides = packer.pack_deck(&deck)?;
    print_summary(&slides);

    let json = if args.pretty {
        serde_json::to_string_pretty(&slides)?
    } else {
        serde_json::to_string(&slides)?
    };

    match &args.output {
        Some(path) => fs::write(path, json)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        },
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args = PackArgs::from_args();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
