//! Detect form fields on a scanned page.
//!
//! Reads a page image plus a Tesseract-style OCR word dump (JSON array of
//! records with text/left/top/width/height/conf/level/block_num/line_num/
//! word_num) and prints the ordered field list as JSON.
//!
//! Usage:
//!   cargo run --release --bin formscan -- page.png page_ocr.json
//!   cargo run --release --bin formscan -- page.png page_ocr.json --no-llm

use formscan::extractor::{FieldExtractor, NullExtractor, OpenAiExtractor};
use formscan::ocr::{page_from_records, RawOcrRecord};
use formscan::pipeline::extract_fields;
use std::path::PathBuf;
use std::process;

struct CliConfig {
    image_path: PathBuf,
    ocr_path: PathBuf,
    dpi: u32,
    use_llm: bool,
}

impl CliConfig {
    fn from_args() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut positional = Vec::new();
        let mut dpi = 300u32;
        let mut use_llm = true;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--no-llm" => {
                    use_llm = false;
                }
                "--dpi" => {
                    i += 1;
                    if i < args.len() {
                        dpi = args[i].parse().ok()?;
                    }
                }
                other => {
                    positional.push(PathBuf::from(other));
                }
            }
            i += 1;
        }

        if positional.len() != 2 {
            return None;
        }
        let mut positional = positional.into_iter();
        Some(Self {
            image_path: positional.next()?,
            ocr_path: positional.next()?,
            dpi,
            use_llm,
        })
    }
}

fn run(config: &CliConfig) -> formscan::Result<()> {
    let image_bytes = std::fs::read(&config.image_path)?;
    let decoded = image::load_from_memory(&image_bytes)?;
    let (width, height) = (decoded.width(), decoded.height());

    let ocr_json = std::fs::read_to_string(&config.ocr_path)?;
    let records: Vec<RawOcrRecord> = serde_json::from_str(&ocr_json)?;
    let page = page_from_records(0, image_bytes, width, height, config.dpi, &records);

    let extractor: Box<dyn FieldExtractor> = if config.use_llm {
        match OpenAiExtractor::from_env()? {
            Some(extractor) => Box::new(extractor),
            None => {
                eprintln!("Note: OPENAI_API_KEY not set, running heuristics only.");
                Box::new(NullExtractor)
            }
        }
    } else {
        Box::new(NullExtractor)
    };

    let fields = extract_fields(&[page], extractor.as_ref());
    println!("{}", serde_json::to_string_pretty(&fields)?);
    Ok(())
}

fn main() {
    env_logger::init();

    let Some(config) = CliConfig::from_args() else {
        eprintln!("Usage: formscan <page-image> <ocr-json> [--dpi N] [--no-llm]");
        process::exit(2);
    };

    if let Err(err) = run(&config) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
