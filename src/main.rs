//! # Quotepage CLI
//!
//! Usage:
//!   quotepage quote.json -o quote.pdf
//!   echo '{ ... }' | quotepage --letterhead org.json -o quote.pdf
//!   quotepage --example > quote.json
//!
//! `RUST_LOG=debug` shows page allocations.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use chrono::{DateTime, NaiveDateTime};
use clap::Parser;

use quotepage::letterhead::{JsonFileLetterhead, StaticLetterhead};
use quotepage::{Branding, Document, LayoutConfig, QuoteError, RenderOptions};

#[derive(Parser, Debug)]
#[command(name = "quotepage", version, about = "Render a quote document to PDF")]
struct Args {
    /// Document JSON. Reads stdin when omitted.
    input: Option<PathBuf>,

    #[arg(short, long, default_value = "output.pdf")]
    output: PathBuf,

    /// Organization letterhead JSON.
    #[arg(long)]
    letterhead: Option<PathBuf>,

    /// Layout config JSON. Missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Footer timestamp, RFC 3339 or `YYYY-MM-DDTHH:MM:SS`.
    #[arg(long, value_parser = parse_timestamp)]
    generated_at: Option<NaiveDateTime>,

    /// Write the laid-out pages as JSON instead of a PDF.
    #[arg(long)]
    layout_json: bool,

    /// Print a sample document and exit.
    #[arg(long)]
    example: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.example {
        print!("{}", example_quote_json());
        return;
    }

    if let Err(e) = run(&args) {
        log::error!("{e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), QuoteError> {
    let input = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let document: Document = serde_json::from_str(&input)?;

    let config = match &args.config {
        Some(path) => read_config(path)?,
        None => LayoutConfig::default(),
    };
    let options = RenderOptions {
        config,
        generated_at: args.generated_at,
    };

    let branding = match &args.letterhead {
        Some(path) => Branding::resolve(&JsonFileLetterhead::new(path)),
        None => Branding::resolve(&StaticLetterhead(None)),
    };

    let bytes = if args.layout_json {
        quotepage::render_layout_json(&document, &branding, &options)?
    } else {
        quotepage::render_pdf(&document, &branding, &options)
    };

    fs::write(&args.output, &bytes)?;
    log::info!("Written {} bytes to {}", bytes.len(), args.output.display());
    Ok(())
}

fn read_config(path: &Path) -> Result<LayoutConfig, QuoteError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .map_err(|e| format!("invalid timestamp '{s}': {e}"))
}

fn example_quote_json() -> &'static str {
    r##"{
  "id": "2026-0117",
  "status": "Awaiting approval",
  "createdAt": "2026-03-02",
  "expiresAt": "2026-03-16",
  "party": {
    "name": "Marina Costa",
    "taxId": "123.456.789-00",
    "phone": "+55 11 91234-5678",
    "email": "marina@example.com"
  },
  "vehicle": {
    "make": "Honda",
    "model": "Civic EXL",
    "plate": "FQA-2B19",
    "year": 2019
  },
  "items": [
    { "description": "Front brake pads (ceramic)", "quantity": 1, "unitPrice": 320.0, "lineTotal": 320.0 },
    { "description": "Brake disc resurfacing, both front discs, including removal and reinstallation", "quantity": 2, "unitPrice": 85.0, "lineTotal": 170.0 },
    { "description": "Brake fluid DOT 4", "quantity": 1, "unitPrice": 48.5, "lineTotal": 48.5 },
    { "description": "Labor", "quantity": 2.5, "unitPrice": 120.0, "lineTotal": 300.0 }
  ],
  "summary": { "subtotal": 838.5, "discount": 38.5, "total": 800.0 },
  "notes": "Prices valid for 14 days.\nParts are ordered after approval."
}
"##
}
