//! Reading parsed book chunks from disk
//!
//! A book is parsed in chunks, one JSON file per chunk, named
//! `<book-id>-<n>.json`.

use crate::error::ParseError;
use crate::parser::DocumentParser;
use crate::types::Conversion;
use flate2::read::GzDecoder;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

static CHUNK_FILE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*)-(\d+)\.json(\.gz)?$").unwrap());

/// Read a chunk file into a raw JSON payload
///
/// Files ending in `.gz` are decompressed while reading.
pub fn read_chunk_file(path: impl AsRef<Path>) -> Result<Value, ParseError> {
    let path = path.as_ref();
    debug!("Reading chunk file {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    let payload = if path.extension().is_some_and(|ext| ext == "gz") {
        serde_json::from_reader(GzDecoder::new(reader))?
    } else {
        serde_json::from_reader(reader)?
    };
    Ok(payload)
}

/// Read a chunk file and convert it with the default configuration
pub fn parse_chunk_file(path: impl AsRef<Path>) -> Result<Conversion, ParseError> {
    DocumentParser::default().parse_chunk_file(path)
}

/// Split a chunk file name into its book id and chunk number
///
/// Any leading directories are ignored. Returns `None` for names that do
/// not follow the chunk naming scheme.
pub fn parse_chunk_file_name(path: impl AsRef<Path>) -> Option<(String, u32)> {
    let file_name = path.as_ref().file_name()?.to_str()?;
    let caps = CHUNK_FILE_NAME.captures(file_name)?;
    let number = caps[2].parse().ok()?;
    Some((caps[1].to_string(), number))
}

impl DocumentParser {
    /// Read a chunk file, detect its schema and convert it
    pub fn parse_chunk_file(&self, path: impl AsRef<Path>) -> Result<Conversion, ParseError> {
        let payload = read_chunk_file(path)?;
        self.parse_auto(&payload)
    }
}
