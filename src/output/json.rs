//! JSON persistence of the hymn collection

use crate::hymn::HymnRecord;
use crate::output::OutputResult;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Serializes hymns as a JSON array indented with four spaces
pub fn to_pretty_json(records: &[HymnRecord]) -> OutputResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Writes the hymn collection to `output_path`, replacing any existing file
///
/// # Arguments
///
/// * `records` - The hymns to write
/// * `output_path` - Path of the JSON file
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the collection
/// * `Err(OutputError)` - Failed to serialize or write
pub fn write_hymns_json(records: &[HymnRecord], output_path: &Path) -> OutputResult<()> {
    let json = to_pretty_json(records)?;

    let mut file = File::create(output_path)?;
    file.write_all(&json)?;
    file.flush()?;

    Ok(())
}

/// Reads a hymn collection written by `write_hymns_json`
pub fn load_hymns_json(path: &Path) -> OutputResult<Vec<HymnRecord>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
