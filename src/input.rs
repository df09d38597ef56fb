use std::{fs::File, io::Read, path::Path};

use log::info;

use crate::BacklinkError;

/// Reads the `column` of a CSV with a header row, in file order.
/// Rows too short to have the column yield an empty name.
/// # Errors
/// Returns `MissingColumn` if the header has no such column, or a CSV error.
pub fn load_names<R: Read>(reader: R, column: &str) -> Result<Vec<String>, BacklinkError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let idx = rdr
        .headers()?
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| BacklinkError::MissingColumn(column.to_string()))?;
    rdr.records()
        .map(|record| -> Result<String, BacklinkError> {
            Ok(record?.get(idx).unwrap_or_default().to_string())
        })
        .collect()
}

/// Opens `path` and reads the `column` of it, see `load_names`.
/// # Errors
/// Returns an error if the file cannot be opened or parsed.
pub fn load_names_from_path<P: AsRef<Path>>(
    path: P,
    column: &str,
) -> Result<Vec<String>, BacklinkError> {
    let path = path.as_ref();
    let names = load_names(File::open(path)?, column)?;
    info!("Loaded {} names from {}", names.len(), path.display());
    Ok(names)
}
