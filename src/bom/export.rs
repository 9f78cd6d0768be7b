//! CSV/TSV export for bill-of-materials line items.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::BomLineItem;

/// Column header for BOM export.
const HEADER: [&str; 6] = [
    "No.",
    "Description",
    "Specification",
    "Unit",
    "Qty",
    "Remarks",
];

/// Field delimiter of the exported table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BomFormat {
    /// Comma-separated values.
    #[default]
    Csv,
    /// Tab-separated values, for pasting into a spreadsheet.
    Tsv,
}

impl BomFormat {
    fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }
}

/// Failure writing a BOM table.
#[derive(Debug, Error)]
pub enum BomExportError {
    #[error("cannot create \"{}\": {source}", path.display())]
    Create { path: PathBuf, source: io::Error },
    #[error("failed to write BOM: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write BOM: {0}")]
    Io(#[from] io::Error),
}

/// Exports line items to a file at the given path.
///
/// # Errors
///
/// Returns a `BomExportError` if file creation or writing fails.
pub fn export_bom(items: &[BomLineItem], path: &Path, format: BomFormat) -> Result<(), BomExportError> {
    let file = File::create(path).map_err(|source| BomExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_bom(items, io::BufWriter::new(file), format)
}

/// Writes line items to any writer: a header row, then one row per item.
///
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns a `BomExportError` if writing fails.
pub fn write_bom(
    items: &[BomLineItem],
    writer: impl Write,
    format: BomFormat,
) -> Result<(), BomExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for item in items {
        wtr.write_record([
            item.sequence_number.to_string(),
            item.description.clone(),
            item.specification.clone(),
            item.unit.to_string(),
            item.quantity.to_string(),
            item.remarks.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
