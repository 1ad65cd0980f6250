// src/export.rs

//! CSV export.
//!
//! Fixed 8-column layout; the `product_images` cell holds a JSON array of
//! reference strings. Failure to open or write the output file is the one
//! fatal error of a run.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::ProductRecord;

/// Column headers, in output order.
pub const CSV_HEADER: [&str; 8] = [
    "id",
    "href",
    "thumbnail",
    "name",
    "product_images",
    "description",
    "brand",
    "category",
];

/// Serialize the catalog as CSV into any writer.
pub fn write_catalog<W: Write>(writer: W, records: &[ProductRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for record in records {
        csv_writer.write_record(&[
            record.id.to_string(),
            record.href.clone(),
            record.thumbnail.clone(),
            record.name.clone(),
            serde_json::to_string(&record.product_images)?,
            record.description.clone(),
            record.brand.clone(),
            record.category.clone(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the catalog to a CSV file at the given path.
pub fn export_catalog(path: impl AsRef<Path>, records: &[ProductRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_catalog(file, records)
}
