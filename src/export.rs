use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::AppError;
use crate::models::job::JobRecord;

/// Write `records` as a pretty-printed UTF-8 JSON array.
pub fn save(records: &[JobRecord], path: &Path) -> Result<(), AppError> {
    if records.is_empty() {
        return Err(AppError::BadRequest("No job results to save".to_string()));
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!("Saved {} jobs to {}", records.len(), path.display());
    Ok(())
}

pub fn load(path: &Path) -> Result<Vec<JobRecord>, AppError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
