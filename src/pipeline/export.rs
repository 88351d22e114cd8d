use crate::constants::OUTPUT_FILE_PREFIX;
use crate::error::Result;
use crate::types::CompanyRecord;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `hoa_companies_<YYYYMMDD_HHMMSS>.csv`
pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("{}_{}.csv", OUTPUT_FILE_PREFIX, now.format("%Y%m%d_%H%M%S"))
}

/// Pick an unused path in `output_dir` for an export started at `now`.
///
/// Two runs within the same second get `_2`, `_3`, ... before the extension.
fn unique_export_path(output_dir: &Path, now: DateTime<Local>) -> PathBuf {
    let name = export_file_name(now);
    let path = output_dir.join(&name);
    if !path.exists() {
        return path;
    }
    let stem = name.trim_end_matches(".csv");
    (2..)
        .map(|n| output_dir.join(format!("{}_{}.csv", stem, n)))
        .find(|p| !p.exists())
        .unwrap_or(path)
}

/// Write records as UTF-8 CSV with a header row and return the file path.
///
/// The output directory is created if missing.
pub fn write_csv(records: &[CompanyRecord], output_dir: &Path, now: DateTime<Local>) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = unique_export_path(output_dir, now);

    let mut writer = csv::Writer::from_path(&path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(path)
}
