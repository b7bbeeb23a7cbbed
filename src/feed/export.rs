//! Per-category CSV export
//!
//! One CSV file per non-empty bucket, UTF-8 with a byte-order mark so
//! spreadsheet tools pick up the encoding, fixed 5-column header.

use crate::feed::parser::FeedItem;
use crate::feed::FeedError;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

const BOM: &[u8] = b"\xEF\xBB\xBF";
const HEADER: [&str; 5] = ["Gender", "Title", "Link", "Price", "Description"];

/// Writes one bucket's records to `{prefix}_{bucket}.csv` under `dir`
///
/// The caller is expected to skip empty buckets; this always writes the
/// header plus all given rows.
pub fn write_bucket_csv(
    dir: &Path,
    prefix: &str,
    bucket: &str,
    rows: &[FeedItem],
) -> Result<PathBuf, FeedError> {
    std::fs::create_dir_all(dir)?;

    let path = dir.join(format!("{}_{}.csv", prefix, bucket));
    let mut file = File::create(&path)?;
    file.write_all(BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record([
            row.gender.as_str(),
            row.title.as_str(),
            row.link.as_str(),
            row.price.as_str(),
            row.description.as_str(),
        ])?;
    }
    writer.flush()?;

    Ok(path)
}
