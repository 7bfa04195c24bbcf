//! URL input collection.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

/// Reads URLs from `reader`, one per line.
///
/// Surrounding whitespace is trimmed; blank lines and lines starting with `#`
/// are skipped.
pub fn read_urls<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut urls = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", index + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        urls.push(trimmed.to_string());
    }
    Ok(urls)
}

/// Collects the URLs given on the command line followed by those in `file`.
pub fn collect_urls(args: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut urls = args.to_vec();
    if let Some(path) = file {
        let handle = File::open(path)
            .with_context(|| format!("Failed to open URL file {}", path.display()))?;
        let from_file = read_urls(BufReader::new(handle))
            .with_context(|| format!("Failed to read URL file {}", path.display()))?;
        urls.extend(from_file);
    }
    Ok(urls)
}
