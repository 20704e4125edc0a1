//! Reading the GWAS Catalog associations TSV.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::{debug, info};

use crate::error::GwasError;

use super::row::CatalogRow;

/// UTF-8 BOM (Byte Order Mark) constant
const UTF8_BOM: &str = "\u{feff}";

/// Options controlling how the catalog file is read.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Drop data lines that exactly repeat an earlier line
    pub dedup_lines: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { dedup_lines: true }
    }
}

/// A fully read catalog file.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Column names from the header line
    pub header: Vec<String>,
    /// Parsed rows in first-occurrence order
    pub rows: Vec<CatalogRow>,
    /// Number of data lines dropped as duplicates
    pub duplicate_lines: usize,
}

impl Catalog {
    /// Rows wrapped for [`super::normalize_rows`].
    pub fn into_results(self) -> impl Iterator<Item = Result<CatalogRow, GwasError>> {
        self.rows.into_iter().map(Ok)
    }
}

/// Open a catalog file, transparently decompressing `.gz`/`.bgz` input.
pub fn open_catalog<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>, GwasError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| GwasError::Io {
        msg: format!("Failed to open catalog file {}: {}", path.display(), e),
    })?;

    let name = path.to_string_lossy();
    let reader: Box<dyn BufRead> = if name.ends_with(".gz") || name.ends_with(".bgz") {
        Box::new(BufReader::with_capacity(
            1024 * 1024,
            MultiGzDecoder::new(file),
        ))
    } else {
        Box::new(BufReader::with_capacity(1024 * 1024, file))
    };
    Ok(reader)
}

/// Read and parse a catalog file from disk.
pub fn read_catalog<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Catalog, GwasError> {
    let path = path.as_ref();
    info!("Reading GWAS catalog from {}", path.display());
    read_catalog_from(open_catalog(path)?, options)
}

/// Read and parse a catalog from any buffered reader.
///
/// The first non-blank line is the header. Blank data lines are ignored
/// and, with [`ReadOptions::dedup_lines`], exact duplicate lines are dropped
/// before parsing.
///
/// # Examples
///
/// ```
/// use ferro_gwas::catalog::{read_catalog_from, ReadOptions};
///
/// let tsv = "SNPS\tSTUDY\nrs1\tA\nrs1\tA\nrs2\tB\n";
/// let catalog = read_catalog_from(tsv.as_bytes(), &ReadOptions::default()).unwrap();
/// assert_eq!(catalog.rows.len(), 2);
/// assert_eq!(catalog.duplicate_lines, 1);
/// assert_eq!(catalog.rows[1].study, "B");
/// ```
pub fn read_catalog_from<R: BufRead>(
    reader: R,
    options: &ReadOptions,
) -> Result<Catalog, GwasError> {
    let mut lines = reader.lines();

    let header_line = loop {
        match lines.next() {
            Some(line) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break line;
                }
            }
            None => return Ok(Catalog::default()),
        }
    };
    let header_line = header_line.strip_prefix(UTF8_BOM).unwrap_or(&header_line);
    let header: Vec<String> = header_line
        .trim_end_matches('\r')
        .split('\t')
        .map(|h| h.trim().to_string())
        .collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut body = String::new();
    let mut duplicate_lines = 0;

    for line in lines {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        if options.dedup_lines && !seen.insert(line.to_string()) {
            duplicate_lines += 1;
            continue;
        }
        body.push_str(line);
        body.push('\n');
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(body.as_bytes());
    let headers = csv::StringRecord::from(header.clone());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: CatalogRow = record.deserialize(Some(&headers))?;
        rows.push(row);
    }

    debug!(
        rows = rows.len(),
        duplicates = duplicate_lines,
        "Parsed catalog body"
    );

    Ok(Catalog {
        header,
        rows,
        duplicate_lines,
    })
}
