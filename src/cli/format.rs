//! Output formatting utilities for CLI operations

use std::io::Write;
use std::str::FromStr;

use serde::Serialize;

use crate::error::GwasError;
use crate::vcf::HgvsNotation;

/// Output format for documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One JSON document per line (default)
    #[default]
    Ndjson,
    /// A single JSON array
    Json,
}

impl FromStr for OutputFormat {
    type Err = GwasError;

    /// Parse an output format from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_gwas::cli::OutputFormat;
    /// use std::str::FromStr;
    ///
    /// assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
    /// assert_eq!(OutputFormat::from_str("NDJSON").unwrap(), OutputFormat::Ndjson);
    /// assert!(OutputFormat::from_str("xml").is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ndjson" | "jsonl" => Ok(OutputFormat::Ndjson),
            "json" => Ok(OutputFormat::Json),
            other => Err(GwasError::Config {
                msg: format!("unknown output format '{}'", other),
            }),
        }
    }
}

/// Write records in the given format, returning how many were written.
///
/// Records are serialized one at a time so a lazy iterator is never
/// materialized.
///
/// # Examples
///
/// ```
/// use ferro_gwas::cli::{write_records, OutputFormat};
/// use serde_json::json;
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// let records = vec![json!({"_id": "a"}), json!({"_id": "b"})];
/// let n = write_records(&mut buffer, records, OutputFormat::Json).unwrap();
/// assert_eq!(n, 2);
///
/// let text = String::from_utf8(buffer.into_inner()).unwrap();
/// assert_eq!(text, "[\n{\"_id\":\"a\"},\n{\"_id\":\"b\"}\n]\n");
/// ```
pub fn write_records<W, T, I>(
    writer: &mut W,
    records: I,
    format: OutputFormat,
) -> Result<usize, GwasError>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut count = 0;

    if format == OutputFormat::Json {
        writer.write_all(b"[")?;
    }

    for record in records {
        match format {
            OutputFormat::Ndjson => {
                serde_json::to_writer(&mut *writer, &record)?;
                writer.write_all(b"\n")?;
            }
            OutputFormat::Json => {
                let sep: &[u8] = if count == 0 { b"\n" } else { b",\n" };
                writer.write_all(sep)?;
                serde_json::to_writer(&mut *writer, &record)?;
            }
        }
        count += 1;
    }

    if format == OutputFormat::Json {
        let close: &[u8] = if count == 0 { b"]\n" } else { b"\n]\n" };
        writer.write_all(close)?;
    }
    writer.flush()?;

    Ok(count)
}

/// Write the result of a notation conversion as `notation<TAB>class`.
///
/// # Examples
///
/// ```
/// use ferro_gwas::cli::output_notation;
/// use ferro_gwas::vcf_to_hgvs;
/// use std::io::Cursor;
///
/// let notation = vcf_to_hgvs("1", 100, "A", "G").unwrap();
/// let mut buffer = Cursor::new(Vec::new());
/// output_notation(&mut buffer, &notation).unwrap();
/// assert_eq!(String::from_utf8(buffer.into_inner()).unwrap(), "chr1:g.100A>G\tsnp\n");
/// ```
pub fn output_notation<W: Write>(writer: &mut W, notation: &HgvsNotation) -> Result<(), GwasError> {
    writeln!(writer, "{}\t{}", notation.hgvs, notation.class)?;
    Ok(())
}

/// Write an error with its code to the output
pub fn output_error<W: Write>(writer: &mut W, error: &GwasError) -> Result<(), GwasError> {
    writeln!(writer, "ERROR: {}", error.detailed_message())?;
    Ok(())
}
