//! Row normalization: one catalog row to one record per reported variant.

use tracing::{debug, warn};

use crate::document::{Association, Efo, NormalizedVariant, Study};
use crate::error::GwasError;

use super::fields::{
    ontology_id, parse_float, parse_pubmed, parse_snp_field, reorganize_field, split_list,
    validate_chrom,
};
use super::row::CatalogRow;

/// Counters collected while normalizing a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Rows read
    pub rows: usize,
    /// Variants emitted
    pub variants: usize,
    /// Rows whose positional SNP field did not split into four parts
    pub skipped_malformed: usize,
    /// Rows whose position was not a positive integer
    pub skipped_position: usize,
    /// Rows whose alleles could not be converted to HGVS
    pub skipped_allele: usize,
}

impl NormalizeStats {
    /// Total rows skipped for any reason.
    pub fn skipped(&self) -> usize {
        self.skipped_malformed + self.skipped_position + self.skipped_allele
    }

    fn record_skip(&mut self, err: &GwasError) {
        match err {
            GwasError::MalformedSnp { .. } => self.skipped_malformed += 1,
            GwasError::InvalidPosition { .. } => self.skipped_position += 1,
            _ => self.skipped_allele += 1,
        }
    }
}

/// Normalized variants together with the counters for the run.
#[derive(Debug, Clone, Default)]
pub struct NormalizeOutput {
    pub variants: Vec<NormalizedVariant>,
    pub stats: NormalizeStats,
}

fn trimmed(s: &str) -> String {
    s.trim().to_string()
}

/// Normalize a single catalog row.
///
/// Returns one [`NormalizedVariant`] per variant in the `SNPS` column, all
/// sharing the row's association. Positional columns are expanded with
/// [`reorganize_field`] so that variant `i` gets the `i`-th region,
/// chromosome, position, gene list and context.
///
/// Rows whose `SNPS` column cannot be interpreted produce a recoverable
/// error (see [`GwasError::is_recoverable`]).
///
/// # Examples
///
/// ```
/// use ferro_gwas::catalog::{normalize_row, CatalogRow};
///
/// let row = CatalogRow {
///     snps: "rs1 x rs2".to_string(),
///     chr_id: "1 x 2".to_string(),
///     pubmed_id: "1234".to_string(),
///     ..Default::default()
/// };
/// let variants = normalize_row(&row).unwrap();
/// assert_eq!(variants.len(), 2);
/// assert_eq!(variants[1].id, "rs2");
/// assert_eq!(variants[1].chrom.as_deref(), Some("2"));
/// ```
pub fn normalize_row(row: &CatalogRow) -> Result<Vec<NormalizedVariant>, GwasError> {
    let field = parse_snp_field(&row.snps)?;
    let num_snps = field.snps.len();
    let separator = field.separator;

    let mut regions = reorganize_field(&row.region, separator, num_snps);
    let mut chroms = reorganize_field(&row.chr_id, separator, num_snps);
    let mut positions = reorganize_field(&row.chr_pos, separator, num_snps);
    let mut genes = reorganize_field(&row.reported_genes, separator, num_snps);
    let mut contexts = reorganize_field(&row.context, separator, num_snps);

    let association = Association {
        snps: field.snps.clone(),
        pubmed: parse_pubmed(&row.pubmed_id),
        date_added: trimmed(&row.date_added),
        study: Study {
            name: trimmed(&row.study),
            platform: trimmed(&row.platform),
            accession: trimmed(&row.study_accession),
        },
        trait_name: trimmed(&row.disease_trait),
        raf: parse_float(&row.risk_allele_frequency),
        pval: parse_float(&row.p_value),
        efo: Efo {
            name: split_list(&row.mapped_trait),
            id: split_list(&row.mapped_trait_uri)
                .iter()
                .map(|uri| ontology_id(uri))
                .collect(),
        },
    };

    let variants = field
        .snps
        .iter()
        .enumerate()
        .map(|(i, snp)| NormalizedVariant {
            id: snp.clone(),
            is_hgvs: field.is_hgvs,
            rsid: (!field.is_hgvs).then(|| snp.clone()),
            region: regions[i].take(),
            chrom: validate_chrom(chroms[i].take()),
            pos: positions[i].take(),
            gene: genes[i]
                .take()
                .filter(|g| !g.is_empty())
                .map(|g| split_list(&g)),
            context: contexts[i].take(),
            association: association.clone(),
        })
        .collect();

    Ok(variants)
}

/// Normalize every row, skipping rows with recoverable errors.
///
/// Skipped rows are logged at `warn` level and counted in the returned
/// [`NormalizeStats`]. Any other error (e.g. a read failure) aborts.
pub fn normalize_rows<I>(rows: I) -> Result<NormalizeOutput, GwasError>
where
    I: IntoIterator<Item = Result<CatalogRow, GwasError>>,
{
    let mut output = NormalizeOutput::default();

    for row in rows {
        let row = row?;
        output.stats.rows += 1;

        match normalize_row(&row) {
            Ok(variants) => {
                output.stats.variants += variants.len();
                output.variants.extend(variants);
            }
            Err(err) if err.is_recoverable() => {
                warn!(snps = %row.snps, "Skipping row: {}", err.detailed_message());
                output.stats.record_skip(&err);
            }
            Err(err) => return Err(err),
        }
    }

    debug!(
        rows = output.stats.rows,
        variants = output.stats.variants,
        skipped = output.stats.skipped(),
        "Normalized catalog rows"
    );

    Ok(output)
}
