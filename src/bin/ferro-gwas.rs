// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-gwas CLI
//!
//! Command-line interface for loading the GWAS Catalog into variant documents.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use ferro_gwas::catalog::{normalize_rows, read_catalog, NormalizeOutput, ReadOptions};
use ferro_gwas::cli::{open_output, output_error, output_notation, write_records, OutputFormat};
use ferro_gwas::config::GwasConfig;
use ferro_gwas::resolve::{BatchProgress, InMemoryResolver, MyVariantResolver, VariantResolver};
use ferro_gwas::{aggregate_with_progress, vcf_to_hgvs, AggregateOptions, GwasError};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

#[derive(Parser)]
#[command(name = "ferro-gwas")]
#[command(author, version, about = "GWAS Catalog loader")]
#[command(
    long_about = "Convert GWAS Catalog associations into variant documents keyed by genomic
HGVS ids.

Examples:
  ferro-gwas convert 1 100 AT A
  ferro-gwas normalize -i gwas_catalog_associations.tsv
  ferro-gwas load -i gwas_catalog_associations.tsv.gz -o gwas.ndjson
  ferro-gwas load -i gwas_catalog_associations.tsv --offline rsids.tsv --format json"
)]
struct Cli {
    /// Log level or filter directive (e.g. debug, ferro_gwas=trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Configuration file (default: .ferro-gwas.toml, then ~/.config/ferro/gwas.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a VCF-style variant into a genomic HGVS id
    Convert {
        /// Chromosome, with or without chr prefix
        chrom: String,
        /// 1-based position
        pos: u64,
        /// Reference allele
        reference: String,
        /// Alternate allele
        alternate: String,
    },

    /// Normalize catalog rows into per-variant documents without resolution
    Normalize {
        /// Input catalog TSV (.gz supported)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, default_value = "ndjson", value_parser = ["ndjson", "json"])]
        format: String,
    },

    /// Normalize, resolve and merge catalog rows into final documents
    Load {
        /// Input catalog TSV (.gz supported)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Variant service base URL
        #[arg(long)]
        api_url: Option<String>,

        /// Ids per resolver call (1-1000)
        #[arg(long)]
        batch_size: Option<usize>,

        /// Keep groups whose rsID has no canonical id, keyed by the rsID
        #[arg(long)]
        keep_unresolved: bool,

        /// Resolve rsIDs from a two-column TSV instead of the variant service
        #[arg(long)]
        offline: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, default_value = "ndjson", value_parser = ["ndjson", "json"])]
        format: String,
    },

    /// Print or write a sample configuration file
    Config {
        /// Write to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log_level) {
        eprintln!("ERROR: {}", e);
        std::process::exit(2);
    }

    if let Err(e) = run(cli) {
        let _ = output_error(&mut std::io::stderr(), &e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), GwasError> {
    match cli.command {
        Commands::Convert {
            chrom,
            pos,
            reference,
            alternate,
        } => {
            let chrom = chrom.strip_prefix("chr").unwrap_or(&chrom);
            let notation = vcf_to_hgvs(chrom, pos, &reference, &alternate)?;
            let mut stdout = std::io::stdout();
            output_notation(&mut stdout, &notation)
        }
        Commands::Normalize {
            input,
            output,
            format,
        } => {
            let config = GwasConfig::load_from(cli.config.as_deref())?;
            let normalized = read_and_normalize(&input, &config)?;
            let mut writer = open_output(output.as_deref())?;
            let written = write_records(
                &mut writer,
                normalized.variants.iter().map(|v| v.to_document()),
                OutputFormat::from_str(&format)?,
            )?;
            info!("Wrote {} variant documents", written);
            Ok(())
        }
        Commands::Load {
            input,
            output,
            api_url,
            batch_size,
            keep_unresolved,
            offline,
            format,
        } => {
            let mut config = GwasConfig::load_from(cli.config.as_deref())?;
            if let Some(url) = api_url {
                config.resolver.api_url = url;
            }
            if let Some(size) = batch_size {
                config.resolver.batch_size = size;
            }
            if keep_unresolved {
                config.resolver.keep_unresolved = true;
            }
            config.validate()?;

            let resolver: Box<dyn VariantResolver> = match offline {
                Some(path) => {
                    info!("Using offline resolver table {}", path.display());
                    Box::new(InMemoryResolver::from_tsv(&path)?)
                }
                None => Box::new(MyVariantResolver::from_config(&config.resolver)?),
            };

            run_load(
                &input,
                output.as_deref(),
                OutputFormat::from_str(&format)?,
                &config,
                resolver.as_ref(),
            )
        }
        Commands::Config { output } => {
            let sample = GwasConfig::sample();
            match output {
                Some(path) => {
                    std::fs::write(&path, sample)?;
                    info!("Wrote sample configuration to {}", path.display());
                }
                None => print!("{}", sample),
            }
            Ok(())
        }
    }
}

fn read_and_normalize(input: &Path, config: &GwasConfig) -> Result<NormalizeOutput, GwasError> {
    let options = ReadOptions {
        dedup_lines: config.input.dedup_lines,
    };
    let catalog = read_catalog(input, &options)?;
    if catalog.duplicate_lines > 0 {
        info!("Dropped {} duplicate lines", catalog.duplicate_lines);
    }

    let output = normalize_rows(catalog.into_results())?;
    info!(
        "Normalized {} rows into {} variants ({} rows skipped)",
        output.stats.rows,
        output.stats.variants,
        output.stats.skipped()
    );
    Ok(output)
}

fn run_load(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    config: &GwasConfig,
    resolver: &dyn VariantResolver,
) -> Result<(), GwasError> {
    let start = Instant::now();
    let normalized = read_and_normalize(input, config)?;

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb.enable_steady_tick(Duration::from_millis(200));

    let update = |p: &BatchProgress| {
        pb.set_length(p.total as u64);
        pb.set_position(p.processed as u64);
        let eta = p
            .estimated_remaining()
            .map(|d| format!(", ETA {}s", d.as_secs()))
            .unwrap_or_default();
        pb.set_message(format!(
            "{} resolved ({:.0} ids/s{})",
            p.resolved,
            p.items_per_second(),
            eta
        ));
    };

    let options = AggregateOptions::from(&config.resolver);
    let documents = aggregate_with_progress(normalized.variants, resolver, &options, update);
    pb.finish_and_clear();
    let mut documents = documents?;

    let mut writer = open_output(output)?;
    let written = write_records(&mut writer, &mut documents, format)?;
    writer.flush()?;

    info!(
        "Wrote {} documents ({} unresolved groups dropped) in {:.1}s",
        written,
        documents.dropped(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}
