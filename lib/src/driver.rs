//! The end-to-end run: CSV rows to nanopubs, then one index over all of them.

use crate::config::Config;
use crate::consts::CHEMICAL_TO_DISEASE_ASSOCIATION;
use crate::fetch::{fetch_csv, CsvSource, FetchOptions};
use crate::index::{IndexDocument, IndexMetadata};
use crate::mapper::{association_node, Mapper, Statement};
use crate::options::PublishMode;
use crate::profile::{default_key_path, Profile};
use crate::publish::{NanopubClient, Publisher};
use crate::row::{read_rows, SourceRow};
use crate::shapes::{ShapeSchema, ShapeValidator};
use anyhow::Result;
use log::{debug, info, warn};
use oxigraph::model::NamedNode;
use std::io::Write;
use std::str::FromStr;

/// Identifier used for the nth statement when nothing is published.
pub fn placeholder_id(n: usize) -> String {
    format!("http://np#{n}")
}

pub fn init_logging() {
    // OFFLABEL_NP_LOG takes precedence over RUST_LOG
    if let Ok(log_level) = std::env::var("OFFLABEL_NP_LOG") {
        std::env::set_var("RUST_LOG", log_level);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: PublishMode,
    pub max_rows_in_dry_run: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            mode: PublishMode::DryRun,
            max_rows_in_dry_run: 10,
        }
    }
}

impl From<&Config> for RunOptions {
    fn from(config: &Config) -> Self {
        Self {
            mode: config.publish_mode(),
            max_rows_in_dry_run: config.max_rows_in_dry_run,
        }
    }
}

/// What a complete run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub ids: Vec<String>,
    pub index: String,
}

/// Renders identifiers as `["a", "b"]`.
pub fn format_id_list(ids: &[String]) -> String {
    let quoted: Vec<String> = ids.iter().map(|id| format!("\"{id}\"")).collect();
    format!("[{}]", quoted.join(", "))
}

fn report_validation(
    validator: &dyn ShapeValidator,
    statement: &Statement,
    out: &mut impl Write,
) -> Result<()> {
    let focus = association_node();
    let report = validator.validate(
        &statement.assertion,
        CHEMICAL_TO_DISEASE_ASSOCIATION,
        focus.as_ref(),
    )?;
    if !report.conforms {
        for result in &report.results {
            warn!("Shape violation: {result}");
        }
    }
    writeln!(out, "Validation: {report}")?;
    Ok(())
}

/// Maps and signs (dry run) or publishes each row in order, returning one identifier
/// per processed row. In dry-run mode at most `max_rows_in_dry_run` rows are read and
/// identifiers are `http://np#<n>`. The first statement is written to `out` as TriG
/// and, when a validator is given, checked against the association shape.
///
/// The first error ends the run.
pub fn process_rows<I, P, W>(
    rows: I,
    mapper: &Mapper,
    publisher: &mut P,
    validator: Option<&dyn ShapeValidator>,
    options: &RunOptions,
    out: &mut W,
) -> Result<Vec<String>>
where
    I: IntoIterator<Item = Result<SourceRow>>,
    P: Publisher + ?Sized,
    W: Write,
{
    let limit = match options.mode {
        PublishMode::Publish => usize::MAX,
        PublishMode::DryRun => options.max_rows_in_dry_run,
    };
    let mut ids = Vec::new();
    for (n, row) in rows.into_iter().take(limit).enumerate() {
        let row = row?;
        let statement = mapper.map(&row)?;
        let np = publisher.create_publication(&statement);
        if n == 0 {
            writeln!(out, "{}", np.to_trig()?)?;
            if let Some(validator) = validator {
                report_validation(validator, &statement, out)?;
            }
        }
        let id = match options.mode {
            PublishMode::Publish => publisher.publish(&np)?.nanopub_uri,
            PublishMode::DryRun => {
                let signed = publisher.sign(&np)?;
                debug!("Signed {}:\n{}", signed.uri(), signed.trig());
                placeholder_id(n)
            }
        };
        ids.push(id);
        writeln!(out, "{}", ids.len())?;
    }
    info!("Processed {} rows", ids.len());
    Ok(ids)
}

/// Builds the index over `ids` and signs or publishes it. In dry-run mode the unsigned
/// index is written to `out` as TriG first. Returns the index URI.
pub fn publish_index<P, W>(
    ids: &[String],
    metadata: &IndexMetadata,
    publisher: &mut P,
    mode: PublishMode,
    out: &mut W,
) -> Result<String>
where
    P: Publisher + ?Sized,
    W: Write,
{
    let document = IndexDocument::new(ids, metadata.clone())?;
    let np = document.to_nanopub();
    let uri = match mode {
        PublishMode::Publish => publisher.publish(&np)?.nanopub_uri,
        PublishMode::DryRun => {
            writeln!(out, "{}", np.to_trig()?)?;
            publisher.sign(&np)?.uri().as_str().to_string()
        }
    };
    info!("Index of {} nanopubs: {}", document.elements().len(), uri);
    writeln!(out, "Index: {uri}")?;
    Ok(uri)
}

/// Runs the whole pipeline against `publisher`.
pub fn run_with<P, W>(config: &Config, publisher: &mut P, out: &mut W) -> Result<RunSummary>
where
    P: Publisher + ?Sized,
    W: Write,
{
    let source = CsvSource::from_str(&config.source)?;
    let opts = FetchOptions {
        timeout: config.timeout(),
    };
    let bytes = fetch_csv(&source, &opts)?;
    let mapper = Mapper::new(NamedNode::new(config.creator.as_str())?);
    let schema = ShapeSchema::biolink();
    let validator: Option<&dyn ShapeValidator> = if config.validation().is_enabled() {
        Some(&schema)
    } else {
        None
    };
    let options = RunOptions::from(config);

    let ids = process_rows(
        read_rows(bytes.as_slice()),
        &mapper,
        publisher,
        validator,
        &options,
        out,
    )?;
    writeln!(out, "{}", format_id_list(&ids))?;
    writeln!(out, "{} nanopubs processed", ids.len())?;
    let index = publish_index(&ids, &config.index, publisher, options.mode, out)?;
    Ok(RunSummary { ids, index })
}

/// Runs the whole pipeline with the configured profile and nanopub server.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<RunSummary> {
    let mode = config.publish_mode();
    let orcid = NamedNode::new(config.creator.as_str())?;
    let key_path = config.key_path.clone().or_else(default_key_path);
    let profile = Profile::load_or_generate(orcid, key_path.as_deref(), !mode.is_publish())?;
    let mut client = NanopubClient::new(profile, config.server_url.clone(), config.timeout())?;
    run_with(config, &mut client, out)
}
