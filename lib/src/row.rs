//! Typed records for the off-label indication spreadsheet.
//!
//! The CSV export is deserialized into [`RawRow`], where every column is optional, and then
//! validated into a [`SourceRow`]. Validation happens once, at parse time, so the mapper
//! never has to deal with missing fields or relative URIs.

use crate::consts::DRUGBANK_PREFIX;
use crate::errors::MalformedRowError;
use crate::mapper::{normalize_publication_url, PUBMED_HOST};
use anyhow::Result;
use oxigraph::model::NamedNode;
use serde::Deserialize;
use std::io::Read;

pub const CONTEXT: &str = "context";
pub const DRUGBANK_ID: &str = "drugbank_id";
pub const DRUGBANK_NAME: &str = "drugbank_name";
pub const MONDO_URL: &str = "mondo_URL";
pub const MONDO_NAME: &str = "mondo_name";
pub const TARGET_GROUP: &str = "targetGroup";
pub const HAS_PHENOTYPE: &str = "hasPhenotype";
pub const URL_COMPLETE: &str = "URL Complete";

/// One spreadsheet record exactly as exported. Unknown columns are ignored.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub drugbank_id: Option<String>,
    #[serde(default)]
    pub drugbank_name: Option<String>,
    #[serde(rename = "mondo_URL", default)]
    pub mondo_url: Option<String>,
    #[serde(default)]
    pub mondo_name: Option<String>,
    #[serde(rename = "targetGroup", default)]
    pub target_group: Option<String>,
    #[serde(rename = "hasPhenotype", default)]
    pub has_phenotype: Option<String>,
    #[serde(rename = "URL Complete", default)]
    pub url_complete: Option<String>,
}

/// A validated source row. All strings are trimmed and non-empty, all URIs absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub context: String,
    pub drug: NamedNode,
    pub drug_name: String,
    pub disease: NamedNode,
    pub disease_name: String,
    pub target_group: String,
    pub phenotype: Option<NamedNode>,
    /// Evidence publication, as given in the sheet (not yet normalized)
    pub publication: NamedNode,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(row: usize, field: &str, value: Option<String>) -> Result<String, MalformedRowError> {
    present(value).ok_or_else(|| MalformedRowError::missing(row, field))
}

fn absolute_iri(row: usize, field: &str, value: String) -> Result<NamedNode, MalformedRowError> {
    NamedNode::new(value.as_str()).map_err(|e| {
        MalformedRowError::invalid(row, field, format!("is not an absolute URI <{value}>: {e}"))
    })
}

impl SourceRow {
    /// Validates a raw record. `row` is the 1-based data row number used in error messages.
    pub fn from_raw(row: usize, raw: RawRow) -> Result<Self, MalformedRowError> {
        let context = required(row, CONTEXT, raw.context)?;
        let drug_id = required(row, DRUGBANK_ID, raw.drugbank_id)?;
        let drug = absolute_iri(row, DRUGBANK_ID, format!("{DRUGBANK_PREFIX}{drug_id}"))?;
        let drug_name = required(row, DRUGBANK_NAME, raw.drugbank_name)?;
        let disease = absolute_iri(row, MONDO_URL, required(row, MONDO_URL, raw.mondo_url)?)?;
        let disease_name = required(row, MONDO_NAME, raw.mondo_name)?;
        let target_group = required(row, TARGET_GROUP, raw.target_group)?;
        let phenotype = present(raw.has_phenotype)
            .map(|p| absolute_iri(row, HAS_PHENOTYPE, p))
            .transpose()?;
        let publication =
            absolute_iri(row, URL_COMPLETE, required(row, URL_COMPLETE, raw.url_complete)?)?;
        if normalize_publication_url(publication.as_str())
            .to_ascii_lowercase()
            .contains(PUBMED_HOST)
        {
            return Err(MalformedRowError::invalid(
                row,
                URL_COMPLETE,
                format!("refers to {PUBMED_HOST} in a form that cannot be rewritten <{publication}>"),
            ));
        }

        Ok(Self {
            context,
            drug,
            drug_name,
            disease,
            disease_name,
            target_group,
            phenotype,
            publication,
        })
    }
}

/// Reads CSV (with a header line) and yields validated rows in source order.
///
/// Parse errors and malformed rows are yielded as `Err` items; callers that want
/// fail-fast semantics stop at the first one.
pub fn read_rows<R: Read>(reader: R) -> impl Iterator<Item = Result<SourceRow>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader)
        .into_deserialize::<RawRow>()
        .enumerate()
        .map(|(i, record)| -> Result<SourceRow> {
            let raw = record?;
            Ok(SourceRow::from_raw(i + 1, raw)?)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "context,drugbank_id,mondo_URL,URL Complete,drugbank_name,mondo_name,targetGroup,hasPhenotype";

    fn raw() -> RawRow {
        RawRow {
            context: Some(" Treatment of refractory cases ".to_string()),
            drugbank_id: Some("DB00563".to_string()),
            drugbank_name: Some("Methotrexate".to_string()),
            mondo_url: Some("http://purl.obolibrary.org/obo/MONDO_0005147".to_string()),
            mondo_name: Some("type 1 diabetes mellitus".to_string()),
            target_group: Some("children".to_string()),
            has_phenotype: None,
            url_complete: Some("https://pubmed.ncbi.nlm.nih.gov/123456".to_string()),
        }
    }

    #[test]
    fn test_from_raw_trims_and_builds_uris() {
        let row = SourceRow::from_raw(1, raw()).unwrap();
        assert_eq!(row.context, "Treatment of refractory cases");
        assert_eq!(row.drug.as_str(), "http://identifiers.org/drugbank/DB00563");
        assert!(row.phenotype.is_none());
    }

    #[test]
    fn test_missing_required_field_names_field() {
        let mut r = raw();
        r.drugbank_id = None;
        let err = SourceRow::from_raw(4, r).unwrap_err();
        assert_eq!(err.field, DRUGBANK_ID);
        assert_eq!(err.row, 4);

        let mut r = raw();
        r.url_complete = Some("   ".to_string());
        assert_eq!(SourceRow::from_raw(1, r).unwrap_err().field, URL_COMPLETE);
    }

    #[test]
    fn test_whitespace_phenotype_is_missing() {
        let mut r = raw();
        r.has_phenotype = Some("  ".to_string());
        let row = SourceRow::from_raw(1, r).unwrap();
        assert!(row.phenotype.is_none());
    }

    #[test]
    fn test_pubmed_url_without_path_is_accepted() {
        let mut r = raw();
        r.url_complete = Some("https://pubmed.ncbi.nlm.nih.gov?term=31227592".to_string());
        let row = SourceRow::from_raw(1, r).unwrap();
        assert_eq!(
            normalize_publication_url(row.publication.as_str()),
            "http://www.ncbi.nlm.nih.gov/pubmed/?term=31227592"
        );
    }

    #[test]
    fn test_unrewritable_pubmed_url_is_rejected() {
        for url in [
            "https://pubmed.ncbi.nlm.nih.gov.example.org/1",
            "https://doi.org/10.1000/1?via=pubmed.ncbi.nlm.nih.gov",
        ] {
            let mut r = raw();
            r.url_complete = Some(url.to_string());
            let err = SourceRow::from_raw(3, r).unwrap_err();
            assert_eq!(err.field, URL_COMPLETE, "{url}");
            assert_eq!(err.row, 3);
        }
    }

    #[test]
    fn test_blank_context_is_rejected() {
        let mut r = raw();
        r.context = Some("  \t ".to_string());
        assert_eq!(SourceRow::from_raw(1, r).unwrap_err().field, CONTEXT);
    }

    #[test]
    fn test_relative_disease_uri_is_rejected() {
        let mut r = raw();
        r.mondo_url = Some("MONDO_0005147".to_string());
        let err = SourceRow::from_raw(2, r).unwrap_err();
        assert_eq!(err.field, MONDO_URL);
        assert!(err.to_string().contains("absolute URI"));
    }

    #[test]
    fn test_read_rows_handles_optional_phenotype() {
        let csv = format!(
            "{HEADER}\n\
             ctx a,DB001,http://purl.obolibrary.org/obo/MONDO_1,https://pubmed.ncbi.nlm.nih.gov/1,Drug A,Disease A,adults,\n\
             ctx b,DB002,http://purl.obolibrary.org/obo/MONDO_2,http://example.org/paper,Drug B,Disease B,children,http://purl.obolibrary.org/obo/HP_0001\n"
        );
        let rows: Vec<SourceRow> = read_rows(csv.as_bytes())
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].phenotype.is_none());
        assert_eq!(
            rows[1].phenotype.as_ref().map(|p| p.as_str()),
            Some("http://purl.obolibrary.org/obo/HP_0001")
        );
    }

    #[test]
    fn test_read_rows_reports_row_number() {
        let csv = format!(
            "{HEADER}\n\
             ctx a,DB001,http://purl.obolibrary.org/obo/MONDO_1,https://pubmed.ncbi.nlm.nih.gov/1,Drug A,Disease A,adults,\n\
             ctx b,,http://purl.obolibrary.org/obo/MONDO_2,http://example.org/paper,Drug B,Disease B,children,\n"
        );
        let results: Vec<Result<SourceRow>> = read_rows(csv.as_bytes()).collect();
        assert!(results[0].is_ok());
        let err = results[1].as_ref().unwrap_err();
        let malformed = err.downcast_ref::<MalformedRowError>().unwrap();
        assert_eq!(malformed.row, 2);
        assert_eq!(malformed.field, DRUGBANK_ID);
    }
}
