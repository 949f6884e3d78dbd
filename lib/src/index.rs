//! Nanopub indexes: one nanopub listing every published statement of a dataset.

use crate::consts::*;
use crate::nanopub::{temp_base, temp_node, Nanopub, ASSERTION};
use anyhow::{anyhow, bail, Result};
use chrono::prelude::*;
use oxigraph::model::vocab::xsd;
use oxigraph::model::{Graph, Literal, NamedNode, TripleRef};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CREATOR: &str = "https://orcid.org/0000-0002-7641-6446";

/// Fixed descriptive metadata of the index.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct IndexMetadata {
    pub title: String,
    pub description: String,
    pub see_also: Option<String>,
    pub creators: Vec<String>,
    /// ISO-8601 timestamp, with or without offset
    pub creation_time: String,
}

impl Default for IndexMetadata {
    fn default() -> Self {
        Self {
            title: "Off-label drug indications dataset".to_string(),
            description: "A dataset of 327 off-label drug indications found in PubMed articles. \
With additional information on the context of the indications, such as the target group age \
range (adult/children), or if the target group has a specific phenotype. \n\
Drugs are identified by their DrugBank IDs, and conditions are identified by their MONDO, EFO, \
or HPO IDs.\n\
Curated by Ricardo de Miranda Azevedo. See \
https://github.com/MaastrichtU-IDS/off-label-drug-indications-dataset for more details."
                .to_string(),
            see_also: Some(
                "https://github.com/MaastrichtU-IDS/off-label-drug-indications-dataset".to_string(),
            ),
            creators: vec![DEFAULT_CREATOR.to_string()],
            creation_time: "2021-10-02T00:00:00".to_string(),
        }
    }
}

fn check_timestamp(value: &str) -> Result<()> {
    let ok = DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok();
    if !ok {
        bail!("Index creation time is not an ISO-8601 timestamp: {value}");
    }
    Ok(())
}

/// Ordered list of nanopub URIs plus metadata. Duplicates are kept.
#[derive(Debug, Clone)]
pub struct IndexDocument {
    elements: Vec<NamedNode>,
    creators: Vec<NamedNode>,
    see_also: Option<NamedNode>,
    metadata: IndexMetadata,
}

impl IndexDocument {
    pub fn new<I, S>(uris: I, metadata: IndexMetadata) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let elements = uris
            .into_iter()
            .map(|u| {
                let u = u.as_ref();
                NamedNode::new(u).map_err(|e| anyhow!("Invalid index element <{u}>: {e}"))
            })
            .collect::<Result<Vec<_>>>()?;
        if elements.is_empty() {
            bail!("Cannot build a nanopub index without any nanopub URI");
        }
        let creators = metadata
            .creators
            .iter()
            .map(|c| NamedNode::new(c.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let see_also = metadata
            .see_also
            .as_deref()
            .map(|s| NamedNode::new(s))
            .transpose()?;
        check_timestamp(&metadata.creation_time)?;
        Ok(Self {
            elements,
            creators,
            see_also,
            metadata,
        })
    }

    pub fn elements(&self) -> &[NamedNode] {
        &self.elements
    }

    pub fn metadata(&self) -> &IndexMetadata {
        &self.metadata
    }

    pub fn to_nanopub(&self) -> Nanopub {
        let this = temp_base();

        let mut assertion = Graph::new();
        for element in &self.elements {
            assertion.insert(TripleRef::new(
                this.as_ref(),
                INCLUDES_ELEMENT,
                element.as_ref(),
            ));
        }

        let mut provenance = Graph::new();
        let assertion_graph = temp_node(ASSERTION);
        for creator in &self.creators {
            provenance.insert(TripleRef::new(
                assertion_graph.as_ref(),
                WAS_ATTRIBUTED_TO,
                creator.as_ref(),
            ));
        }

        let mut pubinfo = Graph::new();
        let title = Literal::new_simple_literal(self.metadata.title.as_str());
        let description = Literal::new_simple_literal(self.metadata.description.as_str());
        let created =
            Literal::new_typed_literal(self.metadata.creation_time.as_str(), xsd::DATE_TIME);
        pubinfo.insert(TripleRef::new(this.as_ref(), TYPE, NANOPUB_INDEX));
        pubinfo.insert(TripleRef::new(this.as_ref(), DC_TITLE, title.as_ref()));
        pubinfo.insert(TripleRef::new(
            this.as_ref(),
            DC_DESCRIPTION,
            description.as_ref(),
        ));
        if let Some(see_also) = &self.see_also {
            pubinfo.insert(TripleRef::new(this.as_ref(), SEE_ALSO, see_also.as_ref()));
        }
        for creator in &self.creators {
            pubinfo.insert(TripleRef::new(this.as_ref(), PAV_CREATED_BY, creator.as_ref()));
        }
        pubinfo.insert(TripleRef::new(this.as_ref(), CREATED, created.as_ref()));

        Nanopub::new(&assertion, &provenance, &pubinfo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metadata_is_valid() {
        let doc = IndexDocument::new(["http://np#0"], IndexMetadata::default()).unwrap();
        assert_eq!(doc.elements().len(), 1);
        assert_eq!(doc.metadata().creation_time, "2021-10-02T00:00:00");
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let meta = IndexMetadata {
            creation_time: "October 2nd".to_string(),
            ..IndexMetadata::default()
        };
        assert!(IndexDocument::new(["http://np#0"], meta).is_err());
    }

    #[test]
    fn test_relative_element_is_rejected() {
        assert!(IndexDocument::new(["np#0"], IndexMetadata::default()).is_err());
    }
}
