//! Maps one validated spreadsheet row onto the off-label indication template.
//!
//! The output is the three user-facing graphs of a nanopub: the assertion, its
//! provenance and its publication info. Node identities inside the assertion are fixed
//! local names (`association`, `context`) in the temporary nanopub namespace; every
//! statement must therefore be published as its own nanopub, whose trusty URI scopes
//! those names.

use crate::consts::*;
use crate::nanopub::{temp_base, temp_node, ASSERTION};
use crate::row::SourceRow;
use anyhow::Result;
use lazy_static::lazy_static;
use log::debug;
use oxigraph::model::{Graph, Literal, NamedNode, NamedNodeRef, TermRef, TripleRef};
use regex::{Captures, Regex};

lazy_static! {
    static ref PUBMED_PREFIX: Regex =
        Regex::new(r"(?i)^https?://pubmed\.ncbi\.nlm\.nih\.gov(?::\d+)?(/|\?|#|$)")
            .expect("valid pubmed regex");
}

pub const PUBMED_HOST: &str = "pubmed.ncbi.nlm.nih.gov";

/// Canonical form of PubMed article links used in the published statements.
pub const PUBMED_CANONICAL_PREFIX: &str = "http://www.ncbi.nlm.nih.gov/pubmed/";

/// The graphs produced for one row.
#[derive(Debug, Clone)]
pub struct Statement {
    pub assertion: Graph,
    pub provenance: Graph,
    pub pubinfo: Graph,
}

/// Node standing for the drug/disease association of a statement.
pub fn association_node() -> NamedNode {
    temp_node("association")
}

/// Node standing for the study population the indication applies to.
pub fn context_node() -> NamedNode {
    temp_node("context")
}

/// Rewrites `pubmed.ncbi.nlm.nih.gov` links to the `www.ncbi.nlm.nih.gov/pubmed/` form,
/// keeping any path, query or fragment. Any other URL is returned unchanged.
pub fn normalize_publication_url(url: &str) -> String {
    PUBMED_PREFIX
        .replace(url.trim(), |caps: &Captures| match &caps[1] {
            "/" | "" => PUBMED_CANONICAL_PREFIX.to_string(),
            sep => format!("{PUBMED_CANONICAL_PREFIX}{sep}"),
        })
        .into_owned()
}

fn add<'a>(
    graph: &mut Graph,
    subject: NamedNodeRef<'a>,
    predicate: NamedNodeRef<'a>,
    object: impl Into<TermRef<'a>>,
) {
    graph.insert(TripleRef::new(subject, predicate, object));
}

/// Builds statements for a fixed creator.
#[derive(Debug, Clone)]
pub struct Mapper {
    creator: NamedNode,
}

impl Mapper {
    pub fn new(creator: NamedNode) -> Self {
        Self { creator }
    }

    pub fn map(&self, row: &SourceRow) -> Result<Statement> {
        let association = association_node();
        let context = context_node();
        let publication = NamedNode::new(normalize_publication_url(row.publication.as_str()))?;
        debug!(
            "Mapping {} treats {} ({})",
            row.drug, row.disease, publication
        );

        let context_label = Literal::new_simple_literal(row.context.trim());
        let target_group = Literal::new_simple_literal(row.target_group.as_str());
        let drug_name = Literal::new_simple_literal(row.drug_name.as_str());
        let disease_name = Literal::new_simple_literal(row.disease_name.as_str());

        let mut g = Graph::new();
        let a = association.as_ref();
        add(&mut g, a, TYPE, CHEMICAL_TO_DISEASE_ASSOCIATION);
        add(&mut g, a, CATEGORY, CHEMICAL_TO_DISEASE_ASSOCIATION);
        add(&mut g, a, LABEL, context_label.as_ref());

        add(&mut g, a, RDF_SUBJECT, row.drug.as_ref());
        add(&mut g, a, RDF_OBJECT, row.disease.as_ref());
        add(&mut g, a, RDF_PREDICATE, TREATS);
        add(&mut g, a, RELATION, OFF_LABEL_USE);

        add(&mut g, a, AGGREGATOR_KNOWLEDGE_SOURCE, KNOWLEDGE_COLLABORATORY);
        add(&mut g, a, PUBLICATIONS, publication.as_ref());
        add(&mut g, a, HAS_POPULATION_CONTEXT, context.as_ref());

        let c = context.as_ref();
        add(&mut g, c, TYPE, COHORT);
        add(&mut g, c, CATEGORY, COHORT);
        add(&mut g, c, LABEL, target_group.as_ref());
        if let Some(phenotype) = &row.phenotype {
            add(&mut g, c, HAS_PHENOTYPE, phenotype.as_ref());
        }

        add(&mut g, row.drug.as_ref(), TYPE, DRUG);
        add(&mut g, row.drug.as_ref(), CATEGORY, DRUG);
        add(&mut g, row.drug.as_ref(), LABEL, drug_name.as_ref());
        add(&mut g, row.disease.as_ref(), TYPE, DISEASE);
        add(&mut g, row.disease.as_ref(), CATEGORY, DISEASE);
        add(&mut g, row.disease.as_ref(), LABEL, disease_name.as_ref());

        let mut provenance = Graph::new();
        let assertion_graph = temp_node(ASSERTION);
        add(
            &mut provenance,
            assertion_graph.as_ref(),
            WAS_ATTRIBUTED_TO,
            self.creator.as_ref(),
        );

        let mut pubinfo = Graph::new();
        let base = temp_base();
        add(
            &mut pubinfo,
            base.as_ref(),
            WAS_CREATED_FROM_TEMPLATE,
            OFF_LABEL_TEMPLATE,
        );
        let biolink = NamedNodeRef::new_unchecked(BIOLINK);
        let version = Literal::new_simple_literal(BIOLINK_VERSION);
        add(&mut pubinfo, biolink, PAV_VERSION, version.as_ref());

        Ok(Statement {
            assertion: g,
            provenance,
            pubinfo,
        })
    }
}
