//! Nanopublication assembly, TriG serialization and signing.
//!
//! An unsigned [`Nanopub`] lives under the temporary namespace
//! `http://purl.org/nanopub/temp/mynanopub#` and is made of four named graphs: the head,
//! the assertion, the provenance and the publication info.
//!
//! Signing goes through the `nanopub` crate, which normalizes the graphs the way nanopub
//! servers do, signs them with the profile's RSA key and renames every temporary IRI to
//! the trusty URI (`.../RA...`). The signed TriG is parsed back into a [`SignedNanopub`].

use crate::consts::*;
use crate::mapper::Statement;
use crate::profile::Profile;
use anyhow::{anyhow, Result};
use log::debug;
use oxigraph::io::{RdfFormat, RdfParser, RdfSerializer};
use oxigraph::model::{
    Dataset, Graph, GraphNameRef, NamedNode, NamedNodeRef, NamedOrBlankNodeRef, QuadRef, TermRef,
    TripleRef,
};

pub const HEAD: &str = "Head";
pub const ASSERTION: &str = "assertion";
pub const PROVENANCE: &str = "provenance";
pub const PUBINFO: &str = "pubinfo";

/// Trusty URI module identifier for RDF graph content
pub const ARTIFACT_CODE_PREFIX: &str = "RA";

fn np_error(err: impl std::fmt::Debug) -> anyhow::Error {
    anyhow!("nanopub: {err:?}")
}

/// The nanopub node of an unsigned nanopub.
pub fn temp_base() -> NamedNode {
    NamedNode::new_unchecked(NP_TEMP_BASE)
}

/// A local name (graph, template node) in the temporary nanopub namespace.
pub fn temp_node(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("{NP_TEMP_BASE}{local}"))
}

fn insert_graph(dataset: &mut Dataset, graph: &Graph, name: NamedNodeRef<'_>) {
    for triple in graph.iter() {
        dataset.insert(QuadRef::new(
            triple.subject,
            triple.predicate,
            triple.object,
            name,
        ));
    }
}

fn extract_graph(dataset: &Dataset, name: NamedNodeRef<'_>) -> Graph {
    let mut graph = Graph::new();
    for quad in dataset.quads_for_graph_name(name) {
        graph.insert(TripleRef::new(quad.subject, quad.predicate, quad.object));
    }
    graph
}

fn serialize_trig(dataset: &Dataset) -> Result<String> {
    let mut serializer = RdfSerializer::from_format(RdfFormat::TriG);
    for (prefix, iri) in PREFIXES {
        serializer = serializer.with_prefix(prefix, iri)?;
    }
    serializer = serializer.with_prefix("this", NP_TEMP_BASE)?;
    let mut writer = serializer.for_writer(Vec::new());
    // one block per graph, in nanopub order
    for local in [HEAD, ASSERTION, PROVENANCE, PUBINFO] {
        let name = temp_node(local);
        for quad in dataset.quads_for_graph_name(name.as_ref()) {
            writer.serialize_quad(quad)?;
        }
    }
    let bytes = writer.finish()?;
    Ok(String::from_utf8(bytes)?)
}

/// An unsigned nanopublication.
#[derive(Debug, Clone)]
pub struct Nanopub {
    dataset: Dataset,
}

impl Nanopub {
    /// Assembles the head graph around the three content graphs.
    pub fn new(assertion: &Graph, provenance: &Graph, pubinfo: &Graph) -> Self {
        let this = temp_base();
        let head = temp_node(HEAD);
        let assertion_name = temp_node(ASSERTION);
        let provenance_name = temp_node(PROVENANCE);
        let pubinfo_name = temp_node(PUBINFO);

        let mut dataset = Dataset::new();
        for (predicate, object) in [
            (TYPE, NANOPUBLICATION),
            (HAS_ASSERTION, assertion_name.as_ref()),
            (HAS_PROVENANCE, provenance_name.as_ref()),
            (HAS_PUBLICATION_INFO, pubinfo_name.as_ref()),
        ] {
            dataset.insert(QuadRef::new(this.as_ref(), predicate, object, head.as_ref()));
        }
        insert_graph(&mut dataset, assertion, assertion_name.as_ref());
        insert_graph(&mut dataset, provenance, provenance_name.as_ref());
        insert_graph(&mut dataset, pubinfo, pubinfo_name.as_ref());
        Self { dataset }
    }

    pub fn from_statement(statement: &Statement) -> Self {
        Self::new(
            &statement.assertion,
            &statement.provenance,
            &statement.pubinfo,
        )
    }

    /// Adds a `<this> predicate object` triple to the publication info.
    pub fn add_pubinfo<'a>(&mut self, predicate: NamedNodeRef<'a>, object: impl Into<TermRef<'a>>) {
        let object: TermRef<'a> = object.into();
        let this = temp_base();
        let pubinfo = temp_node(PUBINFO);
        self.dataset.insert(QuadRef::new(
            this.as_ref(),
            predicate,
            object,
            pubinfo.as_ref(),
        ));
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Returns one of the four graphs by local name (`HEAD`, `ASSERTION`, ...).
    pub fn graph(&self, local: &str) -> Graph {
        extract_graph(&self.dataset, temp_node(local).as_ref())
    }

    pub fn to_trig(&self) -> Result<String> {
        serialize_trig(&self.dataset)
    }
}

/// A nanopublication that carries a signature and has been renamed to its trusty URI.
#[derive(Debug, Clone)]
pub struct SignedNanopub {
    uri: NamedNode,
    dataset: Dataset,
    trig: String,
}

impl SignedNanopub {
    /// Parses a signed nanopub, e.g. one received from a server. The nanopub node is the
    /// subject typed `np:Nanopublication`. Nothing is checked here; call [`verify`].
    pub fn from_trig(trig: impl Into<String>) -> Result<Self> {
        let trig = trig.into();
        let mut dataset = Dataset::new();
        for quad in RdfParser::from_format(RdfFormat::TriG).for_reader(trig.as_bytes()) {
            dataset.insert(&quad?);
        }
        let uri = dataset
            .quads_for_predicate(TYPE)
            .find(|quad| quad.object == TermRef::from(NANOPUBLICATION))
            .and_then(|quad| match quad.subject {
                NamedOrBlankNodeRef::NamedNode(node) => Some(node.into_owned()),
                _ => None,
            })
            .ok_or_else(|| anyhow!("No np:Nanopublication node in signed nanopub"))?;
        Ok(Self { uri, dataset, trig })
    }

    /// The trusty URI, ending in the artifact code.
    pub fn uri(&self) -> &NamedNode {
        &self.uri
    }

    /// `RA` followed by the base64url hash of the normalized content.
    pub fn artifact_code(&self) -> Option<&str> {
        self.uri
            .as_str()
            .rsplit(|c: char| c == '/' || c == '#')
            .find(|part| part.starts_with(ARTIFACT_CODE_PREFIX))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Returns one of the four graphs by local name, following the links of the head graph.
    pub fn graph(&self, local: &str) -> Graph {
        let this = self.uri.as_ref();
        let name = match local {
            HEAD => self
                .dataset
                .quads_for_subject(this)
                .find(|quad| quad.predicate == TYPE)
                .and_then(|quad| match quad.graph_name {
                    GraphNameRef::NamedNode(head) => Some(head.into_owned()),
                    _ => None,
                }),
            ASSERTION | PROVENANCE | PUBINFO => {
                let link = match local {
                    ASSERTION => HAS_ASSERTION,
                    PROVENANCE => HAS_PROVENANCE,
                    _ => HAS_PUBLICATION_INFO,
                };
                self.dataset
                    .quads_for_subject(this)
                    .find(|quad| quad.predicate == link)
                    .and_then(|quad| match quad.object {
                        TermRef::NamedNode(graph) => Some(graph.into_owned()),
                        _ => None,
                    })
            }
            _ => None,
        };
        match name {
            Some(name) => extract_graph(&self.dataset, name.as_ref()),
            None => Graph::new(),
        }
    }

    /// The signed TriG as produced by the signer.
    pub fn trig(&self) -> &str {
        &self.trig
    }
}

/// Signs `nanopub` with the profile's key and renames it to its trusty URI.
pub fn sign(nanopub: &Nanopub, profile: &Profile) -> Result<SignedNanopub> {
    let trig = nanopub.to_trig()?;
    let signed = ::nanopub::Nanopub::new(trig.as_str())
        .and_then(|np| np.sign(profile.np_profile()))
        .map_err(np_error)?;
    let signed = SignedNanopub::from_trig(signed.rdf().map_err(np_error)?)?;
    debug!("Signed nanopub {}", signed.uri());
    Ok(signed)
}

/// Checks that the artifact code matches the content and that the signature verifies
/// against the public key embedded in the nanopub.
pub fn verify(signed: &SignedNanopub) -> Result<()> {
    ::nanopub::Nanopub::new(signed.trig())
        .and_then(|np| np.check())
        .map_err(np_error)?;
    Ok(())
}
