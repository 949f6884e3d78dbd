//! Defines constant NamedNodeRefs for the vocabularies used by the off-label indication
//! template: RDF/RDFS, Biolink, the nanopub schemas, PROV, PAV and Dublin Core.

use oxigraph::model::NamedNodeRef;

// temporary namespace of an unsigned nanopub; rewritten to the trusty URI on signing
pub const NP_TEMP_BASE: &str = "http://purl.org/nanopub/temp/mynanopub#";

pub const BIOLINK: &str = "https://w3id.org/biolink/vocab/";
pub const BIOLINK_VERSION: &str = "2.3.0";

// rdf
pub const TYPE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
pub const RDF_SUBJECT: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#subject");
pub const RDF_PREDICATE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate");
pub const RDF_OBJECT: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#object");
// rdfs
pub const LABEL: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#label");
pub const SEE_ALSO: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#seeAlso");

// biolink classes
pub const CHEMICAL_TO_DISEASE_ASSOCIATION: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
    "https://w3id.org/biolink/vocab/ChemicalToDiseaseOrPhenotypicFeatureAssociation",
);
pub const DRUG: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("https://w3id.org/biolink/vocab/Drug");
pub const DISEASE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://w3id.org/biolink/vocab/Disease");
pub const COHORT: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://w3id.org/biolink/vocab/Cohort");
// biolink slots
pub const CATEGORY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://w3id.org/biolink/vocab/category");
pub const TREATS: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://w3id.org/biolink/vocab/treats");
pub const RELATION: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://w3id.org/biolink/vocab/relation");
pub const AGGREGATOR_KNOWLEDGE_SOURCE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://w3id.org/biolink/vocab/aggregator_knowledge_source");
pub const PUBLICATIONS: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://w3id.org/biolink/vocab/publications");
pub const HAS_POPULATION_CONTEXT: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://w3id.org/biolink/vocab/has_population_context");
pub const HAS_PHENOTYPE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://w3id.org/biolink/vocab/has_phenotype");

// fixed values of the off-label template
pub const OFF_LABEL_USE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.obolibrary.org/obo/NCIT_C94303");
pub const KNOWLEDGE_COLLABORATORY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://w3id.org/biolink/infores/knowledge-collaboratory");
pub const OFF_LABEL_TEMPLATE: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
    "http://purl.org/np/RAhNHZw6Urw_Mccs4qy6Ws3C9CRuaHpQx8AwuApbWkqnY",
);
pub const DRUGBANK_PREFIX: &str = "http://identifiers.org/drugbank/";

// nanopub schema
pub const NANOPUBLICATION: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.nanopub.org/nschema#Nanopublication");
pub const HAS_ASSERTION: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.nanopub.org/nschema#hasAssertion");
pub const HAS_PROVENANCE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.nanopub.org/nschema#hasProvenance");
pub const HAS_PUBLICATION_INFO: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.nanopub.org/nschema#hasPublicationInfo");
// npx extensions
pub const NANOPUB_INDEX: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/nanopub/x/NanopubIndex");
pub const INCLUDES_ELEMENT: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/nanopub/x/includesElement");
pub const HAS_SIGNATURE_TARGET: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/nanopub/x/hasSignatureTarget");
pub const HAS_ALGORITHM: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/nanopub/x/hasAlgorithm");
pub const HAS_PUBLIC_KEY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/nanopub/x/hasPublicKey");
pub const HAS_SIGNATURE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/nanopub/x/hasSignature");
pub const WAS_CREATED_FROM_TEMPLATE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://w3id.org/np/o/ntemplate/wasCreatedFromTemplate");

// prov / pav
pub const WAS_ATTRIBUTED_TO: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/ns/prov#wasAttributedTo");
pub const PAV_VERSION: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/pav/version");
pub const PAV_CREATED_BY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/pav/createdBy");
// dc / dcterms
pub const DC_TITLE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/dc/elements/1.1/title");
pub const DC_DESCRIPTION: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/dc/elements/1.1/description");
pub const CREATED: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/dc/terms/created");
pub const CREATOR: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/dc/terms/creator");

/// Prefixes registered on every TriG serialization.
pub const PREFIXES: [(&str, &str); 9] = [
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ("np", "http://www.nanopub.org/nschema#"),
    ("npx", "http://purl.org/nanopub/x/"),
    ("biolink", BIOLINK),
    ("prov", "http://www.w3.org/ns/prov#"),
    ("pav", "http://purl.org/pav/"),
    ("dcterms", "http://purl.org/dc/terms/"),
];
