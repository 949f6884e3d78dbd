use offlabel_np::consts::*;
use offlabel_np::index::{IndexDocument, IndexMetadata};
use offlabel_np::nanopub::{sign, verify, ASSERTION, PROVENANCE, PUBINFO};
use offlabel_np::profile::Profile;
use oxigraph::model::{NamedNode, TermRef};
use std::path::Path;

const A: &str = "http://purl.org/np/RAaaaa";
const B: &str = "http://purl.org/np/RAbbbb";
const C: &str = "http://purl.org/np/RAcccc";

#[test]
fn test_elements_keep_order() {
    let doc = IndexDocument::new([A, B, C], IndexMetadata::default()).unwrap();
    let elements: Vec<&str> = doc.elements().iter().map(|e| e.as_str()).collect();
    assert_eq!(elements, vec![A, B, C]);
}

#[test]
fn test_duplicates_are_kept() {
    let doc = IndexDocument::new([A, B, A], IndexMetadata::default()).unwrap();
    assert_eq!(doc.elements().len(), 3);
    assert_eq!(doc.elements()[0], doc.elements()[2]);
}

#[test]
fn test_empty_index_is_rejected() {
    let empty: Vec<String> = Vec::new();
    assert!(IndexDocument::new(empty, IndexMetadata::default()).is_err());
}

#[test]
fn test_index_nanopub_graphs() {
    let meta = IndexMetadata::default();
    let np = IndexDocument::new([A, B, C], meta.clone())
        .unwrap()
        .to_nanopub();

    let assertion = np.graph(ASSERTION);
    assert_eq!(assertion.len(), 3);
    for element in [A, B, C] {
        let element = NamedNode::new(element).unwrap();
        assert_eq!(
            assertion
                .subjects_for_predicate_object(INCLUDES_ELEMENT, element.as_ref())
                .count(),
            1
        );
    }

    let pubinfo = np.graph(PUBINFO);
    assert_eq!(
        pubinfo
            .subjects_for_predicate_object(TYPE, NANOPUB_INDEX)
            .count(),
        1
    );
    let created = pubinfo
        .triples_for_predicate(CREATED)
        .next()
        .map(|t| t.object)
        .unwrap();
    match created {
        TermRef::Literal(l) => {
            assert_eq!(l.value(), meta.creation_time);
            assert_eq!(l.datatype().as_str(), "http://www.w3.org/2001/XMLSchema#dateTime");
        }
        other => panic!("unexpected creation time {other}"),
    }

    let provenance = np.graph(PROVENANCE);
    assert_eq!(provenance.len(), meta.creators.len());
}

#[test]
fn test_signed_index_verifies() {
    let creator = NamedNode::new(IndexMetadata::default().creators[0].as_str()).unwrap();
    let profile = Profile::load(creator, Path::new("fixtures/id_rsa")).unwrap();
    let np = IndexDocument::new([A, B], IndexMetadata::default())
        .unwrap()
        .to_nanopub();
    let signed = sign(&np, &profile).unwrap();
    verify(&signed).unwrap();
    assert_eq!(signed.graph(ASSERTION).len(), 2);
}
