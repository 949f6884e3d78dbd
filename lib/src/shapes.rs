//! Shape conformance checks for produced statements.
//!
//! A [`ShapeSchema`] is a set of shapes, each a list of triple constraints (predicate,
//! cardinality, value expression). Validation starts from one shape and one focus node
//! and follows shape references through the graph. It is not a general ShEx engine.
//!
//! [`ShapeSchema::biolink`] is a local, hand-written subset of the Biolink ShEx shapes:
//! the association, drug, disease and cohort constraints an off-label statement touches.
//! A "Conforms" report means the statement satisfies that subset, not full Biolink
//! conformance.

use crate::consts::*;
use anyhow::{anyhow, Result};
use log::debug;
use oxigraph::model::{Graph, NamedNode, NamedNodeRef, NamedOrBlankNodeRef, TermRef};
use std::collections::{HashMap, HashSet};
use std::fmt;

pub trait ShapeValidator {
    /// Checks that `focus` conforms to the shape `start` within `graph`.
    fn validate(
        &self,
        graph: &Graph,
        start: NamedNodeRef<'_>,
        focus: NamedNodeRef<'_>,
    ) -> Result<ValidationReport>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Iri,
    Literal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueExpr {
    Any,
    Kind(NodeKind),
    /// value must be one of these IRIs
    OneOf(Vec<NamedNode>),
    /// value must conform to the referenced shape
    Shape(NamedNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripleConstraint {
    pub predicate: NamedNode,
    pub value: ValueExpr,
    pub min: usize,
    pub max: Option<usize>,
}

impl TripleConstraint {
    pub fn new(predicate: NamedNodeRef<'_>, value: ValueExpr, min: usize, max: Option<usize>) -> Self {
        Self {
            predicate: predicate.into_owned(),
            value,
            min,
            max,
        }
    }

    fn one(predicate: NamedNodeRef<'_>, value: ValueExpr) -> Self {
        Self::new(predicate, value, 1, Some(1))
    }

    fn optional(predicate: NamedNodeRef<'_>, value: ValueExpr) -> Self {
        Self::new(predicate, value, 0, Some(1))
    }

    fn at_least_one(predicate: NamedNodeRef<'_>, value: ValueExpr) -> Self {
        Self::new(predicate, value, 1, None)
    }

    fn any_number(predicate: NamedNodeRef<'_>, value: ValueExpr) -> Self {
        Self::new(predicate, value, 0, None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub id: NamedNode,
    pub constraints: Vec<TripleConstraint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub focus: String,
    pub shape: String,
    pub predicate: Option<String>,
    pub message: String,
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.predicate {
            Some(p) => write!(f, "{} @ <{}> [{}]: {}", self.focus, self.shape, p, self.message),
            None => write!(f, "{} @ <{}>: {}", self.focus, self.shape, self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub conforms: bool,
    pub results: Vec<ValidationResult>,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.conforms {
            return write!(f, "Conforms");
        }
        writeln!(f, "Does not conform ({} violations):", self.results.len())?;
        for r in &self.results {
            writeln!(f, "  - {r}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShapeSchema {
    shapes: HashMap<NamedNode, Shape>,
}

fn one_of(values: &[NamedNodeRef<'_>]) -> ValueExpr {
    ValueExpr::OneOf(values.iter().map(|v| v.into_owned()).collect())
}

fn typed_entity(class: NamedNodeRef<'_>, mut extra: Vec<TripleConstraint>) -> Shape {
    let mut constraints = vec![
        TripleConstraint::at_least_one(TYPE, one_of(&[class])),
        TripleConstraint::at_least_one(CATEGORY, one_of(&[class])),
        TripleConstraint::optional(LABEL, ValueExpr::Kind(NodeKind::Literal)),
    ];
    constraints.append(&mut extra);
    Shape {
        id: class.into_owned(),
        constraints,
    }
}

impl ShapeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.insert(shape.id.clone(), shape);
        self
    }

    pub fn shape(&self, id: NamedNodeRef<'_>) -> Option<&Shape> {
        self.shapes.get(&id.into_owned())
    }

    /// Local subset of the Biolink shapes: a chemical-to-disease association and the nodes
    /// it points to. Shape IRIs are the Biolink class IRIs.
    pub fn biolink() -> Self {
        let iri = || ValueExpr::Kind(NodeKind::Iri);
        let association = typed_entity(
            CHEMICAL_TO_DISEASE_ASSOCIATION,
            vec![
                TripleConstraint::one(RDF_SUBJECT, ValueExpr::Shape(DRUG.into_owned())),
                TripleConstraint::one(RDF_OBJECT, ValueExpr::Shape(DISEASE.into_owned())),
                TripleConstraint::one(RDF_PREDICATE, one_of(&[TREATS])),
                TripleConstraint::optional(RELATION, iri()),
                TripleConstraint::any_number(PUBLICATIONS, iri()),
                TripleConstraint::any_number(AGGREGATOR_KNOWLEDGE_SOURCE, iri()),
                TripleConstraint::optional(
                    HAS_POPULATION_CONTEXT,
                    ValueExpr::Shape(COHORT.into_owned()),
                ),
            ],
        );
        Self::new()
            .with_shape(association)
            .with_shape(typed_entity(DRUG, vec![]))
            .with_shape(typed_entity(DISEASE, vec![]))
            .with_shape(typed_entity(
                COHORT,
                vec![TripleConstraint::any_number(HAS_PHENOTYPE, iri())],
            ))
    }

    fn check_node(
        &self,
        graph: &Graph,
        shape: &Shape,
        focus: NamedOrBlankNodeRef<'_>,
        visited: &mut HashSet<(NamedNode, String)>,
        results: &mut Vec<ValidationResult>,
    ) {
        if !visited.insert((shape.id.clone(), focus.to_string())) {
            return;
        }
        debug!("Checking {} against <{}>", focus, shape.id);
        for constraint in &shape.constraints {
            let values: Vec<TermRef<'_>> = graph
                .objects_for_subject_predicate(focus, constraint.predicate.as_ref())
                .collect();
            let violation = |message: String| ValidationResult {
                focus: focus.to_string(),
                shape: shape.id.as_str().to_string(),
                predicate: Some(constraint.predicate.as_str().to_string()),
                message,
            };
            if values.len() < constraint.min {
                results.push(violation(format!(
                    "expected at least {} value(s) but found {}",
                    constraint.min,
                    values.len()
                )));
            }
            if let Some(max) = constraint.max {
                if values.len() > max {
                    results.push(violation(format!(
                        "expected at most {} value(s) but found {}",
                        max,
                        values.len()
                    )));
                }
            }
            for value in values {
                match &constraint.value {
                    ValueExpr::Any => {}
                    ValueExpr::Kind(NodeKind::Iri) => {
                        if !matches!(value, TermRef::NamedNode(_)) {
                            results.push(violation(format!("{value} is not an IRI")));
                        }
                    }
                    ValueExpr::Kind(NodeKind::Literal) => {
                        if !matches!(value, TermRef::Literal(_)) {
                            results.push(violation(format!("{value} is not a literal")));
                        }
                    }
                    ValueExpr::OneOf(allowed) => {
                        let ok = match value {
                            TermRef::NamedNode(n) => allowed.iter().any(|a| a.as_ref() == n),
                            _ => false,
                        };
                        if !ok {
                            results.push(violation(format!("{value} is not an allowed value")));
                        }
                    }
                    ValueExpr::Shape(reference) => {
                        let node = match value {
                            TermRef::NamedNode(n) => NamedOrBlankNodeRef::from(n),
                            TermRef::BlankNode(b) => NamedOrBlankNodeRef::from(b),
                            _ => {
                                results.push(violation(format!(
                                    "{value} cannot be checked against <{reference}>"
                                )));
                                continue;
                            }
                        };
                        match self.shapes.get(reference) {
                            Some(nested) => {
                                self.check_node(graph, nested, node, visited, results)
                            }
                            None => results.push(violation(format!(
                                "references unknown shape <{reference}>"
                            ))),
                        }
                    }
                }
            }
        }
    }
}

impl ShapeValidator for ShapeSchema {
    fn validate(
        &self,
        graph: &Graph,
        start: NamedNodeRef<'_>,
        focus: NamedNodeRef<'_>,
    ) -> Result<ValidationReport> {
        let shape = self
            .shape(start)
            .ok_or_else(|| anyhow!("Unknown start shape <{}>", start))?;
        let mut results = Vec::new();
        let mut visited = HashSet::new();
        self.check_node(graph, shape, focus.into(), &mut visited, &mut results);
        Ok(ValidationReport {
            conforms: results.is_empty(),
            results,
        })
    }
}
