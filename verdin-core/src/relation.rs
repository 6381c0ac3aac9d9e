//! Relation assertions: the typed hypermedia links a page declares about
//! the members reachable behind another page.

use crate::error::{Result, ValidationError};
use crate::graph::Graph;
use crate::term::Term;
use crate::vocab::{rdf, tree};
use std::fmt;

/// The closed vocabulary of relation kinds.
///
/// Parsing from the wire IRI is total: anything outside this set is an
/// explicit `UnknownRelationKind` error, never silently skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    EqualTo,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Prefix,
    Suffix,
    Substring,
    GeospatiallyContains,
}

impl RelationKind {
    pub fn from_iri(iri: &str) -> Result<Self> {
        match iri {
            tree::EQUAL_TO_RELATION => Ok(RelationKind::EqualTo),
            tree::GREATER_THAN_RELATION => Ok(RelationKind::GreaterThan),
            tree::GREATER_THAN_OR_EQUAL_TO_RELATION => Ok(RelationKind::GreaterThanOrEqual),
            tree::LESS_THAN_RELATION => Ok(RelationKind::LessThan),
            tree::LESS_THAN_OR_EQUAL_TO_RELATION => Ok(RelationKind::LessThanOrEqual),
            tree::PREFIX_RELATION => Ok(RelationKind::Prefix),
            tree::SUFFIX_RELATION => Ok(RelationKind::Suffix),
            tree::SUBSTRING_RELATION => Ok(RelationKind::Substring),
            tree::GEOSPATIALLY_CONTAINS_RELATION => Ok(RelationKind::GeospatiallyContains),
            other => Err(ValidationError::UnknownRelationKind(other.to_string())),
        }
    }

    pub fn iri(&self) -> &'static str {
        match self {
            RelationKind::EqualTo => tree::EQUAL_TO_RELATION,
            RelationKind::GreaterThan => tree::GREATER_THAN_RELATION,
            RelationKind::GreaterThanOrEqual => tree::GREATER_THAN_OR_EQUAL_TO_RELATION,
            RelationKind::LessThan => tree::LESS_THAN_RELATION,
            RelationKind::LessThanOrEqual => tree::LESS_THAN_OR_EQUAL_TO_RELATION,
            RelationKind::Prefix => tree::PREFIX_RELATION,
            RelationKind::Suffix => tree::SUFFIX_RELATION,
            RelationKind::Substring => tree::SUBSTRING_RELATION,
            RelationKind::GeospatiallyContains => tree::GEOSPATIALLY_CONTAINS_RELATION,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelationKind::EqualTo => "EqualToRelation",
            RelationKind::GreaterThan => "GreaterThanRelation",
            RelationKind::GreaterThanOrEqual => "GreaterThanOrEqualToRelation",
            RelationKind::LessThan => "LessThanRelation",
            RelationKind::LessThanOrEqual => "LessThanOrEqualToRelation",
            RelationKind::Prefix => "PrefixRelation",
            RelationKind::Suffix => "SuffixRelation",
            RelationKind::Substring => "SubstringRelation",
            RelationKind::GeospatiallyContains => "GeospatiallyContainsRelation",
        };
        write!(f, "{}", name)
    }
}

/// One relation assertion, derived by query from the accumulated graph.
#[derive(Debug, Clone)]
pub struct RelationAssertion {
    /// Original IRI of the page declaring the relation.
    pub page: String,
    pub kind: RelationKind,
    /// Original IRI of the page the relation points at.
    pub target_page: String,
    /// Property path to look up on each member of the target page.
    pub path: String,
    /// The asserted value, as found on the relation resource.
    pub value: Term,
}

/// Extract every relation assertion from the accumulated (anonymized)
/// graph.
///
/// Pattern: an anonymized `tree:Node` entity carries `rdf:subject` (its
/// original page IRI) and `tree:relation` edges; each relation resource
/// carries `rdf:type` (the kind), `tree:node`, `tree:value` and
/// `tree:path`. All bindings are joined, so a relation resource with
/// several types or values yields one assertion per combination, the way
/// a query engine would bind them.
pub fn extract_relations(graph: &Graph) -> Result<Vec<RelationAssertion>> {
    let tree_node = Term::Iri(tree::NODE.to_string());
    let mut assertions = Vec::new();

    for node in graph.subjects_with(rdf::TYPE, &tree_node) {
        let pages: Vec<&str> = graph
            .objects(node, rdf::SUBJECT)
            .into_iter()
            .filter_map(|t| t.as_iri())
            .collect();
        if pages.is_empty() {
            continue;
        }

        for relation_term in graph.objects(node, tree::RELATION) {
            let Some(relation) = relation_term.to_subject() else {
                continue;
            };
            let kinds = graph
                .objects(&relation, rdf::TYPE)
                .into_iter()
                .filter_map(|t| t.as_iri())
                .map(RelationKind::from_iri)
                .collect::<Result<Vec<_>>>()?;
            let targets: Vec<&str> = graph
                .objects(&relation, tree::NODE_PROP)
                .into_iter()
                .filter_map(|t| t.as_iri())
                .collect();
            let values = graph.objects(&relation, tree::VALUE);
            let paths: Vec<&str> = graph
                .objects(&relation, tree::PATH)
                .into_iter()
                .filter_map(|t| t.as_iri())
                .collect();

            for page in &pages {
                for kind in &kinds {
                    for target in &targets {
                        for value in &values {
                            for path in &paths {
                                assertions.push(RelationAssertion {
                                    page: (*page).to_string(),
                                    kind: *kind,
                                    target_page: (*target).to_string(),
                                    path: (*path).to_string(),
                                    value: (*value).clone(),
                                });
                            }
                        }
                    }
                }
            }
        }
    }

    Ok(assertions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RdfFormat;

    const RELATION_PAGE: &str = r#"
        @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
        @prefix tree: <https://w3id.org/tree#> .
        _:n0 a tree:Node ;
            rdf:subject <https://example.org/page1> ;
            tree:relation _:r0 .
        _:r0 a tree:GreaterThanRelation ;
            tree:node <https://example.org/page2> ;
            tree:value "2023-06-01"^^<http://www.w3.org/2001/XMLSchema#date> ;
            tree:path <http://www.w3.org/ns/sosa/resultTime> .
    "#;

    #[test]
    fn test_extract_relation() {
        let graph = Graph::parse(RELATION_PAGE, RdfFormat::Turtle, None).unwrap();
        let relations = extract_relations(&graph).unwrap();
        assert_eq!(relations.len(), 1);
        let relation = &relations[0];
        assert_eq!(relation.page, "https://example.org/page1");
        assert_eq!(relation.kind, RelationKind::GreaterThan);
        assert_eq!(relation.target_page, "https://example.org/page2");
        assert_eq!(relation.path, "http://www.w3.org/ns/sosa/resultTime");
    }

    #[test]
    fn test_unknown_kind_is_fatal() {
        let ttl = RELATION_PAGE.replace("tree:GreaterThanRelation", "tree:SidewaysRelation");
        let graph = Graph::parse(&ttl, RdfFormat::Turtle, None).unwrap();
        let err = extract_relations(&graph).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownRelationKind(iri)
            if iri == "https://w3id.org/tree#SidewaysRelation"));
    }

    #[test]
    fn test_kind_iri_roundtrip() {
        for kind in [
            RelationKind::EqualTo,
            RelationKind::GreaterThan,
            RelationKind::GreaterThanOrEqual,
            RelationKind::LessThan,
            RelationKind::LessThanOrEqual,
            RelationKind::Prefix,
            RelationKind::Suffix,
            RelationKind::Substring,
            RelationKind::GeospatiallyContains,
        ] {
            assert_eq!(RelationKind::from_iri(kind.iri()).unwrap(), kind);
        }
    }
}
